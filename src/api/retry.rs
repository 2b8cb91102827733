use std::{fmt::Display, thread::sleep, time::Duration};

use crate::prelude::*;

/// Bounded retries with a fixed delay between the attempts.
#[derive(Copy, Clone, Debug)]
pub struct RetryPolicy {
    pub n_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Number of the attempts actually made when every one fails, at least one.
    #[must_use]
    pub fn max_attempts(self) -> u32 {
        self.n_attempts.max(1)
    }

    /// Call `attempt` until it succeeds or the attempts are exhausted.
    ///
    /// Returns the last error when every attempt has failed.
    pub fn run<T, E: Display>(self, mut attempt: impl FnMut() -> Result<T, E>) -> Result<T, E> {
        let n_attempts = self.max_attempts();
        let mut i_attempt = 1;
        loop {
            match attempt() {
                Ok(value) => return Ok(value),
                Err(error) if i_attempt >= n_attempts => return Err(error),
                Err(error) => {
                    warn!(i_attempt, n_attempts, delay = ?self.delay, "attempt failed: {error:#}");
                    sleep(self.delay);
                    i_attempt += 1;
                }
            }
        }
    }
}

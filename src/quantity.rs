#[macro_use]
mod macros;

pub mod energy;
pub mod power;
pub mod temperature;
pub mod time;
mod zero;

pub use self::zero::Zero;

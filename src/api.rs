pub mod pvoutput;
pub mod retry;
pub mod xively;

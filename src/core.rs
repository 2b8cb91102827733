pub mod channel;
pub mod day;
pub mod feed;
pub mod interval;
pub mod sample;
pub mod series;
pub mod summary;

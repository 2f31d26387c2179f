pub mod writer;

pub use writer::{file_name, timestamp_now, ImageWriter, TIMESTAMP_FORMAT};

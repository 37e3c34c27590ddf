pub mod analysis;
pub mod job;
pub mod raw;

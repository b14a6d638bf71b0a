pub mod report;
pub mod seed;

pub mod config;
pub mod crisis;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod progress;
pub mod quality;
pub mod scoring;
pub mod session;
pub mod storage;
// cmd and reports are binary modules (in main.rs), not part of the library
// surface. The core never prints; the binary owns presentation.

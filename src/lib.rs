//! Cinema and showtime lookup with concurrent detail enrichment.
//!
//! `showfinder` is an in-process orchestration layer over remote cinema,
//! showtime and movie services. A search seeds a collection of targets, a
//! bounded fan-out enriches each target independently, and the caller polls
//! aggregate readiness while rendering partial results as they arrive.

pub mod config;
pub mod enrichment;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use pipeline::Pipeline;

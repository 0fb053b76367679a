//! Risk Simulation Log Charts
//!
//! Turns the CSV logs written by a Risk game simulation (territory counts,
//! troop sizes and continent occupation rates per turn) into line charts,
//! one output directory per simulation run.

pub mod analytics;
pub mod config;
pub mod error;
pub mod logs;
pub mod pipeline;

pub use config::{AnalysisConfig, UnknownLogPolicy};
pub use error::AnalysisError;
pub use logs::LogKind;
pub use pipeline::Analyzer;

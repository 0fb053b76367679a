//! Batch processing of log files

pub mod analyzer;

pub use analyzer::Analyzer;

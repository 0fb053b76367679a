//! Simulation log files: classification, discovery and loading

pub mod file;
pub mod kind;
pub mod table;

pub use file::{discover, LogFile};
pub use kind::{ChartLayout, LogKind};
pub use table::{LogRow, LogTable};

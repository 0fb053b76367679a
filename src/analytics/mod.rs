//! Analytics modules for chart building, rendering and reporting

pub mod charts;
pub mod render;
pub mod report;

pub use charts::{ChartSpec, Series};
pub use render::{ChartRenderer, PdfRenderer};
pub use report::{print_summary, BatchReport, FileOutcome};

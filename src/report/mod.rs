//! Human-readable report
//!
//! Console output uses ANSI colors; Markdown output is meant to be pasted
//! into a pull request comment.

pub mod printer;
pub mod style;
pub mod table;

pub use printer::ReportPrinter;
pub use style::OutputStyle;

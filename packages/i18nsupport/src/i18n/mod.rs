//! I18n Module
//!
//! Message normalization and the trans-unit state machine.

pub mod icu;
pub mod normalized_message;
pub mod parsers;
pub mod placeholder;
pub mod units;
pub mod validation;

pub use normalized_message::{NormalizedMessage, Part};
pub use parsers::DialectKind;
pub use validation::ValidationReport;

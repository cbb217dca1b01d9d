//! Marker extraction from lab reports.
//!
//! [`extract_text_from_pdf`] pulls the literal strings out of a PDF's text
//! objects and [`parse_lab_text`] recognises markers line by line. Both are
//! used when no model is configured; the AI parser replaces only the second
//! step.

mod parser;
mod pdf;

use thiserror::Error;

pub use parser::{category_for, parse_lab_text, validate_markers, ParsedLabReport};
pub use pdf::extract_text_from_pdf;

/// Errors raised before any marker can be extracted
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabParseError {
    #[error("Text is required")]
    EmptyInput,

    #[error("Could not extract text from PDF. Try text input instead.")]
    NoExtractableText,
}

//! Diagnostics for the rill interpreter.
//!
//! [`SourceFile`] turns byte offsets into the human-readable location block
//! every phase's errors are reported with; [`Diagnostic`] is the rendered
//! surface the CLI prints. Positions are computed lazily, only when a
//! diagnostic is actually rendered.

mod diagnostic;
mod source;

pub use diagnostic::{Diagnostic, Severity};
pub use source::SourceFile;

//! Shared error utilities used across the compilation pipeline.
//!
//! Diagnostics follow the chibicc convention: echo the offending input line
//! and point at the bad byte with a caret on the line below.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("{expr_line}\n{marker} {message}"))]
  WithLocation {
    expr_line: String,
    marker: String,
    message: String,
  },
}

impl CompileError {
  /// Construct an error anchored at a specific byte offset in the source.
  pub fn at(expr: &str, loc: usize, message: impl Into<String>) -> Self {
    let safe_loc = loc.min(expr.len());
    let pad = expr[..safe_loc].chars().count();
    let marker = format!("{}^", " ".repeat(pad));
    Self::WithLocation {
      expr_line: expr.to_string(),
      marker,
      message: message.into(),
    }
  }
}

//! Crate root: wires together the compilation pipeline.
//!
//! The stages are intentionally small and composable so they can be evolved
//! independently:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns an expression AST.
//! - `codegen` lowers the tree into AArch64 assembly for a stack machine.
//! - `error` centralises reporting utilities shared by the other modules.
//!
//! Data flows one way: text, tokens, tree, text. Each stage hands ownership
//! of its output to the next and never touches it again.

pub mod error;
pub mod parser;
pub mod tokenizer;

mod codegen;

pub use error::{CompileError, CompileResult};

/// Compile an expression string into AArch64 assembly.
pub fn generate_assembly(expr: &str) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(expr)?;
  let ast = parser::parse(tokens, expr)?;
  Ok(codegen::generate(&ast))
}

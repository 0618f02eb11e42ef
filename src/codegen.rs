//! Code generation: lower the parsed AST into AArch64 assembly.
//!
//! The emitter uses a simple stack machine held in target memory: every
//! subexpression pushes its result, every binary operator pops two values
//! and pushes one back. Slots are 16 bytes wide to keep `sp` aligned as the
//! AArch64 ABI requires. Comparisons materialise their boolean through the
//! `cmp` + `cset` idiom.

use crate::parser::{AstNode, BinaryOp};

/// Emit a complete program that evaluates the expression and exits with the
/// result (truncated to the low 8 bits by the kernel) as its status.
pub fn generate(node: &AstNode) -> String {
  let mut asm = String::new();
  asm.push_str(".text\n");
  asm.push_str(".global main\n");
  asm.push_str("main:\n");

  emit_expr(node, &mut asm);

  // The parser guarantees exactly one value is left on the stack. Pop it
  // and hand it to exit(2), syscall 93 on Linux AArch64.
  asm.push_str("  ldr x0, [sp], #16\n");
  asm.push_str("  mov x8, #93\n");
  asm.push_str("  svc #0\n");

  asm
}

/// Post-order walk: children first so both operands sit on the stack before
/// the combining instruction runs, right operand on top.
fn emit_expr(node: &AstNode, asm: &mut String) {
  match node {
    AstNode::Num { value } => {
      // mov's immediate field is narrower than i64; literals past its range
      // are emitted verbatim and left for the assembler to reject.
      asm.push_str(&format!("  mov x0, #{value}\n"));
      // "!" requests pre-index write-back: sp drops 16 before the store.
      asm.push_str("  str x0, [sp, #-16]!\n");
    }
    AstNode::Binary { op, lhs, rhs } => {
      emit_expr(lhs, asm);
      emit_expr(rhs, asm);
      asm.push_str("  ldr x1, [sp], #16\n");
      asm.push_str("  ldr x0, [sp], #16\n");
      match op {
        BinaryOp::Add => asm.push_str("  add x0, x0, x1\n"),
        BinaryOp::Sub => asm.push_str("  sub x0, x0, x1\n"),
        BinaryOp::Mul => asm.push_str("  mul x0, x0, x1\n"),
        BinaryOp::Div => asm.push_str("  sdiv x0, x0, x1\n"),
        BinaryOp::Eq => {
          asm.push_str("  cmp x0, x1\n");
          asm.push_str("  cset x0, EQ\n");
        }
        BinaryOp::Ne => {
          asm.push_str("  cmp x0, x1\n");
          asm.push_str("  cset x0, NE\n");
        }
        BinaryOp::Lt => {
          asm.push_str("  cmp x0, x1\n");
          asm.push_str("  cset x0, LT\n");
        }
        BinaryOp::Le => {
          asm.push_str("  cmp x0, x1\n");
          asm.push_str("  cset x0, LE\n");
        }
        BinaryOp::Gt => {
          asm.push_str("  cmp x0, x1\n");
          asm.push_str("  cset x0, GT\n");
        }
        BinaryOp::Ge => {
          asm.push_str("  cmp x0, x1\n");
          asm.push_str("  cset x0, GE\n");
        }
      }
      asm.push_str("  str x0, [sp, #-16]!\n");
    }
  }
}

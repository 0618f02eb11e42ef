//! End-to-end checks: compile an expression, then execute the emitted
//! assembly with a minimal interpreter covering exactly the instruction
//! forms the code generator produces. The interpreter returns the value the
//! generated program would pass to exit(2).

use r64cc::generate_assembly;

#[derive(Default)]
struct Machine {
  x0: i64,
  x1: i64,
  x8: i64,
  cmp: Option<(i64, i64)>,
  stack: Vec<i64>,
}

fn run(asm: &str) -> i64 {
  let mut m = Machine::default();

  for line in asm.lines() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('.') || line.ends_with(':') {
      continue;
    }

    if let Some(imm) = line.strip_prefix("mov x0, #") {
      m.x0 = imm.parse().expect("bad mov immediate");
    } else if let Some(imm) = line.strip_prefix("mov x8, #") {
      m.x8 = imm.parse().expect("bad mov immediate");
    } else if line == "str x0, [sp, #-16]!" {
      m.stack.push(m.x0);
    } else if line == "ldr x1, [sp], #16" {
      m.x1 = m.stack.pop().expect("stack underflow popping x1");
    } else if line == "ldr x0, [sp], #16" {
      m.x0 = m.stack.pop().expect("stack underflow popping x0");
    } else if line == "add x0, x0, x1" {
      m.x0 = m.x0.wrapping_add(m.x1);
    } else if line == "sub x0, x0, x1" {
      m.x0 = m.x0.wrapping_sub(m.x1);
    } else if line == "mul x0, x0, x1" {
      m.x0 = m.x0.wrapping_mul(m.x1);
    } else if line == "sdiv x0, x0, x1" {
      m.x0 = m.x0.wrapping_div(m.x1);
    } else if line == "cmp x0, x1" {
      m.cmp = Some((m.x0, m.x1));
    } else if let Some(cond) = line.strip_prefix("cset x0, ") {
      let (a, b) = m.cmp.expect("cset without a preceding cmp");
      m.x0 = match cond {
        "EQ" => a == b,
        "NE" => a != b,
        "LT" => a < b,
        "LE" => a <= b,
        "GT" => a > b,
        "GE" => a >= b,
        other => panic!("unknown condition {other}"),
      } as i64;
    } else if line == "svc #0" {
      assert_eq!(m.x8, 93, "expected the exit syscall");
      assert!(m.stack.is_empty(), "operand stack not drained at exit");
      return m.x0;
    } else {
      panic!("unhandled instruction: {line}");
    }
  }

  panic!("program never reached the exit syscall");
}

fn eval(expr: &str) -> i64 {
  run(&generate_assembly(expr).expect("compilation failed"))
}

#[test]
fn single_literal() {
  assert_eq!(eval("0"), 0);
  assert_eq!(eval("42"), 42);
}

#[test]
fn addition_and_subtraction() {
  assert_eq!(eval("1+2"), 3);
  assert_eq!(eval("5 - 3"), 2);
  assert_eq!(eval("5+20-4"), 21);
}

#[test]
fn subtraction_associates_to_the_left() {
  assert_eq!(eval("1-2-3"), -4);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
  assert_eq!(eval("2+3*4"), 14);
  assert_eq!(eval("(2+3)*4"), 20);
}

#[test]
fn division_truncates_toward_zero() {
  assert_eq!(eval("7/2"), 3);
  assert_eq!(eval("(0-7)/2"), -3);
}

#[test]
fn comparisons_yield_zero_or_one() {
  assert_eq!(eval("1<2"), 1);
  assert_eq!(eval("2<=1"), 0);
  assert_eq!(eval("5==5"), 1);
  assert_eq!(eval("5!=5"), 0);
  assert_eq!(eval("3>2"), 1);
  assert_eq!(eval("2>=3"), 0);
}

#[test]
fn comparison_chains_fold_left() {
  // (1<2) == 1
  assert_eq!(eval("1<2==1"), 1);
}

#[test]
fn unary_operators() {
  assert_eq!(eval("-3+5"), 2);
  assert_eq!(eval("-(3+5)"), -8);
  assert_eq!(eval("+7"), 7);
  assert_eq!(eval("5*-2"), -10);
}

#[test]
fn deeply_nested_expression() {
  assert_eq!(eval("((1+2)*(3+4)-1)/2"), 10);
}

#[test]
fn whitespace_is_insignificant() {
  assert_eq!(eval("  1 +   2 *(3- 4) "), -1);
}

#[test]
fn exit_status_is_the_value_modulo_256() {
  assert_eq!(eval("1-2-3") as u8, 252);
  assert_eq!(eval("100+200") as u8, 44);
}

#[test]
fn errors_surface_from_every_stage() {
  assert!(generate_assembly("1+@").is_err());
  assert!(generate_assembly("1+").is_err());
  assert!(generate_assembly("1+*2").is_err());
  assert!(generate_assembly("1+2)").is_err());
  assert!(generate_assembly("(1+2").is_err());
  assert!(generate_assembly("").is_err());
}

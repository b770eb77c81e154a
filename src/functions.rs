use crate::ast::Expression;
use crate::evaluator::{Arguments, EvalError, EvalResult};
use crate::registry::FunctionRegistry;

/// Evaluates the first two arguments and combines them with `op`.
/// Arguments past the second are never looked at.
fn binary<F>(args: &Arguments, op: F) -> EvalResult
where
    F: Fn(i32, i32) -> Result<i32, EvalError>,
{
    args.require(2)?;
    let left = args.integer(0)?;
    let right = args.integer(1)?;
    op(left, right).map(Expression::Integer)
}

fn add(args: &Arguments) -> EvalResult {
    binary(args, |l, r| Ok(l.wrapping_add(r)))
}

fn minus(args: &Arguments) -> EvalResult {
    binary(args, |l, r| Ok(l.wrapping_sub(r)))
}

fn multiply(args: &Arguments) -> EvalResult {
    binary(args, |l, r| Ok(l.wrapping_mul(r)))
}

fn divide(args: &Arguments) -> EvalResult {
    binary(args, |l, r| {
        if r == 0 {
            Err(EvalError::DivisionByZero)
        } else {
            Ok(l.wrapping_div(r))
        }
    })
}

pub fn register_builtins(registry: &mut FunctionRegistry) {
    registry.replace("ADD", add);
    registry.replace("MINUS", minus);
    registry.replace("MULTIPLY", multiply);
    registry.replace("DIVIDE", divide);
}

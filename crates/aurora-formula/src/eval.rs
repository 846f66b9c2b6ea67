//! Formula evaluation against a row context.

use std::collections::BTreeMap;

use aurora_model::Value;

use crate::builtins;
use crate::error::{FormulaError, Result};
use crate::parse::{BinaryOp, Expr, UnaryOp, parse};

/// Evaluate a formula with column values bound from `context`.
///
/// Unknown columns evaluate to [`Value::Null`] rather than failing, so
/// formulas stay usable over sparse rows.
pub fn evaluate(formula: &str, context: &BTreeMap<String, Value>) -> Result<Value> {
    let expr = parse(formula)?;
    eval_expr(&expr, context)
}

/// Evaluate an already-parsed expression.
pub fn eval_expr(expr: &Expr, context: &BTreeMap<String, Value>) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Column(name) => Ok(context.get(name).cloned().unwrap_or(Value::Null)),
        Expr::Unary { op, operand } => {
            let value = eval_expr(operand, context)?;
            match op {
                UnaryOp::Neg => Ok(Value::Number(-builtins::as_number(&value)?)),
                UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
            }
        }
        Expr::Binary { op, left, right } => {
            let left = eval_expr(left, context)?;
            let right = eval_expr(right, context)?;
            eval_binary(*op, &left, &right)
        }
        Expr::Call { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_expr(arg, context)?);
            }
            builtins::call(name, &values)
        }
    }
}

fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinaryOp::Add => numeric(left, right, |a, b| a + b),
        BinaryOp::Sub => numeric(left, right, |a, b| a - b),
        BinaryOp::Mul => numeric(left, right, |a, b| a * b),
        BinaryOp::Div => numeric(left, right, |a, b| a / b),
        BinaryOp::Rem => numeric(left, right, |a, b| a % b),
        BinaryOp::Pow => numeric(left, right, f64::powf),
        BinaryOp::Concat => Ok(Value::Text(format!("{left}{right}"))),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::Ne => Ok(Value::Bool(left != right)),
        BinaryOp::Lt => ordering(left, right, |o| o == std::cmp::Ordering::Less),
        BinaryOp::Le => ordering(left, right, |o| o != std::cmp::Ordering::Greater),
        BinaryOp::Gt => ordering(left, right, |o| o == std::cmp::Ordering::Greater),
        BinaryOp::Ge => ordering(left, right, |o| o != std::cmp::Ordering::Less),
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

fn numeric(left: &Value, right: &Value, f: impl Fn(f64, f64) -> f64) -> Result<Value> {
    Ok(Value::Number(f(
        builtins::as_number(left)?,
        builtins::as_number(right)?,
    )))
}

fn ordering(
    left: &Value,
    right: &Value,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> Result<Value> {
    let order = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .partial_cmp(b)
            .ok_or_else(|| FormulaError::TypeMismatch("cannot compare NaN".to_string()))?,
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Date(a), Value::Date(b)) => a.cmp(b),
        (a, b) => {
            return Err(FormulaError::TypeMismatch(format!(
                "cannot order '{a}' against '{b}'"
            )));
        }
    };
    Ok(Value::Bool(accept(order)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn arithmetic_respects_precedence() {
        let empty = BTreeMap::new();
        assert_eq!(evaluate("2 + 3 * 4", &empty).unwrap(), Value::Number(14.0));
        assert_eq!(evaluate("(2 + 3) * 4", &empty).unwrap(), Value::Number(20.0));
        assert_eq!(evaluate("2 ^ 3 ^ 2", &empty).unwrap(), Value::Number(512.0));
        assert_eq!(evaluate("10 % 3", &empty).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn column_references_bind_from_context() {
        let context = ctx(&[("price", Value::Number(10.0)), ("tax", Value::Number(2.5))]);
        assert_eq!(
            evaluate("{price} + {tax}", &context).unwrap(),
            Value::Number(12.5)
        );
        // Bare identifiers resolve the same way.
        assert_eq!(
            evaluate("price * 2", &context).unwrap(),
            Value::Number(20.0)
        );
    }

    #[test]
    fn unknown_columns_are_null() {
        let empty = BTreeMap::new();
        assert_eq!(
            evaluate("ISNULL({missing})", &empty).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn comparisons_and_logic() {
        let context = ctx(&[("score", Value::Number(70.0))]);
        assert_eq!(
            evaluate("IF({score} > 50, \"pass\", \"fail\")", &context).unwrap(),
            Value::Text("pass".into())
        );
        assert_eq!(
            evaluate("{score} >= 70 && {score} < 80", &context).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(evaluate("!false || false", &context).unwrap(), Value::Bool(true));
    }

    #[test]
    fn equality_is_structural_and_cross_type_false() {
        let empty = BTreeMap::new();
        assert_eq!(evaluate("1 = 1", &empty).unwrap(), Value::Bool(true));
        assert_eq!(evaluate("\"1\" = 1", &empty).unwrap(), Value::Bool(false));
        assert_eq!(evaluate("1 <> 2", &empty).unwrap(), Value::Bool(true));
        assert_eq!(evaluate("1 != 2", &empty).unwrap(), Value::Bool(true));
    }

    #[test]
    fn concat_operator_renders_values() {
        let context = ctx(&[("name", Value::Text("Ada".into()))]);
        assert_eq!(
            evaluate("\"Hi \" & {name} & \"!\"", &context).unwrap(),
            Value::Text("Hi Ada!".into())
        );
    }

    #[test]
    fn numeric_text_coerces_in_arithmetic() {
        let context = ctx(&[("n", Value::Text("4".into()))]);
        assert_eq!(evaluate("{n} * 2", &context).unwrap(), Value::Number(8.0));
    }

    #[test]
    fn ordering_type_mismatch_errors() {
        let empty = BTreeMap::new();
        assert!(matches!(
            evaluate("\"a\" < 1", &empty).unwrap_err(),
            FormulaError::TypeMismatch(_)
        ));
    }

    #[test]
    fn nested_function_calls_evaluate() {
        let context = ctx(&[("first", Value::Text("ada".into()))]);
        assert_eq!(
            evaluate("UPPER(CONCAT({first}, \"!\"))", &context).unwrap(),
            Value::Text("ADA!".into())
        );
    }
}

//! Built-in function implementations for the evaluator.

use aurora_model::Value;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};

use crate::error::{FormulaError, Result};

/// Apply a built-in function to already-evaluated arguments.
///
/// `name` is matched case-insensitively against the registry names.
pub fn call(name: &str, args: &[Value]) -> Result<Value> {
    let upper = name.to_ascii_uppercase();
    match upper.as_str() {
        // Math
        "ABS" => unary_math(&upper, args, f64::abs),
        "CEIL" => unary_math(&upper, args, f64::ceil),
        "FLOOR" => unary_math(&upper, args, f64::floor),
        "ROUND" => unary_math(&upper, args, f64::round),
        "SQRT" => unary_math(&upper, args, f64::sqrt),
        "POW" => {
            let [base, exp] = exact::<2>(&upper, args)?;
            Ok(Value::Number(as_number(base)?.powf(as_number(exp)?)))
        }
        "MIN" => fold_math(&upper, args, |acc, n| acc.min(n)),
        "MAX" => fold_math(&upper, args, |acc, n| acc.max(n)),
        "SUM" => {
            let numbers = numbers(&upper, args)?;
            Ok(Value::Number(numbers.iter().sum()))
        }
        "AVG" => {
            let numbers = numbers(&upper, args)?;
            Ok(Value::Number(numbers.iter().sum::<f64>() / numbers.len() as f64))
        }
        "COUNT" => Ok(Value::Number(
            args.iter().filter(|v| !v.is_null()).count() as f64,
        )),
        // String
        "UPPER" => {
            let [v] = exact::<1>(&upper, args)?;
            Ok(Value::Text(v.to_string().to_uppercase()))
        }
        "LOWER" => {
            let [v] = exact::<1>(&upper, args)?;
            Ok(Value::Text(v.to_string().to_lowercase()))
        }
        "TRIM" => {
            let [v] = exact::<1>(&upper, args)?;
            Ok(Value::Text(v.to_string().trim().to_string()))
        }
        "CONCAT" => Ok(Value::Text(
            args.iter().map(ToString::to_string).collect::<String>(),
        )),
        "SUBSTRING" => substring(&upper, args),
        "REPLACE" => {
            let [text, search, replacement] = exact::<3>(&upper, args)?;
            Ok(Value::Text(text.to_string().replace(
                &search.to_string(),
                &replacement.to_string(),
            )))
        }
        "LENGTH" => {
            let [v] = exact::<1>(&upper, args)?;
            Ok(Value::Number(v.to_string().chars().count() as f64))
        }
        // Date
        "NOW" => {
            exact::<0>(&upper, args)?;
            Ok(Value::Date(Utc::now()))
        }
        "TODAY" => {
            exact::<0>(&upper, args)?;
            Ok(Value::Date(midnight(Utc::now())))
        }
        "YEAR" => date_component(&upper, args, |d| f64::from(d.year())),
        "MONTH" => date_component(&upper, args, |d| f64::from(d.month())),
        "DAY" => date_component(&upper, args, |d| f64::from(d.day())),
        "HOUR" => date_component(&upper, args, |d| f64::from(d.hour())),
        "MINUTE" => date_component(&upper, args, |d| f64::from(d.minute())),
        "DATEADD" => {
            let [date, days] = exact::<2>(&upper, args)?;
            let date = as_date(date)?;
            let days = as_number(days)? as i64;
            Ok(Value::Date(date + Duration::days(days)))
        }
        "DATEDIFF" => {
            let [a, b] = exact::<2>(&upper, args)?;
            let seconds = (as_date(a)? - as_date(b)?).num_seconds();
            Ok(Value::Number((seconds as f64 / 86_400.0).floor()))
        }
        "FORMATDATE" => {
            let [date, format] = exact::<2>(&upper, args)?;
            Ok(Value::Text(format_date(as_date(date)?, &format.to_string())))
        }
        // Logic
        "IF" => {
            let [cond, if_true, if_false] = exact::<3>(&upper, args)?;
            Ok(if cond.is_truthy() {
                if_true.clone()
            } else {
                if_false.clone()
            })
        }
        "AND" => Ok(Value::Bool(args.iter().all(Value::is_truthy))),
        "OR" => Ok(Value::Bool(args.iter().any(Value::is_truthy))),
        "NOT" => {
            let [v] = exact::<1>(&upper, args)?;
            Ok(Value::Bool(!v.is_truthy()))
        }
        "ISNULL" => {
            let [v] = exact::<1>(&upper, args)?;
            Ok(Value::Bool(v.is_null()))
        }
        "ISEMPTY" => {
            let [v] = exact::<1>(&upper, args)?;
            let empty = match v {
                Value::Null => true,
                Value::Text(s) => s.is_empty(),
                _ => false,
            };
            Ok(Value::Bool(empty))
        }
        _ => Err(FormulaError::UnknownFunction(name.to_string())),
    }
}

/// Coerce a value to a number: numbers pass through, booleans map to
/// 0/1, numeric text parses.
pub fn as_number(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| FormulaError::TypeMismatch(format!("'{s}' is not a number"))),
        Value::Date(_) => Err(FormulaError::TypeMismatch(
            "expected a number, got a date".to_string(),
        )),
        Value::Null => Err(FormulaError::TypeMismatch(
            "expected a number, got null".to_string(),
        )),
    }
}

/// Coerce a value to a date: dates pass through, text parses from
/// RFC 3339, `YYYY-MM-DD[ HH:MM:SS]`, or `MM/DD/YYYY`.
pub fn as_date(value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::Date(d) => Ok(*d),
        Value::Text(s) => parse_date(s.trim())
            .ok_or_else(|| FormulaError::TypeMismatch(format!("'{s}' is not a date"))),
        other => Err(FormulaError::TypeMismatch(format!(
            "'{other}' is not a date"
        ))),
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&parsed));
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&parsed.and_time(NaiveTime::MIN)));
        }
    }
    None
}

fn midnight(moment: DateTime<Utc>) -> DateTime<Utc> {
    Utc.from_utc_datetime(&moment.date_naive().and_time(NaiveTime::MIN))
}

/// Substitute each `YYYY`/`MM`/`DD`/`HH`/`mm`/`ss` token once.
fn format_date(date: DateTime<Utc>, format: &str) -> String {
    let pairs = [
        ("YYYY", format!("{:04}", date.year())),
        ("MM", format!("{:02}", date.month())),
        ("DD", format!("{:02}", date.day())),
        ("HH", format!("{:02}", date.hour())),
        ("mm", format!("{:02}", date.minute())),
        ("ss", format!("{:02}", date.second())),
    ];
    let mut out = format.to_string();
    for (token, value) in pairs {
        out = out.replacen(token, &value, 1);
    }
    out
}

fn exact<'a, const N: usize>(name: &str, args: &'a [Value]) -> Result<&'a [Value; N]> {
    args.try_into().map_err(|_| FormulaError::Arity {
        function: name.to_string(),
        expected: arity_label(N),
        got: args.len(),
    })
}

fn arity_label(n: usize) -> &'static str {
    match n {
        0 => "0",
        1 => "1",
        2 => "2",
        3 => "3",
        _ => "several",
    }
}

fn unary_math(name: &str, args: &[Value], f: impl Fn(f64) -> f64) -> Result<Value> {
    let [v] = exact::<1>(name, args)?;
    Ok(Value::Number(f(as_number(v)?)))
}

fn date_component(name: &str, args: &[Value], f: impl Fn(DateTime<Utc>) -> f64) -> Result<Value> {
    let [v] = exact::<1>(name, args)?;
    Ok(Value::Number(f(as_date(v)?)))
}

fn numbers(name: &str, args: &[Value]) -> Result<Vec<f64>> {
    if args.is_empty() {
        return Err(FormulaError::Arity {
            function: name.to_string(),
            expected: "at least 1",
            got: 0,
        });
    }
    args.iter().map(as_number).collect()
}

fn fold_math(name: &str, args: &[Value], f: impl Fn(f64, f64) -> f64) -> Result<Value> {
    let numbers = numbers(name, args)?;
    let mut acc = numbers[0];
    for n in &numbers[1..] {
        acc = f(acc, *n);
    }
    Ok(Value::Number(acc))
}

/// `SUBSTRING(text, start[, end])` over characters, clamped and swapped
/// when out of order.
fn substring(name: &str, args: &[Value]) -> Result<Value> {
    if args.len() != 2 && args.len() != 3 {
        return Err(FormulaError::Arity {
            function: name.to_string(),
            expected: "2 or 3",
            got: args.len(),
        });
    }
    let chars: Vec<char> = args[0].to_string().chars().collect();
    let clamp = |v: f64| -> usize {
        if v.is_nan() || v < 0.0 {
            0
        } else {
            (v as usize).min(chars.len())
        }
    };
    let mut start = clamp(as_number(&args[1])?);
    let mut end = match args.get(2) {
        Some(v) => clamp(as_number(v)?),
        None => chars.len(),
    };
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }
    Ok(Value::Text(chars[start..end].iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn math_builtins() {
        assert_eq!(call("abs", &[num(-5.0)]).unwrap(), num(5.0));
        assert_eq!(call("CEIL", &[num(4.3)]).unwrap(), num(5.0));
        assert_eq!(call("min", &[num(3.0), num(1.0), num(2.0)]).unwrap(), num(1.0));
        assert_eq!(call("sum", &[num(1.0), num(2.0), num(3.0)]).unwrap(), num(6.0));
        assert_eq!(call("avg", &[num(1.0), num(2.0), num(3.0)]).unwrap(), num(2.0));
        assert_eq!(call("pow", &[num(2.0), num(3.0)]).unwrap(), num(8.0));
    }

    #[test]
    fn count_ignores_nulls() {
        let got = call("count", &[num(1.0), Value::Null, text("x")]).unwrap();
        assert_eq!(got, num(2.0));
    }

    #[test]
    fn string_builtins() {
        assert_eq!(call("upper", &[text("hi")]).unwrap(), text("HI"));
        assert_eq!(call("trim", &[text("  hi  ")]).unwrap(), text("hi"));
        assert_eq!(
            call("concat", &[text("a"), num(1.0), text("b")]).unwrap(),
            text("a1b")
        );
        assert_eq!(
            call("replace", &[text("hello"), text("l"), text("r")]).unwrap(),
            text("herro")
        );
        assert_eq!(call("length", &[text("hello")]).unwrap(), num(5.0));
    }

    #[test]
    fn substring_clamps_and_swaps() {
        assert_eq!(
            call("substring", &[text("hello"), num(1.0), num(3.0)]).unwrap(),
            text("el")
        );
        assert_eq!(
            call("substring", &[text("hello"), num(3.0), num(1.0)]).unwrap(),
            text("el")
        );
        assert_eq!(
            call("substring", &[text("hello"), num(2.0)]).unwrap(),
            text("llo")
        );
        assert_eq!(
            call("substring", &[text("hello"), num(-4.0), num(99.0)]).unwrap(),
            text("hello")
        );
    }

    #[test]
    fn date_components_from_text() {
        assert_eq!(call("year", &[text("2024-03-15")]).unwrap(), num(2024.0));
        assert_eq!(call("month", &[text("2024-03-15")]).unwrap(), num(3.0));
        assert_eq!(call("day", &[text("03/15/2024")]).unwrap(), num(15.0));
    }

    #[test]
    fn dateadd_and_datediff() {
        let added = call("dateadd", &[text("2024-01-01"), num(30.0)]).unwrap();
        assert_eq!(call("day", &[added.clone()]).unwrap(), num(31.0));
        assert_eq!(call("month", &[added]).unwrap(), num(1.0));

        let diff = call("datediff", &[text("2024-01-08"), text("2024-01-01")]).unwrap();
        assert_eq!(diff, num(7.0));
        // Partial days floor toward negative infinity.
        let diff = call(
            "datediff",
            &[text("2024-01-01"), text("2024-01-02 06:00:00")],
        )
        .unwrap();
        assert_eq!(diff, num(-2.0));
    }

    #[test]
    fn formatdate_substitutes_tokens() {
        let got = call(
            "formatdate",
            &[text("2024-03-05 07:08:09"), text("YYYY-MM-DD HH:mm:ss")],
        )
        .unwrap();
        assert_eq!(got, text("2024-03-05 07:08:09"));
    }

    #[test]
    fn logic_builtins() {
        assert_eq!(
            call("if", &[Value::Bool(true), num(1.0), num(2.0)]).unwrap(),
            num(1.0)
        );
        assert_eq!(
            call("and", &[Value::Bool(true), num(0.0)]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(
            call("or", &[Value::Bool(false), text("x")]).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(call("isnull", &[Value::Null]).unwrap(), Value::Bool(true));
        assert_eq!(call("isempty", &[text("")]).unwrap(), Value::Bool(true));
        assert_eq!(call("isempty", &[num(0.0)]).unwrap(), Value::Bool(false));
    }

    #[test]
    fn unknown_function_errors() {
        assert_eq!(
            call("median", &[num(1.0)]).unwrap_err(),
            FormulaError::UnknownFunction("median".to_string())
        );
    }

    #[test]
    fn arity_errors_name_the_function() {
        let err = call("pow", &[num(2.0)]).unwrap_err();
        assert!(matches!(err, FormulaError::Arity { ref function, .. } if function == "POW"));
    }
}

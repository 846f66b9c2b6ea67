//! Built-in function registry.
//!
//! Process-wide constant metadata for every formula function: the
//! lexer consults the name set, the autocomplete and the function
//! browser consume the full records.

use std::fmt;

use serde::Serialize;

/// Category of a built-in function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionCategory {
    Math,
    String,
    Date,
    Logic,
}

impl FunctionCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::String => "string",
            Self::Date => "date",
            Self::Logic => "logic",
        }
    }
}

impl fmt::Display for FunctionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata about a built-in function, for tooltips and docs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionInfo {
    /// Canonical uppercase name.
    pub name: &'static str,
    /// Function category.
    pub category: FunctionCategory,
    /// One-line description.
    pub description: &'static str,
    /// Usage examples.
    pub examples: &'static [&'static str],
}

/// All built-in functions, grouped by category.
pub const FUNCTIONS: &[FunctionInfo] = &[
    // Math
    FunctionInfo {
        name: "ABS",
        category: FunctionCategory::Math,
        description: "Absolute value of a number",
        examples: &["ABS(-5)", "ABS({amount})"],
    },
    FunctionInfo {
        name: "CEIL",
        category: FunctionCategory::Math,
        description: "Round up to the nearest integer",
        examples: &["CEIL(4.3)", "CEIL({price})"],
    },
    FunctionInfo {
        name: "FLOOR",
        category: FunctionCategory::Math,
        description: "Round down to the nearest integer",
        examples: &["FLOOR(4.7)", "FLOOR({price})"],
    },
    FunctionInfo {
        name: "ROUND",
        category: FunctionCategory::Math,
        description: "Round to the nearest integer",
        examples: &["ROUND(4.5)", "ROUND({price})"],
    },
    FunctionInfo {
        name: "SQRT",
        category: FunctionCategory::Math,
        description: "Square root",
        examples: &["SQRT(16)", "SQRT({value})"],
    },
    FunctionInfo {
        name: "POW",
        category: FunctionCategory::Math,
        description: "Raise a number to a power",
        examples: &["POW(2, 3)", "POW({base}, {exp})"],
    },
    FunctionInfo {
        name: "MIN",
        category: FunctionCategory::Math,
        description: "Smallest of the arguments",
        examples: &["MIN(1, 5, 3)", "MIN({a}, {b})"],
    },
    FunctionInfo {
        name: "MAX",
        category: FunctionCategory::Math,
        description: "Largest of the arguments",
        examples: &["MAX(1, 5, 3)", "MAX({a}, {b})"],
    },
    FunctionInfo {
        name: "SUM",
        category: FunctionCategory::Math,
        description: "Sum of the arguments",
        examples: &["SUM(1, 2, 3)", "SUM({price}, {tax})"],
    },
    FunctionInfo {
        name: "AVG",
        category: FunctionCategory::Math,
        description: "Arithmetic mean of the arguments",
        examples: &["AVG(1, 2, 3)", "AVG({scores})"],
    },
    FunctionInfo {
        name: "COUNT",
        category: FunctionCategory::Math,
        description: "Number of non-null arguments",
        examples: &["COUNT({a}, {b}, {c})"],
    },
    // String
    FunctionInfo {
        name: "UPPER",
        category: FunctionCategory::String,
        description: "Convert to upper case",
        examples: &["UPPER(\"hello\")", "UPPER({name})"],
    },
    FunctionInfo {
        name: "LOWER",
        category: FunctionCategory::String,
        description: "Convert to lower case",
        examples: &["LOWER(\"HELLO\")", "LOWER({name})"],
    },
    FunctionInfo {
        name: "TRIM",
        category: FunctionCategory::String,
        description: "Strip leading and trailing whitespace",
        examples: &["TRIM(\"  hello  \")", "TRIM({text})"],
    },
    FunctionInfo {
        name: "CONCAT",
        category: FunctionCategory::String,
        description: "Join values into one string",
        examples: &["CONCAT(\"a\", \"b\")", "CONCAT({first}, {last})"],
    },
    FunctionInfo {
        name: "SUBSTRING",
        category: FunctionCategory::String,
        description: "Extract part of a string",
        examples: &["SUBSTRING(\"hello\", 1, 3)", "SUBSTRING({text}, 0, 5)"],
    },
    FunctionInfo {
        name: "REPLACE",
        category: FunctionCategory::String,
        description: "Replace every occurrence of a substring",
        examples: &["REPLACE(\"hello\", \"l\", \"r\")", "REPLACE({text}, \"old\", \"new\")"],
    },
    FunctionInfo {
        name: "LENGTH",
        category: FunctionCategory::String,
        description: "Number of characters in a string",
        examples: &["LENGTH(\"hello\")", "LENGTH({text})"],
    },
    // Date
    FunctionInfo {
        name: "NOW",
        category: FunctionCategory::Date,
        description: "Current date and time",
        examples: &["NOW()"],
    },
    FunctionInfo {
        name: "TODAY",
        category: FunctionCategory::Date,
        description: "Today's date at midnight",
        examples: &["TODAY()"],
    },
    FunctionInfo {
        name: "YEAR",
        category: FunctionCategory::Date,
        description: "Year component of a date",
        examples: &["YEAR({date})", "YEAR(TODAY())"],
    },
    FunctionInfo {
        name: "MONTH",
        category: FunctionCategory::Date,
        description: "Month component of a date (1-12)",
        examples: &["MONTH({date})", "MONTH(TODAY())"],
    },
    FunctionInfo {
        name: "DAY",
        category: FunctionCategory::Date,
        description: "Day-of-month component of a date",
        examples: &["DAY({date})", "DAY(TODAY())"],
    },
    FunctionInfo {
        name: "HOUR",
        category: FunctionCategory::Date,
        description: "Hour component of a date-time",
        examples: &["HOUR({updated_at})"],
    },
    FunctionInfo {
        name: "MINUTE",
        category: FunctionCategory::Date,
        description: "Minute component of a date-time",
        examples: &["MINUTE({updated_at})"],
    },
    FunctionInfo {
        name: "DATEADD",
        category: FunctionCategory::Date,
        description: "Add days to a date",
        examples: &["DATEADD(TODAY(), 7)", "DATEADD({due_date}, 30)"],
    },
    FunctionInfo {
        name: "DATEDIFF",
        category: FunctionCategory::Date,
        description: "Whole days between two dates",
        examples: &["DATEDIFF({due_date}, TODAY())"],
    },
    FunctionInfo {
        name: "FORMATDATE",
        category: FunctionCategory::Date,
        description: "Format a date with YYYY/MM/DD/HH/mm/ss tokens",
        examples: &["FORMATDATE({date}, \"YYYY-MM-DD\")"],
    },
    // Logic
    FunctionInfo {
        name: "IF",
        category: FunctionCategory::Logic,
        description: "Pick one of two values by condition",
        examples: &["IF({score} > 50, \"pass\", \"fail\")"],
    },
    FunctionInfo {
        name: "AND",
        category: FunctionCategory::Logic,
        description: "True when every argument is truthy",
        examples: &["AND({active}, {verified})"],
    },
    FunctionInfo {
        name: "OR",
        category: FunctionCategory::Logic,
        description: "True when any argument is truthy",
        examples: &["OR({a} > 0, {b} > 0)"],
    },
    FunctionInfo {
        name: "NOT",
        category: FunctionCategory::Logic,
        description: "Invert a condition",
        examples: &["NOT({active})"],
    },
    FunctionInfo {
        name: "ISNULL",
        category: FunctionCategory::Logic,
        description: "True when the value is null",
        examples: &["ISNULL({field})", "IF(ISNULL({value}), 0, {value})"],
    },
    FunctionInfo {
        name: "ISEMPTY",
        category: FunctionCategory::Logic,
        description: "True when the value is null or empty",
        examples: &["ISEMPTY({name})", "IF(ISEMPTY({name}), \"N/A\", {name})"],
    },
];

/// True when the lowercased identifier names a built-in function.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    FUNCTIONS.iter().any(|f| f.name.eq_ignore_ascii_case(name))
}

/// Case-insensitive registry lookup. Returns `None` for unknown names.
#[must_use]
pub fn function_info(name: &str) -> Option<&'static FunctionInfo> {
    FUNCTIONS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

/// All functions in a category, registry order.
#[must_use]
pub fn functions_in_category(category: FunctionCategory) -> Vec<&'static FunctionInfo> {
    FUNCTIONS.iter().filter(|f| f.category == category).collect()
}

//! Formula toolchain: lexing for syntax highlighting, autocomplete
//! suggestions, the built-in function registry, and evaluation.
//!
//! Everything here is a pure function over its inputs; there is no
//! I/O and no shared mutable state. Callers recompute wholesale on
//! every input change rather than patching previous results.

pub mod builtins;
pub mod error;
pub mod eval;
pub mod functions;
pub mod highlight;
pub mod lexer;
pub mod parse;
pub mod suggest;
pub mod validate;

pub use error::FormulaError;
pub use eval::evaluate;
pub use functions::{FUNCTIONS, FunctionCategory, FunctionInfo, function_info, is_builtin};
pub use highlight::{highlight, token_color};
pub use lexer::tokenize;
pub use suggest::suggestions;
pub use validate::{ValidationReport, extract_column_references, infer_result_type, validate};

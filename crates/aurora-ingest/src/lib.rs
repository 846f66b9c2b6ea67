//! CSV ingest for imports: parsing, column profiling, type inference,
//! and projection through an accepted column mapping.

pub mod apply;
pub mod csv_table;
pub mod inference;

pub use apply::apply_mapping;
pub use csv_table::CsvTable;
pub use inference::{infer_column_type, suggest_schema};

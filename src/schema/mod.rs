pub mod arrow;
pub mod columns;

pub use arrow::{build_arrow_schema, map_to_arrow_type};
pub use columns::{headers, is_header_label, Column, ColumnKind, COLUMN_COUNT};

// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use std::sync::Arc;

use super::columns::{Column, ColumnKind};

/// Map a column kind onto the Arrow type used in columnar exports.
///
/// - Text     → Utf8
/// - Real     → Float64
/// - Integer  → Int64
/// - Category → Int8 (0/1)
/// - Flag     → Boolean
pub fn map_to_arrow_type(kind: ColumnKind) -> DataType {
    match kind {
        ColumnKind::Text => DataType::Utf8,
        ColumnKind::Real => DataType::Float64,
        ColumnKind::Integer => DataType::Int64,
        ColumnKind::Category => DataType::Int8,
        ColumnKind::Flag => DataType::Boolean,
    }
}

/// Build the dataset's ArrowSchema; field names are the header labels.
pub fn build_arrow_schema() -> Arc<ArrowSchema> {
    let fields: Vec<ArrowField> = Column::ALL
        .iter()
        .map(|col| ArrowField::new(col.header(), map_to_arrow_type(col.kind()), false))
        .collect();

    Arc::new(ArrowSchema::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_follows_column_contract() {
        let schema = build_arrow_schema();
        assert_eq!(schema.fields().len(), 25);
        assert_eq!(schema.field(0).name(), "Name");
        assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
        assert_eq!(schema.field(2).data_type(), &DataType::Int64);
        assert_eq!(schema.field(4).data_type(), &DataType::Int8);
        assert_eq!(schema.field(20).data_type(), &DataType::Boolean);
        assert_eq!(schema.field(24).name(), "CSS");
        assert_eq!(schema.field(24).data_type(), &DataType::Float64);
    }
}

// src/schema/columns.rs

/// Number of columns in every dataset row.
pub const COLUMN_COUNT: usize = 25;

/// How a column's cells are typed once parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Opaque passthrough string.
    Text,
    /// Real number (fractions, currency, measurements, derived scores).
    Real,
    /// Whole number (units, MTBF hours, round).
    Integer,
    /// Binary category stored as 0/1 (stock-out, segment).
    Category,
    /// Out-of-range flag stored as 0/1.
    Flag,
}

/// The fixed column contract, in output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Name,
    MarketShare,
    UnitsSold,
    LastRevisionDate,
    StockOut,
    Pfmn,
    Size,
    PositionDifference,
    Price,
    PriceDifference,
    Mtbf,
    MtbfDifference,
    Age,
    AgeDifference,
    PromoBudget,
    CustomerAwareness,
    SalesBudget,
    CustomerAccessibility,
    Segment,
    Round,
    PositionOutOfRange,
    PriceOutOfRange,
    MtbfOutOfRange,
    AgeOutOfRange,
    Css,
}

impl Column {
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Name,
        Column::MarketShare,
        Column::UnitsSold,
        Column::LastRevisionDate,
        Column::StockOut,
        Column::Pfmn,
        Column::Size,
        Column::PositionDifference,
        Column::Price,
        Column::PriceDifference,
        Column::Mtbf,
        Column::MtbfDifference,
        Column::Age,
        Column::AgeDifference,
        Column::PromoBudget,
        Column::CustomerAwareness,
        Column::SalesBudget,
        Column::CustomerAccessibility,
        Column::Segment,
        Column::Round,
        Column::PositionOutOfRange,
        Column::PriceOutOfRange,
        Column::MtbfOutOfRange,
        Column::AgeOutOfRange,
        Column::Css,
    ];

    /// Header label as written in the first row of an exported table.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::MarketShare => "Market Share",
            Column::UnitsSold => "Units Sold",
            Column::LastRevisionDate => "Last Revision Date",
            Column::StockOut => "Stock Out",
            Column::Pfmn => "Pfmn",
            Column::Size => "Size",
            Column::PositionDifference => "Position Difference",
            Column::Price => "Price",
            Column::PriceDifference => "Price Difference",
            Column::Mtbf => "MTBF",
            Column::MtbfDifference => "MTBF Difference",
            Column::Age => "Age",
            Column::AgeDifference => "Age Difference",
            Column::PromoBudget => "Promo Budget",
            Column::CustomerAwareness => "Customer Awareness",
            Column::SalesBudget => "Sales Budget",
            Column::CustomerAccessibility => "Customer Accessibility",
            Column::Segment => "Segment",
            Column::Round => "Round",
            Column::PositionOutOfRange => "Position Out of Range",
            Column::PriceOutOfRange => "Price Out of Range",
            Column::MtbfOutOfRange => "MTBF Out of Range",
            Column::AgeOutOfRange => "Age Out of Range",
            Column::Css => "CSS",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Name | Column::LastRevisionDate => ColumnKind::Text,
            Column::UnitsSold | Column::Mtbf | Column::Round => ColumnKind::Integer,
            Column::StockOut | Column::Segment => ColumnKind::Category,
            Column::PositionOutOfRange
            | Column::PriceOutOfRange
            | Column::MtbfOutOfRange
            | Column::AgeOutOfRange => ColumnKind::Flag,
            _ => ColumnKind::Real,
        }
    }

    /// Zero-based position in a row.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_header(label: &str) -> Option<Column> {
        Column::ALL.iter().copied().find(|c| c.header() == label)
    }
}

/// All header labels in column order.
pub fn headers() -> [&'static str; COLUMN_COUNT] {
    Column::ALL.map(|c| c.header())
}

/// True when `cell` is one of the known header labels.
pub fn is_header_label(cell: &str) -> bool {
    Column::from_header(cell).is_some()
}

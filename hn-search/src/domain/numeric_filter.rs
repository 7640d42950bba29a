/// Numeric attributes the search API accepts comparisons on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    CreatedAt,
    Points,
    NumComments,
}

impl NumericField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericField::CreatedAt => "created_at_i",
            NumericField::Points => "points",
            NumericField::NumComments => "num_comments",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Less,
    LessOrEqual,
    Equal,
    Greater,
    GreaterOrEqual,
}

impl CompareOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompareOp::Less => "<",
            CompareOp::LessOrEqual => "<=",
            CompareOp::Equal => "=",
            CompareOp::Greater => ">",
            CompareOp::GreaterOrEqual => ">=",
        }
    }
}

/// One typed comparison restricting results by a numeric attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericFilter {
    pub field: NumericField,
    pub op: CompareOp,
    pub value: i64,
}

impl NumericFilter {
    pub fn new(field: NumericField, op: CompareOp, value: i64) -> Self {
        Self { field, op, value }
    }

    /// `field<op><value>`, no spaces, e.g. `points>=100`.
    pub fn as_filter(&self) -> String {
        format!("{}{}{}", self.field.as_str(), self.op.as_str(), self.value)
    }
}

/// Comma-joins filters, which the API combines with AND.
pub(crate) fn join_numeric_filters(filters: &[NumericFilter]) -> String {
    filters
        .iter()
        .map(NumericFilter::as_filter)
        .collect::<Vec<_>>()
        .join(",")
}

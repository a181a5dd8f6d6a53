use serde::Serialize;

/// Numeric kind a cell is decoded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Int32,
    Int64,
    Float64,
}

impl FieldKind {
    /// Size in bytes of the store's native big-endian encoding.
    pub const fn width(self) -> usize {
        match self {
            FieldKind::Int32 => 4,
            FieldKind::Int64 | FieldKind::Float64 => 8,
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Int32 => f.write_str("int32"),
            FieldKind::Int64 => f.write_str("int64"),
            FieldKind::Float64 => f.write_str("float64"),
        }
    }
}

/// A column of the quake table: `family:qualifier` plus the kind it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub family: &'static str,
    pub qualifier: &'static str,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(
        name: &'static str,
        family: &'static str,
        qualifier: &'static str,
        kind: FieldKind,
    ) -> Self {
        Self { name, family, qualifier, kind }
    }
}

impl std::fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.family, self.qualifier)
    }
}

/// Column family holding the per-month statistics.
pub const STATS_FAMILY: &str = "s";

pub const QUAKE_COUNT: FieldDescriptor =
    FieldDescriptor::new("quake_count", STATS_FAMILY, "quake_count", FieldKind::Int64);
pub const MAX_MAG: FieldDescriptor =
    FieldDescriptor::new("max_mag", STATS_FAMILY, "max_mag", FieldKind::Float64);
pub const LABEL_QUAKE_GE4: FieldDescriptor =
    FieldDescriptor::new("label_quake_ge4", STATS_FAMILY, "label_quake_ge_4", FieldKind::Int32);
pub const PRED_PROB_GE4: FieldDescriptor =
    FieldDescriptor::new("pred_prob_ge4", STATS_FAMILY, "pred_prob_ge_4", FieldKind::Float64);

/// Every field a lookup decodes, in record order.
pub const FIELDS: [FieldDescriptor; 4] = [QUAKE_COUNT, MAX_MAG, LABEL_QUAKE_GE4, PRED_PROB_GE4];

/// A decoded cell whose kind is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int32(i32),
    Int64(i64),
    Float64(f64),
}

impl ScalarValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            ScalarValue::Int32(_) => FieldKind::Int32,
            ScalarValue::Int64(_) => FieldKind::Int64,
            ScalarValue::Float64(_) => FieldKind::Float64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_native_encodings() {
        assert_eq!(FieldKind::Int32.width(), std::mem::size_of::<i32>());
        assert_eq!(FieldKind::Int64.width(), std::mem::size_of::<i64>());
        assert_eq!(FieldKind::Float64.width(), std::mem::size_of::<f64>());
    }

    #[test]
    fn descriptors_render_as_columns() {
        assert_eq!(LABEL_QUAKE_GE4.to_string(), "s:label_quake_ge_4");
        assert!(FIELDS.iter().all(|f| f.family == STATS_FAMILY));
    }
}

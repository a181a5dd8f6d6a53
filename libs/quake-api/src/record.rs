use serde::Serialize;

use crate::decode::decode;
use crate::field::{LABEL_QUAKE_GE4, MAX_MAG, PRED_PROB_GE4, QUAKE_COUNT};
use crate::query::LookupQuery;
use crate::row::RowCells;

/// Monthly quake statistics for one region, as decoded from a single row.
///
/// Built once by [`assemble`]; read-only afterwards. A field whose cell was
/// missing or unreadable holds zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeRecord {
    region: String,
    year: i32,
    month: u32,
    quake_count: i64,
    max_mag: f64,
    label_quake_ge4: i32,
    pred_prob_ge4: f64,
}

impl QuakeRecord {
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn quake_count(&self) -> i64 {
        self.quake_count
    }

    pub fn max_mag(&self) -> f64 {
        self.max_mag
    }

    /// 1 when a magnitude ≥ 4 quake occurred that month.
    pub fn label_quake_ge4(&self) -> i32 {
        self.label_quake_ge4
    }

    /// Predicted probability of a magnitude ≥ 4 quake.
    pub fn pred_prob_ge4(&self) -> f64 {
        self.pred_prob_ge4
    }
}

/// Result of a point lookup. `NotFound` is an ordinary answer, not an error,
/// and is distinct from a found row whose cells are all missing.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    NotFound,
    Found(QuakeRecord),
}

impl LookupOutcome {
    pub fn record(&self) -> Option<&QuakeRecord> {
        match self {
            LookupOutcome::Found(r) => Some(r),
            LookupOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Turn a fetched row (or its absence) into a lookup outcome.
///
/// Once the row exists this cannot fail: each field decodes on its own and
/// degrades to zero independently.
pub fn assemble(query: &LookupQuery, row: Option<&RowCells>) -> LookupOutcome {
    let Some(cells) = row else {
        return LookupOutcome::NotFound;
    };
    LookupOutcome::Found(QuakeRecord {
        region: query.region().to_owned(),
        year: query.year(),
        month: query.month(),
        quake_count: decode(cells.field(&QUAKE_COUNT)),
        max_mag: decode(cells.field(&MAX_MAG)),
        label_quake_ge4: decode(cells.field(&LABEL_QUAKE_GE4)),
        pred_prob_ge4: decode(cells.field(&PRED_PROB_GE4)),
    })
}

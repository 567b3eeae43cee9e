use serde::{Deserialize, Serialize};

/// Raw per-patient aggregates as returned by the store. Sums over zero rows
/// come back as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct SubmissionCounts {
    pub oasmnr_count: Option<i64>,
    pub sasba_count: Option<i64>,
    pub abs_count: Option<i64>,
    pub abc_count: Option<i64>,
}

/// Aggregate tags surfaced next to a summary. Only nonzero counts are
/// present; the serialized form omits the rest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTags {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub oasmnr_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sasba_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub abs_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub abc_count: Option<i64>,
}

impl AggregateTags {
    pub fn is_empty(&self) -> bool {
        self.oasmnr_count.is_none()
            && self.sasba_count.is_none()
            && self.abs_count.is_none()
            && self.abc_count.is_none()
    }
}

impl From<SubmissionCounts> for AggregateTags {
    fn from(counts: SubmissionCounts) -> Self {
        fn nonzero(value: Option<i64>) -> Option<i64> {
            value.filter(|v| *v != 0)
        }

        AggregateTags {
            oasmnr_count: nonzero(counts.oasmnr_count),
            sasba_count: nonzero(counts.sasba_count),
            abs_count: nonzero(counts.abs_count),
            abc_count: nonzero(counts.abc_count),
        }
    }
}

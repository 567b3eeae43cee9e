use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    Active,
    Discharged,
    Deleted,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Active => "ACTIVE",
            PatientStatus::Discharged => "DISCHARGED",
            PatientStatus::Deleted => "DELETED",
        }
    }

    /// Whether a summary may be produced for a patient in this state.
    pub fn is_visible(&self) -> bool {
        !matches!(self, PatientStatus::Deleted)
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(PatientStatus::Active),
            "DISCHARGED" => Ok(PatientStatus::Discharged),
            "DELETED" => Ok(PatientStatus::Deleted),
            other => Err(format!("unknown patient status: {other}")),
        }
    }
}

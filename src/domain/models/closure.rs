use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Creator tag on materializer-generated closures. Only closures carrying it
/// participate in the remove-equals-exceptional-opening semantics.
pub const AUTO_CLOSURE_CREATOR: &str = "system-auto";

/// The closed vocabulary of closure scopes. MORNING and AFTERNOON split the
/// day at the fixed 14:00 boundary regardless of a barber's actual windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClosureType {
    Full,
    Morning,
    Afternoon,
}

impl ClosureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosureType::Full => "FULL",
            ClosureType::Morning => "MORNING",
            ClosureType::Afternoon => "AFTERNOON",
        }
    }
}

impl fmt::Display for ClosureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClosureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FULL" => Ok(ClosureType::Full),
            "MORNING" => Ok(ClosureType::Morning),
            "AFTERNOON" => Ok(ClosureType::Afternoon),
            other => Err(format!("unknown closure type: {}", other)),
        }
    }
}

/// Weekly standing rule: the barber is closed (fully or for one half of the
/// day) on every future date falling on `weekday` (0 = Monday .. 6 = Sunday).
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RecurringClosure {
    pub id: String,
    pub barber_id: String,
    pub weekday: i32,
    pub closure_type: String,
    pub created_at: DateTime<Utc>,
}

impl RecurringClosure {
    pub fn new(barber_id: String, weekday: i32, closure_type: ClosureType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            barber_id,
            weekday,
            closure_type: closure_type.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> ClosureType {
        self.closure_type.parse().unwrap_or(ClosureType::Full)
    }
}

/// Exact-date closure. Takes precedence over any recurring rule for that
/// date. `created_by` distinguishes barber/admin closures from the
/// materializer's automatic ones.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SpecificClosure {
    pub id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub closure_type: String,
    pub reason: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl SpecificClosure {
    pub fn new(
        barber_id: String,
        date: NaiveDate,
        closure_type: ClosureType,
        reason: Option<String>,
        created_by: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            barber_id,
            date,
            closure_type: closure_type.as_str().to_string(),
            reason,
            created_by,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> ClosureType {
        self.closure_type.parse().unwrap_or(ClosureType::Full)
    }

    pub fn is_auto(&self) -> bool {
        self.created_by == AUTO_CLOSURE_CREATOR
    }
}

/// Append-only ledger entry: the barber deleted an automatic closure for
/// this date, i.e. an exceptional opening. The materializer consults it to
/// avoid recreating the closure on the next run.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RemovedAutoClosure {
    pub id: String,
    pub barber_id: String,
    pub date: NaiveDate,
    pub closure_type: String,
    pub removed_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RemovedAutoClosure {
    pub fn new(
        barber_id: String,
        date: NaiveDate,
        closure_type: ClosureType,
        removed_by: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            barber_id,
            date,
            closure_type: closure_type.as_str().to_string(),
            removed_by,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> ClosureType {
        self.closure_type.parse().unwrap_or(ClosureType::Full)
    }
}

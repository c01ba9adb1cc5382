//! Snapshot reconciliation for the day view.
//!
//! Edits arrive from a table-editing surface as a full snapshot, not as
//! discrete change events, so the only way to know which rows actually
//! changed is to diff the edited snapshot against the one originally
//! fetched. The diff compares the two editable fields (status and arrival
//! time) and emits one joint patch per changed row.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AgendaError, AgendaResult};
use crate::models::booking::BookingStatus;

pub const ARRIVAL_MAX: i32 = 1439;

/// One row of a day snapshot as held by an editing caller.
///
/// `arrival_minutes` is kept loosely typed because table editors hand back a
/// mix of nulls, numbers, and strings; [`normalize_arrival`] collapses them
/// before any comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSnapshot {
    pub id: i64,
    pub status: BookingStatus,
    #[serde(default)]
    pub arrival_minutes: Value,
}

/// Joint update of the two editable fields, keyed by booking id.
///
/// Both fields are always carried, even when only one changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPatch {
    pub id: i64,
    pub status: BookingStatus,
    pub arrival_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    pub original: Vec<BookingSnapshot>,
    pub edited: Vec<BookingSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowFailure {
    pub id: i64,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub updated: usize,
    pub failures: Vec<RowFailure>,
}

/// Collapses the loosely typed arrival value to canonical integer minutes.
///
/// Null, empty strings, `"nan"` in any case, and anything non-numeric mean
/// "no value". Numeric strings and floats are truncated to whole minutes, so
/// `90`, `"90"`, and `90.0` all normalize to `Some(90)`. Range checking is a
/// separate concern, see [`validate_arrival`].
pub fn normalize_arrival(value: &Value) -> Option<i32> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64().map(|f| f as i32),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return None;
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i32)
        }
        _ => None,
    }
}

/// Rejects out-of-range arrival minutes before they reach the store.
pub fn validate_arrival(minutes: Option<i32>) -> AgendaResult<Option<i16>> {
    match minutes {
        None => Ok(None),
        Some(m) if (0..=ARRIVAL_MAX).contains(&m) => Ok(Some(m as i16)),
        Some(m) => Err(AgendaError::Validation(format!(
            "Arrival minutes out of range 0..={ARRIVAL_MAX}: {m}"
        ))),
    }
}

/// Diffs an edited snapshot against its original and returns the patches
/// needed to converge the store.
///
/// Rows are matched by id; an edited row with no original counterpart counts
/// as changed. At most one patch is emitted per id, and patches carry no
/// ordering guarantee. Diffing identical snapshots yields nothing, which is
/// what makes a save idempotent.
pub fn diff_snapshots(original: &[BookingSnapshot], edited: &[BookingSnapshot]) -> Vec<SlotPatch> {
    let by_id: HashMap<i64, &BookingSnapshot> =
        original.iter().map(|row| (row.id, row)).collect();

    let mut seen = HashSet::new();
    let mut patches = Vec::new();

    for row in edited {
        if !seen.insert(row.id) {
            continue;
        }

        let before = by_id.get(&row.id);
        let status_changed = before.map_or(true, |o| o.status != row.status);

        let old_arrival = before.and_then(|o| normalize_arrival(&o.arrival_minutes));
        let new_arrival = normalize_arrival(&row.arrival_minutes);
        let arrival_changed = old_arrival != new_arrival;

        if status_changed || arrival_changed {
            patches.push(SlotPatch {
                id: row.id,
                status: row.status,
                arrival_minutes: new_arrival,
            });
        }
    }

    patches
}

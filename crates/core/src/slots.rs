//! Slot allocation over the fixed 1..=12 daily domain.

pub const SLOT_MIN: i16 = 1;
pub const SLOT_MAX: i16 = 12;

/// Returns the lowest slot in 1..=12 not present in `occupied`.
///
/// When every slot is taken this saturates to 12 instead of failing: at full
/// capacity the board reuses the last slot and lets the store's uniqueness
/// constraint arbitrate. Callers that need a hard stop must check occupancy
/// themselves.
pub fn next_free_slot(occupied: &[i16]) -> i16 {
    (SLOT_MIN..=SLOT_MAX)
        .find(|slot| !occupied.contains(slot))
        .unwrap_or(SLOT_MAX)
}

/// Range check for a caller-supplied slot index.
pub fn is_valid_slot(slot: i16) -> bool {
    (SLOT_MIN..=SLOT_MAX).contains(&slot)
}

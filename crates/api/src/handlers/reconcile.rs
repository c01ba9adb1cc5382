use axum::{extract::State, Json};
use std::sync::Arc;

use agenda_core::reconcile::{
    diff_snapshots, validate_arrival, ReconcileRequest, ReconcileResponse, RowFailure,
};

use crate::{middleware::error_handling::AppError, ApiState};

/// Applies an edited day snapshot against the store.
///
/// The diff against the original snapshot decides which rows changed; each
/// changed row gets exactly one joint update of status and arrival time.
/// Rows fail independently: a failure is recorded and the batch continues,
/// so the response always accounts for every patch.
#[axum::debug_handler]
pub async fn reconcile(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, AppError> {
    let patches = diff_snapshots(&payload.original, &payload.edited);

    let mut updated = 0;
    let mut failures = Vec::new();

    for patch in patches {
        let arrival = match validate_arrival(patch.arrival_minutes) {
            Ok(arrival) => arrival,
            Err(err) => {
                failures.push(RowFailure {
                    id: patch.id,
                    error: err.to_string(),
                });
                continue;
            }
        };

        match agenda_db::repositories::booking::update_booking_fields(
            &state.db_pool,
            patch.id,
            patch.status,
            arrival,
        )
        .await
        {
            Ok(()) => updated += 1,
            Err(err) => failures.push(RowFailure {
                id: patch.id,
                error: err.to_string(),
            }),
        }
    }

    tracing::debug!(
        "Reconcile finished: updated={}, failed={}",
        updated,
        failures.len()
    );

    Ok(Json(ReconcileResponse { updated, failures }))
}

use mockall::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use agenda_api::middleware::error_handling::AppError;
use agenda_core::{
    errors::AgendaError,
    models::booking::BookingStatus,
    reconcile::{
        diff_snapshots, validate_arrival, BookingSnapshot, ReconcileRequest, ReconcileResponse,
        RowFailure,
    },
};

use crate::test_utils::TestContext;

// Mirrors the reconcile handler: diff, then one joint update per changed
// row, collecting per-row failures without aborting the batch.
async fn test_reconcile_wrapper(
    ctx: &mut TestContext,
    payload: ReconcileRequest,
) -> Result<ReconcileResponse, AppError> {
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

        match ctx
            .booking_repo
            .update_booking_fields(patch.id, patch.status, arrival)
            .await
        {
            Ok(()) => updated += 1,
            Err(err) => failures.push(RowFailure {
                id: patch.id,
                error: err.to_string(),
            }),
        }
    }

    Ok(ReconcileResponse { updated, failures })
}

fn snapshot(id: i64, status: BookingStatus, arrival: Value) -> BookingSnapshot {
    BookingSnapshot {
        id,
        status,
        arrival_minutes: arrival,
    }
}

#[tokio::test]
async fn test_single_row_edit_issues_one_joint_update() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_update_booking_fields()
        .with(
            predicate::eq(7),
            predicate::eq(BookingStatus::Scheduled),
            predicate::eq(Some(90i16)),
        )
        .times(1)
        .returning(|_, _, _| Ok(()));

    let payload = ReconcileRequest {
        original: vec![snapshot(7, BookingStatus::Waiting, Value::Null)],
        edited: vec![snapshot(7, BookingStatus::Scheduled, json!(90))],
    };

    let response = test_reconcile_wrapper(&mut ctx, payload)
        .await
        .expect("reconcile should succeed");

    assert_eq!(response.updated, 1);
    assert!(response.failures.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_partial_failure_continues_batch() {
    let mut ctx = TestContext::new();

    // Row 5 fails; the other nine still go through and are counted.
    ctx.booking_repo
        .expect_update_booking_fields()
        .withf(|id, _, _| *id == 5)
        .times(1)
        .returning(|_, _, _| Err(AgendaError::Database(eyre::eyre!("connection reset"))));
    ctx.booking_repo
        .expect_update_booking_fields()
        .withf(|id, _, _| *id != 5)
        .times(9)
        .returning(|_, _, _| Ok(()));

    let original: Vec<_> = (1..=10)
        .map(|id| snapshot(id, BookingStatus::Waiting, Value::Null))
        .collect();
    let edited: Vec<_> = (1..=10)
        .map(|id| snapshot(id, BookingStatus::Done, Value::Null))
        .collect();

    let response = test_reconcile_wrapper(&mut ctx, ReconcileRequest { original, edited })
        .await
        .expect("reconcile should succeed");

    assert_eq!(response.updated, 9);
    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].id, 5);
    assert!(response.failures[0].error.contains("Database error"));
}

#[tokio::test]
async fn test_second_pass_issues_no_updates() {
    let mut ctx = TestContext::new();

    ctx.booking_repo
        .expect_update_booking_fields()
        .times(1)
        .returning(|_, _, _| Ok(()));

    let original = vec![snapshot(1, BookingStatus::Waiting, Value::Null)];
    let edited = vec![snapshot(1, BookingStatus::Done, json!(30))];

    let first = test_reconcile_wrapper(
        &mut ctx,
        ReconcileRequest {
            original,
            edited: edited.clone(),
        },
    )
    .await
    .expect("first pass should succeed");
    assert_eq!(first.updated, 1);

    // The mock allows exactly one update; a second one would panic.
    let second = test_reconcile_wrapper(
        &mut ctx,
        ReconcileRequest {
            original: edited.clone(),
            edited,
        },
    )
    .await
    .expect("second pass should succeed");

    assert_eq!(second.updated, 0);
    assert!(second.failures.is_empty());
}

#[tokio::test]
async fn test_out_of_range_arrival_is_recorded_not_stored() {
    let mut ctx = TestContext::new();

    // Validation rejects the row before any store call is made.
    ctx.booking_repo.expect_update_booking_fields().times(0);

    let payload = ReconcileRequest {
        original: vec![snapshot(2, BookingStatus::Waiting, Value::Null)],
        edited: vec![snapshot(2, BookingStatus::Waiting, json!(5000))],
    };

    let response = test_reconcile_wrapper(&mut ctx, payload)
        .await
        .expect("reconcile should succeed");

    assert_eq!(response.updated, 0);
    assert_eq!(response.failures.len(), 1);
    assert_eq!(response.failures[0].id, 2);
    assert!(response.failures[0].error.contains("Validation"));
}

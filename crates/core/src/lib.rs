//! Domain types and pure logic for the agenda service.
//!
//! This crate has no I/O: it defines the booking/entity/client models, the
//! error taxonomy shared by the store and API layers, the slot-allocation
//! computation, and the snapshot reconciliation used when a day's edits are
//! saved back.

pub mod errors;
pub mod models;
pub mod reconcile;
pub mod slots;

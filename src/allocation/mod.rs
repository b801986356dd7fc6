//! The two allocation phases and the ordering they share.
//!
//! - [`budget`] — global, mutually exclusive allocation of state-funded seats
//! - [`contract`] — per-program allocation of paid seats after the budget phase
//! - [`order`] — the priority/score admission order
//! - [`result`] — allocation results and the admitted-set hand-off

pub mod budget;
pub mod contract;
pub mod order;
pub mod result;

//! Running whole admission rounds.
//!
//! - [`run`] — budget phase, admitted-set hand-off, contract phase
//! - [`input`] — JSON round files exchanged with the ranking store
//! - [`generator`] — random rounds for stress tests and benchmarks

pub mod generator;
pub mod input;
pub mod run;

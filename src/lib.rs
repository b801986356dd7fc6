//! # admission-engine
//!
//! Deterministic seat allocation for university admission rounds.
//!
//! Given each program's ranked applicants (score, declared priority and,
//! for paid seats, place type) and a seat count per program, the engine
//! computes who is admitted where. An applicant holds at most one
//! state-funded seat, and declared priority always outranks score.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: applicants, programs, rankings, validation errors
//! - **allocation** — Budget and contract allocators and their shared admission order
//! - **simulation** — Two-phase round orchestration, round files, random rounds

pub mod allocation;
pub mod core;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::allocation::budget::{BudgetAllocator, BudgetOutcome};
    pub use crate::allocation::contract::ContractAllocator;
    pub use crate::allocation::result::{AdmittedEntry, AdmittedSet, AllocationResult};
    pub use crate::core::applicant::{ApplicantId, ApplicantRecord, PlaceType, RawApplicantRecord};
    pub use crate::core::error::ValidationError;
    pub use crate::core::program::{ProgramCapacity, ProgramId};
    pub use crate::core::ranking::RankingSet;
    pub use crate::simulation::run::{PhaseInput, Simulation, SimulationReport};
}

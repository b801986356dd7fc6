//! End-to-end simulation of one admission round.
//!
//! Runs the budget phase, hands its admitted set to the contract phase and
//! bundles both results into a [`SimulationReport`].

use crate::allocation::budget::BudgetAllocator;
use crate::allocation::contract::ContractAllocator;
use crate::allocation::result::{AdmittedSet, AllocationResult};
use crate::core::applicant::ApplicantId;
use crate::core::error::ValidationError;
use crate::core::program::{ProgramCapacity, ProgramId};
use crate::core::ranking::RankingSet;
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rankings and seat counts for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseInput {
    pub rankings: RankingSet,
    pub capacities: ProgramCapacity,
}

impl PhaseInput {
    pub fn new(rankings: RankingSet, capacities: ProgramCapacity) -> Self {
        Self {
            rankings,
            capacities,
        }
    }
}

/// Which phase a seat was granted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Budget,
    Contract,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Budget => f.write_str("budget"),
            Phase::Contract => f.write_str("contract"),
        }
    }
}

/// A seat held by an applicant after the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub phase: Phase,
    pub program: ProgramId,
    /// 1-based admission rank within the program.
    pub rank: usize,
}

/// Input snapshot of a full admission round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub budget: PhaseInput,
    pub contract: PhaseInput,
}

impl Simulation {
    pub fn new(budget: PhaseInput, contract: PhaseInput) -> Self {
        Self { budget, contract }
    }

    /// Run both phases in sequence.
    ///
    /// Fails only if a contract record lacks its place type; in that case
    /// no result of either phase is returned.
    pub fn run(&self) -> Result<SimulationReport, ValidationError> {
        let budget = BudgetAllocator::allocate(&self.budget.rankings, &self.budget.capacities);
        let contract = ContractAllocator::allocate(
            &budget.admitted,
            &self.contract.rankings,
            &self.contract.capacities,
        )?;

        info!(
            "simulation finished: {} budget seats, {} contract seats",
            budget.result.total_admitted(),
            contract.total_admitted()
        );

        Ok(SimulationReport {
            budget: budget.result,
            admitted: budget.admitted,
            contract,
        })
    }
}

/// Results of both phases of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub budget: AllocationResult,
    /// Applicants holding a budget seat; excluded from the contract phase.
    pub admitted: AdmittedSet,
    pub contract: AllocationResult,
}

impl SimulationReport {
    /// Every seat an applicant holds: at most one budget seat, or any
    /// number of contract seats.
    pub fn placements_of(&self, applicant: &ApplicantId) -> Vec<Placement> {
        let phases = [
            (Phase::Budget, &self.budget),
            (Phase::Contract, &self.contract),
        ];
        phases
            .into_iter()
            .flat_map(|(phase, result)| {
                result.programs_of(applicant).into_iter().filter_map(move |program| {
                    result.rank_of(program, applicant).map(|rank| Placement {
                        phase,
                        program,
                        rank,
                    })
                })
            })
            .collect()
    }
}

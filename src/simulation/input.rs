//! JSON shape of an admission round as exchanged with the ranking store.
//!
//! ```json
//! {
//!   "budget": [
//!     {
//!       "id": 7,
//!       "name": "Software Engineering",
//!       "updated_at": "01.08.2025 10:00",
//!       "capacity": 25,
//!       "records": [
//!         { "identifier": "123-456-789 01", "score": 271, "priority": 1 }
//!       ]
//!     }
//!   ],
//!   "contract": []
//! }
//! ```
//!
//! A program without `capacity` gets no seats.

use crate::core::applicant::{ApplicantRecord, RawApplicantRecord};
use crate::core::error::ValidationError;
use crate::core::program::{ProgramCapacity, ProgramId, ProgramInfo};
use crate::core::ranking::RankingSet;
use crate::simulation::run::{PhaseInput, Simulation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One program's entry in a round file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInput {
    pub id: ProgramId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub records: Vec<RawApplicantRecord>,
}

/// Both phases of an admission round, as read from or written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundFile {
    #[serde(default)]
    pub budget: Vec<ProgramInput>,
    #[serde(default)]
    pub contract: Vec<ProgramInput>,
}

/// A validated round plus the display metadata of its programs.
#[derive(Debug, Clone)]
pub struct LoadedRound {
    pub simulation: Simulation,
    pub programs: BTreeMap<ProgramId, ProgramInfo>,
}

impl LoadedRound {
    pub fn info(&self, program: ProgramId) -> ProgramInfo {
        self.programs.get(&program).cloned().unwrap_or_default()
    }
}

impl RoundFile {
    /// Validate every record of both phases.
    ///
    /// A program id may appear only once per file.
    pub fn load(&self) -> Result<LoadedRound, ValidationError> {
        let mut programs = BTreeMap::new();
        let budget = load_phase(&self.budget, &mut programs)?;
        let contract = load_phase(&self.contract, &mut programs)?;
        Ok(LoadedRound {
            simulation: Simulation::new(budget, contract),
            programs,
        })
    }

    /// Build a round file from already validated phases, e.g. a generated round.
    pub fn from_phases(budget: &PhaseInput, contract: &PhaseInput) -> Self {
        Self {
            budget: dump_phase(budget),
            contract: dump_phase(contract),
        }
    }
}

fn load_phase(
    inputs: &[ProgramInput],
    programs: &mut BTreeMap<ProgramId, ProgramInfo>,
) -> Result<PhaseInput, ValidationError> {
    let mut raw = BTreeMap::new();
    let mut capacities = ProgramCapacity::new();
    for input in inputs {
        if programs.contains_key(&input.id) {
            return Err(ValidationError::DuplicateProgram { program: input.id });
        }
        programs.insert(
            input.id,
            ProgramInfo {
                name: input.name.clone(),
                updated_at: input.updated_at.clone(),
            },
        );
        if let Some(seats) = input.capacity {
            capacities.set(input.id, seats);
        }
        raw.insert(input.id, input.records.clone());
    }
    let rankings = RankingSet::from_raw(&raw)?;
    Ok(PhaseInput::new(rankings, capacities))
}

fn dump_phase(phase: &PhaseInput) -> Vec<ProgramInput> {
    phase
        .rankings
        .iter()
        .map(|(program, records)| ProgramInput {
            id: program,
            name: None,
            updated_at: None,
            capacity: phase
                .capacities
                .contains(program)
                .then(|| phase.capacities.get(program)),
            records: records.iter().map(to_raw).collect(),
        })
        .collect()
}

fn to_raw(record: &ApplicantRecord) -> RawApplicantRecord {
    RawApplicantRecord {
        identifier: Some(record.identifier().to_string()),
        score: Some(record.score()),
        priority: Some(record.priority()),
        place_type: record.place_type().map(|t| t.to_string()),
        position: record.position(),
        individual_achievements: record.individual_achievements(),
        has_originals: Some(record.has_originals()),
    }
}

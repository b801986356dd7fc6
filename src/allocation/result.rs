use crate::core::applicant::{ApplicantId, ApplicantRecord};
use crate::core::program::ProgramId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One admitted seat: who got it and with which score/priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmittedEntry {
    pub identifier: ApplicantId,
    pub score: i32,
    pub priority: i32,
}

impl From<&ApplicantRecord> for AdmittedEntry {
    fn from(record: &ApplicantRecord) -> Self {
        Self {
            identifier: record.identifier().clone(),
            score: record.score(),
            priority: record.priority(),
        }
    }
}

/// Admitted applicants per program, in admission order.
///
/// Index 0 of a program's list is the first admitted applicant. Produced by
/// an allocator and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationResult {
    programs: BTreeMap<ProgramId, Vec<AdmittedEntry>>,
}

impl AllocationResult {
    pub(crate) fn from_map(programs: BTreeMap<ProgramId, Vec<AdmittedEntry>>) -> Self {
        Self { programs }
    }

    /// Admitted entries of a program; empty for programs absent from the result.
    pub fn admitted(&self, program: ProgramId) -> &[AdmittedEntry] {
        self.programs
            .get(&program)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether the program appears in the result at all.
    pub fn has_program(&self, program: ProgramId) -> bool {
        self.programs.contains_key(&program)
    }

    pub fn programs(&self) -> impl Iterator<Item = ProgramId> + '_ {
        self.programs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProgramId, &[AdmittedEntry])> + '_ {
        self.programs.iter().map(|(&p, e)| (p, e.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    /// Number of seats handed out across all programs.
    pub fn total_admitted(&self) -> usize {
        self.programs.values().map(Vec::len).sum()
    }

    /// Whether `applicant` holds a seat in `program`.
    pub fn contains(&self, program: ProgramId, applicant: &ApplicantId) -> bool {
        self.rank_of(program, applicant).is_some()
    }

    /// 1-based admission rank of an applicant in a program.
    pub fn rank_of(&self, program: ProgramId, applicant: &ApplicantId) -> Option<usize> {
        self.admitted(program)
            .iter()
            .position(|e| &e.identifier == applicant)
            .map(|i| i + 1)
    }

    /// Programs in which `applicant` holds a seat, in program order.
    pub fn programs_of(&self, applicant: &ApplicantId) -> Vec<ProgramId> {
        self.programs
            .iter()
            .filter(|(_, entries)| entries.iter().any(|e| &e.identifier == applicant))
            .map(|(&p, _)| p)
            .collect()
    }

    /// Every admitted identifier across all programs.
    pub fn admitted_ids(&self) -> AdmittedSet {
        self.programs
            .values()
            .flatten()
            .map(|e| e.identifier.clone())
            .collect()
    }
}

impl fmt::Display for AllocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Allocation Result ===")?;
        writeln!(f, "Programs:       {}", self.len())?;
        writeln!(f, "Seats filled:   {}", self.total_admitted())?;

        for (program, entries) in &self.programs {
            writeln!(f, "\n--- Program {} ({} admitted) ---", program, entries.len())?;
            for (i, entry) in entries.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>4}. {:<20} score {:>4}  priority {}",
                    i + 1,
                    entry.identifier,
                    entry.score,
                    entry.priority
                )?;
            }
        }
        Ok(())
    }
}

/// Applicants already holding a budget seat.
///
/// The only hand-off between the budget and contract phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdmittedSet {
    ids: BTreeSet<ApplicantId>,
}

impl AdmittedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, applicant: &ApplicantId) -> bool {
        self.ids.contains(applicant)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplicantId> + '_ {
        self.ids.iter()
    }

    /// Mark an applicant as taken. Returns `false` if they already were.
    pub(crate) fn insert(&mut self, applicant: ApplicantId) -> bool {
        self.ids.insert(applicant)
    }
}

impl FromIterator<ApplicantId> for AdmittedSet {
    fn from_iter<T: IntoIterator<Item = ApplicantId>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

use crate::core::applicant::{ApplicantId, ApplicantRecord, RawApplicantRecord};
use crate::core::error::ValidationError;
use crate::core::program::ProgramId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Snapshot of every program's ranking for one admission phase.
///
/// Programs iterate in ascending id order and records in the order the
/// ranking store supplied them. The allocators depend on this order being
/// reproducible.
///
/// # Examples
///
/// ```
/// use admission_engine::core::applicant::ApplicantRecord;
/// use admission_engine::core::program::ProgramId;
/// use admission_engine::core::ranking::RankingSet;
///
/// let mut rankings = RankingSet::new();
/// rankings.add(ProgramId::new(7), ApplicantRecord::new("A", 250, 1));
/// rankings.add(ProgramId::new(7), ApplicantRecord::new("B", 240, 2));
/// assert_eq!(rankings.record_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankingSet {
    programs: BTreeMap<ProgramId, Vec<ApplicantRecord>>,
}

/// Where an applicant appears: one program's record for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantStanding<'a> {
    pub program: ProgramId,
    /// 0-based index of the record in the program's ranking.
    pub index: usize,
    pub record: &'a ApplicantRecord,
}

impl RankingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate raw records into a ranking set.
    ///
    /// Fails on the first invalid record in program order; no partially
    /// built set is ever returned.
    pub fn from_raw(
        raw: &BTreeMap<ProgramId, Vec<RawApplicantRecord>>,
    ) -> Result<Self, ValidationError> {
        let mut programs = BTreeMap::new();
        for (&program, records) in raw {
            let validated = records
                .iter()
                .enumerate()
                .map(|(index, r)| r.validate(program, index))
                .collect::<Result<Vec<_>, _>>()?;
            programs.insert(program, validated);
        }
        Ok(Self { programs })
    }

    /// Append a record to a program's ranking.
    pub fn add(&mut self, program: ProgramId, record: ApplicantRecord) {
        self.programs.entry(program).or_default().push(record);
    }

    /// Register a program with an empty ranking.
    pub fn add_program(&mut self, program: ProgramId) {
        self.programs.entry(program).or_default();
    }

    /// Records of one program, empty if the program is unknown.
    pub fn records(&self, program: ProgramId) -> &[ApplicantRecord] {
        self.programs
            .get(&program)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn programs(&self) -> impl Iterator<Item = ProgramId> + '_ {
        self.programs.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProgramId, &[ApplicantRecord])> + '_ {
        self.programs.iter().map(|(&p, r)| (p, r.as_slice()))
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Total number of records across all programs.
    pub fn record_count(&self) -> usize {
        self.programs.values().map(Vec::len).sum()
    }

    /// Number of distinct applicants across all programs.
    pub fn applicant_count(&self) -> usize {
        self.programs
            .values()
            .flatten()
            .map(ApplicantRecord::identifier)
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Every ranking entry for an applicant, in program order.
    pub fn lookup(&self, applicant: &ApplicantId) -> Vec<ApplicantStanding<'_>> {
        self.programs
            .iter()
            .flat_map(|(&program, records)| {
                records
                    .iter()
                    .enumerate()
                    .filter(move |(_, r)| r.identifier() == applicant)
                    .map(move |(index, record)| ApplicantStanding {
                        program,
                        index,
                        record,
                    })
            })
            .collect()
    }
}

impl FromIterator<(ProgramId, ApplicantRecord)> for RankingSet {
    fn from_iter<T: IntoIterator<Item = (ProgramId, ApplicantRecord)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (program, record) in iter {
            set.add(program, record);
        }
        set
    }
}

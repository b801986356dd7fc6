use crate::allocation::order::admission_order;
use crate::allocation::result::{AdmittedEntry, AdmittedSet, AllocationResult};
use crate::core::applicant::ApplicantRecord;
use crate::core::program::{ProgramCapacity, ProgramId};
use crate::core::ranking::RankingSet;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Output of the budget phase: the allocation and the identifiers it took.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOutcome {
    pub result: AllocationResult,
    /// Everyone holding a budget seat. Feed this to the contract phase.
    pub admitted: AdmittedSet,
}

/// Accumulator threaded through the scan over the sorted candidates.
#[derive(Default)]
struct ScanState {
    taken: AdmittedSet,
    counts: BTreeMap<ProgramId, u32>,
    admitted: BTreeMap<ProgramId, Vec<AdmittedEntry>>,
}

impl ScanState {
    fn step(
        mut self,
        capacities: &ProgramCapacity,
        (program, record): (ProgramId, &ApplicantRecord),
    ) -> Self {
        if self.taken.contains(record.identifier()) {
            return self;
        }
        let count = self.counts.entry(program).or_insert(0);
        if *count >= capacities.get(program) {
            return self;
        }
        *count += 1;
        self.taken.insert(record.identifier().clone());
        self.admitted
            .entry(program)
            .or_default()
            .push(AdmittedEntry::from(record));
        self
    }
}

/// Allocator for state-funded (budget) seats.
///
/// One seat per applicant across every budget program.
pub struct BudgetAllocator;

impl BudgetAllocator {
    /// Allocate budget seats across all programs at once.
    ///
    /// # Algorithm
    ///
    /// 1. Flatten every program's records, programs in ascending id order,
    ///    tagging each with its program.
    /// 2. Stable-sort by priority ascending, then score descending.
    /// 3. Scan once: skip applicants who already hold a seat, admit while the
    ///    program has seats left, skip otherwise.
    ///
    /// A program without a capacity entry admits nobody. Every program in
    /// `rankings` appears in the result, possibly with an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use admission_engine::allocation::budget::BudgetAllocator;
    /// use admission_engine::core::applicant::ApplicantRecord;
    /// use admission_engine::core::program::{ProgramCapacity, ProgramId};
    /// use admission_engine::core::ranking::RankingSet;
    ///
    /// let p1 = ProgramId::new(1);
    /// let mut rankings = RankingSet::new();
    /// rankings.add(p1, ApplicantRecord::new("A", 90, 1));
    /// rankings.add(p1, ApplicantRecord::new("B", 95, 1));
    /// rankings.add(p1, ApplicantRecord::new("C", 80, 2));
    ///
    /// let mut seats = ProgramCapacity::new();
    /// seats.set(p1, 2);
    ///
    /// let outcome = BudgetAllocator::allocate(&rankings, &seats);
    /// let admitted: Vec<_> = outcome.result.admitted(p1).iter()
    ///     .map(|e| e.identifier.as_str())
    ///     .collect();
    /// assert_eq!(admitted, vec!["B", "A"]);
    /// ```
    pub fn allocate(rankings: &RankingSet, capacities: &ProgramCapacity) -> BudgetOutcome {
        let mut candidates: Vec<(ProgramId, &ApplicantRecord)> = rankings
            .iter()
            .flat_map(|(program, records)| records.iter().map(move |r| (program, r)))
            .collect();
        candidates.sort_by(|(_, a), (_, b)| admission_order(a, b));

        debug!(
            "budget phase: {} candidate records across {} programs",
            candidates.len(),
            rankings.program_count()
        );

        let state = candidates
            .into_iter()
            .fold(ScanState::default(), |state, candidate| {
                state.step(capacities, candidate)
            });

        let mut admitted = state.admitted;
        for program in rankings.programs() {
            let entries = admitted.entry(program).or_default();
            debug!(
                "budget program {}: {}/{} seats filled",
                program,
                entries.len(),
                capacities.get(program)
            );
        }

        info!(
            "budget phase admitted {} applicants across {} programs",
            state.taken.len(),
            admitted.len()
        );

        BudgetOutcome {
            result: AllocationResult::from_map(admitted),
            admitted: state.taken,
        }
    }
}

use crate::allocation::order::admission_order;
use crate::allocation::result::{AdmittedEntry, AdmittedSet, AllocationResult};
use crate::core::applicant::{ApplicantRecord, PlaceType};
use crate::core::error::ValidationError;
use crate::core::program::{ProgramCapacity, ProgramId};
use crate::core::ranking::RankingSet;
use log::{debug, info, warn};
use std::collections::{BTreeMap, BTreeSet};

/// Signed and pending records of one program, budget admits removed.
struct ContractPool<'a> {
    signed: Vec<&'a ApplicantRecord>,
    pending: Vec<&'a ApplicantRecord>,
}

impl<'a> ContractPool<'a> {
    fn partition(
        program: ProgramId,
        records: &'a [ApplicantRecord],
        excluded: &AdmittedSet,
    ) -> Result<Self, ValidationError> {
        let mut pool = ContractPool {
            signed: Vec::new(),
            pending: Vec::new(),
        };
        for record in records {
            let place_type = record
                .place_type()
                .ok_or_else(|| ValidationError::MissingPlaceType {
                    program,
                    identifier: record.identifier().clone(),
                })?;
            if excluded.contains(record.identifier()) {
                continue;
            }
            match place_type {
                PlaceType::Signed => pool.signed.push(record),
                PlaceType::Pending => pool.pending.push(record),
            }
        }
        Ok(pool)
    }

    /// Signed entries in record order, then the best pending entries that
    /// fit in the seats the signed entries left over.
    fn admit(mut self, capacity: u32) -> Vec<AdmittedEntry> {
        let mut seen = BTreeSet::new();
        let mut admitted: Vec<AdmittedEntry> = self
            .signed
            .iter()
            .filter(|r| seen.insert(r.identifier().clone()))
            .map(|&r| AdmittedEntry::from(r))
            .collect();

        let free = (capacity as usize).saturating_sub(admitted.len());
        self.pending.sort_by(|a, b| admission_order(a, b));
        admitted.extend(
            self.pending
                .iter()
                .filter(|r| seen.insert(r.identifier().clone()))
                .take(free)
                .map(|&r| AdmittedEntry::from(r)),
        );
        admitted
    }
}

/// Allocator for paid (contract) seats.
///
/// Programs are allocated independently: an applicant may hold seats in
/// several contract programs, but never one while holding a budget seat.
pub struct ContractAllocator;

impl ContractAllocator {
    /// Allocate contract seats for every program in `rankings`.
    ///
    /// Per program:
    ///
    /// 1. Drop records of applicants in `budget_admitted`.
    /// 2. Admit every `Signed` record in record order, even beyond capacity.
    /// 3. Fill `max(capacity - signed, 0)` remaining seats from the `Pending`
    ///    records, priority ascending then score descending.
    ///
    /// An applicant is admitted at most once per program; the first entry
    /// seen wins, signed entries being seen before pending ones.
    ///
    /// Every contract record must carry a place type. Records are checked
    /// for all programs before anything is allocated, so an error never
    /// comes with a partial result.
    ///
    /// # Examples
    ///
    /// ```
    /// use admission_engine::allocation::contract::ContractAllocator;
    /// use admission_engine::allocation::result::AdmittedSet;
    /// use admission_engine::core::applicant::{ApplicantRecord, PlaceType};
    /// use admission_engine::core::program::{ProgramCapacity, ProgramId};
    /// use admission_engine::core::ranking::RankingSet;
    ///
    /// let q = ProgramId::new(100);
    /// let mut rankings = RankingSet::new();
    /// rankings.add(q, ApplicantRecord::new("D", 10, 5).with_place_type(PlaceType::Signed));
    /// rankings.add(q, ApplicantRecord::new("E", 20, 1).with_place_type(PlaceType::Signed));
    ///
    /// let mut seats = ProgramCapacity::new();
    /// seats.set(q, 1);
    ///
    /// let result = ContractAllocator::allocate(&AdmittedSet::new(), &rankings, &seats).unwrap();
    /// assert_eq!(result.admitted(q).len(), 2);
    /// ```
    pub fn allocate(
        budget_admitted: &AdmittedSet,
        rankings: &RankingSet,
        capacities: &ProgramCapacity,
    ) -> Result<AllocationResult, ValidationError> {
        let pools = rankings
            .iter()
            .map(|(program, records)| {
                ContractPool::partition(program, records, budget_admitted)
                    .map(|pool| (program, pool))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut programs = BTreeMap::new();
        for (program, pool) in pools {
            let capacity = capacities.get(program);
            let signed = pool.signed.len();
            let candidates = signed + pool.pending.len();
            let admitted = pool.admit(capacity);

            if signed > capacity as usize {
                warn!(
                    "contract program {}: {} signed contracts exceed {} seats",
                    program, signed, capacity
                );
            }
            debug!(
                "contract program {}: {} admitted from {} eligible records ({} signed)",
                program,
                admitted.len(),
                candidates,
                signed
            );
            programs.insert(program, admitted);
        }

        let result = AllocationResult::from_map(programs);
        info!(
            "contract phase admitted {} seats across {} programs ({} budget admits excluded)",
            result.total_admitted(),
            result.len(),
            budget_admitted.len()
        );
        Ok(result)
    }
}

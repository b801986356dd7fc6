use admission_engine::allocation::budget::BudgetAllocator;
use admission_engine::allocation::contract::ContractAllocator;
use admission_engine::allocation::order::is_admission_ordered;
use admission_engine::allocation::result::AdmittedSet;
use admission_engine::core::applicant::{ApplicantRecord, PlaceType};
use admission_engine::core::program::{ProgramCapacity, ProgramId};
use admission_engine::core::ranking::RankingSet;
use admission_engine::simulation::run::{PhaseInput, Simulation};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Generate an applicant id from a small pool (to force repeated applicants).
fn arb_applicant() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["A", "B", "C", "D", "E", "F", "G", "H"]).prop_map(String::from)
}

/// Budget programs 1..=4.
fn arb_budget_program() -> impl Strategy<Value = ProgramId> {
    (1u32..=4).prop_map(ProgramId::new)
}

/// Contract programs 101..=103.
fn arb_contract_program() -> impl Strategy<Value = ProgramId> {
    (101u32..=103).prop_map(ProgramId::new)
}

fn arb_place_type() -> impl Strategy<Value = PlaceType> {
    prop_oneof![Just(PlaceType::Signed), Just(PlaceType::Pending)]
}

/// Generate budget rankings of 0..40 records with narrow key ranges (to force ties).
fn arb_budget_rankings() -> impl Strategy<Value = RankingSet> {
    prop::collection::vec(
        (arb_budget_program(), arb_applicant(), 0i32..5, 0i32..4),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(program, id, score, priority)| {
                (program, ApplicantRecord::new(id, score, priority))
            })
            .collect::<RankingSet>()
    })
}

fn arb_contract_rankings() -> impl Strategy<Value = RankingSet> {
    prop::collection::vec(
        (
            arb_contract_program(),
            arb_applicant(),
            0i32..5,
            0i32..4,
            arb_place_type(),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(program, id, score, priority, place_type)| {
                (
                    program,
                    ApplicantRecord::new(id, score, priority).with_place_type(place_type),
                )
            })
            .collect::<RankingSet>()
    })
}

/// Capacities for a subset of programs; unlisted programs get no seats.
fn arb_capacities(programs: std::ops::RangeInclusive<u32>) -> impl Strategy<Value = ProgramCapacity> {
    prop::collection::btree_map(programs.prop_map(ProgramId::new), 0u32..4, 0..3)
        .prop_map(|seats| seats.into_iter().collect::<ProgramCapacity>())
}

fn arb_simulation() -> impl Strategy<Value = Simulation> {
    (
        arb_budget_rankings(),
        arb_capacities(1..=4),
        arb_contract_rankings(),
        arb_capacities(101..=103),
    )
        .prop_map(|(budget, budget_seats, contract, contract_seats)| {
            Simulation::new(
                PhaseInput::new(budget, budget_seats),
                PhaseInput::new(contract, contract_seats),
            )
        })
}

proptest! {
    // ===================================================================
    // INVARIANT 1: One budget seat per applicant.
    //
    // No identifier appears in more than one budget program, nor twice
    // in the same program.
    // ===================================================================
    #[test]
    fn budget_seats_are_exclusive(rankings in arb_budget_rankings(), seats in arb_capacities(1..=4)) {
        let outcome = BudgetAllocator::allocate(&rankings, &seats);
        let mut seen = BTreeMap::new();
        for (program, entries) in outcome.result.iter() {
            for entry in entries {
                let previous = seen.insert(entry.identifier.clone(), program);
                prop_assert!(
                    previous.is_none(),
                    "{} admitted to {:?} and {}",
                    entry.identifier, previous, program
                );
            }
        }
        prop_assert_eq!(seen.len(), outcome.admitted.len());
    }

    // ===================================================================
    // INVARIANT 2: Budget admits never hold contract seats.
    // ===================================================================
    #[test]
    fn budget_admits_excluded_from_contract(sim in arb_simulation()) {
        let report = sim.run().unwrap();
        for (_, entries) in report.contract.iter() {
            for entry in entries {
                prop_assert!(
                    !report.admitted.contains(&entry.identifier),
                    "{} holds both a budget and a contract seat",
                    entry.identifier
                );
            }
        }
    }

    // ===================================================================
    // INVARIANT 3: Capacity bound.
    //
    // Budget programs never exceed capacity. Contract programs exceed it
    // only by signed contracts: len ≤ max(capacity, signed).
    // ===================================================================
    #[test]
    fn capacity_bound_holds(sim in arb_simulation()) {
        let report = sim.run().unwrap();
        for (program, entries) in report.budget.iter() {
            prop_assert!(entries.len() as u32 <= sim.budget.capacities.get(program));
        }
        for (program, entries) in report.contract.iter() {
            let signed = entries
                .iter()
                .filter(|e| {
                    sim.contract.rankings.records(program).iter().any(|r| {
                        r.identifier() == &e.identifier && r.place_type() == Some(PlaceType::Signed)
                    })
                })
                .count();
            let bound = (sim.contract.capacities.get(program) as usize).max(signed);
            prop_assert!(
                entries.len() <= bound,
                "program {} admitted {} with bound {}",
                program, entries.len(), bound
            );
        }
    }

    // ===================================================================
    // INVARIANT 4: Admission order.
    //
    // Budget lists and the pending tail of contract lists are sorted by
    // priority ascending, then score descending.
    // ===================================================================
    #[test]
    fn admitted_lists_are_ordered(sim in arb_simulation()) {
        let report = sim.run().unwrap();
        for (_, entries) in report.budget.iter() {
            prop_assert!(is_admission_ordered(entries));
        }
        for (program, entries) in report.contract.iter() {
            let signed_ids: Vec<_> = sim
                .contract
                .rankings
                .records(program)
                .iter()
                .filter(|r| r.place_type() == Some(PlaceType::Signed))
                .map(|r| r.identifier().clone())
                .collect();
            let split = entries
                .iter()
                .position(|e| !signed_ids.contains(&e.identifier))
                .unwrap_or(entries.len());
            prop_assert!(is_admission_ordered(&entries[split..]));
        }
    }

    // ===================================================================
    // INVARIANT 5: Signed precedence.
    //
    // Every signed contract of an applicant without a budget seat is
    // admitted, whatever the capacity.
    // ===================================================================
    #[test]
    fn signed_contracts_always_admitted(sim in arb_simulation()) {
        let report = sim.run().unwrap();
        for (program, records) in sim.contract.rankings.iter() {
            for record in records {
                if record.place_type() == Some(PlaceType::Signed)
                    && !report.admitted.contains(record.identifier())
                {
                    prop_assert!(
                        report.contract.contains(program, record.identifier()),
                        "signed contract of {} missing from program {}",
                        record.identifier(), program
                    );
                }
            }
        }
    }

    // ===================================================================
    // INVARIANT 6: Allocation is deterministic.
    //
    // Same inputs, same result. No randomness, no hidden state.
    // ===================================================================
    #[test]
    fn simulation_is_deterministic(sim in arb_simulation()) {
        let first = sim.run().unwrap();
        let second = sim.run().unwrap();
        prop_assert_eq!(first, second);
    }

    // ===================================================================
    // INVARIANT 7: Contract programs are independent.
    //
    // Allocating one contract program alone gives the same list as
    // allocating it together with the others.
    // ===================================================================
    #[test]
    fn contract_programs_independent(
        rankings in arb_contract_rankings(),
        seats in arb_capacities(101..=103),
    ) {
        let budget = AdmittedSet::new();
        let together = ContractAllocator::allocate(&budget, &rankings, &seats).unwrap();
        for (program, records) in rankings.iter() {
            let alone: RankingSet = records.iter().map(|r| (program, r.clone())).collect();
            let result = ContractAllocator::allocate(&budget, &alone, &seats).unwrap();
            prop_assert_eq!(result.admitted(program), together.admitted(program));
        }
    }

    // ===================================================================
    // INVARIANT 8: Full programs are really full.
    //
    // If a budget candidate with a free-standing identifier was skipped,
    // it is because its program reached capacity.
    // ===================================================================
    #[test]
    fn rejected_candidates_met_full_programs(
        rankings in arb_budget_rankings(),
        seats in arb_capacities(1..=4),
    ) {
        let outcome = BudgetAllocator::allocate(&rankings, &seats);
        for (program, records) in rankings.iter() {
            for record in records {
                if !outcome.admitted.contains(record.identifier()) {
                    prop_assert_eq!(
                        outcome.result.admitted(program).len() as u32,
                        seats.get(program),
                        "unplaced applicant {} left a seat free in {}",
                        record.identifier(), program
                    );
                }
            }
        }
    }
}

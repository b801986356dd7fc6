use admission_engine::allocation::budget::BudgetAllocator;
use admission_engine::allocation::contract::ContractAllocator;
use admission_engine::allocation::order::is_admission_ordered;
use admission_engine::allocation::result::{AdmittedSet, AllocationResult};
use admission_engine::core::applicant::{ApplicantId, ApplicantRecord, PlaceType};
use admission_engine::core::error::ValidationError;
use admission_engine::core::program::{ProgramCapacity, ProgramId};
use admission_engine::core::ranking::RankingSet;
use admission_engine::simulation::input::RoundFile;
use admission_engine::simulation::run::{Phase, PhaseInput, Simulation};

fn ids(result: &AllocationResult, program: ProgramId) -> Vec<String> {
    result
        .admitted(program)
        .iter()
        .map(|e| e.identifier.to_string())
        .collect()
}

fn contract(id: &str, place_type: PlaceType, score: i32, priority: i32) -> ApplicantRecord {
    ApplicantRecord::new(id, score, priority).with_place_type(place_type)
}

/// Priority 1 beats priority 2; within priority 1 the higher score wins.
#[test]
fn scenario_a_priority_then_score() {
    let p1 = ProgramId::new(1);
    let rankings: RankingSet = vec![
        (p1, ApplicantRecord::new("A", 90, 1)),
        (p1, ApplicantRecord::new("B", 95, 1)),
        (p1, ApplicantRecord::new("C", 80, 2)),
    ]
    .into_iter()
    .collect();
    let seats: ProgramCapacity = [(p1, 2)].into_iter().collect();

    let outcome = BudgetAllocator::allocate(&rankings, &seats);
    assert_eq!(ids(&outcome.result, p1), vec!["B", "A"]);
}

/// X ties on both keys across P1 and P2; programs are flattened in
/// ascending id order, so the lower-numbered program wins the tie.
#[test]
fn scenario_b_cross_program_exclusivity() {
    let p1 = ProgramId::new(1);
    let p2 = ProgramId::new(2);
    let rankings: RankingSet = vec![
        (p2, ApplicantRecord::new("X", 99, 1)),
        (p1, ApplicantRecord::new("X", 99, 1)),
    ]
    .into_iter()
    .collect();
    let seats: ProgramCapacity = [(p1, 1), (p2, 1)].into_iter().collect();

    let outcome = BudgetAllocator::allocate(&rankings, &seats);
    assert_eq!(ids(&outcome.result, p1), vec!["X"]);
    assert!(outcome.result.admitted(p2).is_empty());
    assert_eq!(outcome.result.programs_of(&"X".into()), vec![p1]);
}

/// Scores differ across programs: the sort key decides, not program order.
#[test]
fn scenario_b_score_decides_before_program_order() {
    let p1 = ProgramId::new(1);
    let p2 = ProgramId::new(2);
    // The same applicant carries a different score per program.
    let rankings: RankingSet = vec![
        (p1, ApplicantRecord::new("X", 50, 1)),
        (p2, ApplicantRecord::new("X", 99, 1)),
    ]
    .into_iter()
    .collect();
    let seats: ProgramCapacity = [(p1, 1), (p2, 1)].into_iter().collect();

    let outcome = BudgetAllocator::allocate(&rankings, &seats);
    assert_eq!(outcome.result.programs_of(&"X".into()), vec![p2]);
    assert_eq!(outcome.admitted.len(), 1);
}

/// Signed contracts are never dropped, even beyond capacity.
#[test]
fn scenario_c_contract_signed_overflow() {
    let q = ProgramId::new(200);
    let rankings: RankingSet = vec![
        (q, contract("D", PlaceType::Signed, 10, 5)),
        (q, contract("E", PlaceType::Signed, 20, 1)),
    ]
    .into_iter()
    .collect();
    let seats: ProgramCapacity = [(q, 1)].into_iter().collect();

    let result = ContractAllocator::allocate(&AdmittedSet::new(), &rankings, &seats).unwrap();
    let admitted = ids(&result, q);
    assert_eq!(admitted.len(), 2);
    assert!(admitted.contains(&"D".to_string()));
    assert!(admitted.contains(&"E".to_string()));
}

/// A program missing from the capacity map admits nobody.
#[test]
fn scenario_d_zero_capacity_default() {
    let r = ProgramId::new(3);
    let rankings: RankingSet = (0..20)
        .map(|i| (r, ApplicantRecord::new(format!("R{}", i), 300 - i, 1)))
        .collect();

    let budget = BudgetAllocator::allocate(&rankings, &ProgramCapacity::new());
    assert!(budget.result.admitted(r).is_empty());

    let pending: RankingSet = rankings
        .records(r)
        .iter()
        .map(|rec| (r, rec.clone().with_place_type(PlaceType::Pending)))
        .collect();
    let contract =
        ContractAllocator::allocate(&AdmittedSet::new(), &pending, &ProgramCapacity::new())
            .unwrap();
    assert!(contract.admitted(r).is_empty());
}

/// Full pipeline: budget phase, admitted-set hand-off, contract phase.
#[test]
fn full_round_two_phases() {
    let math = ProgramId::new(2);
    let physics = ProgramId::new(7);
    let paid_math = ProgramId::new(102);
    let paid_physics = ProgramId::new(107);

    let budget: RankingSet = vec![
        (math, ApplicantRecord::new("ann", 280, 1)),
        (math, ApplicantRecord::new("bob", 270, 1)),
        (math, ApplicantRecord::new("cat", 260, 2)),
        (physics, ApplicantRecord::new("cat", 260, 1)),
        (physics, ApplicantRecord::new("dan", 250, 1)),
        (physics, ApplicantRecord::new("bob", 270, 2)),
    ]
    .into_iter()
    .collect();
    let budget_seats: ProgramCapacity = [(math, 1), (physics, 1)].into_iter().collect();

    let paid: RankingSet = vec![
        (paid_math, contract("ann", PlaceType::Pending, 280, 1)),
        (paid_math, contract("bob", PlaceType::Pending, 270, 1)),
        (paid_math, contract("eve", PlaceType::Signed, 150, 3)),
        (paid_physics, contract("dan", PlaceType::Pending, 250, 1)),
        (paid_physics, contract("bob", PlaceType::Pending, 270, 2)),
    ]
    .into_iter()
    .collect();
    let paid_seats: ProgramCapacity = [(paid_math, 2), (paid_physics, 1)].into_iter().collect();

    let sim = Simulation::new(
        PhaseInput::new(budget, budget_seats),
        PhaseInput::new(paid, paid_seats),
    );
    let report = sim.run().unwrap();

    // ann takes math; bob's first choice is full and physics goes to cat.
    assert_eq!(ids(&report.budget, math), vec!["ann"]);
    assert_eq!(ids(&report.budget, physics), vec!["cat"]);
    assert_eq!(report.admitted.len(), 2);

    // eve's signed contract comes first; bob fills the last paid math seat.
    assert_eq!(ids(&report.contract, paid_math), vec!["eve", "bob"]);
    // bob may also hold a paid physics seat, but dan ranks ahead of him there.
    assert_eq!(ids(&report.contract, paid_physics), vec!["dan"]);

    let placements = report.placements_of(&ApplicantId::new("bob"));
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].phase, Phase::Contract);
    assert_eq!(placements[0].rank, 2);

    for (_, entries) in report.budget.iter() {
        assert!(is_admission_ordered(entries));
    }
}

/// Malformed records fail validation instead of turning into zeros.
#[test]
fn missing_score_is_a_validation_error() {
    let json = r#"{
        "budget": [
            { "id": 1, "capacity": 3, "records": [
                { "identifier": "A", "score": 0, "priority": 1 },
                { "identifier": "B", "priority": 1 }
            ] }
        ]
    }"#;
    let file: RoundFile = serde_json::from_str(json).unwrap();
    let err = file.load().unwrap_err();
    assert_eq!(
        err,
        ValidationError::MissingField {
            program: ProgramId::new(1),
            index: 1,
            field: "score",
        }
    );
}

/// Contract records must say whether the contract is signed.
#[test]
fn contract_record_without_place_type_fails_the_round() {
    let json = r#"{
        "budget": [],
        "contract": [
            { "id": 101, "capacity": 3, "records": [
                { "identifier": "A", "score": 200, "priority": 1 }
            ] }
        ]
    }"#;
    let file: RoundFile = serde_json::from_str(json).unwrap();
    let round = file.load().unwrap();
    assert!(matches!(
        round.simulation.run(),
        Err(ValidationError::MissingPlaceType { .. })
    ));
}

/// Test JSON serialization of a simulation report.
#[test]
fn report_serializes() {
    let p1 = ProgramId::new(1);
    let rankings: RankingSet = vec![(p1, ApplicantRecord::new("A", 100, 1))]
        .into_iter()
        .collect();
    let sim = Simulation::new(
        PhaseInput::new(rankings, [(p1, 1)].into_iter().collect()),
        PhaseInput::default(),
    );
    let report = sim.run().unwrap();
    let json = serde_json::to_string_pretty(&report).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["budget"]["1"][0]["identifier"], "A");
    assert_eq!(parsed["admitted"][0], "A");
    assert!(parsed.get("contract").is_some());
}

//! Two-phase admission example.
//!
//! Budget seats are allocated across all programs first; applicants left
//! without one then compete for paid seats behind already signed contracts.

use admission_engine::allocation::budget::BudgetAllocator;
use admission_engine::allocation::contract::ContractAllocator;
use admission_engine::core::applicant::{ApplicantId, ApplicantRecord, PlaceType};
use admission_engine::core::program::{ProgramCapacity, ProgramId};
use admission_engine::core::ranking::RankingSet;

fn main() {
    println!("╔════════════════════════════════════════════════╗");
    println!("║  admission-engine: Two-Phase Admission Example ║");
    println!("╚════════════════════════════════════════════════╝\n");

    let informatics = ProgramId::new(2);
    let economics = ProgramId::new(7);
    let paid_informatics = ProgramId::new(102);

    // --- Phase 1: Budget seats ---
    println!("━━━ Phase 1: Budget Seats ━━━\n");

    let mut budget = RankingSet::new();
    budget.add(informatics, ApplicantRecord::new("101-202-303 11", 281, 1));
    budget.add(informatics, ApplicantRecord::new("404-505-606 22", 275, 1));
    budget.add(informatics, ApplicantRecord::new("707-808-909 33", 290, 2));
    budget.add(economics, ApplicantRecord::new("707-808-909 33", 290, 1));
    budget.add(economics, ApplicantRecord::new("404-505-606 22", 275, 2));
    budget.add(economics, ApplicantRecord::new("121-232-343 44", 240, 1));

    let mut budget_seats = ProgramCapacity::new();
    budget_seats.set(informatics, 1);
    budget_seats.set(economics, 1);

    let outcome = BudgetAllocator::allocate(&budget, &budget_seats);
    println!("{}", outcome.result);

    // --- Phase 2: Contract seats ---
    println!("━━━ Phase 2: Contract Seats ━━━\n");

    let mut contract = RankingSet::new();
    contract.add(
        paid_informatics,
        ApplicantRecord::new("555-666-777 55", 190, 1).with_place_type(PlaceType::Signed),
    );
    contract.add(
        paid_informatics,
        ApplicantRecord::new("404-505-606 22", 275, 1).with_place_type(PlaceType::Pending),
    );
    contract.add(
        paid_informatics,
        ApplicantRecord::new("121-232-343 44", 240, 2).with_place_type(PlaceType::Pending),
    );
    contract.add(
        paid_informatics,
        ApplicantRecord::new("101-202-303 11", 281, 2).with_place_type(PlaceType::Pending),
    );

    let mut contract_seats = ProgramCapacity::new();
    contract_seats.set(paid_informatics, 2);

    let result = match ContractAllocator::allocate(&outcome.admitted, &contract, &contract_seats) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("contract phase failed: {}", e);
            return;
        }
    };
    println!("{}", result);

    // Where did everybody end up?
    println!("━━━ Placements ━━━\n");
    for id in [
        "101-202-303 11",
        "404-505-606 22",
        "707-808-909 33",
        "121-232-343 44",
        "555-666-777 55",
    ] {
        let applicant = ApplicantId::new(id);
        let budget_programs = outcome.result.programs_of(&applicant);
        let contract_programs = result.programs_of(&applicant);
        let status = match (budget_programs.first(), contract_programs.first()) {
            (Some(p), _) => format!("budget seat in program {}", p),
            (None, Some(p)) => format!("contract seat in program {}", p),
            (None, None) => "not admitted".to_string(),
        };
        println!("  {:<16} {}", applicant, status);
    }
}

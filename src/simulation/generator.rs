//! Random admission rounds for stress testing and benchmarks.
//!
//! Generates rankings in which every applicant applies to a handful of
//! programs with distinct priorities, the way real preference lists look.

use crate::core::applicant::{ApplicantRecord, PlaceType};
use crate::core::program::{ProgramCapacity, ProgramId};
use crate::core::ranking::RankingSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Configuration for generating a random admission round.
#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Number of programs.
    pub program_count: u32,
    /// Id of the first program; the rest follow consecutively.
    pub first_program_id: u32,
    /// Number of distinct applicants.
    pub applicant_count: usize,
    /// Maximum number of programs each applicant applies to.
    pub max_choices: usize,
    /// Inclusive score range.
    pub min_score: i32,
    pub max_score: i32,
    /// Inclusive seat range per program.
    pub min_seats: u32,
    pub max_seats: u32,
    /// Tag records with a place type; this share of them is `Signed`.
    pub signed_share: Option<f64>,
    /// Seed for reproducible rounds.
    pub seed: u64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            program_count: 10,
            first_program_id: 1,
            applicant_count: 200,
            max_choices: 5,
            min_score: 100,
            max_score: 300,
            min_seats: 5,
            max_seats: 25,
            signed_share: None,
            seed: 42,
        }
    }
}

/// Generate rankings and seat counts for a random admission round.
///
/// The same configuration always yields the same round.
pub fn generate_rankings(config: &RankingConfig) -> (RankingSet, ProgramCapacity) {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut rankings = RankingSet::new();

    let programs: Vec<ProgramId> = (0..config.program_count)
        .map(|i| ProgramId::new(config.first_program_id + i))
        .collect();

    let capacities: ProgramCapacity = programs
        .iter()
        .map(|&p| {
            let max_seats = config.max_seats.max(config.min_seats);
            (p, rng.gen_range(config.min_seats..=max_seats))
        })
        .collect();
    for &program in &programs {
        rankings.add_program(program);
    }

    if programs.is_empty() {
        return (rankings, capacities);
    }

    let max_score = config.max_score.max(config.min_score);
    let max_choices = config.max_choices.clamp(1, programs.len());

    for i in 0..config.applicant_count {
        let identifier = registration_number(i);
        let score = rng.gen_range(config.min_score..=max_score);
        let choices = rng.gen_range(1..=max_choices);

        for (priority, &program) in programs.choose_multiple(&mut rng, choices).enumerate() {
            let mut record = ApplicantRecord::new(identifier.as_str(), score, priority as i32 + 1);
            if let Some(share) = config.signed_share {
                let place_type = if rng.gen_bool(share.clamp(0.0, 1.0)) {
                    PlaceType::Signed
                } else {
                    PlaceType::Pending
                };
                record = record.with_place_type(place_type);
            }
            rankings.add(program, record);
        }
    }

    (rankings, capacities)
}

/// Registration-number-like identifier, e.g. `000-001-234 70`.
fn registration_number(i: usize) -> String {
    format!(
        "{:03}-{:03}-{:03} {:02}",
        i / 1_000_000 % 1000,
        i / 1000 % 1000,
        i % 1000,
        i % 97
    )
}

//! admission-engine CLI
//!
//! Simulate admission rounds from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Simulate both phases of a round file
//! admission-engine simulate --input round.json
//!
//! # Output as JSON
//! admission-engine simulate --input round.json --format json
//!
//! # Where does an applicant stand?
//! admission-engine lookup --input round.json --id "123-456-789 01"
//!
//! # Generate a random round for testing
//! admission-engine generate --programs 10 --applicants 300
//! ```

use admission_engine::allocation::result::AllocationResult;
use admission_engine::core::applicant::ApplicantId;
use admission_engine::core::program::{ProgramCapacity, ProgramId};
use admission_engine::simulation::generator::{generate_rankings, RankingConfig};
use admission_engine::simulation::input::{LoadedRound, RoundFile};
use admission_engine::simulation::run::{PhaseInput, SimulationReport};
use chrono::{DateTime, Utc};
use log::debug;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"admission-engine — deterministic seat allocation for admission rounds

USAGE:
    admission-engine <COMMAND> [OPTIONS]

COMMANDS:
    simulate    Run the budget and contract phases of a round file
    lookup      Show an applicant's rankings and simulated placement
    generate    Generate a random round file (for testing)
    help        Show this message

OPTIONS (simulate):
    --input <FILE>      Path to JSON round file
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (lookup):
    --input <FILE>      Path to JSON round file
    --id <APPLICANT>    Applicant identifier

OPTIONS (generate):
    --programs <N>            Number of budget programs (default: 10)
    --contract-programs <N>   Number of contract programs (default: 0)
    --applicants <N>          Number of applicants (default: 200)
    --seed <N>                Random seed (default: 42)
    --output <FILE>           Write to file instead of stdout

Set RUST_LOG=debug for allocation details.

EXAMPLES:
    admission-engine simulate --input round.json
    admission-engine simulate --input round.json --format json
    admission-engine lookup --input round.json --id "123-456-789 01"
    admission-engine generate --programs 5 --contract-programs 3 --output round.json"#
    );
}

/// JSON output schema for a simulation run.
#[derive(serde::Serialize)]
struct SimulationOutput {
    generated_at: DateTime<Utc>,
    budget: Vec<ProgramOutput>,
    contract: Vec<ProgramOutput>,
}

#[derive(serde::Serialize)]
struct ProgramOutput {
    id: ProgramId,
    name: String,
    updated_at: String,
    capacity: u32,
    admitted: Vec<AdmissionOutput>,
}

#[derive(serde::Serialize)]
struct AdmissionOutput {
    rank: usize,
    identifier: String,
    score: i32,
    priority: i32,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn load_round(path: &str) -> LoadedRound {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("reading file '{}': {}", path, e)));

    let file: RoundFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "budget": [
    {{ "id": 7, "name": "Software Engineering", "capacity": 25,
       "records": [ {{ "identifier": "123-456-789 01", "score": 271, "priority": 1 }} ] }}
  ],
  "contract": [
    {{ "id": 107, "capacity": 10,
       "records": [ {{ "identifier": "123-456-789 02", "score": 240, "priority": 1, "place_type": "pending" }} ] }}
  ]
}}"#
        );
        process::exit(1);
    });

    let round = file
        .load()
        .unwrap_or_else(|e| fail(format!("invalid round file: {}", e)));
    debug!(
        "loaded {} budget and {} contract records from '{}'",
        round.simulation.budget.rankings.record_count(),
        round.simulation.contract.rankings.record_count(),
        path
    );
    round
}

fn run_round(round: &LoadedRound) -> SimulationReport {
    round
        .simulation
        .run()
        .unwrap_or_else(|e| fail(format!("simulation failed: {}", e)))
}

/// Parse `--flag value` pairs; every flag must be one of `allowed`.
fn parse_options(args: &[String], allowed: &[&str]) -> Vec<(String, String)> {
    let mut options = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        if !allowed.contains(&flag) {
            fail(format!("unknown option: {}", flag));
        }
        i += 1;
        let value = args
            .get(i)
            .cloned()
            .unwrap_or_else(|| fail(format!("{} requires a value", flag)));
        options.push((flag.to_string(), value));
        i += 1;
    }
    options
}

fn option<'a>(options: &'a [(String, String)], flag: &str) -> Option<&'a str> {
    options
        .iter()
        .rev()
        .find(|(f, _)| f == flag)
        .map(|(_, v)| v.as_str())
}

fn numeric_option<T: std::str::FromStr>(options: &[(String, String)], flag: &str, default: T) -> T {
    match option(options, flag) {
        None => default,
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| fail(format!("{} requires a number, got '{}'", flag, raw))),
    }
}

fn program_outputs(
    round: &LoadedRound,
    result: &AllocationResult,
    capacities: &ProgramCapacity,
) -> Vec<ProgramOutput> {
    result
        .iter()
        .map(|(program, entries)| {
            let info = round.info(program);
            ProgramOutput {
                id: program,
                name: info.display_name(program),
                updated_at: info.display_updated_at().to_string(),
                capacity: capacities.get(program),
                admitted: entries
                    .iter()
                    .enumerate()
                    .map(|(i, e)| AdmissionOutput {
                        rank: i + 1,
                        identifier: e.identifier.to_string(),
                        score: e.score,
                        priority: e.priority,
                    })
                    .collect(),
            }
        })
        .collect()
}

fn print_phase(title: &str, round: &LoadedRound, result: &AllocationResult, capacities: &ProgramCapacity) {
    println!("━━━ {} ━━━", title);
    println!(
        "Seats filled: {} of {} across {} programs\n",
        result.total_admitted(),
        capacities.total(),
        result.len()
    );
    for program in program_outputs(round, result, capacities) {
        println!(
            "--- {} - {} ({}/{} seats, updated {}) ---",
            program.id,
            program.name,
            program.admitted.len(),
            program.capacity,
            program.updated_at
        );
        for entry in &program.admitted {
            println!(
                "  {:>4}. {:<20} score {:>4}  priority {}",
                entry.rank, entry.identifier, entry.score, entry.priority
            );
        }
        println!();
    }
}

fn cmd_simulate(args: &[String]) {
    let options = parse_options(args, &["--input", "--format"]);
    let path = option(&options, "--input")
        .unwrap_or_else(|| fail("--input <FILE> is required"));
    let format = option(&options, "--format").unwrap_or("text");

    let round = load_round(path);
    let report = run_round(&round);
    let sim = &round.simulation;

    match format {
        "json" => {
            let output = SimulationOutput {
                generated_at: Utc::now(),
                budget: program_outputs(&round, &report.budget, &sim.budget.capacities),
                contract: program_outputs(&round, &report.contract, &sim.contract.capacities),
            };
            let json = serde_json::to_string_pretty(&output)
                .unwrap_or_else(|e| fail(format!("serializing report: {}", e)));
            println!("{}", json);
        }
        "text" => {
            print_phase("Budget Phase", &round, &report.budget, &sim.budget.capacities);
            print_phase("Contract Phase", &round, &report.contract, &sim.contract.capacities);
        }
        other => fail(format!("--format requires 'text' or 'json', got '{}'", other)),
    }
}

fn cmd_lookup(args: &[String]) {
    let options = parse_options(args, &["--input", "--id"]);
    let path = option(&options, "--input")
        .unwrap_or_else(|| fail("--input <FILE> is required"));
    let applicant = ApplicantId::new(
        option(&options, "--id").unwrap_or_else(|| fail("--id <APPLICANT> is required")),
    );

    let round = load_round(path);
    let report = run_round(&round);

    let phases = [
        ("budget", &round.simulation.budget),
        ("contract", &round.simulation.contract),
    ];
    let mut found = false;
    println!("Applicant {}\n", applicant);
    for (phase, input) in phases {
        for standing in input.rankings.lookup(&applicant) {
            found = true;
            let r = standing.record;
            println!(
                "  {:<8} program {:<5} {:<30} score {:>4}  priority {}  place {}  originals {}",
                phase,
                standing.program,
                round.info(standing.program).display_name(standing.program),
                r.score(),
                r.priority(),
                r.place_type().map_or("-", |t| t.as_str()),
                if r.has_originals() { "yes" } else { "no" }
            );
        }
    }
    if !found {
        println!("  Not found in any ranking.");
        return;
    }

    let placements = report.placements_of(&applicant);
    println!();
    if placements.is_empty() {
        println!("Simulated placement: none");
    }
    for p in placements {
        println!(
            "Simulated placement: {} seat in program {} ({}), rank {}",
            p.phase,
            p.program,
            round.info(p.program).display_name(p.program),
            p.rank
        );
    }
}

fn cmd_generate(args: &[String]) {
    let options = parse_options(
        args,
        &["--programs", "--contract-programs", "--applicants", "--seed", "--output"],
    );
    let programs: u32 = numeric_option(&options, "--programs", 10);
    let contract_programs: u32 = numeric_option(&options, "--contract-programs", 0);
    let applicants: usize = numeric_option(&options, "--applicants", 200);
    let seed: u64 = numeric_option(&options, "--seed", 42);

    let (budget_rankings, budget_seats) = generate_rankings(&RankingConfig {
        program_count: programs,
        applicant_count: applicants,
        seed,
        ..Default::default()
    });
    let (contract_rankings, contract_seats) = generate_rankings(&RankingConfig {
        program_count: contract_programs,
        first_program_id: programs + 1,
        applicant_count: applicants,
        signed_share: Some(0.2),
        seed: seed.wrapping_add(1),
        ..Default::default()
    });

    let file = RoundFile::from_phases(
        &PhaseInput::new(budget_rankings, budget_seats),
        &PhaseInput::new(contract_rankings, contract_seats),
    );
    let json = serde_json::to_string_pretty(&file)
        .unwrap_or_else(|e| fail(format!("serializing round: {}", e)));

    match option(&options, "--output") {
        Some(path) => {
            fs::write(path, &json)
                .unwrap_or_else(|e| fail(format!("writing to '{}': {}", path, e)));
            eprintln!(
                "Generated {} budget and {} contract programs for {} applicants → {}",
                programs, contract_programs, applicants, path
            );
        }
        None => println!("{}", json),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "simulate" => cmd_simulate(rest),
        "lookup" => cmd_lookup(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gentzen::prelude::*;

/// Decide whether a propositional formula is a tautology and print its sequent proof.
#[derive(Parser)]
struct Args {
    /// Formula over variables with `!`, `&&`, `||` and `->`, e.g. "p -> (q -> p)".
    formula: String,

    /// TOML file with parser limits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print the verdict.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match args.config.as_deref().map(ProverConfig::load_from_toml) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        None => ProverConfig::default(),
    };

    let proof = match prove_with(&args.formula, &config) {
        Ok(proof) => proof,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if !args.quiet {
        if let Err(e) = proof.pretty_print() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        println!();
    }

    if proof.is_tautology() {
        println!("tautology");
    } else {
        println!("not a tautology");
        for model in proof.counter_models() {
            let assignment: Vec<String> = model.iter().map(|(v, b)| format!("{v}={b}")).collect();
            println!("  counter-model: {}", assignment.join(", "));
        }
    }
    ExitCode::SUCCESS
}

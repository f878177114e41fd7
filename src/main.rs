use std::process::ExitCode;

use clap::Parser;
use zone_watch::{Cli, RunOutcome, outcome_exit_code, run_app};

fn main() -> ExitCode {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    // C. Run once
    let outcome = match run_app(&args) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("⚠️  Run failed: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    // D. Hand the outcome on
    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("⚠️  Failed to serialize outcome: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else if let RunOutcome::Classified(result) = &outcome {
        println!("{}", result);
    }

    ExitCode::from(outcome_exit_code(&outcome, args.strict))
}

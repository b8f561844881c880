#![forbid(unsafe_code)]

//! growtext demo binary entry point.

use growtext_demo::app::DemoModel;
use growtext_demo::{cli, logging};
use growtext_runtime::{Program, ProgramConfig};

fn main() {
    let opts = cli::Opts::parse();
    let _log_guard = match logging::init_from_env() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to open log file: {e}");
            std::process::exit(1);
        }
    };

    let model = DemoModel::new(&opts);
    match Program::with_config(model, ProgramConfig::default()) {
        Ok(mut program) => {
            if let Err(e) = program.run() {
                tracing::error!(error = %e, "runtime error");
                eprintln!("Runtime error: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Failed to initialize: {e}");
            std::process::exit(1);
        }
    }
}

/// piston-loadtest - Load tester for code execution APIs.
///
/// Checks the target is online, then runs escalating request waves and prints latency
/// summaries.
use clap::Parser;
use piston_loadtest::cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use std::{env, path::PathBuf, process};

use cashbook::{
    cli::{self, shell::ShellError},
    config,
    ledger::Ledger,
};

fn main() {
    cashbook::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), ShellError> {
    let path = match env::args().nth(1).as_deref() {
        Some("-h") | Some("--help") => {
            print_usage();
            return Ok(());
        }
        Some(path) => PathBuf::from(path),
        None => config::default_ledger_path(),
    };

    let ledger = Ledger::open(path);
    cli::run_shell(ledger)
}

fn print_usage() {
    println!("Usage: cashbook [LEDGER_FILE]");
    println!();
    println!(
        "Opens the given ledger file (default: {}) and starts the shell.",
        config::default_ledger_path().display()
    );
    println!();
    println!("Environment:");
    println!(
        "  {:<16} directory for the default ledger file",
        config::DATA_DIR_ENV
    );
    println!(
        "  {:<16} read commands from stdin without line editing",
        cli::shell::SCRIPT_MODE_ENV
    );
}

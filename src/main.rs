//! access: is an operation on a ref of a repository permitted for a user?
//!
//! Usage: `access [-q|-s] <repo> <user> [<perm> [<ref>]]`
//!
//! Exit status 0 means allowed, 1 denied, 2 bad usage, 3 a corrupt or
//! unreadable rule base.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use refgate::cli::{self, Args};
use refgate::config::Config;
use refgate::eval::RuleEngine;
use refgate::trace::{AdminDir, ConfLineCache, RuleRegistry};
use refgate::{Result, logging};

fn run(args: &Args, config: &Config) -> Result<u8> {
    // Usage problems are reported before anything is loaded
    args.mode()?;
    args.query()?;

    let engine = RuleEngine::load(&config.rules_path())?;
    let registry = RuleRegistry::new(config.registry_path());
    let mut cache = ConfLineCache::new(AdminDir::new(config.admin_base()));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    cli::run(
        args,
        &engine,
        &registry,
        &mut cache,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = Config::load();
    logging::init(&config);

    match run(&args, &config) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("access: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

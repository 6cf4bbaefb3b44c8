//! # Forest
//!
//! Plants the scenario's trees and draws them. Trees of the same species
//! share one `TreeType`.
//!
//! ```bash
//! # Bundled scenario, with pool hits and misses
//! ./forest --verbose
//!
//! # Custom scenario
//! ./forest my_forest.toml
//! ```

use std::process::ExitCode;

use flyweight_core::FlyweightResult;
use flyweight_demos::{Options, TextCanvas};

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: forest [-v | --verbose] [SCENARIO.toml]");
            return ExitCode::FAILURE;
        }
    };
    options.init_tracing();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "forest scenario failed");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> FlyweightResult<()> {
    let config = options.load_scenario()?;
    let forest = config.forest()?.build()?;

    let mut canvas = TextCanvas::new();
    forest.draw(&mut canvas);

    println!("Drawing forest:");
    for line in canvas.lines() {
        println!("{line}");
    }
    println!();
    println!(
        "{} trees, {} tree types",
        forest.trees().len(),
        forest.tree_types().len()
    );
    println!("{}", forest.tree_types().listing());

    Ok(())
}

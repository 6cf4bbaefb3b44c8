//! # Police Database
//!
//! Loads the scenario's vehicle models into the pool, then adds each car.
//! Cars of the same brand/model/color share one `VehicleModel`.
//!
//! ```bash
//! ./police_database --verbose
//! ```

use std::process::ExitCode;

use flyweight_core::FlyweightResult;
use flyweight_demos::Options;

fn main() -> ExitCode {
    let options = match Options::parse(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: police_database [-v | --verbose] [SCENARIO.toml]");
            return ExitCode::FAILURE;
        }
    };
    options.init_tracing();

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "police database scenario failed");
            ExitCode::FAILURE
        }
    }
}

fn run(options: &Options) -> FlyweightResult<()> {
    let config = options.load_scenario()?;
    let scenario = config.registry()?;
    let mut db = scenario.database()?;

    println!("{}", db.listing());

    for car in &scenario.cars {
        println!();
        println!("Client: Adding a car to database.");
        let record = db.add_car(&car.plates, &car.owner, &car.brand, &car.model, &car.color)?;
        println!("{}", record.describe());
    }

    println!();
    println!("{}", db.listing());

    let stats = db.models().stats();
    println!(
        "{} cars, {} reused, {} created",
        db.records().len(),
        stats.hits,
        stats.misses
    );

    Ok(())
}

//! CLI smoke entry point.
//!
//! Opens the store described by `MEALSTORE_*` variables and prints
//! row counts, to check core wiring without the web layer.

use mealstore_core::db::open_with_config;
use mealstore_core::{core_version, init_logging, RecordStore, SqliteRecordStore, StoreConfig};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("mealstore: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = StoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_ref() {
        let log_dir = log_dir
            .to_str()
            .ok_or("MEALSTORE_LOG_DIR must be valid UTF-8")?;
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_with_config(&config)?;
    let store = SqliteRecordStore::try_new(&conn)?;
    print_counts(&store)
}

fn print_counts(store: impl RecordStore) -> Result<(), Box<dyn Error>> {
    println!("mealstore_core version={}", core_version());
    println!("meals={}", store.list_meals()?.len());
    println!("orders={}", store.list_orders()?.len());
    println!("customers={}", store.list_customers()?.len());
    Ok(())
}

//! Command-line probe for a Quill database.
//!
//! Reads configuration from `QUILL_*` environment variables, initializes
//! logging, opens (and migrates) the database and prints a short summary.

use quill_core::db::migrations::current_version;
use quill_core::{init_from_config, App, AppConfig, DbLocation};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("quill: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let logging_enabled = init_from_config(&config)?;
    let conn = config.open_db()?;
    let app = App::new(&conn)?;

    println!("quill_core ping={}", quill_core::ping());
    println!("quill_core version={}", quill_core::core_version());
    match &config.db {
        DbLocation::Memory => println!("db=:memory:"),
        DbLocation::File(path) => println!("db={}", path.display()),
    }
    println!("schema_version={}", current_version(&conn)?);
    println!("articles={}", app.articles().count()?);
    println!("logging={}", if logging_enabled { config.log_level } else { "off" });

    log::info!("event=cli_probe module=cli status=ok");
    Ok(())
}

//! Command line tool to retrieve and parse GPS YUMA almanacs.
//! Homepage: <https://github.com/rtk-rs/yuma>
mod cli; // command line interface
mod report;

use cli::Cli;
use report::summary;

use env_logger::{Builder, Target};

#[macro_use]
extern crate log;

use thiserror::Error;

use yuma::prelude::{AlmanacTable, LocalArchive, Locator};

#[derive(Debug, Error)]
pub enum Error {
    #[error("yuma error: {0}")]
    YumaError(#[from] yuma::prelude::Error),
    #[error("json export error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("system time error: {0}")]
    SystemTime(String),
}

/*
 * Parses all local files passed by User,
 * skips the ones we cannot make sense of
 */
fn user_data_parsing(cli: &Cli) -> Vec<AlmanacTable> {
    let mut tables = Vec::new();
    for path in cli.input_paths() {
        match AlmanacTable::from_file(path) {
            Ok(table) => {
                info!("loaded \"{}\"", path.display());
                tables.push(table);
            },
            Err(e) => error!("failed to parse \"{}\": {}", path.display(), e),
        }
    }
    tables
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let mut tables = user_data_parsing(&cli);

    if let Some(root) = cli.archive() {
        let date = cli.date()?;
        let mut locator = Locator::new(LocalArchive::new(&root)).with_policy(cli.policy());
        let located = locator.locate(date)?;
        if located.is_fallback() {
            warn!(
                "nothing published on {}, using {}",
                date, located.resolution.date
            );
        }
        tables.push(located.parse()?);
    }

    for table in tables.iter() {
        if cli.yuma() {
            print!("{}", table);
        } else if cli.json() {
            println!("{}", serde_json::to_string_pretty(table)?);
        }
        if !cli.quiet() {
            summary(table);
        }
    }
    Ok(())
}

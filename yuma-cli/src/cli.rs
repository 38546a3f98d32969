use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use yuma::prelude::{AlmanacDate, Epoch, LocatorPolicy};

use crate::Error;

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("yuma")
                    .author("Guillaume W. Bres, <guillaume.bressaix@gmail.com>")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("GPS YUMA almanac retrieval and parsing")
                    .arg_required_else_help(true)
                    .color(ColorChoice::Always)
                    .arg(Arg::new("filepath")
                        .short('f')
                        .long("fp")
                        .value_name("FILE")
                        .action(ArgAction::Append)
                        .required_unless_present("archive")
                        .help("Local YUMA file to parse. Use as many as needed.
Gzip compressed files (.gz) are supported.
The publication date is recovered from yumaAlmanac_YYYY-MM-DD.alm file names."))
                .next_help_heading("Retrieval")
                    .arg(Arg::new("archive")
                        .short('a')
                        .long("archive")
                        .value_name("DIR")
                        .help("Local almanac archive, organized like NAVCEN: {DIR}/{year}/Yuma/{doy}.alm"))
                    .arg(Arg::new("date")
                        .short('d')
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .requires("archive")
                        .help("Almanac date. Defaults to today (UTC)."))
                    .arg(Arg::new("lookback")
                        .long("lookback")
                        .value_name("DAYS")
                        .value_parser(value_parser!(u16))
                        .requires("archive")
                        .help("Preceding days searched when nothing is published on --date (default 7)."))
                    .arg(Arg::new("attempts")
                        .long("attempts")
                        .value_name("N")
                        .value_parser(value_parser!(u8))
                        .requires("archive")
                        .help("Attempts per day on archive access failures (default 3)."))
                .next_help_heading("Output")
                    .arg(Arg::new("yuma")
                        .long("yuma")
                        .action(ArgAction::SetTrue)
                        .help("Formats decoded almanacs back to YUMA."))
                    .arg(Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("yuma")
                        .help("Exports decoded almanacs as JSON."))
                    .arg(Arg::new("quiet")
                        .short('q')
                        .long("quiet")
                        .action(ArgAction::SetTrue)
                        .help("Disable the summary report."))
                    .get_matches()
            },
        }
    }
    /// Local files to parse
    pub fn input_paths(&self) -> Vec<&Path> {
        if let Some(fp) = self.matches.get_many::<String>("filepath") {
            fp.map(Path::new).collect()
        } else {
            Vec::new()
        }
    }
    pub fn archive(&self) -> Option<PathBuf> {
        self.matches.get_one::<String>("archive").map(PathBuf::from)
    }
    /// Requested date, defaults to today
    pub fn date(&self) -> Result<AlmanacDate, Error> {
        match self.matches.get_one::<String>("date") {
            Some(date) => Ok(AlmanacDate::from_str(date)?),
            None => {
                let now = Epoch::now().map_err(|e| Error::SystemTime(e.to_string()))?;
                Ok(AlmanacDate::from_epoch(now))
            },
        }
    }
    pub fn policy(&self) -> LocatorPolicy {
        let mut policy = LocatorPolicy::default();
        if let Some(days) = self.matches.get_one::<u16>("lookback") {
            policy = policy.with_lookback_days(*days);
        }
        if let Some(attempts) = self.matches.get_one::<u8>("attempts") {
            policy = policy.with_transport_attempts(*attempts);
        }
        policy
    }
    pub fn yuma(&self) -> bool {
        self.matches.get_flag("yuma")
    }
    pub fn json(&self) -> bool {
        self.matches.get_flag("json")
    }
    pub fn quiet(&self) -> bool {
        self.matches.get_flag("quiet")
    }
}

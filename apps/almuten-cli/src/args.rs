use anyhow::Context;
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Cli {
    /// Settings file (default: configs/almuten.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use the built-in mean-orbit ephemeris instead of Swiss Ephemeris files.
    #[arg(long, global = true, default_value_t = false)]
    pub analytic: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Natal chart with positions, dignities, aspects and lots.
    Chart(BirthArgs),
    /// Hyleg and Alcochoden.
    Hyleg(BirthArgs),
    Temperament(BirthArgs),
    Mentality(BirthArgs),
    /// Solar Return chart for a year, compared with the natal chart.
    SolarReturn {
        #[command(flatten)]
        birth: BirthArgs,
        #[arg(long)]
        year: i32,
        /// Cast the return for another latitude (default: birth place).
        #[arg(long, requires = "return_lon", allow_hyphen_values = true)]
        return_lat: Option<f64>,
        #[arg(long, requires = "return_lat", allow_hyphen_values = true)]
        return_lon: Option<f64>,
    },
    /// Past, current and next Saturn returns.
    SaturnReturn {
        #[command(flatten)]
        birth: BirthArgs,
        /// Reference date YYYY-MM-DD (default: today).
        #[arg(long)]
        as_of: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct BirthArgs {
    /// Local birth time, YYYY-MM-DDTHH:MM[:SS].
    #[arg(long)]
    pub date: String,

    /// UTC or a fixed offset such as +02:00.
    #[arg(long, default_value = "UTC")]
    pub tz: String,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// Overrides the configured house system.
    #[arg(long)]
    pub house_system: Option<String>,
}

pub(crate) fn parse_local_datetime(text: &str) -> anyhow::Result<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .with_context(|| format!("invalid --date {text:?} (expected YYYY-MM-DDTHH:MM[:SS])"))
}

pub(crate) fn parse_date(text: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid date {text:?} (expected YYYY-MM-DD)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_subcommand_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "almuten", "--analytic", "solar-return", "--date", "1990-05-01T08:15", "--lat", "40.7",
            "--lon", "-74.0", "--year", "2024",
        ])
        .unwrap();
        assert!(cli.analytic);
        match cli.command {
            Command::SolarReturn { birth, year, .. } => {
                assert_eq!(year, 2024);
                assert_eq!(birth.lon, -74.0);
                assert_eq!(birth.tz, "UTC");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_datetime_formats() {
        assert!(parse_local_datetime("1990-05-01T08:15").is_ok());
        assert!(parse_local_datetime("1990-05-01 08:15:30").is_ok());
        assert!(parse_local_datetime("05/01/1990").is_err());
        assert!(parse_date("2030-02-30").is_err());
    }
}

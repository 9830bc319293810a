mod args;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use serde_json::json;
use std::str::FromStr;

use almuten::{
    compute_mentality, compute_temperament, saturn_return_analysis, solar_return, BirthData, Body,
    Chart, ChartBuilder, EphemerisProvider, GeoLocation, HouseCuspProvider, HouseSystem, MeanOrbitEphemeris,
    SwissEphemerisAdapter,
};
use almuten::traditional::{resolve_alcochoden_with, resolve_hyleg_with};
use almuten_config::{load_settings, AlmutenSettings};

use crate::args::{parse_date, parse_local_datetime, BirthArgs, Cli, Command};

/// Positions and cusps come from one source.
enum Providers {
    Analytic(MeanOrbitEphemeris),
    Swiss(SwissEphemerisAdapter),
}

impl Providers {
    fn open(analytic: bool, settings: &AlmutenSettings) -> anyhow::Result<Self> {
        if analytic {
            log::info!("using mean-orbit ephemeris");
            return Ok(Providers::Analytic(MeanOrbitEphemeris::new()));
        }
        let adapter = SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
            .context("Swiss Ephemeris unavailable (pass --analytic to run without data files)")?;
        Ok(Providers::Swiss(adapter))
    }

    fn ephemeris(&self) -> &dyn EphemerisProvider {
        match self {
            Providers::Analytic(p) => p,
            Providers::Swiss(p) => p,
        }
    }

    fn houses(&self) -> &dyn HouseCuspProvider {
        match self {
            Providers::Analytic(p) => p,
            Providers::Swiss(p) => p,
        }
    }
}

fn birth_data(args: &BirthArgs) -> anyhow::Result<BirthData> {
    let datetime = parse_local_datetime(&args.date)?;
    let birth = BirthData::new(datetime, args.tz.clone(), args.lat, args.lon);
    Ok(match &args.house_system {
        Some(name) => birth.with_house_system(HouseSystem::from_str(name)?),
        None => birth,
    })
}

fn natal_chart(builder: &ChartBuilder<'_>, args: &BirthArgs) -> anyhow::Result<Chart> {
    let birth = birth_data(args)?;
    builder
        .build_chart(&birth)
        .with_context(|| format!("failed to build chart for {} {}", args.date, args.tz))
}

fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    let mut settings = load_settings(cli.config.as_deref())?;
    let providers = Providers::open(cli.analytic, &settings)?;
    if let Providers::Analytic(_) = providers {
        let configured = settings.chart.house_system;
        if !MeanOrbitEphemeris::supports(configured) {
            log::warn!(
                "{} houses need the Swiss Ephemeris; falling back to equal houses",
                configured
            );
            settings.chart.house_system = HouseSystem::Equal;
        }
    }
    let builder = ChartBuilder::new(providers.ephemeris(), providers.houses())
        .with_settings(settings.chart.clone());

    let value = match &cli.command {
        Command::Chart(birth) => serde_json::to_value(natal_chart(&builder, birth)?)?,
        Command::Hyleg(birth) => {
            let chart = natal_chart(&builder, birth)?;
            let calculator = builder.aspect_calculator();
            let hyleg = resolve_hyleg_with(&chart, &calculator);
            let alcochoden = resolve_alcochoden_with(&hyleg, &chart, &calculator);
            json!({ "hyleg": hyleg, "alcochoden": alcochoden })
        }
        Command::Temperament(birth) => {
            let chart = natal_chart(&builder, birth)?;
            serde_json::to_value(compute_temperament(&chart))?
        }
        Command::Mentality(birth) => {
            let chart = natal_chart(&builder, birth)?;
            let result = compute_mentality(&chart).context("chart has no Mercury position")?;
            serde_json::to_value(result)?
        }
        Command::SolarReturn {
            birth,
            year,
            return_lat,
            return_lon,
        } => {
            let natal = natal_chart(&builder, birth)?;
            let location = match (return_lat, return_lon) {
                (Some(lat), Some(lon)) => GeoLocation::new(*lat, *lon),
                _ => natal.location,
            };
            let result = solar_return(&builder, &natal, *year, location, &settings.returns)
                .with_context(|| format!("solar return for {year} failed"))?;
            serde_json::to_value(result)?
        }
        Command::SaturnReturn { birth, as_of } => {
            let natal = natal_chart(&builder, birth)?;
            let saturn = natal.position(Body::Saturn).context("chart has no Saturn position")?;
            let born = natal.instant.context("birth instant out of range")?;
            let as_of = match as_of {
                Some(text) => parse_date(text)?
                    .and_hms_opt(12, 0, 0)
                    .context("invalid --as-of")?
                    .and_utc(),
                None => Utc::now(),
            };
            let report = saturn_return_analysis(
                providers.ephemeris(),
                born,
                saturn.longitude,
                saturn.house,
                as_of,
                &settings.returns,
            )?;
            serde_json::to_value(report)?
        }
    };
    Ok(value)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let value = run(cli)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("almuten").chain(args.iter().copied()))
    }

    #[test]
    fn test_analytic_chart_falls_back_from_quadrant_houses() {
        let value = run(cli(&[
            "--analytic",
            "chart",
            "--date",
            "1990-06-15T14:30",
            "--lat",
            "51.5",
            "--lon",
            "-0.12",
        ]))
        .unwrap();
        assert_eq!(value["house_system"], "equal");
        assert_eq!(value["houses"].as_array().map(Vec::len), Some(12));
    }

    #[test]
    fn test_analytic_chart_rejects_an_explicit_quadrant_system() {
        let err = run(cli(&[
            "--analytic",
            "chart",
            "--date",
            "1990-06-15T14:30",
            "--lat",
            "51.5",
            "--lon",
            "-0.12",
            "--house-system",
            "placidus",
        ]))
        .unwrap_err();
        assert!(format!("{:#}", err).contains("supported: equal"), "{:#}", err);
    }
}

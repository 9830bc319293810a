use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use almuten::aspects::{AspectKind, OrbTable};
use almuten::{ChartSettings, HouseSystem, ReturnSearchConfig};

#[derive(Debug, Clone, Default)]
pub struct AlmutenSettings {
    pub chart: ChartSettings,
    pub returns: ReturnSearchConfig,
    /// Swiss Ephemeris data directory; `None` defers to the adapter's fallbacks
    pub ephemeris_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
    #[serde(default)]
    include_minor_aspects: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    chart: ChartToml,
    #[serde(default)]
    orbs: BTreeMap<String, f64>,
    #[serde(default)]
    returns: ReturnSearchConfig,
    #[serde(default)]
    ephemeris: EphemerisToml,
}

/// Try the common relative paths for `configs/almuten.toml`.
pub fn read_config_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/almuten.toml", "../../configs/almuten.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            log::debug!("loaded settings from {}", p);
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load almuten.toml from {:?}", paths);
}

/// Load settings from `path`, or from the default locations.
///
/// With no explicit path a missing file is not an error: defaults apply.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<AlmutenSettings> {
    let text = match path {
        Some(p) => fs::read_to_string(p)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", p.display()))?,
        None => match read_config_toml_text() {
            Ok(text) => text,
            Err(e) => {
                log::debug!("{e}; using default settings");
                return Ok(AlmutenSettings::default());
            }
        },
    };
    parse_settings(&text)
}

pub fn parse_settings(text: &str) -> anyhow::Result<AlmutenSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse almuten.toml: {e}"))?;
    let RootConfigToml {
        chart,
        orbs,
        returns,
        ephemeris,
    } = root;

    let mut settings = ChartSettings::default();
    if let Some(name) = chart.house_system {
        settings.house_system = HouseSystem::from_str(&name)
            .map_err(|e| anyhow::anyhow!("chart.house_system: {e}"))?;
    }
    if let Some(include) = chart.include_minor_aspects {
        settings.include_minor_aspects = include;
    }
    settings.orbs = merge_orbs(settings.orbs, &orbs)?;

    validate_returns(&returns)?;

    Ok(AlmutenSettings {
        chart: settings,
        returns,
        ephemeris_path: ephemeris.path,
    })
}

/// Overlay `[orbs]` entries on the default table.
fn merge_orbs(mut table: OrbTable, overrides: &BTreeMap<String, f64>) -> anyhow::Result<OrbTable> {
    for (name, orb) in overrides {
        let kind = AspectKind::from_str(name).map_err(|e| anyhow::anyhow!("orbs.{name}: {e}"))?;
        if !orb.is_finite() || *orb < 0.0 {
            anyhow::bail!("orbs.{name} must be a non-negative number, got {orb}");
        }
        table.set(kind, *orb);
    }
    Ok(table)
}

fn validate_returns(returns: &ReturnSearchConfig) -> anyhow::Result<()> {
    let saturn = &returns.saturn;
    if returns.solar.window_days <= 0.0 {
        anyhow::bail!("returns.solar.window_days must be positive");
    }
    if saturn.step_days <= 0.0 || saturn.window_days <= 0.0 {
        anyhow::bail!("returns.saturn step_days and window_days must be positive");
    }
    if saturn.period_years <= 0.0 {
        anyhow::bail!("returns.saturn.period_years must be positive");
    }
    for refine in [&returns.solar.refine, &saturn.refine] {
        if refine.tolerance_deg <= 0.0 || refine.max_iterations == 0 {
            anyhow::bail!("bisection tolerance and iteration cap must be positive");
        }
    }
    Ok(())
}

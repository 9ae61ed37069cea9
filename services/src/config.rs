use crate::error::{self, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use snafu::ResultExt;
use std::path::PathBuf;
use std::sync::{LazyLock, RwLock};
use wave_datatypes::primitives::Time;
use wave_datatypes::projection::Projection;

static SETTINGS: LazyLock<RwLock<Config>> = LazyLock::new(init_settings);

fn init_settings() -> RwLock<Config> {
    let mut settings = Config::builder();

    #[cfg(test)]
    let files = ["Settings-default.toml", "Settings-test.toml"];

    #[cfg(not(test))]
    let files = ["Settings-default.toml", "Settings.toml"];

    match retrieve_settings_dir() {
        Ok(dir) => {
            let files: Vec<File<_, _>> = files
                .iter()
                .map(|f| dir.join(f))
                .filter(|p| p.exists())
                .map(File::from)
                .collect();

            settings = settings.add_source(files);
        }
        Err(error) => {
            tracing::warn!("No settings directory found, using environment only: {error}");
        }
    }

    // Override config with environment variables that start with `WAVE__`,
    // e.g. `WAVE__LOGGING__LOG_SPEC=debug`
    // Note: Since variables contain underscores, we need to use something different
    // for separating groups, for instance double underscores `__`
    settings = settings.add_source(Environment::with_prefix("wave").separator("__"));

    RwLock::new(settings.build().unwrap_or_else(|error| {
        tracing::error!("Unable to load settings: {error}");
        Config::default()
    }))
}

/// Searches the working directory and its parents, since tests and binaries
/// may run in a crate subdirectory of the workspace.
fn retrieve_settings_dir() -> Result<PathBuf> {
    const MAX_PARENT_DIRS: usize = 1;

    let mut settings_dir = std::env::current_dir().context(error::MissingWorkingDirectory)?;

    for _ in 0..=MAX_PARENT_DIRS {
        if settings_dir.join("Settings-default.toml").exists() {
            return Ok(settings_dir);
        }

        // go to parent directory
        if !settings_dir.pop() {
            break;
        }
    }

    Err(error::Error::MissingSettingsDirectory)
}

#[cfg(test)]
pub fn set_config<T>(key: &str, value: T) -> Result<()>
where
    T: Into<config::Value>,
{
    let mut settings = SETTINGS
        .write()
        .map_err(|_error| error::Error::ConfigLockFailed)?;

    let builder = Config::builder()
        .add_source(settings.clone())
        .set_override(key, value)
        .context(error::Config)?;

    *settings = builder.build().context(error::Config)?;
    Ok(())
}

pub fn get_config<'a, T>(key: &str) -> Result<T>
where
    T: Deserialize<'a>,
{
    SETTINGS
        .read()
        .map_err(|_error| error::Error::ConfigLockFailed)?
        .get::<T>(key)
        .context(error::Config)
}

pub fn get_config_element<'a, T>() -> Result<T>
where
    T: ConfigElement + Deserialize<'a>,
{
    get_config(T::KEY)
}

pub trait ConfigElement {
    const KEY: &'static str;
}

/// The remote processing engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mapping {
    pub url: String,
    /// Asks the engine for debug output (`debug=1`)
    pub debug: bool,
}

impl ConfigElement for Mapping {
    const KEY: &'static str = "mapping";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Wms {
    pub version: String,
    pub format: String,
}

impl ConfigElement for Wms {
    const KEY: &'static str = "wms";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Wfs {
    pub version: String,
    pub format: String,
}

impl ConfigElement for Wfs {
    const KEY: &'static str = "wfs";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Wcs {
    pub service: String,
    pub version: String,
}

impl ConfigElement for Wcs {
    const KEY: &'static str = "wcs";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Plots {
    pub raster_width: u32,
    pub raster_height: u32,
}

impl ConfigElement for Plots {
    const KEY: &'static str = "plots";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Provenance {
    pub raster_width: u32,
    pub raster_height: u32,
}

impl ConfigElement for Provenance {
    const KEY: &'static str = "provenance";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Logging {
    pub log_spec: String,
}

impl ConfigElement for Logging {
    const KEY: &'static str = "logging";
}

/// Values for new projects and the CLI
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Defaults {
    pub projection: Projection,
    pub time: Option<Time>,
}

impl ConfigElement for Defaults {
    const KEY: &'static str = "defaults";
}

/// Everything the mapping query builders need
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    pub mapping: Mapping,
    pub wms: Wms,
    pub wfs: Wfs,
    pub wcs: Wcs,
    pub plots: Plots,
    pub provenance: Provenance,
}

impl QueryConfig {
    pub fn from_settings() -> Result<Self> {
        Ok(Self {
            mapping: get_config_element()?,
            wms: get_config_element()?,
            wfs: get_config_element()?,
            wcs: get_config_element()?,
            plots: get_config_element()?,
            provenance: get_config_element()?,
        })
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            mapping: Mapping {
                url: "/cgi-bin/mapping".to_string(),
                debug: false,
            },
            wms: Wms {
                version: "1.3.0".to_string(),
                format: "image/png".to_string(),
            },
            wfs: Wfs {
                version: "2.0.0".to_string(),
                format: "application/json".to_string(),
            },
            wcs: Wcs {
                service: "WCS".to_string(),
                version: "2.0.1".to_string(),
            },
            plots: Plots {
                raster_width: 1024,
                raster_height: 1024,
            },
            provenance: Provenance {
                raster_width: 1024,
                raster_height: 1024,
            },
        }
    }
}

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub log: LogSettings,
    pub lookup: LookupSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    /// Origin allowed by CORS, `*` for any.
    pub allowed_origin: String,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Bunyan,
}

/// Which lookup capability answers `GET /movies/`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupSettings {
    /// Movies loaded from a local JSON file.
    Catalog { path: String },
    /// Another instance of this API.
    Remote {
        base_url: String,
        timeout_seconds: u64,
    },
}

/// Reads `<filename>.json`, then applies `APP__SECTION__KEY` environment
/// overrides.
pub fn get_configuration(filename: &str) -> Result<Settings, config::ConfigError> {
    let mut builder = Config::builder();
    builder = builder
        .add_source(File::new(filename, FileFormat::Json))
        .add_source(Environment::with_prefix("APP").prefix_separator("__").separator("__"));
    let config = builder.build()?;
    config.try_deserialize()
}

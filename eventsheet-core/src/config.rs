//! eventsheet configuration: named sources and custom schemas.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{SheetError, SheetResult};
use crate::schema::{EVENTS_SCHEMA, Schema, SchemaSpec, VENUES_SCHEMA};

static DEFAULT_EVENTS_LOCATION: &str = "2025ethereumevents.csv";
static DEFAULT_VENUES_LOCATION: &str = "venuesethcali.csv";

/// A named text resource and the schema it is read with.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Local path (`~` allowed) or http(s) URL.
    pub location: String,
    pub schema: String,
}

/// Configuration at ~/.config/eventsheet/config.toml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SheetConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,

    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaSpec>,
}

/// A source resolved against its schema, ready to fetch and parse.
#[derive(Debug, Clone)]
pub struct Source {
    pub name: String,
    pub location: String,
    pub schema: Schema,
}

impl Source {
    pub fn is_remote(&self) -> bool {
        is_remote_location(&self.location)
    }
}

pub fn is_remote_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn builtin_sources() -> BTreeMap<String, SourceConfig> {
    BTreeMap::from([
        (
            EVENTS_SCHEMA.to_string(),
            SourceConfig {
                location: DEFAULT_EVENTS_LOCATION.to_string(),
                schema: EVENTS_SCHEMA.to_string(),
            },
        ),
        (
            VENUES_SCHEMA.to_string(),
            SourceConfig {
                location: DEFAULT_VENUES_LOCATION.to_string(),
                schema: VENUES_SCHEMA.to_string(),
            },
        ),
    ])
}

impl SheetConfig {
    pub fn config_path() -> SheetResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SheetError::Config("Could not determine config directory".into()))?
            .join("eventsheet");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file at `path`, or the default location.
    ///
    /// A missing default file is created with every option commented out.
    /// `EVENTSHEET_*` environment variables override file values, with `__`
    /// separating nested keys (`EVENTSHEET_SOURCES__EVENTS__LOCATION`).
    pub fn load(path: Option<&Path>) -> SheetResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                }
                p
            }
        };

        // Built-in sources sit under the file and environment layers, so a
        // partial override (e.g. only `location`) keeps the default schema.
        let mut builder = Config::builder();
        for (name, source) in builtin_sources() {
            builder = builder
                .set_default(format!("sources.{name}.location"), source.location)
                .and_then(|b| b.set_default(format!("sources.{name}.schema"), source.schema))
                .map_err(|e| SheetError::Config(e.to_string()))?;
        }

        builder
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix("EVENTSHEET")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| SheetError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| SheetError::Config(e.to_string()))
    }

    /// Schema by name: config-defined schemas shadow the built-ins.
    pub fn schema(&self, name: &str) -> SheetResult<Schema> {
        if let Some(spec) = self.schemas.get(name) {
            return spec.clone().into_schema(name);
        }
        Schema::builtin(name).ok_or_else(|| SheetError::UnknownSchema(name.to_string()))
    }

    pub fn source(&self, name: &str) -> SheetResult<Source> {
        let source = self.sources.get(name).ok_or_else(|| {
            let available: Vec<_> = self.sources.keys().cloned().collect();
            SheetError::UnknownSource(format!(
                "'{}' (available: {})",
                name,
                available.join(", ")
            ))
        })?;

        Ok(Source {
            name: name.to_string(),
            location: expand_location(&source.location),
            schema: self.schema(&source.schema)?,
        })
    }

    /// An ad-hoc source for a location given on the command line.
    pub fn adhoc_source(&self, location: &str, schema: &str) -> SheetResult<Source> {
        Ok(Source {
            name: location.to_string(),
            location: expand_location(location),
            schema: self.schema(schema)?,
        })
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SheetResult<()> {
        let contents = format!(
            "\
# eventsheet configuration

# Where the built-in sources are read from (path or http(s) URL):
# [sources.events]
# location = \"{}\"
# schema = \"events\"
#
# [sources.venues]
# location = \"{}\"
# schema = \"venues\"

# A custom sheet whose header is on line 0, mapped by column label:
# [schemas.meetups]
# mapping = \"by_header_name\"
# placeholders = [\"Name\"]
# columns = [
#   {{ field = \"name\", index = 0, header = \"Name\" }},
#   {{ field = \"start_date\", index = 1, header = \"Date\" }},
#   {{ field = \"geo\", index = 2, header = \"Place\" }},
# ]
",
            DEFAULT_EVENTS_LOCATION, DEFAULT_VENUES_LOCATION
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }
}

fn expand_location(location: &str) -> String {
    if is_remote_location(location) {
        location.to_string()
    } else {
        shellexpand::tilde(location).into_owned()
    }
}

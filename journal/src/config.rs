use std::path::Path;

use dotenv::dotenv;

use crate::error::ConfigError;

/// Connection string used whenever `DB_TYPE` is `sqlite`.
pub const SQLITE_URL: &str = "sqlite://./database.db?mode=rwc";

const DEFAULT_DB_TYPE: &str = "sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_name: Option<String>,
    pub db_type: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            db_user: None,
            db_password: None,
            db_host: None,
            db_port: None,
            db_name: None,
            db_type: DEFAULT_DB_TYPE.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// A `.env` next to this crate is applied first, then one in the working
    /// directory. Neither overrides variables that are already set.
    pub fn load() -> Result<Self, ConfigError> {
        let colocated = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        dotenv::from_path(colocated).ok();
        dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Builds settings from key/value pairs. Keys are case-insensitive and
    /// anything that is not a `DB_*` setting is ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Settings::default();

        for (key, value) in vars {
            match key.as_ref().to_ascii_uppercase().as_str() {
                "DB_USER" => settings.db_user = Some(value.into()),
                "DB_PASSWORD" => settings.db_password = Some(value.into()),
                "DB_HOST" => settings.db_host = Some(value.into()),
                "DB_NAME" => settings.db_name = Some(value.into()),
                "DB_TYPE" => settings.db_type = value.into(),
                "DB_PORT" => {
                    let raw: String = value.into();
                    let port = raw
                        .trim()
                        .parse::<u16>()
                        .map_err(|source| ConfigError::InvalidPort { value: raw.clone(), source })?;
                    settings.db_port = Some(port);
                }
                _ => {}
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn is_sqlite(&self) -> bool {
        self.db_type == DEFAULT_DB_TYPE
    }

    /// Every field is required once an external database is selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.get_db_url().map(|_| ())
    }

    pub fn get_db_url(&self) -> Result<String, ConfigError> {
        if self.is_sqlite() {
            return Ok(SQLITE_URL.to_string());
        }

        let user = required(&self.db_user, "DB_USER")?;
        let password = required(&self.db_password, "DB_PASSWORD")?;
        let host = required(&self.db_host, "DB_HOST")?;
        let port = self.db_port.ok_or(ConfigError::Missing("DB_PORT"))?;
        let name = required(&self.db_name, "DB_NAME")?;

        Ok(format!("postgresql://{user}:{password}@{host}:{port}/{name}"))
    }
}

fn required<'a>(value: &'a Option<String>, key: &'static str) -> Result<&'a str, ConfigError> {
    value.as_deref().ok_or(ConfigError::Missing(key))
}

//! Configuration management and validation.
//!
//! Provides the meet database connection settings and the parse options
//! that choose between the source's lenient behavior and strict checking.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{DB_PASSWORD_ENV, DEFAULT_ODBC_DRIVER, ODBC_DRIVER_ENV};
use crate::{Error, Result};

/// How malformed race time text is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeParseMode {
    /// Malformed text becomes the zero "no standard" sentinel
    #[default]
    Lenient,
    /// Malformed text fails the parse
    Strict,
}

/// How gender codes outside `M/B/F/W/G` are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenderPolicy {
    /// Unknown codes are kept verbatim
    #[default]
    PassThrough,
    /// Unknown codes fail the parse
    Strict,
}

/// Options applied while normalizing EV3 rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    pub time_mode: TimeParseMode,
    pub gender_policy: GenderPolicy,
}

impl ParseOptions {
    /// Reject malformed times and unknown gender codes
    pub fn strict() -> Self {
        Self {
            time_mode: TimeParseMode::Strict,
            gender_policy: GenderPolicy::Strict,
        }
    }

    pub fn with_time_mode(mut self, time_mode: TimeParseMode) -> Self {
        self.time_mode = time_mode;
        self
    }

    pub fn with_gender_policy(mut self, gender_policy: GenderPolicy) -> Self {
        self.gender_policy = gender_policy;
        self
    }
}

/// Connection settings for a HyTek meet database
#[derive(Clone, PartialEq, Eq)]
pub struct MeetDatabaseConfig {
    /// ODBC driver identifier, braces included
    pub driver: String,

    /// Path of the `.mdb` file
    pub db_path: PathBuf,

    /// Database password
    pub password: String,

    /// Enable the driver's extended ANSI SQL mode
    pub extended_ansi_sql: bool,
}

impl MeetDatabaseConfig {
    /// Settings for `db_path` with the default driver and no password
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            driver: DEFAULT_ODBC_DRIVER.to_string(),
            db_path: db_path.into(),
            password: String::new(),
            extended_ansi_sql: true,
        }
    }

    /// Settings for `db_path`, taking password and driver from the environment
    pub fn from_env(db_path: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(db_path);

        if let Ok(password) = std::env::var(DB_PASSWORD_ENV) {
            debug!("Using database password from {}", DB_PASSWORD_ENV);
            config.password = password;
        }
        if let Ok(driver) = std::env::var(ODBC_DRIVER_ENV) {
            debug!("Using ODBC driver from {}: {}", ODBC_DRIVER_ENV, driver);
            config.driver = driver;
        }

        config
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = driver.into();
        self
    }

    pub fn with_extended_ansi_sql(mut self, enabled: bool) -> Self {
        self.extended_ansi_sql = enabled;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// ODBC connection string: driver, file path, password and SQL mode flag
    pub fn connection_string(&self) -> String {
        format!(
            "DRIVER={};DBQ={};PWD={};ExtendedAnsiSQL={};",
            self.driver,
            self.db_path.display(),
            self.password,
            u8::from(self.extended_ansi_sql)
        )
    }

    /// Check that the settings can form a usable connection string
    pub fn validate(&self) -> Result<()> {
        if self.driver.trim().is_empty() {
            return Err(Error::configuration("ODBC driver must not be empty"));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(Error::configuration("Database path must not be empty"));
        }
        if self.password.contains(';') || self.db_path.to_string_lossy().contains(';') {
            return Err(Error::configuration(
                "Database path and password must not contain ';'",
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for MeetDatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeetDatabaseConfig")
            .field("driver", &self.driver)
            .field("db_path", &self.db_path)
            .field("password", &"<redacted>")
            .field("extended_ansi_sql", &self.extended_ansi_sql)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_string() {
        let config = MeetDatabaseConfig::new("C:/meets/champs.mdb").with_password("secret");
        assert_eq!(
            config.connection_string(),
            "DRIVER={Microsoft Access Driver (*.mdb, *.accdb)};DBQ=C:/meets/champs.mdb;PWD=secret;ExtendedAnsiSQL=1;"
        );

        let config = config
            .with_driver("{MDBTools}")
            .with_extended_ansi_sql(false);
        assert_eq!(
            config.connection_string(),
            "DRIVER={MDBTools};DBQ=C:/meets/champs.mdb;PWD=secret;ExtendedAnsiSQL=0;"
        );
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = MeetDatabaseConfig::new("meet.mdb").with_password("hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_validation() {
        assert!(MeetDatabaseConfig::new("meet.mdb").validate().is_ok());
        assert!(MeetDatabaseConfig::new("").validate().is_err());
        assert!(
            MeetDatabaseConfig::new("meet.mdb")
                .with_driver("  ")
                .validate()
                .is_err()
        );
        assert!(
            MeetDatabaseConfig::new("meet.mdb")
                .with_password("a;b")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_parse_options() {
        let default = ParseOptions::default();
        assert_eq!(default.time_mode, TimeParseMode::Lenient);
        assert_eq!(default.gender_policy, GenderPolicy::PassThrough);

        let strict = ParseOptions::strict();
        assert_eq!(strict.time_mode, TimeParseMode::Strict);
        assert_eq!(strict.gender_policy, GenderPolicy::Strict);

        let mixed = ParseOptions::default().with_time_mode(TimeParseMode::Strict);
        assert_eq!(mixed.gender_policy, GenderPolicy::PassThrough);
        assert_eq!(
            mixed.with_gender_policy(GenderPolicy::Strict),
            ParseOptions::strict()
        );
    }

    #[test]
    fn test_from_env_layering() {
        // SAFETY: no other test reads these variables without overriding both
        unsafe {
            std::env::set_var(DB_PASSWORD_ENV, "env-secret");
            std::env::set_var(ODBC_DRIVER_ENV, "{MDBTools}");
        }
        let config = MeetDatabaseConfig::from_env("meet.mdb");
        assert_eq!(config.driver, "{MDBTools}");
        assert_eq!(config.password, "env-secret");

        let config = config.with_password("flag-secret");
        assert_eq!(config.password, "flag-secret");

        unsafe {
            std::env::remove_var(DB_PASSWORD_ENV);
            std::env::remove_var(ODBC_DRIVER_ENV);
        }
        let config = MeetDatabaseConfig::from_env("meet.mdb");
        assert_eq!(config.driver, DEFAULT_ODBC_DRIVER);
        assert_eq!(config.password, "");
        assert_eq!(config, MeetDatabaseConfig::new("meet.mdb"));
    }
}

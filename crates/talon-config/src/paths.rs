//! Resolved Talon locations shared by the CLI and the orchestrator.
//!
//! Operators use these to confirm which log file and user directory the tools
//! will observe before triggering a restart.

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::Config;

/// Canonical paths derived from the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TalonPaths {
    /// Talon home directory.
    pub talon_home: Utf8PathBuf,
    /// Host log file.
    pub log_path: Utf8PathBuf,
    /// Directory holding the user's Talon scripts.
    pub user_path: Utf8PathBuf,
}

impl TalonPaths {
    /// Derives paths from the shared configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let talon_home = config.home();
        Self {
            log_path: config.log_path(),
            user_path: talon_home.join("user"),
            talon_home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_user_directory_under_home() {
        let config = Config {
            home: Some(Utf8PathBuf::from("/home/ada/.talon")),
            ..Config::default()
        };
        let paths = TalonPaths::from_config(&config);
        assert_eq!(paths.user_path, Utf8PathBuf::from("/home/ada/.talon/user"));
        assert_eq!(paths.log_path, Utf8PathBuf::from("/home/ada/.talon/talon.log"));
    }

    #[test]
    fn serialises_camel_case_keys() {
        let config = Config {
            home: Some(Utf8PathBuf::from("/t")),
            ..Config::default()
        };
        let json = serde_json::to_value(TalonPaths::from_config(&config)).expect("serialise");
        assert_eq!(json["talonHome"], "/t");
        assert_eq!(json["logPath"], "/t/talon.log");
        assert_eq!(json["userPath"], "/t/user");
    }
}

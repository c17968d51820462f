use crate::game::round_error::SettingsError;
use crate::model::Difficulty;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Start-up configuration. Read from disk if present, never written back.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default = "default_true")]
    pub sounds_enabled: bool,

    #[serde(default)]
    pub sounds_dir: Option<PathBuf>,

    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: default_version(),
            difficulty: Difficulty::default(),
            sounds_enabled: true,
            sounds_dir: None,
            seed: None,
        }
    }
}

impl Settings {
    /// Loads the settings file, falling back to defaults, then applies
    /// environment overrides.
    pub fn load() -> Self {
        let path = Self::settings_path();
        let settings = match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(target: "settings", "No settings at {}; using defaults", path.display());
                Settings::default()
            }
            Err(e) => {
                log::warn!(target: "settings", "Ignoring {}: {}", path.display(), e);
                Settings::default()
            }
        };
        settings.with_env_overrides()
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        let mut settings = serde_json::from_str::<Settings>(&contents)?;
        settings.migrate();
        Ok(settings)
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(seed) = Self::seed_from_env() {
            self.seed = Some(seed);
        }
        if let Ok(value) = std::env::var("GUESS_DIFFICULTY") {
            match value.parse::<Difficulty>() {
                Ok(difficulty) => self.difficulty = difficulty,
                Err(e) => log::warn!(target: "settings", "GUESS_DIFFICULTY: {}", e),
            }
        }
        self
    }

    fn settings_path() -> PathBuf {
        let mut path = glib::user_config_dir().join("guess-the-number");
        path.push("settings.json");
        path
    }

    fn migrate(&mut self) {
        if self.version == 0 {
            self.version = 1;
        }
    }

    pub fn is_debug_mode() -> bool {
        std::env::var("DEBUG").map(|v| v == "1").unwrap_or(false)
    }

    pub fn seed_from_env() -> Option<u64> {
        std::env::var("SEED").ok().and_then(|v| v.parse::<u64>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "guess-the-number-{}-{}.json",
            name,
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let path = write_temp("partial", r#"{"difficulty": "Hard"}"#);
        let settings = Settings::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert!(settings.sounds_enabled);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.version, 1);
    }

    #[test]
    fn test_version_zero_is_migrated() {
        let path = write_temp("v0", r#"{"version": 0, "sounds_enabled": false}"#);
        let settings = Settings::load_from(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.version, 1);
        assert!(!settings.sounds_enabled);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let path = write_temp("broken", "{ not json");
        let result = Settings::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = Settings::load_from(Path::new("/nonexistent/guess-the-number.json"));
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        std::env::set_var("SEED", "42");
        std::env::set_var("GUESS_DIFFICULTY", "medium");
        let settings = Settings::default().with_env_overrides();
        std::env::remove_var("SEED");
        std::env::remove_var("GUESS_DIFFICULTY");

        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.difficulty, Difficulty::Medium);
    }

    #[test]
    #[serial]
    fn test_bad_env_values_are_ignored() {
        std::env::set_var("SEED", "not-a-number");
        std::env::set_var("GUESS_DIFFICULTY", "impossible");
        let settings = Settings::default().with_env_overrides();
        std::env::remove_var("SEED");
        std::env::remove_var("GUESS_DIFFICULTY");

        assert_eq!(settings, Settings::default());
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Config, ConfigError};

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Profile files under `<root>/profiles/<name>.json`
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store under the platform config directory
    pub fn user_default() -> Result<Self, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::new(base.join("glance")))
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Create the profiles folder and a main profile from defaults if missing
    pub fn init(&self) -> Result<(), ConfigError> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            let profile = Profile {
                name: "main".into(),
                value: Config::default(),
            };
            fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
            tracing::info!("Created main profile at {}", main_profile.display());
        }

        Ok(())
    }

    /// Load a profile by name, defaulting to main if name not found
    pub fn load(&self, name: &str) -> Result<Config, ConfigError> {
        let profile_file = self.profile_path(name);

        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = self.profile_path("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            Ok(Config::default())
        }
    }

    /// Add a new profile cloned from main
    pub fn add_from_main(&self, new_name: &str) -> Result<PathBuf, ConfigError> {
        let file = self.profile_path(new_name);
        if file.exists() {
            return Err(ConfigError::ProfileExists(new_name.to_string()));
        }

        let profile = Profile {
            name: new_name.into(),
            value: self.load("main")?,
        };
        fs::create_dir_all(self.profiles_dir())?;
        fs::write(&file, serde_json::to_string_pretty(&profile)?)?;
        tracing::info!("Created new profile: {new_name}");
        Ok(file)
    }
}

fn read_profile(path: &Path) -> Result<Config, ConfigError> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)?;
    Ok(profile.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(tag: &str) -> ProfileStore {
        let root = std::env::temp_dir().join(format!(
            "glance-profile-{tag}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        ProfileStore::new(root)
    }

    #[test]
    fn init_creates_main_profile() {
        let store = scratch_store("init");
        store.init().unwrap();
        assert!(store.profiles_dir().join("main.json").exists());

        let config = store.load("main").unwrap();
        assert_eq!(config.network.timeout_seconds, 100);
        let _ = fs::remove_dir_all(&store.root);
    }

    #[test]
    fn missing_profile_falls_back_to_main() {
        let store = scratch_store("fallback");
        store.init().unwrap();

        let mut custom = Config::default();
        custom.ocr.language = "deu".to_string();
        let main = Profile {
            name: "main".into(),
            value: custom,
        };
        fs::write(
            store.profiles_dir().join("main.json"),
            serde_json::to_string(&main).unwrap(),
        )
        .unwrap();

        let config = store.load("work").unwrap();
        assert_eq!(config.ocr.language, "deu");

        let path = store.add_from_main("work").unwrap();
        assert!(path.exists());
        assert_eq!(store.load("work").unwrap().ocr.language, "deu");
        let _ = fs::remove_dir_all(&store.root);
    }

    #[test]
    fn adding_existing_profile_is_refused() {
        let store = scratch_store("exists");
        store.init().unwrap();

        let err = store.add_from_main("main").unwrap_err();
        assert!(matches!(err, ConfigError::ProfileExists(name) if name == "main"));
        let _ = fs::remove_dir_all(&store.root);
    }

    #[test]
    fn load_without_any_profile_uses_defaults() {
        let store = scratch_store("empty");
        let config = store.load("main").unwrap();
        assert_eq!(config.ocr.tesseract_bin, "tesseract");
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::ProfileError;

/// Car glyph shown next to the score while playing
pub const DEFAULT_CAR: &str = "🚗";

/// Glyphs the player can pick from
pub const CAR_CHOICES: [&str; 5] = ["🚗", "🏎️", "🚙", "🛻", "🚕"];

/// Default post-answer reveal delay in milliseconds
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 1000;

/// Persisted player preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Chosen car glyph
    pub selected_car: String,

    /// How long the judged answer stays on screen before the next question
    #[serde(default = "default_reveal_delay")]
    pub reveal_delay_ms: u64,
}

fn default_reveal_delay() -> u64 {
    DEFAULT_REVEAL_DELAY_MS
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            selected_car: DEFAULT_CAR.to_string(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
        }
    }
}

impl Profile {
    /// Load the profile from the platform config directory.
    /// Creates and saves a default profile if none exists yet.
    pub fn load() -> Result<Self, ProfileError> {
        let path = Self::profile_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| ProfileError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
            let profile: Profile =
                serde_json::from_str(&content).map_err(|e| ProfileError::LoadFailed {
                    path: path.display().to_string(),
                    source: Box::new(e),
                })?;

            tracing::debug!("Loaded profile from {}", path.display());
            Ok(profile)
        } else {
            let profile = Profile::default();
            profile.save()?;
            tracing::info!("Created default profile at {}", path.display());
            Ok(profile)
        }
    }

    /// Save the profile to disk
    pub fn save(&self) -> Result<(), ProfileError> {
        let path = Self::profile_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ProfileError::SaveFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ProfileError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&path, json).map_err(|e| ProfileError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Pick a car glyph; must be one of [`CAR_CHOICES`]
    pub fn select_car(&mut self, glyph: &str) -> Result<(), ProfileError> {
        if !CAR_CHOICES.contains(&glyph) {
            return Err(ProfileError::UnknownCar(glyph.to_string()));
        }
        self.selected_car = glyph.to_string();
        Ok(())
    }

    /// Path of the profile file in the user config directory
    fn profile_path() -> Result<PathBuf, ProfileError> {
        let base = dirs::config_dir().ok_or(ProfileError::NoConfigDir)?;
        Ok(base.join("CarTrivia").join("profile.json"))
    }

    /// Profile file location for display purposes
    pub fn profile_path_display() -> String {
        Self::profile_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.selected_car, DEFAULT_CAR);
        assert_eq!(profile.reveal_delay_ms, DEFAULT_REVEAL_DELAY_MS);
    }

    #[test]
    fn test_select_car_valid() {
        let mut profile = Profile::default();
        assert!(profile.select_car("🏎️").is_ok());
        assert_eq!(profile.selected_car, "🏎️");
    }

    #[test]
    fn test_select_car_unknown() {
        let mut profile = Profile::default();
        let err = profile.select_car("🚀").unwrap_err();
        assert!(matches!(err, ProfileError::UnknownCar(_)));
        // Selection unchanged on failure
        assert_eq!(profile.selected_car, DEFAULT_CAR);
    }

    #[test]
    fn test_profile_serialization() {
        let profile = Profile {
            selected_car: "🚙".to_string(),
            reveal_delay_ms: 500,
        };

        let json = serde_json::to_string(&profile).unwrap();
        let deserialized: Profile = serde_json::from_str(&json).unwrap();

        assert_eq!(profile.selected_car, deserialized.selected_car);
        assert_eq!(profile.reveal_delay_ms, deserialized.reveal_delay_ms);
    }

    #[test]
    fn test_reveal_delay_defaults_when_absent() {
        // Profiles written by older versions carry only the car glyph
        let profile: Profile = serde_json::from_str(r#"{ "selected_car": "🚗" }"#).unwrap();
        assert_eq!(profile.reveal_delay_ms, DEFAULT_REVEAL_DELAY_MS);
    }
}

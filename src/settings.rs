//! Game settings and preferences
//!
//! Cosmetic only; gameplay numbers live in [`crate::consts`]. The host may
//! pass settings as JSON (e.g. a `data-settings` attribute on the canvas).
//! Nothing is written back.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Shake the screen on collisions
    pub screen_jolt: bool,
    /// Draw the overtake/lives HUD
    pub show_hud: bool,
    /// Reduced motion (suppresses the jolt)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_jolt: true,
            show_hud: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings if present, falling back to defaults on absence or error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings, using defaults: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Effective screen jolt (respects reduced_motion)
    pub fn effective_screen_jolt(&self) -> bool {
        self.screen_jolt && !self.reduced_motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"show_hud": false}"#).unwrap();
        assert!(!settings.show_hud);
        assert!(settings.screen_jolt);
    }

    #[test]
    fn test_reduced_motion_disables_jolt() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_jolt());
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json_or_default(Some("{nope")), Settings::default());
        assert_eq!(Settings::from_json_or_default(None), Settings::default());
    }
}

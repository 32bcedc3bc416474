use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::samples::{GLUCOSE_HIGH_DEFAULT, GLUCOSE_LOW_DEFAULT};
use crate::theme::{AccentColor, ThemeVariant};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: ThemeVariant,
    pub accent: AccentColor,
    /// Lower edge of the glucose target band, mg/dL.
    #[serde(default = "default_glucose_low")]
    pub glucose_low: f32,
    /// Upper edge of the glucose target band, mg/dL.
    #[serde(default = "default_glucose_high")]
    pub glucose_high: f32,
}

fn default_glucose_low() -> f32 {
    GLUCOSE_LOW_DEFAULT
}
fn default_glucose_high() -> f32 {
    GLUCOSE_HIGH_DEFAULT
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::Midnight,
            accent: AccentColor::Mint,
            glucose_low: default_glucose_low(),
            glucose_high: default_glucose_high(),
        }
    }
}

impl Preferences {
    /// Config directory: Windows → AppData/Local/MotherSphere/Vital/
    /// Linux → ~/.config/MotherSphere/Vital/
    fn config_dir() -> PathBuf {
        dirs::config_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("MotherSphere")
            .join("Vital")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("preferences.json")
    }

    pub fn load() -> Self {
        let path = Self::config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => {
                let mut prefs: Self = serde_json::from_str(&contents).unwrap_or_else(|e| {
                    eprintln!("[vital] Invalid preferences file, using defaults: {e}");
                    Self::default()
                });
                prefs.sanitize();
                prefs
            }
            Err(_) => Self::default(),
        }
    }

    /// Clamp the glucose band to sane bounds and keep low < high.
    fn sanitize(&mut self) {
        self.glucose_low = self.glucose_low.clamp(40.0, 120.0);
        self.glucose_high = self.glucose_high.clamp(100.0, 250.0);
        if self.glucose_low >= self.glucose_high {
            self.glucose_low = default_glucose_low();
            self.glucose_high = default_glucose_high();
        }
    }

    pub fn save(&self) {
        let dir = Self::config_dir();
        if let Err(e) = fs::create_dir_all(&dir) {
            eprintln!("[vital] Failed to create config directory: {e}");
            return;
        }

        let path = Self::config_path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    eprintln!("[vital] Failed to save preferences: {e}");
                }
            }
            Err(e) => {
                eprintln!("[vital] Failed to serialize preferences: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let prefs = Preferences::default();
        assert_eq!(prefs.theme, ThemeVariant::Midnight);
        assert_eq!(prefs.accent, AccentColor::Mint);
        assert!((prefs.glucose_low - 70.0).abs() < 0.01);
        assert!((prefs.glucose_high - 140.0).abs() < 0.01);
    }

    #[test]
    fn test_serde_roundtrip() {
        let prefs = Preferences {
            theme: ThemeVariant::Dawn,
            accent: AccentColor::Violet,
            glucose_low: 80.0,
            glucose_high: 160.0,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let loaded: Preferences = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.theme, prefs.theme);
        assert_eq!(loaded.accent, prefs.accent);
        assert!((loaded.glucose_low - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_backwards_compat_missing_fields() {
        // Simulate an old config without the glucose band fields
        let old_json = r#"{"theme":"Ink","accent":"Sky"}"#;
        let prefs: Preferences = serde_json::from_str(old_json).unwrap();
        assert_eq!(prefs.theme, ThemeVariant::Ink);
        assert!((prefs.glucose_low - 70.0).abs() < 0.01);
        assert!((prefs.glucose_high - 140.0).abs() < 0.01);
    }

    #[test]
    fn test_sanitize_inverted_band_resets() {
        let mut prefs = Preferences {
            glucose_low: 119.0,
            glucose_high: 101.0,
            ..Preferences::default()
        };
        prefs.sanitize();
        assert!(prefs.glucose_low < prefs.glucose_high);
        assert!((prefs.glucose_low - 70.0).abs() < 0.01);
    }
}

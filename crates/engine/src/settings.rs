use glam::Vec3;
use serde::{Deserialize, Serialize};
use stagecraft_physics::{DEFAULT_GRAVITY, DEFAULT_TIME_STEP};
use std::path::Path;

/// Errors from loading engine settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    pub gravity: Vec3,
    /// Simulated seconds per frame.
    pub time_step: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Stagecraft".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Everything the engine reads at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub camera: CameraSettings,
    pub physics: PhysicsSettings,
    pub window: WindowSettings,
}

impl EngineSettings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let settings: Self = serde_json::from_reader(std::fs::File::open(path)?)?;
        settings.validate()?;
        tracing::debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason: &str| {
            Err(SettingsError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            return invalid("camera.fov", "must be between 0 and 180 degrees");
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return invalid("camera.near", "need 0 < near < far");
        }
        if !(self.physics.time_step > 0.0) {
            return invalid("physics.time_step", "must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let s = EngineSettings::default();
        assert_eq!(s.camera.fov, 75.0);
        assert_eq!(s.camera.near, 0.1);
        assert_eq!(s.camera.far, 1000.0);
        assert_eq!(s.physics.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert_eq!(s.physics.time_step, 1.0 / 60.0);
        assert_eq!(s.window.title, "Stagecraft");
        assert_eq!((s.window.width, s.window.height), (1280, 720));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let s = EngineSettings::from_json(r#"{ "camera": { "fov": 60 } }"#).unwrap();
        assert_eq!(s.camera.fov, 60.0);
        assert_eq!(s.camera.far, 1000.0);
        assert_eq!(s.physics, PhysicsSettings::default());
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "physics": {{ "gravity": [0.0, -1.62, 0.0], "time_step": 0.01 }},
                 "window": {{ "title": "Moon" }} }}"#
        )
        .unwrap();

        let s = EngineSettings::load(&path).unwrap();
        assert_eq!(s.physics.gravity, Vec3::new(0.0, -1.62, 0.0));
        assert_eq!(s.physics.time_step, 0.01);
        assert_eq!(s.window.title, "Moon");
        assert_eq!(s.window.width, 1280);
    }

    #[test]
    fn missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = EngineSettings::load(tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = EngineSettings::from_json("{ camera: ").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
    }

    #[test]
    fn rejects_bad_values() {
        let err = EngineSettings::from_json(r#"{ "physics": { "time_step": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "physics.time_step",
                ..
            }
        ));
        assert!(EngineSettings::from_json(r#"{ "camera": { "near": 5, "far": 1 } }"#).is_err());
    }
}

//! Simulation settings
//!
//! Persisted in LocalStorage on the web; native builds always start from
//! defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Error;
use crate::sim::{Bounds, DEFAULT_GRAVITY};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bodies created on reset
    pub body_count: usize,
    /// Collision restitution (0 = inelastic, 1 = elastic)
    pub restitution: f32,
    /// Collision radius as a multiple of the drawn radius
    pub collision_radius_scale: f32,
    /// Gravity used while the orientation sensor is off
    pub static_gravity: Vec2,
    /// Drive gravity from device orientation
    pub use_device_gravity: bool,
    /// Wall rectangle
    pub bounds: Bounds,
    /// Frame delta cap in seconds (keeps a backgrounded tab from teleporting bodies)
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            body_count: DEFAULT_BODY_COUNT,
            restitution: DEFAULT_RESTITUTION,
            collision_radius_scale: DEFAULT_COLLISION_RADIUS_SCALE,
            static_gravity: DEFAULT_GRAVITY,
            use_device_gravity: false,
            bounds: Bounds::UNIT,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "tilt_bounce_settings";

    /// Check every field against its valid range
    pub fn validate(&self) -> Result<(), Error> {
        if self.body_count > MAX_BODIES {
            return Err(Error::settings(
                "body_count",
                format!("{} exceeds the maximum of {}", self.body_count, MAX_BODIES),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(Error::settings(
                "restitution",
                format!("{} is not within [0, 1]", self.restitution),
            ));
        }
        if !self.collision_radius_scale.is_finite() || self.collision_radius_scale <= 0.0 {
            return Err(Error::settings(
                "collision_radius_scale",
                format!("{} must be positive", self.collision_radius_scale),
            ));
        }
        if !self.static_gravity.is_finite() {
            return Err(Error::settings("static_gravity", "must be finite"));
        }
        let b = &self.bounds;
        let finite = [b.left, b.right, b.bottom, b.top].iter().all(|v| v.is_finite());
        if !finite || b.width() <= 0.0 || b.height() <= 0.0 {
            return Err(Error::settings(
                "bounds",
                format!("{:?} is empty or inverted", b),
            ));
        }
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            return Err(Error::settings(
                "max_frame_dt",
                format!("{} must be positive", self.max_frame_dt),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Gravity to publish when the orientation sensor is not in use
    pub fn initial_gravity(&self) -> Vec2 {
        self.static_gravity
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Serialize and hand the JSON to `store` under the storage key
    ///
    /// Returns whether the write succeeded; only a successful write is
    /// logged as saved.
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub(crate) fn save_with<E: std::fmt::Debug>(
        &self,
        store: impl FnOnce(&str, &str) -> Result<(), E>,
    ) -> bool {
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to serialize settings: {}", e);
                return false;
            }
        };
        match store(Self::STORAGE_KEY, &json) {
            Ok(()) => {
                log::info!("Settings saved");
                true
            }
            Err(e) => {
                log::warn!("Failed to save settings: {:?}", e);
                false
            }
        }
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        match storage {
            Some(storage) => {
                self.save_with(|key, json| storage.set_item(key, json));
            }
            None => log::warn!("LocalStorage unavailable, settings not saved"),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

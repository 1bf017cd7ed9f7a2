//! Configuration for map behaviour and animation tuning
//!
//! Everything is passed explicitly to constructors; options can be built in
//! code, picked from an animation preset, or loaded from JSON.

use crate::animation::spring::SpringConfig;
use crate::core::constants::{
    DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, WHEEL_PX_PER_ZOOM_LEVEL, ZOOM_REST_DELTA,
    ZOOM_REST_VELOCITY,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

/// How programmatic view changes are smoothed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnimationProfile {
    #[default]
    Default,
    /// Softer, slightly underdamped
    Gentle,
    /// Quick and snappy
    Stiff,
    /// No smoothing; every change is applied immediately
    Instant,
    Custom(SpringConfig),
}

impl AnimationProfile {
    /// Spring for pan transitions, `None` when animation is off or the
    /// custom spring is unusable
    pub fn resolve(&self) -> Option<SpringConfig> {
        match self {
            Self::Default => Some(SpringConfig::default()),
            Self::Gentle => Some(SpringConfig::new(120.0, 14.0)),
            Self::Stiff => Some(SpringConfig::new(210.0, 20.0)),
            Self::Instant => None,
            Self::Custom(config) => Some(*config).filter(SpringConfig::is_valid),
        }
    }
}

/// Which gestures the map reacts to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionOptions {
    pub pan_on_drag: bool,
    pub zoom_on_wheel: bool,
    /// Wheel travel in pixels that zooms by one level
    pub wheel_px_per_zoom_level: f64,
    pub zoom_on_double_click: bool,
    pub zoom_on_pinch: bool,
    /// Smooth wheel, double-click and `set_zoom` changes with a spring
    pub animate_zoom: bool,
    /// Smooth `set_center` changes with a spring
    pub animate_center: bool,
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            pan_on_drag: true,
            zoom_on_wheel: true,
            wheel_px_per_zoom_level: WHEEL_PX_PER_ZOOM_LEVEL,
            zoom_on_double_click: true,
            zoom_on_pinch: true,
            animate_zoom: true,
            animate_center: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub animation: AnimationProfile,
    pub interaction: InteractionOptions,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            animation: AnimationProfile::default(),
            interaction: InteractionOptions::default(),
        }
    }
}

impl MapOptions {
    /// Parses options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() || self.min_zoom > self.max_zoom
        {
            return Err(MapError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if let AnimationProfile::Custom(config) = &self.animation {
            if !config.is_valid() {
                return Err(MapError::InvalidSpring(format!("{config:?}")));
            }
        }
        let wheel = self.interaction.wheel_px_per_zoom_level;
        if !(wheel.is_finite() && wheel > 0.0) {
            return Err(MapError::InvalidOption(format!(
                "wheel_px_per_zoom_level must be positive, got {wheel}"
            )));
        }
        Ok(())
    }

    /// Spring used for animated `set_center`, if enabled
    pub fn pan_spring(&self) -> Option<SpringConfig> {
        if self.interaction.animate_center {
            self.animation.resolve()
        } else {
            None
        }
    }

    /// Spring used for animated zooms, with zoom-level tolerances
    pub fn zoom_spring(&self) -> Option<SpringConfig> {
        if self.interaction.animate_zoom {
            self.animation
                .resolve()
                .map(|config| config.with_rest(ZOOM_REST_DELTA, ZOOM_REST_VELOCITY))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MapOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.pan_spring(), Some(SpringConfig::default()));
        let zoom = options.zoom_spring().unwrap();
        assert_eq!(zoom.rest_delta, ZOOM_REST_DELTA);
        assert_eq!(zoom.stiffness, 170.0);
    }

    #[test]
    fn test_instant_profile_disables_springs() {
        let options = MapOptions {
            animation: AnimationProfile::Instant,
            ..MapOptions::default()
        };
        assert!(options.pan_spring().is_none());
        assert!(options.zoom_spring().is_none());
    }

    #[test]
    fn test_from_json_partial() {
        let options = MapOptions::from_json(
            r#"{ "min_zoom": 3, "max_zoom": 18, "animation": "stiff",
                 "interaction": { "animate_center": false } }"#,
        )
        .unwrap();

        assert_eq!(options.min_zoom, 3.0);
        assert_eq!(options.max_zoom, 18.0);
        assert_eq!(options.animation, AnimationProfile::Stiff);
        assert!(!options.interaction.animate_center);
        assert!(options.interaction.zoom_on_wheel);
        assert!(options.pan_spring().is_none());
    }

    #[test]
    fn test_from_json_custom_spring() {
        let options =
            MapOptions::from_json(r#"{ "animation": { "custom": { "stiffness": 300.0 } } }"#)
                .unwrap();
        let spring = options.pan_spring().unwrap();
        assert_eq!(spring.stiffness, 300.0);
        assert_eq!(spring.damping, 26.0);
    }

    #[test]
    fn test_json_round_trip() {
        let options = MapOptions {
            min_zoom: 2.0,
            animation: AnimationProfile::Gentle,
            ..MapOptions::default()
        };
        let parsed = MapOptions::from_json(&options.to_json().unwrap()).unwrap();
        assert_eq!(parsed, options);
    }

    #[test]
    fn test_unstable_custom_spring() {
        assert!(matches!(
            MapOptions::from_json(r#"{ "animation": { "custom": { "stiffness": 5000000.0 } } }"#),
            Err(MapError::InvalidSpring(_))
        ));

        let options = MapOptions {
            animation: AnimationProfile::Custom(SpringConfig::new(5.0e6, 26.0)),
            ..MapOptions::default()
        };
        assert!(options.pan_spring().is_none());
        assert!(options.zoom_spring().is_none());
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            MapOptions::from_json(r#"{ "min_zoom": 10, "max_zoom": 2 }"#),
            Err(MapError::InvalidZoomRange { .. })
        ));
        assert!(matches!(
            MapOptions::from_json(r#"{ "animation": { "custom": { "mass": 0.0 } } }"#),
            Err(MapError::InvalidSpring(_))
        ));
        assert!(matches!(
            MapOptions::from_json(r#"{ "interaction": { "wheel_px_per_zoom_level": -1 } }"#),
            Err(MapError::InvalidOption(_))
        ));
        assert!(matches!(
            MapOptions::from_json("{ not json"),
            Err(MapError::Serialization(_))
        ));
    }
}

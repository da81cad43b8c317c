use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::normalize_or_zero;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_spread() -> f32 {
    0.3
}
const fn default_splay() -> f32 {
    10.0
}
const fn default_stride() -> f32 {
    0.4
}
const fn default_strafe() -> f32 {
    0.5
}
const fn default_step_height() -> f32 {
    0.15
}
const fn default_upwards() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
const fn default_min_animation_time() -> f32 {
    0.15
}
const fn default_stride_speed() -> f32 {
    2.0
}
const fn default_strafe_speed() -> f32 {
    1.5
}
const fn default_hips_height() -> f32 {
    0.9
}
const fn default_lean() -> f32 {
    0.5
}
const fn default_femur() -> f32 {
    0.5
}
const fn default_tibia() -> f32 {
    0.5
}
const fn default_foot() -> f32 {
    0.15
}
const fn default_width() -> f32 {
    0.08
}
const fn default_head_offset() -> [f32; 2] {
    [0.1, 0.35]
}
const fn default_idle_delay() -> f32 {
    1.0
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be >= 0, got {value}")))
    }
}

// ---------------------------------------------------------------------------
// GaitConfig
// ---------------------------------------------------------------------------

/// Step planning and timing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct GaitConfig {
    /// Lateral distance between the feet in an idle stance.
    #[serde(default = "default_spread")]
    pub spread: f32,

    /// Outward rotation of each foot from the body forward, in degrees.
    #[serde(default = "default_splay")]
    pub splay: f32,

    /// Forward/back step length.
    #[serde(default = "default_stride")]
    pub stride: f32,

    /// Lateral step length.
    #[serde(default = "default_strafe")]
    pub strafe: f32,

    /// Peak lift of a swinging foot.
    #[serde(default = "default_step_height")]
    pub step_height: f32,

    /// World up axis. Normalized on use.
    #[serde(default = "default_upwards")]
    pub upwards: [f32; 3],

    /// Lower bound on the duration of any step, in seconds.
    #[serde(default = "default_min_animation_time")]
    pub min_animation_time: f32,

    /// Travel speed of a forward/back/idle step.
    #[serde(default = "default_stride_speed")]
    pub stride_speed: f32,

    /// Travel speed of a lateral step.
    #[serde(default = "default_strafe_speed")]
    pub strafe_speed: f32,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            spread: default_spread(),
            splay: default_splay(),
            stride: default_stride(),
            strafe: default_strafe(),
            step_height: default_step_height(),
            upwards: default_upwards(),
            min_animation_time: default_min_animation_time(),
            stride_speed: default_stride_speed(),
            strafe_speed: default_strafe_speed(),
        }
    }
}

impl GaitConfig {
    /// Unit up axis.
    pub fn up(&self) -> Vector3<f32> {
        normalize_or_zero(&Vector3::from(self.upwards))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("gait.spread", self.spread)?;
        positive("gait.stride", self.stride)?;
        positive("gait.strafe", self.strafe)?;
        positive("gait.stride_speed", self.stride_speed)?;
        positive("gait.strafe_speed", self.strafe_speed)?;
        non_negative("gait.step_height", self.step_height)?;
        non_negative("gait.min_animation_time", self.min_animation_time)?;
        if !(0.0..45.0).contains(&self.splay) {
            return Err(ConfigError::invalid(
                "gait.splay",
                format!("must be in [0, 45) degrees, got {}", self.splay),
            ));
        }
        if self.up() == Vector3::zeros() {
            return Err(ConfigError::invalid("gait.upwards", "must be non-zero"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HipsConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct HipsConfig {
    /// Height of the hip anchors above the stance midpoint.
    #[serde(default = "default_hips_height")]
    pub height: f32,

    /// How far the hips follow a foot's vertical offset.
    #[serde(default = "default_lean")]
    pub lean: f32,
}

impl Default for HipsConfig {
    fn default() -> Self {
        Self {
            height: default_hips_height(),
            lean: default_lean(),
        }
    }
}

impl HipsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("hips.height", self.height)?;
        non_negative("hips.lean", self.lean)
    }
}

// ---------------------------------------------------------------------------
// LegConfig
// ---------------------------------------------------------------------------

/// Bone lengths and thickness of a leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct LegConfig {
    #[serde(default = "default_femur")]
    pub femur: f32,

    #[serde(default = "default_tibia")]
    pub tibia: f32,

    /// Ankle to toe.
    #[serde(default = "default_foot")]
    pub foot: f32,

    /// Side length of the square swept along the leg path.
    #[serde(default = "default_width")]
    pub width: f32,
}

impl Default for LegConfig {
    fn default() -> Self {
        Self {
            femur: default_femur(),
            tibia: default_tibia(),
            foot: default_foot(),
            width: default_width(),
        }
    }
}

impl LegConfig {
    pub const fn lengths(&self) -> (f32, f32) {
        (self.femur, self.tibia)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("leg.femur", self.femur)?;
        positive("leg.tibia", self.tibia)?;
        positive("leg.foot", self.foot)?;
        positive("leg.width", self.width)
    }
}

// ---------------------------------------------------------------------------
// HeadConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct HeadConfig {
    /// Offset from the hip midpoint as `[forward, up]`.
    #[serde(default = "default_head_offset")]
    pub offset: [f32; 2],
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            offset: default_head_offset(),
        }
    }
}

// ---------------------------------------------------------------------------
// IdleConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct IdleConfig {
    /// Seconds without movement before the feet are brought back together.
    #[serde(default = "default_idle_delay")]
    pub delay: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            delay: default_idle_delay(),
        }
    }
}

impl IdleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("idle.delay", self.delay)
    }
}

// ---------------------------------------------------------------------------
// CharacterConfig
// ---------------------------------------------------------------------------

/// Every constant of one character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct CharacterConfig {
    #[serde(default)]
    pub gait: GaitConfig,

    #[serde(default)]
    pub hips: HipsConfig,

    #[serde(default)]
    pub leg: LegConfig,

    #[serde(default)]
    pub head: HeadConfig,

    #[serde(default)]
    pub idle: IdleConfig,
}

impl CharacterConfig {
    /// Validate every section, then check the sections agree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gait.validate()?;
        self.hips.validate()?;
        self.leg.validate()?;
        self.idle.validate()?;

        let reach = self.leg.femur + self.leg.tibia;
        let needed = self.hips.height - self.leg.width;
        if reach <= needed {
            return Err(ConfigError::Incompatible(format!(
                "legs of length {reach} cannot reach the ground from hips at {}",
                self.hips.height
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- defaults ----

    #[test]
    fn character_config_default_values() {
        let cfg = CharacterConfig::default();
        assert!((cfg.gait.spread - 0.3).abs() < f32::EPSILON);
        assert!((cfg.gait.splay - 10.0).abs() < f32::EPSILON);
        assert!((cfg.gait.stride - 0.4).abs() < f32::EPSILON);
        assert!((cfg.gait.min_animation_time - 0.15).abs() < f32::EPSILON);
        assert!((cfg.hips.height - 0.9).abs() < f32::EPSILON);
        assert_eq!(cfg.leg.lengths(), (0.5, 0.5));
        assert_eq!(cfg.gait.up(), Vector3::y());
    }

    #[test]
    fn character_config_default_validates() {
        assert!(CharacterConfig::default().validate().is_ok());
    }

    // ---- validate ----

    #[test]
    fn zero_stride_rejected() {
        let cfg = CharacterConfig {
            gait: GaitConfig {
                stride: 0.0,
                ..GaitConfig::default()
            },
            ..CharacterConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "gait.stride"));
    }

    #[test]
    fn splay_out_of_range_rejected() {
        let cfg = GaitConfig {
            splay: 45.0,
            ..GaitConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_upwards_rejected() {
        let cfg = GaitConfig {
            upwards: [0.0; 3],
            ..GaitConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn nan_rejected() {
        let cfg = LegConfig {
            femur: f32::NAN,
            ..LegConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn short_legs_are_incompatible() {
        let cfg = CharacterConfig {
            hips: HipsConfig {
                height: 2.0,
                ..HipsConfig::default()
            },
            ..CharacterConfig::default()
        };
        assert!(matches!(cfg.validate().unwrap_err(), ConfigError::Incompatible(_)));
    }

    // ---- TOML ----

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = CharacterConfig::from_toml_str(
            r"
            [gait]
            stride = 0.6

            [leg]
            width = 0.1
            ",
        )
        .unwrap();
        assert!((cfg.gait.stride - 0.6).abs() < f32::EPSILON);
        assert!((cfg.gait.spread - 0.3).abs() < f32::EPSILON);
        assert!((cfg.leg.width - 0.1).abs() < f32::EPSILON);
        assert_eq!(cfg.hips, HipsConfig::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            CharacterConfig::from_toml_str("").unwrap(),
            CharacterConfig::default()
        );
    }

    #[test]
    fn toml_round_trips_defaults() {
        let text = toml::to_string(&CharacterConfig::default()).unwrap();
        assert_eq!(
            CharacterConfig::from_toml_str(&text).unwrap(),
            CharacterConfig::default()
        );
    }

    #[test]
    fn malformed_toml_is_toml_error() {
        let err = CharacterConfig::from_toml_str("[gait\nstride = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn invalid_toml_value_is_rejected() {
        let err = CharacterConfig::from_toml_str("[hips]\nlean = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CharacterConfig::from_file("/nonexistent/legwork.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

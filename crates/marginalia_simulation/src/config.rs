//! Tuning constants для vines и currents
//!
//! Defaults вкомпилены, TOML файл может переопределить любое подмножество полей
//! (`#[serde(default)]` на каждой секции).
//!
//! Единицы: пиксели, секунды, радианы. Y направлен вниз (screen space).

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{read_file, Result};

/// Параметры pendulum traversal (vine swinging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PendulumConfig {
    /// Радиус поиска anchor от центра игрока (px)
    pub attach_range: f32,
    /// Гравитация для маятника (px/s²)
    pub gravity: f32,
    /// Экспоненциальное затухание ω за tick (0..1)
    pub angular_damping: f32,
    /// Угловое ускорение от pump input (rad/s²)
    pub pump_force: f32,
    pub min_rope_length: f32,
    pub max_rope_length: f32,
    /// Скорость подъёма/спуска по верёвке (px/s)
    pub rope_length_adjust_speed: f32,
    /// Доля linear momentum, переходящая в swing при attach
    pub momentum_transfer_factor: f32,
    /// Множитель release velocity при detach
    pub release_boost: f32,
    /// Clamp |ω| (rad/s)
    pub max_angular_velocity: f32,
    /// Ниже этой |ω| верёвка рисуется с провисанием (rad/s)
    pub sag_angular_speed: f32,
    pub can_pump_swing: bool,
    pub can_adjust_length: bool,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            attach_range: 60.0,
            gravity: 1200.0,
            angular_damping: 0.005,
            pump_force: 4.0,
            min_rope_length: 40.0,
            max_rope_length: 300.0,
            rope_length_adjust_speed: 120.0,
            momentum_transfer_factor: 0.8,
            release_boost: 1.15,
            max_angular_velocity: 8.0,
            sag_angular_speed: 1.5,
            can_pump_swing: true,
            can_adjust_length: true,
        }
    }
}

/// Параметры directional field system (currents)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CurrentConfig {
    /// Шаг engagement ramp за frame (0..1)
    pub ramp_up_rate: f32,
    pub global_strength_multiplier: f32,
    /// Множитель силы когда игрок на земле
    pub grounded_multiplier: f32,
    /// false → на земле currents не действуют вообще
    pub affects_grounded: bool,
    /// true → во время dash currents игнорируются
    pub dash_overrides_current: bool,
    /// Cap скорости, до которого currents могут разгонять (px/s)
    pub max_current_velocity: f32,
    /// Интервал particle bursts (секунды)
    pub particle_interval: f32,
    /// Particles на зону за burst (jets ×2)
    pub particles_per_burst: u32,
}

impl Default for CurrentConfig {
    fn default() -> Self {
        Self {
            ramp_up_rate: 0.08,
            global_strength_multiplier: 1.0,
            grounded_multiplier: 0.5,
            affects_grounded: true,
            dash_overrides_current: true,
            max_current_velocity: 450.0,
            particle_interval: 0.08,
            particles_per_burst: 2,
        }
    }
}

/// Полный config traversal слоя (resource)
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct TraversalConfig {
    pub pendulum: PendulumConfig,
    pub currents: CurrentConfig,
}

impl TraversalConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&read_file(path)?)?;
        crate::log_info(&format!("Traversal config loaded from {}", path.display()));
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TraversalConfig::from_toml_str(
            r#"
            [pendulum]
            pump_force = 6.5
            can_adjust_length = false

            [currents]
            max_current_velocity = 300.0
            "#,
        )
        .unwrap();

        assert_eq!(config.pendulum.pump_force, 6.5);
        assert!(!config.pendulum.can_adjust_length);
        assert_eq!(config.pendulum.max_angular_velocity, 8.0);
        assert_eq!(config.currents.max_current_velocity, 300.0);
        assert_eq!(config.currents.ramp_up_rate, CurrentConfig::default().ramp_up_rate);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = TraversalConfig::from_toml_str("").unwrap();
        assert_eq!(config, TraversalConfig::default());
    }

    #[test]
    fn test_wrong_type_is_toml_error() {
        let err = TraversalConfig::from_toml_str("[pendulum]\ngravity = \"down\"").unwrap_err();
        assert!(matches!(err, crate::error::TraversalError::Toml(_)));
    }

    #[test]
    fn test_default_rope_bounds_are_ordered() {
        let config = PendulumConfig::default();
        assert!(config.min_rope_length > 0.0);
        assert!(config.min_rope_length < config.max_rope_length);
    }
}

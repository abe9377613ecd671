//! VineAnchor - статичная точка крепления
//!
//! Создаётся при загрузке комнаты (RoomLayout), `active` может переключаться
//! gameplay логикой (например, vine сгорела), удаляется вместе с комнатой.

use bevy::color::Color;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Визуальный/тематический тип верёвки (на физику не влияет)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Reflect)]
#[serde(rename_all = "snake_case")]
pub enum VineKind {
    /// Живая лиана
    #[default]
    Vine,
    /// Закладка-ленточка (bookmark ribbon)
    Ribbon,
    /// Нитка переплёта
    Thread,
}

impl VineKind {
    pub fn rope_color(&self) -> Color {
        match self {
            VineKind::Vine => Color::srgb(0.35, 0.55, 0.25),
            VineKind::Ribbon => Color::srgb(0.7, 0.2, 0.25),
            VineKind::Thread => Color::srgb(0.85, 0.8, 0.65),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
pub struct VineAnchor {
    /// Stable id (seed для декоративного sway)
    pub id: String,
    pub position: Vec2,
    /// Максимальная длина верёвки этого anchor (px)
    pub rope_length: f32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub kind: VineKind,
}

fn default_active() -> bool {
    true
}

impl VineAnchor {
    pub fn new(id: impl Into<String>, position: Vec2, rope_length: f32) -> Self {
        Self {
            id: id.into(),
            position,
            rope_length,
            active: true,
            kind: VineKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: VineKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

//! RoomLayout - traversal фрагмент комнаты (anchors + current zones)
//!
//! Приходит от level loader уже валидированным; здесь только десериализация
//! и установка в resources. Формат TOML:
//!
//! ```toml
//! [[anchors]]
//! id = "vine_a"
//! position = [300.0, 100.0]
//! rope_length = 150.0
//!
//! [[zones]]
//! id = "river"
//! rect = [0.0, 600.0, 800.0, 200.0]
//! direction = [1.0, 0.0]
//! strength = 400.0
//! ```

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::current::{CurrentZone, DirectionalFieldSystem};
use crate::error::{read_file, Result};
use crate::shared::rect_xywh;
use crate::vine::{PendulumTraversal, VineAnchor, VineKind};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomLayout {
    pub anchors: Vec<VineAnchor>,
    pub zones: Vec<CurrentZone>,
}

impl RoomLayout {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let layout = Self::from_toml_str(&read_file(path)?)?;
        crate::log_info(&format!(
            "Room loaded from {}: {} anchors, {} zones",
            path.display(),
            layout.anchors.len(),
            layout.zones.len()
        ));
        Ok(layout)
    }

    /// Заменить anchors / zones. Swing сбрасывается, ramps удалённых зон выбрасываются.
    pub fn install(&self, traversal: &mut PendulumTraversal, field: &mut DirectionalFieldSystem) {
        traversal.set_anchors(self.anchors.clone());
        field.set_zones(self.zones.clone());
    }

    /// Встроенная демо-комната (headless binary / client без аргументов)
    ///
    /// Пол на y = 700: два vine над пропастью, поток по дну, gust-updraft,
    /// whirlpool справа.
    pub fn demo() -> Self {
        Self {
            anchors: vec![
                VineAnchor::new("vine_west", Vec2::new(420.0, 220.0), 180.0),
                VineAnchor::new("ribbon_mid", Vec2::new(700.0, 180.0), 220.0).with_kind(VineKind::Ribbon),
                VineAnchor::new("thread_east", Vec2::new(980.0, 240.0), 160.0).with_kind(VineKind::Thread),
            ],
            zones: vec![
                CurrentZone::stream("gutter_stream", rect_xywh(0.0, 560.0, 1400.0, 140.0), Vec2::X, 350.0),
                CurrentZone::gust("margin_updraft", rect_xywh(1180.0, 200.0, 160.0, 500.0), Vec2::NEG_Y, 900.0, 2.0, 1.5),
                CurrentZone::jet("spine_jet", rect_xywh(80.0, 300.0, 220.0, 60.0), Vec2::new(1.0, -0.2), 1200.0),
                CurrentZone::whirlpool("ink_pool", rect_xywh(1500.0, 300.0, 400.0, 400.0), 500.0, true),
            ],
        }
    }
}

/// Установить комнату в World (resources должны существовать - см. TraversalPlugin)
pub fn install_room(world: &mut World, layout: &RoomLayout) {
    world.resource_scope(|world, mut traversal: Mut<PendulumTraversal>| {
        let mut field = world.resource_mut::<DirectionalFieldSystem>();
        layout.install(&mut traversal, &mut field);
    });
}

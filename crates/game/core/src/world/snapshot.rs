//! Read-only views of the world handed to render sinks.

use crate::creature::{CreatureId, CreatureKind};

use super::{GridDimensions, ObjectId, Position};

/// Creature marker in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatureMarker {
    pub id: CreatureId,
    pub name: String,
    pub kind: CreatureKind,
    pub hp: i32,
    pub max_hp: i32,
    pub position: Position,
    /// True for the creature the snapshot was taken for.
    pub focused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectMarker {
    pub id: ObjectId,
    pub name: String,
    pub position: Position,
    pub has_item: bool,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub dimensions: GridDimensions,
    /// Row-major walkability, `width * height` entries.
    pub walkable: Vec<bool>,
    pub creatures: Vec<CreatureMarker>,
    pub objects: Vec<ObjectMarker>,
}

impl WorldSnapshot {
    pub const FOCUS_GLYPH: char = 'x';
    pub const CREATURE_GLYPH: char = 'C';
    pub const OBJECT_GLYPH: char = 'i';
    pub const FLOOR_GLYPH: char = '.';
    pub const WALL_GLYPH: char = '#';

    pub fn is_walkable(&self, position: Position) -> bool {
        if !self.dimensions.contains(position) {
            return false;
        }
        let index = position.y as usize * self.dimensions.width as usize + position.x as usize;
        self.walkable.get(index).copied().unwrap_or(false)
    }

    /// Glyph for one cell; creatures draw over objects, objects over terrain.
    pub fn glyph_at(&self, position: Position) -> char {
        if let Some(marker) = self.creatures.iter().find(|m| m.position == position) {
            return if marker.focused {
                Self::FOCUS_GLYPH
            } else {
                Self::CREATURE_GLYPH
            };
        }
        if self.objects.iter().any(|m| m.position == position) {
            return Self::OBJECT_GLYPH;
        }
        if self.is_walkable(position) {
            Self::FLOOR_GLYPH
        } else {
            Self::WALL_GLYPH
        }
    }

    /// One string per grid row.
    pub fn rows(&self) -> Vec<String> {
        let width = i32::try_from(self.dimensions.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.dimensions.height).unwrap_or(i32::MAX);
        (0..height)
            .map(|y| (0..width).map(|x| self.glyph_at(Position::new(x, y))).collect())
            .collect()
    }

    pub fn focused(&self) -> Option<&CreatureMarker> {
        self.creatures.iter().find(|m| m.focused)
    }
}

/// Draws world snapshots. Implemented by the client's terminal renderer.
pub trait RenderSink {
    fn render(&mut self, snapshot: &WorldSnapshot) -> std::io::Result<()>;
}

/// Sink that discards every frame; used for headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl RenderSink for NullRenderer {
    fn render(&mut self, _snapshot: &WorldSnapshot) -> std::io::Result<()> {
        Ok(())
    }
}

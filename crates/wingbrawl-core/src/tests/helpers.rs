//! Test doubles and setup utilities.

use std::sync::Arc;

use glam::Vec3;

use crate::capability::{AudioSink, DrawCommand, ManualClock, RenderSink, SoundId};
use crate::config::GameConfig;
use crate::fighter::Duel;
use crate::manager::ObjectManager;
use crate::object::{ObjectId, ObjectType, Pose, SpriteId};

// =============================================================================
// Recording sinks
// =============================================================================

/// Owned copy of a [`DrawCommand`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectType,
    pub sprite: SpriteId,
    pub frame: u32,
    pub pose: Option<Pose>,
    pub position: Vec3,
}

/// Render sink that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingRenderSink {
    pub draws: Vec<DrawRecord>,
    pub cameras: Vec<(Vec3, Vec3)>,
    pub wireframe: Vec<bool>,
}

impl RecordingRenderSink {
    /// Names in draw order.
    pub fn names(&self) -> Vec<String> {
        self.draws.iter().map(|d| d.name.clone()).collect()
    }

    /// Depths in draw order.
    pub fn depths(&self) -> Vec<f32> {
        self.draws.iter().map(|d| d.position.z).collect()
    }

    pub fn clear(&mut self) {
        self.draws.clear();
    }
}

impl RenderSink for RecordingRenderSink {
    fn draw(&mut self, command: &DrawCommand<'_>) {
        self.draws.push(DrawRecord {
            id: command.id,
            name: command.name.to_string(),
            kind: command.kind,
            sprite: command.sprite,
            frame: command.frame,
            pose: command.pose,
            position: command.position,
        });
    }

    fn set_wireframe(&mut self, enabled: bool) {
        self.wireframe.push(enabled);
    }

    fn set_camera(&mut self, eye: Vec3, look_at: Vec3) {
        self.cameras.push((eye, look_at));
    }
}

/// Audio sink that remembers every sound.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundId>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundId) {
        self.played.push(sound);
    }
}

// =============================================================================
// Factories
// =============================================================================

/// Empty manager with default settings on a manual clock at zero.
pub fn empty_manager() -> (Arc<ManualClock>, ObjectManager) {
    manager_with(&GameConfig::default())
}

/// Empty manager built from `config` on a manual clock at zero.
pub fn manager_with(config: &GameConfig) -> (Arc<ManualClock>, ObjectManager) {
    let clock = Arc::new(ManualClock::new());
    let manager = ObjectManager::new(config, clock.clone());
    (clock, manager)
}

/// Creates the two fighters at rest height and binds them.
pub fn spawn_fighters(manager: &mut ObjectManager, right_x: f32, left_x: f32) -> Duel {
    let rest = manager.arena().rest_height;
    let right = manager.create(
        ObjectType::Plane,
        "plane",
        Vec3::new(right_x, rest, 0.0),
        Vec3::ZERO,
    );
    let left = manager.create(
        ObjectType::Plane,
        "plane2",
        Vec3::new(left_x, rest, -10.0),
        Vec3::ZERO,
    );
    Duel::new(Some(right), Some(left))
}

/// Creates a stationary crow.
pub fn spawn_crow(manager: &mut ObjectManager, name: &str, position: Vec3) -> ObjectId {
    manager.create(ObjectType::Crow, name, position, Vec3::ZERO)
}

/// Advances the clock by one motion frame and ticks.
pub fn step(clock: &ManualClock, manager: &mut ObjectManager) -> crate::manager::TickReport {
    clock.advance(20);
    manager.tick()
}

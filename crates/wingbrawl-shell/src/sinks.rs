//! Render and audio sinks that write to the log instead of a device.

use glam::Vec3;
use tracing::{debug, info, trace};
use wingbrawl_core::{AudioSink, DrawCommand, RenderSink, SoundId};

/// Counts draws and logs view changes.
#[derive(Debug, Default)]
pub struct LogRenderSink {
    draws: u64,
    camera_changes: u64,
    wireframe: bool,
}

impl LogRenderSink {
    /// Sprites drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Camera moves so far.
    pub fn camera_changes(&self) -> u64 {
        self.camera_changes
    }
}

impl RenderSink for LogRenderSink {
    fn draw(&mut self, command: &DrawCommand<'_>) {
        self.draws += 1;
        trace!(
            id = %command.id,
            name = command.name,
            kind = %command.kind,
            sprite = command.sprite.as_u32(),
            frame = command.frame,
            pose = ?command.pose,
            x = command.position.x,
            y = command.position.y,
            z = command.position.z,
            "draw"
        );
    }

    fn set_wireframe(&mut self, enabled: bool) {
        if enabled != self.wireframe {
            info!(enabled, "wireframe");
        }
        self.wireframe = enabled;
    }

    fn set_camera(&mut self, eye: Vec3, look_at: Vec3) {
        self.camera_changes += 1;
        info!(?eye, ?look_at, "camera");
    }
}

/// Counts and logs sounds.
#[derive(Debug, Default)]
pub struct LogAudioSink {
    played: u64,
}

impl LogAudioSink {
    /// Sounds played so far.
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudioSink {
    fn play(&mut self, sound: SoundId) {
        self.played += 1;
        let name = match sound {
            SoundId::PUNCH => "punch",
            SoundId::KICK => "kick",
            SoundId::THEME => "theme",
            SoundId::JUMP => "jump",
            _ => "other",
        };
        debug!(sound = sound.as_u32(), name, "play");
    }
}

//! Camera and wireframe view state.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capability::RenderSink;

/// Which camera the renderer uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Side-on view of the duel.
    #[default]
    Default,
    /// High, distant view of the whole world.
    EagleEye,
}

impl CameraMode {
    /// Eye position and look-at target.
    #[must_use]
    pub const fn placement(self) -> (Vec3, Vec3) {
        match self {
            Self::Default => (
                Vec3::new(1024.0, 384.0, -350.0),
                Vec3::new(1024.0, 384.0, 1000.0),
            ),
            Self::EagleEye => (
                Vec3::new(1024.0, 600.0, -2000.0),
                Vec3::new(1024.0, 600.0, 1000.0),
            ),
        }
    }

    /// The other camera.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Default => Self::EagleEye,
            Self::EagleEye => Self::Default,
        }
    }
}

/// View toggles, pushed to the render sink when they change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    camera: CameraMode,
    wireframe: bool,
    dirty: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            camera: CameraMode::Default,
            wireframe: false,
            dirty: true,
        }
    }
}

impl ViewState {
    /// Current camera.
    #[must_use]
    pub const fn camera(&self) -> CameraMode {
        self.camera
    }

    /// Whether wireframe rendering is on.
    #[must_use]
    pub const fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Switches to the other camera.
    pub fn flip_camera(&mut self) {
        self.camera = self.camera.flipped();
        self.dirty = true;
        debug!(camera = ?self.camera, "camera flipped");
    }

    /// Toggles wireframe rendering.
    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
        self.dirty = true;
        debug!(wireframe = self.wireframe, "wireframe toggled");
    }

    /// Pushes camera and wireframe mode to `sink` if either changed since the
    /// last sync. The first sync always pushes.
    pub fn sync(&mut self, sink: &mut dyn RenderSink) {
        if !self.dirty {
            return;
        }
        let (eye, look_at) = self.camera.placement();
        sink.set_camera(eye, look_at);
        sink.set_wireframe(self.wireframe);
        self.dirty = false;
    }
}

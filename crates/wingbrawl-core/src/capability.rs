//! Capabilities the core consumes from its host.
//!
//! The core never talks to a graphics device, a sound card or the OS timer
//! directly. The host hands it:
//! - a [`RenderSink`] that draws sprites and applies view settings
//! - an [`AudioSink`] that plays indexed sounds
//! - a [`Clock`] that reads monotonic milliseconds
//!
//! [`SystemClock`] and [`ManualClock`] are the two clocks shipped here; the
//! latter steps only when told to, which makes runs reproducible.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::object::{ObjectId, ObjectType, Pose, SpriteId};

// =============================================================================
// Rendering
// =============================================================================

/// One sprite draw, issued once per live object per frame in depth order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand<'a> {
    /// Object being drawn.
    pub id: ObjectId,
    /// Object name.
    pub name: &'a str,
    /// Object kind.
    pub kind: ObjectType,
    /// Sprite to draw.
    pub sprite: SpriteId,
    /// Animation frame within the sprite strip.
    pub frame: u32,
    /// Fighter pose; `None` for non-fighters.
    pub pose: Option<Pose>,
    /// World position.
    pub position: Vec3,
}

/// Host renderer.
pub trait RenderSink {
    /// Draws one sprite.
    fn draw(&mut self, command: &DrawCommand<'_>);

    /// Switches between textured and wireframe rendering.
    fn set_wireframe(&mut self, enabled: bool);

    /// Moves the camera.
    fn set_camera(&mut self, eye: Vec3, look_at: Vec3);
}

// =============================================================================
// Audio
// =============================================================================

/// Index into the host's sound bank.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SoundId(u32);

impl SoundId {
    /// Punch impact.
    pub const PUNCH: Self = Self(0);
    /// Kick impact.
    pub const KICK: Self = Self(1);
    /// Background theme.
    pub const THEME: Self = Self(2);
    /// Jump take-off.
    pub const JUMP: Self = Self(3);

    /// Creates a sound index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

/// Host audio output. Fire and forget.
pub trait AudioSink {
    /// Plays a sound from the bank.
    fn play(&mut self, sound: SoundId);
}

// =============================================================================
// Clock
// =============================================================================

/// Monotonic millisecond time source.
pub trait Clock: Send + Sync {
    /// Milliseconds since the clock started.
    fn now_ms(&self) -> u64;

    /// Returns `true` if at least `interval_ms` has passed since `*stamp`,
    /// re-arming `*stamp` to now when it has.
    fn elapsed(&self, stamp: &mut u64, interval_ms: u64) -> bool {
        let now = self.now_ms();
        if now.saturating_sub(*stamp) >= interval_ms {
            *stamp = now;
            true
        } else {
            false
        }
    }
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Starts a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Clock that moves only when advanced.
///
/// # Example
///
/// ```
/// use wingbrawl_core::capability::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// clock.advance(250);
/// assert_eq!(clock.now_ms(), 250);
///
/// let mut stamp = 0;
/// assert!(clock.elapsed(&mut stamp, 200));
/// assert_eq!(stamp, 250);
/// assert!(!clock.elapsed(&mut stamp, 200));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock reading `now_ms`.
    #[must_use]
    pub fn starting_at(now_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(now_ms),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }

    /// Sets the clock to an absolute reading.
    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_and_sets() {
        let clock = ManualClock::starting_at(10);
        assert_eq!(clock.now_ms(), 10);
        clock.advance(5);
        assert_eq!(clock.now_ms(), 15);
        clock.set(100);
        assert_eq!(clock.now_ms(), 100);
    }

    #[test]
    fn elapsed_is_inclusive_of_interval() {
        let clock = ManualClock::new();
        let mut stamp = 0;
        clock.set(199);
        assert!(!clock.elapsed(&mut stamp, 200));
        assert_eq!(stamp, 0);
        clock.set(200);
        assert!(clock.elapsed(&mut stamp, 200));
        assert_eq!(stamp, 200);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn sound_bank_indices() {
        assert_eq!(SoundId::PUNCH.as_u32(), 0);
        assert_eq!(SoundId::KICK.as_u32(), 1);
        assert_eq!(SoundId::THEME.as_u32(), 2);
        assert_eq!(SoundId::JUMP.as_u32(), 3);
    }
}

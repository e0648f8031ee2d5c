//! State components carried by every [`GameObject`](super::GameObject).
//!
//! The object itself is a thin container; the pieces that the manager and the
//! renderer read live here:
//! - [`ObjectFlags`]: vulnerability and the dead tombstone
//! - [`Lifetime`]: birth time and life span
//! - [`Animation`]: frame counters and time-gated frame advance
//! - [`Behavior`]: per-type motion policy (fighter, crow, falling, linear)

use std::f32::consts::TAU;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// =============================================================================
// Flags
// =============================================================================

bitflags! {
    /// Boolean state of an object.
    ///
    /// `DEAD` is a tombstone: it is set during collision or culling and is
    /// never cleared. The manager only unlinks dead objects during garbage
    /// collection at the end of a tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ObjectFlags: u8 {
        /// A projectile hitting this object kills it.
        const VULNERABLE = 1 << 0;
        /// Flagged for removal at the next garbage collection.
        const DEAD = 1 << 1;
    }
}

// =============================================================================
// Sprite
// =============================================================================

/// Opaque handle to a sprite owned by the host renderer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteId(u32);

impl SpriteId {
    /// Creates a sprite handle from a raw index.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

// =============================================================================
// Lifetime
// =============================================================================

/// Birth time and life span of an object, in clock milliseconds.
///
/// A life span of zero or less marks the object immortal: it is never culled
/// by age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
    /// Clock time at creation.
    pub birth_ms: u64,
    /// Maximum age before culling; `<= 0` means immortal.
    pub life_span_ms: i64,
}

impl Lifetime {
    /// Creates a lifetime starting at `birth_ms`.
    #[must_use]
    pub const fn new(birth_ms: u64, life_span_ms: i64) -> Self {
        Self {
            birth_ms,
            life_span_ms,
        }
    }

    /// Returns `true` if the object can die of old age.
    #[must_use]
    pub const fn is_mortal(&self) -> bool {
        self.life_span_ms > 0
    }

    /// Age at `now_ms`, saturating at zero for clocks that read before birth.
    #[must_use]
    pub const fn age(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.birth_ms)
    }

    /// Returns `true` if the object is mortal and strictly older than its span.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn is_expired(&self, now_ms: u64) -> bool {
        self.is_mortal() && self.age(now_ms) > self.life_span_ms as u64
    }
}

// =============================================================================
// Animation
// =============================================================================

/// Sprite animation counters.
///
/// Frames advance on elapsed clock time, not per draw call, so the animation
/// rate does not depend on the frame rate. A one-shot animation (`cycles ==
/// false` with more than one frame) stops at `current_frame == frame_count`,
/// which the manager treats as "animation finished".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    /// Number of frames in the sprite strip.
    pub frame_count: u32,
    /// Frame to draw next; reaches `frame_count` when a one-shot completes.
    pub current_frame: u32,
    /// Loop back to frame 0 after the last frame.
    pub cycles: bool,
    /// Minimum time between frame advances.
    pub frame_interval_ms: u64,
    /// Clock time of the last frame advance.
    pub last_frame_ms: u64,
}

impl Animation {
    /// Creates an animation positioned on its first frame.
    #[must_use]
    pub const fn new(frame_count: u32, cycles: bool, frame_interval_ms: u64, now_ms: u64) -> Self {
        Self {
            frame_count,
            current_frame: 0,
            cycles,
            frame_interval_ms,
            last_frame_ms: now_ms,
        }
    }

    /// Returns `true` for animations that play once and then finish.
    #[must_use]
    pub const fn is_one_shot(&self) -> bool {
        self.frame_count > 1 && !self.cycles
    }

    /// Returns `true` once a one-shot animation has shown its last frame.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.is_one_shot() && self.current_frame >= self.frame_count
    }

    /// The frame index that should be drawn, clamped into the strip.
    #[must_use]
    pub fn visible_frame(&self) -> u32 {
        self.current_frame.min(self.frame_count.saturating_sub(1))
    }

    /// Advances to the next frame if the frame interval has elapsed.
    ///
    /// Returns `true` if the frame changed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if self.frame_count <= 1 {
            return false;
        }
        if now_ms.saturating_sub(self.last_frame_ms) < self.frame_interval_ms {
            return false;
        }
        self.last_frame_ms = now_ms;

        if self.cycles {
            self.current_frame = (self.current_frame + 1) % self.frame_count;
            true
        } else if self.current_frame < self.frame_count {
            self.current_frame += 1;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Fighter state
// =============================================================================

/// What a fighter is visibly doing; forwarded to the renderer with each draw.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// Standing still.
    #[default]
    Idle,
    /// Walking left or right.
    Walk,
    /// Airborne high enough to show the jump sprite.
    Jump,
    /// Throwing a punch.
    Punch,
    /// Throwing a kick.
    Kick,
    /// Recoiling from a landed attack.
    Hit,
}

/// Scripted jump arc.
///
/// Not a physics integration: while the fighter is between the rest height
/// and the apex threshold its vertical speed grows by one unit per step; above
/// the threshold it shrinks by one unit per step. The fighter lands when it
/// comes back down to the rest height, which ends the arc.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JumpArc {
    dy: f32,
    airborne: bool,
}

impl JumpArc {
    /// Returns `true` between take-off and landing.
    #[must_use]
    pub const fn is_airborne(&self) -> bool {
        self.airborne
    }

    /// Applies one step of the arc to `y`. Starts a new arc when grounded.
    ///
    /// Every arc takes off from `rest`; a fighter standing anywhere else is
    /// put back on it first. Returns `true` if this step landed the fighter.
    pub fn step(&mut self, y: &mut f32, rest: f32, apex: f32) -> bool {
        if !self.airborne {
            self.airborne = true;
            self.dy = 0.0;
            *y = rest;
        }

        if *y <= apex && *y >= rest {
            self.dy += 1.0;
            *y += self.dy;
        }
        if *y > apex {
            self.dy -= 1.0;
            *y += self.dy;
        }

        if *y < rest || (self.dy < 0.0 && *y <= rest) {
            *y = rest;
            self.dy = 0.0;
            self.airborne = false;
            return true;
        }
        false
    }
}

/// Per-fighter state: jump arc plus a short-lived action pose.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FighterState {
    /// Jump arc in progress, if any.
    pub jump: JumpArc,
    pose: Pose,
    pose_frames: u32,
}

impl FighterState {
    /// Holds `pose` for the next `frames` ticks.
    pub fn set_pose(&mut self, pose: Pose, frames: u32) {
        self.pose = pose;
        self.pose_frames = frames;
    }

    /// Counts the held pose down by one tick, reverting to idle at zero.
    pub fn tick_pose(&mut self) {
        if self.pose_frames > 0 {
            self.pose_frames -= 1;
            if self.pose_frames == 0 {
                self.pose = Pose::Idle;
            }
        }
    }

    /// Pose to draw at height `y`.
    ///
    /// A held action pose wins; otherwise an airborne fighter more than
    /// `jump_pose_rise` above `rest` shows the jump pose.
    #[must_use]
    pub fn current_pose(&self, y: f32, rest: f32, jump_pose_rise: f32) -> Pose {
        if self.pose != Pose::Idle {
            self.pose
        } else if self.jump.is_airborne() && y > rest + jump_pose_rise {
            Pose::Jump
        } else {
            Pose::Idle
        }
    }
}

// =============================================================================
// Crow flight
// =============================================================================

/// Vertical amplitude of the crow's flap bob.
pub const CROW_FLAP_AMPLITUDE: f32 = 6.0;

/// Flap phase advance per motion frame, in radians.
pub const CROW_FLAP_RATE: f32 = 0.25;

/// Crow flight: straight travel along the velocity with a sinusoidal bob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrowFlight {
    /// Altitude the bob oscillates around.
    pub base_y: f32,
    /// Current flap phase in `[0, TAU)`.
    pub phase: f32,
}

impl CrowFlight {
    /// Starts a flight at height `y` with the given flap phase, chosen so the
    /// crow does not jump on its first step.
    #[must_use]
    pub fn new(y: f32, phase: f32) -> Self {
        let phase = phase.rem_euclid(TAU);
        Self {
            base_y: y - CROW_FLAP_AMPLITUDE * phase.sin(),
            phase,
        }
    }

    /// Advances the flap by `frames` motion frames and returns the new height.
    pub fn flap(&mut self, frames: f32, climb: f32) -> f32 {
        self.base_y += climb * frames;
        self.phase = (self.phase + CROW_FLAP_RATE * frames).rem_euclid(TAU);
        self.base_y + CROW_FLAP_AMPLITUDE * self.phase.sin()
    }
}

// =============================================================================
// Behavior
// =============================================================================

/// Downward acceleration of falling objects, in units per motion frame squared.
pub const FALL_GRAVITY: f32 = 0.5;

/// Per-type motion policy, selected once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Behavior {
    /// Straight-line motion along the velocity.
    #[default]
    Linear,
    /// Player-controlled fighter.
    Fighter(FighterState),
    /// Flapping crow.
    Crow(CrowFlight),
    /// Falls under gravity until it rests on the floor.
    Falling,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod lifetime_tests {
        use super::*;

        #[test]
        fn immortal_never_expires() {
            let life = Lifetime::new(0, 0);
            assert!(!life.is_mortal());
            assert!(!life.is_expired(u64::MAX));

            let negative = Lifetime::new(0, -1);
            assert!(!negative.is_expired(1_000_000));
        }

        #[test]
        fn expires_strictly_after_span() {
            let life = Lifetime::new(100, 500);
            assert!(!life.is_expired(600));
            assert!(life.is_expired(601));
        }

        #[test]
        fn age_saturates_before_birth() {
            let life = Lifetime::new(100, 500);
            assert_eq!(life.age(50), 0);
        }
    }

    mod animation_tests {
        use super::*;

        #[test]
        fn frame_advance_is_time_gated() {
            let mut anim = Animation::new(4, true, 100, 0);
            assert!(!anim.advance(50));
            assert_eq!(anim.current_frame, 0);
            assert!(anim.advance(100));
            assert_eq!(anim.current_frame, 1);
            assert!(!anim.advance(150));
        }

        #[test]
        fn cycling_animation_wraps() {
            let mut anim = Animation::new(3, true, 10, 0);
            for t in 1..=3 {
                anim.advance(t * 10);
            }
            assert_eq!(anim.current_frame, 0);
            assert!(!anim.is_complete());
        }

        #[test]
        fn one_shot_animation_completes() {
            let mut anim = Animation::new(3, false, 10, 0);
            for t in 1..=3 {
                anim.advance(t * 10);
            }
            assert_eq!(anim.current_frame, 3);
            assert!(anim.is_complete());
            assert_eq!(anim.visible_frame(), 2);
            assert!(!anim.advance(100));
        }

        #[test]
        fn single_frame_is_never_one_shot() {
            let mut anim = Animation::new(1, false, 10, 0);
            assert!(!anim.is_one_shot());
            assert!(!anim.advance(1000));
            assert!(!anim.is_complete());
        }
    }

    mod jump_tests {
        use super::*;

        #[test]
        fn first_step_leaves_the_ground() {
            let mut arc = JumpArc::default();
            let mut y = 300.0;
            assert!(!arc.step(&mut y, 300.0, 350.0));
            assert!(arc.is_airborne());
            assert_eq!(y, 301.0);
        }

        #[test]
        fn arc_rises_past_apex_and_lands_on_rest() {
            let mut arc = JumpArc::default();
            let mut y = 300.0;
            let mut peak = y;
            let mut steps = 0;
            loop {
                let landed = arc.step(&mut y, 300.0, 350.0);
                peak = peak.max(y);
                steps += 1;
                assert!(y >= 300.0);
                if landed {
                    break;
                }
                assert!(steps < 200, "jump arc never landed");
            }
            assert!(peak > 350.0);
            assert_eq!(y, 300.0);
            assert!(!arc.is_airborne());
        }

        fn steps_to_land(arc: &mut JumpArc, y: &mut f32) -> usize {
            for steps in 1..=200 {
                if arc.step(y, 300.0, 350.0) {
                    return steps;
                }
            }
            panic!("jump arc never landed, y = {y}");
        }

        #[test]
        fn takeoff_below_rest_starts_from_rest() {
            let mut arc = JumpArc::default();
            let mut y = 200.0;
            assert!(!arc.step(&mut y, 300.0, 350.0));
            assert_eq!(y, 301.0);
        }

        #[test]
        fn takeoff_inside_band_still_lands_on_rest() {
            let mut from_rest = JumpArc::default();
            let mut rest_y = 300.0;
            let expected = steps_to_land(&mut from_rest, &mut rest_y);

            let mut arc = JumpArc::default();
            let mut y = 320.0;
            assert_eq!(steps_to_land(&mut arc, &mut y), expected);
            assert_eq!(y, 300.0);
            assert!(!arc.is_airborne());
        }

        #[test]
        fn takeoff_above_apex_still_lands_on_rest() {
            let mut arc = JumpArc::default();
            let mut y = 500.0;
            steps_to_land(&mut arc, &mut y);
            assert_eq!(y, 300.0);
        }
    }

    mod fighter_tests {
        use super::*;

        #[test]
        fn held_pose_expires() {
            let mut fighter = FighterState::default();
            fighter.set_pose(Pose::Punch, 2);
            assert_eq!(fighter.current_pose(300.0, 300.0, 15.0), Pose::Punch);
            fighter.tick_pose();
            assert_eq!(fighter.current_pose(300.0, 300.0, 15.0), Pose::Punch);
            fighter.tick_pose();
            assert_eq!(fighter.current_pose(300.0, 300.0, 15.0), Pose::Idle);
        }

        #[test]
        fn airborne_pose_needs_height() {
            let mut fighter = FighterState::default();
            let mut y = 300.0;
            fighter.jump.step(&mut y, 300.0, 350.0);
            assert_eq!(fighter.current_pose(y, 300.0, 15.0), Pose::Idle);
            assert_eq!(fighter.current_pose(320.0, 300.0, 15.0), Pose::Jump);
        }
    }

    mod crow_tests {
        use super::*;

        #[test]
        fn flight_starts_at_spawn_height() {
            let mut flight = CrowFlight::new(200.0, 1.3);
            let y = flight.flap(0.0, 0.0);
            assert!((y - 200.0).abs() < 1e-4);
        }

        #[test]
        fn bob_stays_within_amplitude() {
            let mut flight = CrowFlight::new(200.0, 0.0);
            for _ in 0..100 {
                let y = flight.flap(1.0, 0.0);
                assert!((y - 200.0).abs() <= CROW_FLAP_AMPLITUDE + 1e-4);
            }
        }
    }
}

//! Game object model.
//!
//! This module provides the core object types for the Wingbrawl object manager:
//! - [`ObjectId`]: Stable handle for an object owned by the manager
//! - [`ObjectType`]: Closed set of object kinds, with the successor table
//! - [`GameObject`]: The mutable entity (position, velocity, lifetime, animation)
//!
//! # Architecture
//!
//! Type-specific behavior is chosen by tag, not by dynamic dispatch:
//! - `ObjectType` decides collision role and next incarnation
//! - [`Behavior`] (picked once at construction) decides how the object moves
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use wingbrawl_core::config::ObjectTemplate;
//! use wingbrawl_core::object::{Behavior, GameObject, ObjectId, ObjectType};
//!
//! let bullet = GameObject::new(
//!     ObjectId::new(7),
//!     ObjectType::Bullet,
//!     "bullet",
//!     Vec3::new(10.0, 20.0, 0.0),
//!     Vec3::new(-10.0, 0.0, 0.0),
//!     &ObjectTemplate::default(),
//!     Behavior::Linear,
//!     0,
//! );
//!
//! assert_eq!(bullet.id().as_u64(), 7);
//! assert!(bullet.kind().is_projectile());
//! assert!(!bullet.is_dead());
//! ```

pub mod components;

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::capability::DrawCommand;
use crate::config::{ArenaSettings, ObjectTemplate};

pub use components::{
    Animation, Behavior, CrowFlight, FighterState, JumpArc, Lifetime, ObjectFlags, Pose, SpriteId,
    FALL_GRAVITY,
};

/// Stable handle for an object owned by the [`ObjectManager`](crate::manager::ObjectManager).
///
/// Handles are assigned monotonically and never reused, so a handle to a
/// reclaimed object simply stops resolving.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates an `ObjectId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this handle.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Object kind.
///
/// `Unknown` is the sentinel produced when a type name fails to resolve; it
/// is distinct from every real kind and has no type-specific behavior.
///
/// # Next incarnation
///
/// A dying object is replaced by its successor, if it has one:
/// `Crow -> ExplodingCrow -> DeadCrow -> (none)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Player-controlled fighter.
    Plane,
    /// Projectile fired from a gun.
    Bullet,
    /// Flying crow, the target.
    Crow,
    /// Crow playing its explosion animation.
    ExplodingCrow,
    /// Crow carcass falling to the floor.
    DeadCrow,
    /// Unresolved type name.
    Unknown,
}

impl ObjectType {
    /// Every real kind, excluding the `Unknown` sentinel.
    pub const ALL: [Self; 5] = [
        Self::Plane,
        Self::Bullet,
        Self::Crow,
        Self::ExplodingCrow,
        Self::DeadCrow,
    ];

    /// The kind that replaces a dying object of this kind.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Crow => Some(Self::ExplodingCrow),
            Self::ExplodingCrow => Some(Self::DeadCrow),
            Self::Plane | Self::Bullet | Self::DeadCrow | Self::Unknown => None,
        }
    }

    /// Returns `true` for kinds that initiate collision checks.
    #[must_use]
    pub const fn is_projectile(self) -> bool {
        matches!(self, Self::Bullet)
    }

    /// Returns `false` only for the `Unknown` sentinel.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Conventional type name, also used to name spawned successors.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Plane => "plane",
            Self::Bullet => "bullet",
            Self::Crow => "crow",
            Self::ExplodingCrow => "explodingcrow",
            Self::DeadCrow => "deadcrow",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_name())
    }
}

/// Per-tick inputs for [`GameObject::advance`].
#[derive(Debug, Clone, Copy)]
pub struct AdvanceContext<'a> {
    /// Current clock time.
    pub now_ms: u64,
    /// Milliseconds per motion frame; velocities are units per motion frame.
    pub motion_frame_ms: f32,
    /// Fighter and floor geometry.
    pub arena: &'a ArenaSettings,
}

/// A game object: a named, typed entity with motion, lifetime and animation.
///
/// Fields are reachable only through accessors. The manager drives motion,
/// culling and tombstoning; the renderer reads a [`DrawCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    id: ObjectId,
    kind: ObjectType,
    name: String,
    position: Vec3,
    velocity: Vec3,
    orientation: f32,
    sprite: Option<SpriteId>,
    lifetime: Lifetime,
    animation: Animation,
    flags: ObjectFlags,
    behavior: Behavior,
    last_move_ms: u64,
}

impl GameObject {
    /// Creates an object from a template at clock time `now_ms`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ObjectId,
        kind: ObjectType,
        name: impl Into<String>,
        position: Vec3,
        velocity: Vec3,
        template: &ObjectTemplate,
        behavior: Behavior,
        now_ms: u64,
    ) -> Self {
        let mut flags = ObjectFlags::empty();
        flags.set(ObjectFlags::VULNERABLE, template.vulnerable);

        Self {
            id,
            kind,
            name: name.into(),
            position,
            velocity,
            orientation: 0.0,
            sprite: template.sprite,
            lifetime: Lifetime::new(now_ms, template.life_span_ms),
            animation: Animation::new(
                template.frame_count,
                template.cycles,
                template.frame_interval_ms,
                now_ms,
            ),
            flags,
            behavior,
            last_move_ms: now_ms,
        }
    }

    /// Returns the object's handle.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the object's kind.
    #[must_use]
    pub const fn kind(&self) -> ObjectType {
        self.kind
    }

    /// Returns the name given at creation.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current position; `z` orders drawing only.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the object.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Current velocity, in units per motion frame.
    #[must_use]
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Replaces the velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Facing angle in radians; zero faces the negative x axis when firing.
    #[must_use]
    pub const fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Sets the facing angle.
    pub fn set_orientation(&mut self, radians: f32) {
        self.orientation = radians;
    }

    /// Sprite drawn for this object, if any.
    #[must_use]
    pub const fn sprite(&self) -> Option<SpriteId> {
        self.sprite
    }

    /// Replaces the sprite, or hides the object with `None`.
    pub fn set_sprite(&mut self, sprite: Option<SpriteId>) {
        self.sprite = sprite;
    }

    /// Birth time and life span.
    #[must_use]
    pub const fn lifetime(&self) -> &Lifetime {
        &self.lifetime
    }

    /// Animation counters.
    #[must_use]
    pub const fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Mutable animation counters.
    pub fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }

    /// Motion policy.
    #[must_use]
    pub const fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Returns `true` once the tombstone flag is set.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.flags.contains(ObjectFlags::DEAD)
    }

    /// Sets the tombstone flag. There is no way to clear it.
    pub fn kill(&mut self) {
        self.flags.insert(ObjectFlags::DEAD);
    }

    /// Returns `true` if a projectile can kill this object.
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        self.flags.contains(ObjectFlags::VULNERABLE)
    }

    /// Fighter state, if this object is a fighter.
    #[must_use]
    pub const fn fighter(&self) -> Option<&FighterState> {
        match &self.behavior {
            Behavior::Fighter(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable fighter state, if this object is a fighter.
    #[must_use]
    pub fn fighter_mut(&mut self) -> Option<&mut FighterState> {
        match &mut self.behavior {
            Behavior::Fighter(state) => Some(state),
            _ => None,
        }
    }

    /// Applies one tick of motion for the time elapsed since the last move.
    ///
    /// Straight-line kinds integrate their velocity. Fighters additionally
    /// continue an airborne jump arc by one step and count down their pose.
    /// Crows bob around their flight altitude. Falling objects accelerate
    /// downwards until they rest on the floor.
    #[allow(clippy::cast_precision_loss)]
    pub fn advance(&mut self, ctx: &AdvanceContext<'_>) {
        let elapsed = ctx.now_ms.saturating_sub(self.last_move_ms);
        self.last_move_ms = ctx.now_ms;
        let frames = if ctx.motion_frame_ms > 0.0 {
            elapsed as f32 / ctx.motion_frame_ms
        } else {
            0.0
        };

        match &mut self.behavior {
            Behavior::Linear => {
                self.position += self.velocity * frames;
            }
            Behavior::Fighter(fighter) => {
                self.position += self.velocity * frames;
                if fighter.jump.is_airborne() {
                    fighter.jump.step(
                        &mut self.position.y,
                        ctx.arena.rest_height,
                        ctx.arena.apex_height,
                    );
                }
                fighter.tick_pose();
            }
            Behavior::Crow(flight) => {
                self.position.x += self.velocity.x * frames;
                self.position.z += self.velocity.z * frames;
                self.position.y = flight.flap(frames, self.velocity.y);
            }
            Behavior::Falling => {
                let floor = ctx.arena.floor_height;
                if self.position.y > floor {
                    self.velocity.y -= FALL_GRAVITY * frames;
                    self.position += self.velocity * frames;
                    if self.position.y <= floor {
                        self.position.y = floor;
                        self.velocity = Vec3::ZERO;
                    }
                }
            }
        }
    }

    /// Draw request for the current frame, or `None` if there is no sprite.
    #[must_use]
    pub fn draw_command(&self, arena: &ArenaSettings) -> Option<DrawCommand<'_>> {
        let sprite = self.sprite?;
        let pose = self.fighter().map(|fighter| {
            fighter.current_pose(self.position.y, arena.rest_height, arena.jump_pose_rise)
        });
        Some(DrawCommand {
            id: self.id,
            name: &self.name,
            kind: self.kind,
            sprite,
            frame: self.animation.visible_frame(),
            pose,
            position: self.position,
        })
    }
}

//! Distance and projectile collision sweep.
//!
//! The sweep works on a snapshot of collider data rather than on live objects,
//! so it can be run and tested without a manager. The manager applies the
//! resulting [`Hit`]s afterwards: it tombstones both parties and spawns the
//! target's successor.
//!
//! # Wrap correction
//!
//! The world repeats every `world_width` units on x. When the raw x gap
//! between two objects exceeds the world width it is shortened by one world
//! width before squaring. Gaps of exactly or below one world width are used
//! as is, so two objects on opposite sides of the seam can still read as far
//! apart; wrap correction around the anchor keeps this case rare.

use std::collections::HashSet;

use glam::Vec3;

use crate::object::{ObjectId, ObjectType};

/// Distance returned when either side of a query is missing.
///
/// Negative, so it never passes a `< radius` collision test.
pub const INVALID_DISTANCE: f32 = -1.0;

/// Collision-relevant snapshot of one live object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// Object handle.
    pub id: ObjectId,
    /// Object kind; projectiles initiate checks.
    pub kind: ObjectType,
    /// Position at the time of the sweep.
    pub position: Vec3,
    /// Whether a projectile can kill this object.
    pub vulnerable: bool,
}

/// A projectile striking a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// The projectile, which dies.
    pub projectile: ObjectId,
    /// The object struck, which dies and is replaced by its successor.
    pub target: ObjectId,
}

/// Planar distance between two positions with the x wrap correction.
///
/// `z` is ignored.
#[must_use]
pub fn wrapped_distance(a: Vec3, b: Vec3, world_width: f32) -> f32 {
    let mut dx = (a.x - b.x).abs();
    if dx > world_width {
        dx -= world_width;
    }
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Runs one collision pass.
///
/// Each projectile is tested against every other collider in slice order. A
/// hit needs a vulnerable target strictly closer than `radius`. Both parties
/// are dead from then on: a projectile stops at its first target, and a dead
/// target cannot be hit again in the same pass, so each target yields at most
/// one [`Hit`].
#[must_use]
pub fn sweep(colliders: &[Collider], world_width: f32, radius: f32) -> Vec<Hit> {
    let mut dead: HashSet<ObjectId> = HashSet::new();
    let mut hits = Vec::new();

    for projectile in colliders.iter().filter(|c| c.kind.is_projectile()) {
        if dead.contains(&projectile.id) {
            continue;
        }

        for target in colliders {
            if target.id == projectile.id || !target.vulnerable || dead.contains(&target.id) {
                continue;
            }
            let distance = wrapped_distance(projectile.position, target.position, world_width);
            if distance < radius {
                dead.insert(projectile.id);
                dead.insert(target.id);
                hits.push(Hit {
                    projectile: projectile.id,
                    target: target.id,
                });
                break;
            }
        }
    }

    hits
}

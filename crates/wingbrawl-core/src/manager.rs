//! Object manager: owner of the whole object population.
//!
//! The `ObjectManager` creates, indexes, advances, collides, culls and
//! reclaims every [`GameObject`]. No other component removes an object.
//!
//! # Tick phases
//!
//! [`ObjectManager::tick`] runs five phases in a fixed order:
//!
//! 1. **Move**: every live object advances by the time since its last move
//! 2. **Wrap**: every object other than the anchor is pulled back to within
//!    one screen width of the anchor's x position
//! 3. **Collide**: projectiles are swept against the population
//! 4. **Cull**: expired objects and finished one-shot animations die
//! 5. **Reclaim**: tombstoned objects are unlinked and dropped
//!
//! Phases 3 and 4 only set tombstones and queue successors; nothing is
//! unlinked until phase 5, so both see a stable list.
//!
//! # Storage
//!
//! Objects live in a `BTreeMap` keyed by monotonically assigned [`ObjectId`]s.
//! Draw order is kept separately in a live list with the newest object at the
//! front. The name index maps a name to the first live object created under
//! it; later objects with the same name are reachable only through the list.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glam::Vec3;
//! use wingbrawl_core::capability::ManualClock;
//! use wingbrawl_core::manager::ObjectManager;
//! use wingbrawl_core::object::ObjectType;
//!
//! let clock = Arc::new(ManualClock::new());
//! let mut manager = ObjectManager::with_defaults(clock.clone());
//!
//! let plane = manager.create(ObjectType::Plane, "plane", Vec3::new(626.0, 300.0, 0.0), Vec3::ZERO);
//! assert_eq!(manager.anchor(), Some(plane));
//! assert_eq!(manager.lookup("plane"), Some(plane));
//!
//! clock.advance(20);
//! let report = manager.tick();
//! assert_eq!(report.live, 1);
//! ```

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::f32::consts::TAU;
use std::sync::Arc;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::capability::{Clock, RenderSink};
use crate::collision::{self, Collider, INVALID_DISTANCE};
use crate::config::{ArenaSettings, GameConfig, GunSettings, ObjectTemplates};
use crate::fire::FireGate;
use crate::object::{
    AdvanceContext, Behavior, CrowFlight, FighterState, GameObject, ObjectId, ObjectType,
};
use crate::registry::TypeRegistry;

// =============================================================================
// Reports
// =============================================================================

/// Summary of one [`ObjectManager::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Objects created since the previous tick, including successors spawned
    /// during this one.
    pub created: usize,
    /// Projectile hits resolved.
    pub collisions: usize,
    /// Objects killed by age or a finished one-shot animation.
    pub culled: usize,
    /// Objects unlinked and dropped.
    pub reclaimed: usize,
    /// Live objects after reclamation.
    pub live: usize,
}

/// Lifetime population counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Objects ever created.
    pub created: u64,
    /// Objects ever reclaimed.
    pub reclaimed: u64,
}

impl PopulationStats {
    /// Objects currently alive according to the counters.
    #[must_use]
    pub const fn live(&self) -> u64 {
        self.created - self.reclaimed
    }
}

// =============================================================================
// ObjectManager
// =============================================================================

/// Owner of every game object.
pub struct ObjectManager {
    clock: Arc<dyn Clock>,
    registry: TypeRegistry,
    templates: ObjectTemplates,
    arena: ArenaSettings,
    gun: GunSettings,
    fire_gate: FireGate,
    rng: ChaCha8Rng,

    objects: BTreeMap<ObjectId, GameObject>,
    /// Newest first; reordered by depth on every render.
    live: VecDeque<ObjectId>,
    names: HashMap<String, ObjectId>,

    anchor_name: String,
    anchor: Option<ObjectId>,

    world_width: f32,
    collision_radius: f32,
    motion_frame_ms: f32,

    next_id: u64,
    tick: u64,
    created_since_tick: usize,
    stats: PopulationStats,
}

impl std::fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectManager")
            .field("live", &self.live.len())
            .field("anchor", &self.anchor)
            .field("tick", &self.tick)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl ObjectManager {
    /// Creates an empty manager from settings.
    ///
    /// Registers the configured type names but creates no objects; placements
    /// are the caller's to create.
    #[must_use]
    pub fn new(config: &GameConfig, clock: Arc<dyn Clock>) -> Self {
        let registry = config
            .types
            .iter()
            .map(|(name, kind)| (name.clone(), *kind))
            .collect();

        Self {
            clock,
            registry,
            templates: config.templates.clone(),
            arena: config.arena,
            gun: config.gun,
            fire_gate: FireGate::new(config.gun.policy),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            objects: BTreeMap::new(),
            live: VecDeque::new(),
            names: HashMap::new(),
            anchor_name: config.anchor_name.clone(),
            anchor: None,
            world_width: config.world_width(),
            collision_radius: config.collision_radius,
            motion_frame_ms: config.motion_frame_ms,
            next_id: 0,
            tick: 0,
            created_since_tick: 0,
            stats: PopulationStats::default(),
        }
    }

    /// Creates an empty manager with default settings.
    #[must_use]
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(&GameConfig::default(), clock)
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Creates an object and links it at the front of the live list.
    ///
    /// The name is indexed only if no live object already holds it. An object
    /// indexed under the anchor name becomes the anchor.
    pub fn create(
        &mut self,
        kind: ObjectType,
        name: &str,
        position: Vec3,
        velocity: Vec3,
    ) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;

        let behavior = self.behavior_for(kind, position);
        let object = GameObject::new(
            id,
            kind,
            name,
            position,
            velocity,
            self.templates.get(kind),
            behavior,
            self.clock.now_ms(),
        );

        self.objects.insert(id, object);
        self.live.push_front(id);

        if !self.names.contains_key(name) {
            self.names.insert(name.to_string(), id);
            if self.anchor.is_none() && name == self.anchor_name {
                debug!(%id, name, "anchor bound");
                self.anchor = Some(id);
            }
        }

        self.created_since_tick += 1;
        self.stats.created += 1;
        trace!(%id, name, %kind, x = position.x, y = position.y, "object created");
        id
    }

    /// Creates a stationary object from a registered type name.
    ///
    /// An unresolvable name yields an object of kind [`ObjectType::Unknown`].
    pub fn create_by_type_name(&mut self, type_name: &str, name: &str, position: Vec3) -> ObjectId {
        let kind = self.registry.resolve(type_name);
        if !kind.is_known() {
            debug!(type_name, name, "unregistered type name, creating unknown object");
        }
        self.create(kind, name, position, Vec3::ZERO)
    }

    fn behavior_for(&mut self, kind: ObjectType, position: Vec3) -> Behavior {
        match kind {
            ObjectType::Plane => Behavior::Fighter(FighterState::default()),
            ObjectType::Crow => {
                Behavior::Crow(CrowFlight::new(position.y, self.rng.gen_range(0.0..TAU)))
            }
            ObjectType::DeadCrow => Behavior::Falling,
            ObjectType::Bullet | ObjectType::ExplodingCrow | ObjectType::Unknown => {
                Behavior::Linear
            }
        }
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Handle of the object indexed under `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    /// Object indexed under `name`.
    #[must_use]
    pub fn object_by_name(&self, name: &str) -> Option<&GameObject> {
        self.lookup(name).and_then(|id| self.get(id))
    }

    /// Object for a handle, unless it has been reclaimed.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(&id)
    }

    /// Mutable object for a handle, unless it has been reclaimed.
    #[must_use]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(&id)
    }

    /// Live objects in live-list order: newest first, or depth order after
    /// a render.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> + '_ {
        self.live.iter().filter_map(|id| self.objects.get(id))
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Returns `true` if there are no live objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// The object world wrap is measured against, if it exists.
    #[must_use]
    pub const fn anchor(&self) -> Option<ObjectId> {
        self.anchor
    }

    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    /// Registers a type name, replacing any earlier mapping.
    pub fn register_type(&mut self, name: &str, kind: ObjectType) {
        self.registry.register(name, kind);
    }

    /// Resolves a type name, or [`ObjectType::Unknown`].
    #[must_use]
    pub fn resolve_type(&self, name: &str) -> ObjectType {
        self.registry.resolve(name)
    }

    /// The type-name registry.
    #[must_use]
    pub const fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    /// Fighter geometry.
    #[must_use]
    pub const fn arena(&self) -> &ArenaSettings {
        &self.arena
    }

    /// World width: the x period of the world.
    #[must_use]
    pub const fn world_width(&self) -> f32 {
        self.world_width
    }

    /// Current clock reading.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Lifetime creation and reclamation counts.
    #[must_use]
    pub const fn stats(&self) -> PopulationStats {
        self.stats
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Wrap-corrected planar distance between two objects, or
    /// [`INVALID_DISTANCE`] if either handle no longer resolves.
    #[must_use]
    pub fn distance(&self, a: ObjectId, b: ObjectId) -> f32 {
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => {
                collision::wrapped_distance(a.position(), b.position(), self.world_width)
            }
            _ => INVALID_DISTANCE,
        }
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    /// Fires a bullet from the gun of the object named `shooter`.
    ///
    /// Does nothing without an anchor, if no object holds the shooter's name,
    /// or while the gun is cooling down. The muzzle offset is rotated by the
    /// shooter's orientation and the shooter's velocity is added to the
    /// bullet's.
    pub fn fire_gun(&mut self, shooter: &str) -> Option<ObjectId> {
        if self.anchor.is_none() {
            debug!(shooter, anchor = %self.anchor_name, "fire ignored, no anchor");
            return None;
        }
        let Some(shooter_id) = self.lookup(shooter) else {
            debug!(shooter, "fire ignored, no such shooter");
            return None;
        };
        let (origin, angle, inherited) = {
            let object = self.get(shooter_id)?;
            (object.position(), object.orientation(), object.velocity())
        };

        if !self
            .fire_gate
            .try_fire(shooter, self.clock.as_ref(), self.gun.cooldown_ms)
        {
            debug!(shooter, "fire rate limited");
            return None;
        }

        let (sin, cos) = angle.sin_cos();
        let muzzle = self.gun.muzzle_offset;
        let position = origin
            + Vec3::new(
                muzzle.x * cos - muzzle.y * sin,
                muzzle.x * sin - muzzle.y * cos,
                0.0,
            );
        let velocity = self.gun.bullet_speed * Vec3::new(-cos, -sin, 0.0) + inherited;

        let bullet = ObjectType::Bullet;
        let id = self.create(bullet, bullet.default_name(), position, velocity);
        debug!(shooter, %id, "gun fired");
        Some(id)
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Runs one move, wrap, collide, cull and reclaim cycle.
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now_ms();
        self.tick += 1;

        self.advance_all(now);
        self.wrap_around_anchor();
        let collisions = self.detect_collisions();
        let culled = self.cull(now);
        let reclaimed = self.collect_garbage();

        let report = TickReport {
            tick: self.tick,
            created: std::mem::take(&mut self.created_since_tick),
            collisions,
            culled,
            reclaimed,
            live: self.live.len(),
        };
        debug!(
            tick = report.tick,
            created = report.created,
            collisions = report.collisions,
            culled = report.culled,
            reclaimed = report.reclaimed,
            live = report.live,
            "tick complete"
        );
        report
    }

    fn advance_all(&mut self, now: u64) {
        let ctx = AdvanceContext {
            now_ms: now,
            motion_frame_ms: self.motion_frame_ms,
            arena: &self.arena,
        };
        for id in &self.live {
            if let Some(object) = self.objects.get_mut(id) {
                object.advance(&ctx);
            }
        }
    }

    fn wrap_around_anchor(&mut self) {
        let Some(anchor) = self.anchor else {
            debug!("no anchor, wrap skipped");
            return;
        };
        let Some(anchor_x) = self.objects.get(&anchor).map(|a| a.position().x) else {
            return;
        };

        let reach = self.world_width / 2.0;
        for (id, object) in &mut self.objects {
            if *id == anchor {
                continue;
            }
            let mut position = object.position();
            if position.x > anchor_x + reach {
                position.x -= self.world_width;
            } else if position.x < anchor_x - reach {
                position.x += self.world_width;
            } else {
                continue;
            }
            object.set_position(position);
        }
    }

    fn detect_collisions(&mut self) -> usize {
        let colliders: Vec<Collider> = self
            .iter()
            .filter(|object| !object.is_dead())
            .map(|object| Collider {
                id: object.id(),
                kind: object.kind(),
                position: object.position(),
                vulnerable: object.is_vulnerable(),
            })
            .collect();

        let hits = collision::sweep(&colliders, self.world_width, self.collision_radius);
        let mut successors = Vec::new();
        for hit in &hits {
            if let Some(projectile) = self.objects.get_mut(&hit.projectile) {
                projectile.kill();
            }
            if let Some(target) = self.objects.get_mut(&hit.target) {
                target.kill();
                debug!(projectile = %hit.projectile, target = %hit.target, kind = %target.kind(), "hit");
                successors.extend(Self::successor_of(target));
            }
        }
        self.spawn_all(successors);
        hits.len()
    }

    fn cull(&mut self, now: u64) -> usize {
        let mut culled = 0;
        let mut successors = Vec::new();
        for id in &self.live {
            let Some(object) = self.objects.get_mut(id) else {
                continue;
            };
            if object.is_dead() {
                continue;
            }
            let expired = object.lifetime().is_expired(now);
            let finished = object.animation().is_complete();
            if expired || finished {
                object.kill();
                culled += 1;
                trace!(%id, expired, finished, "object culled");
            }
            if finished {
                successors.extend(Self::successor_of(object));
            }
        }
        self.spawn_all(successors);
        culled
    }

    fn collect_garbage(&mut self) -> usize {
        let dead: Vec<ObjectId> = self
            .live
            .iter()
            .copied()
            .filter(|id| self.objects.get(id).map_or(true, GameObject::is_dead))
            .collect();
        if dead.is_empty() {
            return 0;
        }

        self.live
            .retain(|id| self.objects.get(id).is_some_and(|object| !object.is_dead()));

        for id in &dead {
            let Some(object) = self.objects.remove(id) else {
                continue;
            };
            if self.names.get(object.name()) == Some(id) {
                self.names.remove(object.name());
            }
            if self.anchor == Some(*id) {
                debug!(%id, "anchor reclaimed, wrap disabled until a new anchor is created");
                self.anchor = None;
            }
            trace!(%id, name = object.name(), "object reclaimed");
        }

        self.stats.reclaimed += dead.len() as u64;
        dead.len()
    }

    fn successor_of(object: &GameObject) -> Option<(ObjectType, Vec3, Vec3)> {
        object
            .kind()
            .successor()
            .map(|next| (next, object.position(), object.velocity()))
    }

    fn spawn_all(&mut self, successors: Vec<(ObjectType, Vec3, Vec3)>) {
        for (kind, position, velocity) in successors {
            self.create(kind, kind.default_name(), position, velocity);
        }
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Draws every live object, farthest first.
    ///
    /// The live list is stably sorted by descending z, so objects at equal
    /// depth keep their relative order. Each object's animation advances
    /// after it is drawn.
    pub fn render(&mut self, sink: &mut dyn RenderSink) {
        let now = self.clock.now_ms();
        let objects = &mut self.objects;

        self.live.make_contiguous().sort_by(|a, b| {
            let za = objects.get(a).map_or(f32::NEG_INFINITY, |o| o.position().z);
            let zb = objects.get(b).map_or(f32::NEG_INFINITY, |o| o.position().z);
            zb.total_cmp(&za)
        });

        for id in &self.live {
            let Some(object) = objects.get_mut(id) else {
                continue;
            };
            if let Some(command) = object.draw_command(&self.arena) {
                sink.draw(&command);
            }
            object.animation_mut().advance(now);
        }
    }
}

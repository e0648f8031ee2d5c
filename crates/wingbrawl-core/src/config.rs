//! Game settings.
//!
//! [`GameConfig`] is the settings source the host reads once at startup: the
//! type names to register, per-type object templates, initial placements and
//! the tuning constants for the world, the gun and the fighters. Every field
//! has a default, so a settings file only lists what it overrides.
//!
//! # Example
//!
//! ```
//! use wingbrawl_core::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "screen_width": 800.0 }"#).unwrap();
//! assert_eq!(config.screen_width, 800.0);
//! assert_eq!(config.anchor_name, "plane");
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fire::FirePolicy;
use crate::object::{ObjectType, SpriteId};

// =============================================================================
// Object templates
// =============================================================================

/// Construction settings shared by every object of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTemplate {
    /// Sprite to draw; objects without one are never drawn.
    pub sprite: Option<SpriteId>,
    /// Maximum age in milliseconds; `<= 0` is immortal.
    pub life_span_ms: i64,
    /// Frames in the sprite strip.
    pub frame_count: u32,
    /// Minimum time between animation frames.
    pub frame_interval_ms: u64,
    /// Loop the animation instead of playing it once.
    pub cycles: bool,
    /// Projectiles can kill objects of this kind.
    pub vulnerable: bool,
}

impl Default for ObjectTemplate {
    fn default() -> Self {
        Self {
            sprite: None,
            life_span_ms: 0,
            frame_count: 1,
            frame_interval_ms: 100,
            cycles: false,
            vulnerable: false,
        }
    }
}

/// One template per object kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectTemplates {
    /// Fighters.
    pub plane: ObjectTemplate,
    /// Gun projectiles.
    pub bullet: ObjectTemplate,
    /// Flying crows.
    pub crow: ObjectTemplate,
    /// Exploding crows.
    pub exploding_crow: ObjectTemplate,
    /// Dead crows.
    pub dead_crow: ObjectTemplate,
    /// Objects whose type name did not resolve.
    pub unknown: ObjectTemplate,
}

impl ObjectTemplates {
    /// Template for `kind`.
    #[must_use]
    pub const fn get(&self, kind: ObjectType) -> &ObjectTemplate {
        match kind {
            ObjectType::Plane => &self.plane,
            ObjectType::Bullet => &self.bullet,
            ObjectType::Crow => &self.crow,
            ObjectType::ExplodingCrow => &self.exploding_crow,
            ObjectType::DeadCrow => &self.dead_crow,
            ObjectType::Unknown => &self.unknown,
        }
    }
}

impl Default for ObjectTemplates {
    fn default() -> Self {
        Self {
            plane: ObjectTemplate {
                sprite: Some(SpriteId::new(3)),
                ..ObjectTemplate::default()
            },
            bullet: ObjectTemplate {
                sprite: Some(SpriteId::new(19)),
                life_span_ms: 1000,
                ..ObjectTemplate::default()
            },
            crow: ObjectTemplate {
                sprite: Some(SpriteId::new(20)),
                frame_count: 4,
                frame_interval_ms: 120,
                cycles: true,
                vulnerable: true,
                ..ObjectTemplate::default()
            },
            exploding_crow: ObjectTemplate {
                sprite: Some(SpriteId::new(21)),
                frame_count: 8,
                frame_interval_ms: 60,
                ..ObjectTemplate::default()
            },
            dead_crow: ObjectTemplate {
                sprite: Some(SpriteId::new(22)),
                life_span_ms: 3000,
                ..ObjectTemplate::default()
            },
            unknown: ObjectTemplate::default(),
        }
    }
}

// =============================================================================
// Tuning sections
// =============================================================================

/// Fighter playfield and jump geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    /// Leftmost x a fighter can walk to.
    pub playfield_min: f32,
    /// Rightmost x a fighter can walk to.
    pub playfield_max: f32,
    /// Closest the two fighters can stand on the x axis.
    pub separation: f32,
    /// Distance covered by one walk step.
    pub walk_step: f32,
    /// Standing height; jumps start and end here.
    pub rest_height: f32,
    /// Height above which a jump decelerates.
    pub apex_height: f32,
    /// Rise above rest at which the jump pose is shown.
    pub jump_pose_rise: f32,
    /// Horizontal distance within which punches and kicks land.
    pub attack_reach: f32,
    /// Ticks an action pose is held.
    pub action_pose_frames: u32,
    /// Height at which falling objects come to rest.
    pub floor_height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            playfield_min: 338.0,
            playfield_max: 688.0,
            separation: 35.0,
            walk_step: 5.0,
            rest_height: 300.0,
            apex_height: 350.0,
            jump_pose_rise: 15.0,
            attack_reach: 50.0,
            action_pose_frames: 4,
            floor_height: 64.0,
        }
    }
}

/// Gun tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunSettings {
    /// Minimum time between shots.
    pub cooldown_ms: u64,
    /// Muzzle offset from the shooter's centre, before rotation.
    pub muzzle_offset: Vec2,
    /// Bullet speed relative to the shooter, in units per motion frame.
    pub bullet_speed: f32,
    /// How the cooldown is shared between shooters.
    pub policy: FirePolicy,
}

impl Default for GunSettings {
    fn default() -> Self {
        Self {
            cooldown_ms: 200,
            muzzle_offset: Vec2::new(-48.0, -17.0),
            bullet_speed: 10.0,
            policy: FirePolicy::SharedCooldown,
        }
    }
}

/// Names of the two fighters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FighterNames {
    /// Right-hand fighter; normally also the anchor.
    pub right: String,
    /// Left-hand fighter.
    pub left: String,
}

impl Default for FighterNames {
    fn default() -> Self {
        Self {
            right: "plane".to_string(),
            left: "plane2".to_string(),
        }
    }
}

/// A named object created before the first tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Registered type name.
    pub type_name: String,
    /// Object name.
    pub name: String,
    /// Starting position.
    pub position: Vec3,
    /// Starting velocity.
    #[serde(default)]
    pub velocity: Vec3,
    /// Starting facing angle in radians.
    #[serde(default)]
    pub orientation: f32,
    /// Overrides the type's sprite.
    #[serde(default)]
    pub sprite: Option<SpriteId>,
}

impl Placement {
    /// A stationary placement.
    #[must_use]
    pub fn new(type_name: &str, name: &str, position: Vec3) -> Self {
        Self {
            type_name: type_name.to_string(),
            name: name.to_string(),
            position,
            velocity: Vec3::ZERO,
            orientation: 0.0,
            sprite: None,
        }
    }

    /// Sets the starting velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the sprite override.
    #[must_use]
    pub fn with_sprite(mut self, sprite: SpriteId) -> Self {
        self.sprite = Some(sprite);
        self
    }
}

// =============================================================================
// GameConfig
// =============================================================================

/// Complete game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width; the world wraps at twice this.
    pub screen_width: f32,
    /// Screen height.
    pub screen_height: f32,
    /// Name of the object that world wrap is measured against.
    pub anchor_name: String,
    /// Projectile hit distance.
    pub collision_radius: f32,
    /// Milliseconds per motion frame.
    pub motion_frame_ms: f32,
    /// Seed for the deterministic RNG.
    pub seed: u64,
    /// Type names to register.
    pub types: BTreeMap<String, ObjectType>,
    /// Per-kind templates.
    pub templates: ObjectTemplates,
    /// Objects to create before the first tick.
    pub placements: Vec<Placement>,
    /// Fighter names.
    pub fighters: FighterNames,
    /// Gun tuning.
    pub gun: GunSettings,
    /// Fighter geometry.
    pub arena: ArenaSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        let types = ObjectType::ALL
            .iter()
            .map(|kind| (kind.default_name().to_string(), *kind))
            .collect();

        Self {
            screen_width: 1024.0,
            screen_height: 768.0,
            anchor_name: "plane".to_string(),
            collision_radius: 15.0,
            motion_frame_ms: 20.0,
            seed: 0,
            types,
            templates: ObjectTemplates::default(),
            placements: vec![
                Placement::new("plane", "plane", Vec3::new(626.0, 300.0, 0.0)),
                Placement::new("plane", "plane2", Vec3::new(400.0, 300.0, -10.0))
                    .with_sprite(SpriteId::new(4)),
                Placement::new("crow", "crow", Vec3::new(120.0, 317.0, 5.0))
                    .with_velocity(Vec3::new(1.0, 0.0, 0.0)),
                Placement::new("crow", "crow2", Vec3::new(40.0, 325.0, 8.0))
                    .with_velocity(Vec3::new(1.5, 0.0, 0.0)),
                Placement::new("crow", "crow3", Vec3::new(-220.0, 310.0, 12.0))
                    .with_velocity(Vec3::new(2.0, 0.0, 0.0)),
            ],
            fighters: FighterNames::default(),
            gun: GunSettings::default(),
            arena: ArenaSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parses and validates settings from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the errors of
    /// [`GameConfig::validate`] for unusable values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// errors of [`GameConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// World width: the distance at which positions wrap.
    #[must_use]
    pub fn world_width(&self) -> f32 {
        2.0 * self.screen_width
    }

    /// Checks that the settings describe a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first unusable value and
    /// [`ConfigError::UnknownType`] for a placement whose type name is not
    /// in `types`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.screen_width.is_finite() && self.screen_width > 0.0) {
            return Err(ConfigError::invalid("screen_width", "must be positive"));
        }
        if !(self.screen_height.is_finite() && self.screen_height > 0.0) {
            return Err(ConfigError::invalid("screen_height", "must be positive"));
        }
        if self.anchor_name.is_empty() {
            return Err(ConfigError::invalid("anchor_name", "must not be empty"));
        }
        if !(self.collision_radius > 0.0) {
            return Err(ConfigError::invalid("collision_radius", "must be positive"));
        }
        if !(self.motion_frame_ms > 0.0) {
            return Err(ConfigError::invalid("motion_frame_ms", "must be positive"));
        }

        let arena = &self.arena;
        if !(arena.playfield_min < arena.playfield_max) {
            return Err(ConfigError::invalid(
                "arena.playfield_min",
                format!(
                    "{} is not below playfield_max {}",
                    arena.playfield_min, arena.playfield_max
                ),
            ));
        }
        if arena.separation < 0.0 {
            return Err(ConfigError::invalid("arena.separation", "must not be negative"));
        }
        if !(arena.walk_step > 0.0) {
            return Err(ConfigError::invalid("arena.walk_step", "must be positive"));
        }
        if !(arena.apex_height > arena.rest_height) {
            return Err(ConfigError::invalid(
                "arena.apex_height",
                "must be above rest_height",
            ));
        }

        for kind in ObjectType::ALL {
            if self.templates.get(kind).frame_count == 0 {
                return Err(ConfigError::invalid(
                    "templates.frame_count",
                    format!("{kind} needs at least one frame"),
                ));
            }
        }

        for placement in &self.placements {
            if !self.types.contains_key(&placement.type_name) {
                return Err(ConfigError::UnknownType {
                    name: placement.name.clone(),
                    type_name: placement.type_name.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn default_types_cover_every_kind() {
        let config = GameConfig::default();
        for kind in ObjectType::ALL {
            assert_eq!(config.types.get(kind.default_name()), Some(&kind));
        }
        assert_eq!(config.types.len(), ObjectType::ALL.len());
    }

    #[test]
    fn default_placements_include_both_fighters() {
        let config = GameConfig::default();
        let names: Vec<_> = config.placements.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"plane"));
        assert!(names.contains(&"plane2"));
    }

    #[test]
    fn templates_lookup_by_kind() {
        let templates = ObjectTemplates::default();
        assert!(templates.get(ObjectType::Crow).vulnerable);
        assert!(templates.get(ObjectType::Crow).cycles);
        assert!(!templates.get(ObjectType::ExplodingCrow).cycles);
        assert_eq!(templates.get(ObjectType::Bullet).life_span_ms, 1000);
        assert!(templates.get(ObjectType::Unknown).sprite.is_none());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "collision_radius": 20.0,
            "gun": { "cooldown_ms": 50 },
            "templates": { "bullet": { "life_span_ms": 250 } }
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.collision_radius, 20.0);
        assert_eq!(config.gun.cooldown_ms, 50);
        assert_eq!(config.gun.bullet_speed, 10.0);
        assert_eq!(config.templates.bullet.life_span_ms, 250);
        assert_eq!(config.templates.bullet.frame_count, 1);
        assert_eq!(config.screen_width, 1024.0);
    }

    #[test]
    fn fire_policy_parses() {
        let json = r#"{ "gun": { "policy": "per_shooter" } }"#;
        let config = GameConfig::from_json_str(json).unwrap();
        assert_eq!(config.gun.policy, FirePolicy::PerShooter);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_non_positive_screen_width() {
        let err = GameConfig::from_json_str(r#"{ "screen_width": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "screen_width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_inverted_playfield() {
        let mut config = GameConfig::default();
        config.arena.playfield_min = 700.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "arena.playfield_min",
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_frame_template() {
        let mut config = GameConfig::default();
        config.templates.crow.frame_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_unregistered_placement_type() {
        let mut config = GameConfig::default();
        config
            .placements
            .push(Placement::new("dragon", "puff", Vec3::ZERO));
        match config.validate() {
            Err(ConfigError::UnknownType { name, type_name }) => {
                assert_eq!(name, "puff");
                assert_eq!(type_name, "dragon");
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = GameConfig::load("/nonexistent/wingbrawl/settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn world_width_is_twice_screen() {
        let config = GameConfig::default();
        assert_eq!(config.world_width(), 2048.0);
    }

    #[test]
    fn serialization_roundtrip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back = GameConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

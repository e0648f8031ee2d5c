//! Fighter actions for the two-player duel.
//!
//! A [`Duel`] holds the handles of the right and left fighters and applies
//! [`FighterAction`]s to them through the [`ObjectManager`]. Walking is
//! clamped to the playfield and keeps the two fighters apart; jumping steps
//! the mover's own jump arc; punches and kicks play a sound and, in reach,
//! put the opponent into a hit pose.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::capability::{AudioSink, SoundId};
use crate::config::FighterNames;
use crate::manager::ObjectManager;
use crate::object::{ObjectId, Pose};

/// Which fighter an action is for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Right-hand fighter, normally the anchor.
    Right,
    /// Left-hand fighter.
    Left,
}

impl Side {
    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
        }
    }
}

/// A fighter input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterAction {
    /// Step towards smaller x.
    MoveLeft,
    /// Step towards larger x.
    MoveRight,
    /// Take off, or continue an arc in progress.
    Jump,
    /// Left-hand punch.
    LeftPunch,
    /// Right-hand punch.
    RightPunch,
    /// Left-foot kick.
    LeftKick,
    /// Right-foot kick.
    RightKick,
}

impl FighterAction {
    /// Attack pose and impact sound, or `None` for movement.
    #[must_use]
    pub const fn attack(self) -> Option<(Pose, SoundId)> {
        match self {
            Self::LeftPunch | Self::RightPunch => Some((Pose::Punch, SoundId::PUNCH)),
            Self::LeftKick | Self::RightKick => Some((Pose::Kick, SoundId::KICK)),
            Self::MoveLeft | Self::MoveRight | Self::Jump => None,
        }
    }
}

/// Result of [`Duel::perform`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// The fighter exists and the action was applied.
    pub performed: bool,
    /// An attack connected with the opponent.
    pub hit: bool,
}

/// The pair of fighters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Duel {
    right: Option<ObjectId>,
    left: Option<ObjectId>,
}

impl Duel {
    /// Creates a duel from explicit handles.
    #[must_use]
    pub const fn new(right: Option<ObjectId>, left: Option<ObjectId>) -> Self {
        Self { right, left }
    }

    /// Resolves both fighters by name.
    #[must_use]
    pub fn bind(manager: &ObjectManager, names: &FighterNames) -> Self {
        let duel = Self::new(manager.lookup(&names.right), manager.lookup(&names.left));
        if duel.right.is_none() || duel.left.is_none() {
            debug!(right = %names.right, left = %names.left, "duel bound with a missing fighter");
        }
        duel
    }

    /// Handle of the fighter on `side`.
    #[must_use]
    pub const fn fighter(&self, side: Side) -> Option<ObjectId> {
        match side {
            Side::Right => self.right,
            Side::Left => self.left,
        }
    }

    /// Applies `action` to the fighter on `side`.
    ///
    /// A missing or reclaimed fighter is skipped and reported as not
    /// performed. A missing opponent only disables separation and hits.
    pub fn perform(
        &self,
        manager: &mut ObjectManager,
        side: Side,
        action: FighterAction,
        audio: &mut dyn AudioSink,
    ) -> ActionOutcome {
        let Some(mover) = self.fighter(side) else {
            debug!(?side, ?action, "no fighter on this side");
            return ActionOutcome::default();
        };
        let opponent = self.fighter(side.opponent());
        let opponent_x = opponent
            .and_then(|id| manager.get(id))
            .map(|object| object.position().x);
        let arena = *manager.arena();

        let Some(object) = manager.get_mut(mover) else {
            debug!(%mover, ?action, "fighter has been reclaimed");
            return ActionOutcome::default();
        };
        let mut position = object.position();
        let Some(fighter) = object.fighter_mut() else {
            debug!(%mover, ?action, "object is not a fighter");
            return ActionOutcome::default();
        };

        trace!(%mover, ?side, ?action, "fighter action");
        match action {
            FighterAction::MoveLeft | FighterAction::MoveRight => {
                let step = if action == FighterAction::MoveLeft {
                    -arena.walk_step
                } else {
                    arena.walk_step
                };
                let mut x = (position.x + step).clamp(arena.playfield_min, arena.playfield_max);
                if let Some(other) = opponent_x {
                    x = match side {
                        Side::Right => x.max(other + arena.separation),
                        Side::Left => x.min(other - arena.separation),
                    };
                }
                position.x = x;
                fighter.set_pose(Pose::Walk, arena.action_pose_frames);
                object.set_position(position);
                ActionOutcome {
                    performed: true,
                    hit: false,
                }
            }
            FighterAction::Jump => {
                let taking_off = !fighter.jump.is_airborne();
                fighter
                    .jump
                    .step(&mut position.y, arena.rest_height, arena.apex_height);
                object.set_position(position);
                if taking_off {
                    audio.play(SoundId::JUMP);
                }
                ActionOutcome {
                    performed: true,
                    hit: false,
                }
            }
            FighterAction::LeftPunch
            | FighterAction::RightPunch
            | FighterAction::LeftKick
            | FighterAction::RightKick => {
                let Some((pose, sound)) = action.attack() else {
                    return ActionOutcome::default();
                };
                fighter.set_pose(pose, arena.action_pose_frames);
                audio.play(sound);

                let in_reach =
                    opponent_x.is_some_and(|other| (other - position.x).abs() <= arena.attack_reach);
                let mut hit = false;
                if in_reach {
                    if let Some(target) = opponent
                        .and_then(|id| manager.get_mut(id))
                        .and_then(|object| object.fighter_mut())
                    {
                        target.set_pose(Pose::Hit, arena.action_pose_frames);
                        hit = true;
                    }
                }
                if hit {
                    debug!(%mover, ?side, ?action, "attack connected");
                }
                ActionOutcome {
                    performed: true,
                    hit,
                }
            }
        }
    }
}

//! Scripted input for headless runs.
//!
//! Stands in for the keyboard: a fixed schedule of commands keyed by frame
//! number that walks the fighters together, trades blows, jumps, fires the
//! gun at the crows and flips the view.

use std::collections::BTreeMap;

use wingbrawl_core::config::FighterNames;
use wingbrawl_core::fighter::{FighterAction, Side};
use wingbrawl_core::GameCommand;

/// Frames between gun shots.
const FIRE_EVERY: u32 = 12;

/// Commands keyed by the frame they are issued on.
#[derive(Debug, Clone, Default)]
pub struct Script {
    steps: BTreeMap<u32, Vec<GameCommand>>,
}

impl Script {
    /// The demo sequence for the given fighters.
    pub fn demo(fighters: &FighterNames) -> Self {
        let mut script = Self::default();
        let fighter = |side, action| GameCommand::Fighter { side, action };

        for frame in (0..240).step_by(FIRE_EVERY as usize) {
            script.at(
                frame,
                GameCommand::Fire {
                    shooter: fighters.right.clone(),
                },
            );
        }

        for frame in 5..30 {
            script.at(frame, fighter(Side::Right, FighterAction::MoveLeft));
        }
        for frame in 10..20 {
            script.at(frame, fighter(Side::Left, FighterAction::MoveRight));
        }

        script.at(32, fighter(Side::Right, FighterAction::LeftPunch));
        script.at(36, fighter(Side::Left, FighterAction::RightKick));
        script.at(40, fighter(Side::Right, FighterAction::RightKick));
        script.at(44, fighter(Side::Left, FighterAction::LeftPunch));

        script.at(50, fighter(Side::Left, FighterAction::Jump));
        script.at(90, fighter(Side::Right, FighterAction::Jump));

        for frame in 130..150 {
            script.at(frame, fighter(Side::Left, FighterAction::MoveLeft));
            script.at(frame, fighter(Side::Right, FighterAction::MoveRight));
        }

        script.at(100, GameCommand::FlipCamera);
        script.at(160, GameCommand::FlipCamera);
        script.at(200, GameCommand::ToggleWireframe);
        script.at(220, GameCommand::ToggleWireframe);

        script.at(
            170,
            GameCommand::Fire {
                shooter: fighters.left.clone(),
            },
        );
        script
    }

    /// Schedules `command` on `frame`, after any already scheduled there.
    pub fn at(&mut self, frame: u32, command: GameCommand) {
        self.steps.entry(frame).or_default().push(command);
    }

    /// Commands for `frame`, in scheduling order.
    pub fn commands_at(&self, frame: u32) -> &[GameCommand] {
        self.steps.get(&frame).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total scheduled commands.
    pub fn len(&self) -> usize {
        self.steps.values().map(Vec::len).sum()
    }
}

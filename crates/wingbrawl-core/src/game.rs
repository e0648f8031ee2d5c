//! Game facade: the entry points the application shell drives.
//!
//! A [`Game`] is built once from a validated [`GameConfig`]. The shell then
//! feeds it input as [`GameCommand`]s and calls [`Game::move_frame`] followed
//! by [`Game::draw_frame`] once per frame.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use wingbrawl_core::capability::{AudioSink, ManualClock, SoundId};
//! use wingbrawl_core::config::GameConfig;
//! use wingbrawl_core::game::{Game, GameCommand};
//!
//! struct Silence;
//! impl AudioSink for Silence {
//!     fn play(&mut self, _sound: SoundId) {}
//! }
//!
//! let clock = Arc::new(ManualClock::new());
//! let mut game = Game::new(GameConfig::default(), clock.clone()).unwrap();
//!
//! assert!(game.handle(&GameCommand::Fire { shooter: "plane".into() }, &mut Silence));
//! clock.advance(20);
//! let report = game.move_frame();
//! assert!(report.live > 0);
//! assert!(!game.handle(&GameCommand::Quit, &mut Silence));
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::capability::{AudioSink, Clock, RenderSink};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::fighter::{Duel, FighterAction, Side};
use crate::manager::{ObjectManager, TickReport};
use crate::view::ViewState;

/// Input from the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GameCommand {
    /// Fire the gun of the named object.
    Fire {
        /// Shooter name.
        shooter: String,
    },
    /// Switch camera.
    FlipCamera,
    /// Toggle wireframe rendering.
    ToggleWireframe,
    /// Apply a fighter action.
    Fighter {
        /// Which fighter.
        side: Side,
        /// What it does.
        action: FighterAction,
    },
    /// Stop the game.
    Quit,
}

/// A running game.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    manager: ObjectManager,
    duel: Duel,
    view: ViewState,
}

impl Game {
    /// Validates `config`, creates its placements and binds the fighters.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`GameConfig::validate`].
    pub fn new(config: GameConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut manager = ObjectManager::new(&config, clock);
        for placement in &config.placements {
            let id = manager.create_by_type_name(
                &placement.type_name,
                &placement.name,
                placement.position,
            );
            if let Some(object) = manager.get_mut(id) {
                object.set_velocity(placement.velocity);
                object.set_orientation(placement.orientation);
                if placement.sprite.is_some() {
                    object.set_sprite(placement.sprite);
                }
            }
        }

        let duel = Duel::bind(&manager, &config.fighters);
        info!(
            objects = manager.len(),
            anchor = ?manager.anchor(),
            seed = config.seed,
            "game ready"
        );

        Ok(Self {
            config,
            manager,
            duel,
            view: ViewState::default(),
        })
    }

    /// Applies one shell command. Returns `false` when the shell should stop.
    pub fn handle(&mut self, command: &GameCommand, audio: &mut dyn AudioSink) -> bool {
        debug!(?command, "command");
        match command {
            GameCommand::Fire { shooter } => {
                self.manager.fire_gun(shooter);
            }
            GameCommand::FlipCamera => self.view.flip_camera(),
            GameCommand::ToggleWireframe => self.view.toggle_wireframe(),
            GameCommand::Fighter { side, action } => {
                self.duel.perform(&mut self.manager, *side, *action, audio);
            }
            GameCommand::Quit => {
                info!("quit requested");
                return false;
            }
        }
        true
    }

    /// Runs one tick of the object manager.
    pub fn move_frame(&mut self) -> TickReport {
        self.manager.tick()
    }

    /// Pushes view changes and draws every live object.
    pub fn draw_frame(&mut self, sink: &mut dyn RenderSink) {
        self.view.sync(sink);
        self.manager.render(sink);
    }

    /// Settings the game was built from.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The object manager.
    #[must_use]
    pub const fn manager(&self) -> &ObjectManager {
        &self.manager
    }

    /// The bound fighters.
    #[must_use]
    pub const fn duel(&self) -> &Duel {
        &self.duel
    }

    /// Camera and wireframe state.
    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }
}

//! # Wingbrawl Core
//!
//! Object lifecycle, collision and duel core for the Wingbrawl arcade game.
//!
//! Two fighters walk, jump, punch and kick on a stage while bullets, crows and
//! their exploding and dead successors are spawned, animated, aged and
//! removed in a world that wraps around on x. The host shell owns the window,
//! the GPU and the sound card; this crate consumes them through the
//! capability traits in [`capability`].
//!
//! ## Architecture
//!
//! - **Objects** ([`object`]): tagged kinds with a per-kind motion policy
//! - **Manager** ([`manager`]): creation, name index, tick phases, depth-sorted render
//! - **Collision** ([`collision`]): wrap-corrected distance and the projectile sweep
//! - **Duel** ([`fighter`]): walking, jumping and attacks for the two fighters
//! - **Game** ([`game`]): the facade the shell drives once per frame
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use wingbrawl_core::{Game, GameConfig, ManualClock};
//!
//! let clock = Arc::new(ManualClock::new());
//! let mut game = Game::new(GameConfig::default(), clock.clone())?;
//!
//! for _ in 0..10 {
//!     clock.advance(20);
//!     game.move_frame();
//! }
//! assert_eq!(game.manager().tick_count(), 10);
//! # Ok::<(), wingbrawl_core::ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod collision;
pub mod config;
pub mod error;
pub mod fighter;
pub mod fire;
pub mod game;
pub mod manager;
pub mod object;
pub mod registry;
pub mod view;

pub use capability::{AudioSink, Clock, DrawCommand, ManualClock, RenderSink, SoundId, SystemClock};
pub use config::GameConfig;
pub use error::ConfigError;
pub use game::{Game, GameCommand};
pub use manager::{ObjectManager, TickReport};
pub use object::{GameObject, ObjectId, ObjectType};

#[cfg(test)]
mod tests;

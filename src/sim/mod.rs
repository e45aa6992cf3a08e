//! Simulation module
//!
//! All gameplay logic lives here. It must stay free of rendering and platform
//! dependencies:
//! - One tick per animation frame, host clock passed in
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod autopilot;
pub mod collision;
pub mod particles;
pub mod phrase;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, player_hits_obstacle};
pub use particles::Particle;
pub use phrase::Phrase;
pub use physics::Player;
pub use state::{Answer, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, tick};

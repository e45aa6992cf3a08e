//! Dino Valentine - a side-scrolling runner that spells out a proposal
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, phrase reveal, particles)
//! - `session`: State machine wiring between the simulation and UI panels
//! - `renderer`: Scene building and the WebGPU rendering pipeline
//! - `ui`: Named overlay panels toggled by state transitions
//! - `notify`: Proposal answer notification (payload, client, mail server)
//! - `platform`: Browser glue (DOM panels, fetch)
//! - `tuning`: Data-driven game balance

pub mod notify;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use session::Session;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal frame rate the per-frame constants were tuned for
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Downward acceleration applied to the player each frame (px/frame²)
    pub const GRAVITY: f32 = 0.8;
    /// Vertical velocity set by a jump (negative = upward)
    pub const JUMP_FORCE: f32 = -12.0;
    /// Player top edge when standing on the ground
    pub const GROUND_Y: f32 = 220.0;
    /// Obstacle scroll speed (px/frame)
    pub const GAME_SPEED: f32 = 6.0;

    /// Obstacle spawn gate bounds (ms)
    pub const OBSTACLE_INTERVAL_MIN: f64 = 1200.0;
    pub const OBSTACLE_INTERVAL_MAX: f64 = 2500.0;

    /// Player box
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Cactus box
    pub const OBSTACLE_WIDTH: f32 = 25.0;
    pub const OBSTACLE_HEIGHT: f32 = 40.0;

    /// Horizontal inset applied to the player hitbox on each side
    pub const HITBOX_INSET: f32 = 5.0;
    /// Obstacles are dropped once their trailing edge is this far off-screen
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Pause between the last word landing and the proposal prompt (ms)
    pub const PROPOSAL_DELAY_MS: f64 = 500.0;

    /// Particles per celebration burst
    pub const BURST_SIZE: usize = 50;
    /// Particle gravity (px/frame²)
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    /// Life lost per frame
    pub const PARTICLE_DECAY: f32 = 0.02;

    /// Default viewport (CSS px) used until the canvas reports its size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 300.0;

    /// The words revealed one cactus at a time
    pub const DEFAULT_PHRASE: [&str; 7] = ["Rachel,", "will", "you", "be", "my", "valentine?", "<3"];
}

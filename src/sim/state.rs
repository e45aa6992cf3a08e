//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: everything the tick and the
//! scene builder read or write lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particles::{self, Particle};
use super::phrase::Phrase;
use super::physics::Player;
use crate::consts::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start action
    Start,
    /// Running and dodging
    Playing,
    /// Phrase complete, question on screen
    Proposal,
    /// Hit a cactus
    Ended,
    /// Said yes, hearts everywhere
    Success,
}

/// The player's answer to the proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Label sent in the notification payload
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

/// Things that happened during a tick or an action, drained by the session
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Restarted,
    Jumped,
    ObstacleSpawned { id: u32, word: String },
    WordRevealed { word: String, cleared: u32 },
    PhraseComplete,
    GameOver,
    ProposalReady,
    Answered(Answer),
}

/// A cactus carrying one word of the phrase
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub passed: bool,
    pub word: String,
}

impl Obstacle {
    /// Right edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Celebration particles (only updated and drawn in Success)
    pub particles: Vec<Particle>,
    pub phrase: Phrase,
    /// Obstacles cleared this run
    pub cleared: u32,
    /// Frames simulated while playing
    pub frames: u64,
    /// Time of the last spawn (or of the run start)
    pub last_spawn_ms: f64,
    /// When the proposal prompt is due, once the phrase is complete
    pub proposal_due_ms: Option<f64>,
    /// Answer given to this run's proposal
    pub answer: Option<Answer>,
    /// Canvas size in CSS pixels
    pub viewport: Vec2,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Create a new game state with the given tuning
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Start,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            particles: Vec::new(),
            phrase: Phrase::new(tuning.phrase.clone()),
            cleared: 0,
            frames: 0,
            last_spawn_ms: 0.0,
            proposal_due_ms: None,
            answer: None,
            viewport: Vec2::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear everything a run accumulates
    pub fn reset(&mut self, now_ms: f64) {
        self.obstacles.clear();
        self.particles.clear();
        self.cleared = 0;
        self.frames = 0;
        self.phrase.reset();
        self.player.reset(&self.tuning);
        self.last_spawn_ms = now_ms;
        self.proposal_due_ms = None;
        self.answer = None;
    }

    /// Begin a run. Ignored while already playing.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Playing;
        self.reset(now_ms);
        self.emit(GameEvent::Started);
        log::info!("Run started");
        true
    }

    /// Back to the title screen. Ignored while playing.
    pub fn restart(&mut self, now_ms: f64) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Start;
        self.reset(now_ms);
        self.emit(GameEvent::Restarted);
        true
    }

    /// Jump if playing and grounded
    pub fn request_jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let jumped = self.player.jump(self.tuning.jump_force);
        if jumped {
            self.emit(GameEvent::Jumped);
        }
        jumped
    }

    /// Record the answer to the proposal. Only the first answer counts.
    pub fn answer(&mut self, answer: Answer) -> bool {
        if self.phase != GamePhase::Proposal || self.answer.is_some() {
            return false;
        }
        self.answer = Some(answer);
        if answer == Answer::Yes {
            self.phase = GamePhase::Success;
            self.celebrate();
        }
        self.emit(GameEvent::Answered(answer));
        log::info!("Proposal answered: {}", answer.label());
        true
    }

    /// Three bursts: viewport center and two symmetric offsets above it
    pub fn celebrate(&mut self) {
        let center = self.viewport / 2.0;
        for offset in [Vec2::ZERO, Vec2::new(-50.0, -20.0), Vec2::new(50.0, -20.0)] {
            particles::burst(&mut self.particles, &mut self.rng, center + offset);
        }
    }
}

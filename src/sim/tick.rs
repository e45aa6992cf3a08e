//! Per-frame simulation tick
//!
//! One call per animation frame. Only Playing and Success do any work; every
//! other phase is frozen.

use super::autopilot;
use super::collision::player_hits_obstacle;
use super::particles;
use super::spawner::spawn_obstacle;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Host clock (ms); drives the spawn gate and the proposal delay
    pub now_ms: f64,
    /// Jump (space/tap)
    pub jump: bool,
    /// Idle/demo mode - the autopilot jumps for the player
    pub autopilot: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Success => {
            particles::update(&mut state.particles);
            return;
        }
        GamePhase::Playing => {}
        _ => return,
    }

    // Proposal prompt once the delay after the last word has elapsed
    if let Some(due) = state.proposal_due_ms {
        if input.now_ms >= due {
            state.proposal_due_ms = None;
            state.phase = GamePhase::Proposal;
            state.emit(GameEvent::ProposalReady);
            log::info!("Proposal ready after {} frames", state.frames);
            return;
        }
    }

    if input.jump || (input.autopilot && autopilot::should_jump(state)) {
        state.request_jump();
    }

    state.frames += 1;
    state
        .player
        .update(state.tuning.gravity, state.tuning.ground_y);

    spawn_obstacle(state, input.now_ms);

    let speed = state.tuning.game_speed;
    let inset = state.tuning.hitbox_inset;
    let mut revealed = Vec::new();
    let mut hit = None;

    for obs in state.obstacles.iter_mut() {
        obs.pos.x -= speed;

        if player_hits_obstacle(&state.player, obs, inset) {
            hit = Some((obs.id, obs.word.clone()));
            break;
        }

        if !obs.passed && obs.trailing_edge() < state.player.pos.x {
            obs.passed = true;
            revealed.push(obs.word.clone());
        }
    }

    for word in revealed {
        reveal_word(state, word, input.now_ms);
    }

    if let Some((id, word)) = hit {
        // Freeze: nothing else moves this frame or after
        state.phase = GamePhase::Ended;
        state.proposal_due_ms = None;
        log::info!("Hit obstacle {} ({:?}) after clearing {}", id, word, state.cleared);
        state.emit(GameEvent::GameOver);
        return;
    }

    let margin = state.tuning.offscreen_margin;
    state.obstacles.retain(|o| o.trailing_edge() > -margin);
}

/// Bookkeeping for one cleared obstacle
fn reveal_word(state: &mut GameState, word: String, now_ms: f64) {
    state.cleared += 1;
    let complete = state.phrase.reveal(word.clone());
    log::info!("Revealed {:?} ({}/{})", word, state.cleared, state.phrase.len());
    state.emit(GameEvent::WordRevealed {
        word,
        cleared: state.cleared,
    });

    if complete && state.proposal_due_ms.is_none() {
        state.proposal_due_ms = Some(now_ms + state.tuning.proposal_delay_ms);
        state.emit(GameEvent::PhraseComplete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BURST_SIZE, FRAME_MS};
    use crate::sim::state::{Answer, Obstacle};
    use glam::Vec2;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start(0.0);
        state.drain_events();
        state
    }

    fn push_obstacle(state: &mut GameState, x: f32, word: &str) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, state.tuning.ground_y),
            size: Vec2::new(25.0, 40.0),
            passed: false,
            word: word.into(),
        });
    }

    /// Run with the autopilot on a 60 Hz clock until `until` holds or the cap is hit
    fn run_autopilot(state: &mut GameState, until: impl Fn(&GameState) -> bool) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for frame in 1..=5_000u32 {
            let input = TickInput {
                now_ms: frame as f64 * FRAME_MS,
                autopilot: true,
                ..Default::default()
            };
            tick(state, &input);
            events.extend(state.drain_events());
            if until(state) {
                break;
            }
        }
        events
    }

    #[test]
    fn test_frozen_outside_playing() {
        let mut state = GameState::new(1);
        let input = TickInput {
            now_ms: 10_000.0,
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.frames, 0);
        assert!(state.obstacles.is_empty());
        assert!(state.player.grounded);
    }

    #[test]
    fn test_jump_input_lifts_player() {
        let mut state = playing(1);
        let input = TickInput {
            now_ms: FRAME_MS,
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(!state.player.grounded);
        assert!(state.player.pos.y < state.tuning.ground_y);
    }

    #[test]
    fn test_obstacles_scroll_left_each_frame() {
        let mut state = playing(1);
        push_obstacle(&mut state, 500.0, "Rachel,");
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles[0].pos.x, 494.0);
    }

    #[test]
    fn test_collision_ends_run_once_and_freezes() {
        let mut state = playing(1);
        push_obstacle(&mut state, 86.0, "Rachel,"); // moves to 80, inside the hitbox
        push_obstacle(&mut state, 600.0, "will");
        tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver]);
        // Second obstacle was not advanced this frame
        assert_eq!(state.obstacles[1].pos.x, 600.0);

        let frozen: Vec<f32> = state.obstacles.iter().map(|o| o.pos.x).collect();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        let after: Vec<f32> = state.obstacles.iter().map(|o| o.pos.x).collect();
        assert_eq!(frozen, after);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_passing_reveals_word_once() {
        let mut state = playing(1);
        push_obstacle(&mut state, 24.0, "Rachel,"); // trailing edge 49 -> 43 after move
        state.player.pos.y = 100.0; // airborne, out of reach
        state.player.grounded = false;
        state.phrase.next_word();

        tick(&mut state, &TickInput::default());
        assert!(state.obstacles[0].passed);
        assert_eq!(state.cleared, 1);
        assert_eq!(state.phrase.revealed(), ["Rachel,"]);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.cleared, 1);
        assert_eq!(state.phrase.revealed().len(), 1);
    }

    #[test]
    fn test_offscreen_obstacles_are_dropped() {
        let mut state = playing(1);
        push_obstacle(&mut state, -120.0, "Rachel,"); // trailing edge -95 -> -101
        state.obstacles[0].passed = true;
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_prune_boundary_is_inclusive() {
        // Trailing edge lands exactly on -margin: dropped
        let mut state = playing(1);
        push_obstacle(&mut state, -119.0, "Rachel,"); // -94 -> -100
        state.obstacles[0].passed = true;
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.is_empty());

        // One pixel short of it: kept
        let mut state = playing(1);
        push_obstacle(&mut state, -118.0, "Rachel,"); // -93 -> -99
        state.obstacles[0].passed = true;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].trailing_edge(), -99.0);
    }

    #[test]
    fn test_full_phrase_reaches_proposal_exactly_once() {
        let mut state = playing(2024);
        let events = run_autopilot(&mut state, |s| s.phase != GamePhase::Playing);

        assert_eq!(state.phase, GamePhase::Proposal, "events: {events:?}");
        assert_eq!(state.cleared, 7);
        assert_eq!(state.phrase.revealed_text(), "Rachel, will you be my valentine? <3");

        let proposals = events.iter().filter(|e| **e == GameEvent::ProposalReady).count();
        let completes = events.iter().filter(|e| **e == GameEvent::PhraseComplete).count();
        let spawns = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        assert_eq!(proposals, 1);
        assert_eq!(completes, 1);
        assert_eq!(spawns, 7);

        // Nothing further happens while the question is on screen
        for i in 0..100 {
            let input = TickInput {
                now_ms: 1_000_000.0 + i as f64 * FRAME_MS,
                autopilot: true,
                ..Default::default()
            };
            tick(&mut state, &input);
        }
        assert!(state.drain_events().is_empty());
        assert_eq!(state.phase, GamePhase::Proposal);
    }

    #[test]
    fn test_proposal_waits_for_delay() {
        let mut state = playing(1);
        // Everything spawned and all but the last word revealed
        let words = state.tuning.phrase.clone();
        for _ in 0..words.len() {
            state.phrase.next_word();
        }
        for word in &words[..words.len() - 1] {
            state.phrase.reveal(word.clone());
        }
        push_obstacle(&mut state, 24.0, "<3");
        state.player.pos.y = 100.0;
        state.player.grounded = false;

        tick(&mut state, &TickInput { now_ms: 1000.0, ..Default::default() });
        assert_eq!(state.proposal_due_ms, Some(1500.0));
        assert_eq!(state.phase, GamePhase::Playing);

        tick(&mut state, &TickInput { now_ms: 1499.0, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Playing);

        tick(&mut state, &TickInput { now_ms: 1500.0, ..Default::default() });
        assert_eq!(state.phase, GamePhase::Proposal);
        assert_eq!(state.proposal_due_ms, None);
    }

    #[test]
    fn test_revealed_words_always_prefix() {
        let mut state = playing(77);
        for frame in 1..=5_000u32 {
            let input = TickInput {
                now_ms: frame as f64 * FRAME_MS,
                autopilot: true,
                ..Default::default()
            };
            tick(&mut state, &input);
            assert!(state.phrase.is_prefix());
            assert!(state.phrase.spawned() <= state.phrase.len());
            assert!(state.player.pos.y >= 0.0 && state.player.pos.y <= state.tuning.ground_y);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
    }

    #[test]
    fn test_celebration_decays_after_yes() {
        let mut state = playing(5);
        run_autopilot(&mut state, |s| s.phase != GamePhase::Playing);
        assert_eq!(state.phase, GamePhase::Proposal);

        let before = state.particles.len();
        assert!(state.answer(Answer::Yes));
        assert_eq!(state.phase, GamePhase::Success);
        assert_eq!(state.particles.len(), before + 3 * BURST_SIZE);

        let mut last = state.particles.len();
        let mut frames = 0;
        while !state.particles.is_empty() {
            tick(&mut state, &TickInput::default());
            assert!(state.particles.len() <= last);
            last = state.particles.len();
            frames += 1;
            assert!(frames <= 60);
        }
    }

    #[test]
    fn test_standing_still_ends_run() {
        let mut state = playing(11);
        for frame in 1..=5_000u32 {
            let input = TickInput {
                now_ms: frame as f64 * FRAME_MS,
                ..Default::default()
            };
            tick(&mut state, &input);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.cleared, 0);
        assert!(state.phrase.revealed().is_empty());
    }
}

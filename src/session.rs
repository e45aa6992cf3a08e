//! Game session: the state machine seen from the outside
//!
//! Wraps the simulation and applies the panel side effects of each
//! transition. Input handlers and the frame loop talk to this, never to the
//! panels directly.

use crate::notify::Notification;
use crate::sim::{Answer, GameEvent, GamePhase, GameState, TickInput, tick};
use crate::ui::{Panel, PanelHost, Reaction};

pub struct Session<P: PanelHost> {
    state: GameState,
    panels: P,
    /// Idle/demo mode
    pub autopilot: bool,
}

impl<P: PanelHost> Session<P> {
    /// Take over the panels: only the start panel is visible
    pub fn new(state: GameState, mut panels: P) -> Self {
        for panel in Panel::ALL {
            panels.hide(panel);
        }
        panels.show(Panel::Start);
        Self {
            state,
            panels,
            autopilot: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn panels(&self) -> &P {
        &self.panels
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.state.set_viewport(width, height);
    }

    /// Start button
    pub fn start(&mut self, now_ms: f64) -> bool {
        if !self.state.start(now_ms) {
            return false;
        }
        for panel in [Panel::Start, Panel::GameOver, Panel::Retry, Panel::Success] {
            self.panels.hide(panel);
        }
        self.state.drain_events();
        true
    }

    /// Restart button (game over screen)
    pub fn restart(&mut self, now_ms: f64) -> bool {
        if !self.state.restart(now_ms) {
            return false;
        }
        self.panels.hide(Panel::GameOver);
        self.panels.show(Panel::Start);
        self.panels.hide(Panel::Proposal);
        self.state.drain_events();
        log::info!("Back to start screen");
        true
    }

    /// Space / tap
    pub fn jump(&mut self) -> bool {
        self.state.request_jump()
    }

    /// Yes/No buttons. Returns the notification to send, once per proposal.
    pub fn respond(&mut self, answer: Answer, timestamp: impl Into<String>) -> Option<Notification> {
        if !self.state.answer(answer) {
            return None;
        }
        self.panels.hide(Panel::Proposal);
        match answer {
            Answer::Yes => self.panels.show(Panel::Success),
            Answer::No => self.panels.show(Panel::Retry),
        }
        self.panels.show_reaction(Reaction::for_answer(answer));
        self.state.drain_events();
        Some(Notification::new(answer, timestamp))
    }

    /// One animation frame of simulation; returns what happened
    pub fn frame(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let input = TickInput {
            now_ms,
            autopilot: self.autopilot,
            ..Default::default()
        };
        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        for event in &events {
            match event {
                GameEvent::GameOver => self.panels.show(Panel::GameOver),
                GameEvent::ProposalReady => self.panels.show(Panel::Proposal),
                _ => {}
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BURST_SIZE, FRAME_MS};
    use crate::ui::PanelSet;

    fn session() -> Session<PanelSet> {
        Session::new(GameState::new(31), PanelSet::new())
    }

    fn play_to_proposal(s: &mut Session<PanelSet>) {
        s.autopilot = true;
        s.start(0.0);
        for frame in 1..=5_000u32 {
            s.frame(frame as f64 * FRAME_MS);
            if s.phase() != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(s.phase(), GamePhase::Proposal);
    }

    #[test]
    fn test_new_session_shows_only_start() {
        let s = session();
        assert!(s.panels().reaction().is_none());
        assert_eq!(s.panels().visible(), vec![Panel::Start]);
        assert_eq!(s.phase(), GamePhase::Start);
    }

    #[test]
    fn test_start_hides_panels() {
        let mut s = session();
        assert!(s.start(0.0));
        assert!(s.panels().visible().is_empty());
        assert_eq!(s.phase(), GamePhase::Playing);
        assert!(!s.start(10.0), "already playing");
    }

    #[test]
    fn test_collision_shows_game_over_then_restart() {
        let mut s = session();
        s.start(0.0);
        let mut game_overs = 0;
        for frame in 1..=5_000u32 {
            let events = s.frame(frame as f64 * FRAME_MS);
            game_overs += events.iter().filter(|e| **e == GameEvent::GameOver).count();
            if s.phase() != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(s.phase(), GamePhase::Ended);
        assert_eq!(game_overs, 1);
        assert_eq!(s.panels().visible(), vec![Panel::GameOver]);

        assert!(s.restart(99_999.0));
        assert_eq!(s.phase(), GamePhase::Start);
        assert_eq!(s.panels().visible(), vec![Panel::Start]);
        assert!(s.state().obstacles.is_empty());
        assert_eq!(s.state().cleared, 0);
    }

    #[test]
    fn test_jump_only_while_playing() {
        let mut s = session();
        assert!(!s.jump());
        s.start(0.0);
        assert!(s.jump());
        assert!(!s.jump(), "airborne");
    }

    #[test]
    fn test_yes_path() {
        let mut s = session();
        play_to_proposal(&mut s);
        assert_eq!(s.panels().visible(), vec![Panel::Proposal]);

        let note = s.respond(Answer::Yes, "2026-02-14T00:00:00.000Z").expect("first answer");
        assert_eq!(note.response, "Yes");
        assert_eq!(s.phase(), GamePhase::Success);
        assert_eq!(s.panels().visible(), vec![Panel::Success]);
        assert_eq!(s.state().particles.len(), 3 * BURST_SIZE);
        assert_eq!(s.panels().reaction(), Some(Reaction::for_answer(Answer::Yes)));

        assert!(s.respond(Answer::No, "later").is_none());
    }

    #[test]
    fn test_no_path_shows_retry_and_allows_new_run() {
        let mut s = session();
        play_to_proposal(&mut s);

        let note = s.respond(Answer::No, "t").expect("first answer");
        assert_eq!(note.response, "No");
        assert_eq!(s.phase(), GamePhase::Proposal);
        assert_eq!(s.panels().visible(), vec![Panel::Retry]);
        assert_eq!(s.panels().reaction().map(|r| r.container_id), Some("sad-gif"));
        assert!(s.respond(Answer::Yes, "t").is_none());
        assert_eq!(s.panels().reaction().map(|r| r.panel()), Some(Panel::Retry));

        assert!(s.start(500_000.0));
        assert!(s.panels().visible().is_empty());
        assert_eq!(s.state().answer, None);
        assert!(s.state().phrase.revealed().is_empty());
    }
}

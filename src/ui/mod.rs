//! UI overlay panels
//!
//! The simulation never touches the DOM. State transitions ask a `PanelHost`
//! to show or hide named panels; the browser implementation lives in
//! `platform::dom`, and `PanelSet` keeps the same bookkeeping in memory.

use crate::sim::Answer;

/// The overlay panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Start,
    GameOver,
    Retry,
    Proposal,
    Success,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Start,
        Panel::GameOver,
        Panel::Retry,
        Panel::Proposal,
        Panel::Success,
    ];

    /// DOM id of the panel element
    pub fn element_id(&self) -> &'static str {
        match self {
            Panel::Start => "start-screen",
            Panel::GameOver => "game-over-screen",
            Panel::Retry => "retry-screen",
            Panel::Proposal => "proposal-screen",
            Panel::Success => "success-screen",
        }
    }

    fn index(&self) -> usize {
        match self {
            Panel::Start => 0,
            Panel::GameOver => 1,
            Panel::Retry => 2,
            Panel::Proposal => 3,
            Panel::Success => 4,
        }
    }
}

/// Image shown on the panel that follows an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    /// Container element inside the panel
    pub container_id: &'static str,
    pub src: &'static str,
    pub alt: &'static str,
}

impl Reaction {
    pub fn for_answer(answer: Answer) -> Self {
        match answer {
            Answer::Yes => Reaction {
                container_id: "celebration-gif",
                src: "https://media1.tenor.com/m/s43Jgh0jekAAAAAC/gif.gif",
                alt: "Happy Dance",
            },
            Answer::No => Reaction {
                container_id: "sad-gif",
                src: "https://media.tenor.com/2sZYV3zXw8MAAAAC/sad-pikachu.gif",
                alt: "Sad",
            },
        }
    }

    /// Panel the container lives in
    pub fn panel(&self) -> Panel {
        match self.container_id {
            "celebration-gif" => Panel::Success,
            _ => Panel::Retry,
        }
    }
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Jump,
    /// Demo mode; debug builds only
    ToggleAutopilot,
}

impl KeyAction {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(KeyAction::Jump),
            #[cfg(debug_assertions)]
            "a" | "A" => Some(KeyAction::ToggleAutopilot),
            _ => None,
        }
    }
}

/// Something that can show and hide panels
pub trait PanelHost {
    fn show(&mut self, panel: Panel);
    fn hide(&mut self, panel: Panel);
    /// Put the reaction image into its container, replacing what was there
    fn show_reaction(&mut self, reaction: Reaction);
}

/// In-memory panel visibility (headless runs and tests)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelSet {
    visible: [bool; 5],
    reaction: Option<Reaction>,
}

impl PanelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible[panel.index()]
    }

    /// Currently visible panels, in `Panel::ALL` order
    pub fn visible(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| self.is_visible(*p))
            .collect()
    }

    /// Last reaction image shown
    pub fn reaction(&self) -> Option<Reaction> {
        self.reaction
    }
}

impl PanelHost for PanelSet {
    fn show(&mut self, panel: Panel) {
        self.visible[panel.index()] = true;
    }

    fn hide(&mut self, panel: Panel) {
        self.visible[panel.index()] = false;
    }

    fn show_reaction(&mut self, reaction: Reaction) {
        self.reaction = Some(reaction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_set_tracks_visibility() {
        let mut set = PanelSet::new();
        assert!(set.visible().is_empty());
        set.show(Panel::Proposal);
        set.show(Panel::Start);
        assert_eq!(set.visible(), vec![Panel::Start, Panel::Proposal]);
        set.hide(Panel::Start);
        assert!(!set.is_visible(Panel::Start));
        assert!(set.is_visible(Panel::Proposal));
    }

    #[test]
    fn test_reactions_land_on_their_panels() {
        let yes = Reaction::for_answer(Answer::Yes);
        let no = Reaction::for_answer(Answer::No);
        assert_eq!(yes.panel(), Panel::Success);
        assert_eq!(no.panel(), Panel::Retry);
        assert_ne!(yes.container_id, no.container_id);
        assert_eq!(no.alt, "Sad");
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key(" "), Some(KeyAction::Jump));
        assert_eq!(KeyAction::from_key("Enter"), None);
        let autopilot = KeyAction::from_key("a");
        if cfg!(debug_assertions) {
            assert_eq!(autopilot, Some(KeyAction::ToggleAutopilot));
        } else {
            assert_eq!(autopilot, None, "release builds have no autopilot key");
        }
    }

    #[test]
    fn test_element_ids_are_unique() {
        let mut ids: Vec<_> = Panel::ALL.iter().map(|p| p.element_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }
}

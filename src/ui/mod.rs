//! Score text and menu panels
//!
//! The controller only ever writes the score text and toggles panels, so the
//! page (or a test) plugs in through [`UiSink`].

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomUi;

/// Page element id of the score text
pub const SCORE_ELEMENT_ID: &str = "score";

/// Toggleable panels on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    MainMenu,
    Win,
    Lose,
    EndGame,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::MainMenu, Panel::Win, Panel::Lose, Panel::EndGame];

    /// Page element id
    pub fn element_id(self) -> &'static str {
        match self {
            Panel::MainMenu => "mainMenu",
            Panel::Win => "win",
            Panel::Lose => "lose",
            Panel::EndGame => "endGame",
        }
    }

    fn index(self) -> usize {
        match self {
            Panel::MainMenu => 0,
            Panel::Win => 1,
            Panel::Lose => 2,
            Panel::EndGame => 3,
        }
    }
}

/// Where the controller writes what the player sees
pub trait UiSink {
    fn set_score_text(&mut self, text: &str);
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
}

/// In-memory UI for tests and the native build
#[derive(Debug, Clone, Default)]
pub struct HeadlessUi {
    score_text: String,
    panels: [bool; 4],
    score_writes: usize,
}

impl HeadlessUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panels[panel.index()]
    }

    /// How many times the score text was written
    pub fn score_writes(&self) -> usize {
        self.score_writes
    }
}

impl UiSink for HeadlessUi {
    fn set_score_text(&mut self, text: &str) {
        self.score_text.clear();
        self.score_text.push_str(text);
        self.score_writes += 1;
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        self.panels[panel.index()] = visible;
    }
}

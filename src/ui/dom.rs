//! DOM-backed UI sink

use web_sys::{Document, Element};

use super::{Panel, SCORE_ELEMENT_ID, UiSink};
use crate::{Error, Result};

/// Looks every element up once at startup
pub struct DomUi {
    score: Element,
    panels: [(Panel, Element); 4],
}

impl DomUi {
    /// Fails if any of the five elements is missing from the page
    pub fn new(document: &Document) -> Result<Self> {
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| Error::MissingElement(id.to_string()))
        };

        Ok(Self {
            score: find(SCORE_ELEMENT_ID)?,
            panels: [
                (Panel::MainMenu, find(Panel::MainMenu.element_id())?),
                (Panel::Win, find(Panel::Win.element_id())?),
                (Panel::Lose, find(Panel::Lose.element_id())?),
                (Panel::EndGame, find(Panel::EndGame.element_id())?),
            ],
        })
    }
}

impl UiSink for DomUi {
    fn set_score_text(&mut self, text: &str) {
        self.score.set_text_content(Some(text));
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        let display = if visible { "display: flex" } else { "display: none" };
        if let Some((_, el)) = self.panels.iter().find(|(p, _)| *p == panel) {
            if el.set_attribute("style", display).is_err() {
                log::warn!("Failed to toggle #{}", panel.element_id());
            }
        }
    }
}

//! DOM access

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use crate::renderer::Scene;
use crate::ui::{Panel, PanelHost, Reaction};

/// Class that hides a panel
pub const HIDDEN_CLASS: &str = "hidden";
/// Element receiving the revealed phrase
pub const PHRASE_ID: &str = "phrase";

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// Panels backed by elements of the page, toggled with the `hidden` class
pub struct DomPanels {
    document: Document,
}

impl DomPanels {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn toggle(&self, panel: Panel, hidden: bool) {
        let Some(el) = self.document.get_element_by_id(panel.element_id()) else {
            log::warn!("Missing panel #{}", panel.element_id());
            return;
        };
        let classes = el.class_list();
        let result = if hidden {
            classes.add_1(HIDDEN_CLASS)
        } else {
            classes.remove_1(HIDDEN_CLASS)
        };
        if result.is_err() {
            log::warn!("Could not toggle #{}", panel.element_id());
        }
    }
}

impl PanelHost for DomPanels {
    fn show(&mut self, panel: Panel) {
        self.toggle(panel, false);
    }

    fn hide(&mut self, panel: Panel) {
        self.toggle(panel, true);
    }

    fn show_reaction(&mut self, reaction: Reaction) {
        let Some(container) = self.document.get_element_by_id(reaction.container_id) else {
            log::warn!("Missing #{}", reaction.container_id);
            return;
        };
        let img = match self.document.create_element("img") {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Could not create reaction image: {e:?}");
                return;
            }
        };
        let _ = img.set_attribute("src", reaction.src);
        let _ = img.set_attribute("alt", reaction.alt);
        let _ = img.set_attribute("style", "max-width: 100%; border-radius: 8px;");

        container.set_inner_html("");
        if container.append_child(&img).is_err() {
            log::warn!("Could not show reaction in #{}", reaction.container_id);
        }
    }
}

/// Text overlay for the revealed words
pub struct PhraseOverlay {
    element: Option<web_sys::Element>,
    shown: String,
}

impl PhraseOverlay {
    pub fn new(document: &Document) -> Self {
        Self {
            element: document.get_element_by_id(PHRASE_ID),
            shown: String::new(),
        }
    }

    /// Mirror the scene's text command; DOM writes only on change
    pub fn update(&mut self, scene: &Scene) {
        let text = scene.text().unwrap_or_default();
        if text == self.shown {
            return;
        }
        if let Some(el) = &self.element {
            el.set_text_content(Some(text));
        }
        self.shown = text.to_string();
    }
}

/// The game canvas
pub fn canvas(document: &Document) -> Option<HtmlCanvasElement> {
    document.get_element_by_id("canvas")?.dyn_into().ok()
}

/// Match the backing store to the CSS size. Returns (physical w, h, css w, h).
pub fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32, f32, f32) {
    let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let client_w = canvas.client_width().max(1);
    let client_h = canvas.client_height().max(1);
    let width = (client_w as f64 * dpr) as u32;
    let height = (client_h as f64 * dpr) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height, client_w as f32, client_h as f32)
}

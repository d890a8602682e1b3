//! DOM score display

use web_sys::Element;

use crate::sinks::ScoreSink;

/// Writes the running score into a page element
pub struct ScoreDisplay {
    element: Option<Element>,
}

impl ScoreDisplay {
    pub fn from_element_id(id: &str) -> Self {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if element.is_none() {
            log::warn!("No #{} element, score will not be shown", id);
        }
        let mut display = Self { element };
        display.report_score(0);
        display
    }
}

impl ScoreSink for ScoreDisplay {
    fn report_score(&mut self, total: u64) {
        if let Some(el) = &self.element {
            el.set_text_content(Some(&format!("Score: {}", total)));
        }
    }
}

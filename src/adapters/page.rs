use crate::core::render::escape_html;
use crate::domain::elements as el;
use crate::domain::ports::{ControlState, Page};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq)]
struct Element {
    value: String,
    checked: bool,
    text: String,
    html: Option<String>,
    visible: bool,
}

#[derive(Debug, Default)]
struct PageState {
    elements: BTreeMap<String, Element>,
    submit: Option<ControlState>,
    last_scroll: Option<String>,
}

/// In-memory page with the element layout the controller binds to.
///
/// Result and list sections start hidden. Used by the CLI and by tests.
#[derive(Debug)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        let hidden = [el::RESULTS_SECTION, el::RECOMMENDATIONS_BOX, el::MATCHES_LIST];
        let mut ids: Vec<&str> = el::FORM_FIELDS.to_vec();
        ids.extend([
            el::MATCH_FORM,
            el::SCORE_VALUE,
            el::SCORE_RATING,
            el::EXPLANATION,
            el::RECOMMENDATIONS_BOX,
            el::RECOMMENDATIONS_LIST,
            el::RESULTS_SECTION,
            el::MATCHES_LIST,
            el::STATS_BOX,
            el::MATCHES_TABLE,
        ]);

        let elements = ids
            .into_iter()
            .map(|id| {
                let element = Element {
                    visible: !hidden.contains(&id),
                    ..Element::default()
                };
                (id.to_string(), element)
            })
            .collect();

        Self {
            state: Mutex::new(PageState {
                elements,
                submit: Some(ControlState::idle(el::SUBMIT_LABEL)),
                last_scroll: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        // 頁面狀態沒有跨欄位不變式，中毒後仍可繼續使用
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read<T>(&self, id: &str, f: impl FnOnce(&Element) -> T) -> Option<T> {
        self.lock().elements.get(id).map(f)
    }

    fn write(&self, id: &str, f: impl FnOnce(&mut Element)) {
        match self.lock().elements.get_mut(id) {
            Some(element) => f(element),
            None => tracing::debug!(id, "write to unknown element ignored"),
        }
    }

    pub fn text(&self, id: &str) -> String {
        self.read(id, |e| e.text.clone()).unwrap_or_default()
    }

    pub fn html(&self, id: &str) -> String {
        self.read(id, |e| e.html.clone().unwrap_or_default())
            .unwrap_or_default()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.read(id, |e| e.visible).unwrap_or(false)
    }

    pub fn set_checked(&self, id: &str, checked: bool) {
        self.write(id, |e| e.checked = checked);
    }

    pub fn last_scroll(&self) -> Option<String> {
        self.lock().last_scroll.clone()
    }

    /// Inner markup of an element: its HTML if set, else its escaped text.
    fn inner(element: &Element) -> String {
        match &element.html {
            Some(html) => html.clone(),
            None => escape_html(&element.text),
        }
    }

    /// Results and matches regions as a standalone HTML document.
    pub fn export_html(&self) -> String {
        let state = self.lock();
        let style = |id: &str| {
            if state.elements.get(id).is_some_and(|e| e.visible) {
                ""
            } else {
                " style=\"display: none\""
            }
        };
        let inner = |id: &str| state.elements.get(id).map(Self::inner).unwrap_or_default();
        let region = |id: &str| format!("<div id=\"{id}\"{}>{}</div>", style(id), inner(id));

        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Resume Match</title></head>\n<body>\n\
             <section id=\"{results}\"{results_style}>{score}{rating}{explanation}\
             <div id=\"{recs_box}\"{recs_style}><ul id=\"{recs_list}\">{recs}</ul></div>\
             </section>\n<section id=\"{list}\"{list_style}>{stats}{table}</section>\n</body>\n</html>\n",
            results = el::RESULTS_SECTION,
            results_style = style(el::RESULTS_SECTION),
            score = region(el::SCORE_VALUE),
            rating = region(el::SCORE_RATING),
            explanation = region(el::EXPLANATION),
            recs_box = el::RECOMMENDATIONS_BOX,
            recs_style = style(el::RECOMMENDATIONS_BOX),
            recs_list = el::RECOMMENDATIONS_LIST,
            recs = inner(el::RECOMMENDATIONS_LIST),
            list = el::MATCHES_LIST,
            list_style = style(el::MATCHES_LIST),
            stats = region(el::STATS_BOX),
            table = region(el::MATCHES_TABLE),
        )
    }
}

impl Page for MemoryPage {
    fn value(&self, id: &str) -> String {
        self.read(id, |e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&self, id: &str, value: &str) {
        self.write(id, |e| e.value = value.to_string());
    }

    fn is_checked(&self, id: &str) -> bool {
        self.read(id, |e| e.checked).unwrap_or(false)
    }

    fn set_text(&self, id: &str, text: &str) {
        self.write(id, |e| {
            e.text = text.to_string();
            e.html = None;
        });
    }

    fn set_html(&self, id: &str, html: &str) {
        self.write(id, |e| {
            e.html = Some(html.to_string());
            e.text.clear();
        });
    }

    fn set_visible(&self, id: &str, visible: bool) {
        self.write(id, |e| e.visible = visible);
    }

    fn scroll_into_view(&self, id: &str) {
        self.lock().last_scroll = Some(id.to_string());
    }

    fn submit_control(&self, form_id: &str) -> ControlState {
        if form_id != el::MATCH_FORM {
            return ControlState::busy("");
        }
        self.lock()
            .submit
            .clone()
            .unwrap_or_else(|| ControlState::idle(el::SUBMIT_LABEL))
    }

    fn set_submit_control(&self, form_id: &str, state: ControlState) {
        if form_id == el::MATCH_FORM {
            self.lock().submit = Some(state);
        }
    }

    fn reset_form(&self, form_id: &str) {
        if form_id != el::MATCH_FORM {
            return;
        }
        let mut state = self.lock();
        for id in el::FORM_FIELDS {
            if let Some(element) = state.elements.get_mut(id) {
                element.value.clear();
                element.checked = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let page = MemoryPage::new();
        assert!(!page.is_visible(el::RESULTS_SECTION));
        assert!(!page.is_visible(el::MATCHES_LIST));
        assert!(page.is_visible(el::SCORE_VALUE));
        assert_eq!(page.submit_control(el::MATCH_FORM), ControlState::idle(el::SUBMIT_LABEL));
    }

    #[test]
    fn test_unknown_ids_are_inert() {
        let page = MemoryPage::new();
        page.set_value("nope", "x");
        assert_eq!(page.value("nope"), "");
        assert!(!page.is_checked("nope"));
        assert!(!page.is_visible("nope"));
    }

    #[test]
    fn test_reset_clears_form_fields_only() {
        let page = MemoryPage::new();
        page.set_value(el::RESUME, "resume");
        page.set_value(el::JD, "jd");
        page.set_checked(el::SAVE_MATCH, true);
        page.set_text(el::SCORE_VALUE, "80");

        page.reset_form(el::MATCH_FORM);

        assert_eq!(page.value(el::RESUME), "");
        assert_eq!(page.value(el::JD), "");
        assert!(!page.is_checked(el::SAVE_MATCH));
        assert_eq!(page.text(el::SCORE_VALUE), "80");
    }

    #[test]
    fn test_export_escapes_text_but_keeps_html() {
        let page = MemoryPage::new();
        page.set_text(el::EXPLANATION, "<b>bold</b>");
        page.set_html(el::RECOMMENDATIONS_LIST, "<li>one</li>");
        page.set_visible(el::RESULTS_SECTION, true);

        let doc = page.export_html();
        assert!(doc.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(doc.contains("<ul id=\"recommendationsList\"><li>one</li></ul>"));
        assert!(doc.contains("<section id=\"resultsSection\">"));
        assert!(doc.contains("<section id=\"matchesList\" style=\"display: none\">"));
    }
}

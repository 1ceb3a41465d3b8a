use crate::constants::{STATUS_HIDDEN_CLASS, STATUS_OVERLAY_ID};
use web_sys as web;

/// Show a one-line status message, e.g. why the microphone is unavailable.
/// Pages without a status element are left untouched.
pub fn show_status(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(STATUS_OVERLAY_ID) {
        el.set_text_content(Some(message));
        _ = el.class_list().remove_1(STATUS_HIDDEN_CLASS);
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

pub fn hide_status(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(STATUS_OVERLAY_ID) {
        _ = el.class_list().add_1(STATUS_HIDDEN_CLASS);
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(STATUS_OVERLAY_ID) {
        if el.class_list().contains(STATUS_HIDDEN_CLASS) {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    true
}

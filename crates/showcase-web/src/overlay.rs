use showcase_core::view::ViewDescriptor;
use web_sys as web;

// The overlay is plain DOM owned by the page; we only push the active
// view's copy into it. Elements that are absent are skipped silently.

pub fn set_view_text(document: &web::Document, view: &ViewDescriptor) {
    if let Some(el) = document.get_element_by_id("view-title") {
        el.set_text_content(Some(&view.title));
    }
    if let Some(el) = document.get_element_by_id("view-description") {
        el.set_text_content(Some(&view.description));
    }
}

/// Mark the dot for `index` active; the track holds one child per view.
pub fn set_active_dot(document: &web::Document, index: usize) {
    if let Some(track) = document.get_element_by_id("view-dots") {
        let dots = track.children();
        for i in 0..dots.length() {
            if let Some(dot) = dots.item(i) {
                if i as usize == index {
                    let _ = dot.class_list().add_1("active");
                } else {
                    let _ = dot.class_list().remove_1("active");
                }
            }
        }
    }
}

pub fn show_view(document: &web::Document, index: usize, view: &ViewDescriptor) {
    set_view_text(document, view);
    set_active_dot(document, index);
}

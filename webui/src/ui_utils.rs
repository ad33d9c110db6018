use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

// Show a transient toast in the #toasts container
pub fn show_toast(message: &str) {
    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            if let Some(container) = doc.get_element_by_id("toasts") {
                if let Ok(toast) = doc.create_element("div") {
                    toast.set_class_name("toast fade-in");
                    toast.set_text_content(Some(message));
                    if container.append_child(&toast).is_err() {
                        return;
                    }

                    // Auto-remove after timeout
                    let container_clone = container.clone();
                    let toast_clone = toast.clone();
                    let cb = Closure::wrap(Box::new(move || {
                        let _ = container_clone.remove_child(&toast_clone);
                    }) as Box<dyn FnMut()>);
                    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        2400,
                    );
                    cb.forget();
                }
            }
        }
    }
}

/// Progress bar width for a task percentage, clamped to 0..=100.
pub fn progress_style(progress: Option<f64>) -> String {
    let pct = progress.filter(|p| p.is_finite()).unwrap_or(0.0).clamp(0.0, 100.0);
    format!("width:{:.1}%;", pct)
}

pub fn collection_label(kind: Option<&str>) -> &'static str {
    match kind {
        Some("movies") => "Movies",
        Some("tvshows") => "Shows",
        Some("music") => "Music",
        Some("musicvideos") => "Music Videos",
        Some("homevideos") => "Home Videos and Photos",
        Some("boxsets") => "Collections",
        Some("books") => "Books",
        _ => "Mixed",
    }
}

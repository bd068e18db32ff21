//! Small browser utilities for the generator: toasts, downloads and
//! human-readable sizes.

use gloo_file::{Blob, ObjectUrl};
use num_format::{Locale, ToFormattedString};
use wasm_bindgen::JsCast;
use web_sys::{HtmlAnchorElement, HtmlElement};

/// Shows `message` at the bottom of the page for a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("max-width", "80vw").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(4000).await;
                        html_toast.remove();
                    });
                }
            }
        }
    }
}

/// Hands `bytes` to the browser as a file download.
pub fn download_bytes(filename: &str, mime: &str, bytes: &[u8]) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;
    let url = ObjectUrl::from(Blob::new_with_options(bytes, Some(mime)));

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    // Revoking right away can cancel the download in some browsers
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1000).await;
        drop(url);
    });
    Ok(())
}

/// `532 B`, `12 KB`, `3.4 MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{} KB", (bytes / KB).to_formatted_string(&Locale::en))
    } else {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    }
}

/// `1,234 / 5,000`
pub fn format_count(count: usize, limit: usize) -> String {
    format!(
        "{} / {}",
        count.to_formatted_string(&Locale::en),
        limit.to_formatted_string(&Locale::en)
    )
}

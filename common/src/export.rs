//! Export planning: download names, the text export, A4 page slicing of a
//! rasterized document, and the scoped off-screen container used while
//! rasterizing.

use crate::model::generation::GenerationResult;

const FALLBACK_TITLE: &str = "Project";

/// Width of the off-screen render container in CSS pixels (A4 at 96 dpi).
pub const RENDER_WIDTH_PX: u32 = 794;

/// A file ready to be handed to the browser as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Makes a document title usable as a file name stem.
///
/// Whitespace runs become a single `_`; path separators and characters
/// rejected by common file systems are dropped.
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_space = false;
    for ch in title.trim().chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if matches!(ch, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || ch.is_control() {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push('_');
        }
        pending_space = false;
        out.push(ch);
    }
    if out.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        out
    }
}

/// `<sanitized-title>_BRD.<extension>`
pub fn export_filename(title: &str, extension: &str) -> String {
    format!("{}_BRD.{}", sanitize_title(title), extension)
}

/// The document body, byte for byte, as a markdown download.
pub fn text_export(result: &GenerationResult) -> ExportFile {
    ExportFile {
        filename: export_filename(&result.project_name, "md"),
        mime: "text/markdown",
        bytes: result.brd_markdown.as_bytes().to_vec(),
    }
}

/// A horizontal strip of the rasterized document that becomes one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice {
    pub y: u32,
    pub height: u32,
}

/// Printable area of the target page and how an image maps onto it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
}

impl PageLayout {
    pub const fn a4() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
        }
    }

    // Half a millimetre of slack keeps rounding from overflowing the page.
    fn content_width_mm(&self) -> f64 {
        self.page_width_mm - 2.0 * self.margin_mm - 0.5
    }

    fn content_height_mm(&self) -> f64 {
        self.page_height_mm - 2.0 * self.margin_mm - 0.5
    }

    /// Resolution at which an image `width_px` wide fills the content width.
    pub fn dpi_for(&self, width_px: u32) -> f64 {
        width_px.max(1) as f64 * 25.4 / self.content_width_mm()
    }

    /// Image rows that fit on one page at `dpi_for(width_px)`.
    pub fn page_height_px(&self, width_px: u32) -> u32 {
        let ratio = self.content_height_mm() / self.content_width_mm();
        ((width_px.max(1) as f64 * ratio).floor() as u32).max(1)
    }

    /// Cuts an image into page-height strips, top to bottom, until its
    /// height is exhausted. The last strip may be shorter.
    pub fn slices(&self, width_px: u32, height_px: u32) -> Vec<PageSlice> {
        let page = self.page_height_px(width_px);
        let mut slices = Vec::new();
        let mut y = 0;
        while y < height_px {
            let height = page.min(height_px - y);
            slices.push(PageSlice { y, height });
            y += height;
        }
        slices
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::a4()
    }
}

/// Where a temporary render container is attached, e.g. the document body.
pub trait ContainerHost {
    type Node;

    fn attach(&self, node: &Self::Node);
    fn detach(&self, node: &Self::Node);
}

/// Keeps a node attached to its host for the guard's lifetime.
///
/// Detaching happens in `Drop`, so the node leaves the host on success, on
/// an early `?` return, and on unwinding.
pub struct ScopedContainer<'h, H: ContainerHost> {
    host: &'h H,
    node: H::Node,
}

impl<'h, H: ContainerHost> ScopedContainer<'h, H> {
    pub fn mount(host: &'h H, node: H::Node) -> Self {
        host.attach(&node);
        Self { host, node }
    }

    pub fn node(&self) -> &H::Node {
        &self.node
    }
}

impl<H: ContainerHost> Drop for ScopedContainer<'_, H> {
    fn drop(&mut self) {
        self.host.detach(&self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn result(title: &str, body: &str) -> GenerationResult {
        GenerationResult {
            success: true,
            message: "ok".to_string(),
            project_name: title.to_string(),
            brd_markdown: body.to_string(),
            llm_provider_used: "Google Gemini".to_string(),
            brd_schema: None,
            generated_data: None,
            summary: None,
        }
    }

    #[test]
    fn titles_are_sanitized() {
        assert_eq!(sanitize_title("Online  Book Store"), "Online_Book_Store");
        assert_eq!(sanitize_title("  a/b: c?  "), "ab_c");
        assert_eq!(sanitize_title("   "), "Project");
        assert_eq!(export_filename("Fleet Tracker", "pdf"), "Fleet_Tracker_BRD.pdf");
    }

    #[test]
    fn text_export_is_verbatim_and_idempotent() {
        let body = "# BRD\n\n• item one\n\r\ntrailing  spaces  \n";
        let res = result("My Project", body);

        let first = text_export(&res);
        let second = text_export(&res);

        assert_eq!(first.bytes, body.as_bytes());
        assert_eq!(first.filename, "My_Project_BRD.md");
        assert_eq!(first, second);
    }

    #[test]
    fn slices_cover_every_row_once() {
        let layout = PageLayout::a4();
        let width = 1588;
        let page = layout.page_height_px(width);

        for height in [1, page - 1, page, page + 1, 3 * page + 17] {
            let slices = layout.slices(width, height);
            let mut next = 0;
            for s in &slices {
                assert_eq!(s.y, next);
                assert!(s.height > 0 && s.height <= page);
                next += s.height;
            }
            assert_eq!(next, height);
            assert_eq!(slices.len() as u32, height.div_ceil(page));
        }
        assert!(layout.slices(width, 0).is_empty());
    }

    #[test]
    fn page_strip_fits_content_area() {
        let layout = PageLayout::a4();
        let width = 1588;
        let dpi = layout.dpi_for(width);
        let strip_mm = layout.page_height_px(width) as f64 / dpi * 25.4;
        let width_mm = width as f64 / dpi * 25.4;

        assert!(strip_mm <= 297.0 - 20.0);
        assert!(width_mm <= 210.0 - 20.0);
    }

    struct RecordingHost {
        attached: RefCell<Vec<u32>>,
    }

    impl ContainerHost for RecordingHost {
        type Node = u32;

        fn attach(&self, node: &u32) {
            self.attached.borrow_mut().push(*node);
        }

        fn detach(&self, node: &u32) {
            self.attached.borrow_mut().retain(|n| n != node);
        }
    }

    fn rasterize(host: &RecordingHost, fail: bool) -> Result<usize, String> {
        let container = ScopedContainer::mount(host, 7);
        assert_eq!(*host.attached.borrow(), vec![*container.node()]);
        if fail {
            return Err("canvas tainted".to_string());
        }
        Ok(host.attached.borrow().len())
    }

    #[test]
    fn container_is_removed_on_success_and_failure() {
        let host = RecordingHost {
            attached: RefCell::new(Vec::new()),
        };

        assert_eq!(rasterize(&host, false), Ok(1));
        assert!(host.attached.borrow().is_empty());

        assert!(rasterize(&host, true).is_err());
        assert!(host.attached.borrow().is_empty());
    }

    #[test]
    fn container_is_removed_on_panic() {
        let host = RecordingHost {
            attached: RefCell::new(Vec::new()),
        };
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _container = ScopedContainer::mount(&host, 3);
            panic!("rasterizer blew up");
        }));

        assert!(outcome.is_err());
        assert!(host.attached.borrow().is_empty());
    }
}

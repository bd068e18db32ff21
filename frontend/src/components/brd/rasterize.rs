//! Off-screen rendering of the document into a PNG.
//!
//! The styled markup is mounted into a fixed-width container outside the
//! viewport, serialized into an SVG `foreignObject`, drawn onto a canvas and
//! read back as a PNG data URL. The container is mounted through
//! `ScopedContainer`, so it leaves the page however this ends.

use common::export::{ContainerHost, ScopedContainer, RENDER_WIDTH_PX};
use common::markup::styled_document;
use js_sys::{encode_uri_component, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
    XmlSerializer,
};

/// Device pixels per CSS pixel in the produced image.
const SCALE: f64 = 2.0;

/// Attaches render containers to the document body.
struct BodyHost {
    document: Document,
}

impl ContainerHost for BodyHost {
    type Node = HtmlElement;

    fn attach(&self, node: &HtmlElement) {
        if let Some(body) = self.document.body() {
            body.append_child(node).ok();
        }
    }

    fn detach(&self, node: &HtmlElement) {
        node.remove();
    }
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Renders `markdown` and returns a `data:image/png;base64,` URL.
pub async fn rasterize_markdown(title: &str, markdown: &str) -> Result<String, String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document available")?;
    let host = BodyHost {
        document: document.clone(),
    };

    let node: HtmlElement = document
        .create_element("div")
        .map_err(js_error)?
        .unchecked_into();
    node.set_inner_html(&styled_document(title, markdown));
    let width_css = format!("{}px", RENDER_WIDTH_PX);
    let style = node.style();
    for (name, value) in [
        ("position", "fixed"),
        ("left", "-10000px"),
        ("top", "0"),
        ("width", width_css.as_str()),
        ("background", "#ffffff"),
    ] {
        style.set_property(name, value).map_err(js_error)?;
    }

    let container = ScopedContainer::mount(&host, node);
    let width = RENDER_WIDTH_PX;
    let height = container.node().scroll_height().max(1) as u32;

    let markup = XmlSerializer::new()
        .and_then(|s| s.serialize_to_string(container.node()))
        .map_err(js_error)?;
    let svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><foreignObject x="0" y="0" width="{w}" height="{h}">{markup}</foreignObject></svg>"#,
        w = width,
        h = height,
        markup = markup
    );
    let svg_url = format!(
        "data:image/svg+xml;charset=utf-8,{}",
        String::from(encode_uri_component(&svg))
    );

    let image = load_image(&svg_url).await?;
    draw_to_png(&document, &image, width, height)
}

async fn load_image(src: &str) -> Result<HtmlImageElement, String> {
    let image = HtmlImageElement::new().map_err(js_error)?;
    let loaded = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    JsFuture::from(loaded)
        .await
        .map_err(|_| "The document could not be rendered as an image".to_string())?;
    Ok(image)
}

fn draw_to_png(
    document: &Document,
    image: &HtmlImageElement,
    width: u32,
    height: u32,
) -> Result<String, String> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_error)?
        .unchecked_into();
    canvas.set_width((width as f64 * SCALE) as u32);
    canvas.set_height((height as f64 * SCALE) as u32);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or("Canvas 2D context unavailable")?
        .unchecked_into();
    context.scale(SCALE, SCALE).map_err(js_error)?;
    context.set_fill_style_str("#ffffff");
    context.fill_rect(0.0, 0.0, width as f64, height as f64);
    context
        .draw_image_with_html_image_element(image, 0.0, 0.0)
        .map_err(js_error)?;

    canvas.to_data_url_with_type("image/png").map_err(js_error)
}

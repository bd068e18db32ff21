//! Assembles a paginated PDF from one tall rasterized document image.
//!
//! The image is cut into page-height strips (see `common::export::PageLayout`),
//! each strip is flattened over white and written as an RGB PNG, and every
//! PNG becomes one page of a genpdf document.

use actix_web::{web, HttpResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::export::{export_filename, PageLayout};
use common::model::requests::ExportPdfRequest;
use genpdf::elements::{Image as PdfImage, PageBreak};
use genpdf::{Document, PaperSize, SimplePageDecorator};
use image::{DynamicImage, GenericImageView, RgbImage};
use log::info;
use png::{BitDepth as PngBitDepth, ColorType as PngColorType, Encoder as PngEncoder};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::Config;
use crate::error::{ApiError, Result};

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid image: {0}")]
    Image(#[from] image::ImageError),

    #[error("the rasterized document is empty")]
    EmptyImage,

    #[error("fonts could not be loaded from {dir}: {reason}")]
    Font { dir: String, reason: String },

    #[error("{0}")]
    Render(#[from] genpdf::error::Error),

    #[error("temporary file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// `POST /api/export/pdf`
pub async fn process(
    config: web::Data<Config>,
    payload: web::Json<ExportPdfRequest>,
) -> Result<HttpResponse> {
    let ExportPdfRequest {
        title,
        image_base64,
    } = payload.into_inner();
    let fonts_dir = config.fonts_dir.clone();
    let doc_title = title.clone();

    let bytes = web::block(move || {
        let png = decode_image_payload(&image_base64)?;
        assemble_pdf(&png, &doc_title, &fonts_dir, PageLayout::a4())
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    let filename = export_filename(&title, "pdf");
    info!("PDF export '{}' ready, {} bytes", filename, bytes.len());

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes))
}

/// Accepts plain base64 or a `data:image/png;base64,` URL.
pub fn decode_image_payload(payload: &str) -> std::result::Result<Vec<u8>, PdfError> {
    let data = match payload.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => payload,
    };
    Ok(BASE64.decode(data.trim())?)
}

/// Load the font family from `dir`: Arial if present, LiberationSans otherwise.
fn load_font(
    dir: &Path,
) -> std::result::Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, PdfError> {
    if let Ok(family) = genpdf::fonts::from_files(dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(dir, "LiberationSans", None).map_err(|e| PdfError::Font {
        dir: dir.display().to_string(),
        reason: e.to_string(),
    })
}

/// A4 document with the layout margins as page decorator.
fn configure_document(
    fonts_dir: &Path,
    title: &str,
    layout: &PageLayout,
) -> std::result::Result<Document, PdfError> {
    let mut doc = Document::new(load_font(fonts_dir)?);
    doc.set_title(title);
    doc.set_paper_size(PaperSize::A4);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(layout.margin_mm.round() as i32);
    doc.set_page_decorator(decorator);
    Ok(doc)
}

/// Cuts the image into page strips, flattened over a white background.
pub fn split_pages(
    image: &DynamicImage,
    layout: &PageLayout,
) -> std::result::Result<Vec<RgbImage>, PdfError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PdfError::EmptyImage);
    }

    Ok(layout
        .slices(width, height)
        .into_iter()
        .map(|slice| {
            let strip = image.crop_imm(0, slice.y, width, slice.height).to_rgba8();
            let (w, h) = strip.dimensions();
            let mut background =
                image::RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]));
            image::imageops::overlay(&mut background, &strip, 0, 0);
            DynamicImage::ImageRgba8(background).to_rgb8()
        })
        .collect())
}

/// genpdf embeds images from disk, so each page is written to a temp PNG
/// that has to live until rendering finishes.
fn write_temp_png(page: &RgbImage) -> std::result::Result<NamedTempFile, PdfError> {
    let (w, h) = page.dimensions();
    let mut tmp = NamedTempFile::new()?;
    {
        let file = tmp.as_file_mut();
        let mut encoder = PngEncoder::new(file, w, h);
        encoder.set_color(PngColorType::Rgb);
        encoder.set_depth(PngBitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(page.as_raw())?;
    }
    Ok(tmp)
}

pub fn assemble_pdf(
    png: &[u8],
    title: &str,
    fonts_dir: &Path,
    layout: PageLayout,
) -> std::result::Result<Vec<u8>, PdfError> {
    let image = image::load_from_memory(png)?;
    let pages = split_pages(&image, &layout)?;
    let dpi = layout.dpi_for(image.width());

    let mut doc = configure_document(fonts_dir, title, &layout)?;

    // Keep temporary files alive until rendering finishes
    let mut temp_files: Vec<NamedTempFile> = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            doc.push(PageBreak::new());
        }
        let tmp = write_temp_png(page)?;
        let mut element = PdfImage::from_path(tmp.path())?;
        element.set_dpi(dpi);
        temp_files.push(tmp);
        doc.push(element);
    }

    let mut out = Vec::new();
    doc.render(&mut out)?;
    info!("Rendered {} page(s) for '{}'", pages.len(), title);
    Ok(out)
}

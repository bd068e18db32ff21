//! Update function for the BRD generator.
//!
//! Every step of a generation is a `GenerationEvent` applied to the current
//! `GenerationPhase`; an event the phase does not accept is logged and
//! ignored, which is what keeps double submissions and stray async answers
//! out of the state.
//!
//! Flow
//! - `Generate`: read the accepted files, then `ContentsReady` or `ExtractionFailed`.
//! - `ContentsReady`: compose one request, then `Completed` or `RequestFailed`.
//! - `ExportPdf`: rasterize, post, download, then `ExportFinished`.

use common::compose::{compose, GenerationRequest};
use common::export::{export_filename, text_export};
use common::state::GenerationEvent;
use gloo_console::{log, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::browser_file::BrowserFile;
use super::helpers::{download_bytes, show_toast};
use super::messages::Msg;
use super::state::BrdGeneratorComponent;
use super::{api, files, rasterize};

pub fn update(
    component: &mut BrdGeneratorComponent,
    ctx: &Context<BrdGeneratorComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::SetDescription(text) => {
            component.description = text;
            true
        }
        Msg::SetAdditionalInfo(text) => {
            component.additional_info = text;
            true
        }
        Msg::SetModel(model) => {
            component.model = model;
            true
        }
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<web_sys::HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::SetDragging(dragging) => {
            if component.is_dragging == dragging {
                return false;
            }
            component.is_dragging = dragging;
            true
        }
        Msg::FilesPicked(picked) => {
            component.is_dragging = false;
            if component.phase.is_busy() {
                show_toast("Files cannot be changed while a generation is running.");
                return true;
            }
            let batch = picked.into_iter().map(BrowserFile::from);
            match component.intake.accept_batch(batch) {
                Ok(report) => {
                    if let Some(notice) = report.notice() {
                        show_toast(&notice);
                    }
                    if report.accepted > 0 {
                        log!(format!(
                            "{} file(s) added, {} attached",
                            report.accepted,
                            component.intake.len()
                        ));
                    }
                }
                Err(err) => show_toast(&err.to_string()),
            }
            true
        }
        Msg::RemoveFile(id) => {
            if component.phase.is_busy() {
                return false;
            }
            component.intake.remove(&id)
        }
        Msg::Generate => {
            if !advance(component, GenerationEvent::Generate) {
                return false;
            }
            let attached = component.intake.files().to_vec();
            let link = ctx.link().clone();
            spawn_local(async move {
                match files::extract_all(attached).await {
                    Ok(contents) => link.send_message(Msg::ContentsReady(contents)),
                    Err(err) => link.send_message(Msg::ExtractionFailed(err)),
                }
            });
            true
        }
        Msg::ContentsReady(contents) => {
            if !advance(component, GenerationEvent::ContentsReady) {
                return false;
            }
            let submission = compose(GenerationRequest {
                description: component.description.clone(),
                additional_info: Some(component.additional_info.clone()),
                files: contents,
                model: component.model.clone(),
            });
            log!(format!("Submitting to {}", submission.endpoint.path()));

            let link = ctx.link().clone();
            spawn_local(async move {
                match api::submit(&submission).await {
                    Ok(result) => link.send_message(Msg::Completed(result)),
                    Err(err) => link.send_message(Msg::RequestFailed(err)),
                }
            });
            true
        }
        Msg::ExtractionFailed(err) => {
            show_toast(&format!("Error processing files: {}", err));
            advance(component, GenerationEvent::ExtractionFailed(err))
        }
        Msg::Completed(result) => {
            show_toast(&result.message);
            advance(component, GenerationEvent::Completed(result))
        }
        Msg::RequestFailed(err) => {
            show_toast(&format!("Error generating BRD: {}", err));
            advance(component, GenerationEvent::RequestFailed(err))
        }
        Msg::ExportText => {
            if let Some(result) = component.phase.result() {
                let file = text_export(result);
                match download_bytes(&file.filename, file.mime, &file.bytes) {
                    Ok(()) => show_toast(&format!("Downloaded {}", file.filename)),
                    Err(err) => show_toast(&format!("Download failed: {}", err)),
                }
            }
            false
        }
        Msg::ExportPdf => {
            let Some(result) = component.phase.result().cloned() else {
                return false;
            };
            if !advance(component, GenerationEvent::ExportStarted) {
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = export_pdf(&result.project_name, &result.brd_markdown).await;
                link.send_message(Msg::ExportFinished(outcome));
            });
            true
        }
        Msg::ExportFinished(outcome) => {
            if let Err(err) = outcome {
                show_toast(&format!("PDF export failed: {}", err));
            }
            advance(component, GenerationEvent::ExportFinished)
        }
    }
}

/// Applies `event` to the phase. Returns whether it was accepted.
fn advance(component: &mut BrdGeneratorComponent, event: GenerationEvent) -> bool {
    match component.phase.clone().transition(event) {
        Ok(next) => {
            component.phase = next;
            true
        }
        Err(err) => {
            warn!(err.to_string());
            false
        }
    }
}

async fn export_pdf(title: &str, markdown: &str) -> Result<(), String> {
    let png = rasterize::rasterize_markdown(title, markdown).await?;
    let pdf = api::export_pdf(title, png).await?;
    let filename = export_filename(title, "pdf");
    download_bytes(&filename, "application/pdf", &pdf)?;
    show_toast(&format!("Downloaded {}", filename));
    Ok(())
}

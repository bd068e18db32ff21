//! View rendering for the BRD generator.
//!
//! Two columns: the input form (model, description, additional information,
//! drop zone and file list) and the result panel. Controls are disabled
//! while the phase is busy.

use common::limits::{AVAILABLE_MODELS, MAX_FILES_COUNT, MAX_PROJECT_DESCRIPTION_LENGTH};
use common::markup::markdown_to_html;
use common::model::generation::GenerationResult;
use common::state::GenerationPhase;
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::browser_file::from_file_list;
use super::helpers::{format_count, format_size};
use super::messages::Msg;
use super::state::BrdGeneratorComponent;

pub fn view(component: &BrdGeneratorComponent, ctx: &Context<BrdGeneratorComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div style="display:flex;gap:24px;padding:24px;align-items:flex-start;flex-wrap:wrap;">
            <div style="flex:1 1 380px;min-width:320px;background:#fff;border-radius:8px;padding:20px;box-shadow:0 1px 4px rgba(0,0,0,0.08);">
                { build_model_selector(component, link) }
                { build_text_inputs(component, link) }
                { build_drop_zone(component, link) }
                { build_file_list(component, link) }
                { build_generate_button(component, link) }
            </div>
            <div style="flex:2 1 520px;min-width:320px;">
                { build_result_panel(component, link) }
            </div>
        </div>
    }
}

fn build_model_selector(component: &BrdGeneratorComponent, link: &Scope<BrdGeneratorComponent>) -> Html {
    let options = AVAILABLE_MODELS
        .iter()
        .map(|model| {
            html! {
                <option value={*model} selected={component.model == *model}>{ *model }</option>
            }
        })
        .collect::<Html>();

    html! {
        <label style="display:block;margin-bottom:14px;">
            <div style="font-weight:bold;margin-bottom:4px;">{"Model"}</div>
            <select
                disabled={component.phase.is_busy()}
                onchange={link.callback(|e: Event| {
                    Msg::SetModel(e.target_unchecked_into::<HtmlSelectElement>().value())
                })}
                style="width:100%;padding:6px;"
            >
                { options }
            </select>
        </label>
    }
}

fn build_text_inputs(component: &BrdGeneratorComponent, link: &Scope<BrdGeneratorComponent>) -> Html {
    let busy = component.phase.is_busy();
    let count = component.description.chars().count();
    let counter_color = if count > MAX_PROJECT_DESCRIPTION_LENGTH { "#c62828" } else { "#7b8794" };

    html! {
        <>
            <label style="display:block;margin-bottom:14px;">
                <div style="font-weight:bold;margin-bottom:4px;">{"Project description"}</div>
                <textarea
                    value={component.description.clone()}
                    disabled={busy}
                    rows={6}
                    placeholder="Describe the project, its users and what it must achieve..."
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetDescription(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                    style="width:100%;box-sizing:border-box;padding:8px;resize:vertical;"
                />
                <div style={format!("text-align:right;font-size:11px;color:{};", counter_color)}>
                    { format_count(count, MAX_PROJECT_DESCRIPTION_LENGTH) }
                </div>
            </label>
            <label style="display:block;margin-bottom:14px;">
                <div style="font-weight:bold;margin-bottom:4px;">{"Additional information"}</div>
                <textarea
                    value={component.additional_info.clone()}
                    disabled={busy}
                    rows={3}
                    placeholder="Constraints, stakeholders, deadlines (optional)"
                    oninput={link.callback(|e: InputEvent| {
                        Msg::SetAdditionalInfo(e.target_unchecked_into::<HtmlTextAreaElement>().value())
                    })}
                    style="width:100%;box-sizing:border-box;padding:8px;resize:vertical;"
                />
            </label>
        </>
    }
}

fn build_drop_zone(component: &BrdGeneratorComponent, link: &Scope<BrdGeneratorComponent>) -> Html {
    let zone_style = if component.is_dragging {
        "border:2px dashed #0b3d91;background:#e8f0fe;"
    } else {
        "border:2px dashed #cbd2d9;background:#fafbfc;"
    };

    html! {
        <div
            style={format!("{}border-radius:6px;padding:18px;text-align:center;margin-bottom:10px;", zone_style)}
            ondragover={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::SetDragging(true)
            })}
            ondragleave={link.callback(|_: DragEvent| Msg::SetDragging(false))}
            ondrop={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::FilesPicked(from_file_list(e.data_transfer().and_then(|dt| dt.files())))
            })}
        >
            <i class="material-icons" style="font-size:32px;color:#7b8794;">{"upload_file"}</i>
            <div>{"Drop PDF, Markdown or DOCX files here"}</div>
            <div style="font-size:11px;color:#7b8794;margin:4px 0 8px;">
                { format!("Up to {} files, 10MB each", MAX_FILES_COUNT) }
            </div>
            <button
                class="icon-btn"
                disabled={component.phase.is_busy()}
                onclick={link.callback(|_| Msg::OpenFileDialog)}
            >
                {"Browse"}
            </button>
            <input
                type="file"
                multiple=true
                accept=".pdf,.md,.markdown,.docx"
                ref={component.file_input_ref.clone()}
                style="display:none;"
                onchange={link.callback(|e: Event| {
                    let input = e.target_unchecked_into::<HtmlInputElement>();
                    let picked = from_file_list(input.files());
                    // Lets the same file be picked again after removal
                    input.set_value("");
                    Msg::FilesPicked(picked)
                })}
            />
        </div>
    }
}

fn build_file_list(component: &BrdGeneratorComponent, link: &Scope<BrdGeneratorComponent>) -> Html {
    if component.intake.is_empty() {
        return html! {};
    }
    let busy = component.phase.is_busy();

    html! {
        <ul style="list-style:none;padding:0;margin:0 0 14px;">
            { for component.intake.files().iter().map(|file| {
                let id = file.id.clone();
                html! {
                    <li key={file.id.clone()} style="display:flex;align-items:center;justify-content:space-between;padding:6px 8px;border-bottom:1px solid #eef1f4;">
                        <span>
                            <i class="material-icons" style="font-size:16px;vertical-align:middle;margin-right:6px;">{"description"}</i>
                            { file.name.clone() }
                            <span style="color:#7b8794;font-size:11px;margin-left:6px;">{ format_size(file.size) }</span>
                        </span>
                        <button
                            class="icon-btn"
                            title="Remove"
                            disabled={busy}
                            onclick={link.callback(move |_| Msg::RemoveFile(id.clone()))}
                        >
                            <i class="material-icons" style="font-size:16px;">{"close"}</i>
                        </button>
                    </li>
                }
            }) }
        </ul>
    }
}

fn build_generate_button(component: &BrdGeneratorComponent, link: &Scope<BrdGeneratorComponent>) -> Html {
    let label = match component.phase {
        GenerationPhase::ValidatingFiles => "Processing files...",
        GenerationPhase::Submitting => "Generating BRD...",
        _ => "Generate BRD",
    };

    html! {
        <button
            class="icon-btn primary"
            style="width:100%;justify-content:center;"
            disabled={component.phase.is_busy()}
            onclick={link.callback(|_| Msg::Generate)}
        >
            <i class="material-icons">{"auto_awesome"}</i>
            <span>{ label }</span>
        </button>
    }
}

fn build_result_panel(component: &BrdGeneratorComponent, link: &Scope<BrdGeneratorComponent>) -> Html {
    match &component.phase {
        GenerationPhase::Succeeded(result) | GenerationPhase::Rendering(result) => {
            build_result(result, matches!(component.phase, GenerationPhase::Rendering(_)), link)
        }
        GenerationPhase::Failed(message) => html! {
            <div style="background:#fdecea;color:#8a1c1c;border-radius:8px;padding:16px;">
                <strong>{"Generation failed. "}</strong>{ message }
            </div>
        },
        GenerationPhase::ValidatingFiles | GenerationPhase::Submitting => html! {
            <div style="display:flex;flex-direction:column;align-items:center;padding:48px;color:#52606d;">
                <div style="width:40px;height:40px;border:5px solid #d9e2ec;border-top-color:#0b3d91;border-radius:50%;animation:spin 1s linear infinite;"></div>
                <div style="margin-top:12px;">{"Working on your BRD..."}</div>
            </div>
        },
        GenerationPhase::Idle => html! {
            <div style="color:#7b8794;padding:48px;text-align:center;">
                {"The generated document will appear here."}
            </div>
        },
    }
}

fn build_result(result: &GenerationResult, rendering: bool, link: &Scope<BrdGeneratorComponent>) -> Html {
    let body = AttrValue::from(markdown_to_html(&result.brd_markdown));

    html! {
        <div style="background:#fff;border-radius:8px;padding:20px;box-shadow:0 1px 4px rgba(0,0,0,0.08);">
            <div style="display:flex;justify-content:space-between;align-items:flex-start;gap:12px;flex-wrap:wrap;">
                <div>
                    <div style="color:#2e7d32;font-size:13px;">{ result.message.clone() }</div>
                    <h2 style="margin:6px 0;">{ result.project_name.clone() }</h2>
                    <div style="color:#7b8794;font-size:12px;">
                        { format!("Provider: {}", result.llm_provider_used) }
                        { summary_line(result) }
                    </div>
                </div>
                <div style="display:flex;gap:8px;">
                    <button class="icon-btn" disabled={rendering} onclick={link.callback(|_| Msg::ExportText)}>
                        <i class="material-icons">{"download"}</i>
                        <span>{"Markdown"}</span>
                    </button>
                    <button class="icon-btn" disabled={rendering} onclick={link.callback(|_| Msg::ExportPdf)}>
                        <i class="material-icons">{"picture_as_pdf"}</i>
                        <span>{ if rendering { "Building PDF..." } else { "PDF" } }</span>
                    </button>
                </div>
            </div>
            <hr style="border:none;border-top:1px solid #eef1f4;margin:16px 0;" />
            <div class="markdown-preview">{ Html::from_html_unchecked(body) }</div>
        </div>
    }
}

fn summary_line(result: &GenerationResult) -> String {
    let Some(summary) = &result.summary else {
        return String::new();
    };
    let files = summary
        .files_processed
        .map(|n| format!(" · {} file(s) processed", n))
        .unwrap_or_default();
    format!(
        " · Completeness {:.0}% ({}){}",
        summary.completeness_score, summary.completeness_status, files
    )
}

//! Runtime state of the BRD generator.
//!
//! Form fields, the accepted files and the generation phase. Whether the
//! controls are enabled, and which result is shown, is derived from `phase`
//! alone.

use common::intake::FileIntake;
use common::limits::DEFAULT_MODEL;
use common::state::GenerationPhase;
use yew::prelude::*;

use super::browser_file::BrowserFile;

pub struct BrdGeneratorComponent {
    pub description: String,
    pub additional_info: String,
    /// Gemini model id sent with the request.
    pub model: String,
    pub intake: FileIntake<BrowserFile>,
    /// A drag with files is over the drop zone.
    pub is_dragging: bool,
    pub phase: GenerationPhase,
    /// Hidden `<input type="file">` behind the "Browse" button.
    pub file_input_ref: NodeRef,
}

impl BrdGeneratorComponent {
    pub fn new(initial_model: Option<String>) -> Self {
        Self {
            description: String::new(),
            additional_info: String::new(),
            model: initial_model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            intake: FileIntake::new(),
            is_dragging: false,
            phase: GenerationPhase::Idle,
            file_input_ref: NodeRef::default(),
        }
    }
}

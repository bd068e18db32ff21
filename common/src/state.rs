//! Generation lifecycle as an explicit state machine.
//!
//! One value of `GenerationPhase` replaces the separate "generating",
//! "processing files" and "building PDF" flags. The current result lives
//! inside the phases that have one, so starting a new attempt is what clears
//! it.

use crate::model::generation::GenerationResult;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    /// Reading and extracting the attached files.
    ValidatingFiles,
    /// Waiting for the backend.
    Submitting,
    /// Producing the paginated export of the shown result.
    Rendering(GenerationResult),
    Succeeded(GenerationResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    Generate,
    ContentsReady,
    ExtractionFailed(String),
    Completed(GenerationResult),
    RequestFailed(String),
    ExportStarted,
    ExportFinished,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransitionError {
    #[error("Invalid transition from {from} on {event}")]
    Invalid { from: &'static str, event: &'static str },
}

impl GenerationPhase {
    pub fn name(&self) -> &'static str {
        match self {
            GenerationPhase::Idle => "Idle",
            GenerationPhase::ValidatingFiles => "ValidatingFiles",
            GenerationPhase::Submitting => "Submitting",
            GenerationPhase::Rendering(_) => "Rendering",
            GenerationPhase::Succeeded(_) => "Succeeded",
            GenerationPhase::Failed(_) => "Failed",
        }
    }

    /// Trigger controls are disabled while this is true.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            GenerationPhase::ValidatingFiles
                | GenerationPhase::Submitting
                | GenerationPhase::Rendering(_)
        )
    }

    /// The result on display, if any.
    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            GenerationPhase::Succeeded(result) | GenerationPhase::Rendering(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            GenerationPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Applies `event`, consuming the current phase.
    pub fn transition(self, event: GenerationEvent) -> Result<Self, TransitionError> {
        use GenerationEvent as E;
        use GenerationPhase as P;

        match (self, event) {
            (P::Idle | P::Succeeded(_) | P::Failed(_), E::Generate) => Ok(P::ValidatingFiles),
            (P::ValidatingFiles, E::ContentsReady) => Ok(P::Submitting),
            (P::ValidatingFiles, E::ExtractionFailed(message)) => Ok(P::Failed(message)),
            (P::Submitting, E::Completed(result)) => Ok(P::Succeeded(result)),
            (P::Submitting, E::RequestFailed(message)) => Ok(P::Failed(message)),
            (P::Succeeded(result), E::ExportStarted) => Ok(P::Rendering(result)),
            (P::Rendering(result), E::ExportFinished) => Ok(P::Succeeded(result)),
            (from, event) => Err(TransitionError::Invalid {
                from: from.name(),
                event: event.name(),
            }),
        }
    }
}

impl GenerationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GenerationEvent::Generate => "Generate",
            GenerationEvent::ContentsReady => "ContentsReady",
            GenerationEvent::ExtractionFailed(_) => "ExtractionFailed",
            GenerationEvent::Completed(_) => "Completed",
            GenerationEvent::RequestFailed(_) => "RequestFailed",
            GenerationEvent::ExportStarted => "ExportStarted",
            GenerationEvent::ExportFinished => "ExportFinished",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str) -> GenerationResult {
        GenerationResult {
            success: true,
            message: "done".to_string(),
            project_name: name.to_string(),
            brd_markdown: "# BRD".to_string(),
            llm_provider_used: "Google Gemini".to_string(),
            brd_schema: None,
            generated_data: None,
            summary: None,
        }
    }

    #[test]
    fn happy_path_with_export() {
        let phase = GenerationPhase::Idle
            .transition(GenerationEvent::Generate)
            .and_then(|p| p.transition(GenerationEvent::ContentsReady))
            .and_then(|p| p.transition(GenerationEvent::Completed(result("A"))))
            .unwrap();
        assert_eq!(phase.result().unwrap().project_name, "A");
        assert!(!phase.is_busy());

        let rendering = phase.transition(GenerationEvent::ExportStarted).unwrap();
        assert!(rendering.is_busy());
        assert_eq!(rendering.result().unwrap().project_name, "A");

        let back = rendering.transition(GenerationEvent::ExportFinished).unwrap();
        assert_eq!(back, GenerationPhase::Succeeded(result("A")));
    }

    #[test]
    fn new_attempt_clears_previous_result() {
        let phase = GenerationPhase::Succeeded(result("old"))
            .transition(GenerationEvent::Generate)
            .unwrap();
        assert_eq!(phase, GenerationPhase::ValidatingFiles);
        assert!(phase.result().is_none());
    }

    #[test]
    fn failures_are_terminal_until_retried() {
        let failed = GenerationPhase::Submitting
            .transition(GenerationEvent::RequestFailed("HTTP 500".to_string()))
            .unwrap();
        assert_eq!(failed.error(), Some("HTTP 500"));

        let extraction = GenerationPhase::ValidatingFiles
            .transition(GenerationEvent::ExtractionFailed("unreadable".to_string()))
            .unwrap();
        assert_eq!(extraction.error(), Some("unreadable"));

        assert_eq!(
            failed.transition(GenerationEvent::Generate).unwrap(),
            GenerationPhase::ValidatingFiles
        );
    }

    #[test]
    fn busy_phases_reject_new_triggers() {
        for busy in [
            GenerationPhase::ValidatingFiles,
            GenerationPhase::Submitting,
            GenerationPhase::Rendering(result("x")),
        ] {
            assert!(busy.is_busy());
            let err = busy.clone().transition(GenerationEvent::Generate).unwrap_err();
            assert_eq!(
                err,
                TransitionError::Invalid {
                    from: busy.name(),
                    event: "Generate"
                }
            );
        }
    }

    #[test]
    fn export_needs_a_result() {
        assert!(GenerationPhase::Idle
            .transition(GenerationEvent::ExportStarted)
            .is_err());
        assert!(GenerationPhase::Failed("x".to_string())
            .transition(GenerationEvent::ExportStarted)
            .is_err());
    }
}

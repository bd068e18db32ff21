use common::model::generation::GenerationResult;
use common::model::upload::UploadedFile;

pub enum Msg {
    SetDescription(String),
    SetAdditionalInfo(String),
    SetModel(String),
    OpenFileDialog,
    FilesPicked(Vec<web_sys::File>),
    SetDragging(bool),
    RemoveFile(String),
    Generate,
    ContentsReady(Vec<UploadedFile>),
    ExtractionFailed(String),
    Completed(GenerationResult),
    RequestFailed(String),
    ExportText,
    ExportPdf,
    ExportFinished(Result<(), String>),
}

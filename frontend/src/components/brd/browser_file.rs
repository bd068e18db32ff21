use common::intake::CandidateFile;
use gloo_file::File;

/// A file handed over by the picker or a drop.
#[derive(Debug, Clone)]
pub struct BrowserFile(pub File);

impl From<web_sys::File> for BrowserFile {
    fn from(file: web_sys::File) -> Self {
        Self(File::from(file))
    }
}

impl CandidateFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size()
    }

    fn declared_type(&self) -> String {
        self.0.raw_mime_type()
    }
}

/// Collects the entries of a `FileList` in order.
pub fn from_file_list(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    list.map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
        .unwrap_or_default()
}

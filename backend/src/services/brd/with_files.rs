use actix_web::{web, HttpResponse};
use common::compose::looks_like_existing_brd;
use common::model::requests::WithFilesRequest;
use log::info;

use super::gemini::BrdGenerator;
use super::{generate, prompt, validate};
use crate::error::Result;

/// Characters of each file added to the description in standard mode.
const FILE_CONTEXT_CHARS: usize = 2_000;

/// `POST /api/generate_brd_with_files`
///
/// When any file name looks like an existing BRD, the files are analysed and
/// improved with the description as instructions. Otherwise the description is
/// enriched with a preview of every file and a new BRD is generated.
pub async fn process(
    generator: web::Data<dyn BrdGenerator>,
    payload: web::Json<WithFilesRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    validate::with_files(&request)?;

    let files = &request.uploaded_files;
    let model = request.model.as_deref();

    let result = if looks_like_existing_brd(files.iter().map(|f| f.filename.as_str())) {
        info!("Existing BRD detected in {} file(s), using improvement mode", files.len());
        let existing = files
            .iter()
            .map(|f| f.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        generate::improve(
            generator.get_ref(),
            &existing,
            &request.project_description,
            model,
            files.len(),
        )
        .await?
    } else {
        let description =
            prompt::enhanced_description(&request.project_description, files, FILE_CONTEXT_CHARS);
        info!(
            "BRD with {} file(s), enhanced description {} chars",
            files.len(),
            description.len()
        );
        generate::standard(
            generator.get_ref(),
            &description,
            model,
            Some(files.len()),
            "BRD generated successfully from your input and uploaded files!",
        )
        .await?
    };

    Ok(HttpResponse::Ok().json(result))
}

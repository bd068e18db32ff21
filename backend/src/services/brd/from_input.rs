use actix_web::{web, HttpResponse};
use common::model::requests::FromInputRequest;
use log::info;

use super::gemini::BrdGenerator;
use super::{generate, validate};
use crate::error::Result;

/// `POST /api/generate_brd_from_input`
///
/// Validates the description (10 to 5000 characters), asks the generator for
/// the structured BRD and answers with the rendered document and its summary.
pub async fn process(
    generator: web::Data<dyn BrdGenerator>,
    payload: web::Json<FromInputRequest>,
) -> Result<HttpResponse> {
    let request = payload.into_inner();
    validate::from_input(&request)?;
    info!(
        "BRD from input: {} chars, model {:?}",
        request.project_description.len(),
        request.model
    );

    let result = generate::standard(
        generator.get_ref(),
        &request.project_description,
        request.model.as_deref(),
        None,
        "BRD generated successfully from your input!",
    )
    .await?;

    Ok(HttpResponse::Ok().json(result))
}

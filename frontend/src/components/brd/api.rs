//! Calls to the backend.

use common::compose::Submission;
use common::model::generation::GenerationResult;
use common::model::requests::ExportPdfRequest;
use gloo_net::http::{Request, Response};
use serde::Deserialize;

const EXPORT_PDF_PATH: &str = "/api/export/pdf";

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Sends one composed generation request.
pub async fn submit(submission: &Submission) -> Result<GenerationResult, String> {
    let response = Request::post(submission.endpoint.path())
        .json(&submission.body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| format!("Could not reach the server: {}", e))?;

    if !response.ok() {
        return Err(failure_message(response).await);
    }
    response
        .json::<GenerationResult>()
        .await
        .map_err(|e| format!("Unexpected response from the server: {}", e))
}

/// Posts the rasterized document and returns the PDF bytes.
pub async fn export_pdf(title: &str, image_base64: String) -> Result<Vec<u8>, String> {
    let body = ExportPdfRequest {
        title: title.to_string(),
        image_base64,
    };
    let response = Request::post(EXPORT_PDF_PATH)
        .json(&body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| format!("Could not reach the server: {}", e))?;

    if !response.ok() {
        return Err(failure_message(response).await);
    }
    response.binary().await.map_err(|e| e.to_string())
}

/// The server's `detail`, or the bare status when the body has none.
async fn failure_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => format!("Request failed with status {}", status),
    }
}

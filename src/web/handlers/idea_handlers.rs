// src/web/handlers/idea_handlers.rs
//! Business idea generation and download
use crate::core::{GenerationResult, IdeaClient};
use crate::form::{FormError, FormSubmission};
use crate::models::REQUEST_MODEL;
use crate::web::types::{
    ApiError, DataResponse, DownloadRequest, IdeasData, StandardErrorResponse, StandardRequest,
    TextFileResponse, WithConversationId, DOWNLOAD_FILENAME,
};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

pub async fn generate_ideas_handler(
    request: Json<StandardRequest<FormSubmission>>,
    client: &State<IdeaClient>,
) -> Result<Json<DataResponse<IdeasData>>, ApiError> {
    let request_id = Uuid::new_v4().to_string();
    let span = info_span!("idea_generation", request_id = %request_id);

    run_generation(request.into_inner(), client.inner(), request_id)
        .instrument(span)
        .await
}

async fn run_generation(
    request: StandardRequest<FormSubmission>,
    client: &IdeaClient,
    request_id: String,
) -> Result<Json<DataResponse<IdeasData>>, ApiError> {
    let conversation_id = request.conversation_id();

    let form = request.data.collect().map_err(|e| {
        warn!("Form rejected: {}", e);
        validation_error(e, conversation_id.clone())
    })?;

    if form.model.id != REQUEST_MODEL {
        debug!(
            "Model {} selected, request will use {}",
            form.model.id, REQUEST_MODEL
        );
    }

    info!(
        "Generating ideas, budget: {}, time: {}, market: {}",
        form.inputs.budget.label(),
        form.inputs.time_commitment_label(),
        form.inputs.market_preference_label()
    );

    match client.generate(&form.api_key, &form.inputs).await {
        GenerationResult::Ideas(ideas) => Ok(Json(DataResponse::success(
            "Business ideas generated successfully".to_string(),
            IdeasData {
                ideas,
                model: REQUEST_MODEL,
                requested_model: form.model.id,
                generated_at: chrono::Utc::now(),
                request_id,
                download_filename: DOWNLOAD_FILENAME,
            },
            conversation_id,
        ))),
        failed @ GenerationResult::Failed(_) => Err((
            Status::BadGateway,
            Json(StandardErrorResponse::new(
                failed.to_string(),
                "GENERATION_FAILED".to_string(),
                vec![
                    "Check that your API key is valid".to_string(),
                    "Try again in a few moments".to_string(),
                ],
                conversation_id,
            )),
        )),
    }
}

fn validation_error(error: FormError, conversation_id: Option<String>) -> ApiError {
    let suggestions = match &error {
        FormError::MissingApiKey => vec!["Enter your Perplexity API key".to_string()],
        FormError::MissingRequiredFields { missing } => {
            vec![format!("Fill in: {}", missing.join(", "))]
        }
        FormError::UnknownOption { .. } => {
            vec!["Pick one of the options listed by /api/options".to_string()]
        }
    };

    (
        Status::UnprocessableEntity,
        Json(StandardErrorResponse::new(
            error.to_string(),
            "VALIDATION_ERROR".to_string(),
            suggestions,
            conversation_id,
        )),
    )
}

pub async fn download_ideas_handler(request: Json<DownloadRequest>) -> TextFileResponse {
    info!("Serving {} ({} bytes)", DOWNLOAD_FILENAME, request.content.len());
    TextFileResponse::new(request.into_inner().content)
}

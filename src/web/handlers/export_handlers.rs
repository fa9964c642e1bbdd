// src/web/handlers/export_handlers.rs
//! PDF report and e-mail delivery of generated ideas
use crate::core::mailer::MailError;
use crate::core::report::{render_pdf, PDF_FILENAME};
use crate::core::Mailer;
use crate::web::types::{
    ApiError, DownloadRequest, EmailRequest, PdfResponse, StandardErrorResponse, TextResponse,
};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn download_pdf_handler(request: Json<DownloadRequest>) -> Result<PdfResponse, ApiError> {
    let today = chrono::Local::now().date_naive();

    match render_pdf(&request.content, today) {
        Ok(data) => {
            info!("Serving {} ({} bytes)", PDF_FILENAME, data.len());
            Ok(PdfResponse::with_filename(data, PDF_FILENAME))
        }
        Err(e) => {
            error!("PDF rendering failed: {:#}", e);
            Err((
                Status::InternalServerError,
                Json(StandardErrorResponse::new(
                    format!("Failed to render PDF: {}", e),
                    "PDF_GENERATION_ERROR".to_string(),
                    vec!["Download the text file instead".to_string()],
                    None,
                )),
            ))
        }
    }
}

pub async fn email_ideas_handler(
    request: Json<EmailRequest>,
    mailer: &State<Mailer>,
) -> Result<Json<TextResponse>, ApiError> {
    let request = request.into_inner();

    match mailer.send_ideas(&request.email, &request.content).await {
        Ok(()) => Ok(Json(TextResponse::success(
            "Email sent successfully".to_string(),
            None,
        ))),
        Err(e) => {
            warn!("E-mail not sent: {}", e);
            Err(mail_error(e))
        }
    }
}

fn mail_error(error: MailError) -> ApiError {
    let (status, code, suggestion) = match &error {
        MailError::NotConfigured => (
            Status::ServiceUnavailable,
            "EMAIL_NOT_CONFIGURED",
            "Download the ideas instead",
        ),
        MailError::InvalidAddress { .. } => (
            Status::UnprocessableEntity,
            "INVALID_EMAIL",
            "Check the e-mail address",
        ),
        MailError::Build(_) | MailError::Transport(_) => (
            Status::BadGateway,
            "EMAIL_FAILED",
            "Try again in a few moments",
        ),
    };

    (
        status,
        Json(StandardErrorResponse::new(
            error.to_string(),
            code.to_string(),
            vec![suggestion.to_string()],
            None,
        )),
    )
}

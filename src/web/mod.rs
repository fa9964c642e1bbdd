// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::{AppConfig, IdeaClient, Mailer};
use crate::form::FormSubmission;
use crate::models::ModelInfo;
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub async fn index() -> RawHtml<&'static str> {
    handlers::index_handler().await
}

#[post("/generate", data = "<request>")]
pub async fn generate_ideas(
    request: Json<StandardRequest<FormSubmission>>,
    client: &State<IdeaClient>,
) -> Result<Json<DataResponse<IdeasData>>, ApiError> {
    handlers::generate_ideas_handler(request, client).await
}

#[post("/download", data = "<request>")]
pub async fn download_ideas(request: Json<DownloadRequest>) -> TextFileResponse {
    handlers::download_ideas_handler(request).await
}

#[post("/download/pdf", data = "<request>")]
pub async fn download_pdf(request: Json<DownloadRequest>) -> Result<PdfResponse, ApiError> {
    handlers::download_pdf_handler(request).await
}

#[post("/email", data = "<request>")]
pub async fn email_ideas(
    request: Json<EmailRequest>,
    mailer: &State<Mailer>,
) -> Result<Json<TextResponse>, ApiError> {
    handlers::email_ideas_handler(request, mailer).await
}

#[get("/models")]
pub async fn get_models() -> Json<DataResponse<Vec<ModelInfo>>> {
    handlers::get_models_handler().await
}

#[get("/options")]
pub async fn get_options() -> Json<DataResponse<FormOptions>> {
    handlers::get_options_handler().await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Check your request JSON format".to_string()],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec![
            "Available endpoints: /generate, /download, /download/pdf, /email, /models, /options, /health"
                .to_string(),
        ],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "UNPROCESSABLE".to_string(),
        vec!["Verify all fields have the expected types".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
        None,
    ))
}

/// Assemble the application on top of the given Rocket configuration
pub fn build_rocket(figment: Figment, client: IdeaClient, mailer: Mailer) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(client)
        .manage(mailer)
        .mount("/", routes![index])
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                generate_ideas,
                download_ideas,
                download_pdf,
                email_ideas,
                get_models,
                get_options,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let client = IdeaClient::new(config.api_base_url.clone(), config.timeout_seconds)?;
    let mailer = Mailer::from_config(config.smtp.as_ref())
        .context("Invalid smtp configuration")?;

    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", config.port));

    info!("Starting Business Idea Generator on port {}", config.port);
    info!("Chat completion API: {}", client.base_url());

    if let Err(e) = build_rocket(figment, client, mailer).launch().await {
        error!("Server failed: {}", e);
        anyhow::bail!("Rocket server failed: {}", e);
    }

    Ok(())
}

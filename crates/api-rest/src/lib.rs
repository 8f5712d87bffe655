//! # API REST
//!
//! REST API implementation for MedForm.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON and multipart bodies, file responses, CORS)
//! - Serving the static front end
//!
//! Uses `api-shared` for DTOs and response messages and `medform-core` for the document
//! pipeline and storage.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

use api_shared::{
    DocumentReq, ErrorRes, HealthRes, MessageRes, PrintDocumentRes, SaveDocumentRes,
    SearchRes, SearchResult, SignaturesRes, TemplateDto, TemplatesRes, UploadSignatureRes,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use medform_core::{
    ConversionPipeline, CoreConfig, DocumentService, FormResult, SignatureService,
    TemplateService,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Request bodies carry inline base64 signature images.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Application state for the REST API server
///
/// Holds the document, template and signature services. All of them share the same
/// immutable `CoreConfig`.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentService>,
    pub templates: Arc<TemplateService>,
    pub signatures: Arc<SignatureService>,
}

impl AppState {
    /// Services with the converter chain configured in `cfg`.
    pub fn new(cfg: Arc<CoreConfig>) -> FormResult<Self> {
        let pipeline = Arc::new(ConversionPipeline::from_config(&cfg));
        Self::with_pipeline(cfg, pipeline)
    }

    pub fn with_pipeline(
        cfg: Arc<CoreConfig>,
        pipeline: Arc<ConversionPipeline>,
    ) -> FormResult<Self> {
        Ok(Self {
            documents: Arc::new(DocumentService::with_pipeline(cfg.clone(), pipeline)?),
            templates: Arc::new(TemplateService::new(cfg.clone())?),
            signatures: Arc::new(SignatureService::new(cfg)?),
        })
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::save_document,
        handlers::print_document,
        handlers::print_page,
        handlers::view_pdf,
        handlers::download,
        handlers::upload_signature,
        handlers::get_signatures,
        handlers::search_patients,
        handlers::list_templates,
        handlers::save_template,
        handlers::delete_template,
    ),
    components(schemas(
        HealthRes,
        ErrorRes,
        MessageRes,
        DocumentReq,
        SaveDocumentRes,
        PrintDocumentRes,
        UploadSignatureRes,
        SignaturesRes,
        SearchResult,
        SearchRes,
        TemplateDto,
        TemplatesRes,
    ))
)]
pub struct ApiDoc;

/// Builds the application router.
///
/// When `static_dir` is given, unmatched paths are served from it (`/` serves its
/// `index.html`).
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/save-document", post(handlers::save_document))
        .route("/api/print-document", post(handlers::print_document))
        .route("/api/print-page/:filename", get(handlers::print_page))
        .route("/api/view-pdf/:filename", get(handlers::view_pdf))
        .route("/api/download/:filename", get(handlers::download))
        .route("/api/upload-signature", post(handlers::upload_signature))
        .route("/api/get-signatures", get(handlers::get_signatures))
        .route("/api/search-patients", get(handlers::search_patients))
        .route(
            "/api/templates",
            get(handlers::list_templates).post(handlers::save_template),
        )
        .route("/api/templates/:id", delete(handlers::delete_template))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state);

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

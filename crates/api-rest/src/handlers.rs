//! HTTP handlers.

use crate::error::{bad_request, reject, reject_with, ApiError, ApiResult};
use crate::AppState;
use api_shared::{
    messages, DocumentReq, ErrorRes, HealthRes, HealthService, MessageRes, PrintDocumentRes,
    SaveDocumentRes, SearchQuery, SearchRes, SearchResult, SignaturesRes, TemplateDto,
    TemplatesRes, UploadSignatureRes,
};
use axum::{
    body::Body,
    extract::{Multipart, Path as AxumPath, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Local;
use medform_core::{DocumentFile, FormError, SearchHit, SignatureRole, TemplateRecord};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/save-document",
    request_body = DocumentReq,
    responses(
        (status = 200, description = "Document generated and stored", body = SaveDocumentRes),
        (status = 400, description = "Invalid file name", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Generate the archive copy of a form and store it as `<filename>.docx`
///
/// `document_type` selects the layout; `filename` defaults to `document_<timestamp>`.
#[axum::debug_handler]
pub async fn save_document(
    State(state): State<AppState>,
    Json(req): Json<DocumentReq>,
) -> ApiResult<SaveDocumentRes> {
    let saved = state
        .documents
        .save(&req.0, Local::now())
        .map_err(|e| reject("Save document", e))?;

    Ok(Json(SaveDocumentRes {
        success: true,
        message: messages::DOCUMENT_SAVED.into(),
        filename: saved.file_name,
    }))
}

#[utoipa::path(
    post,
    path = "/api/print-document",
    request_body = DocumentReq,
    responses(
        (status = 200, description = "Print copy generated; `is_pdf` reports whether conversion succeeded", body = PrintDocumentRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Generate the print copy of a form and convert it to PDF when a converter is available
///
/// A failed conversion still succeeds: the DOCX is returned with `is_pdf: false`.
#[axum::debug_handler]
pub async fn print_document(
    State(state): State<AppState>,
    Json(req): Json<DocumentReq>,
) -> ApiResult<PrintDocumentRes> {
    let printed = state
        .documents
        .print(&req.0, Local::now())
        .await
        .map_err(|e| reject("Print document", e))?;

    let message = if printed.is_pdf {
        messages::PDF_CREATED
    } else {
        messages::PDF_CONVERSION_FAILED
    };
    Ok(Json(PrintDocumentRes {
        success: true,
        message: message.into(),
        filename: printed.file_name,
        is_pdf: printed.is_pdf,
    }))
}

#[utoipa::path(
    get,
    path = "/api/print-page/{filename}",
    params(("filename" = String, Path, description = "Stored document file name")),
    responses(
        (status = 200, description = "HTML page that embeds the document and opens the print dialog", content_type = "text/html"),
        (status = 404, description = "File not found")
    )
)]
/// Print wrapper page for a stored document
#[axum::debug_handler]
pub async fn print_page(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Response {
    if !state.documents.exists(&filename) {
        return (StatusCode::NOT_FOUND, messages::FILE_NOT_FOUND).into_response();
    }
    Html(print_page_html(&filename)).into_response()
}

#[utoipa::path(
    get,
    path = "/api/view-pdf/{filename}",
    params(("filename" = String, Path, description = "Stored document file name")),
    responses(
        (status = 200, description = "Document bytes for inline display", content_type = "application/pdf"),
        (status = 400, description = "Invalid file name", body = ErrorRes),
        (status = 404, description = "File not found", body = ErrorRes)
    )
)]
/// Serve a stored document inline
///
/// `.pdf` files are served as PDF, anything else as DOCX.
#[axum::debug_handler]
pub async fn view_pdf(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, ApiError> {
    let file = state
        .documents
        .open(&filename)
        .map_err(|e| reject_with("View document", e, messages::FILE_NOT_FOUND))?;
    Ok(file_response(file, "inline"))
}

#[utoipa::path(
    get,
    path = "/api/download/{filename}",
    params(("filename" = String, Path, description = "Stored document file name")),
    responses(
        (status = 200, description = "Document bytes as an attachment"),
        (status = 400, description = "Invalid file name", body = ErrorRes),
        (status = 404, description = "File not found", body = ErrorRes)
    )
)]
/// Download a stored document
#[axum::debug_handler]
pub async fn download(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, ApiError> {
    let file = state
        .documents
        .open(&filename)
        .map_err(|e| reject_with("Download", e, messages::FILE_NOT_FOUND))?;
    Ok(file_response(file, "attachment"))
}

#[utoipa::path(
    post,
    path = "/api/upload-signature",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "`file`: png/jpg/jpeg/gif image; `type`: doctor, head or stamp (default doctor)"
    ),
    responses(
        (status = 200, description = "Image stored", body = UploadSignatureRes),
        (status = 400, description = "Missing file, unknown type or unsupported image", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Upload a signature or stamp image
///
/// Replaces any image previously stored for the same role.
#[axum::debug_handler]
pub async fn upload_signature(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadSignatureRes> {
    let mut role = SignatureRole::Doctor;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!("Upload signature: unreadable file field: {}", e);
                    bad_request(messages::NO_FILE)
                })?;
                upload = Some((file_name, bytes.to_vec()));
            }
            Some("type") => {
                let text = field.text().await.map_err(|e| {
                    tracing::warn!("Upload signature: unreadable type field: {}", e);
                    bad_request(messages::NO_FILE)
                })?;
                if !text.trim().is_empty() {
                    role = text.parse().map_err(|e| reject("Upload signature", e))?;
                }
            }
            _ => {}
        }
    }

    let Some((file_name, bytes)) = upload else {
        return Err(bad_request(messages::NO_FILE));
    };
    if file_name.trim().is_empty() {
        return Err(bad_request(messages::NO_FILE_SELECTED));
    }

    let stored = state
        .signatures
        .upload(role, &file_name, &bytes)
        .map_err(|e| match e {
            FormError::UnsupportedImageType(ext) => {
                tracing::warn!("Upload signature rejected: unsupported extension {:?}", ext);
                bad_request(messages::IMAGES_ONLY)
            }
            other => reject("Upload signature", other),
        })?;

    Ok(Json(UploadSignatureRes {
        success: true,
        filename: stored.file_name,
        base64: stored.data_uri,
    }))
}

#[utoipa::path(
    get,
    path = "/api/get-signatures",
    responses(
        (status = 200, description = "Stored signature images by role", body = SignaturesRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// All stored signature and stamp images as data URIs
#[axum::debug_handler]
pub async fn get_signatures(State(state): State<AppState>) -> ApiResult<SignaturesRes> {
    let signatures = state
        .signatures
        .all()
        .map_err(|e| reject("Get signatures", e))?
        .into_iter()
        .map(|s| (s.role.as_str().to_owned(), s.data_uri))
        .collect();

    Ok(Json(SignaturesRes {
        success: true,
        signatures,
    }))
}

#[utoipa::path(
    get,
    path = "/api/search-patients",
    params(("q" = Option<String>, Query, description = "Case-insensitive search text")),
    responses(
        (status = 200, description = "Matching documents, then matching templates", body = SearchRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Search stored documents by file name and templates by patient
#[axum::debug_handler]
pub async fn search_patients(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<SearchRes> {
    let results = medform_core::search(&state.documents, &state.templates, &query.q)
        .map_err(|e| reject("Search", e))?
        .into_iter()
        .map(search_result)
        .collect();

    Ok(Json(SearchRes {
        success: true,
        results,
    }))
}

#[utoipa::path(
    get,
    path = "/api/templates",
    responses(
        (status = 200, description = "Saved templates", body = TemplatesRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// List saved templates
#[axum::debug_handler]
pub async fn list_templates(State(state): State<AppState>) -> ApiResult<TemplatesRes> {
    let templates = state
        .templates
        .list()
        .map_err(|e| reject("List templates", e))?
        .into_iter()
        .map(template_dto)
        .collect();

    Ok(Json(TemplatesRes {
        success: true,
        templates,
    }))
}

#[utoipa::path(
    post,
    path = "/api/templates",
    request_body = DocumentReq,
    responses(
        (status = 200, description = "Template saved", body = MessageRes),
        (status = 400, description = "Invalid template name", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Save the posted field values as a template
///
/// `template_name` names the template; the rest of the object is stored as is.
#[axum::debug_handler]
pub async fn save_template(
    State(state): State<AppState>,
    Json(req): Json<DocumentReq>,
) -> ApiResult<MessageRes> {
    state
        .templates
        .save(req.0, Local::now())
        .map_err(|e| reject("Save template", e))?;
    Ok(Json(MessageRes::ok(messages::TEMPLATE_SAVED)))
}

#[utoipa::path(
    delete,
    path = "/api/templates/{id}",
    params(("id" = String, Path, description = "Template id")),
    responses(
        (status = 200, description = "Template deleted", body = MessageRes),
        (status = 404, description = "Template not found", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Delete a saved template
#[axum::debug_handler]
pub async fn delete_template(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> ApiResult<MessageRes> {
    state
        .templates
        .delete(&id)
        .map_err(|e| reject_with("Delete template", e, messages::TEMPLATE_NOT_FOUND))?;
    Ok(Json(MessageRes::ok(messages::TEMPLATE_DELETED)))
}

fn template_dto(t: TemplateRecord) -> TemplateDto {
    TemplateDto {
        id: t.id,
        name: t.name,
        document_type: t.document_type,
        created: t.created,
        data: t.data,
    }
}

fn search_result(hit: SearchHit) -> SearchResult {
    match hit {
        SearchHit::Document { name, path, date } => SearchResult {
            kind: "document".into(),
            name,
            path: Some(path),
            id: None,
            patient: None,
            date,
        },
        SearchHit::Template {
            name,
            id,
            patient,
            date,
        } => SearchResult {
            kind: "template".into(),
            name,
            path: None,
            id: Some(id),
            patient: Some(patient),
            date,
        },
    }
}

fn file_response(file: DocumentFile, disposition: &str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition(disposition, &file.file_name),
        )
        .header(header::CONTENT_LENGTH, file.bytes.len().to_string())
        .body(Body::from(file.bytes))
        .unwrap_or_else(|_| {
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response()
        })
}

/// `Content-Disposition` value with an ASCII `filename` and an RFC 5987 `filename*`.
pub(crate) fn content_disposition(disposition: &str, file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "{disposition}; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(crate) fn print_page_html(file_name: &str) -> String {
    let src = format!("/api/view-pdf/{}", urlencoding::encode(file_name));
    format!(
        r#"<!DOCTYPE html>
<html lang="ka">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
html, body {{ margin: 0; height: 100%; }}
iframe {{ border: 0; width: 100%; height: 100%; }}
</style>
</head>
<body>
<iframe id="document" src="{src}"></iframe>
<script>
document.getElementById("document").addEventListener("load", function () {{
  try {{
    this.contentWindow.focus();
    this.contentWindow.print();
  }} catch (e) {{
    window.print();
  }}
}});
</script>
</body>
</html>
"#,
        title = html_escape(file_name),
        src = html_escape(&src),
    )
}

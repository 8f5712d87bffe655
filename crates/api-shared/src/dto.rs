//! Request and response bodies.
//!
//! Every JSON response carries `success`. Failures use [`ErrorRes`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body for every 4xx/5xx JSON response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorRes {
    pub success: bool,
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageRes {
    pub success: bool,
    pub message: String,
}

impl MessageRes {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Form payload: a flat object of field values plus `document_type` and, for saving,
/// `filename`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(transparent)]
pub struct DocumentReq(#[schema(value_type = Object)] pub Map<String, Value>);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SaveDocumentRes {
    pub success: bool,
    pub message: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PrintDocumentRes {
    pub success: bool,
    pub message: String,
    pub filename: String,
    /// False when conversion was not possible and `filename` is the DOCX.
    pub is_pdf: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UploadSignatureRes {
    pub success: bool,
    pub filename: String,
    /// `data:image/<ext>;base64,...`
    pub base64: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SignaturesRes {
    pub success: bool,
    /// Role (`doctor`, `head`, `stamp`) → data URI. Roles without an image are absent.
    pub signatures: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SearchResult {
    /// `document` or `template`.
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    /// Download path (documents only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Template id (templates only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Patient name (templates only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct SearchRes {
    pub success: bool,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TemplateDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub document_type: String,
    pub created: String,
    #[schema(value_type = Object)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TemplatesRes {
    pub success: bool,
    pub templates: Vec<TemplateDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_result_omits_absent_fields() {
        let doc = SearchResult {
            kind: "document".into(),
            name: "a.docx".into(),
            path: Some("/api/download/a.docx".into()),
            id: None,
            patient: None,
            date: "2024-03-05 09:00".into(),
        };
        let value = serde_json::to_value(doc).unwrap();
        assert_eq!(
            value,
            json!({"type": "document", "name": "a.docx", "path": "/api/download/a.docx", "date": "2024-03-05 09:00"})
        );
    }

    #[test]
    fn document_request_is_a_bare_object() {
        let req: DocumentReq = serde_json::from_value(json!({"patient_name": "Nino"})).unwrap();
        assert_eq!(req.0["patient_name"], "Nino");
    }

    #[test]
    fn error_body_shape() {
        let value = serde_json::to_value(ErrorRes::new("boom")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "boom"}));
    }
}

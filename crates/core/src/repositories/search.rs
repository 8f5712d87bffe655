//! Patient search across stored documents and templates.

use super::documents::DocumentService;
use super::templates::{TemplateRecord, TemplateService};
use crate::constants::SEARCH_DATE_FORMAT;
use crate::error::FormResult;
use serde::Serialize;

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchHit {
    /// A stored `.docx` whose file name matched.
    Document {
        name: String,
        /// Download URL path.
        path: String,
        /// Modification time, `YYYY-mm-dd HH:MM`.
        date: String,
    },
    /// A saved template whose patient name, personal id or name matched.
    Template {
        name: String,
        id: String,
        patient: String,
        date: String,
    },
}

/// `YYYY-mm-ddTHH:MM…` → `YYYY-mm-dd HH:MM`.
fn template_date(created: &str) -> String {
    created.chars().take(16).collect::<String>().replace('T', " ")
}

impl From<TemplateRecord> for SearchHit {
    fn from(t: TemplateRecord) -> Self {
        let patient = t
            .data
            .get("patient_name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("-")
            .to_owned();
        SearchHit::Template {
            date: template_date(&t.created),
            name: t.name,
            id: t.id,
            patient,
        }
    }
}

/// Documents first, then templates. An empty query matches nothing.
pub fn search(
    documents: &DocumentService,
    templates: &TemplateService,
    query: &str,
) -> FormResult<Vec<SearchHit>> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let mut hits: Vec<SearchHit> = documents
        .list_docx()?
        .into_iter()
        .filter(|meta| meta.file_name.as_str().to_lowercase().contains(&query))
        .map(|meta| SearchHit::Document {
            path: format!("/api/download/{}", meta.file_name),
            date: meta.modified_at.format(SEARCH_DATE_FORMAT).to_string(),
            name: meta.file_name.into_inner(),
        })
        .collect();

    hits.extend(templates.search(&query)?.into_iter().map(SearchHit::from));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConversionPipeline;
    use crate::repositories::tests::{at, test_config};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn template_dates_are_shortened() {
        assert_eq!(template_date("2024-03-05T09:30:12.123+04:00"), "2024-03-05 09:30");
        assert_eq!(template_date(""), "");
    }

    #[test]
    fn finds_documents_and_templates() {
        let (_dir, cfg) = test_config();
        let documents =
            DocumentService::with_pipeline(cfg.clone(), Arc::new(ConversionPipeline::new(vec![])))
                .unwrap();
        let templates = TemplateService::new(cfg.clone()).unwrap();

        let body = json!({"filename": "Beridze discharge"});
        documents.save(body.as_object().unwrap(), at(9, 0, 0)).unwrap();
        std::fs::write(cfg.documents_dir().join("beridze.pdf"), b"%PDF").unwrap();
        templates
            .save(
                json!({"template_name": "Flu", "patient_name": "Nino Beridze"})
                    .as_object()
                    .cloned()
                    .unwrap(),
                at(9, 30, 0),
            )
            .unwrap();

        let hits = search(&documents, &templates, "beridze").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(matches!(&hits[0], SearchHit::Document { name, path, .. }
            if name == "Beridze discharge.docx" && path == "/api/download/Beridze discharge.docx"));
        assert!(matches!(&hits[1], SearchHit::Template { patient, date, .. }
            if patient == "Nino Beridze" && date == "2024-03-05 09:30"));
    }

    #[test]
    fn empty_query_returns_nothing() {
        let (_dir, cfg) = test_config();
        let documents = DocumentService::new(cfg.clone()).unwrap();
        let templates = TemplateService::new(cfg).unwrap();
        documents
            .save(json!({"filename": "x"}).as_object().unwrap(), at(9, 0, 0))
            .unwrap();

        assert!(search(&documents, &templates, "  ").unwrap().is_empty());
    }

    #[test]
    fn hits_serialise_with_type_tag() {
        let hit = SearchHit::Document {
            name: "a.docx".into(),
            path: "/api/download/a.docx".into(),
            date: "2024-03-05 09:00".into(),
        };
        let value = serde_json::to_value(hit).unwrap();
        assert_eq!(value["type"], "document");
        assert_eq!(value["name"], "a.docx");
    }
}

//! Saved field-value templates.
//!
//! One pretty-printed JSON file per template under `saved_templates/`. The stored object
//! is the form payload as posted, plus `template_name` and `created`.
//!
//! ```text
//! saved_templates/
//!   pneumonia_discharge_20240305_093000.json
//!   flu_20240306_120000.json
//! ```

use super::file_timestamp;
use crate::config::CoreConfig;
use crate::constants::TEMPLATE_EXTENSION;
use crate::error::{FormError, FormResult};
use chrono::{DateTime, Local};
use medform_files::FilesService;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub const TEMPLATE_NAME_KEY: &str = "template_name";
pub const CREATED_KEY: &str = "created";
const DOCUMENT_TYPE_KEY: &str = crate::repositories::documents::DOCUMENT_TYPE_KEY;

/// A stored template as listed to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateRecord {
    /// File stem; also the id used for deletion.
    pub id: String,
    pub name: String,
    pub document_type: String,
    /// RFC 3339 creation time, local offset.
    pub created: String,
    /// The full stored object, including metadata keys.
    pub data: Map<String, Value>,
}

impl TemplateRecord {
    fn from_stored(id: String, data: Map<String, Value>) -> Self {
        let text = |key: &str| data.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            name: text(TEMPLATE_NAME_KEY).unwrap_or_else(|| format!("{id}.{TEMPLATE_EXTENSION}")),
            document_type: text(DOCUMENT_TYPE_KEY).unwrap_or_else(|| "unknown".into()),
            created: text(CREATED_KEY).unwrap_or_default(),
            id,
            data,
        }
    }

    /// Case-insensitive containment on patient name, personal id or template name.
    pub fn matches(&self, query_lower: &str) -> bool {
        ["patient_name", "personal_id", TEMPLATE_NAME_KEY]
            .into_iter()
            .filter_map(|key| self.data.get(key).and_then(Value::as_str))
            .any(|value| value.to_lowercase().contains(query_lower))
    }
}

/// Id for a template named `name` saved at `now`.
///
/// Spaces become underscores and the name is lowercased before the timestamp is appended.
pub fn template_id(name: &str, now: DateTime<Local>) -> String {
    format!(
        "{}_{}",
        name.replace(' ', "_").to_lowercase(),
        file_timestamp(now)
    )
}

#[derive(Debug, Clone)]
pub struct TemplateService {
    files: FilesService,
}

impl TemplateService {
    pub fn new(cfg: Arc<CoreConfig>) -> FormResult<Self> {
        Ok(Self {
            files: FilesService::new(&cfg.templates_dir())?,
        })
    }

    /// Stores `payload` as a new template.
    ///
    /// A missing or blank `template_name` becomes `template_<timestamp>`.
    pub fn save(&self, mut payload: Map<String, Value>, now: DateTime<Local>) -> FormResult<TemplateRecord> {
        let name = payload
            .get(TEMPLATE_NAME_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| format!("template_{}", file_timestamp(now)));
        let id = template_id(&name, now);

        payload.insert(TEMPLATE_NAME_KEY.into(), Value::String(name));
        payload.insert(CREATED_KEY.into(), Value::String(now.to_rfc3339()));

        let json = serde_json::to_vec_pretty(&payload).map_err(FormError::Serialization)?;
        self.files.write(&format!("{id}.{TEMPLATE_EXTENSION}"), &json)?;

        tracing::info!("saved template {}", id);
        Ok(TemplateRecord::from_stored(id, payload))
    }

    fn load(&self, file_name: &str) -> FormResult<TemplateRecord> {
        let bytes = self.files.read(file_name)?;
        let data: Map<String, Value> =
            serde_json::from_slice(&bytes).map_err(FormError::Deserialization)?;
        let id = file_name
            .strip_suffix(&format!(".{TEMPLATE_EXTENSION}"))
            .unwrap_or(file_name)
            .to_owned();
        Ok(TemplateRecord::from_stored(id, data))
    }

    /// All readable templates, sorted by id. Unreadable files are skipped with a warning.
    pub fn list(&self) -> FormResult<Vec<TemplateRecord>> {
        let mut out = Vec::new();
        for meta in self.files.list(Some(TEMPLATE_EXTENSION))? {
            match self.load(meta.file_name.as_str()) {
                Ok(record) => out.push(record),
                Err(e) => tracing::warn!("skipping template {}: {}", meta.file_name, e),
            }
        }
        Ok(out)
    }

    /// Deletes the template with exactly this id.
    pub fn delete(&self, id: &str) -> FormResult<()> {
        if self.files.remove(&format!("{id}.{TEMPLATE_EXTENSION}"))? {
            tracing::info!("deleted template {}", id);
            Ok(())
        } else {
            Err(FormError::NotFound(format!("template {id}")))
        }
    }

    /// Templates whose patient name, personal id or template name contains `query`.
    pub fn search(&self, query: &str) -> FormResult<Vec<TemplateRecord>> {
        let query = query.to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|t| t.matches(&query))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::tests::{at, test_config};
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn id_lowercases_and_joins_words() {
        assert_eq!(
            template_id("Pneumonia Discharge", at(9, 30, 0)),
            "pneumonia_discharge_20240305_093000"
        );
    }

    #[test]
    fn save_then_list_round_trips_fields() {
        let (_dir, cfg) = test_config();
        let templates = TemplateService::new(cfg).unwrap();
        let body = payload(json!({
            "template_name": "Pneumonia Discharge",
            "document_type": "form_100",
            "patient_name": "Nino Beridze",
            "admission_temp": 38.2
        }));

        let saved = templates.save(body, at(9, 30, 0)).unwrap();
        let listed = templates.list().unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], saved);
        assert_eq!(listed[0].name, "Pneumonia Discharge");
        assert_eq!(listed[0].document_type, "form_100");
        assert_eq!(listed[0].data["patient_name"], "Nino Beridze");
        assert_eq!(listed[0].data["admission_temp"], json!(38.2));
        assert!(listed[0].created.starts_with("2024-03-05T09:30:00"));
    }

    #[test]
    fn unnamed_template_gets_generated_name() {
        let (_dir, cfg) = test_config();
        let templates = TemplateService::new(cfg).unwrap();

        let saved = templates.save(Map::new(), at(12, 0, 0)).unwrap();
        assert_eq!(saved.name, "template_20240305_120000");
        assert_eq!(saved.id, "template_20240305_120000_20240305_120000");
        assert_eq!(saved.document_type, "unknown");
    }

    #[test]
    fn delete_requires_exact_id() {
        let (_dir, cfg) = test_config();
        let templates = TemplateService::new(cfg).unwrap();
        let saved = templates
            .save(payload(json!({"template_name": "flu"})), at(9, 0, 0))
            .unwrap();

        assert!(matches!(templates.delete("flu"), Err(FormError::NotFound(_))));
        templates.delete(&saved.id).unwrap();
        assert!(templates.list().unwrap().is_empty());
        assert!(matches!(templates.delete(&saved.id), Err(FormError::NotFound(_))));
    }

    #[test]
    fn path_like_names_are_rejected() {
        let (_dir, cfg) = test_config();
        let templates = TemplateService::new(cfg).unwrap();

        let result = templates.save(payload(json!({"template_name": "../evil"})), at(9, 0, 0));
        assert!(matches!(result, Err(FormError::InvalidInput(_))));
        assert!(matches!(templates.delete("../x"), Err(FormError::InvalidInput(_))));
    }

    #[test]
    fn search_matches_patient_id_and_name_case_insensitively() {
        let (_dir, cfg) = test_config();
        let templates = TemplateService::new(cfg.clone()).unwrap();
        templates
            .save(
                payload(json!({"template_name": "Flu", "patient_name": "Nino Beridze", "personal_id": "01234567890"})),
                at(9, 0, 0),
            )
            .unwrap();
        templates
            .save(payload(json!({"template_name": "Other"})), at(9, 0, 1))
            .unwrap();
        std::fs::write(cfg.templates_dir().join("broken.json"), b"{not json").unwrap();

        assert_eq!(templates.search("BERIDZE").unwrap().len(), 1);
        assert_eq!(templates.search("0123").unwrap().len(), 1);
        assert_eq!(templates.search("other").unwrap().len(), 1);
        assert!(templates.search("zzz").unwrap().is_empty());
    }
}

//! # MedForm Core
//!
//! Core logic for the MedForm document generator.
//!
//! This crate contains the pure document pipeline and the file-system stores:
//! - [`record`]: the typed field record posted by the form, and layout selection
//! - [`mapper`]: record → format-agnostic [`model::Document`] for each layout
//! - [`docx`]: deterministic WordprocessingML serialisation
//! - [`convert`]: best-effort DOCX → PDF conversion with typed fallbacks
//! - [`repositories`]: generated documents, saved templates, signature images, search
//!
//! **No API concerns**: HTTP routing, DTOs and the OpenAPI document belong in `api-rest`
//! and `api-shared`.

pub mod config;
pub mod constants;
pub mod convert;
pub mod docx;
pub mod error;
pub mod image;
pub mod mapper;
pub mod model;
pub mod record;
pub mod repositories;

pub use config::{convert_timeout_from_env_value, flag_from_env_value, CoreConfig};
pub use convert::{AttemptOutcome, ConversionPipeline, ConversionReport, ConversionState, ConverterStatus};
pub use error::{FormError, FormResult};
pub use mapper::map_record;
pub use record::{FieldRecord, FontVariant, Layout};
pub use repositories::documents::{DocumentFile, DocumentService, PrintedDocument, SavedDocument};
pub use repositories::search::{search, SearchHit};
pub use repositories::signatures::{SignatureRole, SignatureService, StoredSignature};
pub use repositories::templates::{TemplateRecord, TemplateService};

//! Storage services.
//!
//! Each service owns one directory under the data directory resolved in [`CoreConfig`]:
//! generated documents, saved templates and signature images. Searching spans the first
//! two.
//!
//! [`CoreConfig`]: crate::config::CoreConfig

pub mod documents;
pub mod search;
pub mod signatures;
pub mod templates;

use crate::constants::FILE_TIMESTAMP_FORMAT;
use chrono::{DateTime, Local};

/// `YYYYmmdd_HHMMSS` stamp used in generated file names.
pub(crate) fn file_timestamp(now: DateTime<Local>) -> String {
    now.format(FILE_TIMESTAMP_FORMAT).to_string()
}

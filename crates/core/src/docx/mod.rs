//! # DOCX writer
//!
//! Serialises a [`Document`] into a WordprocessingML package. Output depends only on the
//! model, the title and the injected creation time: zip entries are written in a fixed
//! order with a fixed modification time, so identical inputs give identical bytes.

mod body;
mod parts;
mod xml;

use crate::error::{FormError, FormResult};
use crate::model::Document;
use body::BodyWriter;
use chrono::{DateTime, Utc};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Serialises `doc` to DOCX bytes.
///
/// `title` is recorded in the core properties; `created` is used for both the created
/// and modified timestamps.
pub fn write_docx(doc: &Document, title: &str, created: DateTime<Utc>) -> FormResult<Vec<u8>> {
    let (document_xml, media) = BodyWriter::render(doc);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    let mut entry = |name: &str, bytes: &[u8]| -> FormResult<()> {
        zip.start_file(name, options)?;
        zip.write_all(bytes).map_err(FormError::DocxWrite)
    };

    entry("[Content_Types].xml", parts::content_types().as_bytes())?;
    entry("_rels/.rels", parts::package_rels().as_bytes())?;
    entry(
        "docProps/core.xml",
        parts::core_properties(title, created).as_bytes(),
    )?;
    entry("docProps/app.xml", parts::app_properties().as_bytes())?;
    entry("word/document.xml", document_xml.as_bytes())?;
    entry("word/styles.xml", parts::styles(&doc.base_font).as_bytes())?;
    entry("word/numbering.xml", parts::numbering().as_bytes())?;
    entry(
        "word/_rels/document.xml.rels",
        parts::document_rels(&media).as_bytes(),
    )?;
    for m in &media {
        entry(&format!("word/media/{}", m.file_name), m.bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

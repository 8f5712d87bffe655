//! Inline image payloads.
//!
//! The front end sends signatures and stamps as `data:image/<type>;base64,<payload>`
//! strings. [`decode_data_uri`] turns such a string into raw bytes plus the format and
//! pixel size the DOCX writer needs. Mappers call [`slot_image`], which never fails: any
//! problem is logged and the caller renders its placeholder instead.

use base64::Engine as _;
use std::io::Cursor;

/// Prefix every accepted payload starts with.
pub const DATA_URI_PREFIX: &str = "data:image";

/// Raster formats that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl RasterFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpeg",
            RasterFormat::Gif => "gif",
            RasterFormat::Bmp => "bmp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
            RasterFormat::Gif => "image/gif",
            RasterFormat::Bmp => "image/bmp",
        }
    }

    fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(RasterFormat::Png),
            image::ImageFormat::Jpeg => Some(RasterFormat::Jpeg),
            image::ImageFormat::Gif => Some(RasterFormat::Gif),
            image::ImageFormat::Bmp => Some(RasterFormat::Bmp),
            _ => None,
        }
    }
}

/// A decoded, embeddable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: RasterFormat,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ImageDecodeError {
    #[error("payload is empty")]
    Empty,
    #[error("payload is not an image data URI")]
    NotDataUri,
    #[error("data URI has no comma-separated payload")]
    MissingPayload,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unrecognised image format")]
    UnknownFormat,
    #[error("could not read image dimensions: {0}")]
    Dimensions(#[from] image::ImageError),
}

/// Decodes a `data:image...,<base64>` payload.
///
/// Whitespace inside the base64 text (line-wrapped payloads) is ignored.
pub fn decode_data_uri(payload: &str) -> Result<DecodedImage, ImageDecodeError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(ImageDecodeError::Empty);
    }
    if !payload.starts_with(DATA_URI_PREFIX) {
        return Err(ImageDecodeError::NotDataUri);
    }

    let (_, data) = payload
        .split_once(',')
        .ok_or(ImageDecodeError::MissingPayload)?;
    let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;

    let format = image::guess_format(&bytes)
        .ok()
        .and_then(RasterFormat::from_image_format)
        .ok_or(ImageDecodeError::UnknownFormat)?;

    let (width_px, height_px) = image::io::Reader::new(Cursor::new(&bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?
        .into_dimensions()?;

    Ok(DecodedImage {
        bytes,
        format,
        width_px,
        height_px,
    })
}

/// Decodes the payload for a named slot, or returns `None` so the caller renders its
/// placeholder.
///
/// An absent payload is silent; a present but unusable one is logged as a warning.
pub fn slot_image(payload: &str, slot: &str) -> Option<DecodedImage> {
    match decode_data_uri(payload) {
        Ok(image) => Some(image),
        Err(ImageDecodeError::Empty) => None,
        Err(e) => {
            tracing::warn!("{} image ignored: {}", slot, e);
            None
        }
    }
}

/// Encodes raw image bytes as a data URI with the given extension as subtype.
pub fn encode_data_uri(extension: &str, bytes: &[u8]) -> String {
    format!(
        "data:image/{};base64,{}",
        extension,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A valid 1×1 transparent PNG.
    pub(crate) const ONE_PIXEL_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    pub(crate) fn png_data_uri() -> String {
        format!("data:image/png;base64,{ONE_PIXEL_PNG}")
    }

    #[test]
    fn decodes_png_data_uri() {
        let image = decode_data_uri(&png_data_uri()).expect("valid PNG should decode");

        assert_eq!(image.format, RasterFormat::Png);
        assert_eq!((image.width_px, image.height_px), (1, 1));
        assert!(image.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn tolerates_wrapped_base64() {
        let (head, tail) = ONE_PIXEL_PNG.split_at(20);
        let wrapped = format!("data:image/png;base64,{head}\n{tail}");
        assert!(decode_data_uri(&wrapped).is_ok());
    }

    #[test]
    fn rejects_malformed_payloads() {
        assert!(matches!(decode_data_uri(""), Err(ImageDecodeError::Empty)));
        assert!(matches!(
            decode_data_uri("iVBORw0KGgo="),
            Err(ImageDecodeError::NotDataUri)
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64"),
            Err(ImageDecodeError::MissingPayload)
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,@@not base64@@"),
            Err(ImageDecodeError::Base64(_))
        ));
        assert!(matches!(
            decode_data_uri("data:image/png;base64,aGVsbG8gd29ybGQ="),
            Err(ImageDecodeError::UnknownFormat)
        ));
    }

    #[test]
    fn slot_image_never_fails() {
        assert!(slot_image("", "stamp").is_none());
        assert!(slot_image("data:image/png;base64,!!!", "stamp").is_none());
        assert!(slot_image(&png_data_uri(), "stamp").is_some());
    }

    #[test]
    fn encode_then_decode_preserves_bytes() {
        let original = decode_data_uri(&png_data_uri()).unwrap();
        let uri = encode_data_uri("png", &original.bytes);
        assert_eq!(decode_data_uri(&uri).unwrap(), original);
    }
}

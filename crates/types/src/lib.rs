//! Validated text types shared by the MedForm crates.
//!
//! - [`NonEmptyText`] for display names and other values that must carry content.
//! - [`FileStem`] for user-chosen document names that end up on disk.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// Nothing usable remained after removing characters that are unsafe in file names
    #[error("No file-name-safe characters in {0:?}")]
    NoSafeCharacters(String),
}

/// A string type that guarantees non-empty content.
///
/// The input is trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Returns `Err(TextError::Empty)` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// A file name without extension, reduced to characters that are safe on every platform
/// the application runs on.
///
/// Letters and digits of any script are kept (form names are usually Georgian), as are
/// `_`, `-` and space. Everything else, including path separators and dots, is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileStem(String);

impl FileStem {
    /// Sanitises `input` into a file stem.
    ///
    /// # Errors
    ///
    /// Returns `TextError::NoSafeCharacters` if no safe character survives, or
    /// `TextError::Empty` if only spaces survive.
    pub fn sanitise(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        let kept: String = input
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
            .collect();

        if kept.is_empty() {
            return Err(TextError::NoSafeCharacters(input.to_owned()));
        }
        if kept.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(kept))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `<stem>.<extension>`.
    pub fn with_extension(&self, extension: &str) -> String {
        format!("{}.{}", self.0, extension)
    }
}

impl std::fmt::Display for FileStem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileStem {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_rejects_blank() {
        assert_eq!(NonEmptyText::new("  Admission  ").unwrap().as_str(), "Admission");
        assert_eq!(NonEmptyText::new(" \t\n"), Err(TextError::Empty));
    }

    #[test]
    fn non_empty_text_deserialize_rejects_blank() {
        let ok: NonEmptyText = serde_json::from_str("\"Form 100\"").unwrap();
        assert_eq!(ok.as_str(), "Form 100");
        assert!(serde_json::from_str::<NonEmptyText>("\"  \"").is_err());
    }

    #[test]
    fn file_stem_keeps_georgian_letters_and_separators() {
        let stem = FileStem::sanitise("ცნობა_ნინო-2024 v1").unwrap();
        assert_eq!(stem.as_str(), "ცნობა_ნინო-2024 v1");
    }

    #[test]
    fn file_stem_strips_path_traversal() {
        let stem = FileStem::sanitise("../../etc/passwd").unwrap();
        assert_eq!(stem.as_str(), "etcpasswd");
        assert_eq!(stem.with_extension("docx"), "etcpasswd.docx");
    }

    #[test]
    fn file_stem_rejects_input_without_safe_characters() {
        assert!(matches!(
            FileStem::sanitise("../..//"),
            Err(TextError::NoSafeCharacters(_))
        ));
        assert_eq!(FileStem::sanitise("   "), Err(TextError::Empty));
    }
}

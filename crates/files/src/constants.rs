/// Substrings that are never allowed in a stored file name.
///
/// Separators and parent references would let a caller leave the storage directory;
/// `:` selects alternate data streams or drives on Windows.
pub const FORBIDDEN_NAME_PATTERNS: &[&str] = &["/", "\\", "..", ":", "\0"];

/// Upper bound on file name length, in bytes.
pub(crate) const MAX_FILE_NAME_LEN: usize = 255;

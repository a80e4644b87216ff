//! Runtime value types: canonical stored form, uploaded artifacts, and
//! display cells.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// The normalized form of a value after it passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalValue {
    /// Textual encoding; a `data:` URI for artifact kinds
    pub value: String,

    /// Original filename, only ever set for artifact kinds
    pub artifact_name: Option<String>,
}

impl CanonicalValue {
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            artifact_name: None,
        }
    }
}

/// A binary payload uploaded for an image or file attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPayload {
    /// Original filename as supplied by the uploader
    pub name: String,
    pub bytes: Vec<u8>,
    /// MIME type declared by the uploader; guessed from `name` when absent
    pub mime: Option<String>,
}

impl ArtifactPayload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// A rendered grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    Text(String),
    /// Nothing to show
    Placeholder,
    /// Encoded artifact with no captured filename
    UnnamedArtifact,
}

impl DisplayValue {
    pub const DEFAULT_PLACEHOLDER: &'static str = "-";
    pub const DEFAULT_UNNAMED_ARTIFACT: &'static str = "Unnamed file";

    pub fn text_or_placeholder(value: &str) -> Self {
        if value.trim().is_empty() {
            DisplayValue::Placeholder
        } else {
            DisplayValue::Text(value.to_string())
        }
    }

    /// Render with caller-supplied labels for the non-text cases.
    pub fn render(&self, placeholder: &str, unnamed_artifact: &str) -> String {
        match self {
            DisplayValue::Text(text) => text.clone(),
            DisplayValue::Placeholder => placeholder.to_string(),
            DisplayValue::UnnamedArtifact => unnamed_artifact.to_string(),
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Self::DEFAULT_PLACEHOLDER, Self::DEFAULT_UNNAMED_ARTIFACT))
    }
}

/// Encode bytes as `data:<mime>;base64,<payload>`.
pub(crate) fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Whether a stored value looks like inline-encoded binary content.
pub fn looks_like_data_uri(value: &str) -> bool {
    value.starts_with("data:")
}

/// Split a base64 data URI into its MIME type and decoded bytes.
///
/// Returns `None` for anything that is not a well-formed base64 data URI.
pub fn decode_data_uri(value: &str) -> Option<(String, Vec<u8>)> {
    let rest = value.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime.to_string(), bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_encodes_and_decodes() {
        let uri = encode_data_uri("image/png", &[0, 1, 2, 250]);
        assert!(uri.starts_with("data:image/png;base64,"));

        let (mime, bytes) = decode_data_uri(&uri).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0, 1, 2, 250]);
    }

    #[test]
    fn decode_rejects_malformed_uris() {
        assert!(decode_data_uri("hello").is_none());
        assert!(decode_data_uri("data:text/plain,hello").is_none());
        assert!(decode_data_uri("data:text/plain;base64,@@@").is_none());
    }

    #[test]
    fn display_uses_default_labels() {
        assert_eq!(DisplayValue::Text("x".into()).to_string(), "x");
        assert_eq!(DisplayValue::Placeholder.to_string(), "-");
        assert_eq!(DisplayValue::UnnamedArtifact.to_string(), "Unnamed file");
    }

    #[test]
    fn render_uses_custom_labels() {
        assert_eq!(DisplayValue::Placeholder.render("n/a", "?"), "n/a");
        assert_eq!(DisplayValue::UnnamedArtifact.render("n/a", "?"), "?");
    }

    #[test]
    fn whitespace_only_is_placeholder() {
        assert_eq!(
            DisplayValue::text_or_placeholder("  "),
            DisplayValue::Placeholder
        );
    }
}

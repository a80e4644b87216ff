//! Type-directed validation of raw attribute values.
//!
//! [`validate`] is pure: it either returns the canonical form to persist or a
//! human-readable rejection, never a partially normalized value.

use chrono::NaiveDate;
use mime_guess::mime;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use super::spec::AttributeKind;
use super::value::{encode_data_uri, ArtifactPayload, CanonicalValue};

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

/// Reason a value was rejected for its kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value must be a valid number")]
    NotANumber,

    #[error("value must be a valid date (YYYY-MM-DD)")]
    NotADate,

    #[error("value must be a valid email address")]
    NotAnEmail,

    #[error("value must be a valid absolute URL")]
    NotAUrl,

    #[error("value must be boolean (true/false, 1/0)")]
    NotABoolean,

    #[error("{kind} values require an uploaded file")]
    MissingArtifact { kind: AttributeKind },

    #[error("'{name}' is not an image (detected {mime})")]
    NotAnImage { name: String, mime: String },
}

/// Validate `raw` against `kind`, producing the canonical stored form.
///
/// Artifact kinds ignore `raw` and require `artifact`; every other kind
/// ignores `artifact`.
pub fn validate(
    kind: AttributeKind,
    raw: &str,
    artifact: Option<&ArtifactPayload>,
) -> Result<CanonicalValue, ValidationError> {
    match kind {
        AttributeKind::Text => Ok(CanonicalValue::plain(raw)),
        AttributeKind::Number => validate_number(raw),
        AttributeKind::Date => validate_date(raw),
        AttributeKind::Email => validate_email(raw),
        AttributeKind::Url => validate_url(raw),
        AttributeKind::Boolean => validate_boolean(raw),
        AttributeKind::Image | AttributeKind::File => match artifact {
            Some(payload) => encode_artifact(kind, payload),
            None => Err(ValidationError::MissingArtifact { kind }),
        },
    }
}

fn validate_number(raw: &str) -> Result<CanonicalValue, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NotANumber);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(CanonicalValue::plain(raw)),
        _ => Err(ValidationError::NotANumber),
    }
}

fn validate_date(raw: &str) -> Result<CanonicalValue, ValidationError> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(ValidationError::NotADate);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| CanonicalValue::plain(raw))
        .map_err(|_| ValidationError::NotADate)
}

fn validate_email(raw: &str) -> Result<CanonicalValue, ValidationError> {
    if EMAIL_SHAPE.is_match(raw) {
        Ok(CanonicalValue::plain(raw))
    } else {
        Err(ValidationError::NotAnEmail)
    }
}

fn validate_url(raw: &str) -> Result<CanonicalValue, ValidationError> {
    Url::parse(raw)
        .map(|_| CanonicalValue::plain(raw))
        .map_err(|_| ValidationError::NotAUrl)
}

fn validate_boolean(raw: &str) -> Result<CanonicalValue, ValidationError> {
    match raw {
        "true" | "1" => Ok(CanonicalValue::plain("true")),
        "false" | "0" => Ok(CanonicalValue::plain("false")),
        _ => Err(ValidationError::NotABoolean),
    }
}

fn encode_artifact(
    kind: AttributeKind,
    payload: &ArtifactPayload,
) -> Result<CanonicalValue, ValidationError> {
    let detected = payload
        .mime
        .as_deref()
        .and_then(|declared| declared.trim().parse::<mime::Mime>().ok())
        .unwrap_or_else(|| mime_guess::from_path(&payload.name).first_or_octet_stream());
    if kind == AttributeKind::Image && detected.type_() != mime::IMAGE {
        return Err(ValidationError::NotAnImage {
            name: payload.name.clone(),
            mime: detected.essence_str().to_string(),
        });
    }

    let name = payload.name.trim();
    Ok(CanonicalValue {
        value: encode_data_uri(detected.essence_str(), &payload.bytes),
        artifact_name: (!name.is_empty()).then(|| name.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::decode_data_uri;
    use proptest::prelude::*;

    #[test]
    fn text_accepts_anything() {
        assert_eq!(
            validate(AttributeKind::Text, "", None).unwrap().value,
            ""
        );
        assert_eq!(
            validate(AttributeKind::Text, "  hola ", None).unwrap().value,
            "  hola "
        );
    }

    #[test]
    fn number_keeps_textual_form() {
        assert_eq!(
            validate(AttributeKind::Number, "1e3", None).unwrap().value,
            "1e3"
        );
        assert_eq!(
            validate(AttributeKind::Number, "-4.50", None).unwrap().value,
            "-4.50"
        );
    }

    #[test]
    fn number_rejects_non_finite_and_garbage() {
        for raw in ["", "  ", "abc", "inf", "NaN", "1,5", "12abc"] {
            assert_eq!(
                validate(AttributeKind::Number, raw, None),
                Err(ValidationError::NotANumber),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn date_requires_real_calendar_day() {
        assert!(validate(AttributeKind::Date, "2024-02-29", None).is_ok());
        assert_eq!(
            validate(AttributeKind::Date, "2024-02-30", None),
            Err(ValidationError::NotADate)
        );
        assert_eq!(
            validate(AttributeKind::Date, "2023-02-29", None),
            Err(ValidationError::NotADate)
        );
    }

    #[test]
    fn date_requires_exact_shape() {
        for raw in ["2024-2-01", "24-02-01", "2024/02/01", "2024-02-01T00:00", ""] {
            assert_eq!(
                validate(AttributeKind::Date, raw, None),
                Err(ValidationError::NotADate),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn email_uses_simple_shape() {
        assert!(validate(AttributeKind::Email, "ana@example.com", None).is_ok());
        assert!(validate(AttributeKind::Email, "a.b+c@sub.example.org", None).is_ok());
        for raw in ["ana", "ana@example", "@example.com", "ana @example.com"] {
            assert_eq!(
                validate(AttributeKind::Email, raw, None),
                Err(ValidationError::NotAnEmail),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn url_must_be_absolute() {
        assert!(validate(AttributeKind::Url, "https://example.com/a?b=c", None).is_ok());
        assert!(validate(AttributeKind::Url, "mailto:ana@example.com", None).is_ok());
        assert_eq!(
            validate(AttributeKind::Url, "/relative/path", None),
            Err(ValidationError::NotAUrl)
        );
        assert_eq!(
            validate(AttributeKind::Url, "example.com", None),
            Err(ValidationError::NotAUrl)
        );
    }

    #[test]
    fn boolean_normalizes_tokens() {
        assert_eq!(validate(AttributeKind::Boolean, "1", None).unwrap().value, "true");
        assert_eq!(validate(AttributeKind::Boolean, "0", None).unwrap().value, "false");
        assert_eq!(
            validate(AttributeKind::Boolean, "true", None).unwrap().value,
            "true"
        );
        assert_eq!(
            validate(AttributeKind::Boolean, "yes", None),
            Err(ValidationError::NotABoolean)
        );
        assert_eq!(
            validate(AttributeKind::Boolean, "TRUE", None),
            Err(ValidationError::NotABoolean)
        );
    }

    #[test]
    fn image_is_encoded_with_filename() {
        let payload = ArtifactPayload::new("a.png", vec![7u8; 10]);
        let canonical = validate(AttributeKind::Image, "ignored", Some(&payload)).unwrap();

        assert!(canonical.value.starts_with("data:image/png;base64,"));
        assert_eq!(canonical.artifact_name.as_deref(), Some("a.png"));
        let (_, bytes) = decode_data_uri(&canonical.value).unwrap();
        assert_eq!(bytes, vec![7u8; 10]);
    }

    #[test]
    fn image_rejects_non_image_mime() {
        let payload = ArtifactPayload::new("notes.pdf", b"%PDF".to_vec());
        match validate(AttributeKind::Image, "", Some(&payload)) {
            Err(ValidationError::NotAnImage { name, mime }) => {
                assert_eq!(name, "notes.pdf");
                assert_eq!(mime, "application/pdf");
            }
            other => panic!("Expected NotAnImage, got {:?}", other),
        }
    }

    #[test]
    fn declared_mime_wins_over_filename() {
        let payload = ArtifactPayload::new("scan", vec![1, 2]).with_mime("image/jpeg");
        let canonical = validate(AttributeKind::Image, "", Some(&payload)).unwrap();
        assert!(canonical.value.starts_with("data:image/jpeg;base64,"));

        let payload = ArtifactPayload::new("photo.png", vec![1]).with_mime("application/pdf");
        assert!(matches!(
            validate(AttributeKind::Image, "", Some(&payload)),
            Err(ValidationError::NotAnImage { .. })
        ));
    }

    #[test]
    fn file_accepts_any_type() {
        let payload = ArtifactPayload::new("blob", vec![1, 2, 3]);
        let canonical = validate(AttributeKind::File, "", Some(&payload)).unwrap();
        assert!(canonical
            .value
            .starts_with("data:application/octet-stream;base64,"));
        assert_eq!(canonical.artifact_name.as_deref(), Some("blob"));
    }

    #[test]
    fn artifact_without_payload_is_rejected() {
        assert_eq!(
            validate(AttributeKind::File, "data:text/plain;base64,aGk=", None),
            Err(ValidationError::MissingArtifact {
                kind: AttributeKind::File
            })
        );
    }

    #[test]
    fn blank_artifact_name_is_not_captured() {
        let payload = ArtifactPayload::new("  ", vec![1]);
        let canonical = validate(AttributeKind::File, "", Some(&payload)).unwrap();
        assert_eq!(canonical.artifact_name, None);
    }

    #[test]
    fn payload_is_ignored_for_scalar_kinds() {
        let payload = ArtifactPayload::new("a.png", vec![1]);
        let canonical = validate(AttributeKind::Text, "hi", Some(&payload)).unwrap();
        assert_eq!(canonical, CanonicalValue::plain("hi"));
    }

    #[test]
    fn rejection_messages_are_readable() {
        assert_eq!(
            ValidationError::NotABoolean.to_string(),
            "value must be boolean (true/false, 1/0)"
        );
        assert_eq!(
            ValidationError::MissingArtifact {
                kind: AttributeKind::Image
            }
            .to_string(),
            "image values require an uploaded file"
        );
    }

    fn scalar_kind() -> impl Strategy<Value = AttributeKind> {
        prop_oneof![
            Just(AttributeKind::Text),
            Just(AttributeKind::Number),
            Just(AttributeKind::Date),
            Just(AttributeKind::Email),
            Just(AttributeKind::Url),
            Just(AttributeKind::Boolean),
        ]
    }

    fn candidate() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            any::<f64>().prop_map(|n| n.to_string()),
            (1900i32..2100, 1u32..13, 1u32..32)
                .prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}")),
            "[a-z]{1,8}@[a-z]{1,8}\\.[a-z]{2,3}",
            "https://[a-z]{1,10}\\.com/[a-z]{0,5}",
            prop_oneof![Just("true"), Just("false"), Just("1"), Just("0")]
                .prop_map(str::to_string),
        ]
    }

    proptest! {
        #[test]
        fn canonicalization_is_idempotent(kind in scalar_kind(), raw in candidate()) {
            if let Ok(first) = validate(kind, &raw, None) {
                let second = validate(kind, &first.value, None);
                prop_assert_eq!(second, Ok(first));
            }
        }
    }
}

//! # Attribute System
//!
//! Runtime-defined attributes attached to owners. Operators declare a field
//! with a name and a kind; values for that field are validated against the
//! kind, stored in a canonical textual form, and later filtered and rendered
//! alongside the fixed owner fields.
//!
//! ## Attribute Kinds
//!
//! | Kind | Accepts | Canonical form | Search |
//! |------|---------|----------------|--------|
//! | `text` | anything | as-is | substring |
//! | `number` | finite number | as-is | inclusive range |
//! | `date` | `YYYY-MM-DD`, real calendar date | as-is | inclusive range |
//! | `email` | `local@domain.tld` shape | as-is | substring |
//! | `url` | absolute URL | as-is | substring |
//! | `boolean` | `true`, `false`, `1`, `0` | `true` / `false` | status label |
//! | `image` | uploaded `image/*` file | data URI + filename | filename |
//! | `file` | uploaded file | data URI + filename | filename |
//!
//! [`AttributeKind`] is a closed enum: validation, display formatting and
//! search-mode selection all match on it exhaustively, so adding a kind means
//! touching every one of those places.
//!
//! ## Usage
//!
//! ```ignore
//! let canonical = AttributeKind::Boolean.validate("1", None)?;
//! assert_eq!(canonical.value, "true");
//!
//! let input = SearchInput::number_range(Some(10.0), Some(20.0));
//! let kept = filter_owners(&catalog(&definitions), "dynamic_3", &input, &owners, &values);
//! ```

mod filter;
mod spec;
mod validate;
mod value;

pub use filter::{absent_value_passes, filter_owners, status_label, Predicate, SearchInput};
pub use spec::{kind_names, AttributeKind, KindSpec, SearchMode, KINDS};
pub use validate::{validate, ValidationError};
pub use value::{decode_data_uri, looks_like_data_uri, ArtifactPayload, CanonicalValue, DisplayValue};

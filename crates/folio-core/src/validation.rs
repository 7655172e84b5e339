//! Input validation for post writes.
//!
//! Content validation is deliberately shallow: it only checks that content is
//! a list of mappings that each carry a `type` key. Unknown types and missing
//! list items are accepted and left to the renderer.

use serde_json::Value;

use crate::domain::ContentBlock;
use crate::error::ValidationErrors;
use crate::slug::{MAX_SLUG_LEN, is_valid_slug};

pub const MAX_TITLE_LEN: usize = 200;

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_LIST: &str = "Content must be a list of content blocks";
const NOT_A_MAPPING: &str = "Each content block must be a dictionary";
const MISSING_TYPE: &str = "Each content block must have a 'type' field";

/// A writable field as received: absent, explicitly `null`, or set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Input<T> {
    #[default]
    Missing,
    Null,
    Set(T),
}

impl<T> Input<T> {
    /// Map a double option where the outer layer is presence and the inner
    /// one is nullness.
    pub fn from_nullable(value: Option<Option<T>>) -> Self {
        match value {
            None => Input::Missing,
            Some(None) => Input::Null,
            Some(Some(value)) => Input::Set(value),
        }
    }

    pub fn as_ref(&self) -> Input<&T> {
        match self {
            Input::Missing => Input::Missing,
            Input::Null => Input::Null,
            Input::Set(value) => Input::Set(value),
        }
    }

    pub fn as_deref(&self) -> Input<&T::Target>
    where
        T: std::ops::Deref,
    {
        match self {
            Input::Missing => Input::Missing,
            Input::Null => Input::Null,
            Input::Set(value) => Input::Set(value.deref()),
        }
    }
}

impl<T> From<Option<T>> for Input<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Input::Missing, Input::Set)
    }
}

/// Check a decoded `content` value and convert it into blocks.
pub fn validate_content(value: &Value) -> Result<Vec<ContentBlock>, String> {
    let Value::Array(items) = value else {
        return Err(NOT_A_LIST.to_string());
    };

    items
        .iter()
        .map(|item| {
            let Value::Object(map) = item else {
                return Err(NOT_A_MAPPING.to_string());
            };
            if !map.contains_key("type") {
                return Err(MISSING_TYPE.to_string());
            }
            Ok(ContentBlock::from(map.clone()))
        })
        .collect()
}

/// Trim a title and check it is non-blank and within length.
pub fn validate_title(title: &str) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(BLANK.to_string());
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(format!(
            "Ensure this field has no more than {MAX_TITLE_LEN} characters."
        ));
    }
    Ok(title.to_string())
}

/// Check an explicitly supplied slug.
pub fn validate_slug(slug: &str) -> Result<String, String> {
    let slug = slug.trim();
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(format!(
            "Ensure this field has no more than {MAX_SLUG_LEN} characters."
        ));
    }
    if !is_valid_slug(slug) {
        return Err(
            "Enter a valid \"slug\" consisting of letters, numbers, underscores or hyphens."
                .to_string(),
        );
    }
    Ok(slug.to_string())
}

/// Run `check` on a field, recording failures under `name`.
///
/// Missing values are reported as required when `required` is set. An
/// explicit `null` is always rejected.
pub(crate) fn field<T, U>(
    errors: &mut ValidationErrors,
    name: &str,
    value: Input<&T>,
    required: bool,
    check: impl FnOnce(&T) -> Result<U, String>,
) -> Option<U>
where
    T: ?Sized,
{
    match value {
        Input::Set(value) => match check(value) {
            Ok(valid) => Some(valid),
            Err(message) => {
                errors.add(name, message);
                None
            }
        },
        Input::Null => {
            errors.add(name, NOT_NULL);
            None
        }
        Input::Missing => {
            if required {
                errors.add(name, REQUIRED);
            }
            None
        }
    }
}

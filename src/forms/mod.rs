//! Request bodies accepted by the API and the HTML pages.
//!
//! Each form is deserialised from JSON (or multipart), checked with
//! `validator` and converted into the matching domain payload. Required text
//! fields default to empty so a missing field and a blank one produce the same
//! validation error.

use std::str::FromStr;

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Email, PhoneNumber, TypeConstraintError, non_blank};

pub mod agency;
pub mod ai;
pub mod businesses;
pub mod chat;
pub mod clients;
pub mod customers;
pub mod employees;
pub mod leads;
pub mod memos;
pub mod notifications;
pub mod seo_articles;
pub mod tasks;
pub mod users;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("入力内容に誤りがあります: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("入力内容に誤りがあります: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("CSVを読み込めませんでした: {0}")]
    Csv(String),

    #[error("{0}")]
    Invalid(String),
}

/// Runs the derived validation rules.
pub(crate) fn validated<F: Validate>(form: F) -> Result<F, FormError> {
    form.validate()?;
    Ok(form)
}

/// Parses an optional text field, treating blank input as absent.
pub(crate) fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, TypeConstraintError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    non_blank(value).map(|raw| raw.parse()).transpose()
}

/// Parses an enum key, falling back to `default` when the field is absent.
pub(crate) fn parse_or<T>(value: Option<String>, default: T) -> Result<T, TypeConstraintError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    Ok(parse_optional(value)?.unwrap_or(default))
}

pub(crate) fn optional_id<T>(value: Option<i32>) -> Result<Option<T>, TypeConstraintError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    value.map(T::try_from).transpose()
}

pub(crate) fn optional_email(value: Option<String>) -> Result<Option<Email>, TypeConstraintError> {
    non_blank(value).map(Email::new).transpose()
}

pub(crate) fn optional_phone(
    value: Option<String>,
) -> Result<Option<PhoneNumber>, TypeConstraintError> {
    non_blank(value).map(PhoneNumber::new).transpose()
}

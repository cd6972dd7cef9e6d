//! Response envelope decoding.
//!
//! Every Admin API body is either a success payload (`{"theme": {...}}`,
//! `{"assets": [...]}`, flat shop fields) or carries an `"errors"` key. The
//! `"errors"` value comes in three shapes:
//!
//! - a string: `{"errors": "Not Found"}`
//! - a field map: `{"errors": {"name": ["can't be blank"]}}`
//! - a list of strings: `{"errors": ["first", "second"]}`
//!
//! [`Envelope`] is the decoded sum type; [`resolve`] turns it into the
//! final `Result`, in priority order: freeform message, field errors,
//! implied not-found, success.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::clients::HttpResponse;
use crate::theme::errors::{to_sentence, ErrorSet, ThemeError};
use crate::theme::resources::{Asset, Theme};

/// A decoded response body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope<T> {
    /// No error was reported; the payload may still be empty.
    Success(T),
    /// The API reported field-level validation errors.
    FieldErrors(ErrorSet),
    /// The API reported a freeform message.
    Message(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawErrors {
    Message(String),
    Fields(BTreeMap<String, Vec<String>>),
    List(Vec<String>),
}

#[derive(Deserialize)]
struct RawEnvelope<T> {
    #[serde(default)]
    errors: Option<RawErrors>,
    #[serde(flatten)]
    payload: T,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes a response body. An empty body is read as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the body is not a JSON object of the
    /// expected shape.
    pub fn decode(body: &str) -> Result<Self, serde_json::Error> {
        let body = if body.trim().is_empty() { "{}" } else { body };
        let raw: RawEnvelope<T> = serde_json::from_str(body)?;

        Ok(match raw.errors {
            Some(RawErrors::Message(message)) => Self::Message(message),
            Some(RawErrors::List(messages)) => Self::Message(to_sentence(&messages)),
            Some(RawErrors::Fields(fields)) => Self::FieldErrors(ErrorSet::from(fields)),
            None => Self::Success(raw.payload),
        })
    }
}

/// Resolves a response into a payload or a [`ThemeError`].
///
/// `not_found` is returned when the response is a 404 whose payload decoded
/// to its empty value and no explicit error was reported.
///
/// # Errors
///
/// - [`ThemeError::Parse`] if the body is not a valid envelope
/// - [`ThemeError::Api`] for a freeform `"errors"` value
/// - [`ThemeError::Validation`] for a field map
/// - `not_found` for an empty 404
pub fn resolve<T>(response: &HttpResponse, not_found: ThemeError) -> Result<T, ThemeError>
where
    T: DeserializeOwned + Default + PartialEq,
{
    let code = response.code;
    match Envelope::<T>::decode(&response.body)? {
        Envelope::Message(message) => Err(ThemeError::Api { code, message }),
        Envelope::FieldErrors(errors) => Err(ThemeError::Validation { code, errors }),
        Envelope::Success(payload) if code == 404 && payload == T::default() => Err(not_found),
        Envelope::Success(payload) => Ok(payload),
    }
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct ThemePayload {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct ThemesPayload {
    #[serde(default)]
    pub themes: Vec<Theme>,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct AssetPayload {
    #[serde(default)]
    pub asset: Asset,
}

#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct AssetsPayload {
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::resources::Shop;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::json(code, body)
    }

    #[test]
    fn test_decode_freeform_message() {
        let envelope = Envelope::<ThemePayload>::decode(r#"{"errors":"Not Found"}"#).unwrap();
        assert_eq!(envelope, Envelope::Message("Not Found".to_string()));
    }

    #[test]
    fn test_decode_field_errors() {
        let envelope =
            Envelope::<ThemePayload>::decode(r#"{"errors":{"src":["is empty"]}}"#).unwrap();
        match envelope {
            Envelope::FieldErrors(errors) => assert_eq!(errors.to_string(), "src is empty"),
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_list_becomes_sentence() {
        let envelope =
            Envelope::<AssetPayload>::decode(r#"{"errors":["one","two","three"]}"#).unwrap();
        assert_eq!(envelope, Envelope::Message("one, two, and three".to_string()));
    }

    #[test]
    fn test_decode_empty_body_is_empty_payload() {
        let envelope = Envelope::<AssetPayload>::decode("").unwrap();
        assert_eq!(envelope, Envelope::Success(AssetPayload::default()));
    }

    #[test]
    fn test_decode_malformed_body_fails() {
        assert!(Envelope::<ThemePayload>::decode("this is not json").is_err());
        assert!(Envelope::<ThemesPayload>::decode(r#"{"themes": 5}"#).is_err());
    }

    #[test]
    fn test_resolve_success_payload() {
        let payload: ThemePayload = resolve(
            &response(200, r#"{"theme":{"id":123,"name":"timberland","previewable":true}}"#),
            ThemeError::ThemeNotFound,
        )
        .unwrap();
        assert_eq!(payload.theme.id, Some(123));
        assert!(payload.theme.previewable);
    }

    #[test]
    fn test_resolve_message_wins_over_status() {
        let result: Result<ThemePayload, _> =
            resolve(&response(200, r#"{"errors":"Not Found"}"#), ThemeError::ThemeNotFound);
        assert!(matches!(
            result,
            Err(ThemeError::Api { code: 200, ref message }) if message == "Not Found"
        ));
    }

    #[test]
    fn test_resolve_message_wins_over_not_found() {
        let result: Result<AssetPayload, _> = resolve(
            &response(404, r#"{"errors":"Not Found"}"#),
            ThemeError::AssetNotPartOfTheme,
        );
        assert!(matches!(result, Err(ThemeError::Api { code: 404, .. })));
    }

    #[test]
    fn test_resolve_field_errors_keep_code() {
        let result: Result<ThemePayload, _> = resolve(
            &response(422, r#"{"errors":{"name":["can't be blank"]}}"#),
            ThemeError::ThemeNotFound,
        );
        match result {
            Err(error @ ThemeError::Validation { .. }) => {
                assert_eq!(error.to_string(), "name can't be blank");
                assert_eq!(error.code(), Some(422));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_empty_404_is_implied_not_found() {
        let result: Result<AssetPayload, _> =
            resolve(&response(404, ""), ThemeError::AssetNotPartOfTheme);
        assert!(matches!(result, Err(ThemeError::AssetNotPartOfTheme)));

        let result: Result<Shop, _> = resolve(&response(404, "{}"), ThemeError::ShopNotFound);
        assert!(matches!(result, Err(ThemeError::ShopNotFound)));
    }

    #[test]
    fn test_resolve_populated_404_is_success() {
        let payload: AssetPayload = resolve(
            &response(404, r#"{"asset":{"key":"assets/hello.txt"}}"#),
            ThemeError::AssetNotPartOfTheme,
        )
        .unwrap();
        assert_eq!(payload.asset.key, "assets/hello.txt");
    }

    #[test]
    fn test_resolve_empty_non_404_is_success() {
        let payload: AssetPayload =
            resolve(&response(200, ""), ThemeError::AssetNotPartOfTheme).unwrap();
        assert_eq!(payload, AssetPayload::default());
    }

    #[test]
    fn test_resolve_flat_shop() {
        let shop: Shop = resolve(&response(200, r#"{"id":123456}"#), ThemeError::ShopNotFound)
            .unwrap();
        assert_eq!(shop.id, Some(123_456));
    }

    #[test]
    fn test_resolve_malformed_body_is_parse_error() {
        let result: Result<ThemesPayload, _> =
            resolve(&response(200, "<html>"), ThemeError::ThemeNotFound);
        assert!(matches!(result, Err(ThemeError::Parse(_))));
    }
}

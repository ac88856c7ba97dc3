//! Validation and decoding of authorization callback query parameters.
//!
//! A redirect back from the authorization server carries its result in the
//! query component of the redirect URI. [`CallbackQuery`] decodes that
//! component into key/value pairs and validates them into either an
//! [`AccessTokenEnvelope`] (implicit grant) or an authorization code string
//! (authorization code grant). Nothing in the query is trusted until it has
//! passed through one of these two operations.
use iref::{Uri, uri::Query};

use crate::token::AccessTokenEnvelope;

/// Redirect query parameter carrying the token lifetime in seconds.
pub const PARAM_EXPIRES_IN: &str = "expires_in";

/// Redirect query parameter carrying the access token.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Redirect query parameter carrying the refresh token.
pub const PARAM_REFRESH_TOKEN: &str = "refresh_token";

/// Redirect query parameter carrying the granted scope string.
pub const PARAM_SCOPE: &str = "scope";

/// Redirect query parameter carrying the token type.
pub const PARAM_TOKEN_TYPE: &str = "token_type";

/// Redirect query parameter carrying the authorization code.
pub const PARAM_CODE: &str = "code";

/// Error raised when an authorization result cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationError {
	/// The redirect did not carry a well-formed authorization result: a
	/// required parameter was missing, empty, or failed to parse as its
	/// expected type.
	#[error("invalid authentication response: {0}")]
	InvalidResponse(String),
}

impl AuthenticationError {
	pub fn invalid_response(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("invalid authentication response: {msg}");
		Self::InvalidResponse(msg)
	}
}

/// The decoded query parameters of an authorization callback.
///
/// Percent-encoding and `+` escapes are resolved at construction; lookups
/// return the decoded values. Repeated keys keep their order, and lookups
/// return the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackQuery(Vec<(String, String)>);

impl CallbackQuery {
	/// Decodes the query component of a redirect URI.
	///
	/// A URI without a query component yields an empty parameter list, not
	/// an error; validation of required parameters happens in
	/// [`token_result`](Self::token_result) and
	/// [`authorization_code`](Self::authorization_code).
	pub fn from_uri(uri: &Uri) -> Result<Self, AuthenticationError> {
		Self::from_query_str(uri.query().map(Query::as_str).unwrap_or_default())
	}

	/// Decodes a raw `application/x-www-form-urlencoded` query string.
	pub fn from_query_str(query: &str) -> Result<Self, AuthenticationError> {
		serde_html_form::from_str(query)
			.map(Self)
			.map_err(AuthenticationError::invalid_response)
	}

	/// Returns the first value of the given parameter, if present.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	fn require_non_empty(&self, key: &str) -> Result<String, AuthenticationError> {
		match self.get(key) {
			Some(value) if !value.is_empty() => Ok(value.to_owned()),
			_ => Err(AuthenticationError::invalid_response(format!(
				"missing parameter `{key}`"
			))),
		}
	}

	/// Validates an implicit-grant result into an [`AccessTokenEnvelope`].
	///
	/// Fails with [`AuthenticationError::InvalidResponse`] when `expires_in`
	/// is absent or not a non-negative integer, or when `access_token`,
	/// `scope` or `token_type` is absent or empty. `refresh_token` may be
	/// absent. Fields are copied verbatim: the scope string is not expanded
	/// here but at [`AccessToken`](crate::AccessToken) construction.
	pub fn token_result(&self) -> Result<AccessTokenEnvelope, AuthenticationError> {
		let expires_in = self
			.require_non_empty(PARAM_EXPIRES_IN)?
			.parse::<u64>()
			.map_err(AuthenticationError::invalid_response)?;

		let access_token = self.require_non_empty(PARAM_ACCESS_TOKEN)?;
		let scope = self.require_non_empty(PARAM_SCOPE)?;
		let token_type = self.require_non_empty(PARAM_TOKEN_TYPE)?;
		let refresh_token = self
			.get(PARAM_REFRESH_TOKEN)
			.filter(|v| !v.is_empty())
			.map(str::to_owned);

		Ok(AccessTokenEnvelope {
			access_token,
			token_type,
			expires_in: Some(expires_in),
			refresh_token,
			scope,
		})
	}

	/// Extracts the authorization code from a code-grant result.
	///
	/// Fails with [`AuthenticationError::InvalidResponse`] when the `code`
	/// parameter is absent or empty; otherwise the code is returned
	/// unmodified.
	pub fn authorization_code(&self) -> Result<String, AuthenticationError> {
		self.require_non_empty(PARAM_CODE)
	}
}

impl FromIterator<(String, String)> for CallbackQuery {
	fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use iref::uri;

	use crate::{AccessToken, Scope};

	use super::*;

	fn query(pairs: &[(&str, &str)]) -> CallbackQuery {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	fn token_query() -> CallbackQuery {
		query(&[
			("access_token", "tok"),
			("refresh_token", "refresh"),
			("scope", "profile history"),
			("token_type", "Bearer"),
			("expires_in", "3600"),
		])
	}

	#[test]
	fn token_result_copies_fields_verbatim() {
		let envelope = token_query().token_result().unwrap();
		assert_eq!(envelope.access_token, "tok");
		assert_eq!(envelope.refresh_token.as_deref(), Some("refresh"));
		assert_eq!(envelope.scope, "profile history");
		assert_eq!(envelope.token_type, "Bearer");
		assert_eq!(envelope.expires_in, Some(3600));
	}

	#[test]
	fn token_result_accepts_absent_refresh_token() {
		let envelope = query(&[
			("access_token", "tok"),
			("scope", "profile"),
			("token_type", "Bearer"),
			("expires_in", "3600"),
		])
		.token_result()
		.unwrap();
		assert_eq!(envelope.refresh_token, None);
	}

	#[test]
	fn token_result_requires_access_token() {
		let result = query(&[
			("scope", "profile"),
			("token_type", "Bearer"),
			("expires_in", "3600"),
		])
		.token_result();
		assert!(matches!(
			result,
			Err(AuthenticationError::InvalidResponse(_))
		));
	}

	#[test]
	fn token_result_rejects_empty_scope() {
		let result = query(&[
			("access_token", "tok"),
			("scope", ""),
			("token_type", "Bearer"),
			("expires_in", "3600"),
		])
		.token_result();
		assert!(result.is_err());
	}

	#[test]
	fn token_result_requires_token_type() {
		let result = query(&[
			("access_token", "tok"),
			("scope", "profile"),
			("expires_in", "3600"),
		])
		.token_result();
		assert!(result.is_err());
	}

	#[test]
	fn token_result_requires_integer_expiration() {
		let result = query(&[
			("access_token", "tok"),
			("scope", "profile"),
			("token_type", "Bearer"),
			("expires_in", "notanumber"),
		])
		.token_result();
		assert!(matches!(
			result,
			Err(AuthenticationError::InvalidResponse(_))
		));
	}

	#[test]
	fn token_result_requires_expiration() {
		let result = query(&[
			("access_token", "tok"),
			("scope", "profile"),
			("token_type", "Bearer"),
		])
		.token_result();
		assert!(result.is_err());
	}

	#[test]
	fn token_result_rejects_negative_expiration() {
		let result = query(&[
			("access_token", "tok"),
			("scope", "profile"),
			("token_type", "Bearer"),
			("expires_in", "-1"),
		])
		.token_result();
		assert!(result.is_err());
	}

	#[test]
	fn authorization_code_is_returned_unmodified() {
		let code = query(&[("code", "abc123")]).authorization_code().unwrap();
		assert_eq!(code, "abc123");
	}

	#[test]
	fn authorization_code_requires_code() {
		assert!(query(&[]).authorization_code().is_err());
		assert!(query(&[("code", "")]).authorization_code().is_err());
	}

	#[test]
	fn from_uri_decodes_percent_encoding() {
		let uri = uri!("https://client.example.com/callback?scope=profile%20history&code=abc123");
		let query = CallbackQuery::from_uri(uri).unwrap();
		assert_eq!(query.get("scope"), Some("profile history"));
		assert_eq!(query.authorization_code().unwrap(), "abc123");
	}

	#[test]
	fn from_uri_without_query_is_empty() {
		let query = CallbackQuery::from_uri(uri!("https://client.example.com/callback")).unwrap();
		assert_eq!(query.get("code"), None);
		assert!(query.token_result().is_err());
	}

	#[test]
	fn get_returns_first_occurrence() {
		let query = query(&[("scope", "profile"), ("scope", "history")]);
		assert_eq!(query.get("scope"), Some("profile"));
	}

	#[test]
	fn redirect_round_trip_builds_access_token() {
		let uri = uri!(
			"https://client.example.com/callback?access_token=tok&scope=profile+history&token_type=Bearer&expires_in=7200"
		);
		let envelope = CallbackQuery::from_uri(uri).unwrap().token_result().unwrap();
		let token = AccessToken::from_envelope(envelope);

		assert_eq!(token.expires_in, 7200);
		assert_eq!(token.token, "tok");
		assert_eq!(token.token_type, "Bearer");
		assert_eq!(token.refresh_token, None);
		assert_eq!(token.scopes, HashSet::from([Scope::Profile, Scope::History]));
	}
}

//! Access token staging and value types.
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::scope::{self, Scope};

/// Validated-but-unexpanded authorization result fields.
///
/// This is the flat, string-typed staging form of an [`AccessToken`], used
/// to hand a result across a process or component boundary. It is produced
/// only by [`CallbackQuery::token_result`](crate::CallbackQuery::token_result)
/// from a validated redirect, and consumed only by
/// [`AccessToken::from_envelope`]. The scope field stays in its wire string
/// form until reconstruction.
///
/// When produced by the parser, `access_token`, `scope` and `token_type`
/// are non-empty and `expires_in` is set.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenEnvelope {
	/// The access token issued by the authorization server.
	pub access_token: String,

	/// The type of the token issued, e.g. `Bearer`
	/// ([RFC 6749 Section 7.1](https://datatracker.ietf.org/doc/html/rfc6749#section-7.1)).
	pub token_type: String,

	/// Lifetime in seconds of the access token.
	///
	/// Always set by the parser; optional only so that an envelope built
	/// elsewhere can omit it.
	pub expires_in: Option<u64>,

	/// The refresh token, if the server issued one.
	pub refresh_token: Option<String>,

	/// Scope of the access token, in its space-delimited wire form.
	pub scope: String,
}

/// An access token with its scope string expanded into [`Scope`] values.
///
/// Constructed exactly once from an [`AccessTokenEnvelope`]; immutable
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Lifetime in seconds of the access token.
	pub expires_in: u64,

	/// The recognized scopes granted to this token. Custom scope tokens
	/// carried by the envelope's scope string are not represented here.
	pub scopes: HashSet<Scope>,

	/// The access token string itself.
	pub token: String,

	/// The refresh token, if the server issued one.
	pub refresh_token: Option<String>,

	/// The type of the token, e.g. `Bearer`.
	pub token_type: String,
}

impl AccessToken {
	/// Reconstructs an access token from its staging envelope.
	///
	/// The envelope's scope string is expanded permissively with
	/// [`scope::parse_scope_string`]; unknown scope tokens are dropped. A
	/// missing `expires_in` defaults to `0` rather than failing: the parser
	/// always sets it, so its absence signals a caller bug and is tolerated
	/// instead of treated as a wire error.
	pub fn from_envelope(envelope: AccessTokenEnvelope) -> Self {
		Self {
			expires_in: envelope.expires_in.unwrap_or(0),
			scopes: scope::parse_scope_string(&envelope.scope),
			token: envelope.access_token,
			refresh_token: envelope.refresh_token,
			token_type: envelope.token_type,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn envelope() -> AccessTokenEnvelope {
		AccessTokenEnvelope {
			access_token: "tok".to_owned(),
			token_type: "Bearer".to_owned(),
			expires_in: Some(3600),
			refresh_token: Some("refresh".to_owned()),
			scope: "profile history".to_owned(),
		}
	}

	#[test]
	fn from_envelope_expands_scopes() {
		let token = AccessToken::from_envelope(envelope());
		assert_eq!(token.token, "tok");
		assert_eq!(token.token_type, "Bearer");
		assert_eq!(token.expires_in, 3600);
		assert_eq!(token.refresh_token.as_deref(), Some("refresh"));
		assert_eq!(token.scopes, HashSet::from([Scope::Profile, Scope::History]));
	}

	#[test]
	fn from_envelope_drops_unknown_scope_tokens() {
		let token = AccessToken::from_envelope(AccessTokenEnvelope {
			scope: "profile custom.read".to_owned(),
			..envelope()
		});
		assert_eq!(token.scopes, HashSet::from([Scope::Profile]));
	}

	#[test]
	fn from_envelope_defaults_missing_expiration_to_zero() {
		let token = AccessToken::from_envelope(AccessTokenEnvelope {
			expires_in: None,
			..envelope()
		});
		assert_eq!(token.expires_in, 0);
	}

	#[test]
	fn envelope_serializes_without_absent_fields() {
		let json = serde_json::to_value(AccessTokenEnvelope {
			expires_in: None,
			refresh_token: None,
			..envelope()
		})
		.unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"access_token": "tok",
				"token_type": "Bearer",
				"scope": "profile history",
			})
		);
	}
}

//! Scope vocabulary and scope string codec.
//!
//! An OAuth 2.0 scope parameter is a space-delimited list of scope tokens
//! ([RFC 6749 Section 3.3](https://datatracker.ietf.org/doc/html/rfc6749#section-3.3)).
//! This module defines the closed vocabulary of scopes recognized by this
//! crate, each classified as [`ScopeClass::Standard`] or
//! [`ScopeClass::Privileged`], and the conversions between scope sets and
//! their wire string form.
//!
//! Two parsing policies exist deliberately:
//!
//! - [`parse_scope_string`] is permissive: scope strings received over the
//!   wire may carry tokens unknown to this version of the client (the server
//!   vocabulary can grow independently), so unresolved tokens are dropped
//!   rather than rejected.
//! - [`scopes_from_names`] is strict: scope names sourced from internally
//!   controlled data are expected to be valid already, so an unknown name
//!   fails with [`UnknownScopeError`].
use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Privilege classification of a [`Scope`].
///
/// Granting a privileged scope requires the elevated consent flow; standard
/// scopes can be granted through the regular one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeClass {
	Standard,
	Privileged,
}

/// A named permission grant recognized by the authorization server.
///
/// The vocabulary is a closed set; scope strings not listed here are
/// "custom scopes", carried as raw strings and never as a [`Scope`] value.
/// Every variant maps to exactly one [`ScopeClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
	/// Basic profile information of the authorizing user.
	Profile,

	/// The user's saved places.
	Places,

	/// The user's full activity history.
	History,

	/// A trimmed view of the activity history.
	HistoryLite,

	/// Details of the user's ongoing and past trips, across all
	/// applications.
	AllTrips,

	/// Making requests on the user's behalf.
	Request,

	/// Receipt details for requests made on the user's behalf.
	RequestReceipt,
}

impl Scope {
	/// Every scope in the vocabulary.
	pub const ALL: [Scope; 7] = [
		Scope::Profile,
		Scope::Places,
		Scope::History,
		Scope::HistoryLite,
		Scope::AllTrips,
		Scope::Request,
		Scope::RequestReceipt,
	];

	/// The canonical (lower-case) name of this scope, as it appears in a
	/// scope string.
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Profile => "profile",
			Self::Places => "places",
			Self::History => "history",
			Self::HistoryLite => "history_lite",
			Self::AllTrips => "all_trips",
			Self::Request => "request",
			Self::RequestReceipt => "request_receipt",
		}
	}

	/// The privilege classification of this scope.
	pub const fn class(&self) -> ScopeClass {
		match self {
			Self::Profile | Self::Places | Self::History | Self::HistoryLite => {
				ScopeClass::Standard
			}
			Self::AllTrips | Self::Request | Self::RequestReceipt => ScopeClass::Privileged,
		}
	}
}

impl fmt::Display for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Error raised when a scope name does not resolve against the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scope name: {0:?}")]
pub struct UnknownScopeError(pub String);

impl FromStr for Scope {
	type Err = UnknownScopeError;

	/// Resolves a scope name case-insensitively against the vocabulary.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"PROFILE" => Ok(Self::Profile),
			"PLACES" => Ok(Self::Places),
			"HISTORY" => Ok(Self::History),
			"HISTORY_LITE" => Ok(Self::HistoryLite),
			"ALL_TRIPS" => Ok(Self::AllTrips),
			"REQUEST" => Ok(Self::Request),
			"REQUEST_RECEIPT" => Ok(Self::RequestReceipt),
			_ => Err(UnknownScopeError(s.to_owned())),
		}
	}
}

/// Returns `true` if any scope in the set is classified
/// [`ScopeClass::Privileged`].
///
/// An empty set requires no privilege.
pub fn requires_privilege(scopes: &HashSet<Scope>) -> bool {
	scopes.iter().any(|s| s.class() == ScopeClass::Privileged)
}

/// Maps each scope to its canonical name.
pub fn to_name_set(scopes: &HashSet<Scope>) -> HashSet<&'static str> {
	scopes.iter().map(Scope::name).collect()
}

/// Parses a space-delimited scope string into a scope set, permissively.
///
/// Tokens are resolved case-insensitively; tokens that do not resolve
/// against the vocabulary (custom scopes, scopes introduced by a newer
/// server, empty tokens from doubled spaces) are silently dropped. An empty
/// input yields an empty set.
///
/// This never fails. For internally sourced names where an unknown name
/// indicates corruption, use [`scopes_from_names`] instead.
pub fn parse_scope_string(scope_string: &str) -> HashSet<Scope> {
	scope_string
		.split(' ')
		.filter_map(|token| Scope::from_str(token).ok())
		.collect()
}

/// Resolves a collection of scope names into a scope set, strictly.
///
/// Resolution is case-insensitive, as in [`parse_scope_string`], but any
/// name that does not resolve fails with [`UnknownScopeError`]. The empty
/// string is not a valid scope name.
pub fn scopes_from_names<I>(names: I) -> Result<HashSet<Scope>, UnknownScopeError>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	names
		.into_iter()
		.map(|name| name.as_ref().parse())
		.collect()
}

/// Encodes a scope set as its canonical space-delimited, lower-case string
/// form.
///
/// The token order is unspecified, but parsing the output back with
/// [`parse_scope_string`] yields an equal set.
pub fn to_scope_string(scopes: &HashSet<Scope>) -> String {
	scopes.iter().map(Scope::name).collect::<Vec<_>>().join(" ")
}

/// Encodes a collection of custom scope strings as a space-delimited,
/// lower-case string, without vocabulary validation.
pub fn custom_scope_string<I>(scopes: I) -> String
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	scopes
		.into_iter()
		.map(|s| s.as_ref().to_ascii_lowercase())
		.collect::<Vec<_>>()
		.join(" ")
}

/// Joins scope string fragments with a single space, trimming leading and
/// trailing whitespace from the final result only.
///
/// Empty fragments are kept during the join (they contribute a delimiter)
/// and disappear at the edges through the trim.
pub fn merge_scope_strings(parts: &[&str]) -> String {
	parts.join(" ").trim().to_owned()
}

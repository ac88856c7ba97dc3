//! Client-side handling of [OAuth 2.0][rfc6749] authorization results.
//!
//! When an authorization server redirects the user-agent back to a client,
//! the result arrives as query parameters on the redirect URI: either an
//! access token (implicit grant, [RFC 6749 Section 4.2.2][implicit]) or an
//! authorization code ([RFC 6749 Section 4.1.2][code]). This crate provides
//! the pure data conversions a client needs to trust such a redirect:
//!
//! - [`callback`] — validation and decoding of redirect query parameters
//!   into an [`AccessTokenEnvelope`] or an authorization code.
//! - [`scope`] — the scope vocabulary with its privilege classification,
//!   and conversions between scope sets and their space-delimited string
//!   form ([RFC 6749 Section 3.3][scope]).
//! - [`util`] — parameter encoding helpers.
//!
//! The [`AccessTokenEnvelope`] is a flat, string-typed staging form suitable
//! for handing across a process or component boundary; the final
//! [`AccessToken`] value is reconstructed from it exactly once.
//!
//! All operations are synchronous, stateless and free of I/O; this crate
//! performs no network requests and persists nothing.
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
//! [implicit]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.2.2
//! [code]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2
//! [scope]: https://datatracker.ietf.org/doc/html/rfc6749#section-3.3
pub mod callback;
pub mod scope;
mod token;
pub mod util;

pub use callback::{AuthenticationError, CallbackQuery};
pub use scope::{Scope, ScopeClass, UnknownScopeError};
pub use token::*;

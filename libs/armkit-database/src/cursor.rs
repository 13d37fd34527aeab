//! Keyset cursor used by stores that page in key order.
//!
//! The token is base64url (no padding) JSON: `{"v":1,"k":"<last key>","f":"<query fingerprint>"}`.
//! Only the store that issued a token decodes it; everything above the store treats it
//! as an opaque string.

use crate::client::DatabaseError;
use crate::query::Query;

const CURSOR_VERSION: u8 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageCursor {
    /// Sort key of the last item on the page that produced this cursor.
    pub last_key: String,
    /// Fingerprint of the query the cursor belongs to.
    pub fingerprint: String,
}

impl PageCursor {
    #[must_use]
    pub fn new(query: &Query, last_key: impl Into<String>) -> Self {
        Self {
            last_key: last_key.into(),
            fingerprint: fingerprint(query),
        }
    }

    /// Encode cursor to a base64url string.
    ///
    /// # Errors
    /// Returns a JSON serialization error if encoding fails.
    pub fn encode(&self) -> serde_json::Result<String> {
        #[derive(serde::Serialize)]
        struct Wire<'a> {
            v: u8,
            k: &'a str,
            f: &'a str,
        }
        let w = Wire {
            v: CURSOR_VERSION,
            k: &self.last_key,
            f: &self.fingerprint,
        };
        serde_json::to_vec(&w).map(|x| base64_url::encode(&x))
    }

    /// Decode a token and check it was issued for `query`.
    ///
    /// # Errors
    /// Returns `DatabaseError::InvalidPaginationToken` if the token is not valid base64url,
    /// is not a cursor document, has an unsupported version, or belongs to another query.
    pub fn decode(token: &str, query: &Query) -> Result<Self, DatabaseError> {
        #[derive(serde::Deserialize)]
        struct Wire {
            v: u8,
            k: String,
            f: String,
        }

        let bytes = base64_url::decode(token).map_err(|_| invalid("invalid base64url encoding"))?;
        let w: Wire = serde_json::from_slice(&bytes).map_err(|_| invalid("malformed JSON"))?;
        if w.v != CURSOR_VERSION {
            return Err(invalid("unsupported version"));
        }
        if w.k.is_empty() {
            return Err(invalid("empty key"));
        }
        if w.f != fingerprint(query) {
            return Err(invalid("token was issued for a different query"));
        }
        Ok(Self {
            last_key: w.k,
            fingerprint: w.f,
        })
    }
}

fn fingerprint(query: &Query) -> String {
    format!(
        "{}|{}|{}",
        query.root_scope.to_ascii_lowercase(),
        query.resource_type.to_ascii_lowercase(),
        u8::from(query.scope_recursive)
    )
}

fn invalid(reason: &str) -> DatabaseError {
    DatabaseError::InvalidPaginationToken(reason.to_owned())
}

mod base64_url {
    use base64::Engine;

    pub fn encode(bytes: &[u8]) -> String {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(s)
    }
}

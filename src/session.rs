//! Session credentials.

use std::fmt;

use serde_json::Value;

const BEARER_PREFIX: &str = "bearer ";

/// A bearer credential for authenticated backend requests.
///
/// The raw value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Normalise a stored credential into a bare token.
    ///
    /// Stored values come in several shapes: the bare token, a JSON string
    /// wrapping it, a JSON object with a `token` or `accessToken` field, or any
    /// of those with a `Bearer ` prefix. Returns `None` when nothing usable is
    /// left.
    pub fn normalize(raw: &str) -> Option<Self> {
        let unwrapped = match serde_json::from_str::<Value>(raw) {
            Ok(Value::String(token)) => token,
            Ok(Value::Object(fields)) => ["token", "accessToken"]
                .iter()
                .find_map(|field| fields.get(*field).and_then(Value::as_str))
                .map_or_else(|| raw.to_string(), str::to_string),
            _ => raw.to_string(),
        };

        let trimmed = unwrapped.trim();

        let token = match trimmed.get(..BEARER_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(BEARER_PREFIX) => trimmed
                .get(BEARER_PREFIX.len()..)
                .unwrap_or_default()
                .trim(),
            _ => trimmed,
        };

        if token.is_empty() {
            return None;
        }

        Some(AuthToken(token.to_string()))
    }

    /// Returns the bare token.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(**redacted**)")
    }
}

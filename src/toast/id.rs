// SPDX-License-Identifier: MPL-2.0
//! Toast identifiers.

use crate::config::defaults::TOAST_ID_LENGTH;
use rand::Rng;
use std::borrow::Borrow;
use std::fmt;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of a toast.
///
/// Generated ids are short random base-36 strings; uniqueness is only
/// probabilistic. Callers may also pick their own id to target an existing
/// toast with an upsert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(String);

impl ToastId {
    /// Wraps a caller-chosen identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let id = (0..TOAST_ID_LENGTH)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ToastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ToastId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ToastId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_expected_length() {
        let id = ToastId::generate();
        assert_eq!(id.as_str().len(), TOAST_ID_LENGTH);
    }

    #[test]
    fn generated_ids_are_lowercase_base36() {
        let id = ToastId::generate();
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn generated_ids_differ() {
        let a = ToastId::generate();
        let b = ToastId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn explicit_id_round_trips_through_display() {
        let id = ToastId::from("upload-progress");
        assert_eq!(id.to_string(), "upload-progress");
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Toast and container identifiers.

use super::options::ToastOptions;
use rand::Rng;
use std::fmt;

/// Length of generated identifiers.
const GENERATED_ID_LEN: usize = 10;

/// Identifier of a toast or of a container: a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Id {
    Text(String),
    Number(i64),
}

/// Identifier of a toast.
pub type ToastId = Id;

/// Identifier of a container, used for multi-container routing.
pub type ContainerId = Id;

impl Id {
    /// Returns whether the id can name a toast: a non-empty string or any number.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Id::Text(text) => !text.is_empty(),
            Id::Number(_) => true,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Text(text) => f.write_str(text),
            Id::Number(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_owned())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Number(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Number(i64::from(value))
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id::Number(i64::from(value))
    }
}

/// Generates a short token: random base-36 digits followed by the current
/// millisecond timestamp, cut to ten characters. Not cryptographically secure.
#[must_use]
pub fn generate_id() -> ToastId {
    let random: u64 = rand::thread_rng().gen();
    let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();

    let mut token = to_base36(random);
    token.push_str(&to_base36(millis));
    token.truncate(GENERATED_ID_LEN);
    Id::Text(token)
}

/// Uses the caller's `toast_id` when it is valid, otherwise generates one.
#[must_use]
pub fn resolve_id(options: &ToastOptions) -> ToastId {
    options
        .toast_id
        .clone()
        .filter(Id::is_valid)
        .unwrap_or_else(generate_id)
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_unique_and_short() {
        let ids: HashSet<ToastId> = (0..1_000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1_000);
        for id in &ids {
            match id {
                Id::Text(text) => assert!(text.len() <= GENERATED_ID_LEN && !text.is_empty()),
                Id::Number(_) => panic!("generated ids are textual"),
            }
        }
    }

    #[test]
    fn resolve_keeps_caller_supplied_ids() {
        let text = ToastOptions::new().with_id("custom");
        assert_eq!(resolve_id(&text), Id::from("custom"));

        let number = ToastOptions::new().with_id(42);
        assert_eq!(resolve_id(&number), Id::Number(42));
    }

    #[test]
    fn resolve_replaces_empty_ids() {
        let options = ToastOptions::new().with_id("");
        let id = resolve_id(&options);
        assert!(id.is_valid());
        assert_ne!(id, Id::from(""));
    }

    #[test]
    fn base36_encoding() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn display_renders_raw_value() {
        assert_eq!(Id::from("abc").to_string(), "abc");
        assert_eq!(Id::from(7).to_string(), "7");
    }
}

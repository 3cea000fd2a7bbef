//! Three-state optional values.
//!
//! OpenAPI separates "not required" from "nullable". A field that is both
//! can be missing, be `null`, or hold a value, and `Option<T>` cannot tell
//! the first two apart. [`Nullable`] can.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A value that may be absent, explicitly `null`, or present.
///
/// Use it together with `#[serde(default)]` so a missing key becomes
/// [`Nullable::Absent`], and `skip_serializing_if = "Nullable::is_absent"`
/// so it stays missing on the way out:
///
/// ```
/// use splitapi::Nullable;
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct User {
///     #[serde(default, skip_serializing_if = "Nullable::is_absent")]
///     email: Nullable<String>,
/// }
///
/// let missing: User = serde_json::from_str("{}").unwrap();
/// let null: User = serde_json::from_str(r#"{"email":null}"#).unwrap();
///
/// assert!(missing.email.is_absent());
/// assert!(null.email.is_null());
/// assert_eq!(serde_json::to_string(&missing).unwrap(), "{}");
/// assert_eq!(serde_json::to_string(&null).unwrap(), r#"{"email":null}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// The key was not present.
    Absent,
    /// The key was present with `null`.
    Null,
    /// The key was present with a value.
    Present(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Nullable<T> {
    /// Returns `true` if the key was not present.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if the key was present with `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if there is a value.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrows the value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Converts to `Nullable<&T>`.
    pub fn as_ref(&self) -> Nullable<&T> {
        match self {
            Self::Absent => Nullable::Absent,
            Self::Null => Nullable::Null,
            Self::Present(value) => Nullable::Present(value),
        }
    }

    /// Drops the absent/null distinction.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Null,
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        #[serde(default, skip_serializing_if = "Nullable::is_absent")]
        name: Nullable<String>,
        #[serde(default, skip_serializing_if = "Nullable::is_absent")]
        active: Nullable<bool>,
    }

    #[test]
    fn test_three_states_deserialize() {
        let record: Record = serde_json::from_str(r#"{"name":"ada","active":null}"#).unwrap();
        assert_eq!(record.name, Nullable::Present("ada".to_string()));
        assert!(record.active.is_null());

        let record: Record = serde_json::from_str("{}").unwrap();
        assert!(record.name.is_absent());
        assert!(record.active.is_absent());
    }

    #[test]
    fn test_round_trip_preserves_absent_and_null() {
        let input = r#"{"active":null}"#;
        let record: Record = serde_json::from_str(input).unwrap();
        assert_eq!(serde_json::to_string(&record).unwrap(), input);
    }

    #[test]
    fn test_accessors() {
        let present = Nullable::Present(3);
        assert_eq!(present.value(), Some(&3));
        assert_eq!(present.as_ref(), Nullable::Present(&3));
        assert_eq!(present.into_option(), Some(3));

        assert_eq!(Nullable::<i32>::Null.into_option(), None);
        assert_eq!(Nullable::<i32>::default(), Nullable::Absent);
        assert_eq!(Nullable::from(None::<i32>), Nullable::Null);
    }
}

//! Name Module
//!
//! Hierarchical names made of opaque binary components. The textual form is
//! the NDN URI: `/prefix/0`, with bytes outside the unreserved set written as
//! `%XX` escapes.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CsError, Result};

// == Name Component ==
/// A single opaque name component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameComponent(Box<[u8]>);

impl NameComponent {
    /// Creates a component from raw bytes.
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Self {
        Self(bytes.into())
    }

    fn parse_escaped(segment: &str) -> Result<Self> {
        // Components made only of periods carry three extra periods
        if segment.bytes().all(|b| b == b'.') {
            return match segment.len().checked_sub(3) {
                Some(len) => Ok(Self(vec![b'.'; len].into_boxed_slice())),
                None => Err(CsError::InvalidName(format!(
                    "component '{}' is reserved",
                    segment
                ))),
            };
        }

        let raw = segment.as_bytes();
        let mut bytes = Vec::with_capacity(raw.len());
        let mut i = 0;
        while i < raw.len() {
            if raw[i] == b'%' {
                let hex = raw
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| {
                        CsError::InvalidName(format!("bad escape in component '{}'", segment))
                    })?;
                bytes.push(hex);
                i += 3;
            } else {
                bytes.push(raw[i]);
                i += 1;
            }
        }
        Ok(Self(bytes.into_boxed_slice()))
    }
}

impl From<&str> for NameComponent {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for NameComponent {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl fmt::Display for NameComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.iter().all(|&b| b == b'.') {
            write!(f, "...")?;
        }
        for &b in self.0.iter() {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "%{:02X}", b)?;
            }
        }
        Ok(())
    }
}

// == Name ==
/// An immutable, ordered sequence of name components.
///
/// Equality and ordering are component-wise; two names are equal iff they
/// hold the same components in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name {
    components: Vec<NameComponent>,
}

impl Name {
    /// Creates the empty (root) name.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a name from a component sequence.
    pub fn from_components<I, C>(components: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<NameComponent>,
    {
        Self {
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Iterates over the components from first to last.
    pub fn components(&self) -> impl Iterator<Item = &NameComponent> {
        self.components.iter()
    }

    pub fn as_slice(&self) -> &[NameComponent] {
        &self.components
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true for the root name.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl FromStr for Name {
    type Err = CsError;

    fn from_str(s: &str) -> Result<Self> {
        let uri = s.strip_prefix("ndn:").unwrap_or(s);
        if !uri.starts_with('/') {
            return Err(CsError::InvalidName(format!(
                "name '{}' must start with '/'",
                s
            )));
        }

        let components = uri
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(NameComponent::parse_escaped)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return write!(f, "/");
        }
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        uri.parse().map_err(de::Error::custom)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let name: Name = "/prefix/0".parse().unwrap();
        assert_eq!(name.len(), 2);
        assert_eq!(name.to_string(), "/prefix/0");
    }

    #[test]
    fn test_root_name() {
        let name: Name = "/".parse().unwrap();
        assert!(name.is_empty());
        assert_eq!(name.to_string(), "/");
    }

    #[test]
    fn test_ndn_scheme_prefix() {
        let name: Name = "ndn:/a/b".parse().unwrap();
        assert_eq!(name, Name::from_components(["a", "b"]));
    }

    #[test]
    fn test_binary_components_escape() {
        let name = Name::from_components([NameComponent::new(vec![0u8, b'a', 0xff])]);
        assert_eq!(name.to_string(), "/%00a%FF");

        let parsed: Name = "/%00a%FF".parse().unwrap();
        assert_eq!(parsed, name);
    }

    #[test]
    fn test_invalid_names() {
        assert!(matches!("prefix/0".parse::<Name>(), Err(CsError::InvalidName(_))));
        assert!(matches!("/bad%zz".parse::<Name>(), Err(CsError::InvalidName(_))));
        assert!(matches!("/trunc%4".parse::<Name>(), Err(CsError::InvalidName(_))));
    }

    #[test]
    fn test_component_wise_equality() {
        let a = Name::from_components(["ab", "c"]);
        let b = Name::from_components(["a", "bc"]);
        assert_ne!(a, b);
        assert_eq!(a, "/ab/c".parse::<Name>().unwrap());
    }

    #[test]
    fn test_empty_and_period_components_round_trip() {
        let name = Name::from_components([
            NameComponent::from("a"),
            NameComponent::new(Vec::new()),
            NameComponent::from("."),
            NameComponent::from("b"),
        ]);
        assert_eq!(name.to_string(), "/a/.../..../b");
        assert_eq!(name.to_string().parse::<Name>().unwrap(), name);

        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(serde_json::from_str::<Name>(&json).unwrap(), name);
    }

    #[test]
    fn test_short_period_components_rejected() {
        assert!(matches!("/a/./b".parse::<Name>(), Err(CsError::InvalidName(_))));
        assert!(matches!("/a/..".parse::<Name>(), Err(CsError::InvalidName(_))));
    }

    #[test]
    fn test_serde_as_uri_string() {
        let name: Name = "/prefix/7".parse().unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"/prefix/7\"");

        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<Name>("\"no-slash\"").is_err());
    }
}

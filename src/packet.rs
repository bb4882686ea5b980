//! Decoded packet models
//!
//! The wire codec hands the store only the decoded fields it needs: the
//! name, payload and producer freshness of a data object, and the name of a
//! request.

use chrono::Duration;

use crate::cache::{Name, Payload};

// == Data Object ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataObject {
    pub name: Name,
    pub payload: Payload,
    /// Producer-supplied freshness; None = never expires by time
    pub freshness: Option<Duration>,
}

impl DataObject {
    pub fn new(name: Name, payload: impl Into<Payload>) -> Self {
        Self {
            name,
            payload: payload.into(),
            freshness: None,
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = Some(freshness);
        self
    }
}

// == Request ==
/// A request for a data object by exact name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub name: Name,
}

impl Request {
    pub fn new(name: Name) -> Self {
        Self { name }
    }
}

impl From<Name> for Request {
    fn from(name: Name) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_object_builder() {
        let name: Name = "/prefix/0".parse().unwrap();
        let data = DataObject::new(name.clone(), b"abc".to_vec()).with_freshness(Duration::seconds(2));

        assert_eq!(data.name, name);
        assert_eq!(&data.payload[..], b"abc");
        assert_eq!(data.freshness, Some(Duration::seconds(2)));
    }

    #[test]
    fn test_request_from_name() {
        let name: Name = "/prefix/1".parse().unwrap();
        let request = Request::from(name.clone());
        assert_eq!(request.name, name);
    }
}

//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::Duration;
use serde::Deserialize;

use crate::cache::Name;
use crate::error::{CsError, Result};
use crate::packet::DataObject;

/// Request body for offering a data object to a node (PUT /nodes/:node/data)
///
/// # Fields
/// - `name`: NDN URI of the data object, e.g. `/prefix/0`
/// - `payload`: Content bytes, sent as a UTF-8 string
/// - `freshness_ms`: Optional freshness period; absent means fresh forever
#[derive(Debug, Clone, Deserialize)]
pub struct AddDataRequest {
    pub name: String,
    pub payload: String,
    #[serde(default)]
    pub freshness_ms: Option<i64>,
}

impl AddDataRequest {
    /// Parses the name and builds the data object to offer to the store.
    pub fn into_data_object(self) -> Result<DataObject> {
        if self.name.trim().is_empty() {
            return Err(CsError::InvalidRequest("Name cannot be empty".to_string()));
        }
        let name: Name = self.name.parse()?;

        let data = DataObject::new(name, self.payload.into_bytes());
        Ok(match self.freshness_ms {
            // Out-of-range negatives are still stale
            Some(ms) => {
                data.with_freshness(Duration::try_milliseconds(ms).unwrap_or(Duration::MIN))
            }
            None => data,
        })
    }
}

/// Request body for changing a node's capacity (PUT /nodes/:node/max-size)
#[derive(Debug, Clone, Deserialize)]
pub struct SetMaxSizeRequest {
    pub max_size: usize,
}

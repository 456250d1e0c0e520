//! Applied list state as consumers see it.
//!
//! DESIGN
//! ======
//! A [`Snapshot`] holds the six known query fields (each absent until first
//! applied) plus an open `extra` map for response metadata such as `data`,
//! `total`, `from`, `to`, and `pages`. Known fields are read leniently from
//! untrusted JSON: a value of the wrong shape is dropped, not an error.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::options::Order;
use crate::util::codec::{self, DecodeError};
use crate::util::json::{array_of, count_of, object_of, positive_of};

/// Last-applied list state plus response metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    /// Everything else the response carried.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Snapshot {
    /// Split a raw JSON object into known fields and metadata.
    #[must_use]
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let page = map.remove("page");
        let limit = map.remove("limit");
        let sort = map.remove("sort");
        let order = map.remove("order");
        let search = map.remove("search");
        let filters = map.remove("filters");
        Self {
            page: positive_of(page.as_ref()),
            limit: positive_of(limit.as_ref()),
            sort: sort.and_then(|v| v.as_str().map(str::to_owned)),
            order: Order::from_value(order.as_ref()),
            search: search.and_then(|v| v.as_str().map(str::to_owned)),
            filters: match filters {
                Some(Value::Object(filters)) => Some(filters),
                _ => None,
            },
            extra: map,
        }
    }

    /// Build from any JSON value; non-objects yield an empty snapshot.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::from_map(object_of(Some(value)))
    }

    /// Flatten back into a single JSON object.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = self.extra.clone();
        if let Some(page) = self.page {
            map.insert("page".to_owned(), Value::from(page));
        }
        if let Some(limit) = self.limit {
            map.insert("limit".to_owned(), Value::from(limit));
        }
        if let Some(sort) = &self.sort {
            map.insert("sort".to_owned(), Value::from(sort.clone()));
        }
        if let Some(order) = self.order {
            map.insert("order".to_owned(), Value::from(order.as_str()));
        }
        if let Some(search) = &self.search {
            map.insert("search".to_owned(), Value::from(search.clone()));
        }
        if let Some(filters) = &self.filters {
            map.insert("filters".to_owned(), Value::Object(filters.clone()));
        }
        map
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.to_map())
    }

    /// Overlay the keys of `raw` (when it is an object) on this snapshot.
    #[must_use]
    pub fn merged(&self, raw: &Value) -> Self {
        let mut map = self.to_map();
        map.extend(object_of(Some(raw)));
        Self::from_map(map)
    }

    /// Canonical single-sort parameters.
    #[must_use]
    pub fn params(&self) -> Params {
        Params {
            page: self.page,
            limit: self.limit,
            sort: self.sort.clone(),
            order: self.order,
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Multi-sort parameters for backends that take a list of sort keys.
    #[must_use]
    pub fn new_params(&self) -> NewParams {
        NewParams {
            page: self.page,
            limit: self.limit,
            sorts: self
                .sort
                .iter()
                .map(|field| SortSpec {
                    field: field.clone(),
                    order: self.order.unwrap_or_default(),
                })
                .collect(),
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }

    /// Result rows under `data`, empty when missing or not an array.
    #[must_use]
    pub fn records(&self) -> Vec<Value> {
        array_of(self.extra.get("data"))
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        count_of(self.extra.get("total"))
    }

    #[must_use]
    pub fn from(&self) -> u64 {
        count_of(self.extra.get("from"))
    }

    #[must_use]
    pub fn to(&self) -> u64 {
        count_of(self.extra.get("to"))
    }

    #[must_use]
    pub fn pages(&self) -> u64 {
        count_of(self.extra.get("pages"))
    }
}

/// Canonical parameters: the six query fields with a single sort/order pair.
///
/// Field order matters: it fixes the JSON layout and therefore the hash.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
}

impl Params {
    /// Stable base64 hash of the JSON form.
    #[must_use]
    pub fn hash(&self) -> String {
        codec::encode_json(self).unwrap_or_default()
    }

    /// Inverse of [`Params::hash`].
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when the hash is malformed or not a params object.
    pub fn from_hash(hash: &str) -> Result<Self, DecodeError> {
        codec::decode_json(hash)
    }
}

/// One entry of a multi-sort request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Parameters with a list of sort keys instead of a single pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default)]
    pub sorts: Vec<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
}

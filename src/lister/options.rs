//! List configuration: field names, sort order, trigger policy, and defaults.
//!
//! DESIGN
//! ======
//! `ListerOptions` is a serde model so a list/table can be configured from a
//! JSON blob. Every field is optional; unset values resolve to the defaults
//! in [`Defaults`] (page 1, limit 25, sort `_id`, ascending, empty search and
//! filters).

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 25;
pub const DEFAULT_SORT: &str = "_id";

/// One of the six query-state fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Page,
    Limit,
    Sort,
    Order,
    Search,
    Filters,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 6] = [
        Field::Page,
        Field::Limit,
        Field::Sort,
        Field::Order,
        Field::Search,
        Field::Filters,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Limit => "limit",
            Self::Sort => "sort",
            Self::Order => "order",
            Self::Search => "search",
            Self::Filters => "filters",
        }
    }
}

/// Field selection for `apply`, `reset`, and trigger configuration.
///
/// Serialized as the string `"all"` or a list of field names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Fields {
    #[default]
    All,
    Only(Vec<Field>),
}

impl Fields {
    /// Whether `field` is part of the selection.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        match self {
            Self::All => true,
            Self::Only(fields) => fields.contains(&field),
        }
    }
}

impl From<Field> for Fields {
    fn from(field: Field) -> Self {
        Self::Only(vec![field])
    }
}

impl<const N: usize> From<[Field; N]> for Fields {
    fn from(fields: [Field; N]) -> Self {
        Self::Only(fields.to_vec())
    }
}

impl From<&[Field]> for Fields {
    fn from(fields: &[Field]) -> Self {
        Self::Only(fields.to_vec())
    }
}

impl From<Vec<Field>> for Fields {
    fn from(fields: Vec<Field>) -> Self {
        Self::Only(fields)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FieldsRepr {
    Keyword(String),
    List(Vec<Field>),
}

impl<'de> Deserialize<'de> for Fields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match FieldsRepr::deserialize(deserializer)? {
            FieldsRepr::Keyword(word) if word == "all" => Ok(Self::All),
            FieldsRepr::Keyword(word) => Err(D::Error::custom(format!(
                "expected \"all\" or a list of fields, got \"{word}\""
            ))),
            FieldsRepr::List(fields) => Ok(Self::Only(fields)),
        }
    }
}

impl Serialize for Fields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::Only(fields) => fields.serialize(serializer),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Parse a JSON value holding `"asc"` or `"desc"`.
    #[must_use]
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        value?.as_str()?.parse().ok()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an [`Order`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid sort order \"{0}\", expected \"asc\" or \"desc\"")]
pub struct ParseOrderError(pub String);

impl FromStr for Order {
    type Err = ParseOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseOrderError(other.to_owned())),
        }
    }
}

/// Preference keys that can be persisted between sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoredField {
    Limit,
    Sort,
    Order,
}

impl StoredField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "limit",
            Self::Sort => "sort",
            Self::Order => "order",
        }
    }
}

/// Decides which field changes auto-apply to the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriggerPolicy {
    fields: Fields,
}

impl TriggerPolicy {
    /// Build a policy from configuration. `None` selects page, limit, sort,
    /// and order.
    #[must_use]
    pub fn new(triggers: Option<&Fields>) -> Self {
        let fields = triggers.cloned().unwrap_or_else(|| {
            Fields::Only(vec![Field::Page, Field::Limit, Field::Sort, Field::Order])
        });
        Self { fields }
    }

    #[must_use]
    pub fn must_trigger(&self, field: Field) -> bool {
        self.fields.contains(field)
    }
}

impl Default for TriggerPolicy {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Error returned by [`ListerOptions::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to parse lister options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for one list instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListerOptions {
    /// Fields that auto-apply on change; `None` means page/limit/sort/order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Fields>,
    /// Preferences persisted under the list namespace.
    pub stores: Vec<StoredField>,
    /// Allowed page sizes; empty allows any positive size.
    pub limits: Vec<u64>,
    /// Allowed sort fields; empty allows any non-blank field.
    pub sorts: Vec<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub order: Option<Order>,
    pub search: Option<String>,
    pub filters: Option<Map<String, Value>>,
}

impl ListerOptions {
    /// Parse options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::Parse`] for malformed JSON or unrecognized field names
    /// in `triggers` or `stores`.
    pub fn from_json(raw: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(raw)?)
    }

    #[must_use]
    pub fn with_triggers(mut self, triggers: impl Into<Fields>) -> Self {
        self.triggers = Some(triggers.into());
        self
    }

    #[must_use]
    pub fn with_stores(mut self, stores: impl IntoIterator<Item = StoredField>) -> Self {
        self.stores = stores.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_limits(mut self, limits: impl IntoIterator<Item = u64>) -> Self {
        self.limits = limits.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_sorts<S: Into<String>>(mut self, sorts: impl IntoIterator<Item = S>) -> Self {
        self.sorts = sorts.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Map<String, Value>) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Whether `limit` is positive and allowed by the allow-list.
    #[must_use]
    pub fn is_valid_limit(&self, limit: u64) -> bool {
        limit > 0 && (self.limits.is_empty() || self.limits.contains(&limit))
    }

    /// Whether `sort` is non-blank and allowed by the allow-list.
    #[must_use]
    pub fn is_valid_sort(&self, sort: &str) -> bool {
        !sort.trim().is_empty() && (self.sorts.is_empty() || self.sorts.iter().any(|s| s == sort))
    }

    #[must_use]
    pub fn is_stored(&self, field: StoredField) -> bool {
        self.stores.contains(&field)
    }

    /// Resolve configured initial values, falling back where unset or empty.
    #[must_use]
    pub fn defaults(&self) -> Defaults {
        Defaults {
            page: self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT),
            sort: self
                .sort
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SORT.to_owned()),
            order: self.order.unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
            filters: self.filters.clone().unwrap_or_default(),
        }
    }
}

/// Resolved initial values for a list instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Defaults {
    pub page: u64,
    pub limit: u64,
    pub sort: String,
    pub order: Order,
    pub search: String,
    pub filters: Map<String, Value>,
}

impl Default for Defaults {
    fn default() -> Self {
        ListerOptions::default().defaults()
    }
}

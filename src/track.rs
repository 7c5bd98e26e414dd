/*!
 * Normalization of one media track.
 *
 * A `TrackNormalizer` owns the ordered property records and rule records
 * for a track type. For each track the caller hands over the raw fields
 * and a fresh `Context`; handlers run first, then rules over the result.
 */

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use log::debug;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::context::Context;
use crate::errors::{PropertyError, Result};
use crate::properties::duration::format_duration;
use crate::properties::{AnyProperty, Property, Quantity};
use crate::rules::{AnyRule, Rule};
use crate::value::RawValue;

/// Canonical value stored in a property map
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    Duration(Duration),
    Quantity(Quantity),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Duration(value) => write!(f, "{}", format_duration(*value)),
            Self::Quantity(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Duration(value) => serializer.collect_str(&format_duration(*value)),
            Self::Quantity(value) => value.serialize(serializer),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Duration> for PropertyValue {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<Quantity> for PropertyValue {
    fn from(value: Quantity) -> Self {
        Self::Quantity(value)
    }
}

/// Normalized properties of one track, keyed by property name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    values: BTreeMap<String, PropertyValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_text)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(PropertyValue::as_bool)
    }

    pub fn get_duration(&self, key: &str) -> Option<Duration> {
        self.get(key).and_then(PropertyValue::as_duration)
    }

    pub fn get_quantity(&self, key: &str) -> Option<&Quantity> {
        self.get(key).and_then(PropertyValue::as_quantity)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Raw fields of one track, keyed by the inspection tool's field names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTrack {
    fields: BTreeMap<String, RawValue>,
}

impl RawTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from one JSON track object; `null` fields are skipped
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            PropertyError::InvalidTrack(format!("expected a JSON object, got {}", value))
        })?;

        let fields = object
            .iter()
            .filter_map(|(key, field)| RawValue::from_json(field).map(|raw| (key.clone(), raw)))
            .collect();
        Ok(Self { fields })
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawTrack
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut track = Self::new();
        for (key, value) in iter {
            track.insert(key, value);
        }
        track
    }
}

// @struct: Output key bound to a handler
#[derive(Debug)]
struct PropertyRecord {
    key: String,
    handler: Box<dyn AnyProperty>,
}

// @struct: Output key bound to a rule
#[derive(Debug)]
struct RuleRecord {
    key: String,
    rule: Box<dyn AnyRule>,
    override_existing: bool,
}

/// Ordered handlers and rules for one kind of track
#[derive(Debug, Default)]
pub struct TrackNormalizer {
    properties: Vec<PropertyRecord>,
    rules: Vec<RuleRecord>,
}

impl TrackNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the output of `handler` under `key`
    pub fn with_property<P>(mut self, key: impl Into<String>, handler: P) -> Self
    where
        P: Property + fmt::Debug + Send + Sync + 'static,
    {
        self.push_property(key, Box::new(handler));
        self
    }

    /// Store the output of `rule` under `key` unless the key is already set
    pub fn with_rule<R>(self, key: impl Into<String>, rule: R) -> Self
    where
        R: Rule + fmt::Debug + Send + Sync + 'static,
    {
        self.with_rule_override(key, rule, false)
    }

    /// Store the output of `rule` under `key`, optionally replacing a handler value
    pub fn with_rule_override<R>(
        mut self,
        key: impl Into<String>,
        rule: R,
        override_existing: bool,
    ) -> Self
    where
        R: Rule + fmt::Debug + Send + Sync + 'static,
    {
        self.push_rule(key, Box::new(rule), override_existing);
        self
    }

    pub(crate) fn push_property(&mut self, key: impl Into<String>, handler: Box<dyn AnyProperty>) {
        self.properties.push(PropertyRecord {
            key: key.into(),
            handler,
        });
    }

    pub(crate) fn push_rule(
        &mut self,
        key: impl Into<String>,
        rule: Box<dyn AnyRule>,
        override_existing: bool,
    ) {
        self.rules.push(RuleRecord {
            key: key.into(),
            rule,
            override_existing,
        });
    }

    /// Output keys of the property records, in declaration order
    pub fn property_keys(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|record| record.key.as_str())
    }

    /// Output keys of the rule records, in declaration order
    pub fn rule_keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|record| record.key.as_str())
    }

    /// Normalize one track; rejected values end up in `context`
    pub fn normalize(&self, raw: &RawTrack, context: &mut Context) -> PropertyMap {
        let mut props = PropertyMap::new();
        let mut pv_props = PropertyMap::new();

        for record in &self.properties {
            let info = record.handler.describe();
            let Some(value) = raw.get(info.name()) else {
                continue;
            };
            let Some(normalized) = record.handler.normalize(value, context) else {
                continue;
            };

            if info.is_private() {
                pv_props.insert(record.key.clone(), normalized);
            } else {
                props.insert(record.key.clone(), normalized);
            }
        }

        for record in &self.rules {
            if !record.override_existing && props.contains_key(&record.key) {
                continue;
            }
            if let Some(value) = record.rule.evaluate(&props, &pv_props, context) {
                debug!("Rule {} set {} = {}", record.rule.rule_name(), record.key, value);
                props.insert(record.key.clone(), value);
            }
        }

        debug!(
            "Normalized {} of {} fields{} with {} reports",
            props.len(),
            raw.len(),
            context.track().map(|t| format!(" in {}", t)).unwrap_or_default(),
            context.reports().len()
        );
        props
    }
}

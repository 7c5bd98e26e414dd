/*!
 * Track profiles: the declarative form of a `TrackNormalizer`.
 *
 * A profile lists property records and rule records in the order they run.
 * It is plain serde data, so callers can keep profiles next to the rest of
 * their configuration and build normalizers from them at startup.
 *
 * ```json
 * {
 *   "properties": [
 *     { "key": "duration", "source": "Duration", "kind": "duration", "resolution": 1000000 },
 *     { "key": "sampling_rate", "source": "SamplingRate", "kind": "quantity",
 *       "unit": { "symbol": "Hz" } },
 *     { "key": "name", "source": "Title", "kind": "text" }
 *   ],
 *   "rules": [ { "key": "closed_caption", "rule": "closed_caption" } ]
 * }
 * ```
 */

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{PropertyError, Result};
use crate::numeric::{Decimal, Resolution};
use crate::properties::{
    AnyProperty, DataType, DurationProperty, PropertyInfo, QuantityProperty, TextProperty, Unit,
};
use crate::rules::{AnyRule, ClosedCaptionRule};
use crate::track::TrackNormalizer;

fn default_reportable() -> bool {
    true
}

fn default_factor() -> Decimal {
    Decimal::one()
}

/// Ordered property and rule records for one kind of track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackProfile {
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,

    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

/// One property record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyEntry {
    // @field: Output key in the normalized map
    pub key: String,

    // @field: Field name in the raw track
    pub source: String,

    // @field: Report label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // @field: Only visible to rules
    #[serde(default)]
    pub private: bool,

    // @field: Report rejected values
    #[serde(default = "default_reportable")]
    pub reportable: bool,

    #[serde(flatten)]
    pub kind: PropertyKind,
}

/// Handler kind with its construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyKind {
    Text,
    Duration {
        #[serde(default)]
        resolution: Resolution,
    },
    Quantity {
        unit: UnitDefinition,
        #[serde(default)]
        data_type: DataType,
    },
}

/// Serialized form of a `Unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    #[serde(default)]
    pub symbol: String,

    #[serde(default = "default_factor")]
    pub factor: Decimal,
}

impl UnitDefinition {
    pub fn build(&self) -> Result<Unit> {
        Unit::new(self.symbol.clone(), self.factor.clone())
    }
}

/// Rule implementations a profile can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ClosedCaption,
}

/// One rule record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub key: String,

    pub rule: RuleKind,

    #[serde(default)]
    pub override_existing: bool,
}

impl PropertyEntry {
    fn info(&self) -> PropertyInfo {
        let mut info = PropertyInfo::new(self.source.clone());
        if let Some(description) = &self.description {
            info = info.with_description(description.clone());
        }
        if self.private {
            info = info.private();
        }
        if !self.reportable {
            info = info.unreported();
        }
        info
    }

    /// Construct the handler this entry describes
    pub fn build_handler(&self) -> Result<Box<dyn AnyProperty>> {
        let info = self.info();
        let handler: Box<dyn AnyProperty> = match &self.kind {
            PropertyKind::Text => Box::new(TextProperty::new(info)),
            PropertyKind::Duration { resolution } => {
                Box::new(DurationProperty::new(info).with_resolution(*resolution))
            }
            PropertyKind::Quantity { unit, data_type } => {
                Box::new(QuantityProperty::new(info, unit.build()?).with_data_type(*data_type))
            }
        };
        Ok(handler)
    }
}

impl RuleEntry {
    /// Construct the rule this entry describes
    pub fn build_rule(&self) -> Box<dyn AnyRule> {
        match self.rule {
            RuleKind::ClosedCaption => Box::new(ClosedCaptionRule::new()),
        }
    }
}

impl TrackProfile {
    /// Decode a profile from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a normalizer; property keys must be unique
    pub fn build(&self) -> Result<TrackNormalizer> {
        let mut seen = HashSet::new();
        let mut normalizer = TrackNormalizer::new();

        for entry in &self.properties {
            if !seen.insert(entry.key.as_str()) {
                return Err(PropertyError::DuplicateKey(entry.key.clone()));
            }
            normalizer.push_property(entry.key.clone(), entry.build_handler()?);
        }
        for entry in &self.rules {
            normalizer.push_rule(entry.key.clone(), entry.build_rule(), entry.override_existing);
        }

        debug!(
            "Built normalizer with {} properties and {} rules",
            self.properties.len(),
            self.rules.len()
        );
        Ok(normalizer)
    }
}

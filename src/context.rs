/*!
 * Per-track diagnostic sink.
 *
 * A `Context` lives for one track's normalization pass. Handlers append a
 * `Report` for every value they could not interpret; nothing reads domain
 * data back out of it. It is not synchronized: one context per track.
 */

use serde::Serialize;

/// One unparseable field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Description of the property that rejected the value
    pub property: String,

    /// Raw value in text form
    pub value: String,

    /// Track the value came from, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
}

/// Diagnostic context for a single track
#[derive(Debug, Clone, Default)]
pub struct Context {
    track: Option<String>,
    reports: Vec<Report>,
}

impl Context {
    /// Create a context with no track identifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context whose reports are tagged with `track`
    pub fn for_track(track: impl Into<String>) -> Self {
        Self {
            track: Some(track.into()),
            reports: Vec::new(),
        }
    }

    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    /// Append a report for `property`
    pub fn record(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.reports.push(Report {
            property: property.into(),
            value: value.into(),
            track: self.track.clone(),
        });
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Reports filed against one property
    pub fn reports_for<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a Report> + 'a {
        self.reports.iter().filter(move |r| r.property == property)
    }

    /// True when no value has been reported
    pub fn is_clean(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn into_reports(self) -> Vec<Report> {
        self.reports
    }
}

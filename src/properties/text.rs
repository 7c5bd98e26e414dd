//! Text property: trimmed free text such as track titles.

use super::{Property, PropertyInfo};
use crate::context::Context;
use crate::value::RawValue;

/// Handler passing text through; blank values are absent, never reported
#[derive(Debug, Clone)]
pub struct TextProperty {
    info: PropertyInfo,
}

impl TextProperty {
    pub fn new(info: impl Into<PropertyInfo>) -> Self {
        Self { info: info.into() }
    }
}

impl Property for TextProperty {
    type Output = String;

    fn info(&self) -> &PropertyInfo {
        &self.info
    }

    fn handle(&self, value: &RawValue, _context: &mut Context) -> Option<String> {
        let text = value.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

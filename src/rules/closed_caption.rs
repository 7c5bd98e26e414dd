/*!
 * Closed caption detection for subtitle tracks.
 *
 * Inspection tools expose caption channels as `CC1`..`CC4` either in a
 * dedicated field or in the track title.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::Rule;
use crate::context::Context;
use crate::track::PropertyMap;

// @const: Caption channel as a whole word, e.g. "CC1"
static CLOSED_CAPTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcc\d\b").unwrap());

/// Private property holding the tool's closed caption label
pub const CLOSED_CAPTION_FIELD: &str = "_closed_caption";

/// Public property holding the track title
pub const NAME_FIELD: &str = "name";

/// Yields `Some(true)` on caption evidence, `None` otherwise (never `false`)
#[derive(Debug, Clone)]
pub struct ClosedCaptionRule {
    name: String,
}

impl ClosedCaptionRule {
    pub fn new() -> Self {
        Self {
            name: "closed caption".to_string(),
        }
    }

    /// True when `text` names a caption channel
    pub fn matches(text: &str) -> bool {
        CLOSED_CAPTION_REGEX.is_match(text)
    }
}

impl Default for ClosedCaptionRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ClosedCaptionRule {
    type Output = bool;

    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        props: &PropertyMap,
        pv_props: &PropertyMap,
        _context: &mut Context,
    ) -> Option<bool> {
        let candidates = [pv_props.get_text(CLOSED_CAPTION_FIELD), props.get_text(NAME_FIELD)];

        let hit = candidates
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty() && Self::matches(text))?;
        debug!("{} matched {:?}", self.name, hit);
        Some(true)
    }
}

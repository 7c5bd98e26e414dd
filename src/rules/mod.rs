/*!
 * Rules derive facts from properties that are already normalized.
 *
 * A rule never transforms a raw value. It inspects the public property map
 * together with the private (rule-only) map, and either contributes a value
 * or yields nothing when it has no evidence.
 *
 * - `closed_caption`: flags closed caption subtitle tracks
 */

use std::fmt;

use crate::context::Context;
use crate::track::{PropertyMap, PropertyValue};

pub mod closed_caption;

pub use closed_caption::ClosedCaptionRule;

/// Contract every rule implements
pub trait Rule {
    /// Fact produced when the rule applies
    type Output: Into<PropertyValue>;

    fn name(&self) -> &str;

    /// Evaluate over normalized `props` and private `pv_props`
    fn execute(
        &self,
        props: &PropertyMap,
        pv_props: &PropertyMap,
        context: &mut Context,
    ) -> Option<Self::Output>;
}

/// Object-safe view of a `Rule`
pub trait AnyRule: fmt::Debug + Send + Sync {
    fn rule_name(&self) -> &str;

    fn evaluate(
        &self,
        props: &PropertyMap,
        pv_props: &PropertyMap,
        context: &mut Context,
    ) -> Option<PropertyValue>;
}

impl<R> AnyRule for R
where
    R: Rule + fmt::Debug + Send + Sync,
{
    fn rule_name(&self) -> &str {
        self.name()
    }

    fn evaluate(
        &self,
        props: &PropertyMap,
        pv_props: &PropertyMap,
        context: &mut Context,
    ) -> Option<PropertyValue> {
        self.execute(props, pv_props, context).map(Into::into)
    }
}

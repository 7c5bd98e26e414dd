/*!
 * Tests for the closed caption rule
 */

use trackfacts::{ClosedCaptionRule, Context, PropertyMap, Rule};

fn execute(props: &PropertyMap, pv_props: &PropertyMap) -> Option<bool> {
    let mut context = Context::new();
    let result = ClosedCaptionRule::new().execute(props, pv_props, &mut context);
    assert!(context.is_clean());
    result
}

#[test]
fn test_closedCaption_nameWithChannel_shouldBeTrue() {
    let props = PropertyMap::from_iter([("name", "Show CC1")]);
    assert_eq!(execute(&props, &PropertyMap::new()), Some(true));
}

#[test]
fn test_closedCaption_nameWithoutChannel_shouldBeAbsentNotFalse() {
    let props = PropertyMap::from_iter([("name", "Show")]);
    assert_eq!(execute(&props, &PropertyMap::new()), None);
}

#[test]
fn test_closedCaption_privateField_shouldBeTrue() {
    let pv_props = PropertyMap::from_iter([("_closed_caption", "cc2")]);
    assert_eq!(execute(&PropertyMap::new(), &pv_props), Some(true));
}

#[test]
fn test_closedCaption_caseVariants_shouldAllMatch() {
    for name in ["CC1", "cc1", "Cc1", "cC4", "[CC3] English"] {
        let props = PropertyMap::from_iter([("name", name)]);
        assert_eq!(execute(&props, &PropertyMap::new()), Some(true), "{}", name);
    }
}

#[test]
fn test_closedCaption_nonWordMatches_shouldBeAbsent() {
    for name in ["ccc1", "cc12", "CCx", "acc1", "cc_1"] {
        let props = PropertyMap::from_iter([("name", name)]);
        assert_eq!(execute(&props, &PropertyMap::new()), None, "{}", name);
    }
}

#[test]
fn test_closedCaption_nonTextName_shouldBeAbsent() {
    let props = PropertyMap::from_iter([("name", true)]);
    assert_eq!(execute(&props, &PropertyMap::new()), None);
}

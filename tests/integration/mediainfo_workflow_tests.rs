/*!
 * End-to-end normalization of MediaInfo JSON tracks
 */

use std::time::Duration;

use anyhow::Result;
use trackfacts::{
    ClosedCaptionRule, Context, DataType, Decimal, DurationProperty, Number, PropertyInfo,
    QuantityProperty, RawTrack, Resolution, TextProperty, TrackNormalizer, Unit,
};

use crate::common;

fn audio_normalizer() -> Result<TrackNormalizer> {
    Ok(TrackNormalizer::new()
        .with_property(
            "duration",
            DurationProperty::new("Duration").with_resolution(Resolution::SECOND),
        )
        .with_property(
            "sampling_rate",
            QuantityProperty::new(
                PropertyInfo::new("SamplingRate").with_description("sampling rate"),
                Unit::base("Hz"),
            ),
        )
        .with_property(
            "bit_rate",
            QuantityProperty::new(
                PropertyInfo::new("BitRate").with_description("bit rate"),
                Unit::new("kbps", "0.001".parse::<Decimal>()?)?,
            ),
        )
        .with_property("channels", QuantityProperty::new("Channels", Unit::base(""))))
}

fn subtitle_normalizer() -> TrackNormalizer {
    TrackNormalizer::new()
        .with_property(
            "duration",
            DurationProperty::new("Duration").with_resolution(Resolution::SECOND),
        )
        .with_property("name", TextProperty::new("Title"))
        .with_property(
            "_closed_caption",
            TextProperty::new(PropertyInfo::new("ClosedCaption").private()),
        )
        .with_rule("closed_caption", ClosedCaptionRule::new())
}

#[test]
fn test_audioTrack_withUnknownBitRate_shouldReportAndKeepOtherFields() -> Result<()> {
    common::init_logging();
    let tracks = common::mediainfo_tracks("mediainfo_sample.json")?;
    let audio = common::track_of_type(&tracks, "Audio").ok_or_else(|| anyhow::anyhow!("no audio"))?;

    let raw = RawTrack::from_json(audio)?;
    let mut context = Context::for_track("Audio");
    let props = audio_normalizer()?.normalize(&raw, &mut context);

    assert_eq!(props.get_duration("duration"), Some(Duration::from_micros(5_423_424_000)));
    assert_eq!(
        props.get_quantity("sampling_rate").map(|q| &q.value),
        Some(&Number::Integer(48000))
    );
    assert_eq!(props.get_quantity("channels").map(|q| &q.value), Some(&Number::Integer(6)));
    assert_eq!(props.get("bit_rate"), None);

    assert_eq!(context.reports().len(), 1);
    let report = &context.reports()[0];
    assert_eq!(report.property, "bit rate");
    assert_eq!(report.value, "unknown");
    assert_eq!(report.track.as_deref(), Some("Audio"));
    Ok(())
}

#[test]
fn test_videoTrack_withLongFraction_shouldTruncateToMicros() -> Result<()> {
    let tracks = common::mediainfo_tracks("mediainfo_sample.json")?;
    let video = common::track_of_type(&tracks, "Video").ok_or_else(|| anyhow::anyhow!("no video"))?;

    let normalizer = TrackNormalizer::new()
        .with_property(
            "duration",
            DurationProperty::new("Duration").with_resolution(Resolution::SECOND),
        )
        .with_property(
            "frame_rate",
            QuantityProperty::new("FrameRate", Unit::base("fps")).with_data_type(DataType::Decimal),
        )
        .with_property(
            "bit_rate",
            QuantityProperty::new("BitRate", Unit::new("kbps", "0.001".parse()?)?),
        );
    let mut context = Context::new();
    let props = normalizer.normalize(&RawTrack::from_json(video)?, &mut context);

    assert_eq!(props.get_duration("duration"), Some(Duration::from_micros(5_423_417_000)));
    assert_eq!(
        props.get_quantity("frame_rate").map(|q| q.to_string()),
        Some("23.976 fps".to_string())
    );
    assert_eq!(
        props.get_quantity("bit_rate").map(|q| q.to_string()),
        Some("2468 kbps".to_string())
    );
    assert!(context.is_clean());
    Ok(())
}

#[test]
fn test_subtitleTracks_shouldDistinguishCaptionsFromUnknown() -> Result<()> {
    common::init_logging();
    let tracks = common::mediainfo_tracks("mediainfo_sample.json")?;
    let normalizer = subtitle_normalizer();

    let mut results = Vec::new();
    for track in tracks.iter().filter(|t| t["@type"] == "Text") {
        let order = track["@typeorder"].as_str().unwrap_or("?");
        let mut context = Context::for_track(format!("Text #{}", order));
        let props = normalizer.normalize(&RawTrack::from_json(track)?, &mut context);
        results.push((props, context));
    }

    let (cc_props, cc_context) = &results[0];
    assert_eq!(cc_props.get_bool("closed_caption"), Some(true));
    assert_eq!(
        cc_props.get_duration("duration"),
        Some(Duration::from_secs(5420) + Duration::from_micros(123_456))
    );
    assert!(cc_context.is_clean());

    let (sdh_props, sdh_context) = &results[1];
    assert_eq!(sdh_props.get("closed_caption"), None);
    assert_eq!(sdh_props.get_text("name"), Some("English SDH"));
    assert_eq!(sdh_context.reports().len(), 1);
    assert_eq!(sdh_context.reports()[0].track.as_deref(), Some("Text #2"));
    Ok(())
}

#[test]
fn test_normalizedTrack_shouldSerializeForOutput() -> Result<()> {
    let raw = RawTrack::from_iter([("Duration", "1.5"), ("Title", "Signs CC1")]);
    let props = subtitle_normalizer().normalize(&raw, &mut Context::new());

    let json = serde_json::to_value(&props)?;
    assert_eq!(
        json,
        serde_json::json!({
            "closed_caption": true,
            "duration": "0:00:01.500000",
            "name": "Signs CC1"
        })
    );
    Ok(())
}

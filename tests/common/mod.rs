/*!
 * Common test utilities for the trackfacts test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde_json::Value;

/// Route library logs to the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Helper to get the absolute path to a test resource
pub fn test_resource_path(relative_path: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("resources");
    path.push(relative_path);
    path
}

/// Reads a test resource as text
pub fn read_resource(relative_path: &str) -> Result<String> {
    Ok(fs::read_to_string(test_resource_path(relative_path))?)
}

/// Tracks of a MediaInfo `--Output=JSON` document
pub fn mediainfo_tracks(relative_path: &str) -> Result<Vec<Value>> {
    let document: Value = serde_json::from_str(&read_resource(relative_path)?)?;
    let tracks = document["media"]["track"]
        .as_array()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("no tracks in {}", relative_path))?;
    Ok(tracks)
}

/// First track of the given `@type`
pub fn track_of_type<'a>(tracks: &'a [Value], track_type: &str) -> Option<&'a Value> {
    tracks.iter().find(|t| t["@type"] == track_type)
}

//! # Utility Functions

/// Returns the current Unix timestamp in milliseconds.
///
/// Cooldowns and check-in ids are keyed on this value. A clock set before the
/// Unix epoch reads as zero.
pub fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Parses a JSON array of spawn entities, as exported by the map client.
pub fn entities_from_json(json: &str) -> Result<Vec<crate::SpawnEntity>, crate::GeoError> {
    Ok(serde_json::from_str(json)?)
}

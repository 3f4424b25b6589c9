//! Browser persistence for editor settings.

use crate::models::EditorSettings;

const SETTINGS_KEY: &str = "wayfinder_admin.settings";

fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or("No window available")?
        .local_storage()
        .map_err(|e| format!("Local storage unavailable: {e:?}"))?
        .ok_or_else(|| "Local storage disabled".to_string())
}

/// Parse stored settings, falling back to defaults for anything missing
///
/// # Errors
///
/// Returns an error if the stored JSON cannot be parsed
pub fn parse_settings(json: Option<&str>) -> Result<EditorSettings, String> {
    let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
        return Ok(EditorSettings::default());
    };

    serde_json::from_str::<EditorSettings>(json)
        .map(EditorSettings::sanitized)
        .map_err(|e| format!("Failed to parse settings: {e}"))
}

/// Load editor settings from local storage
///
/// # Errors
///
/// Returns an error if storage is unavailable or the stored value is corrupt
pub fn load_settings() -> Result<EditorSettings, String> {
    let storage = local_storage()?;
    let stored = storage
        .get_item(SETTINGS_KEY)
        .map_err(|e| format!("Failed to read settings: {e:?}"))?;
    parse_settings(stored.as_deref())
}

/// Load settings, logging and falling back to defaults on failure
#[must_use]
pub fn load_settings_or_default() -> EditorSettings {
    load_settings().unwrap_or_else(|err| {
        crate::log_warn!("{}; using default settings", err);
        EditorSettings::default()
    })
}

/// Save editor settings to local storage
///
/// # Errors
///
/// Returns an error if the settings cannot be serialized or written
pub fn save_settings(settings: &EditorSettings) -> Result<(), String> {
    let json = serde_json::to_string(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    local_storage()?
        .set_item(SETTINGS_KEY, &json)
        .map_err(|e| format!("Failed to save settings: {e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HitPolicy;

    #[test]
    fn test_missing_settings_use_defaults() {
        assert_eq!(parse_settings(None), Ok(EditorSettings::default()));
        assert_eq!(parse_settings(Some("  ")), Ok(EditorSettings::default()));
    }

    #[test]
    fn test_stored_settings_are_sanitized() {
        let parsed = parse_settings(Some(r#"{"hit_tolerance_px": 0, "hit_policy": "nearest"}"#))
            .expect("valid settings");
        assert_eq!(parsed.hit_tolerance_px, 20.0);
        assert_eq!(parsed.hit_policy, HitPolicy::Nearest);
    }

    #[test]
    fn test_corrupt_settings_error() {
        let err = parse_settings(Some("{not json")).expect_err("corrupt json");
        assert!(err.starts_with("Failed to parse settings"));
    }
}

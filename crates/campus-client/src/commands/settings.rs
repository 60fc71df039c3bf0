//! Display preferences: theme and UI language.

use tracing::{info, warn};

use campus_shared::constants::SETTINGS_KEY;
use campus_store::kv::{load_json, save_json};
use campus_store::ProfileSettings;

use crate::error::CommandError;
use crate::events::{emit_event, AppEvent};
use crate::state::{lock, SharedState};

/// Persisted settings, or light theme + Arabic when none (or unreadable).
pub fn get_settings(state: &SharedState) -> Result<ProfileSettings, CommandError> {
    let guard = lock(state)?;
    match load_json::<ProfileSettings>(guard.storage.as_ref(), SETTINGS_KEY) {
        Ok(settings) => Ok(settings.unwrap_or_default()),
        Err(e) => {
            warn!(error = %e, "Ignoring unreadable settings record");
            Ok(ProfileSettings::default())
        }
    }
}

/// Overwrite the settings record wholesale.
pub fn update_settings(state: &SharedState, settings: ProfileSettings) -> Result<ProfileSettings, CommandError> {
    let mut guard = lock(state)?;
    let st = &mut *guard;
    save_json(st.storage.as_mut(), SETTINGS_KEY, &settings)?;
    emit_event(&st.events, AppEvent::SettingsChanged(settings));

    info!(dark_mode = settings.is_dark_mode, language = settings.language.code(), "Settings updated");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use campus_shared::types::Language;

    use super::*;
    use crate::testing::shared_state;

    #[test]
    fn defaults_to_light_arabic() {
        let state = shared_state();
        let settings = get_settings(&state).unwrap();
        assert!(!settings.is_dark_mode);
        assert_eq!(settings.language, Language::Ar);
    }

    #[test]
    fn update_overwrites_record() {
        let state = shared_state();
        let wanted = ProfileSettings {
            is_dark_mode: true,
            language: Language::Fr,
        };
        update_settings(&state, wanted).unwrap();
        assert_eq!(get_settings(&state).unwrap(), wanted);

        let raw = lock(&state).unwrap().storage.get(SETTINGS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"isDarkMode\":true"));
    }

    #[test]
    fn corrupt_record_reads_as_default() {
        let state = shared_state();
        lock(&state).unwrap().storage.set(SETTINGS_KEY, "not json").unwrap();
        assert_eq!(get_settings(&state).unwrap(), ProfileSettings::default());
    }
}

use std::sync::Arc;
use tokio::sync::RwLock;

use finhub_core::bus::{Bus, BusEventDef};
use finhub_store::PreferenceStore;
use finhub_types::{ThemeMode, ThemePreference};

use crate::palette::Palette;

/// Published whenever the effective theme may have changed.
pub static THEME_CHANGED_EVENT: BusEventDef = BusEventDef::new("theme.changed");

pub const THEME_PREFERENCE_KEY: &str = "theme.preference";

// Ambient scheme assumed until the host pushes a real signal.
const DEFAULT_SYSTEM_SCHEME: ThemeMode = ThemeMode::Dark;

struct ThemeState {
    preference: ThemePreference,
    system_scheme: ThemeMode,
}

/// Owns the theme preference. The effective mode is derived from preference
/// plus the ambient system scheme on every read and never stored.
#[derive(Clone)]
pub struct ThemeController {
    state: Arc<RwLock<ThemeState>>,
    store: Arc<PreferenceStore>,
    bus: Option<Arc<Bus>>,
}

impl ThemeController {
    pub fn new(store: Arc<PreferenceStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ThemeState {
                preference: ThemePreference::default(),
                system_scheme: DEFAULT_SYSTEM_SCHEME,
            })),
            store,
            bus: None,
        }
    }

    pub fn with_bus(mut self, bus: Arc<Bus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Reads the persisted preference once at startup. Absent or unparsable
    /// values leave the default (`System`) in place.
    pub async fn load(&self) {
        let Some(stored) = self.store.get(THEME_PREFERENCE_KEY).await else {
            return;
        };
        match ThemePreference::parse(&stored) {
            Some(preference) => {
                let mut state = self.state.write().await;
                state.preference = preference;
            }
            None => {
                tracing::warn!(value = %stored, "ignoring unrecognized stored theme preference");
            }
        }
    }

    pub async fn preference(&self) -> ThemePreference {
        self.state.read().await.preference
    }

    /// The resolved light/dark value: the explicit preference, or the
    /// ambient system scheme when the preference is `System`.
    pub async fn effective_mode(&self) -> ThemeMode {
        let state = self.state.read().await;
        resolve(state.preference, state.system_scheme)
    }

    pub async fn palette(&self) -> &'static Palette {
        Palette::for_mode(self.effective_mode().await)
    }

    /// Applies a new preference. The in-memory value and the change event are
    /// effective immediately; persistence is best-effort and a write failure
    /// never reverts the change.
    pub async fn set_preference(&self, preference: ThemePreference) {
        let mode = {
            let mut state = self.state.write().await;
            state.preference = preference;
            resolve(state.preference, state.system_scheme)
        };
        self.publish_changed(preference, mode);

        self.store
            .set(THEME_PREFERENCE_KEY, preference.as_str())
            .await;
    }

    /// Host push of the ambient light/dark signal. Only observable (and only
    /// announced) when the preference is `System`.
    pub async fn set_system_scheme(&self, scheme: ThemeMode) {
        let changed = {
            let mut state = self.state.write().await;
            state.system_scheme = scheme;
            state.preference == ThemePreference::System
        };
        if changed {
            self.publish_changed(ThemePreference::System, scheme);
        }
    }

    fn publish_changed(&self, preference: ThemePreference, mode: ThemeMode) {
        if let Some(bus) = &self.bus {
            bus.publish(
                &THEME_CHANGED_EVENT,
                serde_json::json!({
                    "preference": preference,
                    "mode": mode,
                }),
            );
        }
    }
}

fn resolve(preference: ThemePreference, system_scheme: ThemeMode) -> ThemeMode {
    match preference {
        ThemePreference::Light => ThemeMode::Light,
        ThemePreference::Dark => ThemeMode::Dark,
        ThemePreference::System => system_scheme,
    }
}

use anyhow::{Context, Result};
use gloo::storage::{LocalStorage, Storage};
use log::warn;
use shared::{PreferencesStore, Session};

const TOKEN_KEY: &str = "token";
const USER_KEY: &str = "user";

/// Preferences backed by the browser's local storage
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalPreferences;

impl PreferencesStore for LocalPreferences {
    fn read(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn write(&self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            warn!("Could not persist preference '{}'", key);
        }
    }
}

/// Token and operator identity kept between page loads
pub struct SessionStore;

impl SessionStore {
    pub fn load() -> Option<Session> {
        let session: Session = LocalStorage::get(USER_KEY).ok()?;
        // The token is also kept on its own under the legacy key
        match LocalStorage::get::<String>(TOKEN_KEY) {
            Ok(token) if token == session.token => Some(session),
            _ => None,
        }
    }

    pub fn save(session: &Session) -> Result<()> {
        LocalStorage::set(TOKEN_KEY, &session.token).context("storing session token")?;
        LocalStorage::set(USER_KEY, session).context("storing session user")?;
        Ok(())
    }

    pub fn clear() {
        LocalStorage::delete(TOKEN_KEY);
        LocalStorage::delete(USER_KEY);
    }

    pub fn token() -> Option<String> {
        LocalStorage::get::<String>(TOKEN_KEY).ok()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use shared::preferences::ColumnLayout;
    use shared::Role;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn column_layout_survives_reload() {
        let store = LocalPreferences;
        let mut layout = ColumnLayout::load(&store, "columns.wasm-test", &["a", "b"]);
        layout.toggle("a");
        layout.save(&store);

        let restored = ColumnLayout::load(&store, "columns.wasm-test", &["a", "b"]);
        assert_eq!(restored.visible(), vec!["b"]);
    }

    #[wasm_bindgen_test]
    fn session_round_trip() {
        let session = Session {
            token: "tok".to_string(),
            email: "admin@parques.mx".to_string(),
            name: "Admin".to_string(),
            role: Role::Admin,
        };
        SessionStore::save(&session).unwrap();
        assert_eq!(SessionStore::load(), Some(session));

        SessionStore::clear();
        assert_eq!(SessionStore::load(), None);
    }
}

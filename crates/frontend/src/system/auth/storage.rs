use crate::shared::state::table_settings_store::{SessionStorageBackend, SettingsBackend};

/// sessionStorage key under which the identity provider leaves the bearer token
pub const ACCESS_TOKEN_KEY: &str = "KEYCLOAK_TOKEN";

/// Token stored under [`ACCESS_TOKEN_KEY`]; an empty value counts as signed out
pub fn read_access_token(backend: &dyn SettingsBackend) -> Option<String> {
    backend.get(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Get access token from sessionStorage
///
/// Signing in and refreshing are handled by the identity provider; this side
/// only reads what it stored.
pub fn get_access_token() -> Option<String> {
    read_access_token(&SessionStorageBackend::new()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::table_settings_store::MemoryBackend;

    #[test]
    fn test_token_read_from_identity_provider_key() {
        let backend = MemoryBackend::default();
        assert_eq!(read_access_token(&backend), None);

        backend.set("auth_access_token", "wrong-key");
        assert_eq!(read_access_token(&backend), None);

        backend.set(ACCESS_TOKEN_KEY, "eyJhbGciOi");
        assert_eq!(read_access_token(&backend), Some("eyJhbGciOi".to_string()));
    }

    #[test]
    fn test_empty_token_is_signed_out() {
        let backend = MemoryBackend::default();
        backend.set(ACCESS_TOKEN_KEY, "");
        assert_eq!(read_access_token(&backend), None);
    }
}

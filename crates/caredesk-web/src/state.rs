//! Application state management

use crate::session::SessionStore;
use caredesk_core::{Config, Result};
use caredesk_remote::{AuthClient, RemoteClient};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for the hosted backend's data API
    pub remote: RemoteClient,
    /// Client for the hosted auth service
    pub auth: AuthClient,
    /// Active admin sessions
    pub sessions: SessionStore,
}

impl AppState {
    /// Create new application state from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let remote = RemoteClient::from_config(&config.remote)?;
        let auth = AuthClient::new(&config.remote.base_url, &config.remote.api_key);
        let sessions = SessionStore::new(config.auth.session_ttl_minutes);

        Ok(Self {
            config,
            remote,
            auth,
            sessions,
        })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn test_appstate_new() {
        let config = Config::default();
        let state = AppState::new(config.clone()).unwrap();

        assert_eq!(state.config.server.port, config.server.port);
        assert!(state.sessions.is_empty());
    }

    #[test]
    fn test_appstate_clone_shares_sessions() {
        let state = AppState::new(Config::default()).unwrap();
        let clone = state.clone();

        let id = state.sessions.create(crate::session::AdminSession {
            access_token: "t".to_string(),
            user_id: "u".to_string(),
            email: "e@example.com".to_string(),
            created_at: chrono::Utc::now(),
        });

        assert!(clone.sessions.get(&id).is_some());
    }
}

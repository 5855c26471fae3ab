//! In-memory admin sessions keyed by a browser cookie

use caredesk_core::config::AuthConfig;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;

/// An authenticated admin session
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Backend bearer token for this admin
    pub access_token: String,
    /// Authenticated user id
    pub user_id: String,
    /// Authenticated email
    pub email: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

/// Concurrent store of active sessions
///
/// One active admin per browser tab; sessions expire after the configured
/// TTL and expired lookups behave exactly like missing ones.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, AdminSession>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store with the given session lifetime
    #[must_use]
    pub fn new(ttl_minutes: u64) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl: Duration::minutes(i64::try_from(ttl_minutes).unwrap_or(i64::MAX)),
        }
    }

    /// Store a session and return its new id
    #[must_use]
    pub fn create(&self, session: AdminSession) -> String {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        self.sessions.insert(id.clone(), session);
        id
    }

    /// Look up a session; expired sessions are removed and treated as absent
    #[must_use]
    pub fn get(&self, id: &str) -> Option<AdminSession> {
        let session = self.sessions.get(id)?.clone();
        if Utc::now() - session.created_at > self.ttl {
            self.sessions.remove(id);
            return None;
        }
        Some(session)
    }

    /// Remove a session
    pub fn remove(&self, id: &str) {
        self.sessions.remove(id);
    }

    /// Number of live entries (expired ones may still be counted)
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Extract a named cookie from a Cookie header value
#[must_use]
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// Extract a named cookie from request headers
#[must_use]
pub fn cookie_from_headers(headers: &axum::http::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| cookie_value(header, name))
        .map(String::from)
}

/// Build a Set-Cookie value for a session id
#[must_use]
pub fn session_cookie(config: &AuthConfig, id: &str) -> String {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    format!(
        "{}={id}; Path=/; HttpOnly; SameSite=Lax{secure}",
        config.cookie_name
    )
}

/// Build a Set-Cookie value that clears the session cookie
#[must_use]
pub fn clear_session_cookie(config: &AuthConfig) -> String {
    format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.cookie_name
    )
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_session() -> AdminSession {
        AdminSession {
            access_token: "jwt-token".to_string(),
            user_id: "user-1".to_string(),
            email: "admin@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_and_get_round_trip() {
        let store = SessionStore::new(60);
        let id = store.create(sample_session());

        assert_eq!(id.len(), 32);

        let session = store.get(&id).unwrap();
        assert_eq!(session.email, "admin@example.com");
        assert_eq!(session.access_token, "jwt-token");
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let store = SessionStore::new(60);
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_expired_session_is_removed() {
        let store = SessionStore::new(10);
        let mut session = sample_session();
        session.created_at = Utc::now() - Duration::minutes(11);
        let id = store.create(session);

        assert!(store.get(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_drops_session() {
        let store = SessionStore::new(60);
        let id = store.create(sample_session());

        store.remove(&id);
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let store = SessionStore::new(60);
        let first = store.create(sample_session());
        let second = store.create(sample_session());

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_cookie_value_parsing() {
        let header = "caredesk_theme=dark; caredesk_session=abc123; other=1";

        assert_eq!(cookie_value(header, "caredesk_session"), Some("abc123"));
        assert_eq!(cookie_value(header, "caredesk_theme"), Some("dark"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_value_handles_whitespace() {
        let header = "  a=1 ;  b=2";
        assert_eq!(cookie_value(header, "b"), Some("2"));
    }

    #[test]
    fn test_session_cookie_format() {
        let config = AuthConfig {
            session_ttl_minutes: 60,
            cookie_name: "caredesk_session".to_string(),
            cookie_secure: false,
        };

        let cookie = session_cookie(&config, "abc123");
        assert_eq!(cookie, "caredesk_session=abc123; Path=/; HttpOnly; SameSite=Lax");

        let secure_config = AuthConfig {
            cookie_secure: true,
            ..config.clone()
        };
        assert!(session_cookie(&secure_config, "abc123").ends_with("; Secure"));

        let cleared = clear_session_cookie(&config);
        assert!(cleared.contains("Max-Age=0"));
    }
}

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Session;

/// In-memory admin sessions.
///
/// Login matches the configured placeholder credentials and hands out a random
/// bearer token. Sessions live until logout or until their TTL runs out. An
/// expired session is dropped when it is looked up or on the next login.
pub struct SessionService {
    config: AuthConfig,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        self.login_at(username, password, Utc::now()).await
    }

    pub(crate) async fn login_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<Session> {
        if username != self.config.admin_username || password != self.config.admin_password {
            tracing::warn!("Rejected login attempt for '{}'", username);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let expires_at = chrono::Duration::from_std(self.config.session_ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::Internal("Session TTL out of range".to_string()))?;

        let session = Session {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: now,
            expires_at,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        if sessions.len() < before {
            tracing::debug!("Dropped {} expired session(s)", before - sessions.len());
        }
        sessions.insert(session.token.clone(), session.clone());
        drop(sessions);

        tracing::info!("Admin '{}' signed in", session.username);
        Ok(session)
    }

    pub async fn resolve(&self, token: &str) -> Option<Session> {
        self.resolve_at(token, Utc::now()).await
    }

    pub(crate) async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> Option<Session> {
        let session = self.sessions.read().await.get(token).cloned()?;
        if !session.is_expired_at(now) {
            return Some(session);
        }

        let mut sessions = self.sessions.write().await;
        // Another request may have replaced or removed it in between
        if sessions.get(token).is_some_and(|s| s.is_expired_at(now)) {
            sessions.remove(token);
            tracing::debug!("Session for '{}' expired", session.username);
        }
        None
    }

    /// Ends the session; returns whether a session was actually removed
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        if let Some(session) = &removed {
            tracing::info!("Admin '{}' signed out", session.username);
        }
        removed.is_some()
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

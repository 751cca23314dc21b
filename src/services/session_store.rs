use crate::error::ApiError;
use crate::models::{LimitsConfig, Session, SessionId, SessionSettings, SourceImage};
use async_trait::async_trait;
use brick_mosaic::Conversion;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Trait for conversion session storage
///
/// Every mutation replaces whole values under the write lock; builds run
/// outside the store and are committed with [`commit_conversion`].
///
/// [`commit_conversion`]: SessionStore::commit_conversion
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create an empty session with the given settings.
    ///
    /// Idle sessions are swept first; at capacity the least recently
    /// updated session is evicted.
    async fn create(&self, settings: SessionSettings) -> Result<Session, ApiError>;

    /// Snapshot of a session
    async fn get(&self, id: &SessionId) -> Result<Session, ApiError>;

    /// Store a new source image, dropping any mosaic built from the old one
    async fn set_source(&self, id: &SessionId, source: SourceImage) -> Result<Session, ApiError>;

    /// Drop the image and mosaic, keeping settings
    async fn reset(&self, id: &SessionId) -> Result<Session, ApiError>;

    /// Replace the settings
    async fn update_settings(
        &self,
        id: &SessionId,
        settings: SessionSettings,
    ) -> Result<Session, ApiError>;

    /// Install a conversion built from `built_from` at `grid_width`.
    ///
    /// Other settings are left as they are now. Fails with [`ApiError::Stale`] if the source image was replaced or
    /// removed while the build was running.
    async fn commit_conversion(
        &self,
        id: &SessionId,
        built_from: &SourceImage,
        grid_width: u32,
        conversion: Arc<Conversion>,
    ) -> Result<Session, ApiError>;

    /// Delete a session, returning whether it existed
    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError>;

    /// Number of live sessions
    async fn count(&self) -> usize;
}

/// In-memory session storage
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    max_sessions: usize,
    idle_ttl: chrono::Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        let limits = LimitsConfig::default();
        Self::with_limits(limits.max_sessions, Duration::from_secs(limits.session_idle_secs))
    }

    /// Store holding at most `max_sessions`, dropping sessions idle longer than `idle_ttl`
    pub fn with_limits(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
            idle_ttl: chrono::Duration::from_std(idle_ttl)
                .unwrap_or_else(|_| chrono::Duration::weeks(52 * 100)),
        }
    }

    /// Make room for one more session
    fn evict(&self, sessions: &mut HashMap<SessionId, Session>) {
        let cutoff = chrono::Utc::now()
            .checked_sub_signed(self.idle_ttl)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);
        let before = sessions.len();
        sessions.retain(|_, session| session.updated_at >= cutoff);
        let expired = before - sessions.len();
        if expired > 0 {
            tracing::debug!(expired, "Dropped idle sessions");
        }

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .values()
                .min_by_key(|session| session.updated_at)
                .map(|session| session.id.clone());
            let Some(id) = oldest else { break };
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Evicted least recently used session");
        }
    }

    async fn modify<F>(&self, id: &SessionId, f: F) -> Result<Session, ApiError>
    where
        F: FnOnce(&mut Session) -> Result<(), ApiError> + Send,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;
        f(session)?;
        session.touch();
        Ok(session.clone())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, settings: SessionSettings) -> Result<Session, ApiError> {
        let mut sessions = self.sessions.write().await;
        self.evict(&mut sessions);
        let mut id = SessionId::generate();
        while sessions.contains_key(&id) {
            id = SessionId::generate();
        }
        let session = Session::new(id.clone(), settings);
        sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn get(&self, id: &SessionId) -> Result<Session, ApiError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
    }

    async fn set_source(&self, id: &SessionId, source: SourceImage) -> Result<Session, ApiError> {
        self.modify(id, move |session| {
            session.source = Some(source);
            session.conversion = None;
            Ok(())
        })
        .await
    }

    async fn reset(&self, id: &SessionId) -> Result<Session, ApiError> {
        self.modify(id, |session| {
            session.reset();
            Ok(())
        })
        .await
    }

    async fn update_settings(
        &self,
        id: &SessionId,
        settings: SessionSettings,
    ) -> Result<Session, ApiError> {
        self.modify(id, move |session| {
            session.settings = settings;
            Ok(())
        })
        .await
    }

    async fn commit_conversion(
        &self,
        id: &SessionId,
        built_from: &SourceImage,
        grid_width: u32,
        conversion: Arc<Conversion>,
    ) -> Result<Session, ApiError> {
        let pixels = built_from.pixels.clone();
        self.modify(id, move |session| {
            let current = session.source.as_ref().ok_or(ApiError::Stale)?;
            if !Arc::ptr_eq(&current.pixels, &pixels) {
                return Err(ApiError::Stale);
            }
            session.settings.grid_width = grid_width;
            session.conversion = Some(conversion);
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

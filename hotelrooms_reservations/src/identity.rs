use std::collections::HashMap;

use tokio::sync::watch;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Session {
    pub email: String,
}

#[derive(Debug, Clone, thiserror::Error, Eq, PartialEq)]
pub enum IdentityError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No user signed in")]
    NotSignedIn,
}

#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError>;

    async fn sign_out(&self) -> Result<(), IdentityError>;

    /// Receiver holding the current session, updated on every sign in and sign out
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

/// Follows the session of a provider between `init` and `teardown`
pub struct SessionObserver {
    receiver: Option<watch::Receiver<Option<Session>>>,
    initial_emitted: bool,
}

impl SessionObserver {
    pub fn init(provider: &dyn IdentityProvider) -> Self {
        Self {
            receiver: Some(provider.subscribe()),
            initial_emitted: false,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.receiver
            .as_ref()
            .and_then(|receiver| receiver.borrow().clone())
    }

    /// First call yields the session at subscription time, later calls wait for a change.
    /// Returns None once torn down or when the provider is gone.
    pub async fn next(&mut self) -> Option<Option<Session>> {
        let receiver = self.receiver.as_mut()?;
        if !self.initial_emitted {
            self.initial_emitted = true;
            return Some(receiver.borrow_and_update().clone());
        }
        receiver.changed().await.ok()?;
        Some(receiver.borrow_and_update().clone())
    }

    pub fn teardown(&mut self) {
        self.receiver = None;
    }
}

/// Provider with a fixed credential table
pub struct InMemoryIdentityProvider {
    credentials: HashMap<String, String>,
    session: watch::Sender<Option<Session>>,
}

impl InMemoryIdentityProvider {
    pub fn new(credentials: HashMap<String, String>) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            credentials,
            session,
        }
    }
}

#[async_trait::async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, IdentityError> {
        match self.credentials.get(email) {
            Some(expected) if expected == password => {
                let session = Session {
                    email: email.to_string(),
                };
                self.session.send_replace(Some(session.clone()));
                tracing::info!("User {} signed in", email);
                Ok(session)
            }
            _ => Err(IdentityError::InvalidCredentials),
        }
    }

    async fn sign_out(&self) -> Result<(), IdentityError> {
        match self.session.send_replace(None) {
            Some(session) => {
                tracing::info!("User {} signed out", session.email);
                Ok(())
            }
            None => Err(IdentityError::NotSignedIn),
        }
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.session.subscribe()
    }
}

#[cfg(test)]
mod identity_tests {
    use super::*;

    fn provider() -> InMemoryIdentityProvider {
        InMemoryIdentityProvider::new(HashMap::from([(
            "admin@hotel.com".to_string(),
            "secret".to_string(),
        )]))
    }

    #[tokio::test]
    async fn observer_emits_initial_session_then_changes() {
        let provider = provider();
        let mut observer = SessionObserver::init(&provider);

        assert_eq!(observer.next().await, Some(None));

        provider.sign_in("admin@hotel.com", "secret").await.unwrap();
        assert_eq!(
            observer.next().await,
            Some(Some(Session {
                email: "admin@hotel.com".to_string()
            }))
        );
        assert_eq!(observer.current().map(|s| s.email).as_deref(), Some("admin@hotel.com"));

        provider.sign_out().await.unwrap();
        assert_eq!(observer.next().await, Some(None));

        observer.teardown();
        assert_eq!(observer.next().await, None);
        assert_eq!(observer.current(), None);
    }

    #[tokio::test]
    async fn late_observer_starts_from_current_session() {
        let provider = provider();
        provider.sign_in("admin@hotel.com", "secret").await.unwrap();

        let mut observer = SessionObserver::init(&provider);
        assert_eq!(
            observer.next().await,
            Some(Some(Session {
                email: "admin@hotel.com".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn rejects_wrong_credentials() {
        let provider = provider();
        assert_eq!(
            provider.sign_in("admin@hotel.com", "wrong").await,
            Err(IdentityError::InvalidCredentials)
        );
        assert_eq!(
            provider.sign_in("nobody@hotel.com", "secret").await,
            Err(IdentityError::InvalidCredentials)
        );
        assert_eq!(provider.sign_out().await, Err(IdentityError::NotSignedIn));
    }
}

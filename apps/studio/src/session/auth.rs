use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::Identity;
use crate::session::persist::{self, BlobStore};

pub const AUTH_STORAGE_KEY: &str = "auth-storage";

/// Persisted shape: `{"user": ..., "isAuthenticated": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthBlob {
    #[serde(default)]
    user: Option<Identity>,
    #[serde(default)]
    is_authenticated: bool,
}

/// Who is signed in, if anyone. Independent of the resume session.
///
/// Credentials are not checked here; sign-in simply records the identity the
/// caller vouches for.
pub struct AuthSession {
    identity: Option<Identity>,
    store: Arc<dyn BlobStore>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            identity: None,
            store,
        }
    }

    pub fn rehydrate(store: Arc<dyn BlobStore>) -> Self {
        let identity = match persist::load::<AuthBlob>(store.as_ref(), AUTH_STORAGE_KEY) {
            Ok(Some(blob)) => blob.user,
            Ok(None) => None,
            Err(e) => {
                warn!("Discarding unreadable auth state: {e}");
                None
            }
        };
        Self { identity, store }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    pub fn sign_in(&mut self, identity: Identity) -> &Identity {
        info!("Signed in as {}", identity.email);
        self.write_through(Some(&identity));
        self.identity.insert(identity)
    }

    /// Email sign-in; the display name defaults to the address's local part.
    pub fn login(&mut self, email: &str) -> &Identity {
        let name = email.split('@').next().unwrap_or(email);
        self.sign_in(Identity::new(email, name))
    }

    pub fn signup(&mut self, email: &str, name: &str) -> &Identity {
        self.sign_in(Identity::new(email, name))
    }

    /// Sign-in vouched for by an identity provider, which also supplies the avatar.
    pub fn login_with_provider(&mut self, email: &str, name: &str, avatar_url: &str) -> &Identity {
        self.sign_in(Identity::new(email, name).with_avatar(avatar_url))
    }

    pub fn logout(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!("Signed out {}", identity.email);
        }
        self.write_through(None);
    }

    fn write_through(&self, user: Option<&Identity>) {
        let blob = AuthBlob {
            user: user.cloned(),
            is_authenticated: user.is_some(),
        };
        if let Err(e) = persist::save(self.store.as_ref(), AUTH_STORAGE_KEY, &blob) {
            warn!("Failed to persist auth state: {e}");
        }
    }
}

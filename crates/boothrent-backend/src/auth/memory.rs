//! In-memory auth provider.
//!
//! Keeps an account list and one current session. Sign-up also writes the
//! business profile through the document store, so a freshly created
//! account lands with its profile already in place.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    AuthError, AuthErrorCode, AuthGateway, AuthStateCallback, AuthUser, Credentials,
    SignUpRequest,
};
use crate::repository::{locked, BusinessStore, ListenerSet, Subscription};

struct Account {
    uid: String,
    email: String,
    password: String,
}

pub struct InMemoryAuth {
    accounts: Mutex<Vec<Account>>,
    session: Mutex<Option<AuthUser>>,
    listeners: ListenerSet<(), AuthStateCallback>,
    profiles: Arc<dyn BusinessStore>,
    id_seq: AtomicU64,
}

fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

impl InMemoryAuth {
    pub fn new(profiles: Arc<dyn BusinessStore>) -> Self {
        InMemoryAuth {
            accounts: Mutex::new(Vec::new()),
            session: Mutex::new(None),
            listeners: ListenerSet::new(),
            profiles,
            id_seq: AtomicU64::new(0),
        }
    }

    /// Registers an account with a fixed uid, without signing anyone in.
    /// Used to provision the demo tenant at startup.
    pub fn seed_account(&self, uid: &str, email: &str, password: &str) {
        locked(&self.accounts).push(Account {
            uid: uid.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        });
    }

    fn set_session(&self, user: Option<AuthUser>) {
        *locked(&self.session) = user;
        self.notify();
    }

    fn notify(&self) {
        let current = locked(&self.session).clone();
        for listener in self.listeners.snapshot_for(&()) {
            listener(current.clone());
        }
    }

    fn find_uid(&self, email: &str) -> Option<String> {
        locked(&self.accounts)
            .iter()
            .find(|account| account.email.eq_ignore_ascii_case(email))
            .map(|account| account.uid.clone())
    }
}

#[async_trait]
impl AuthGateway for InMemoryAuth {
    fn listen(&self, on_change: AuthStateCallback) -> Subscription {
        let sub = self.listeners.insert((), Arc::clone(&on_change));
        on_change(locked(&self.session).clone());
        sub
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<AuthUser, AuthError> {
        let email = request.email.trim().to_string();
        if !is_well_formed_email(&email) {
            return Err(AuthError::new(AuthErrorCode::InvalidEmail));
        }
        if request.password.len() < 6 {
            return Err(AuthError::new(AuthErrorCode::WeakPassword));
        }
        if self.find_uid(&email).is_some() {
            return Err(AuthError::new(AuthErrorCode::EmailAlreadyInUse));
        }

        let uid = format!("u_{}", self.id_seq.fetch_add(1, Ordering::Relaxed) + 1);
        locked(&self.accounts).push(Account {
            uid: uid.clone(),
            email: email.clone(),
            password: request.password,
        });

        self.profiles
            .create_profile(&uid, request.business_profile)
            .await
            .map_err(|_| AuthError::new(AuthErrorCode::Other))?;

        let user = AuthUser { uid, email };
        self.set_session(Some(user.clone()));
        Ok(user)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthUser, AuthError> {
        let email = credentials.email.trim();
        let uid = locked(&self.accounts)
            .iter()
            .find(|account| {
                account.email.eq_ignore_ascii_case(email)
                    && account.password == credentials.password
            })
            .map(|account| account.uid.clone());
        let Some(uid) = uid else {
            return Err(AuthError::new(AuthErrorCode::InvalidCredential));
        };

        let user = AuthUser {
            uid,
            email: email.to_string(),
        };
        self.set_session(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.set_session(None);
        Ok(())
    }
}

use cfg_if::cfg_if;

cfg_if! { if #[cfg(feature = "ssr")] {
    use crate::security::{gen_128bit_base64, gen_hash, verify_hash, HashError};
    use chrono::prelude::*;
    use secrecy::SecretString;
    use std::{
        collections::HashMap,
        sync::{Arc, RwLock},
    };
    use thiserror::Error as ThisError;
}}

/// How long a session cookie stays valid
#[cfg(feature = "ssr")]
pub const SESSION_LIFETIME_DAYS: i64 = 30;

#[cfg(feature = "ssr")]
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum SessionError {
    #[error("login failed")]
    LoginFailed,
    #[error("could not allocate a unique session token")]
    TokenExhausted,
    #[error("session store is unavailable")]
    StoreUnavailable,
}

/// A user known to the in-memory store. Meant for development hosts.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
pub struct MemoryUser {
    pub identity: String,
    password_hash: SecretString,
}

#[cfg(feature = "ssr")]
impl MemoryUser {
    /// Hashes `password`; the plaintext is not kept.
    pub fn new(identity: impl Into<String>, password: &SecretString) -> Result<Self, HashError> {
        Ok(Self {
            identity: identity.into(),
            password_hash: gen_hash(password)?,
        })
    }
}

#[cfg(feature = "ssr")]
#[derive(Debug, Clone)]
struct Session {
    identity: String,
    expires: DateTime<Utc>,
}

#[cfg(feature = "ssr")]
#[derive(Debug, Default)]
struct Store {
    users: HashMap<String, MemoryUser>,
    tokens: HashMap<String, Session>,
    // checked against for unknown identities so they cost as much as known ones
    decoy_hash: Option<SecretString>,
}

/// Session store shared by every request handler.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, Default)]
pub struct MemorySessions {
    store: Arc<RwLock<Store>>,
}

#[cfg(feature = "ssr")]
impl MemorySessions {
    pub fn new(users: impl IntoIterator<Item = MemoryUser>) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.identity.clone(), u))
            .collect();
        let decoy_hash = gen_hash(&SecretString::from(gen_128bit_base64())).ok();
        Self {
            store: Arc::new(RwLock::new(Store {
                users,
                tokens: HashMap::new(),
                decoy_hash,
            })),
        }
    }

    /// Checks the credentials and starts a session, returning its token and
    /// expiry.
    pub fn login(
        &self,
        identity: &str,
        password: &SecretString,
    ) -> Result<(String, DateTime<Utc>), SessionError> {
        // hashing is slow, so verify without holding the lock
        let (user_hash, decoy_hash) = {
            let store = self
                .store
                .read()
                .map_err(|_| SessionError::StoreUnavailable)?;
            (
                store.users.get(identity).map(|u| u.password_hash.clone()),
                store.decoy_hash.clone(),
            )
        };
        let verified = match (user_hash, decoy_hash) {
            (Some(hash), _) => verify_hash(&hash, password),
            (None, Some(decoy)) => verify_hash(&decoy, password).and(Err(HashError::Mismatch)),
            (None, None) => Err(HashError::Mismatch),
        };
        if let Err(e) = verified {
            log::trace!("login rejected for {identity}: {e}");
            return Err(SessionError::LoginFailed);
        }
        let mut store = self
            .store
            .write()
            .map_err(|_| SessionError::StoreUnavailable)?;
        let expires = Utc::now() + chrono::Duration::days(SESSION_LIFETIME_DAYS);
        for _ in 0..5 {
            let token = gen_128bit_base64();
            if store.tokens.contains_key(&token) {
                continue;
            }
            store.tokens.insert(
                token.clone(),
                Session {
                    identity: identity.to_string(),
                    expires,
                },
            );
            log::trace!("session started for {identity}");
            return Ok((token, expires));
        }
        Err(SessionError::TokenExhausted)
    }

    /// Ends the session behind `token`. Unknown tokens are not an error.
    pub fn logout(&self, token: &str) -> Result<(), SessionError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| SessionError::StoreUnavailable)?;
        if let Some(session) = store.tokens.remove(token) {
            log::trace!("session ended for {}", session.identity);
        }
        Ok(())
    }

    /// Ends every session of `identity`, returning how many there were.
    pub fn logout_identity(&self, identity: &str) -> Result<usize, SessionError> {
        let mut store = self
            .store
            .write()
            .map_err(|_| SessionError::StoreUnavailable)?;
        let before = store.tokens.len();
        store.tokens.retain(|_, s| s.identity != identity);
        Ok(before - store.tokens.len())
    }

    /// Identity owning `token`, if the session exists and has not expired.
    pub fn identity(&self, token: &str) -> Result<Option<String>, SessionError> {
        let store = self
            .store
            .read()
            .map_err(|_| SessionError::StoreUnavailable)?;
        Ok(store
            .tokens
            .get(token)
            .filter(|s| s.expires > Utc::now())
            .map(|s| s.identity.clone()))
    }

    #[cfg(test)]
    fn expire_all(&self) {
        let mut store = self.store.write().unwrap();
        for session in store.tokens.values_mut() {
            session.expires = Utc::now() - chrono::Duration::seconds(1);
        }
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use super::*;

    fn store() -> MemorySessions {
        MemorySessions::new([
            MemoryUser::new("alice", &password("wonderland")).unwrap(),
            MemoryUser::new("bob", &password("builder")).unwrap(),
        ])
    }

    fn password(p: &str) -> SecretString {
        SecretString::from(p.to_string())
    }

    #[test]
    fn users_keep_only_a_hash() {
        use secrecy::ExposeSecret;
        let user = MemoryUser::new("alice", &password("wonderland")).unwrap();
        assert!(user.password_hash.expose_secret().starts_with("$argon2"));
        assert!(!user.password_hash.expose_secret().contains("wonderland"));
    }

    #[test]
    fn login_then_logout() {
        let sessions = store();
        let (token, expires) = sessions.login("alice", &password("wonderland")).unwrap();
        assert!(expires > Utc::now());
        assert_eq!(sessions.identity(&token).unwrap().as_deref(), Some("alice"));

        sessions.logout(&token).unwrap();
        assert_eq!(sessions.identity(&token).unwrap(), None);
        // already gone
        sessions.logout(&token).unwrap();
    }

    #[test]
    fn bad_credentials() {
        let sessions = store();
        assert_eq!(
            sessions.login("alice", &password("builder")).unwrap_err(),
            SessionError::LoginFailed
        );
        assert_eq!(
            sessions.login("carol", &password("anything")).unwrap_err(),
            SessionError::LoginFailed
        );
    }

    #[test]
    fn logout_identity_ends_all_sessions() {
        let sessions = store();
        let (a1, _) = sessions.login("alice", &password("wonderland")).unwrap();
        let (a2, _) = sessions.login("alice", &password("wonderland")).unwrap();
        let (b, _) = sessions.login("bob", &password("builder")).unwrap();
        assert_ne!(a1, a2);

        assert_eq!(sessions.logout_identity("alice").unwrap(), 2);
        assert_eq!(sessions.identity(&a1).unwrap(), None);
        assert_eq!(sessions.identity(&a2).unwrap(), None);
        assert_eq!(sessions.identity(&b).unwrap().as_deref(), Some("bob"));
    }

    #[test]
    fn expired_sessions_are_absent() {
        let sessions = store();
        let (token, _) = sessions.login("bob", &password("builder")).unwrap();
        sessions.expire_all();
        assert_eq!(sessions.identity(&token).unwrap(), None);
    }
}

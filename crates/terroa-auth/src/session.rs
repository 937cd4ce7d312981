//! The signed-in user and its durable record.

use crate::policy::LoginPolicy;
use crate::user::{Credentials, User};
use crate::AuthError;
use terroa_cache::{Cache, DurableRecord};
use tracing::{info, warn};

/// Durable key of the signed-in user.
pub const SESSION_KEY: &str = "session.user";

/// Holds at most one signed-in user and mirrors it to durable storage.
#[derive(Debug)]
pub struct SessionStore {
    record: DurableRecord<User>,
    policy: LoginPolicy,
    current: Option<User>,
}

impl SessionStore {
    /// Create an empty session. Call [`SessionStore::rehydrate`] to restore
    /// a previous one.
    pub fn new(cache: Cache, policy: LoginPolicy) -> Self {
        Self {
            record: DurableRecord::new(cache, SESSION_KEY),
            policy,
            current: None,
        }
    }

    /// Restore the user saved by a previous process.
    ///
    /// A missing or unreadable record starts signed out.
    pub fn rehydrate(&mut self) -> Option<&User> {
        self.current = self.record.load();
        match &self.current {
            Some(user) => info!(user_id = %user.id, role = %user.role, "session restored"),
            None => info!("no stored session"),
        }
        self.current.as_ref()
    }

    /// Sign in, replacing any current user, and persist the session.
    pub fn login(&mut self, credentials: &Credentials) -> Result<&User, AuthError> {
        let user = self.policy.sign_in(credentials, &mut rand::thread_rng());
        self.start(user)
    }

    /// One-click administrator login.
    pub fn login_as_admin(&mut self) -> Result<&User, AuthError> {
        let user = self.policy.admin();
        self.start(user)
    }

    fn start(&mut self, user: User) -> Result<&User, AuthError> {
        self.record.save(&user)?;
        info!(user_id = %user.id, role = %user.role, "signed in");
        Ok(&*self.current.insert(user))
    }

    /// Sign out and delete the durable record. Returns the user that was
    /// signed in.
    ///
    /// If the record cannot be deleted the user stays signed in.
    pub fn logout(&mut self) -> Result<Option<User>, AuthError> {
        if let Err(e) = self.record.clear() {
            warn!(error = %e, "failed to delete stored session");
            return Err(e.into());
        }
        let previous = self.current.take();
        if let Some(user) = &previous {
            info!(user_id = %user.id, "signed out");
        }
        Ok(previous)
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(User::is_admin)
    }

    /// The current user, if it is the administrator.
    pub fn require_admin(&self) -> Result<&User, AuthError> {
        match &self.current {
            Some(user) if user.is_admin() => Ok(user),
            Some(_) => Err(AuthError::InsufficientPermissions),
            None => Err(AuthError::NotAuthenticated),
        }
    }

    pub fn policy(&self) -> &LoginPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;
    use std::sync::Arc;
    use terroa_cache::{CacheError, FileStore, KvStore, MemoryStore};

    fn store() -> (Cache, SessionStore) {
        let cache = Cache::in_memory();
        let session = SessionStore::new(cache.clone(), LoginPolicy::default());
        (cache, session)
    }

    #[test]
    fn test_login_persists_user() {
        let (cache, mut session) = store();
        session
            .login(&Credentials::new("admin@terroa.com", "x"))
            .unwrap();
        assert!(session.is_admin());

        let stored: Option<User> = cache.get(SESSION_KEY).unwrap();
        assert_eq!(stored.map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn test_rehydrate_restores_admin() {
        let dir = tempfile::tempdir().unwrap();
        let open = || Cache::new(Arc::new(FileStore::open(dir.path()).unwrap()));

        let mut first = SessionStore::new(open(), LoginPolicy::default());
        first.login_as_admin().unwrap();

        let mut second = SessionStore::new(open(), LoginPolicy::default());
        assert!(second.current().is_none());
        let user = second.rehydrate().unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.id.as_str(), "admin-001");
    }

    #[test]
    fn test_rehydrate_tolerates_malformed_record() {
        let (cache, mut session) = store();
        cache.store().set(SESSION_KEY, b"{\"id\": 42").unwrap();
        assert!(session.rehydrate().is_none());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_logout_clears_record() {
        let (cache, mut session) = store();
        session.login(&Credentials::new("c@x.com", "x")).unwrap();

        let previous = session.logout().unwrap();
        assert_eq!(previous.map(|u| u.role), Some(Role::User));
        assert!(!session.is_authenticated());
        assert!(!cache.exists(SESSION_KEY).unwrap());

        // Signing out twice is harmless.
        assert_eq!(session.logout().unwrap(), None);
    }

    struct StuckStore(MemoryStore);

    impl KvStore for StuckStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.0.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
            self.0.set(key, value)
        }

        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::StoreError("disk unavailable".to_string()))
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            self.0.keys()
        }
    }

    #[test]
    fn test_failed_logout_keeps_user() {
        let cache = Cache::new(Arc::new(StuckStore(MemoryStore::new())));
        let mut session = SessionStore::new(cache.clone(), LoginPolicy::default());
        session.login_as_admin().unwrap();

        assert!(matches!(session.logout(), Err(AuthError::Cache(_))));
        assert!(session.is_admin());

        let mut restarted = SessionStore::new(cache, LoginPolicy::default());
        assert_eq!(restarted.rehydrate().map(|u| u.is_admin()), Some(true));
    }

    #[test]
    fn test_require_admin() {
        let (_, mut session) = store();
        assert!(matches!(
            session.require_admin(),
            Err(AuthError::NotAuthenticated)
        ));

        session.login(&Credentials::new("c@x.com", "x")).unwrap();
        assert!(matches!(
            session.require_admin(),
            Err(AuthError::InsufficientPermissions)
        ));

        session.login_as_admin().unwrap();
        assert!(session.require_admin().is_ok());
    }
}

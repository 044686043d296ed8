// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// The identity of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auth {
    /// Identifier compared against an event's creator.
    pub user_id: String,

    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
}

type Observer = Arc<dyn Fn(Option<&Auth>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    auth: Option<Auth>,
    observers: Vec<(u64, Observer)>,
    next_id: u64,
}

/// Shared, observable identity. Clones share the same state.
#[derive(Clone, Default)]
pub struct AuthContext {
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("AuthContext")
            .field("user_id", &inner.auth.as_ref().map(|a| &a.user_id))
            .field("observers", &inner.observers.len())
            .finish()
    }
}

impl AuthContext {
    /// Creates a context, optionally already logged in.
    pub fn new(auth: Option<Auth>) -> Self {
        let context = Self::default();
        context.lock().auth = auth;
        context
    }

    /// The current identity, if logged in.
    pub fn get_auth(&self) -> Option<Auth> {
        self.lock().auth.clone()
    }

    /// The current user id, if logged in.
    pub fn user_id(&self) -> Option<String> {
        self.lock().auth.as_ref().map(|a| a.user_id.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock().auth.is_some()
    }

    /// Replaces the identity, notifying observers if it changed.
    pub fn login(&self, auth: Auth) {
        self.set(Some(auth));
    }

    /// Clears the identity, notifying observers if it changed.
    pub fn logout(&self) {
        self.set(None);
    }

    /// Registers an observer called after every identity change.
    ///
    /// The observer stays registered while the returned guard is alive.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(Option<&Auth>) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    fn set(&self, auth: Option<Auth>) {
        let observers: Vec<Observer> = {
            let mut inner = self.lock();
            if inner.auth == auth {
                return;
            }
            inner.auth = auth.clone();
            inner.observers.iter().map(|(_, o)| o.clone()).collect()
        };

        tracing::debug!(logged_in = auth.is_some(), "identity changed");
        for observer in observers {
            observer(auth.as_ref());
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        lock(&self.inner)
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    // Observers run without the lock held, so a poisoned lock still holds
    // consistent data.
    inner.lock().unwrap_or_else(|e| e.into_inner())
}

/// Keeps an identity observer registered; unregisters it on drop.
#[must_use = "the observer is removed when the subscription is dropped"]
pub struct Subscription {
    id: u64,
    inner: Weak<Mutex<Inner>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).observers.retain(|(id, _)| *id != self.id);
        }
    }
}

//! In-memory account store for development and testing.
//!
//! Mirrors the Postgres store's observable behaviour: sequential ids,
//! a unique email constraint, and [`Error::NotFound`] on missing rows.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::store::AccountStore;
use super::{User, UserCreate};
use crate::prelude::*;

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<i64, User>,
}

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    rows: RwLock<Rows>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Rows> {
        self.rows.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Rows> {
        self.rows.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn modify<F>(&self, target: i64, change: F) -> Result<User>
    where
        F: FnOnce(&mut User),
    {
        let mut rows = self.write();
        let user = rows.by_id.get_mut(&target).ok_or(Error::NotFound)?;
        change(user);
        Ok(user.clone())
    }
}

impl AccountStore for MemoryAccountStore {
    fn create(&self, user: UserCreate) -> Result<User> {
        let mut rows = self.write();
        if rows.by_id.values().any(|row| row.email == user.email) {
            return Err(Error::EmailTaken);
        }

        rows.next_id += 1;
        let row = User {
            id: rows.next_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            password: user.password,
            hash_version: user.hash_version,
            image_url: user.image_url,
            created_at: Utc::now(),
        };
        rows.by_id.insert(row.id, row.clone());
        Ok(row)
    }

    fn fetch_by_id(&self, target: i64) -> Result<User> {
        self.read().by_id.get(&target).cloned().ok_or(Error::NotFound)
    }

    fn fetch_by_email(&self, target: &str) -> Result<User> {
        self.read()
            .by_id
            .values()
            .find(|row| row.email == target)
            .cloned()
            .ok_or(Error::NotFound)
    }

    fn fetch_all(&self) -> Result<Vec<User>> {
        Ok(self.read().by_id.values().cloned().collect())
    }

    fn update_profile(&self, target: i64, first: &str, last: &str) -> Result<User> {
        self.modify(target, |user| {
            user.first_name = String::from(first);
            user.last_name = String::from(last);
        })
    }

    fn update_role(&self, target: i64, new_role: &str) -> Result<()> {
        self.modify(target, |user| user.role = String::from(new_role))?;
        Ok(())
    }

    fn update_password(&self, target: i64, digest: &str, version: i32) -> Result<()> {
        self.modify(target, |user| {
            user.password = String::from(digest);
            user.hash_version = version;
        })?;
        Ok(())
    }

    fn delete(&self, target: i64) -> Result<()> {
        self.write()
            .by_id
            .remove(&target)
            .map(|_| ())
            .ok_or(Error::NotFound)
    }
}

//! Account store contract and its Postgres implementation.

use diesel::prelude::*;

use super::{User, UserCreate};
use crate::db::connection::DbConnection;
use crate::prelude::*;
use crate::schema::users::dsl::*;

/// Read/write contract the web layer depends on.
///
/// Lookups that match nothing return [`Error::NotFound`]; writes that would
/// duplicate an email return [`Error::EmailTaken`].
pub trait AccountStore: Send + Sync {
    fn create(&self, user: UserCreate) -> Result<User>;
    fn fetch_by_id(&self, target: i64) -> Result<User>;
    /// `target` must already be normalized (trimmed, lower-cased).
    fn fetch_by_email(&self, target: &str) -> Result<User>;
    fn fetch_all(&self) -> Result<Vec<User>>;
    fn update_profile(&self, target: i64, first: &str, last: &str) -> Result<User>;
    fn update_role(&self, target: i64, new_role: &str) -> Result<()>;
    fn update_password(&self, target: i64, digest: &str, version: i32) -> Result<()>;
    fn delete(&self, target: i64) -> Result<()>;
}

impl User {
    /// Returns a query filtered by account ID.
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        users.filter(id.eq(target))
    }
}

fn expect_one(affected: usize) -> Result<()> {
    match affected {
        0 => Err(Error::NotFound),
        _ => Ok(()),
    }
}

impl AccountStore for DbConnection {
    fn create(&self, user: UserCreate) -> Result<User> {
        let conn = &mut self.pool.get()?;

        Ok(diesel::insert_into(users)
            .values(user)
            .returning(User::as_returning())
            .get_result(conn)?)
    }

    fn fetch_by_id(&self, target: i64) -> Result<User> {
        let conn = &mut self.pool.get()?;

        Ok(User::by_id(target)
            .select(User::as_select())
            .get_result(conn)?)
    }

    fn fetch_by_email(&self, target: &str) -> Result<User> {
        let conn = &mut self.pool.get()?;

        Ok(users
            .filter(email.eq(target))
            .select(User::as_select())
            .get_result(conn)?)
    }

    fn fetch_all(&self) -> Result<Vec<User>> {
        let conn = &mut self.pool.get()?;

        Ok(users
            .order(id.asc())
            .select(User::as_select())
            .load(conn)?)
    }

    fn update_profile(&self, target: i64, first: &str, last: &str) -> Result<User> {
        let conn = &mut self.pool.get()?;

        Ok(diesel::update(User::by_id(target))
            .set((first_name.eq(first), last_name.eq(last)))
            .returning(User::as_returning())
            .get_result(conn)?)
    }

    fn update_role(&self, target: i64, new_role: &str) -> Result<()> {
        let conn = &mut self.pool.get()?;

        let affected = diesel::update(User::by_id(target))
            .set(role.eq(new_role))
            .execute(conn)?;
        expect_one(affected)
    }

    fn update_password(&self, target: i64, digest: &str, version: i32) -> Result<()> {
        let conn = &mut self.pool.get()?;

        let affected = diesel::update(User::by_id(target))
            .set((password.eq(digest), hash_version.eq(version)))
            .execute(conn)?;
        expect_one(affected)
    }

    fn delete(&self, target: i64) -> Result<()> {
        let conn = &mut self.pool.get()?;

        let affected = diesel::delete(User::by_id(target)).execute(conn)?;
        expect_one(affected)
    }
}

//! CRUD operations for [`User`] records.

use campus_shared::types::{Role, UserId};

use crate::error::{Result, StoreError};
use crate::models::User;
use crate::registry::Registry;

impl Registry {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a new account.  Fails if any account, of either role, already
    /// uses the email.
    pub fn insert_user(&mut self, user: User) -> Result<User> {
        if self.email_taken(&user.email) {
            return Err(StoreError::DuplicateEmail(user.email));
        }
        tracing::debug!(user_id = %user.id, role = %user.role, "user inserted");
        self.users.push(user.clone());
        Ok(user)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn get_user(&self, id: &UserId) -> Result<User> {
        self.users
            .iter()
            .find(|u| &u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))
    }

    /// Exact email + role match.
    pub fn find_user_by_login(&self, email: &str, role: Role) -> Option<User> {
        self.users
            .iter()
            .find(|u| u.email == email && u.role == role)
            .cloned()
    }

    pub fn email_taken(&self, email: &str) -> bool {
        self.users.iter().any(|u| u.email == email)
    }

    pub fn list_users(&self, role: Option<Role>) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect()
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Replace the record sharing `user.id`.  The email must not belong to
    /// any other account.
    pub fn replace_user(&mut self, user: User) -> Result<User> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == user.id)
            .ok_or_else(|| StoreError::UserNotFound(user.id.clone()))?;
        self.ensure_email_free(&user)?;
        self.users[index] = user.clone();
        Ok(user)
    }

    /// Replace the record sharing `user.id`, or append it when absent.  The
    /// email must not belong to any other account.
    pub fn upsert_user(&mut self, user: User) -> Result<User> {
        self.ensure_email_free(&user)?;
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => *slot = user.clone(),
            None => self.users.push(user.clone()),
        }
        Ok(user)
    }

    fn ensure_email_free(&self, user: &User) -> Result<()> {
        if self.users.iter().any(|u| u.id != user.id && u.email == user.email) {
            return Err(StoreError::DuplicateEmail(user.email.clone()));
        }
        Ok(())
    }

    /// Add `amount` to a user's star counter, treating a missing counter as
    /// zero.
    pub fn credit_stars(&mut self, id: &UserId, amount: u32) -> Result<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;
        user.stars = Some(user.stars.unwrap_or(0).saturating_add(amount));
        Ok(user.clone())
    }

    /// Set a user's wallet balance.
    pub fn set_balance(&mut self, id: &UserId, balance: u64) -> Result<User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| StoreError::UserNotFound(id.clone()))?;
        user.balance = Some(balance);
        Ok(user.clone())
    }
}

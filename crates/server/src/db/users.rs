//! User repository.

use chrono::Utc;
use lustre_core::{Email, UserId};

use crate::models::User;
use crate::store::{Store, StoreError};

fn user_key(email: &Email) -> String {
    format!("user:{}", email.as_str())
}

/// Repository for registered users, keyed by email.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Get a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be read.
    pub fn get(&self, email: &Email) -> Result<Option<User>, StoreError> {
        self.store.get(&user_key(email))
    }

    /// Create a new user with the given profile fields.
    ///
    /// Callers must check for an existing user first; an existing record
    /// would be overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be written.
    pub fn create(
        &self,
        email: &Email,
        name: &str,
        phone: &str,
        delivery_address: &str,
    ) -> Result<User, StoreError> {
        let now = Utc::now();
        let user = User {
            id: UserId::new(self.store.next_id("user")?),
            email: email.clone(),
            name: name.to_owned(),
            phone: phone.to_owned(),
            delivery_address: delivery_address.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.store.set(&user_key(email), &user)?;
        Ok(user)
    }

    /// Update an existing user's profile fields.
    ///
    /// Returns the updated user, or `None` when no user exists for the
    /// email.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be accessed.
    pub fn update_profile(
        &self,
        email: &Email,
        name: &str,
        phone: &str,
        delivery_address: &str,
    ) -> Result<Option<User>, StoreError> {
        let Some(mut user) = self.get(email)? else {
            return Ok(None);
        };
        user.name = name.to_owned();
        user.phone = phone.to_owned();
        user.delivery_address = delivery_address.to_owned();
        user.updated_at = Utc::now();
        self.store.set(&user_key(email), &user)?;
        Ok(Some(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let store = Store::memory();
        let users = UserRepository::new(&store);
        let anna = email("anna@example.com");

        assert!(users.get(&anna).unwrap().is_none());

        let created = users
            .create(&anna, "Anna", "+1234567", "1 Jewel St")
            .unwrap();
        assert_eq!(created.id, UserId::new(1));

        let fetched = users.get(&anna).unwrap().unwrap();
        assert_eq!(fetched.name, "Anna");
        assert_eq!(fetched.email, anna);
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = Store::memory();
        let users = UserRepository::new(&store);
        let first = users.create(&email("a@x.com"), "", "", "").unwrap();
        let second = users.create(&email("b@x.com"), "", "", "").unwrap();
        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));
    }

    #[test]
    fn test_update_profile() {
        let store = Store::memory();
        let users = UserRepository::new(&store);
        let anna = email("anna@example.com");

        assert!(users.update_profile(&anna, "x", "y", "z").unwrap().is_none());

        users.create(&anna, "Anna", "", "").unwrap();
        let updated = users
            .update_profile(&anna, "Anna K", "+7", "2 Gem Ave")
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Anna K");
        assert_eq!(updated.delivery_address, "2 Gem Ave");
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Process-local user store.
///
/// Enforces the same email uniqueness as the `users_email_key` constraint.
/// Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_taken(users: &HashMap<UserId, User>, user: &User) -> bool {
    users
        .values()
        .any(|existing| existing.id != user.id && existing.email == user.email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id.to_string()));
        }
        if email_taken(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PersonName;

    fn user(email: &str) -> User {
        User {
            id: UserId::new(),
            first_name: PersonName::new("Peter".to_string()).unwrap(),
            last_name: PersonName::new("Muster".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$2b$04$placeholder".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("peter@example.com")).await.unwrap();

        let by_id = repository.find_by_id(&created.id).await.unwrap();
        let by_email = repository.find_by_email("peter@example.com").await.unwrap();

        assert_eq!(by_id.unwrap().id, created.id);
        assert_eq!(by_email.unwrap().id, created.id);
        assert!(repository
            .find_by_email("other@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("peter@example.com")).await.unwrap();

        let result = repository.create(user("peter@example.com")).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("peter@example.com")).await.unwrap();
        let mut anna = repository.create(user("anna@example.com")).await.unwrap();

        anna.email = EmailAddress::new("peter@example.com".to_string()).unwrap();
        let result = repository.update(anna).await;

        assert!(matches!(result, Err(UserError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_user() {
        let repository = InMemoryUserRepository::new();
        let ghost = user("ghost@example.com");
        let ghost_id = ghost.id;

        assert!(matches!(
            repository.update(ghost).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            repository.delete(&ghost_id).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_all_newest_first() {
        let repository = InMemoryUserRepository::new();
        let mut older = user("older@example.com");
        older.created_at = Utc::now() - Duration::hours(1);
        repository.create(older).await.unwrap();
        repository.create(user("newer@example.com")).await.unwrap();

        let users = repository.list_all().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email.as_str(), "newer@example.com");
    }
}

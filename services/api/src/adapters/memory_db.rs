//! services/api/src/adapters/memory_db.rs
//!
//! This module contains the in-memory store, the concrete implementation of the
//! `DatabaseService` port from the `core` crate. Records live for the lifetime of
//! the process only.

use async_trait::async_trait;
use chrono::Utc;
use legal_assistant_core::domain::{
    BlogPost, ChatMessage, ContactMessage, Lawyer, LawyerSearch, NewBlogPost, NewChatMessage,
    NewContactMessage, NewLawyer, NewUser, User, UserCredentials,
};
use legal_assistant_core::ports::{DatabaseService, PortError, PortResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::seed;

//=========================================================================================
// Table Storage
//=========================================================================================

/// One entity kind: records keyed by id plus the next id to hand out.
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Assigns the next sequential id and stores the record built from it.
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.rows.values().find(|row| pred(*row))
    }
}

/// Users keep their password hash next to the public record.
#[derive(Debug, Clone)]
struct UserRow {
    user: User,
    password_hash: String,
}

#[derive(Debug, Default)]
struct Tables {
    users: Table<UserRow>,
    lawyers: Table<Lawyer>,
    chat_messages: Table<ChatMessage>,
    blog_posts: Table<BlogPost>,
    contact_messages: Table<ContactMessage>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A memory-resident store that implements the `DatabaseService` port.
///
/// Every write takes the single write lock, so id assignment and unique-key
/// checks are atomic with respect to each other.
#[derive(Clone, Default)]
pub struct MemoryDbAdapter {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDbAdapter {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the sample lawyers and blog posts.
    pub async fn with_seed_data() -> PortResult<Self> {
        let store = Self::new();
        for lawyer in seed::lawyers() {
            store.create_lawyer(lawyer).await?;
        }
        for post in seed::blog_posts() {
            store.create_blog_post(post).await?;
        }
        info!("Seeded in-memory store with sample lawyers and blog posts.");
        Ok(store)
    }

    /// Number of stored chat turns.
    pub async fn chat_message_count(&self) -> usize {
        self.tables.read().await.chat_messages.rows.len()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.rows.len()
    }

    pub async fn contact_message_count(&self) -> usize {
        self.tables.read().await.contact_messages.rows.len()
    }
}

/// Sorts posts newest first; the id breaks ties so the order is stable.
fn newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then(a.id.cmp(&b.id)));
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for MemoryDbAdapter {
    async fn get_user(&self, id: i64) -> PortResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .rows
            .get(&id)
            .map(|row| row.user.clone())
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", id)))
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .find(|row| row.user.email == email)
            .map(|row| row.user.clone())
            .ok_or_else(|| PortError::NotFound(format!("User with email {} not found", email)))
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .find(|row| row.user.username == username)
            .map(|row| row.user.clone())
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", username)))
    }

    async fn create_user(&self, new_user: NewUser) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.find(|row| row.user.email == new_user.email).is_some() {
            return Err(PortError::Conflict(
                "User already exists with this email".to_string(),
            ));
        }
        if tables
            .users
            .find(|row| row.user.username == new_user.username)
            .is_some()
        {
            return Err(PortError::Conflict(
                "User already exists with this username".to_string(),
            ));
        }

        let row = tables.users.insert_with(|id| UserRow {
            user: User {
                id,
                username: new_user.username,
                email: new_user.email,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                phone: new_user.phone,
                preferred_language: new_user.preferred_language,
                created_at: Utc::now(),
            },
            password_hash: new_user.password_hash,
        });
        Ok(row.user)
    }

    async fn get_user_credentials(&self, email: &str) -> PortResult<UserCredentials> {
        let tables = self.tables.read().await;
        tables
            .users
            .find(|row| row.user.email == email)
            .map(|row| UserCredentials {
                user: row.user.clone(),
                password_hash: row.password_hash.clone(),
            })
            .ok_or(PortError::Unauthorized)
    }

    async fn list_lawyers(&self) -> PortResult<Vec<Lawyer>> {
        let tables = self.tables.read().await;
        Ok(tables.lawyers.rows.values().cloned().collect())
    }

    async fn get_lawyer(&self, id: i64) -> PortResult<Lawyer> {
        let tables = self.tables.read().await;
        tables
            .lawyers
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Lawyer {} not found", id)))
    }

    async fn search_lawyers(&self, search: &LawyerSearch) -> PortResult<Vec<Lawyer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .lawyers
            .rows
            .values()
            .filter(|lawyer| search.matches(lawyer))
            .cloned()
            .collect())
    }

    async fn create_lawyer(&self, new_lawyer: NewLawyer) -> PortResult<Lawyer> {
        let mut tables = self.tables.write().await;
        if tables
            .lawyers
            .find(|lawyer| lawyer.email == new_lawyer.email)
            .is_some()
        {
            return Err(PortError::Conflict(
                "A lawyer with this email is already listed".to_string(),
            ));
        }

        Ok(tables.lawyers.insert_with(|id| Lawyer {
            id,
            name: new_lawyer.name,
            email: new_lawyer.email,
            phone: new_lawyer.phone,
            specialization: new_lawyer.specialization,
            location: new_lawyer.location,
            experience: new_lawyer.experience,
            rating: new_lawyer.rating,
            review_count: new_lawyer.review_count,
            bio: new_lawyer.bio,
            languages: new_lawyer.languages,
            verified: new_lawyer.verified,
            created_at: Utc::now(),
        }))
    }

    async fn get_chat_history(&self, user_id: i64) -> PortResult<Vec<ChatMessage>> {
        let tables = self.tables.read().await;
        let mut history: Vec<ChatMessage> = tables
            .chat_messages
            .rows
            .values()
            .filter(|message| message.user_id == Some(user_id))
            .cloned()
            .collect();
        history.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(history)
    }

    async fn create_chat_message(&self, new_message: NewChatMessage) -> PortResult<ChatMessage> {
        let mut tables = self.tables.write().await;
        Ok(tables.chat_messages.insert_with(|id| ChatMessage {
            id,
            user_id: new_message.user_id,
            message: new_message.message,
            response: new_message.response,
            language: new_message.language,
            message_kind: new_message.message_kind,
            created_at: Utc::now(),
        }))
    }

    async fn list_blog_posts(&self) -> PortResult<Vec<BlogPost>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<BlogPost> = tables.blog_posts.rows.values().cloned().collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn list_featured_blog_posts(&self) -> PortResult<Vec<BlogPost>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<BlogPost> = tables
            .blog_posts
            .rows
            .values()
            .filter(|post| post.featured)
            .cloned()
            .collect();
        newest_first(&mut posts);
        Ok(posts)
    }

    async fn get_blog_post(&self, slug: &str) -> PortResult<BlogPost> {
        let tables = self.tables.read().await;
        tables
            .blog_posts
            .find(|post| post.slug == slug)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Blog post {} not found", slug)))
    }

    async fn create_blog_post(&self, new_post: NewBlogPost) -> PortResult<BlogPost> {
        let mut tables = self.tables.write().await;
        if tables.blog_posts.find(|post| post.slug == new_post.slug).is_some() {
            return Err(PortError::Conflict(format!(
                "Slug {} is already taken",
                new_post.slug
            )));
        }

        Ok(tables.blog_posts.insert_with(|id| BlogPost {
            id,
            title: new_post.title,
            slug: new_post.slug,
            excerpt: new_post.excerpt,
            content: new_post.content,
            author: new_post.author,
            author_role: new_post.author_role,
            category: new_post.category,
            featured: new_post.featured,
            published_at: new_post.published_at.unwrap_or_else(Utc::now),
        }))
    }

    async fn create_contact_message(
        &self,
        new_message: NewContactMessage,
    ) -> PortResult<ContactMessage> {
        let mut tables = self.tables.write().await;
        Ok(tables.contact_messages.insert_with(|id| ContactMessage {
            id,
            name: new_message.name,
            email: new_message.email,
            subject: new_message.subject,
            message: new_message.message,
            created_at: Utc::now(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legal_assistant_core::domain::MessageKind;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            phone: None,
            preferred_language: "english".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    fn turn(user_id: Option<i64>, text: &str) -> NewChatMessage {
        NewChatMessage {
            user_id,
            message: text.to_string(),
            response: Some("reply".to_string()),
            language: "english".to_string(),
            message_kind: MessageKind::Text,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_per_entity_kind() {
        let store = MemoryDbAdapter::new();
        let first = store.create_chat_message(turn(None, "a")).await.unwrap();
        let second = store.create_chat_message(turn(None, "a")).await.unwrap();
        let user = store.create_user(new_user("asha", "asha@example.com")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn duplicate_email_or_username_is_a_conflict() {
        let store = MemoryDbAdapter::new();
        store.create_user(new_user("asha", "asha@example.com")).await.unwrap();

        let same_email = store.create_user(new_user("other", "asha@example.com")).await;
        assert!(matches!(same_email, Err(PortError::Conflict(_))));

        let same_username = store.create_user(new_user("asha", "other@example.com")).await;
        assert!(matches!(same_username, Err(PortError::Conflict(_))));

        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_with_one_email_create_one_user() {
        let store = MemoryDbAdapter::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .create_user(new_user(&format!("user{}", i), "shared@example.com"))
                    .await
            }));
        }

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn credentials_lookup_returns_hash() {
        let store = MemoryDbAdapter::new();
        store.create_user(new_user("asha", "asha@example.com")).await.unwrap();

        let creds = store.get_user_credentials("asha@example.com").await.unwrap();
        assert!(creds.password_hash.starts_with("$argon2id$"));
        assert!(matches!(
            store.get_user_credentials("nobody@example.com").await,
            Err(PortError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn chat_history_is_filtered_and_ascending() {
        let store = MemoryDbAdapter::new();
        store.create_chat_message(turn(Some(7), "first")).await.unwrap();
        store.create_chat_message(turn(Some(8), "other user")).await.unwrap();
        store.create_chat_message(turn(Some(7), "second")).await.unwrap();
        store.create_chat_message(turn(None, "anonymous")).await.unwrap();

        let history = store.get_chat_history(7).await.unwrap();
        let texts: Vec<&str> = history.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn seeded_directory_search_applies_filters() {
        let store = MemoryDbAdapter::with_seed_data().await.unwrap();

        let all = store.list_lawyers().await.unwrap();
        assert_eq!(all.len(), 3);

        let senior = store
            .search_lawyers(&LawyerSearch::from_filters(None, None, Some("10+ years")))
            .await
            .unwrap();
        assert!(!senior.is_empty());
        assert!(senior.iter().all(|l| l.experience > 10));

        let junior = store
            .search_lawyers(&LawyerSearch::from_filters(None, None, Some("0-5 years")))
            .await
            .unwrap();
        assert!(junior.iter().all(|l| l.experience <= 5));

        let in_delhi = store
            .search_lawyers(&LawyerSearch::from_filters(Some("delhi"), Some("All Areas"), None))
            .await
            .unwrap();
        assert_eq!(in_delhi.len(), 1);
        assert_eq!(in_delhi[0].name, "Advocate Priya Sharma");
    }

    #[tokio::test]
    async fn featured_posts_are_newest_first() {
        let store = MemoryDbAdapter::with_seed_data().await.unwrap();
        store
            .create_blog_post(NewBlogPost {
                title: "Fresh".to_string(),
                slug: "fresh".to_string(),
                excerpt: "e".to_string(),
                content: "c".to_string(),
                author: "a".to_string(),
                author_role: "r".to_string(),
                category: "Tax Law".to_string(),
                featured: true,
                published_at: None,
            })
            .await
            .unwrap();

        let featured = store.list_featured_blog_posts().await.unwrap();
        assert!(featured.iter().all(|p| p.featured));
        assert_eq!(featured[0].slug, "fresh");
        assert!(featured
            .windows(2)
            .all(|w| w[0].published_at >= w[1].published_at));

        let all = store.list_blog_posts().await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let store = MemoryDbAdapter::new();
        assert!(matches!(store.get_lawyer(42).await, Err(PortError::NotFound(_))));
        assert!(matches!(store.get_blog_post("nope").await, Err(PortError::NotFound(_))));
        assert!(matches!(store.get_user(1).await, Err(PortError::NotFound(_))));
    }
}

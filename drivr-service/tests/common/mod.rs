use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenService;
use chrono::Utc;
use drivr_service::domain::report::errors::ReportError;
use drivr_service::domain::report::models::Report;
use drivr_service::domain::report::models::ReportId;
use drivr_service::domain::report::ports::ReportRepository;
use drivr_service::domain::report::service::ReportService;
use drivr_service::domain::user::errors::UserError;
use drivr_service::domain::user::models::EmailAddress;
use drivr_service::domain::user::models::Pagination;
use drivr_service::domain::user::models::User;
use drivr_service::domain::user::models::UserId;
use drivr_service::domain::user::ports::UserRepository;
use drivr_service::domain::user::service::UserService;
use drivr_service::inbound::http::router::create_router;
use drivr_service::inbound::http::router::AppState;
use tokio::sync::RwLock;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub tokens: TokenService,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_config = TokenConfig::new(TEST_SECRET);
        let authenticator =
            Arc::new(Authenticator::new(&token_config).expect("Failed to build authenticator"));

        let store = Arc::new(InMemoryStore::default());
        let user_repository = Arc::new(InMemoryUserRepository(Arc::clone(&store)));
        let report_repository = Arc::new(InMemoryReportRepository(Arc::clone(&store)));

        let state = AppState {
            user_service: Arc::new(UserService::new(user_repository, PasswordHasher::new())),
            report_service: Arc::new(ReportService::new(report_repository)),
            authenticator: Arc::clone(&authenticator),
        };

        let router = create_router(state, &[]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            authenticator,
            tokens: TokenService::new(&token_config).expect("Failed to build token service"),
        }
    }

    /// Insert a user directly into storage, bypassing registration.
    pub async fn seed_user(
        &self,
        email: &str,
        password: &str,
        is_active: bool,
        is_moderator: bool,
    ) -> User {
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).expect("Invalid test email"),
            password_hash: PasswordHasher::new()
                .hash(password)
                .expect("Failed to hash test password"),
            is_active,
            is_moderator,
            created_at: now,
            updated_at: now,
        };

        self.store
            .users
            .write()
            .await
            .insert(user.id, user.clone());

        user
    }

    /// Mint a valid access token for `user`.
    pub fn token_for(&self, user: &User) -> String {
        self.authenticator
            .issue_token(&user.id.to_string())
            .expect("Failed to issue token")
            .access_token
    }

    /// Submit the login form.
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}

/// Shared tables for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    pub users: RwLock<HashMap<UserId, User>>,
    pub reports: RwLock<HashMap<ReportId, Report>>,
}

pub struct InMemoryUserRepository(Arc<InMemoryStore>);

fn window<T>(items: Vec<T>, pagination: Pagination) -> Vec<T> {
    items
        .into_iter()
        .skip(pagination.skip as usize)
        .take(pagination.limit as usize)
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.0.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.0.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .0
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.0.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(window(users, pagination))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.0.users.write().await;
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        if self.0.users.write().await.remove(id).is_none() {
            return Err(UserError::NotFound(id.to_string()));
        }
        self.0
            .reports
            .write()
            .await
            .retain(|_, report| report.user_id != *id);
        Ok(())
    }
}

pub struct InMemoryReportRepository(Arc<InMemoryStore>);

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn create(&self, report: Report) -> Result<Report, ReportError> {
        self.0
            .reports
            .write()
            .await
            .insert(report.id, report.clone());
        Ok(report)
    }

    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, ReportError> {
        Ok(self.0.reports.read().await.get(id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        pagination: Pagination,
    ) -> Result<Vec<Report>, ReportError> {
        let mut reports: Vec<Report> = self
            .0
            .reports
            .read()
            .await
            .values()
            .filter(|r| r.user_id == *owner)
            .cloned()
            .collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(window(reports, pagination))
    }

    async fn update(&self, report: Report) -> Result<Report, ReportError> {
        match self.0.reports.write().await.get_mut(&report.id) {
            Some(existing) => {
                *existing = report.clone();
                Ok(report)
            }
            None => Err(ReportError::NotFound(report.id.to_string())),
        }
    }

    async fn delete(&self, id: &ReportId) -> Result<(), ReportError> {
        match self.0.reports.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(ReportError::NotFound(id.to_string())),
        }
    }
}

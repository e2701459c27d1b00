#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::HashCost;
use auth::PasswordHasher;
use auth::ResetTokenCodec;
use auth::SessionSettings;
use auth::SessionTokenService;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use portfolio_service::domain::application::models::ApplicationId;
use portfolio_service::domain::application::models::SoftwareApplication;
use portfolio_service::domain::application::ports::ApplicationRepository;
use portfolio_service::domain::application::service::ApplicationService;
use portfolio_service::domain::asset::errors::AssetError;
use portfolio_service::domain::asset::models::Asset;
use portfolio_service::domain::asset::models::AssetFolder;
use portfolio_service::domain::asset::models::UploadedFile;
use portfolio_service::domain::asset::ports::AssetStore;
use portfolio_service::domain::errors::ContentError;
use portfolio_service::domain::message::models::Message;
use portfolio_service::domain::message::models::MessageId;
use portfolio_service::domain::message::ports::MessageRepository;
use portfolio_service::domain::message::service::MessageService;
use portfolio_service::domain::project::models::Project;
use portfolio_service::domain::project::models::ProjectId;
use portfolio_service::domain::project::ports::ProjectRepository;
use portfolio_service::domain::project::service::ProjectService;
use portfolio_service::domain::skill::models::Proficiency;
use portfolio_service::domain::skill::models::Skill;
use portfolio_service::domain::skill::models::SkillId;
use portfolio_service::domain::skill::ports::SkillRepository;
use portfolio_service::domain::skill::service::SkillService;
use portfolio_service::domain::timeline::models::TimelineEntry;
use portfolio_service::domain::timeline::models::TimelineId;
use portfolio_service::domain::timeline::ports::TimelineRepository;
use portfolio_service::domain::timeline::service::TimelineService;
use portfolio_service::domain::user::errors::DeliveryError;
use portfolio_service::domain::user::errors::UserError;
use portfolio_service::domain::user::gate::AuthenticationGate;
use portfolio_service::domain::user::models::EmailAddress;
use portfolio_service::domain::user::models::PasswordField;
use portfolio_service::domain::user::models::User;
use portfolio_service::domain::user::models::UserId;
use portfolio_service::domain::user::models::UserPatch;
use portfolio_service::domain::user::ports::NotificationSender;
use portfolio_service::domain::user::ports::UserRepository;
use portfolio_service::domain::user::service::CredentialService;
use portfolio_service::domain::user::service::CredentialSettings;
use portfolio_service::inbound::http::router::create_router;
use portfolio_service::inbound::http::router::AppState;
use portfolio_service::inbound::http::session_cookie::SessionCookie;
use reqwest::multipart::Form;
use reqwest::multipart::Part;

pub const SESSION_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const DASHBOARD_URL: &str = "http://dashboard.test";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub assets: Arc<FakeAssetStore>,
    pub sessions: Arc<SessionTokenService>,
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

        let users = Arc::new(InMemoryUserRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let assets = Arc::new(FakeAssetStore::default());
        let sessions = Arc::new(SessionTokenService::new(SessionSettings::new(
            SESSION_SECRET,
            Duration::days(7),
        )));

        // Cheap hashing keeps the suite fast
        let hasher = Arc::new(
            PasswordHasher::with_cost(HashCost::new(64, 1, 1)).expect("Failed to build hasher"),
        );

        let credential_service = Arc::new(CredentialService::new(
            Arc::clone(&users),
            Arc::clone(&notifier),
            Arc::clone(&assets),
            CredentialSettings {
                hasher,
                sessions: Arc::clone(&sessions),
                reset_codec: ResetTokenCodec::default(),
                dashboard_url: DASHBOARD_URL.to_string(),
                portfolio_owner: None,
            },
        ));
        let gate = Arc::new(AuthenticationGate::new(
            Arc::clone(&users),
            Arc::clone(&sessions),
        ));

        let state = AppState {
            credential_service,
            gate,
            project_service: Arc::new(ProjectService::new(
                Arc::new(InMemoryProjectRepository::default()),
                Arc::clone(&assets),
            )),
            skill_service: Arc::new(SkillService::new(
                Arc::new(InMemorySkillRepository::default()),
                Arc::clone(&assets),
            )),
            timeline_service: Arc::new(TimelineService::new(Arc::new(
                InMemoryTimelineRepository::default(),
            ))),
            application_service: Arc::new(ApplicationService::new(
                Arc::new(InMemoryApplicationRepository::default()),
                Arc::clone(&assets),
            )),
            message_service: Arc::new(MessageService::new(Arc::new(
                InMemoryMessageRepository::default(),
            ))),
            session_cookie: SessionCookie::new("token"),
        };

        let router = create_router(state, &[]);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            users,
            notifier,
            assets,
            sessions,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.put(path).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.delete(path).bearer_auth(token)
    }

    /// Register a user and return the raw response
    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/user/register")
            .multipart(registration_form(email, password))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register a user and return its session token
    pub async fn register_and_get_token(&self, email: &str, password: &str) -> String {
        let response = self.register(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/user/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn registration_form(email: &str, password: &str) -> Form {
    registration_fields(email, password)
        .part("avatar", file_part("avatar.png", "image/png"))
        .part("resume", file_part("resume.pdf", "application/pdf"))
}

pub fn registration_fields(email: &str, password: &str) -> Form {
    Form::new()
        .text("fullName", "Jane Doe")
        .text("email", email.to_string())
        .text("phone", "+1 555 0100")
        .text("aboutMe", "Backend engineer")
        .text("password", password.to_string())
        .text("portfolioURL", "https://jane.dev")
        .text("githubURL", "https://github.com/jane")
}

pub fn file_part(file_name: &str, mime: &str) -> Part {
    Part::bytes(vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a])
        .file_name(file_name.to_string())
        .mime_str(mime)
        .unwrap()
}

/// Pull a cookie's `name=value` pair out of a response's `Set-Cookie` headers
pub fn set_cookie(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", name)))
        .map(|v| v.to_string())
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Stored record, hash and reset state included
    pub fn stored(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned()
    }

    /// Move a pending reset's expiry into the past
    pub fn expire_reset(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        let user = users
            .values_mut()
            .find(|u| u.email.as_str() == email)
            .unwrap();
        let reset = user.reset.as_mut().unwrap();
        reset.expires_at = Utc::now() - Duration::minutes(1);
    }

    fn project(user: &User, password: PasswordField) -> User {
        let mut user = user.clone();
        if password == PasswordField::Exclude {
            user.password_hash = None;
        }
        user
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
        password: PasswordField,
    ) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(id)
            .map(|u| Self::project(u, password)))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
        password: PasswordField,
    ) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .map(|u| Self::project(u, password)))
    }

    async fn find_by_reset_lookup_token(
        &self,
        lookup_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| {
                u.reset
                    .as_ref()
                    .map(|r| r.lookup_token == lookup_token && r.expires_at > now)
                    .unwrap_or(false)
            })
            .map(|u| Self::project(u, PasswordField::Exclude)))
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &patch.email {
            if users.values().any(|u| u.id != *id && u.email == *email) {
                return Err(UserError::EmailAlreadyExists(email.to_string()));
            }
        }
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound("user not found!".to_string()))?;
        patch.apply_to(user);
        Ok(Self::project(user, PasswordField::Exclude))
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Notifier that records every message; can be switched to fail
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMail>>,
    failing: AtomicBool,
}

impl RecordingNotifier {
    pub fn fail_deliveries(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Secret embedded in the most recent reset link
    pub fn last_reset_secret(&self) -> Option<String> {
        let marker = format!("{}/password/reset/", DASHBOARD_URL);
        self.sent().last().and_then(|mail| {
            mail.body.split(&marker).nth(1).map(|rest| {
                rest.chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .collect()
            })
        })
    }
}

#[async_trait]
impl NotificationSender for RecordingNotifier {
    async fn send(
        &self,
        to: &EmailAddress,
        subject: &str,
        body: &str,
    ) -> Result<(), DeliveryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Asset host stand-in that hands out sequential ids
#[derive(Default)]
pub struct FakeAssetStore {
    uploads: AtomicUsize,
    destroyed: Mutex<Vec<String>>,
}

impl FakeAssetStore {
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssetStore for FakeAssetStore {
    async fn upload(&self, file: UploadedFile, folder: AssetFolder) -> Result<Asset, AssetError> {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let public_id = format!("{}/{}", folder, n);
        Ok(Asset {
            url: format!("https://assets.test/{}/{}", public_id, file.file_name),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AssetError> {
        self.destroyed.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<Vec<Project>>,
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(&self, project: Project) -> Result<Project, ContentError> {
        self.projects.lock().unwrap().push(project.clone());
        Ok(project)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ContentError> {
        Ok(self
            .projects
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Project>, ContentError> {
        Ok(self.projects.lock().unwrap().clone())
    }

    async fn update(&self, project: Project) -> Result<Project, ContentError> {
        let mut projects = self.projects.lock().unwrap();
        let slot = projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or(ContentError::NotFound("Project"))?;
        *slot = project.clone();
        Ok(project)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ContentError> {
        let mut projects = self.projects.lock().unwrap();
        let before = projects.len();
        projects.retain(|p| p.id != *id);
        if projects.len() == before {
            return Err(ContentError::NotFound("Project"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySkillRepository {
    skills: Mutex<Vec<Skill>>,
}

#[async_trait]
impl SkillRepository for InMemorySkillRepository {
    async fn create(&self, skill: Skill) -> Result<Skill, ContentError> {
        self.skills.lock().unwrap().push(skill.clone());
        Ok(skill)
    }

    async fn find_by_id(&self, id: &SkillId) -> Result<Option<Skill>, ContentError> {
        Ok(self
            .skills
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Skill>, ContentError> {
        Ok(self.skills.lock().unwrap().clone())
    }

    async fn update_proficiency(
        &self,
        id: &SkillId,
        proficiency: Proficiency,
    ) -> Result<Skill, ContentError> {
        let mut skills = self.skills.lock().unwrap();
        let skill = skills
            .iter_mut()
            .find(|s| s.id == *id)
            .ok_or(ContentError::NotFound("Skill"))?;
        skill.proficiency = proficiency;
        Ok(skill.clone())
    }

    async fn delete(&self, id: &SkillId) -> Result<(), ContentError> {
        let mut skills = self.skills.lock().unwrap();
        let before = skills.len();
        skills.retain(|s| s.id != *id);
        if skills.len() == before {
            return Err(ContentError::NotFound("Skill"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTimelineRepository {
    entries: Mutex<Vec<TimelineEntry>>,
}

#[async_trait]
impl TimelineRepository for InMemoryTimelineRepository {
    async fn create(&self, entry: TimelineEntry) -> Result<TimelineEntry, ContentError> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn list_all(&self) -> Result<Vec<TimelineEntry>, ContentError> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn delete(&self, id: &TimelineId) -> Result<(), ContentError> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.id != *id);
        if entries.len() == before {
            return Err(ContentError::NotFound("Timeline"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryApplicationRepository {
    applications: Mutex<Vec<SoftwareApplication>>,
}

#[async_trait]
impl ApplicationRepository for InMemoryApplicationRepository {
    async fn create(
        &self,
        application: SoftwareApplication,
    ) -> Result<SoftwareApplication, ContentError> {
        self.applications.lock().unwrap().push(application.clone());
        Ok(application)
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<SoftwareApplication>, ContentError> {
        Ok(self
            .applications
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<SoftwareApplication>, ContentError> {
        Ok(self.applications.lock().unwrap().clone())
    }

    async fn delete(&self, id: &ApplicationId) -> Result<(), ContentError> {
        let mut applications = self.applications.lock().unwrap();
        let before = applications.len();
        applications.retain(|a| a.id != *id);
        if applications.len() == before {
            return Err(ContentError::NotFound("Application"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Mutex<Vec<Message>>,
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, ContentError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list_all(&self) -> Result<Vec<Message>, ContentError> {
        Ok(self.messages.lock().unwrap().clone())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), ContentError> {
        let mut messages = self.messages.lock().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != *id);
        if messages.len() == before {
            return Err(ContentError::NotFound("Message"));
        }
        Ok(())
    }
}

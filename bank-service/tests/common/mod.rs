use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use auth::new_token_maker;
use auth::TokenKind;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use bank_service::app::AppState;
use bank_service::app::Dependencies;
use bank_service::inbound::http::router::create_router;
use bank_service::session::errors::SessionError;
use bank_service::session::models::Session;
use bank_service::session::models::TokenDurations;
use bank_service::session::ports::SessionRepository;
use bank_service::user::errors::UserError;
use bank_service::user::models::User;
use bank_service::user::models::Username;
use bank_service::user::ports::UserRepository;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

pub const SYMMETRIC_KEY: &[u8; 32] = b"test-key-for-token-makers-32byte";

/// User store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Username, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(UserError::UsernameAlreadyExists(
                user.username.as_str().to_string(),
            ));
        }
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.username != user.username && existing.email == user.email)
        {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        match users.get_mut(&user.username) {
            Some(stored) => {
                *stored = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.username.as_str().to_string())),
        }
    }
}

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
    pub async fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions.read().await.get(id).cloned()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: Session) -> Result<Session, SessionError> {
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Session>, SessionError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn block(&self, id: &Uuid) -> Result<Session, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or(SessionError::SessionNotFound(*id))?;
        session.is_blocked = true;
        Ok(session.clone())
    }
}

/// Application wired exactly as in production, over in-memory storage.
pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub sessions: Arc<InMemorySessionRepository>,
}

impl TestApp {
    pub fn new(kind: TokenKind) -> Self {
        Self::with_durations(
            kind,
            TokenDurations::new(Duration::minutes(15), Duration::hours(24))
                .expect("valid durations"),
        )
    }

    pub fn with_durations(kind: TokenKind, durations: TokenDurations) -> Self {
        let sessions = Arc::new(InMemorySessionRepository::default());
        let state = AppState::new(Dependencies {
            user_repository: Arc::new(InMemoryUserRepository::default()),
            session_repository: Arc::clone(&sessions),
            token_maker: new_token_maker(kind, SYMMETRIC_KEY).expect("valid key"),
            durations,
        });
        let router = create_router(state.clone());

        Self {
            state,
            router,
            sessions,
        }
    }

    /// Serve the router on a random local port and return its base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = self
            .router
            .clone()
            .into_make_service_with_connect_info::<SocketAddr>();
        tokio::spawn(async move {
            axum::serve(listener, service).await.expect("Server error");
        });

        address
    }

    /// Send one request through the router and decode the JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder, body).await
    }

    /// Like `request`, with a raw `Authorization` header value.
    pub async fn request_with_authorization(
        &self,
        method: Method,
        uri: &str,
        authorization: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, authorization);
        self.send(builder, body).await
    }

    async fn send(
        &self,
        builder: axum::http::request::Builder,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Failed to parse response")
        };

        (status, json)
    }
}

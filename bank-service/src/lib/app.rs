use std::sync::Arc;

use auth::Authenticator;
use auth::TokenMaker;

use crate::session::models::TokenDurations;
use crate::session::ports::SessionRepository;
use crate::session::ports::SessionServicePort;
use crate::session::service::SessionService;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;
use crate::user::service::UserService;

/// Everything the service needs, named explicitly.
pub struct Dependencies<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    pub user_repository: Arc<UR>,
    pub session_repository: Arc<SR>,
    pub token_maker: Arc<dyn TokenMaker>,
    pub durations: TokenDurations,
}

/// Shared state behind both the HTTP router and the gRPC service.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// The single construction path for both transports.
    pub fn new<UR, SR>(dependencies: Dependencies<UR, SR>) -> Self
    where
        UR: UserRepository,
        SR: SessionRepository,
    {
        let authenticator = Arc::new(Authenticator::new(dependencies.token_maker));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&dependencies.user_repository),
            Arc::clone(&authenticator),
        ));
        let session_service = Arc::new(SessionService::new(
            dependencies.user_repository,
            dependencies.session_repository,
            Arc::clone(&authenticator),
            dependencies.durations,
        ));

        Self {
            user_service,
            session_service,
            authenticator,
        }
    }
}

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::authorization::authorize_user;
use super::authorization::extract_metadata;
use super::handlers::block_session;
use super::handlers::create_user;
use super::handlers::login_user;
use super::handlers::renew_access_token;
use super::handlers::update_user;
use crate::app::AppState;
use crate::proto::simple_bank_server::SimpleBank;
use crate::proto::BlockSessionRequest;
use crate::proto::BlockSessionResponse;
use crate::proto::CreateUserRequest;
use crate::proto::CreateUserResponse;
use crate::proto::LoginUserRequest;
use crate::proto::LoginUserResponse;
use crate::proto::RenewAccessTokenRequest;
use crate::proto::RenewAccessTokenResponse;
use crate::proto::UpdateUserRequest;
use crate::proto::UpdateUserResponse;

pub struct BankGrpcService {
    state: AppState,
}

impl BankGrpcService {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[tonic::async_trait]
impl SimpleBank for BankGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        let response = create_user::create_user(&self.state, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UpdateUserResponse>, Status> {
        let requester = authorize_user(&self.state, request.metadata())?;
        let response =
            update_user::update_user(&self.state, &requester, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login_user(
        &self,
        request: Request<LoginUserRequest>,
    ) -> Result<Response<LoginUserResponse>, Status> {
        let metadata = extract_metadata(request.metadata(), request.remote_addr());
        let response = login_user::login_user(&self.state, metadata, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn renew_access_token(
        &self,
        request: Request<RenewAccessTokenRequest>,
    ) -> Result<Response<RenewAccessTokenResponse>, Status> {
        let response =
            renew_access_token::renew_access_token(&self.state, request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn block_session(
        &self,
        request: Request<BlockSessionRequest>,
    ) -> Result<Response<BlockSessionResponse>, Status> {
        let requester = authorize_user(&self.state, request.metadata())?;
        let response =
            block_session::block_session(&self.state, &requester, request.into_inner()).await?;
        Ok(Response::new(response))
    }
}

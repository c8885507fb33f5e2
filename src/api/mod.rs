//! Collaborator boundary between the flows and the user service.
//!
//! Controllers only see [`AuthApi`]; [`HttpAuthApi`] is the production
//! implementation and tests substitute their own. Each method is one request,
//! with no retries: a failed call is reported and the user resubmits.

mod error;
mod http;
pub mod types;

pub use error::ApiError;
pub use http::{DEFAULT_TIMEOUT, HttpAuthApi};
pub use types::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, ResetPasswordRequest,
    SendResetCodeRequest, Session, UserSummary, VerifyResetCodeRequest,
};

use async_trait::async_trait;

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Emails a reset code. Succeeds only when the service answers 200.
    async fn send_reset_code(&self, request: &SendResetCodeRequest) -> Result<(), ApiError>;

    async fn verify_reset_code(&self, request: &VerifyResetCodeRequest) -> Result<(), ApiError>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError>;

    async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Changes the password of the account `session` belongs to.
    async fn change_password(
        &self,
        session: &Session,
        request: &ChangePasswordRequest,
    ) -> Result<(), ApiError>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scriptable in-memory [`AuthApi`] used by controller tests.

    use super::*;
    use std::{collections::VecDeque, sync::Mutex};
    use tokio::sync::watch;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Call {
        SendResetCode(SendResetCodeRequest),
        VerifyResetCode(VerifyResetCodeRequest),
        ResetPassword(ResetPasswordRequest),
        Register(RegisterRequest),
        Login(LoginRequest),
        ChangePassword {
            access: String,
            request: ChangePasswordRequest,
        },
    }

    /// Every method pops the next scripted result; an empty script succeeds.
    #[derive(Default)]
    pub struct MockApi {
        calls: Mutex<Vec<Call>>,
        script: Mutex<VecDeque<Result<(), ApiError>>>,
        loading_watch: Mutex<Option<watch::Receiver<bool>>>,
        loading_seen: Mutex<Vec<bool>>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_with(error: ApiError) -> Self {
            let api = Self::default();
            api.push_failure(error);
            api
        }

        pub fn push_failure(&self, error: ApiError) {
            if let Ok(mut script) = self.script.lock() {
                script.push_back(Err(error));
            }
        }

        pub fn push_success(&self) {
            if let Ok(mut script) = self.script.lock() {
                script.push_back(Ok(()));
            }
        }

        /// Records the loading flag as seen from inside each call.
        pub fn watch_loading(&self, receiver: watch::Receiver<bool>) {
            if let Ok(mut watched) = self.loading_watch.lock() {
                *watched = Some(receiver);
            }
        }

        pub fn loading_seen(&self) -> Vec<bool> {
            self.loading_seen
                .lock()
                .map(|seen| seen.clone())
                .unwrap_or_default()
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
        }

        fn record(&self, call: Call) -> Result<(), ApiError> {
            if let Ok(watched) = self.loading_watch.lock() {
                if let Some(receiver) = watched.as_ref() {
                    if let Ok(mut seen) = self.loading_seen.lock() {
                        seen.push(*receiver.borrow());
                    }
                }
            }
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
            self.script
                .lock()
                .ok()
                .and_then(|mut script| script.pop_front())
                .unwrap_or(Ok(()))
        }
    }

    pub fn session() -> Session {
        Session {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
            user: UserSummary {
                id: Some(1),
                username: "ada".to_string(),
                email: "ada@example.com".to_string(),
                role: Some("USER".to_string()),
            },
        }
    }

    #[async_trait]
    impl AuthApi for MockApi {
        async fn send_reset_code(&self, request: &SendResetCodeRequest) -> Result<(), ApiError> {
            self.record(Call::SendResetCode(request.clone()))
        }

        async fn verify_reset_code(
            &self,
            request: &VerifyResetCodeRequest,
        ) -> Result<(), ApiError> {
            self.record(Call::VerifyResetCode(request.clone()))
        }

        async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
            self.record(Call::ResetPassword(request.clone()))
        }

        async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, ApiError> {
            self.record(Call::Register(request.clone()))
                .map(|()| session())
        }

        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
            self.record(Call::Login(request.clone())).map(|()| session())
        }

        async fn change_password(
            &self,
            session: &Session,
            request: &ChangePasswordRequest,
        ) -> Result<(), ApiError> {
            self.record(Call::ChangePassword {
                access: session.access.clone(),
                request: request.clone(),
            })
        }
    }
}

//! Authentication service
//!
//! Registration, login for customers/couriers and admins, logout, and the
//! per-request session lookup. Every path that yields an authenticated user
//! goes through the [`AccessGuard`](super::access::AccessGuard) first.

use nutribite_common::AppError;
use nutribite_core::entities::{Customer, NewUser, User, UserType};
use nutribite_core::{DomainError, SessionData};
use tracing::{debug, info, instrument, warn};

use crate::dto::{LoginMethod, LoginRequest, RegisterRequest, SessionResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// A freshly opened session: the cookie value plus the payload for the client
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: String,
    pub response: SessionResponse,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a customer and sign them in
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<IssuedSession> {
        let password_hash = self.ctx.passwords().hash_new(&request.password)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let new_user = NewUser {
            name: request.name.trim().to_string(),
            email: request.email.trim().to_lowercase(),
            phone: request.phone.map(|p| p.trim().to_string()),
            user_type: UserType::Customer,
        };
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;
        self.ctx
            .customer_repo()
            .upsert(&Customer::new(user.id))
            .await?;

        info!(user_id = user.id, "Customer registered");
        self.open_session(&user).await
    }

    /// Customer / courier login
    #[instrument(skip(self, request), fields(method = ?request.login_method))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<IssuedSession> {
        let user = self.authenticate(&request).await?;
        self.ctx.access_guard().admit(&user)?;

        info!(user_id = user.id, "User logged in");
        self.open_session(&user).await
    }

    /// Admin login.
    ///
    /// The ban check runs before the role check and before any session
    /// exists, so a banned admin never receives a cookie.
    #[instrument(skip(self, request), fields(method = ?request.login_method))]
    pub async fn admin_login(&self, request: LoginRequest) -> ServiceResult<IssuedSession> {
        let user = self.authenticate(&request).await?;
        self.ctx.access_guard().admit(&user)?;

        if let Err(e) = self.ctx.access_guard().require_admin(&user) {
            warn!(user_id = user.id, "Admin login refused: not an admin");
            return Err(e);
        }

        info!(user_id = user.id, "Admin logged in");
        self.open_session(&user).await
    }

    /// Destroy the session behind a cookie
    #[instrument(skip(self, session_id))]
    pub async fn logout(&self, session_id: &str) -> ServiceResult<()> {
        self.ctx.session_store().destroy(session_id).await?;
        Ok(())
    }

    /// Resolve a session cookie to its user.
    ///
    /// Store failures, unknown sessions, and users that no longer exist all
    /// yield `Ok(None)`: the request continues unauthenticated. An
    /// effectively banned user yields `Err(banned)`.
    #[instrument(skip(self, session_id))]
    pub async fn resolve_session(&self, session_id: &str) -> ServiceResult<Option<User>> {
        let data = match self.ctx.session_store().get(session_id).await {
            Ok(Some(data)) => data,
            Ok(None) => return Ok(None),
            Err(e) => {
                warn!(error = %e, "Session lookup failed; treating request as anonymous");
                return Ok(None);
            }
        };

        let user = match self.ctx.user_repo().find_by_id(data.user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(user_id = data.user_id, "Session owner no longer exists");
                return Ok(None);
            }
            Err(e) => {
                warn!(user_id = data.user_id, error = %e, "Session user lookup failed");
                return Ok(None);
            }
        };

        self.ctx.access_guard().admit(&user)?;
        Ok(Some(user))
    }

    /// `GET /api/admin/auth/session` for an already resolved user
    pub fn admin_session(&self, user: &User) -> ServiceResult<SessionResponse> {
        self.ctx.access_guard().check(user)?;
        self.ctx.access_guard().require_admin(user)?;
        Ok(SessionResponse::from(user))
    }

    async fn find_account(&self, request: &LoginRequest) -> ServiceResult<Option<User>> {
        let account = request
            .account()
            .ok_or_else(|| ServiceError::validation("Email or identifier is required"))?;

        let user = match request.login_method {
            LoginMethod::Email => self.ctx.user_repo().find_by_email(account).await?,
            LoginMethod::Phone => self.ctx.user_repo().find_by_phone(account).await?,
        };
        Ok(user)
    }

    /// Lookup plus password verification; unknown accounts and wrong
    /// passwords are indistinguishable to the caller
    async fn authenticate(&self, request: &LoginRequest) -> ServiceResult<User> {
        let user = self.find_account(request).await?;

        let stored_hash = match &user {
            Some(user) => self.ctx.user_repo().get_password_hash(user.id).await?,
            None => None,
        };

        self.ctx
            .passwords()
            .check_login(&request.password, stored_hash.as_deref())
            .inspect_err(|_| warn!("Login failed: invalid credentials"))?;

        user.ok_or(ServiceError::App(AppError::InvalidCredentials))
    }

    async fn open_session(&self, user: &User) -> ServiceResult<IssuedSession> {
        let session_id = self
            .ctx
            .session_store()
            .create(&SessionData::new(user.id, user.user_type))
            .await?;

        Ok(IssuedSession {
            session_id,
            response: SessionResponse::from(user),
        })
    }
}

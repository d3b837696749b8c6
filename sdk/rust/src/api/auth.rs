use crate::client::{Auth, Client};
use crate::error::Result;
use crate::models::{
    AdminAuthResponse, AuthResponse, LoginRequest, RegisterRequest, VerifyOtpRequest,
};

impl Client {
    /// `POST /auth/login`. Stores the session when the backend hands one back.
    pub async fn login(&self, request: &LoginRequest) -> Result<Option<AuthResponse>> {
        let response: Option<AuthResponse> = self.post("/auth/login", Auth::User, request).await?;
        self.remember(response.as_ref());
        Ok(response)
    }

    /// `POST /auth/register`. The account stays unusable until the OTP is verified.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Option<AuthResponse>> {
        self.post("/auth/register", Auth::User, request).await
    }

    /// `POST /auth/verify-otp`
    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<Option<AuthResponse>> {
        let response: Option<AuthResponse> =
            self.post("/auth/verify-otp", Auth::User, request).await?;
        self.remember(response.as_ref());
        Ok(response)
    }

    /// `POST /admin/login`
    pub async fn admin_login(&self, request: &LoginRequest) -> Result<Option<AdminAuthResponse>> {
        let response: Option<AdminAuthResponse> =
            self.post("/admin/login", Auth::User, request).await?;
        if let Some(token) = response.as_ref().and_then(|r| r.token.as_deref()) {
            self.store_admin_session(token, response.as_ref().and_then(|r| r.admin.as_ref()));
        }
        Ok(response)
    }

    pub fn logout(&self) {
        self.clear_session();
    }

    pub fn admin_logout(&self) {
        self.clear_admin_session();
    }

    fn remember(&self, response: Option<&AuthResponse>) {
        if let Some(AuthResponse {
            token: Some(token),
            user: Some(user),
            ..
        }) = response
        {
            self.store_session(token, user);
        }
    }
}

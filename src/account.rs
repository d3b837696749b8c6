//! Login, registration with email OTP, and logout.

use xeriwo_sdk::{Client, LoginRequest, RegisterRequest, VerifyOtpRequest, View};

use crate::notify::{Notice, Notices};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const OTP_LEN: usize = 6;

pub struct Account {
    client: Client,
    pending_email: Option<String>,
    notices: Notices,
}

impl Account {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            pending_email: None,
            notices: Notices::default(),
        }
    }

    /// Email of a registration still waiting for its OTP.
    pub fn pending_email(&self) -> Option<&str> {
        self.pending_email.as_deref()
    }

    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            self.notices.push(Notice::error("Please fill in all fields"));
            return false;
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.client.login(&request).await {
            Ok(Some(_)) if self.client.is_authenticated() => {
                tracing::info!(email = %request.email, "logged in");
                self.notices
                    .push(Notice::success("Welcome back! Login successful!"));
                self.client.navigator().navigate(View::Dashboard);
                true
            }
            Ok(_) => {
                self.notices
                    .push(Notice::error("Invalid credentials. Please try again."));
                false
            }
            Err(e) => {
                self.notices
                    .push(Notice::from_failure(&e, "Invalid credentials. Please try again."));
                false
            }
        }
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> bool {
        if password != confirm_password {
            self.notices.push(Notice::error("Passwords do not match"));
            return false;
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            self.notices
                .push(Notice::error("Password must be at least 6 characters"));
            return false;
        }

        let request = RegisterRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        match self.client.register(&request).await {
            Ok(Some(_)) => {
                tracing::info!(email = %request.email, "registered, awaiting OTP");
                self.pending_email = Some(request.email);
                self.notices.push(Notice::success(
                    "Registration successful! Please verify your email.",
                ));
                true
            }
            Ok(None) => {
                self.notices.push(Notice::error("Registration failed"));
                false
            }
            Err(e) => {
                self.notices.push(Notice::from_failure(&e, "Registration failed"));
                false
            }
        }
    }

    pub async fn verify_otp(&mut self, email: &str, otp: &str) -> bool {
        let otp = otp.trim();
        if otp.len() != OTP_LEN || !otp.chars().all(|c| c.is_ascii_digit()) {
            self.notices
                .push(Notice::error("Please enter a valid 6-digit OTP"));
            return false;
        }

        let request = VerifyOtpRequest {
            email: email.trim().to_string(),
            otp: otp.to_string(),
        };
        match self.client.verify_otp(&request).await {
            Ok(Some(_)) => {
                self.pending_email = None;
                self.notices.push(Notice::success(
                    "Account verified successfully! You are now logged in.",
                ));
                self.client.navigator().navigate(View::Dashboard);
                true
            }
            Ok(None) => {
                self.notices
                    .push(Notice::error("Invalid OTP. Please try again."));
                false
            }
            Err(e) => {
                self.notices
                    .push(Notice::from_failure(&e, "Invalid OTP. Please try again."));
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.client.logout();
        self.client.navigator().navigate(View::Home);
        self.notices.push(Notice::info("Logged out"));
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }
}

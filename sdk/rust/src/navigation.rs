//! Tracks which view the user is on so the auth interceptor knows whether
//! a 401 should bounce them to the login view.

use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Products,
    Login,
    Register,
    Dashboard,
    Admin,
    AdminLogin,
}

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Products => "/products",
            View::Login => "/login",
            View::Register => "/register",
            View::Dashboard => "/dashboard",
            View::Admin => "/admin",
            View::AdminLogin => "/admin/login",
        }
    }

    /// Login and registration are exempt from the 401 redirect.
    pub fn is_auth_view(&self) -> bool {
        matches!(self, View::Login | View::Register)
    }
}

/// Shared handle to the current view.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Arc<RwLock<View>>,
}

impl Navigator {
    pub fn new(start: View) -> Self {
        Self {
            current: Arc::new(RwLock::new(start)),
        }
    }

    pub fn current(&self) -> View {
        self.current.read().map(|v| *v).unwrap_or_default()
    }

    pub fn navigate(&self, view: View) {
        if let Ok(mut current) = self.current.write() {
            *current = view;
        }
    }

    /// Move to the login view unless already on login/register.
    /// Returns whether a redirect happened.
    pub fn redirect_to_login(&self) -> bool {
        let Ok(mut current) = self.current.write() else {
            return false;
        };
        if current.is_auth_view() {
            return false;
        }
        *current = View::Login;
        true
    }
}

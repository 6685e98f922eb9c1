//! Shared application state handed to every handler and to the auth gate.

use crate::auth::service::AuthService;
use crate::utils::jwt::JwtUtils;
use std::sync::Arc;

/// Read-only state shared across requests.
#[derive(Clone)]
pub struct AppState {
    auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth_service: AuthService) -> Self {
        Self {
            auth_service: Arc::new(auth_service),
        }
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }

    pub fn jwt_utils(&self) -> &JwtUtils {
        self.auth_service.jwt_utils()
    }
}

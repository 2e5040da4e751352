use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::SecretaryError, remote::RemoteApi};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordChange<'a> {
    email: &'a str,
    old_password: &'a str,
    new_password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct AuthClient {
    api: RemoteApi,
}

impl AuthClient {
    pub fn new(api: RemoteApi) -> Self {
        Self { api }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, SecretaryError> {
        let resp: AuthResponse = self
            .api
            .post_json_any_status("login", &Credentials { email, password })
            .await?;
        info!(email, success = resp.success, "login");
        Ok(resp)
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthResponse, SecretaryError> {
        self.api
            .post_json_any_status("signup", &Credentials { email, password })
            .await
    }

    pub async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<AuthResponse, SecretaryError> {
        self.api
            .post_json_any_status(
                "change-password",
                &PasswordChange {
                    email,
                    old_password,
                    new_password,
                },
            )
            .await
    }
}

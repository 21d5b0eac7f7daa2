//! # Cognito user-pool session provider
//!
//! Implements [`SessionProvider`] by calling the Cognito Identity Provider
//! JSON API directly. Every call is a `POST` to the regional endpoint with an
//! `X-Amz-Target` header naming the action:
//!
//! | Operation | Action | Notes |
//! |-----------|--------|-------|
//! | `sign_up` | `SignUp` | Sends the user attributes (email). |
//! | `confirm_sign_up` | `ConfirmSignUp` | Verification code from the email. |
//! | `sign_in` | `InitiateAuth` / `USER_PASSWORD_AUTH` | Persists the returned tokens. |
//! | `current_session` | `InitiateAuth` / `REFRESH_TOKEN_AUTH` | Only when the stored tokens have expired. |
//!
//! These actions are unauthenticated in Cognito (the app-client id is the only
//! credential), so no request signing is involved.
//!
//! ## Session lifetime
//!
//! Tokens live in the [`SessionStore`] passed to [`CognitoSession::configure`].
//! Expiry is detected lazily: `current_session` refreshes once with the
//! refresh token and, if that fails, clears the store and reports
//! [`AuthError::NoSession`]. Sign-out is local and only clears the store.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use store::{Session, SessionStore};
use thiserror::Error;

use super::claims::user_from_id_token;
use super::config::CognitoConfig;
use super::SessionProvider;
use crate::error::{AuthError, UNKNOWN_ERROR};
use crate::models::{AuthUser, UserAttribute};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Error returned by a single Cognito call.
#[derive(Debug, Error)]
#[error("{message}")]
struct CognitoFailure {
    kind: Option<String>,
    message: String,
}

impl CognitoFailure {
    fn local(message: impl Into<String>) -> Self {
        Self {
            kind: None,
            message: message.into(),
        }
    }

    fn from_response(response: &HttpResponse) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(rename = "__type")]
            kind: Option<String>,
            #[serde(alias = "Message")]
            message: Option<String>,
        }

        let body: Option<ErrorBody> = serde_json::from_str(&response.body).ok();
        let kind = body.as_ref().and_then(|b| b.kind.clone());
        let message = body
            .and_then(|b| b.message)
            .or_else(|| kind.clone())
            .or_else(|| response.reason().map(str::to_string))
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        Self { kind, message }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: &'a [UserAttribute],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: BTreeMap<&'a str, &'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    access_token: String,
    refresh_token: Option<String>,
    expires_in: i64,
}

impl AuthenticationResult {
    fn into_session(self, issued_at: i64) -> Session {
        Session {
            id_token: self.id_token,
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: issued_at + self.expires_in,
        }
    }
}

fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Session provider backed by a Cognito user pool.
#[derive(Clone, Debug)]
pub struct CognitoSession<T, S> {
    config: CognitoConfig,
    transport: T,
    store: S,
}

impl<T: Transport, S: SessionStore> CognitoSession<T, S> {
    pub fn configure(config: CognitoConfig, transport: T, store: S) -> Self {
        Self {
            config,
            transport,
            store,
        }
    }

    pub fn config(&self) -> &CognitoConfig {
        &self.config
    }

    async fn call<B: Serialize, R: DeserializeOwned>(
        &self,
        action: &str,
        body: &B,
    ) -> Result<R, CognitoFailure> {
        let body = serde_json::to_string(body).map_err(|e| CognitoFailure::local(e.to_string()))?;
        let request = HttpRequest::new(Method::Post, self.config.endpoint())
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .body(body);

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| CognitoFailure::local(e.to_string()))?;
        if !response.is_success() {
            let failure = CognitoFailure::from_response(&response);
            tracing::warn!(
                "Cognito {} failed ({}): {}",
                action,
                failure.kind.as_deref().unwrap_or("unknown"),
                failure.message
            );
            return Err(failure);
        }

        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body)
            .map_err(|e| CognitoFailure::local(format!("Unexpected {action} response: {e}")))
    }

    async fn initiate_auth(
        &self,
        flow: &str,
        parameters: &[(&str, &str)],
    ) -> Result<AuthenticationResult, CognitoFailure> {
        let request = InitiateAuthRequest {
            auth_flow: flow,
            client_id: &self.config.client_id,
            auth_parameters: parameters.iter().copied().collect(),
        };
        let response: InitiateAuthResponse = self.call("InitiateAuth", &request).await?;
        if let Some(challenge) = response.challenge_name {
            return Err(CognitoFailure::local(format!(
                "Unsupported sign-in challenge: {challenge}"
            )));
        }
        response
            .authentication_result
            .ok_or_else(|| CognitoFailure::local("No authentication result returned"))
    }
}

impl<T: Transport, S: SessionStore> SessionProvider for CognitoSession<T, S> {
    async fn current_session(&self) -> Result<Session, AuthError> {
        let Some(session) = self.store.load().await else {
            return Err(AuthError::NoSession);
        };
        if !session.is_expired_at(now_secs()) {
            return Ok(session);
        }

        let Some(refresh_token) = session.refresh_token else {
            self.store.clear().await;
            return Err(AuthError::NoSession);
        };
        match self
            .initiate_auth("REFRESH_TOKEN_AUTH", &[("REFRESH_TOKEN", refresh_token.as_str())])
            .await
        {
            Ok(result) => {
                let mut fresh = result.into_session(now_secs());
                // Cognito does not rotate the refresh token on this flow
                fresh.refresh_token.get_or_insert(refresh_token);
                self.store.save(&fresh).await;
                tracing::info!("Refreshed expired session");
                Ok(fresh)
            }
            Err(e) => {
                tracing::warn!("Session refresh failed: {}", e);
                self.store.clear().await;
                Err(AuthError::NoSession)
            }
        }
    }

    async fn current_authenticated_user(&self) -> Result<AuthUser, AuthError> {
        let session = self.current_session().await?;
        user_from_id_token(&session.id_token).ok_or(AuthError::NoSession)
    }

    async fn sign_up(
        &self,
        username: &str,
        password: &str,
        attributes: &[UserAttribute],
    ) -> Result<(), AuthError> {
        let request = SignUpRequest {
            client_id: &self.config.client_id,
            username,
            password,
            user_attributes: attributes,
        };
        let _: IgnoredAny = self
            .call("SignUp", &request)
            .await
            .map_err(|e| AuthError::SignUp(e.to_string()))?;
        Ok(())
    }

    async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), AuthError> {
        let request = ConfirmSignUpRequest {
            client_id: &self.config.client_id,
            username,
            confirmation_code: code,
        };
        let _: IgnoredAny = self
            .call("ConfirmSignUp", &request)
            .await
            .map_err(|e| AuthError::Confirm(e.to_string()))?;
        Ok(())
    }

    async fn sign_in(&self, username: &str, password: &str) -> Result<AuthUser, AuthError> {
        let result = self
            .initiate_auth(
                "USER_PASSWORD_AUTH",
                &[("USERNAME", username), ("PASSWORD", password)],
            )
            .await
            .map_err(|e| AuthError::SignIn(e.to_string()))?;
        let session = result.into_session(now_secs());
        let user = user_from_id_token(&session.id_token)
            .ok_or_else(|| AuthError::SignIn("Identity token is malformed".to_string()))?;
        self.store.save(&session).await;
        Ok(user)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.store.clear().await;
        Ok(())
    }
}

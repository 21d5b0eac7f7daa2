//! Reads the user identity out of an ID token.
//!
//! Only the payload segment is decoded. Signature validation is the API
//! gateway's job; the client just needs the email to greet the user.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::models::AuthUser;

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: Option<String>,
    email: Option<String>,
    #[serde(rename = "cognito:username")]
    username: Option<String>,
}

/// Extract the user from a JWT, or `None` if the token is malformed.
pub fn user_from_id_token(id_token: &str) -> Option<AuthUser> {
    let payload = id_token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: IdTokenClaims = serde_json::from_slice(&bytes).ok()?;
    let username = claims
        .username
        .or(claims.sub)
        .or_else(|| claims.email.clone())?;
    Some(AuthUser {
        username,
        email: claims.email,
    })
}

/// Build an unsigned token carrying `claims`. Test helper.
#[cfg(any(test, feature = "testing"))]
pub fn unsigned_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_email_and_username() {
        let token = unsigned_token(&json!({
            "sub": "1111-2222",
            "email": "a@b.com",
            "cognito:username": "1111-2222",
        }));
        let user = user_from_id_token(&token).unwrap();
        assert_eq!(user.username, "1111-2222");
        assert_eq!(user.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn test_falls_back_to_sub_then_email() {
        let token = unsigned_token(&json!({ "sub": "1111-2222" }));
        assert_eq!(user_from_id_token(&token).unwrap().username, "1111-2222");

        let token = unsigned_token(&json!({ "email": "a@b.com" }));
        assert_eq!(user_from_id_token(&token).unwrap().username, "a@b.com");
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(user_from_id_token("not-a-jwt").is_none());
        assert!(user_from_id_token("a.!!!.c").is_none());
        let token = unsigned_token(&json!({ "aud": "x" }));
        assert!(user_from_id_token(&token).is_none());
    }
}

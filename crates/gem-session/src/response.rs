//! Tolerant extraction of identity and credential from a login response.
//!
//! The backend has been observed returning the identity and token at more
//! than one nesting depth:
//!
//! 1. `{ "data": { "user": {...}, "access_token": "..." } }`
//! 2. `{ "data": { "id": ..., "curp": ..., "access_token": "..." } }`
//! 3. `{ "user": {...}, "access_token": "..." }`
//!
//! Extraction tries these shapes in order; each strategy either yields an
//! outcome or falls through. A shape that matches but lacks the credential
//! is a hard failure, never a partial success. Whether the multiple shapes
//! are a designed contract or backend drift is unresolved; nothing beyond
//! these three paths is guessed at.

use serde_json::Value;

use crate::client::LoginOutcome;
use crate::error::SessionError;
use crate::user::User;

type Strategy = fn(&Value) -> Result<Option<LoginOutcome>, SessionError>;

/// Extract the identity and bearer credential from a login response body.
pub fn extract_login(body: &Value) -> Result<LoginOutcome, SessionError> {
    const STRATEGIES: [Strategy; 3] = [wrapped_user, flattened_data, top_level_user];

    for strategy in STRATEGIES {
        if let Some(outcome) = strategy(body)? {
            return Ok(outcome);
        }
    }
    Err(SessionError::InvalidResponse(
        "no identity or credential found in login response".to_string(),
    ))
}

/// Shape 1: identity under `data.user`, token beside it.
fn wrapped_user(body: &Value) -> Result<Option<LoginOutcome>, SessionError> {
    let Some(data) = body.get("data") else {
        return Ok(None);
    };
    let Some(user_value) = data.get("user").filter(|u| u.is_object()) else {
        return Ok(None);
    };
    let token = token_in(data)
        .or_else(|| token_in(body))
        .ok_or_else(credential_missing)?;
    Ok(Some(LoginOutcome {
        user: parse_user(user_value)?,
        token,
    }))
}

/// Shape 2: `data` itself is the identity record.
fn flattened_data(body: &Value) -> Result<Option<LoginOutcome>, SessionError> {
    let Some(data) = body.get("data") else {
        return Ok(None);
    };
    if data.get("id").is_none() || data.get("curp").is_none() {
        return Ok(None);
    }
    let token = token_in(data)
        .or_else(|| token_in(body))
        .ok_or_else(credential_missing)?;
    Ok(Some(LoginOutcome {
        user: parse_user(data)?,
        token,
    }))
}

/// Shape 3: identity and token at the top level.
fn top_level_user(body: &Value) -> Result<Option<LoginOutcome>, SessionError> {
    let Some(user_value) = body.get("user").filter(|u| u.is_object()) else {
        return Ok(None);
    };
    let token = token_in(body).ok_or_else(credential_missing)?;
    Ok(Some(LoginOutcome {
        user: parse_user(user_value)?,
        token,
    }))
}

fn token_in(value: &Value) -> Option<String> {
    ["access_token", "token"]
        .into_iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn parse_user(value: &Value) -> Result<User, SessionError> {
    let user: User = serde_json::from_value(value.clone())
        .map_err(|e| SessionError::InvalidResponse(format!("malformed identity: {e}")))?;
    if user.curp.is_empty() {
        return Err(SessionError::InvalidResponse(
            "identity missing curp".to_string(),
        ));
    }
    Ok(user)
}

fn credential_missing() -> SessionError {
    SessionError::InvalidResponse("credential missing from login response".to_string())
}

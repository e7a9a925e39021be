//! Token and JSON fixtures

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::json;

/// Build an unsigned JWT whose `exp` is `offset_secs` from now
pub fn jwt_with_expiry(offset_secs: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = json!({
        "sub": "1",
        "exp": chrono::Utc::now().timestamp() + offset_secs,
    });
    let claims = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
    format!("{}.{}.sig", header, claims)
}

/// JSON body for a user
pub fn user_json(id: i64, username: &str, role: &str) -> serde_json::Value {
    json!({
        "id": id,
        "username": username,
        "role": role,
    })
}

/// JSON body the login endpoint returns
pub fn login_response_json(access_offset: i64, refresh_offset: i64) -> serde_json::Value {
    json!({
        "access_token": jwt_with_expiry(access_offset),
        "refresh_token": jwt_with_expiry(refresh_offset),
        "user": user_json(1, "admin", "admin"),
    })
}

/// JSON body for a one-page user list
pub fn user_list_json(users: &[serde_json::Value]) -> serde_json::Value {
    json!({
        "data": users,
        "pagination": {
            "page": 1,
            "limit": 10,
            "total": users.len(),
            "total_pages": if users.is_empty() { 0 } else { 1 },
        }
    })
}

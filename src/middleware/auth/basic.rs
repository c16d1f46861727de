//! HTTP Basic 認証 → AuthCtx を extensions に入れる
//!
//! 1. `Authorization: Basic base64(name:secret)` を取り出す
//! 2. name を emailAddress として Users から一意に引く
//! 3. bcrypt で secret と保存済み hash を照合する
//!
//! ヘッダ無し / ユーザー無し / password 不一致 はいずれも
//! 401 `{"message":"Access Denied"}` で打ち切る (区別はログにだけ残す)。

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::user_repo;
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub secret: String,
}

#[derive(Debug)]
pub enum AuthOutcome {
    /// No usable credential pair on the request.
    Unauthenticated,
    Rejected(RejectReason),
    Authenticated(AuthCtx),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnknownUser,
    PasswordMismatch,
}

/// 認証が必要な method route にだけ掛ける。
///
/// ```ignore
/// .route("/users", middleware::auth::basic::require(get(current_user), &state).post(create_user))
/// ```
pub fn require(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(state.clone(), basic_auth_middleware))
}

async fn basic_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match authenticate(&state, req.headers()).await? {
        AuthOutcome::Authenticated(auth_ctx) => {
            tracing::debug!(user_id = auth_ctx.user_id, "authentication successful");
            // middleware → extractor への受け渡し
            req.extensions_mut().insert(auth_ctx);
            Ok(next.run(req).await)
        }
        AuthOutcome::Unauthenticated => {
            tracing::warn!("auth header not found");
            Err(AppError::Unauthorized)
        }
        AuthOutcome::Rejected(_) => Err(AppError::Unauthorized),
    }
}

/// Resolves the request's Basic credentials to a user.
///
/// Store failures propagate as errors (500); they are not an auth outcome.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthOutcome, AppError> {
    let Some(credentials) = credentials_from_headers(headers) else {
        return Ok(AuthOutcome::Unauthenticated);
    };

    let Some(user) = user_repo::find_by_email(&state.db, &credentials.name).await? else {
        tracing::warn!(username = %credentials.name, "user not found");
        return Ok(AuthOutcome::Rejected(RejectReason::UnknownUser));
    };

    if !state
        .password
        .verify(credentials.secret, user.password.clone())
        .await
    {
        tracing::warn!(username = %user.email_address, "password mismatch");
        return Ok(AuthOutcome::Rejected(RejectReason::PasswordMismatch));
    }

    Ok(AuthOutcome::Authenticated(AuthCtx {
        user_id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email_address: user.email_address,
    }))
}

pub fn credentials_from_headers(headers: &HeaderMap) -> Option<Credentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    parse_basic(value)
}

/// Parses `Basic <base64(name:secret)>`. Scheme is case-insensitive; the
/// secret may itself contain `:` (split at the first one only).
pub fn parse_basic(value: &str) -> Option<Credentials> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (name, secret) = decoded.split_once(':')?;

    Some(Credentials {
        name: name.to_string(),
        secret: secret.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn encode(raw: &str) -> String {
        STANDARD.encode(raw)
    }

    #[test]
    fn parses_name_and_secret() {
        let header = format!("Basic {}", encode("joe@smith.com:abc123"));
        assert_eq!(
            parse_basic(&header),
            Some(Credentials {
                name: "joe@smith.com".into(),
                secret: "abc123".into(),
            })
        );
    }

    #[test]
    fn secret_keeps_everything_after_first_colon() {
        let header = format!("basic {}", encode("joe@smith.com:a:b:c"));
        let creds = parse_basic(&header).unwrap();
        assert_eq!(creds.secret, "a:b:c");
    }

    #[test]
    fn empty_secret_is_still_a_credential_pair() {
        let header = format!("Basic {}", encode("joe@smith.com:"));
        assert_eq!(parse_basic(&header).unwrap().secret, "");
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert_eq!(parse_basic(&format!("Bearer {}", encode("a:b"))), None);
        assert_eq!(parse_basic("Basic"), None);
        assert_eq!(parse_basic("Basic !!!not-base64!!!"), None);
        assert_eq!(parse_basic(&format!("Basic {}", encode("no-colon"))), None);
    }

    #[test]
    fn missing_header_means_no_credentials() {
        let mut headers = HeaderMap::new();
        assert_eq!(credentials_from_headers(&headers), None);

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {}", encode("a@b.io:pw"))).unwrap(),
        );
        assert_eq!(credentials_from_headers(&headers).unwrap().name, "a@b.io");
    }
}

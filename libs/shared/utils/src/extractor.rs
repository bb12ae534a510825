use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use headers::{Cookie, HeaderMapExt};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::AuthContext;

use crate::session::{validate_session_token, SESSION_COOKIE};

/// Resolve the session cookie into an [`AuthContext`] and attach it to the
/// request. Requests without a valid session continue as anonymous; each
/// handler decides whether that is acceptable.
pub async fn session_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let context = resolve_auth_context(&request, &config);
    request.extensions_mut().insert(context);
    next.run(request).await
}

pub fn resolve_auth_context<B>(request: &Request<B>, config: &AppConfig) -> AuthContext {
    let Some(cookie) = request.headers().typed_get::<Cookie>() else {
        return AuthContext::anonymous();
    };

    let Some(token) = cookie.get(SESSION_COOKIE) else {
        return AuthContext::anonymous();
    };

    match validate_session_token(token, &config.session_secret) {
        Ok(context) => context,
        Err(reason) => {
            debug!("Ignoring session cookie: {}", reason);
            AuthContext::anonymous()
        }
    }
}

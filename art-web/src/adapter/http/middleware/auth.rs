use crate::config::AppState;
use crate::error::{AppError, AuthError};
use crate::repo::model::user;
use crate::repo::sea::UserRepo;
use crate::util::jwt::{validate_jwt_token, Claims};
use axum::extract::State;
use axum::{body::Body, http::Request, middleware::Next, response::Response};

const AUTHORIZATION_KEY: &str = "Authorization";
const AUTHORIZATION_PREFIXES: [&str; 2] = ["Bearer", "Token"];

fn extract_token(req: &Request<Body>) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION_KEY)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let value = value.trim();
            AUTHORIZATION_PREFIXES
                .iter()
                .find_map(|p| value.strip_prefix(p))
                .unwrap_or(value)
                .trim()
                .to_string()
        })
        .or_else(|| {
            req.uri().query().and_then(|query| {
                query.split('&').find_map(|part| {
                    let (key, value) = part.split_once('=')?;
                    if key.eq_ignore_ascii_case(AUTHORIZATION_KEY) {
                        Some(value.to_string())
                    } else {
                        None
                    }
                })
            })
        })
        .filter(|t| !t.is_empty())
}

/// Verifies the identity-provider token and attaches the caller's
/// [`Context`], provisioning the user on first sight.
pub async fn jwt_auth_middle(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&req).ok_or(AuthError::MissingToken)?;
    let claims = validate_jwt_token(&token, &state.jwt)?;
    let user = UserRepo::provision(
        &state.conn,
        &claims,
        state.auth.is_admin_email(&claims.email),
    )
    .await?;
    if !user.is_active {
        return Err(AuthError::Inactive.into());
    }

    let mut context = Context::default();
    context.with_claims(claims).with_token(token).with_user(user);
    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// Lets only staff through. Must sit inside [`jwt_auth_middle`].
pub async fn admin_only(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let is_staff = req
        .extensions()
        .get::<Context>()
        .is_some_and(|c| c.user.is_staff);
    if !is_staff {
        return Err(AppError::Forbidden);
    }
    Ok(next.run(req).await)
}

#[derive(Debug, Clone, Default)]
pub struct Context {
    pub token: String,
    pub claims: Claims,
    pub user: user::Model,
}

impl Context {
    pub fn with_claims(&mut self, c: Claims) -> &mut Self {
        self.claims = c;
        self
    }

    pub fn with_token(&mut self, token: String) -> &mut Self {
        self.token = token;
        self
    }

    pub fn with_user(&mut self, user: user::Model) -> &mut Self {
        self.user = user;
        self
    }
}

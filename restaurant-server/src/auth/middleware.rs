//! 认证中间件
//!
//! 为 JWT 认证 (protect) 和角色授权 (authorize) 提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 认证中间件 - 要求有效令牌
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 错误处理
///
/// | 错误 | 错误码 | HTTP 状态码 |
/// |------|--------|------------|
/// | 无 Authorization 头 | NotAuthenticated | 401 |
/// | 令牌过期 | TokenExpired | 401 |
/// | 头格式错误或无效令牌 | TokenInvalid | 401 |
///
/// CORS 预检 (`OPTIONS`) 直接放行。
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
            security_log!("WARN", "auth_bad_header", uri = req.uri().to_string());
            AppError::invalid_token("Invalid authorization header")
        })?,
        None => {
            security_log!("WARN", "auth_missing", uri = req.uri().to_string());
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match state.get_jwt_service().validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                uri = req.uri().to_string()
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 角色检查中间件 - 调用者角色必须在 `roles` 之内
///
/// 必须位于 [`require_auth`] 之内；缺少 [`CurrentUser`] 的请求视为未认证。
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/", post(handler::create))
///     .layer(middleware::from_fn(require_role(&["admin"])))
///     .layer(middleware::from_fn_with_state(state.clone(), require_auth));
/// ```
///
/// # 错误
///
/// 角色不在允许列表中时返回 403 RoleRequired
pub fn require_role(
    roles: &'static [&'static str],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_any_role(roles) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    user_role = user.role.clone(),
                    allowed_roles = roles.join(",")
                );
                return Err(AppError::role_required(&user.role));
            }

            Ok(next.run(req).await)
        })
    }
}

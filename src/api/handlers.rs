//! API Handlers
//!
//! HTTP request handlers for the account, user and admin banner endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    Json,
};

use axum_extra::extract::{cookie::Cookie, CookieJar};

use crate::auth::{AdminChecker, JwtAdminChecker, PasswordHasher};
use crate::cache::BannerCache;
use crate::config::Config;
use crate::error::{BannerError, Result};
use crate::models::{
    Banner, BannerFilterQuery, BannerPayload, DeleteResponse, HealthResponse, LoginRequest,
    RegisterRequest, StatsResponse, User, UserBannerQuery,
};
use crate::service::{AccountService, BannerService};
use crate::store::{BannerStore, MemoryBannerStore, MemoryUserStore, UserStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<BannerService>,
    pub accounts: Arc<AccountService>,
    pub admin_checker: Arc<dyn AdminChecker>,
}

impl AppState {
    pub fn new(
        service: Arc<BannerService>,
        accounts: Arc<AccountService>,
        admin_checker: Arc<dyn AdminChecker>,
    ) -> Self {
        Self {
            service,
            accounts,
            admin_checker,
        }
    }

    /// Wires in-memory stores, a fresh cache and a JWT checker from `config`.
    ///
    /// The same checker validates the tokens that login issues.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn BannerStore> = Arc::new(MemoryBannerStore::new());
        let cache = Arc::new(BannerCache::new(config.cache_ttl()));
        let service = BannerService::new(store, cache, config.store_timeout());

        let checker = Arc::new(JwtAdminChecker::new(
            &config.jwt_secret,
            config.token_cookie.clone(),
        ));
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let accounts = AccountService::new(
            users,
            PasswordHasher::new(),
            Arc::clone(&checker),
            config.store_timeout(),
            config.token_ttl(),
        );

        Self::new(Arc::new(service), Arc::new(accounts), checker)
    }

    /// Replaces the checker guarding requests, keeping services as they are.
    pub fn with_admin_checker(mut self, admin_checker: Arc<dyn AdminChecker>) -> Self {
        self.admin_checker = admin_checker;
        self
    }
}

/// Handler for POST /register
pub async fn register_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>)> {
    let Json(request) = payload.map_err(invalid_body)?;
    let user = state.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for POST /login
///
/// On success the signed token is set as an HTTP-only cookie.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<User>)> {
    let Json(request) = payload.map_err(invalid_body)?;
    let (user, token) = state.accounts.login(request).await?;

    let max_age = i64::try_from(state.accounts.token_ttl().as_secs()).unwrap_or(i64::MAX);
    let cookie = Cookie::build((state.accounts.cookie_name().to_string(), token))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::seconds(max_age))
        .build();

    Ok((jar.add(cookie), Json(user)))
}

/// Handler for GET /user_banner
///
/// Any authenticated caller may read; the admin flag only decides whether
/// inactive banners are visible.
pub async fn user_banner_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UserBannerQuery>,
) -> Result<Json<Banner>> {
    let is_admin = state.admin_checker.check_if_admin(&headers)?;
    let params = query.parse()?;

    let banner = state
        .service
        .resolve_user_banner(
            params.tag_id,
            params.feature_id,
            params.use_last_revision,
            is_admin,
        )
        .await?;

    Ok(Json(Banner::clone(&banner)))
}

/// Handler for GET /banner
pub async fn list_banners_handler(
    State(state): State<AppState>,
    Query(query): Query<BannerFilterQuery>,
) -> Result<Json<Vec<Banner>>> {
    let filter = query.parse()?;
    let banners = state.service.list_banners(filter).await?;
    Ok(Json(banners))
}

/// Handler for POST /banner
pub async fn create_banner_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BannerPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Banner>)> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let banner = state.service.create_banner(payload).await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

/// Handler for PUT /banner/:id
pub async fn update_banner_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
    payload: std::result::Result<Json<BannerPayload>, JsonRejection>,
) -> Result<Json<Banner>> {
    let Path(id) = id.map_err(invalid_id)?;
    let Json(payload) = payload.map_err(invalid_body)?;
    let banner = state.service.update_banner(id, payload).await?;
    Ok(Json(banner))
}

/// Handler for DELETE /banner/:id
pub async fn delete_banner_handler(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>> {
    let Path(id) = id.map_err(invalid_id)?;
    state.service.delete_banner(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache();
    Json(StatsResponse::new(cache.stats(), cache.ttl()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

fn invalid_body(rejection: JsonRejection) -> BannerError {
    BannerError::Validation(format!("invalid request body: {}", rejection.body_text()))
}

fn invalid_id(_: PathRejection) -> BannerError {
    BannerError::Validation("Invalid banner id".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthError, FixedAdminChecker};
    use crate::models::{Feature, Tag};

    fn state_with(checker: FixedAdminChecker) -> AppState {
        AppState::from_config(&Config::default()).with_admin_checker(Arc::new(checker))
    }

    fn payload(is_active: bool) -> BannerPayload {
        BannerPayload {
            title: "Sale".to_string(),
            text: "Everything half price".to_string(),
            url: "https://example.com/sale".to_string(),
            is_active,
            feature: Some(Feature {
                id: 1,
                name: "checkout".to_string(),
            }),
            tags: vec![Tag {
                id: 1,
                name: "new users".to_string(),
            }],
        }
    }

    fn query(tag_id: &str, feature_id: &str) -> UserBannerQuery {
        UserBannerQuery {
            tag_id: Some(tag_id.to_string()),
            feature_id: Some(feature_id.to_string()),
            use_last_revision: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_read_user_banner() {
        let state = state_with(FixedAdminChecker::user());

        let (status, created) = create_banner_handler(State(state.clone()), Ok(Json(payload(true))))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let response = user_banner_handler(State(state), HeaderMap::new(), Query(query("1", "1")))
            .await
            .unwrap();
        assert_eq!(response.id, created.id);
        assert_eq!(response.title, "Sale");
    }

    #[tokio::test]
    async fn test_user_banner_rejects_unauthenticated_before_parsing() {
        let state = state_with(FixedAdminChecker::rejecting(AuthError::MissingToken));

        let result =
            user_banner_handler(State(state), HeaderMap::new(), Query(query("x", "1"))).await;
        assert!(matches!(result, Err(BannerError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_user_banner_invalid_params() {
        let state = state_with(FixedAdminChecker::user());

        let result =
            user_banner_handler(State(state), HeaderMap::new(), Query(query("abc", "1"))).await;
        assert!(matches!(result, Err(BannerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_inactive_banner_admin_only() {
        let user = state_with(FixedAdminChecker::user());
        create_banner_handler(State(user.clone()), Ok(Json(payload(false))))
            .await
            .unwrap();

        let result =
            user_banner_handler(State(user.clone()), HeaderMap::new(), Query(query("1", "1")))
                .await;
        assert!(matches!(result, Err(BannerError::NotAvailable)));

        let admin = user.with_admin_checker(Arc::new(FixedAdminChecker::admin()));
        let result =
            user_banner_handler(State(admin), HeaderMap::new(), Query(query("1", "1"))).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_and_delete_handlers() {
        let state = state_with(FixedAdminChecker::admin());
        let (_, created) = create_banner_handler(State(state.clone()), Ok(Json(payload(true))))
            .await
            .unwrap();

        let mut changed = payload(false);
        changed.title = "Clearance".to_string();
        let updated =
            update_banner_handler(State(state.clone()), Ok(Path(created.id)), Ok(Json(changed)))
                .await
                .unwrap();
        assert_eq!(updated.title, "Clearance");
        assert!(!updated.is_active);

        let deleted = delete_banner_handler(State(state.clone()), Ok(Path(created.id)))
            .await
            .unwrap();
        assert_eq!(
            deleted.message,
            format!("banner with ID (id {}) deleted", created.id)
        );

        let result = delete_banner_handler(State(state), Ok(Path(created.id))).await;
        assert!(matches!(result, Err(BannerError::BannerNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_banners_handler() {
        let state = state_with(FixedAdminChecker::admin());
        for _ in 0..3 {
            create_banner_handler(State(state.clone()), Ok(Json(payload(true))))
                .await
                .unwrap();
        }

        let listed = list_banners_handler(
            State(state.clone()),
            Query(BannerFilterQuery {
                limit: Some("2".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();
        assert_eq!(listed.len(), 2);

        let result = list_banners_handler(
            State(state),
            Query(BannerFilterQuery {
                offset: Some("-1".to_string()),
                ..Default::default()
            }),
        )
        .await;
        assert!(matches!(result, Err(BannerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = state_with(FixedAdminChecker::user());

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.ttl_seconds, 300);
    }

    #[tokio::test]
    async fn test_register_then_login_sets_cookie() {
        let state = AppState::from_config(&Config::default());

        let (status, user) = register_handler(
            State(state.clone()),
            Ok(Json(RegisterRequest {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                password: "pw".to_string(),
                is_admin: true,
            })),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert!(user.is_admin);

        let (jar, logged_in) = login_handler(
            State(state.clone()),
            CookieJar::new(),
            Ok(Json(LoginRequest {
                email: "ann@example.com".to_string(),
                password: "pw".to_string(),
            })),
        )
        .await
        .unwrap();
        assert_eq!(logged_in.id, user.id);

        let cookie = jar.get("token").unwrap();
        assert!(cookie.http_only().unwrap_or(false));
        assert_eq!(cookie.path(), Some("/"));

        // The issued cookie authenticates later requests
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("token={}", cookie.value()).parse().unwrap(),
        );
        assert_eq!(state.admin_checker.check_if_admin(&headers), Ok(true));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let state = AppState::from_config(&Config::default());
        register_handler(
            State(state.clone()),
            Ok(Json(RegisterRequest {
                name: "Bo".to_string(),
                email: "bo@example.com".to_string(),
                password: "right".to_string(),
                is_admin: false,
            })),
        )
        .await
        .unwrap();

        let result = login_handler(
            State(state),
            CookieJar::new(),
            Ok(Json(LoginRequest {
                email: "bo@example.com".to_string(),
                password: "wrong".to_string(),
            })),
        )
        .await;
        assert!(matches!(result, Err(BannerError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::application;
use super::handlers::message;
use super::handlers::project;
use super::handlers::skill;
use super::handlers::timeline;
use super::handlers::user::forgot_password::forgot_password;
use super::handlers::user::get_me::get_me;
use super::handlers::user::login::login;
use super::handlers::user::logout::logout;
use super::handlers::user::portfolio_profile::portfolio_profile;
use super::handlers::user::register::register;
use super::handlers::user::reset_password::reset_password;
use super::handlers::user::update_password::update_password;
use super::handlers::user::update_profile::update_profile;
use super::middleware::authenticate as auth_middleware;
use super::session_cookie::SessionCookie;
use crate::domain::application::ports::ApplicationServicePort;
use crate::domain::message::ports::MessageServicePort;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::skill::ports::SkillServicePort;
use crate::domain::timeline::ports::TimelineServicePort;
use crate::domain::user::ports::AuthenticationGatePort;
use crate::domain::user::ports::CredentialServicePort;

/// Upper bound on request bodies; avatars, resumes and banners arrive inline.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub credential_service: Arc<dyn CredentialServicePort>,
    pub gate: Arc<dyn AuthenticationGatePort>,
    pub project_service: Arc<dyn ProjectServicePort>,
    pub skill_service: Arc<dyn SkillServicePort>,
    pub timeline_service: Arc<dyn TimelineServicePort>,
    pub application_service: Arc<dyn ApplicationServicePort>,
    pub message_service: Arc<dyn MessageServicePort>,
    pub session_cookie: SessionCookie,
}

pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let protect = || middleware::from_fn_with_state(state.clone(), auth_middleware);

    let user_routes = Router::new()
        .route("/me", get(get_me))
        .route("/update/me", put(update_profile))
        .route("/update/password", put(update_password))
        .route_layer(protect())
        .route("/logout", get(logout))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/portfolio/me", get(portfolio_profile))
        .route("/password/forgot", post(forgot_password))
        .route("/password/reset/:token", put(reset_password));

    let project_routes = Router::new()
        .route("/add", post(project::add_project))
        .route("/delete/:id", delete(project::delete_project))
        .route("/update/:id", put(project::update_project))
        .route_layer(protect())
        .route("/getall", get(project::list_projects))
        .route("/get/:id", get(project::get_project));

    let skill_routes = Router::new()
        .route("/add", post(skill::add_skill))
        .route("/delete/:id", delete(skill::delete_skill))
        .route("/update/:id", put(skill::update_skill))
        .route_layer(protect())
        .route("/getall", get(skill::list_skills));

    let timeline_routes = Router::new()
        .route("/add", post(timeline::add_entry))
        .route("/delete/:id", delete(timeline::delete_entry))
        .route_layer(protect())
        .route("/getall", get(timeline::list_entries));

    let application_routes = Router::new()
        .route("/add", post(application::add_application))
        .route("/delete/:id", delete(application::delete_application))
        .route_layer(protect())
        .route("/getall", get(application::list_applications));

    let message_routes = Router::new()
        .route("/getall", get(message::list_messages))
        .route("/delete/:id", delete(message::delete_message))
        .route_layer(protect())
        .route("/send", post(message::send_message));

    let api = Router::new()
        .nest("/user", user_routes)
        .nest("/project", project_routes)
        .nest("/skill", skill_routes)
        .nest("/timeline", timeline_routes)
        .nest("/softwareapplication", application_routes)
        .nest("/message", message_routes);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(trace_layer)
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS for the portfolio and dashboard front ends; credentials need explicit origins.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::list(origins))
}

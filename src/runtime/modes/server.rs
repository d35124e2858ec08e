//! Server mode
//!
//! Configures and starts the HTTP server with all routes and middleware.

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
    App, HttpServer,
    http::{Method, header},
    middleware::{Compress, Condition, DefaultHeaders},
    web,
};
use anyhow::{Context, Result, anyhow};
use tracing::{error, info, warn};

use crate::api::constants::JSON_PAYLOAD_LIMIT;
use crate::api::middleware::{RequestIdMiddleware, TrackingGate};
use crate::api::services::{admin_routes, contact_routes, json_error_handler, track_routes};
use crate::config::{CorsConfig, get_config};
use crate::runtime::lifetime::{self, startup::StartupContext};

/// Validate CORS configuration at startup (runs once)
fn validate_cors_config(cors_config: &CorsConfig) {
    if cors_config.allowed_origins.is_empty() {
        warn!(
            "cors.allowed_origins is empty. \
            No cross-origin requests will be allowed."
        );
    }

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin && cors_config.allow_credentials {
        error!(
            "SECURITY WARNING: allow_any_origin + allow_credentials is a dangerous combination! \
            Disabling credentials for safety."
        );
    }
}

/// Build CORS middleware from configuration
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    let mut cors = Cors::default();

    let is_any_origin = cors_config.allowed_origins.iter().any(|o| o == "*");
    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors = cors
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(cors_config.max_age as usize);

    // any_origin + credentials 会让 actix-cors 回显 Origin，禁止该组合
    if cors_config.allow_credentials && !is_any_origin {
        cors = cors.supports_credentials();
    }

    cors
}

/// Register shared state and every route on an app
///
/// Used by `run_server` and by integration tests so both see the same wiring.
/// 令牌补充间隔（毫秒）：窗口内平均分配 `requests` 个令牌，至少 1ms
fn refill_interval_ms(window_secs: u64, requests: u32) -> u64 {
    (window_secs.saturating_mul(1000) / u64::from(requests.max(1))).max(1)
}

pub fn configure_app(cfg: &mut web::ServiceConfig, ctx: &StartupContext) {
    cfg.app_data(web::Data::from(ctx.storage.clone()))
        .app_data(web::Data::from(ctx.tracker.clone()))
        .app_data(web::Data::from(ctx.contact_service.clone()))
        .app_data(web::Data::new(ctx.admin_access.clone()))
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_PAYLOAD_LIMIT)
                .error_handler(json_error_handler),
        );

    track_routes(cfg);
    contact_routes(cfg);
    admin_routes(cfg);
}

/// Run the HTTP server
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server() -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup()
        .await
        .inspect_err(|e| error!("Server startup failed: {:#}", e))?;

    let config = get_config();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    info!("Using {} CPU cores for the server", cpu_count);

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let rate_limit = config.rate_limit.clone();
    let governor_config = GovernorConfigBuilder::default()
        .milliseconds_per_request(refill_interval_ms(
            rate_limit.window_secs,
            rate_limit.requests,
        ))
        .burst_size(rate_limit.requests.max(1))
        .finish()
        .ok_or_else(|| anyhow!("Invalid rate_limit configuration"))?;
    if rate_limit.enabled {
        info!(
            "Rate limiting: {} requests per {}s per address",
            rate_limit.requests, rate_limit.window_secs
        );
    } else {
        warn!("Rate limiting disabled");
    }

    let tracking_gate = TrackingGate::from_config();
    let storage_for_shutdown = startup.storage.clone();
    let ctx = web::Data::new(startup);

    let server = HttpServer::new(move || {
        let ctx = ctx.clone();

        App::new()
            .wrap(tracking_gate.clone())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "SAMEORIGIN"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(Condition::new(
                rate_limit.enabled,
                Governor::new(&governor_config),
            ))
            .wrap(Compress::default())
            .wrap(build_cors_middleware(&cors_config))
            .wrap(RequestIdMiddleware)
            .configure(move |cfg| configure_app(cfg, &ctx))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    warn!("Starting server at http://{}", bind_address);
    let server = server.run();

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(&storage_for_shutdown) => {
            warn!("Graceful shutdown: all tasks completed");
        }
    }

    Ok(())
}

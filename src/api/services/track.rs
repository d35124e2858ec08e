//! 追踪端点 `POST /api/track`
//!
//! 与被动追踪中间件共用 `InteractionTracker::process`，这里负责显式响应。

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{error, warn};

use super::helpers::{error_response, message_response};
use crate::api::constants::{MSG_ALREADY_TRACKED, MSG_TRACK_FAILED, MSG_TRACKED, TRACK_ENDPOINT};
use crate::tracking::{ClientInfo, InteractionTracker, TrackOutcome, TrackRequest};

pub async fn track_interaction(
    req: HttpRequest,
    body: web::Bytes,
    tracker: web::Data<InteractionTracker>,
) -> impl Responder {
    let request = match TrackRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected tracking payload: {}", e);
            return error_response(StatusCode::BAD_REQUEST, e.message());
        }
    };

    let client = ClientInfo::from_http_request(&req);

    match tracker.process(request, &client).await {
        Ok(TrackOutcome::Recorded) => message_response(StatusCode::OK, MSG_TRACKED),
        Ok(TrackOutcome::AlreadyTracked) => message_response(StatusCode::OK, MSG_ALREADY_TRACKED),
        Ok(TrackOutcome::Skipped) => HttpResponse::NoContent().finish(),
        Err(e) => {
            error!("Tracking failed for {}: {}", client.ip, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_TRACK_FAILED)
        }
    }
}

pub fn track_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(TRACK_ENDPOINT, web::post().to(track_interaction));
}

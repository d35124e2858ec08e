//! Passive tracking gate
//!
//! 挂在所有路由外层：对普通页面请求顺带记录交互，无论成功、去重、
//! 跳过还是失败都继续调用下游服务。管理区和其它 `/api/` 路由直接放行，
//! 不读取请求体。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{self, ServiceRequest, ServiceResponse},
    http::header::CONTENT_LENGTH,
    web,
};
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, trace, warn};

use crate::tracking::{ClientInfo, InteractionTracker, RouteScope, TrackRequest};

const JSON_CONTENT_TYPE: &str = "application/json";

/// 被动追踪中间件工厂
#[derive(Clone)]
pub struct TrackingGate {
    max_body_bytes: usize,
}

impl TrackingGate {
    pub fn new(max_body_bytes: usize) -> Self {
        Self { max_body_bytes }
    }

    pub fn from_config() -> Self {
        Self::new(crate::config::get_config().tracking.max_body_bytes)
    }
}

impl<S, B> Transform<S, ServiceRequest> for TrackingGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TrackingGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TrackingGateService {
            service: Rc::new(service),
            max_body_bytes: self.max_body_bytes,
        }))
    }
}

pub struct TrackingGateService<S> {
    service: Rc<S>,
    max_body_bytes: usize,
}

/// 只处理声明了长度且不超限的 JSON 请求体
fn inspectable_length(req: &ServiceRequest, max_body_bytes: usize) -> Option<usize> {
    if req.content_type() != JSON_CONTENT_TYPE {
        return None;
    }
    req.headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|len| *len > 0 && *len <= max_body_bytes)
}

/// 读出请求体，再原样放回，保证下游 handler 仍能读取
async fn take_and_restore_body(req: &mut ServiceRequest, limit: usize) -> Result<Bytes, Error> {
    let mut payload = req.take_payload();
    let mut body = BytesMut::with_capacity(limit);

    while let Some(chunk) = payload.next().await {
        body.extend_from_slice(&chunk?);
    }
    let body = body.freeze();

    let (_, mut restored) = actix_http::h1::Payload::create(true);
    restored.unread_data(body.clone());
    req.set_payload(dev::Payload::from(restored));

    Ok(body)
}

async fn track_passively(req: &mut ServiceRequest, max_body_bytes: usize) {
    let Some(tracker) = req.app_data::<web::Data<InteractionTracker>>().cloned() else {
        trace!("No tracker registered, skipping passive tracking");
        return;
    };
    let Some(length) = inspectable_length(req, max_body_bytes) else {
        return;
    };

    let body = match take_and_restore_body(req, length).await {
        Ok(body) => body,
        Err(e) => {
            warn!("Passive tracking could not read body on {}: {}", req.path(), e);
            return;
        }
    };

    let request = match TrackRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Passive tracking ignored body on {}: {}", req.path(), e);
            return;
        }
    };
    if request.path.is_none() {
        return;
    }

    let client = ClientInfo::from_http_request(req.request());
    match tracker.process(request, &client).await {
        Ok(outcome) => trace!("Passive tracking on {}: {:?}", req.path(), outcome),
        Err(e) => warn!("Passive tracking failed on {}: {}", req.path(), e),
    }
}

impl<S, B> Service<ServiceRequest> for TrackingGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let max_body_bytes = self.max_body_bytes;

        Box::pin(async move {
            if RouteScope::of(req.path()).is_passive() {
                track_passively(&mut req, max_body_bytes).await;
            }
            srv.call(req).await
        })
    }
}

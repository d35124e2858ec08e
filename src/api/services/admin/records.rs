//! 管理端只读列表

use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error};

use crate::api::services::helpers::error_from_folio;
use crate::services::ContactService;
use crate::storage::SeaOrmStorage;

/// GET /api/admin/visitors
pub async fn list_visitors(storage: web::Data<SeaOrmStorage>) -> impl Responder {
    match storage.list_interactions().await {
        Ok(events) => {
            debug!("Admin API: returning {} interaction events", events.len());
            HttpResponse::Ok().json(events)
        }
        Err(e) => {
            error!("Admin API: failed to list interactions: {}", e);
            error_from_folio(&e)
        }
    }
}

/// GET /api/admin/messages
pub async fn list_messages(service: web::Data<ContactService>) -> impl Responder {
    match service.list_messages().await {
        Ok(messages) => {
            debug!("Admin API: returning {} contact messages", messages.len());
            HttpResponse::Ok().json(messages)
        }
        Err(e) => {
            error!("Admin API: failed to list messages: {}", e);
            error_from_folio(&e)
        }
    }
}

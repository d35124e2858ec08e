//! 联系表单端点 `POST /api/contact`

use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use tracing::error;

use super::helpers::{error_from_folio, error_response, message_response};
use crate::api::constants::{MSG_CONTACT_FAILED, MSG_CONTACT_SENT};
use crate::errors::FolioError;
use crate::services::{ContactForm, ContactService};

pub async fn submit_contact(
    form: web::Json<ContactForm>,
    service: web::Data<ContactService>,
) -> impl Responder {
    match service.submit(form.into_inner()).await {
        Ok(()) => message_response(StatusCode::CREATED, MSG_CONTACT_SENT),
        Err(e @ FolioError::Validation(_)) => error_from_folio(&e),
        Err(e) => {
            error!("Contact submission failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, MSG_CONTACT_FAILED)
        }
    }
}

pub fn contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/contact", web::post().to(submit_contact));
}

//! 响应构建帮助函数
//!
//! 成功响应为 `{"message": ...}`，失败响应为 `{"error": ...}`。

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::FolioError;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

/// 构建 `{"message"}` 响应
pub fn message_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(MessageResponse {
            message: message.into(),
        })
}

/// 构建 `{"error"}` 响应
pub fn error_response(status: StatusCode, error: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ErrorResponse {
            error: error.into(),
        })
}

/// 从 FolioError 构建错误响应（自动映射 HTTP 状态码）
pub fn error_from_folio(err: &FolioError) -> HttpResponse {
    error_response(err.http_status(), err.message())
}

/// `web::Json` 解析失败时返回 `{"error"}` 而不是纯文本
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Rejected JSON body on {}: {}", req.path(), err);

    let status = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        JsonPayloadError::ContentType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        _ => StatusCode::BAD_REQUEST,
    };
    let response = error_response(status, format!("Invalid request body: {}", err));
    InternalError::from_response(err, response).into()
}

use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum FolioError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    PasswordHash(String),
    Token(String),
}

impl FolioError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            FolioError::Config(_) => "E001",
            FolioError::DatabaseConfig(_) => "E002",
            FolioError::DatabaseConnection(_) => "E003",
            FolioError::DatabaseOperation(_) => "E004",
            FolioError::FileOperation(_) => "E005",
            FolioError::Validation(_) => "E006",
            FolioError::NotFound(_) => "E007",
            FolioError::Serialization(_) => "E008",
            FolioError::PasswordHash(_) => "E009",
            FolioError::Token(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            FolioError::Config(_) => "Configuration Error",
            FolioError::DatabaseConfig(_) => "Database Configuration Error",
            FolioError::DatabaseConnection(_) => "Database Connection Error",
            FolioError::DatabaseOperation(_) => "Database Operation Error",
            FolioError::FileOperation(_) => "File Operation Error",
            FolioError::Validation(_) => "Validation Error",
            FolioError::NotFound(_) => "Resource Not Found",
            FolioError::Serialization(_) => "Serialization Error",
            FolioError::PasswordHash(_) => "Password Hash Error",
            FolioError::Token(_) => "Token Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            FolioError::Config(msg)
            | FolioError::DatabaseConfig(msg)
            | FolioError::DatabaseConnection(msg)
            | FolioError::DatabaseOperation(msg)
            | FolioError::FileOperation(msg)
            | FolioError::Validation(msg)
            | FolioError::NotFound(msg)
            | FolioError::Serialization(msg)
            | FolioError::PasswordHash(msg)
            | FolioError::Token(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    pub fn http_status(&self) -> StatusCode {
        match self {
            FolioError::Validation(_) | FolioError::Serialization(_) => StatusCode::BAD_REQUEST,
            FolioError::NotFound(_) => StatusCode::NOT_FOUND,
            FolioError::Token(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 启动失败 / CLI）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for FolioError {}

// 便捷的构造函数
impl FolioError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        FolioError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        FolioError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        FolioError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        FolioError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        FolioError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        FolioError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        FolioError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        FolioError::Serialization(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        FolioError::PasswordHash(msg.into())
    }

    pub fn token<T: Into<String>>(msg: T) -> Self {
        FolioError::Token(msg.into())
    }
}

impl From<sea_orm::DbErr> for FolioError {
    fn from(err: sea_orm::DbErr) -> Self {
        FolioError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for FolioError {
    fn from(err: std::io::Error) -> Self {
        FolioError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for FolioError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        FolioError::Token(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            FolioError::config("x"),
            FolioError::database_config("x"),
            FolioError::database_connection("x"),
            FolioError::database_operation("x"),
            FolioError::file_operation("x"),
            FolioError::validation("x"),
            FolioError::not_found("x"),
            FolioError::serialization("x"),
            FolioError::password_hash("x"),
            FolioError::token("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            FolioError::validation("bad").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FolioError::serialization("bad json").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FolioError::token("expired").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            FolioError::database_operation("locked").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_uses_simple_format() {
        let err = FolioError::validation("email is required");
        assert_eq!(err.to_string(), "Validation Error: email is required");
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: FolioError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, FolioError::Serialization(_)));
    }
}

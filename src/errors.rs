use std::fmt;

#[derive(Debug, Clone)]
pub enum GeoFinderError {
    InvalidInput(String),
    NotFound(String),
    Upstream(String),
    Database(String),
    FileOperation(String),
    Serialization(String),
    Config(String),
    Internal(String),
}

impl GeoFinderError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            GeoFinderError::InvalidInput(_) => "E001",
            GeoFinderError::NotFound(_) => "E002",
            GeoFinderError::Upstream(_) => "E003",
            GeoFinderError::Database(_) => "E004",
            GeoFinderError::FileOperation(_) => "E005",
            GeoFinderError::Serialization(_) => "E006",
            GeoFinderError::Config(_) => "E007",
            GeoFinderError::Internal(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            GeoFinderError::InvalidInput(_) => "Invalid Input",
            GeoFinderError::NotFound(_) => "Geolocation Not Found",
            GeoFinderError::Upstream(_) => "Upstream Service Error",
            GeoFinderError::Database(_) => "GeoIP Database Error",
            GeoFinderError::FileOperation(_) => "File Operation Error",
            GeoFinderError::Serialization(_) => "Serialization Error",
            GeoFinderError::Config(_) => "Configuration Error",
            GeoFinderError::Internal(_) => "Internal Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            GeoFinderError::InvalidInput(msg)
            | GeoFinderError::NotFound(msg)
            | GeoFinderError::Upstream(msg)
            | GeoFinderError::Database(msg)
            | GeoFinderError::FileOperation(msg)
            | GeoFinderError::Serialization(msg)
            | GeoFinderError::Config(msg)
            | GeoFinderError::Internal(msg) => msg,
        }
    }

    /// 是否属于调用方可见的客户端错误（4xx）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GeoFinderError::InvalidInput(_) | GeoFinderError::NotFound(_)
        )
    }

    /// 格式化为彩色输出（用于 Server 模式）
    #[cfg(feature = "server")]
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

    /// 格式化为简洁输出（用于 CLI/TUI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for GeoFinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GeoFinderError {}

// 便捷的构造函数
impl GeoFinderError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::NotFound(msg.into())
    }

    pub fn upstream<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::Upstream(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::Database(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::Config(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        GeoFinderError::Internal(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for GeoFinderError {
    fn from(err: std::io::Error) -> Self {
        GeoFinderError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GeoFinderError {
    fn from(err: serde_json::Error) -> Self {
        GeoFinderError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for GeoFinderError {
    fn from(err: csv::Error) -> Self {
        GeoFinderError::Database(err.to_string())
    }
}

impl From<maxminddb::MaxMindDbError> for GeoFinderError {
    fn from(err: maxminddb::MaxMindDbError) -> Self {
        GeoFinderError::Database(err.to_string())
    }
}

impl From<ureq::Error> for GeoFinderError {
    fn from(err: ureq::Error) -> Self {
        GeoFinderError::Upstream(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeoFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_types() {
        let err = GeoFinderError::not_found("no record for 192.0.2.1");
        assert_eq!(err.code(), "E002");
        assert_eq!(err.error_type(), "Geolocation Not Found");
        assert_eq!(err.message(), "no record for 192.0.2.1");
        assert_eq!(
            err.to_string(),
            "Geolocation Not Found: no record for 192.0.2.1"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(GeoFinderError::invalid_input("x").is_client_error());
        assert!(GeoFinderError::not_found("x").is_client_error());
        assert!(!GeoFinderError::upstream("x").is_client_error());
        assert!(!GeoFinderError::database("x").is_client_error());
        assert!(!GeoFinderError::internal("x").is_client_error());
    }

    #[test]
    fn test_from_conversions() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "ranges.csv");
        assert!(matches!(GeoFinderError::from(io), GeoFinderError::FileOperation(_)));

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(GeoFinderError::from(json), GeoFinderError::Serialization(_)));
    }
}

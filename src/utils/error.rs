use bureau_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Not authenticated: run `bureau-console login` first")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Erros que exigem um novo login por parte do operador
    pub fn requires_login(&self) -> bool {
        match self {
            AppError::Unauthenticated | AppError::LoginFailed(_) => true,
            AppError::Api(e) => e.is_unauthorized(),
            _ => false,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_is_transparent() {
        let err: AppError = ApiError::Api {
            status: 404,
            message: "Person not found".into(),
            body: String::new(),
        }
        .into();

        assert_eq!(err.to_string(), "Bureau API error (status 404): Person not found");
        assert!(!err.requires_login());
    }

    #[test]
    fn test_requires_login() {
        assert!(AppError::Unauthenticated.requires_login());
        assert!(AppError::LoginFailed("Invalid credentials".into()).requires_login());

        let expired: AppError = ApiError::Api {
            status: 401,
            message: "Token expired".into(),
            body: String::new(),
        }
        .into();
        assert!(expired.requires_login());
        assert!(!AppError::Forbidden("admin only".into()).requires_login());
    }
}

//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，这里只负责把各层错误转换为 [`AppError`]：
//!
//! | 来源 | 错误码 | HTTP |
//! |------|--------|------|
//! | [`RepoError::Database`] | 9002 | 500 |
//! | [`RepoError::Validation`] | 2 | 400 |
//! | [`ReportError::Store`] | 同 RepoError | 同 RepoError |

pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};

use crate::db::repository::RepoError;
use crate::reports::ReportError;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Store(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_maps_to_database_error() {
        let err: AppError = ReportError::Store(RepoError::Database("disk I/O error".into())).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "disk I/O error");
    }

    #[test]
    fn test_repo_validation_maps_to_validation_failed() {
        let err: AppError = RepoError::Validation("receipt_number is empty".into()).into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}

use thiserror::Error;

use crate::utils::AppError;

/// 服务器启动/运行错误
///
/// 请求级错误走 [`AppError`]；这里只覆盖进程生命周期内的失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("数据库初始化失败: {0}")]
    Database(AppError),

    #[error("端口绑定失败 ({addr}): {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP 服务异常: {0}")]
    Serve(#[source] std::io::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        ServerError::Database(err)
    }
}

/// 服务器生命周期 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

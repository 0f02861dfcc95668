//! 启动错误

use infrastructure_common::{ComponentError, DependencyError};
use thiserror::Error;

/// 容器启动错误
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("日志初始化失败: {message}")]
    Logging { message: String },

    #[error("组件发现失败: {source}")]
    Discovery {
        #[from]
        source: ComponentError,
    },

    #[error("容器构建失败: {source}")]
    Container {
        #[from]
        source: DependencyError,
    },
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;

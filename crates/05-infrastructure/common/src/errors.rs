//! 错误类型定义

use thiserror::Error;

/// 用户构造函数返回的动态错误
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// 组件构造错误
///
/// 单个组件构造失败不会中断整批构建，由容器收集到构建报告中
#[derive(Error, Debug)]
pub enum ConstructionError {
    #[error("组件缺少无参构造能力: {type_name}")]
    MissingConstructor { type_name: String },

    #[error("组件构造失败: {type_name}, 原因: {source}")]
    Failed {
        type_name: String,
        source: DynError,
    },

    #[error("组件构造时发生 panic: {type_name}, 信息: {message}")]
    Panicked { type_name: String, message: String },
}

impl ConstructionError {
    /// 构造失败的组件类型名称
    pub fn type_name(&self) -> &str {
        match self {
            Self::MissingConstructor { type_name }
            | Self::Failed { type_name, .. }
            | Self::Panicked { type_name, .. } => type_name,
        }
    }
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未注册: {type_name}")]
    ComponentNotRegistered { type_name: String },

    #[error("组件存在多个候选实现: {type_name}, 候选: {candidates:?}")]
    AmbiguousComponent {
        type_name: String,
        candidates: Vec<String>,
    },

    #[error("容器已经构建完成，不能再次构建")]
    ContainerAlreadyBuilt,

    #[error("{count} 个组件构造失败: {failed:?}")]
    ConstructionFailed { count: usize, failed: Vec<String> },

    #[error("存在未满足的依赖: {unfilled:?}")]
    UnsatisfiedDependencies { unfilled: Vec<String> },

    #[error("组件发现失败: {source}")]
    Discovery {
        #[from]
        source: ComponentError,
    },
}

impl DependencyError {
    /// 创建组件未注册错误
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::ComponentNotRegistered {
            type_name: type_name.into(),
        }
    }
}

/// 组件错误类型
#[derive(Error, Debug)]
pub enum ComponentError {
    #[error("组件发现失败: {message}")]
    DiscoveryError { message: String },
}

impl ComponentError {
    /// 创建发现错误
    pub fn discovery_error(message: impl Into<String>) -> Self {
        Self::DiscoveryError {
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type ComponentResult<T> = Result<T, ComponentError>;
pub type ConstructionResult<T> = Result<T, ConstructionError>;

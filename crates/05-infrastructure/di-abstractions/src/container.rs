//! 依赖注入容器抽象接口
//!
//! 提供依赖注入容器的核心抽象

use crate::discovery::ComponentDiscovery;
use crate::wirer::UnfilledSlot;
use infrastructure_common::{
    Bean, ComponentType, ConstructionError, DependencyError, DependencyResult, TypeInfo,
};
use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 依赖注入容器 trait
///
/// 容器只有 `Unbuilt -> Built` 一次状态迁移；构建之后只读。
pub trait DiContainer: Send + Sync {
    /// 实例化并装配给定的组件类型
    ///
    /// 只注册通过组件过滤器的类型。成功之后再次调用返回
    /// [`DependencyError::ContainerAlreadyBuilt`]。
    ///
    /// 装配阶段返回错误时（`FailFast` 歧义或 `require_all_slots`），本次创建的实例全部丢弃，
    /// 容器仍是 `Unbuilt`，可以再次构建，构造函数会重新执行。被丢弃的实例之间如果已经
    /// 相互引用，它们不会被释放。
    fn build(&mut self, components: Vec<ComponentType>) -> DependencyResult<BuildReport>;

    /// 通过发现器扫描命名空间后构建
    fn build_from_namespace(
        &mut self,
        discovery: &dyn ComponentDiscovery,
        namespace: &str,
    ) -> DependencyResult<BuildReport> {
        if self.state() == ContainerState::Built {
            return Err(DependencyError::ContainerAlreadyBuilt);
        }
        info!("使用发现器 {} 扫描命名空间: {}", discovery.name(), namespace);
        let components = discovery.discover(namespace)?;
        self.build(components)
    }

    /// 当前状态
    fn state(&self) -> ContainerState;

    /// 按类型查找 Bean
    fn resolve_bean(&self, target: &TypeInfo) -> DependencyResult<Bean>;

    /// 按注册顺序返回所有可以视为目标类型的 Bean
    fn resolve_all_beans(&self, target: TypeId) -> Vec<Bean>;

    /// 获取所有已注册组件的类型信息
    fn registered_components(&self) -> Vec<TypeInfo>;

    /// Bean 数量
    fn bean_count(&self) -> usize;

    /// 获取类型为 `T`（或声明提供 `T`）的 Bean
    fn get_bean<T>(&self) -> DependencyResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        let target = TypeInfo::of::<T>();
        self.resolve_bean(&target)?
            .resolve::<T>()
            .ok_or_else(|| DependencyError::not_registered(target.full_name()))
    }

    /// 获取所有可以视为 `T` 的 Bean
    fn get_beans<T>(&self) -> Vec<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
        Self: Sized,
    {
        self.resolve_all_beans(TypeId::of::<T>())
            .iter()
            .filter_map(|bean| bean.resolve::<T>())
            .collect()
    }

    /// 是否存在可以视为 `T` 的 Bean
    fn contains<T>(&self) -> bool
    where
        T: ?Sized + 'static,
        Self: Sized,
    {
        !self.resolve_all_beans(TypeId::of::<T>()).is_empty()
    }
}

/// 容器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    /// 尚未构建
    Unbuilt,
    /// 已构建，终态
    Built,
}

/// 多个 Bean 满足同一类型时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// 按注册顺序选择第一个
    #[default]
    FirstRegistered,
    /// 报告歧义错误
    FailFast,
}

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 歧义处理策略
    pub ambiguity_policy: AmbiguityPolicy,
    /// 存在未填充槽位时构建失败
    pub require_all_slots: bool,
    /// 捕获构造函数中的 panic 并记录为构造错误
    pub catch_construction_panics: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            ambiguity_policy: AmbiguityPolicy::FirstRegistered,
            require_all_slots: false,
            catch_construction_panics: true,
        }
    }
}

/// 构建报告
///
/// 构造失败和未填充槽位不会中断构建，而是汇总在这里由调用方决定是否接受
#[derive(Debug, Default)]
pub struct BuildReport {
    /// 成功注册的组件，按注册顺序
    pub registered: Vec<TypeInfo>,
    /// 被过滤或重复而跳过的组件
    pub skipped: Vec<TypeInfo>,
    /// 构造失败的组件
    pub construction_failures: Vec<ConstructionError>,
    /// 未能填充的依赖槽位
    pub unfilled_slots: Vec<UnfilledSlot>,
    /// 构建耗时
    pub elapsed: Duration,
}

impl BuildReport {
    /// 所有组件都构造成功且所有槽位都已填充
    pub fn is_complete(&self) -> bool {
        self.construction_failures.is_empty() && self.unfilled_slots.is_empty()
    }

    /// 存在构造失败时转换为错误
    pub fn into_result(self) -> DependencyResult<Self> {
        if self.construction_failures.is_empty() {
            return Ok(self);
        }
        Err(DependencyError::ConstructionFailed {
            count: self.construction_failures.len(),
            failed: self
                .construction_failures
                .iter()
                .map(|failure| failure.type_name().to_string())
                .collect(),
        })
    }
}

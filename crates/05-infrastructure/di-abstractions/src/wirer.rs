//! 依赖装配抽象接口

use crate::registry::BeanRegistry;
use infrastructure_common::{DependencyResult, TypeInfo};
use std::fmt;

/// 依赖装配器 trait
///
/// 在所有 Bean 创建完成之后运行一次，为每个 Bean 的依赖槽位填充兼容的实例
pub trait DependencyWirer: Send + Sync {
    /// 装配注册表中的所有 Bean
    ///
    /// 找不到候选的槽位保持为空并记录在结果中，不视为错误
    fn wire(&self, registry: &dyn BeanRegistry) -> DependencyResult<WiringOutcome>;
}

/// 未能填充的依赖槽位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfilledSlot {
    /// 持有槽位的组件
    pub component: TypeInfo,
    /// 字段名称
    pub field: &'static str,
    /// 槽位目标类型
    pub target: TypeInfo,
}

impl fmt::Display for UnfilledSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}: {}",
            self.component.short_name(),
            self.field,
            self.target.short_name()
        )
    }
}

/// 装配结果
#[derive(Debug, Clone, Default)]
pub struct WiringOutcome {
    /// 本次填充的槽位数量
    pub filled: usize,
    /// 未能填充的槽位
    pub unfilled: Vec<UnfilledSlot>,
}

impl WiringOutcome {
    /// 所有槽位是否都已填充
    pub fn is_complete(&self) -> bool {
        self.unfilled.is_empty()
    }
}

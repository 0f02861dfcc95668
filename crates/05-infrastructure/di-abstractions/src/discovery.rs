//! 组件发现抽象接口
//!
//! 给定命名空间，返回候选组件类型。容器不关心候选从何而来。

use infrastructure_common::{ComponentResult, ComponentType};

/// 组件发现器 trait
pub trait ComponentDiscovery: Send + Sync {
    /// 发现命名空间下的候选组件
    fn discover(&self, namespace: &str) -> ComponentResult<Vec<ComponentType>>;

    /// 获取发现器名称
    fn name(&self) -> &str;
}

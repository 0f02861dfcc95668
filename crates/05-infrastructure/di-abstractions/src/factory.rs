//! 实例工厂抽象接口

use infrastructure_common::{Bean, ComponentType, ConstructionResult};

/// 实例工厂 trait
///
/// 只使用无参构造能力，构造阶段不会读取任何其他 Bean，
/// 因此构造与装配可以严格分为两个阶段。
pub trait InstanceFactory: Send + Sync {
    /// 创建组件实例
    fn instantiate(&self, component: &ComponentType) -> ConstructionResult<Bean>;
}

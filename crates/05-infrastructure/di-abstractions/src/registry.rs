//! Bean 注册表抽象接口

use infrastructure_common::{Bean, DependencyResult, TypeInfo};
use std::any::TypeId;

/// Bean 注册表 trait
///
/// 按注册顺序保存单例实例，并提供按类型兼容性的查找
pub trait BeanRegistry: Send + Sync {
    /// 添加 Bean
    ///
    /// 不检查同一类型是否已存在，去重由调用方负责
    fn add(&mut self, bean: Bean);

    /// 查找第一个可以视为目标类型的 Bean
    ///
    /// 多个候选时的行为由注册表的歧义策略决定
    fn find_first(&self, target: &TypeInfo) -> DependencyResult<&Bean>;

    /// 按注册顺序返回所有可以视为目标类型的 Bean
    fn find_all(&self, target: TypeId) -> Vec<&Bean>;

    /// 按注册顺序遍历所有 Bean
    fn all(&self) -> Box<dyn Iterator<Item = &Bean> + '_>;

    /// Bean 数量
    fn len(&self) -> usize;

    /// 注册表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否存在可以视为目标类型的 Bean
    fn contains(&self, target: TypeId) -> bool {
        self.all().any(|bean| bean.provides(target))
    }
}

//! # Infrastructure Common
//!
//! 依赖注入容器的公共数据模型。
//!
//! ## 核心类型
//!
//! - [`Component`] / [`Injectable`] - 组件标签与注入声明
//! - [`ComponentType`] - 容器可见的组件描述符
//! - [`Slot`] / [`DependencySlot`] - 依赖槽位
//! - [`Bean`] - 容器管理的单例实例
//! - [`TypeInfo`] / [`Stereotype`] - 类型与标签元数据
//!
//! ## 组件目录
//!
//! `#[derive(Component)]` 会在程序启动时把组件描述符提交到全局组件目录，
//! 容器通过命名空间从目录中发现组件。目录只承担"发现"职责，容器本身不是全局状态。

pub mod bean;
pub mod component;
pub mod errors;
pub mod injection;
pub mod metadata;

pub use bean::*;
pub use component::*;
pub use errors::*;
pub use injection::*;
pub use metadata::*;

/// 全局组件目录
static GLOBAL_COMPONENT_CATALOG: once_cell::sync::Lazy<parking_lot::RwLock<Vec<ComponentType>>> =
    once_cell::sync::Lazy::new(|| parking_lot::RwLock::new(Vec::new()));

/// 向全局组件目录提交组件描述符
///
/// 同一类型只保留第一次提交的描述符
pub fn submit_component(component: ComponentType) {
    let mut catalog = GLOBAL_COMPONENT_CATALOG.write();
    if catalog
        .iter()
        .any(|existing| existing.type_info().id == component.type_info().id)
    {
        return;
    }
    catalog.push(component);
}

/// 获取全局组件目录中声明在指定命名空间下的组件
///
/// `ctor` 的执行顺序不确定，结果按完整类型名排序，保证每次构建得到相同的注册顺序
pub fn catalog_components(namespace: &str) -> Vec<ComponentType> {
    let mut components: Vec<ComponentType> = GLOBAL_COMPONENT_CATALOG
        .read()
        .iter()
        .filter(|component| in_namespace(component.namespace(), namespace))
        .cloned()
        .collect();
    components.sort_by(|a, b| a.type_info().module_path.cmp(&b.type_info().module_path));
    components
}

//! 依赖槽位
//!
//! 组件通过 [`Slot`] 字段声明依赖，容器在所有 Bean 创建完成后统一填充。

use crate::{Bean, TypeInfo};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

/// 依赖槽位 trait
///
/// 对容器而言槽位是不透明的注入点：只需要知道目标类型，以及能否用某个 Bean 填充。
pub trait DependencySlot: Send + Sync {
    /// 槽位声明的目标类型
    fn target(&self) -> TypeInfo;

    /// 槽位是否已被填充
    fn is_filled(&self) -> bool;

    /// 尝试使用给定 Bean 填充槽位
    ///
    /// Bean 不能视为目标类型，或槽位已被填充时返回 `false`
    fn fill(&self, bean: &Bean) -> bool;
}

/// 注入槽位，只能被设置一次
///
/// `T` 可以是具体类型，也可以是 `dyn Trait`（trait 需要 `Send + Sync`）。
pub struct Slot<T: ?Sized> {
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Slot<T> {
    /// 创建空槽位
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// 获取注入的实例
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    /// 以引用方式访问注入的实例
    pub fn as_deref(&self) -> Option<&T> {
        self.cell.get().map(|instance| instance.as_ref())
    }

    /// 槽位是否已被填充
    pub fn is_filled(&self) -> bool {
        self.cell.get().is_some()
    }

    /// 手动设置实例，槽位已有值时返回 `false`
    pub fn set(&self, instance: Arc<T>) -> bool {
        self.cell.set(instance).is_ok()
    }
}

impl<T: ?Sized> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("target", &std::any::type_name::<T>())
            .field("filled", &self.is_filled())
            .finish()
    }
}

impl<T: ?Sized + Send + Sync + 'static> DependencySlot for Slot<T> {
    fn target(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn is_filled(&self) -> bool {
        Slot::is_filled(self)
    }

    fn fill(&self, bean: &Bean) -> bool {
        match bean.resolve::<T>() {
            Some(instance) => self.set(instance),
            None => false,
        }
    }
}

/// 槽位字段类型到目标类型的映射，供派生宏生成槽位描述
pub trait SlotTarget {
    type Target: ?Sized + 'static;
}

impl<T: ?Sized + 'static> SlotTarget for Slot<T> {
    type Target = T;
}

/// 槽位描述符，用于在不创建实例的情况下内省组件依赖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDescriptor {
    /// 字段名称
    pub field: &'static str,
    /// 目标类型
    pub target: TypeInfo,
}

impl SlotDescriptor {
    /// 按目标类型创建描述符
    pub fn new<T: ?Sized + 'static>(field: &'static str) -> Self {
        Self {
            field,
            target: TypeInfo::of::<T>(),
        }
    }

    /// 按槽位字段类型创建描述符
    pub fn for_slot<S: SlotTarget>(field: &'static str) -> Self {
        Self::new::<S::Target>(field)
    }
}

/// 实例上的一个注入点
pub struct InjectionPoint<'a> {
    /// 字段名称
    pub field: &'static str,
    /// 槽位
    pub slot: &'a dyn DependencySlot,
}

impl<'a> InjectionPoint<'a> {
    pub fn new(field: &'static str, slot: &'a dyn DependencySlot) -> Self {
        Self { field, slot }
    }
}

impl fmt::Debug for InjectionPoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionPoint")
            .field("field", &self.field)
            .field("target", &self.slot.target())
            .field("filled", &self.slot.is_filled())
            .finish()
    }
}

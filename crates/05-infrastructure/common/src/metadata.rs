//! 元数据定义
//!
//! 提供组件和类型的元数据信息

use std::any::TypeId;
use std::fmt;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 模块路径
    pub module_path: String,
}

impl TypeInfo {
    /// 创建新的类型信息
    pub fn new(type_id: TypeId, name: impl Into<String>) -> Self {
        let full_name = name.into();
        Self {
            name: short_type_name(&full_name).to_string(),
            id: type_id,
            module_path: full_name,
        }
    }

    /// 从类型获取类型信息，支持 `dyn Trait` 等非 Sized 类型
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::new(TypeId::of::<T>(), std::any::type_name::<T>())
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// 完整类型名称
    pub fn full_name(&self) -> &str {
        &self.module_path
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module_path)
    }
}

/// 按 `::` 边界判断路径是否位于命名空间之下，空命名空间匹配全部
pub fn in_namespace(path: &str, namespace: &str) -> bool {
    let namespace = namespace.trim_end_matches("::");
    if namespace.is_empty() {
        return true;
    }
    match path.strip_prefix(namespace) {
        Some(rest) => rest.is_empty() || rest.starts_with("::"),
        None => false,
    }
}

// `dyn a::B + Send` 之类的名称不能简单按最后一个 `::` 切分
fn short_type_name(full_name: &str) -> &str {
    let head = full_name.split('<').next().unwrap_or(full_name);
    let head = head.strip_prefix("dyn ").unwrap_or(head);
    let head = head.split(" + ").next().unwrap_or(head);
    head.rsplit("::").next().unwrap_or(head)
}

/// 组件标签
///
/// 标识一个类型可以被容器自动注册为 Bean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stereotype {
    /// 通用组件
    Component,
    /// 服务
    Service,
    /// 仓储
    Repository,
    /// 控制器
    Controller,
    /// 自定义标签
    Custom(&'static str),
}

impl Stereotype {
    /// 标签名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Stereotype::Component => "component",
            Stereotype::Service => "service",
            Stereotype::Repository => "repository",
            Stereotype::Controller => "controller",
            Stereotype::Custom(name) => name,
        }
    }
}

impl fmt::Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! 组件发现器实现

use di_abstractions::ComponentDiscovery;
use infrastructure_common::{
    catalog_components, in_namespace, Component, ComponentError, ComponentResult, ComponentType,
};
use tracing::debug;

/// 基于显式注册列表的发现器
#[derive(Debug, Clone, Default)]
pub struct CatalogDiscovery {
    components: Vec<ComponentType>,
}

impl CatalogDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有描述符创建
    pub fn from_components(components: Vec<ComponentType>) -> Self {
        Self { components }
    }

    /// 注册实现了 [`Component`] 的类型
    pub fn register<C: Component>(self) -> Self {
        self.with_component(C::component_type())
    }

    /// 注册描述符
    pub fn with_component(mut self, component: ComponentType) -> Self {
        self.components.push(component);
        self
    }

    /// 已注册的描述符数量
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentDiscovery for CatalogDiscovery {
    fn discover(&self, namespace: &str) -> ComponentResult<Vec<ComponentType>> {
        validate_namespace(namespace)?;
        let found: Vec<ComponentType> = self
            .components
            .iter()
            .filter(|component| in_namespace(component.namespace(), namespace))
            .cloned()
            .collect();
        debug!("CatalogDiscovery 在 {} 下发现 {} 个组件", namespace, found.len());
        Ok(found)
    }

    fn name(&self) -> &str {
        "CatalogDiscovery"
    }
}

/// 读取全局组件目录的发现器
///
/// `#[derive(Component)]` 生成的类型在程序启动时提交到全局目录。
/// 返回顺序按完整类型名（含模块路径）排序，与声明顺序和链接顺序无关；
/// 在 [`AmbiguityPolicy::FirstRegistered`](di_abstractions::AmbiguityPolicy) 下，
/// 多个候选时选中类型名最小的一个。
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalCatalogDiscovery;

impl GlobalCatalogDiscovery {
    pub fn new() -> Self {
        Self
    }
}

impl ComponentDiscovery for GlobalCatalogDiscovery {
    fn discover(&self, namespace: &str) -> ComponentResult<Vec<ComponentType>> {
        validate_namespace(namespace)?;
        let found = catalog_components(namespace);
        debug!("全局组件目录在 {} 下发现 {} 个组件", namespace, found.len());
        Ok(found)
    }

    fn name(&self) -> &str {
        "GlobalCatalogDiscovery"
    }
}

/// 命名空间是 `::` 分隔的模块路径，空字符串表示全部
fn validate_namespace(namespace: &str) -> ComponentResult<()> {
    let trimmed = namespace.trim_end_matches("::");
    if trimmed.is_empty() {
        return Ok(());
    }
    let valid = trimmed.split("::").all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_')
    });
    if valid {
        Ok(())
    } else {
        Err(ComponentError::discovery_error(format!(
            "无效的命名空间: {:?}",
            namespace
        )))
    }
}

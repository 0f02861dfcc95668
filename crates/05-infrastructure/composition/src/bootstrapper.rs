//! 容器启动器

use crate::{BootstrapResult, LoggingConfig};
use di_abstractions::{
    BuildReport, ComponentDiscovery, ComponentFilter, ContainerConfig, DiContainer,
};
use di_impl::{DiContainerImpl, GlobalCatalogDiscovery};
use infrastructure_common::{Component, ComponentType};
use tracing::{debug, info};

/// 容器启动器
///
/// 负责协调日志初始化、组件发现和容器构建的顺序。
/// 未添加发现器时使用 [`GlobalCatalogDiscovery`] 扫描命名空间。
pub struct ContainerBootstrapper {
    /// 容器配置
    config: ContainerConfig,
    /// 组件过滤器
    filters: Vec<Box<dyn ComponentFilter>>,
    /// 组件发现器
    discoveries: Vec<Box<dyn ComponentDiscovery>>,
    /// 待扫描的命名空间
    namespaces: Vec<String>,
    /// 显式注册的组件
    components: Vec<ComponentType>,
    /// 日志配置，为空时不初始化日志
    logging: Option<LoggingConfig>,
}

impl ContainerBootstrapper {
    /// 创建新的容器启动器
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            filters: Vec::new(),
            discoveries: Vec::new(),
            namespaces: Vec::new(),
            components: Vec::new(),
            logging: None,
        }
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    /// 添加组件过滤器
    pub fn with_filter(mut self, filter: impl ComponentFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// 添加组件发现器
    pub fn add_discovery(mut self, discovery: impl ComponentDiscovery + 'static) -> Self {
        info!("添加组件发现器: {}", discovery.name());
        self.discoveries.push(Box::new(discovery));
        self
    }

    /// 添加待扫描的命名空间
    pub fn scan_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespaces.push(namespace.into());
        self
    }

    /// 显式注册组件描述符
    pub fn register(mut self, component: ComponentType) -> Self {
        self.components.push(component);
        self
    }

    /// 显式注册组件类型
    pub fn register_component<C: Component>(self) -> Self {
        self.register(C::component_type())
    }

    /// 启动容器
    ///
    /// 返回已构建的容器以及构建报告
    pub fn bootstrap(self) -> BootstrapResult<(DiContainerImpl, BuildReport)> {
        if let Some(logging) = &self.logging {
            logging.init()?;
        }
        info!("开始启动容器");

        let components = self.collect_components()?;

        let mut builder = DiContainerImpl::builder().with_config(self.config);
        for filter in self.filters {
            builder = builder.with_boxed_filter(filter);
        }
        let mut container = builder.build();
        let report = container.build(components)?;

        info!("容器启动完成: {} 个 Bean", container.bean_count());
        Ok((container, report))
    }

    fn collect_components(&self) -> BootstrapResult<Vec<ComponentType>> {
        let mut components = self.components.clone();
        if self.namespaces.is_empty() {
            return Ok(components);
        }

        let global = GlobalCatalogDiscovery::new();
        let discoveries: Vec<&dyn ComponentDiscovery> = if self.discoveries.is_empty() {
            vec![&global as &dyn ComponentDiscovery]
        } else {
            self.discoveries.iter().map(|discovery| discovery.as_ref()).collect()
        };

        for namespace in &self.namespaces {
            for discovery in &discoveries {
                let found = discovery.discover(namespace)?;
                debug!(
                    "发现器 {} 在 {} 下发现 {} 个组件",
                    discovery.name(),
                    namespace,
                    found.len()
                );
                components.extend(found);
            }
        }
        Ok(components)
    }
}

impl Default for ContainerBootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

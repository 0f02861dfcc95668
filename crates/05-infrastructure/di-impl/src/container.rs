//! 依赖注入容器实现

use crate::{BeanRegistryImpl, DefaultInstanceFactory, SlotDependencyWirer};
use di_abstractions::{
    AmbiguityPolicy, BeanRegistry, BuildReport, ComponentFilter, ContainerConfig,
    ContainerState, DependencyWirer, DiContainer, InstanceFactory, StereotypeFilter,
};
use infrastructure_common::{Bean, ComponentType, DependencyError, DependencyResult, TypeInfo};
use std::any::TypeId;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// 具体的依赖注入容器实现
///
/// 构建过程分为过滤、实例化、装配三个阶段，任一阶段返回错误时容器保持未构建状态。
pub struct DiContainerImpl {
    config: ContainerConfig,
    filters: Vec<Box<dyn ComponentFilter>>,
    factory: Box<dyn InstanceFactory>,
    wirer: Box<dyn DependencyWirer>,
    registry: BeanRegistryImpl,
    state: ContainerState,
}

impl DiContainerImpl {
    /// 使用默认配置创建容器
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        Self::builder().with_config(config).build()
    }

    /// 容器构建器
    pub fn builder() -> DiContainerBuilder {
        DiContainerBuilder::new()
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 只读访问注册表
    pub fn registry(&self) -> &dyn BeanRegistry {
        &self.registry
    }

    fn accepts(&self, component: &ComponentType) -> bool {
        self.filters.iter().all(|filter| {
            let matched = filter.matches(component);
            if !matched {
                debug!(
                    "组件被过滤器排除: name={}, filter={}",
                    component.name(),
                    filter.name()
                );
            }
            matched
        })
    }

    fn select(
        &self,
        components: Vec<ComponentType>,
        report: &mut BuildReport,
    ) -> Vec<ComponentType> {
        let mut accepted: Vec<ComponentType> = Vec::with_capacity(components.len());
        for component in components {
            if !self.accepts(&component) {
                report.skipped.push(component.type_info().clone());
                continue;
            }
            if accepted
                .iter()
                .any(|existing| existing.type_info().id == component.type_info().id)
            {
                warn!("重复的组件描述符，保留第一个: {}", component.type_info());
                report.skipped.push(component.type_info().clone());
                continue;
            }
            accepted.push(component);
        }
        accepted
    }
}

impl Default for DiContainerImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl DiContainer for DiContainerImpl {
    fn build(&mut self, components: Vec<ComponentType>) -> DependencyResult<BuildReport> {
        if self.state == ContainerState::Built {
            warn!("容器已经构建完成，忽略重复构建");
            return Err(DependencyError::ContainerAlreadyBuilt);
        }

        let started = Instant::now();
        let mut report = BuildReport::default();
        let accepted = self.select(components, &mut report);
        info!(
            "开始构建容器: {} 个组件, 跳过 {} 个",
            accepted.len(),
            report.skipped.len()
        );

        let mut registry = BeanRegistryImpl::new(self.config.ambiguity_policy);
        for component in &accepted {
            match self.factory.instantiate(component) {
                Ok(bean) => {
                    info!("注册组件: {} ({})", component.name(), bean.type_info());
                    report.registered.push(bean.type_info().clone());
                    registry.add(bean);
                }
                Err(err) => {
                    error!("{}", err);
                    report.construction_failures.push(err);
                }
            }
        }

        let outcome = match self.wirer.wire(&registry) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    "装配失败，丢弃 {} 个实例和 {} 个构造失败记录: {}",
                    registry.len(),
                    report.construction_failures.len(),
                    err
                );
                return Err(err);
            }
        };
        if self.config.require_all_slots && !outcome.is_complete() {
            warn!(
                "存在 {} 个未填充槽位，丢弃 {} 个实例",
                outcome.unfilled.len(),
                registry.len()
            );
            return Err(DependencyError::UnsatisfiedDependencies {
                unfilled: outcome.unfilled.iter().map(ToString::to_string).collect(),
            });
        }
        report.unfilled_slots = outcome.unfilled;

        self.registry = registry;
        self.state = ContainerState::Built;
        report.elapsed = started.elapsed();
        info!(
            "构建容器完成，注册了 {} 个组件, 构造失败 {} 个, 耗时 {:?}",
            report.registered.len(),
            report.construction_failures.len(),
            report.elapsed
        );
        Ok(report)
    }

    fn state(&self) -> ContainerState {
        self.state
    }

    fn resolve_bean(&self, target: &TypeInfo) -> DependencyResult<Bean> {
        self.registry.find_first(target).cloned()
    }

    fn resolve_all_beans(&self, target: TypeId) -> Vec<Bean> {
        self.registry.find_all(target).into_iter().cloned().collect()
    }

    fn registered_components(&self) -> Vec<TypeInfo> {
        self.registry
            .all()
            .map(|bean| bean.type_info().clone())
            .collect()
    }

    fn bean_count(&self) -> usize {
        self.registry.len()
    }
}

/// 容器构建器
pub struct DiContainerBuilder {
    config: ContainerConfig,
    filters: Vec<Box<dyn ComponentFilter>>,
    factory: Option<Box<dyn InstanceFactory>>,
    wirer: Option<Box<dyn DependencyWirer>>,
}

impl DiContainerBuilder {
    pub fn new() -> Self {
        Self {
            config: ContainerConfig::default(),
            filters: Vec::new(),
            factory: None,
            wirer: None,
        }
    }

    /// 替换全部配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置歧义处理策略
    pub fn ambiguity_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.config.ambiguity_policy = policy;
        self
    }

    /// 存在未填充槽位时构建失败
    pub fn require_all_slots(mut self, required: bool) -> Self {
        self.config.require_all_slots = required;
        self
    }

    /// 是否捕获构造函数中的 panic
    pub fn catch_construction_panics(mut self, catch: bool) -> Self {
        self.config.catch_construction_panics = catch;
        self
    }

    /// 添加组件过滤器，未添加时使用 [`StereotypeFilter::any`]
    pub fn with_filter(mut self, filter: impl ComponentFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// 添加已装箱的组件过滤器
    pub fn with_boxed_filter(mut self, filter: Box<dyn ComponentFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// 替换实例工厂
    pub fn with_factory(mut self, factory: impl InstanceFactory + 'static) -> Self {
        self.factory = Some(Box::new(factory));
        self
    }

    /// 替换依赖装配器
    pub fn with_wirer(mut self, wirer: impl DependencyWirer + 'static) -> Self {
        self.wirer = Some(Box::new(wirer));
        self
    }

    /// 创建未构建的容器
    pub fn build(self) -> DiContainerImpl {
        let mut filters = self.filters;
        if filters.is_empty() {
            filters.push(Box::new(StereotypeFilter::any()));
        }
        let catch_panics = self.config.catch_construction_panics;

        DiContainerImpl {
            registry: BeanRegistryImpl::new(self.config.ambiguity_policy),
            config: self.config,
            filters,
            factory: self
                .factory
                .unwrap_or_else(|| Box::new(DefaultInstanceFactory::new(catch_panics))),
            wirer: self
                .wirer
                .unwrap_or_else(|| Box::new(SlotDependencyWirer::new())),
            state: ContainerState::Unbuilt,
        }
    }
}

impl Default for DiContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

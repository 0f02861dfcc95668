//! 组件过滤器
//!
//! 容器只注册通过全部过滤器的组件。默认过滤器是 [`StereotypeFilter::any`]，
//! 即组件至少带有一个组件标签。

use infrastructure_common::{ComponentType, Stereotype};

/// 组件过滤器 trait
pub trait ComponentFilter: Send + Sync {
    /// 检查组件是否通过过滤条件
    fn matches(&self, component: &ComponentType) -> bool;

    /// 过滤器名称
    fn name(&self) -> &str;
}

/// 基于组件标签的过滤器
#[derive(Debug, Clone, Default)]
pub struct StereotypeFilter {
    pub allowed: Vec<Stereotype>,
}

impl StereotypeFilter {
    /// 接受指定标签中的任意一个
    pub fn new(allowed: Vec<Stereotype>) -> Self {
        Self { allowed }
    }

    /// 接受任意组件标签
    pub fn any() -> Self {
        Self::default()
    }

    /// 只接受服务和仓储
    pub fn services_and_repositories() -> Self {
        Self::new(vec![Stereotype::Service, Stereotype::Repository])
    }
}

impl ComponentFilter for StereotypeFilter {
    fn matches(&self, component: &ComponentType) -> bool {
        if self.allowed.is_empty() {
            return component.is_component();
        }
        self.allowed
            .iter()
            .any(|stereotype| component.has_stereotype(*stereotype))
    }

    fn name(&self) -> &str {
        "StereotypeFilter"
    }
}

/// 基于名称模式的过滤器
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    pub patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl NameFilter {
    pub fn new(patterns: Vec<String>) -> Self {
        Self {
            patterns,
            exclude_patterns: Vec::new(),
        }
    }

    pub fn with_exclusions(mut self, exclude_patterns: Vec<String>) -> Self {
        self.exclude_patterns = exclude_patterns;
        self
    }
}

impl ComponentFilter for NameFilter {
    fn matches(&self, component: &ComponentType) -> bool {
        let name = component.type_info().full_name();

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
        {
            return false;
        }

        // 没有包含模式时默认通过
        self.patterns.is_empty()
            || self
                .patterns
                .iter()
                .any(|pattern| name.contains(pattern.as_str()))
    }

    fn name(&self) -> &str {
        "NameFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::Injectable;

    #[derive(Default)]
    struct UserService;
    impl Injectable for UserService {}

    #[derive(Default)]
    struct AuditController;
    impl Injectable for AuditController {}

    #[derive(Default)]
    struct PlainHelper;
    impl Injectable for PlainHelper {}

    fn service() -> ComponentType {
        ComponentType::builder::<UserService>()
            .stereotype(Stereotype::Service)
            .build()
    }

    fn controller() -> ComponentType {
        ComponentType::builder::<AuditController>()
            .stereotype(Stereotype::Controller)
            .build()
    }

    fn untagged() -> ComponentType {
        ComponentType::builder::<PlainHelper>().build()
    }

    #[test]
    fn test_stereotype_filter_any() {
        let filter = StereotypeFilter::any();
        assert!(filter.matches(&service()));
        assert!(filter.matches(&controller()));
        assert!(!filter.matches(&untagged()));
    }

    #[test]
    fn test_stereotype_filter_services_and_repositories() {
        let filter = StereotypeFilter::services_and_repositories();
        assert!(filter.matches(&service()));
        assert!(!filter.matches(&controller()));
        assert!(!filter.matches(&untagged()));
    }

    #[test]
    fn test_name_filter() {
        let filter = NameFilter::new(vec!["Service".to_string(), "Controller".to_string()])
            .with_exclusions(vec!["Audit".to_string()]);
        assert!(filter.matches(&service()));
        assert!(!filter.matches(&controller()));
        assert!(!filter.matches(&untagged()));

        assert!(NameFilter::default().matches(&untagged()));
    }
}

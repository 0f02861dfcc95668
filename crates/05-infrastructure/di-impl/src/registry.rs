//! Bean 注册表实现

use di_abstractions::{AmbiguityPolicy, BeanRegistry};
use infrastructure_common::{Bean, DependencyError, DependencyResult, TypeInfo};
use std::any::TypeId;
use tracing::debug;

/// 按注册顺序保存 Bean 的注册表
#[derive(Debug, Default)]
pub struct BeanRegistryImpl {
    beans: Vec<Bean>,
    policy: AmbiguityPolicy,
}

impl BeanRegistryImpl {
    /// 创建使用指定歧义策略的空注册表
    pub fn new(policy: AmbiguityPolicy) -> Self {
        Self {
            beans: Vec::new(),
            policy,
        }
    }
}

impl BeanRegistry for BeanRegistryImpl {
    fn add(&mut self, bean: Bean) {
        debug!("添加 Bean: {}", bean.type_info());
        self.beans.push(bean);
    }

    fn find_first(&self, target: &TypeInfo) -> DependencyResult<&Bean> {
        let mut candidates = self.beans.iter().filter(|bean| bean.provides(target.id));
        let first = candidates
            .next()
            .ok_or_else(|| DependencyError::not_registered(target.full_name()))?;

        if self.policy == AmbiguityPolicy::FailFast {
            let others: Vec<String> = candidates
                .map(|bean| bean.type_info().full_name().to_string())
                .collect();
            if !others.is_empty() {
                let mut names = vec![first.type_info().full_name().to_string()];
                names.extend(others);
                return Err(DependencyError::AmbiguousComponent {
                    type_name: target.full_name().to_string(),
                    candidates: names,
                });
            }
        }

        Ok(first)
    }

    fn find_all(&self, target: TypeId) -> Vec<&Bean> {
        self.beans
            .iter()
            .filter(|bean| bean.provides(target))
            .collect()
    }

    fn all(&self) -> Box<dyn Iterator<Item = &Bean> + '_> {
        Box::new(self.beans.iter())
    }

    fn len(&self) -> usize {
        self.beans.len()
    }
}

//! 依赖装配实现

use di_abstractions::{BeanRegistry, DependencyWirer, UnfilledSlot, WiringOutcome};
use infrastructure_common::{DependencyError, DependencyResult};
use tracing::{debug, info, warn};

/// 基于槽位的装配器
///
/// 遍历每个 Bean 的每个注入点，用注册表中第一个兼容的 Bean 填充。
/// 所有 Bean 在装配前已经存在，因此相互引用可以直接完成。
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotDependencyWirer;

impl SlotDependencyWirer {
    pub fn new() -> Self {
        Self
    }
}

impl DependencyWirer for SlotDependencyWirer {
    fn wire(&self, registry: &dyn BeanRegistry) -> DependencyResult<WiringOutcome> {
        let mut outcome = WiringOutcome::default();

        for bean in registry.all() {
            for point in bean.injection_points() {
                if point.slot.is_filled() {
                    debug!("槽位已填充，跳过: {}.{}", bean.type_info(), point.field);
                    continue;
                }

                let target = point.slot.target();
                let filled = match registry.find_first(&target) {
                    Ok(candidate) => {
                        debug!(
                            "装配 {}.{} <- {}",
                            bean.type_info().short_name(),
                            point.field,
                            candidate.type_info().short_name()
                        );
                        point.slot.fill(candidate)
                    }
                    Err(DependencyError::ComponentNotRegistered { .. }) => false,
                    Err(err) => return Err(err),
                };

                if filled {
                    outcome.filled += 1;
                } else {
                    let unfilled = UnfilledSlot {
                        component: bean.type_info().clone(),
                        field: point.field,
                        target,
                    };
                    warn!("依赖槽位未能填充: {}", unfilled);
                    outcome.unfilled.push(unfilled);
                }
            }
        }

        info!(
            "依赖装配完成: 填充 {} 个槽位, 未填充 {} 个",
            outcome.filled,
            outcome.unfilled.len()
        );
        Ok(outcome)
    }
}

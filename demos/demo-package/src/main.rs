//! # 容器启动演示
//!
//! 演示组件发现、实例化和依赖装配：
//! - 使用 `#[derive(Component)]` 在编译时声明组件
//! - 按命名空间从全局组件目录发现组件
//! - 通过 `#[inject]` 槽位完成相互引用

use anyhow::Context;
use di_abstractions::DiContainer;
use infrastructure_composition::{ContainerBootstrapper, LoggingConfig};
use tracing::{info, warn};

mod app {
    pub mod persistence {
        use component_macros::Component;

        pub trait UserRepository: Send + Sync {
            fn find_name(&self, id: u32) -> Option<String>;
        }

        /// 固定用户表的仓储
        #[derive(Default, Component)]
        #[component(repository)]
        #[provides(dyn UserRepository)]
        pub struct InMemoryUserRepository;

        impl UserRepository for InMemoryUserRepository {
            fn find_name(&self, id: u32) -> Option<String> {
                match id {
                    1 => Some("alice".to_string()),
                    2 => Some("bob".to_string()),
                    _ => None,
                }
            }
        }
    }

    pub mod services {
        use super::persistence::UserRepository;
        use component_macros::Component;
        use infrastructure_common::Slot;

        #[derive(Default, Component)]
        #[component(service)]
        pub struct GreetingService {
            #[inject]
            repository: Slot<dyn UserRepository>,
            #[inject]
            audit: Slot<AuditService>,
        }

        impl GreetingService {
            pub fn greet(&self, id: u32) -> String {
                let name = self
                    .repository
                    .as_deref()
                    .and_then(|repository| repository.find_name(id))
                    .unwrap_or_else(|| "guest".to_string());
                if let Some(audit) = self.audit.as_deref() {
                    audit.record(&name);
                }
                format!("你好, {}", name)
            }
        }

        /// 与 GreetingService 相互引用
        #[derive(Default, Component)]
        #[component(service)]
        pub struct AuditService {
            #[inject]
            greeting: Slot<GreetingService>,
        }

        impl AuditService {
            pub fn record(&self, name: &str) {
                tracing::info!("审计: 问候 {}", name);
            }

            pub fn is_wired(&self) -> bool {
                self.greeting.is_filled()
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (container, report) = ContainerBootstrapper::new()
        .with_logging(LoggingConfig::development())
        .scan_namespace(concat!(module_path!(), "::app"))
        .bootstrap()
        .context("容器启动失败")?;

    info!(
        "注册了 {} 个组件, 耗时 {:?}",
        report.registered.len(),
        report.elapsed
    );
    for slot in &report.unfilled_slots {
        warn!("未填充的依赖: {}", slot);
    }

    let greeting = container.get_bean::<app::services::GreetingService>()?;
    let audit = container.get_bean::<app::services::AuditService>()?;
    info!("{}", greeting.greet(1));
    info!("{}", greeting.greet(7));
    info!("AuditService 已装配: {}", audit.is_wired());

    for component in container.registered_components() {
        info!("  - {}", component);
    }
    Ok(())
}

//! 实例工厂实现

use di_abstractions::InstanceFactory;
use infrastructure_common::{Bean, ComponentType, ConstructionError, ConstructionResult};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// 调用组件无参构造函数的默认工厂
#[derive(Debug, Clone)]
pub struct DefaultInstanceFactory {
    catch_panics: bool,
}

impl DefaultInstanceFactory {
    pub fn new(catch_panics: bool) -> Self {
        Self { catch_panics }
    }
}

impl Default for DefaultInstanceFactory {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InstanceFactory for DefaultInstanceFactory {
    fn instantiate(&self, component: &ComponentType) -> ConstructionResult<Bean> {
        let type_name = component.type_info().full_name();
        let constructor =
            component
                .constructor()
                .ok_or_else(|| ConstructionError::MissingConstructor {
                    type_name: type_name.to_string(),
                })?;

        debug!("实例化组件: {}", type_name);
        let outcome = if self.catch_panics {
            panic::catch_unwind(AssertUnwindSafe(|| constructor())).map_err(|payload| {
                ConstructionError::Panicked {
                    type_name: type_name.to_string(),
                    message: panic_message(payload.as_ref()),
                }
            })?
        } else {
            constructor()
        };

        let instance = outcome.map_err(|source| ConstructionError::Failed {
            type_name: type_name.to_string(),
            source,
        })?;

        Ok(Bean::new(component.clone(), instance))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知 panic".to_string()
    }
}

//! Bean：容器管理的单例实例

use crate::{ComponentType, InjectionPoint, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// 容器中的单例实例
///
/// Bean 以对象身份区分，克隆只会复制引用。
#[derive(Clone)]
pub struct Bean {
    component: ComponentType,
    instance: Arc<dyn Any + Send + Sync>,
}

impl Bean {
    /// 由组件类型和它构造出的实例创建 Bean
    pub fn new(component: ComponentType, instance: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            component,
            instance,
        }
    }

    /// 组件类型信息
    pub fn type_info(&self) -> &TypeInfo {
        self.component.type_info()
    }

    /// 组件描述符
    pub fn component(&self) -> &ComponentType {
        &self.component
    }

    /// 类型擦除后的实例
    pub fn instance(&self) -> &Arc<dyn Any + Send + Sync> {
        &self.instance
    }

    /// 是否可以视为指定类型
    pub fn provides(&self, type_id: TypeId) -> bool {
        self.component.provides(type_id)
    }

    /// 以指定类型（自身或声明提供的 trait object）取得实例
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        let target = TypeId::of::<T>();
        self.component
            .provisions()
            .iter()
            .filter(|provision| provision.type_info().id == target)
            .find_map(|provision| provision.apply(self.instance.clone()))
            .and_then(|boxed| boxed.downcast::<Arc<T>>().ok())
            .map(|instance| *instance)
    }

    /// 实例上的所有注入点
    pub fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        self.component.injection_points(self.instance.as_ref())
    }
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("type", &self.type_info().module_path)
            .field("instance", &Arc::as_ptr(&self.instance))
            .finish()
    }
}

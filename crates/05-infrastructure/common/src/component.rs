//! 组件基础接口定义
//!
//! [`ComponentType`] 是容器看到的全部类型信息：无参构造能力、依赖槽位、
//! 可提供的类型以及组件标签。它可以由 `#[derive(Component)]` 生成，也可以
//! 通过 [`ComponentType::builder`] 手写。

use crate::{DynError, InjectionPoint, SlotDescriptor, Stereotype, TypeInfo};
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 可注入组件 trait
///
/// 声明实例上的依赖槽位，默认没有任何槽位
pub trait Injectable: Send + Sync + 'static {
    /// 静态槽位描述
    fn slot_descriptors() -> Vec<SlotDescriptor>
    where
        Self: Sized,
    {
        Vec::new()
    }

    /// 实例上的注入点
    fn injection_points(&self) -> Vec<InjectionPoint<'_>> {
        Vec::new()
    }
}

/// 组件基础 trait
///
/// 实现此 trait 的类型可以被容器发现并注册为 Bean
pub trait Component: Injectable + Sized {
    /// 组件描述符
    fn component_type() -> ComponentType;
}

/// 无参构造函数
pub type ConstructorFn =
    Arc<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, DynError> + Send + Sync>;

type UpcastFn =
    Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

type InjectionPointsFn =
    for<'a> fn(&'a (dyn Any + Send + Sync + 'static)) -> Vec<InjectionPoint<'a>>;

/// 组件可以被视为的一种类型
///
/// 装箱结果里存放的是 `Arc<T>`
#[derive(Clone)]
pub struct Provision {
    type_info: TypeInfo,
    upcast: UpcastFn,
}

impl Provision {
    fn identity<C: Injectable>() -> Self {
        Self {
            type_info: TypeInfo::of::<C>(),
            upcast: Arc::new(|instance: Arc<dyn Any + Send + Sync>| {
                instance
                    .downcast::<C>()
                    .ok()
                    .map(|component| Box::new(component) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    fn upcast<C, T>(upcast: fn(Arc<C>) -> Arc<T>) -> Self
    where
        C: Injectable,
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            upcast: Arc::new(move |instance: Arc<dyn Any + Send + Sync>| {
                instance
                    .downcast::<C>()
                    .ok()
                    .map(|component| Box::new(upcast(component)) as Box<dyn Any + Send + Sync>)
            }),
        }
    }

    /// 提供的类型
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    pub(crate) fn apply(
        &self,
        instance: Arc<dyn Any + Send + Sync>,
    ) -> Option<Box<dyn Any + Send + Sync>> {
        (self.upcast)(instance)
    }
}

impl fmt::Debug for Provision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Provision")
            .field(&self.type_info.module_path)
            .finish()
    }
}

/// 组件描述符
#[derive(Clone)]
pub struct ComponentType {
    type_info: TypeInfo,
    name: String,
    namespace: String,
    stereotypes: Vec<Stereotype>,
    constructor: Option<ConstructorFn>,
    provisions: Vec<Provision>,
    slots: Vec<SlotDescriptor>,
    injection_points: InjectionPointsFn,
}

impl ComponentType {
    /// 从实现了 [`Component`] 的类型获取描述符
    pub fn of<C: Component>() -> Self {
        C::component_type()
    }

    /// 手动构建描述符
    pub fn builder<C: Injectable>() -> ComponentTypeBuilder<C> {
        ComponentTypeBuilder::new()
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 组件名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 组件声明所在的命名空间
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 组件标签
    pub fn stereotypes(&self) -> &[Stereotype] {
        &self.stereotypes
    }

    /// 是否带有组件标签
    pub fn is_component(&self) -> bool {
        !self.stereotypes.is_empty()
    }

    /// 是否带有指定标签
    pub fn has_stereotype(&self, stereotype: Stereotype) -> bool {
        self.stereotypes.contains(&stereotype)
    }

    /// 无参构造函数
    pub fn constructor(&self) -> Option<&ConstructorFn> {
        self.constructor.as_ref()
    }

    /// 可以被视为的类型，第一个总是组件自身
    pub fn provisions(&self) -> &[Provision] {
        &self.provisions
    }

    /// 是否可以视为指定类型
    pub fn provides(&self, type_id: TypeId) -> bool {
        self.provisions
            .iter()
            .any(|provision| provision.type_info.id == type_id)
    }

    /// 声明的依赖槽位
    pub fn slots(&self) -> &[SlotDescriptor] {
        &self.slots
    }

    /// 取出实例上的注入点，实例类型不匹配时返回空
    pub fn injection_points<'a>(
        &self,
        instance: &'a (dyn Any + Send + Sync + 'static),
    ) -> Vec<InjectionPoint<'a>> {
        (self.injection_points)(instance)
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("type", &self.type_info.module_path)
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("stereotypes", &self.stereotypes)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .field("provisions", &self.provisions)
            .field("slots", &self.slots)
            .finish()
    }
}

fn injection_points_of<'a, C: Injectable>(
    instance: &'a (dyn Any + Send + Sync + 'static),
) -> Vec<InjectionPoint<'a>> {
    instance
        .downcast_ref::<C>()
        .map(|component| component.injection_points())
        .unwrap_or_default()
}

/// 组件描述符构建器
pub struct ComponentTypeBuilder<C> {
    inner: ComponentType,
    _component: PhantomData<fn() -> C>,
}

impl<C: Injectable> ComponentTypeBuilder<C> {
    fn new() -> Self {
        let type_info = TypeInfo::of::<C>();
        // 泛型参数里也有 `::`，只看 `<` 之前的路径
        let path = type_info
            .module_path
            .split('<')
            .next()
            .unwrap_or(&type_info.module_path);
        let namespace = path
            .rsplit_once("::")
            .map(|(namespace, _)| namespace.to_string())
            .unwrap_or_default();
        Self {
            inner: ComponentType {
                name: type_info.name.clone(),
                namespace,
                stereotypes: Vec::new(),
                constructor: None,
                provisions: vec![Provision::identity::<C>()],
                slots: C::slot_descriptors(),
                injection_points: injection_points_of::<C>,
                type_info,
            },
            _component: PhantomData,
        }
    }

    /// 设置组件名称
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    /// 设置命名空间，派生宏使用 `module_path!()`
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.inner.namespace = namespace.into();
        self
    }

    /// 添加组件标签
    pub fn stereotype(mut self, stereotype: Stereotype) -> Self {
        if !self.inner.stereotypes.contains(&stereotype) {
            self.inner.stereotypes.push(stereotype);
        }
        self
    }

    /// 设置无参构造函数
    pub fn constructor(mut self, constructor: fn() -> C) -> Self {
        self.inner.constructor = Some(Arc::new(
            move || -> Result<Arc<dyn Any + Send + Sync>, DynError> {
                let instance: Arc<dyn Any + Send + Sync> = Arc::new(constructor());
                Ok(instance)
            },
        ));
        self
    }

    /// 设置可能失败的无参构造函数
    pub fn try_constructor<E>(mut self, constructor: fn() -> Result<C, E>) -> Self
    where
        E: Into<DynError> + 'static,
    {
        self.inner.constructor = Some(Arc::new(
            move || -> Result<Arc<dyn Any + Send + Sync>, DynError> {
                let component = constructor().map_err(Into::<DynError>::into)?;
                let instance: Arc<dyn Any + Send + Sync> = Arc::new(component);
                Ok(instance)
            },
        ));
        self
    }

    /// 使用 `Default` 作为无参构造函数
    pub fn default_constructor(self) -> Self
    where
        C: Default,
    {
        self.constructor(C::default)
    }

    /// 声明组件可以被视为类型 `T`，通常是它实现的 trait object
    ///
    /// ```ignore
    /// ComponentType::builder::<PgUserRepository>()
    ///     .provides::<dyn UserRepository>(|repository| repository)
    /// ```
    pub fn provides<T>(mut self, upcast: fn(Arc<C>) -> Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let provision = Provision::upcast::<C, T>(upcast);
        if !self.inner.provides(provision.type_info.id) {
            self.inner.provisions.push(provision);
        }
        self
    }

    /// 完成构建
    pub fn build(self) -> ComponentType {
        self.inner
    }
}

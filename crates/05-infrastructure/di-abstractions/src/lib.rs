//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件发现、实例化、装配和查找的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentDiscovery`] - 组件发现器接口
//! - [`ComponentFilter`] - 组件标签过滤
//! - [`BeanRegistry`] - Bean 注册表接口
//! - [`InstanceFactory`] - 实例工厂接口
//! - [`DependencyWirer`] - 依赖装配器接口
//! - [`DiContainer`] - 容器门面接口

pub mod container;
pub mod discovery;
pub mod factory;
pub mod filter;
pub mod registry;
pub mod wirer;

pub use container::*;
pub use discovery::*;
pub use factory::*;
pub use filter::*;
pub use registry::*;
pub use wirer::*;

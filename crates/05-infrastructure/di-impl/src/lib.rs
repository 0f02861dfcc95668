//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器、Bean 注册表、实例工厂、依赖装配器和组件发现器实现
//!
//! ```ignore
//! use di_abstractions::DiContainer;
//! use di_impl::{DiContainerImpl, GlobalCatalogDiscovery};
//!
//! let mut container = DiContainerImpl::new();
//! let report = container.build_from_namespace(&GlobalCatalogDiscovery, module_path!())?;
//! let service = container.get_bean::<UserService>()?;
//! ```

pub mod container;
pub mod discovery;
pub mod factory;
pub mod registry;
pub mod wirer;

pub use container::{DiContainerBuilder, DiContainerImpl};
pub use discovery::{CatalogDiscovery, GlobalCatalogDiscovery};
pub use factory::DefaultInstanceFactory;
pub use registry::BeanRegistryImpl;
pub use wirer::SlotDependencyWirer;

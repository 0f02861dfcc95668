//! # 基础设施组合层
//!
//! 这个 crate 负责把日志初始化、组件发现和容器构建组合成一次启动调用。
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{ContainerBootstrapper, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (container, report) = ContainerBootstrapper::new()
//!         .with_logging(LoggingConfig::development())
//!         .scan_namespace("my_app::services")
//!         .bootstrap()?;
//!
//!     println!("注册了 {} 个组件", report.registered.len());
//!     drop(container);
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod error;
pub mod logging;

// 重新导出主要类型
pub use bootstrapper::ContainerBootstrapper;
pub use error::{BootstrapError, BootstrapResult};
pub use logging::LoggingConfig;

//! # Component Macros
//!
//! 这个 crate 提供了用于自动组件注册的过程宏。
//!
//! ## 使用示例
//!
//! ```ignore
//! use component_macros::Component;
//! use infrastructure_common::Slot;
//!
//! pub trait UserRepository: Send + Sync {}
//!
//! #[derive(Default, Component)]
//! #[component(repository)]
//! #[provides(dyn UserRepository)]
//! pub struct PgUserRepository;
//!
//! impl UserRepository for PgUserRepository {}
//!
//! #[derive(Default, Component)]
//! #[component(service)]
//! pub struct UserService {
//!     #[inject]
//!     repository: Slot<dyn UserRepository>,
//! }
//! ```
//!
//! 使用该宏的 crate 需要同时依赖 `infrastructure-common` 和 `ctor`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 组件派生宏
///
/// 为结构体实现 `Injectable` 和 `Component`，并在程序启动时把组件描述符
/// 提交到全局组件目录，命名空间为声明所在的 `module_path!()`。
///
/// # 结构体参数 `#[component(...)]`
///
/// - `component` / `service` / `repository` / `controller` - 组件标签，未指定时为 `component`
/// - `stereotype = "name"` - 自定义标签
/// - `name = "custom_name"` - 自定义组件名称
/// - `constructor = "path::to::fn"` - 无参构造函数 `fn() -> Self`
/// - `try_constructor = "path::to::fn"` - 可能失败的无参构造函数 `fn() -> Result<Self, E>`
/// - `no_constructor` - 不提供构造能力
///
/// 三种构造参数都未指定时使用 `Default::default`。
///
/// # 其他属性
///
/// - `#[provides(dyn Trait, ...)]` - 组件可以被视为的其他类型
/// - `#[inject]` - 标记 `Slot<T>` 字段为依赖槽位
///
/// 槽位与提供类型按 `TypeId` 精确匹配。`dyn Notifier + Send + Sync` 和 `dyn Notifier`
/// 是不同的类型：`#[provides(dyn Notifier + Send + Sync)]` 不会填充 `Slot<dyn Notifier>`，
/// 槽位保持为空，只在日志中留下警告。把 `Send + Sync` 写成 trait 的父 trait，
/// 两边都使用 `dyn Notifier`。
#[proc_macro_derive(Component, attributes(component, provides, inject))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input).into()
}

//! 组件派生宏实现

use crate::utils::{field_has_attribute, to_snake_case};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    punctuated::Punctuated, Data, DeriveInput, Error, ExprPath, Fields, Ident, LitStr, Result,
    Token, Type,
};

/// 组件标签
#[derive(Debug, Clone, PartialEq)]
pub enum StereotypeArg {
    Component,
    Service,
    Repository,
    Controller,
    Custom(String),
}

/// 无参构造方式
#[derive(Clone)]
pub enum ConstructorArg {
    /// 使用 `Default::default`
    Default,
    /// 不提供构造能力
    None,
    Infallible(ExprPath),
    Fallible(ExprPath),
}

/// `#[component(...)]` 参数
#[derive(Clone)]
pub struct ComponentArgs {
    /// 自定义组件名称
    pub name: Option<String>,
    /// 组件标签，为空时使用 `Component`
    pub stereotypes: Vec<StereotypeArg>,
    /// 构造方式
    pub constructor: ConstructorArg,
}

impl Default for ComponentArgs {
    fn default() -> Self {
        Self {
            name: None,
            stereotypes: Vec::new(),
            constructor: ConstructorArg::Default,
        }
    }
}

impl ComponentArgs {
    fn from_attrs(input: &DeriveInput) -> Result<Self> {
        let mut args = ComponentArgs::default();

        for attr in input
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("component"))
        {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("component") {
                    args.stereotypes.push(StereotypeArg::Component);
                } else if meta.path.is_ident("service") {
                    args.stereotypes.push(StereotypeArg::Service);
                } else if meta.path.is_ident("repository") {
                    args.stereotypes.push(StereotypeArg::Repository);
                } else if meta.path.is_ident("controller") {
                    args.stereotypes.push(StereotypeArg::Controller);
                } else if meta.path.is_ident("stereotype") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.stereotypes.push(StereotypeArg::Custom(value.value()));
                } else if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.name = Some(value.value());
                } else if meta.path.is_ident("constructor") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.constructor = ConstructorArg::Infallible(value.parse()?);
                } else if meta.path.is_ident("try_constructor") {
                    let value: LitStr = meta.value()?.parse()?;
                    args.constructor = ConstructorArg::Fallible(value.parse()?);
                } else if meta.path.is_ident("no_constructor") {
                    args.constructor = ConstructorArg::None;
                } else {
                    return Err(meta.error("不支持的 component 参数"));
                }
                Ok(())
            })?;
        }

        if args.stereotypes.is_empty() {
            args.stereotypes.push(StereotypeArg::Component);
        }
        Ok(args)
    }
}

/// 实现 #[derive(Component)] 宏
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    expand(&input).unwrap_or_else(Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "组件不能是泛型类型，全局组件目录需要具体类型",
        ));
    }

    let struct_name = &input.ident;
    let args = ComponentArgs::from_attrs(input)?;
    let provided = provided_types(input)?;
    let injected = injected_fields(input)?;

    let injectable_impl = generate_injectable(struct_name, &injected);
    let component_impl = generate_component(struct_name, &args, &provided);
    let registration_code = generate_registration_code(struct_name);

    Ok(quote! {
        #injectable_impl

        #component_impl

        #registration_code
    })
}

/// `#[provides(dyn A, dyn B)]`
fn provided_types(input: &DeriveInput) -> Result<Vec<Type>> {
    let mut types = Vec::new();
    for attr in input
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("provides"))
    {
        let parsed = attr.parse_args_with(Punctuated::<Type, Token![,]>::parse_terminated)?;
        types.extend(parsed);
    }
    Ok(types)
}

/// 标记了 `#[inject]` 的字段
fn injected_fields(input: &DeriveInput) -> Result<Vec<(Ident, Type)>> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "#[derive(Component)] 只支持结构体",
            ))
        }
    };

    match fields {
        Fields::Named(named) => Ok(named
            .named
            .iter()
            .filter(|field| field_has_attribute(field, "inject"))
            .filter_map(|field| {
                field
                    .ident
                    .clone()
                    .map(|ident| (ident, field.ty.clone()))
            })
            .collect()),
        Fields::Unnamed(unnamed) => {
            match unnamed
                .unnamed
                .iter()
                .find(|field| field_has_attribute(field, "inject"))
            {
                Some(field) => Err(Error::new_spanned(field, "#[inject] 只能用于具名字段")),
                None => Ok(Vec::new()),
            }
        }
        Fields::Unit => Ok(Vec::new()),
    }
}

fn generate_injectable(struct_name: &Ident, injected: &[(Ident, Type)]) -> TokenStream {
    if injected.is_empty() {
        return quote! {
            impl infrastructure_common::Injectable for #struct_name {}
        };
    }

    let descriptors = injected.iter().map(|(field, ty)| {
        let field_name = field.to_string();
        quote! {
            infrastructure_common::SlotDescriptor::for_slot::<#ty>(#field_name)
        }
    });
    let points = injected.iter().map(|(field, _)| {
        let field_name = field.to_string();
        quote! {
            infrastructure_common::InjectionPoint::new(#field_name, &self.#field)
        }
    });

    quote! {
        impl infrastructure_common::Injectable for #struct_name {
            fn slot_descriptors() -> ::std::vec::Vec<infrastructure_common::SlotDescriptor> {
                ::std::vec![#(#descriptors),*]
            }

            fn injection_points(&self) -> ::std::vec::Vec<infrastructure_common::InjectionPoint<'_>> {
                ::std::vec![#(#points),*]
            }
        }
    }
}

fn generate_component(
    struct_name: &Ident,
    args: &ComponentArgs,
    provided: &[Type],
) -> TokenStream {
    let name = args.name.as_ref().map(|name| quote! { .name(#name) });

    let stereotypes = args.stereotypes.iter().map(|stereotype| {
        let variant = match stereotype {
            StereotypeArg::Component => quote! { Component },
            StereotypeArg::Service => quote! { Service },
            StereotypeArg::Repository => quote! { Repository },
            StereotypeArg::Controller => quote! { Controller },
            StereotypeArg::Custom(custom) => quote! { Custom(#custom) },
        };
        quote! { .stereotype(infrastructure_common::Stereotype::#variant) }
    });

    let constructor = match &args.constructor {
        ConstructorArg::Default => quote! { .default_constructor() },
        ConstructorArg::None => quote! {},
        ConstructorArg::Infallible(path) => quote! { .constructor(#path) },
        ConstructorArg::Fallible(path) => quote! { .try_constructor(#path) },
    };

    let provisions = provided.iter().map(|ty| {
        quote! {
            .provides::<#ty>(|component: ::std::sync::Arc<Self>| -> ::std::sync::Arc<#ty> {
                component
            })
        }
    });

    quote! {
        impl infrastructure_common::Component for #struct_name {
            fn component_type() -> infrastructure_common::ComponentType {
                infrastructure_common::ComponentType::builder::<Self>()
                    #name
                    .namespace(::std::module_path!())
                    #(#stereotypes)*
                    #constructor
                    #(#provisions)*
                    .build()
            }
        }
    }
}

/// 生成组件自动注册代码
fn generate_registration_code(struct_name: &Ident) -> TokenStream {
    let registration_fn_name = Ident::new(
        &format!(
            "__register_component_{}",
            to_snake_case(&struct_name.to_string())
        ),
        Span::call_site(),
    );

    quote! {
        // 使用 ctor 在程序启动时提交到全局组件目录
        #[ctor::ctor]
        fn #registration_fn_name() {
            infrastructure_common::submit_component(
                <#struct_name as infrastructure_common::Component>::component_type(),
            );
        }
    }
}

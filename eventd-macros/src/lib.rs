use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod event_body;
mod utils;

/// 事件名派生宏
/// - 为目标类型实现 `::eventd::EventBody`，`NAME` 默认为类型的裸标识符（不含模块路径与泛型）
/// - 支持参数：`#[event_body(name = "...")]` 覆写事件名
/// - 适用于 struct / enum；泛型类型的所有实例共享同一名称
#[proc_macro_derive(EventBody, attributes(event_body))]
pub fn derive_event_body(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    event_body::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

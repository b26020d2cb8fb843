use crate::utils::parse_event_body_attrs;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Result, spanned::Spanned};

/// #[derive(EventBody)] 实现
/// - 拒绝 union：载荷需要是普通的 struct/enum
/// - 事件名：`#[event_body(name = "...")]` 优先，否则取类型标识符
pub(crate) fn expand(input: DeriveInput) -> Result<TokenStream2> {
    if let Data::Union(u) = &input.data {
        return Err(syn::Error::new(
            u.union_token.span(),
            "#[derive(EventBody)] supports only struct or enum",
        ));
    }

    let cfg = parse_event_body_attrs(&input.attrs)?;

    let ident = &input.ident;
    let name = cfg
        .name
        .unwrap_or_else(|| syn::LitStr::new(&ident.to_string(), ident.span()));

    let mut generics = input.generics.clone();
    // EventBody: Any + Send + Sync，泛型参数需同样满足
    for param in generics.type_params_mut() {
        param.bounds.push(syn::parse_quote!(::std::marker::Send));
        param.bounds.push(syn::parse_quote!(::std::marker::Sync));
        param.bounds.push(syn::parse_quote!('static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let out = quote! {
        impl #impl_generics ::eventd::EventBody for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    };

    Ok(out)
}

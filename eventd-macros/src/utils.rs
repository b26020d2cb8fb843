use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, Ident, Result, Token, parse::Parse, parse::ParseStream};

pub(crate) struct EventBodyAttrConfig {
    pub(crate) name: Option<syn::LitStr>,
}

// 解析 #[event_body(name = "...")]，允许出现多次但键不可重复
pub(crate) fn parse_event_body_attrs(attrs: &[Attribute]) -> Result<EventBodyAttrConfig> {
    let mut name: Option<syn::LitStr> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("event_body")) {
        let pairs: Punctuated<AttrKv, Token![,]> =
            attr.parse_args_with(Punctuated::<AttrKv, Token![,]>::parse_terminated)?;

        for kv in pairs {
            match kv.key.to_string().as_str() {
                "name" => {
                    if name.is_some() {
                        return Err(syn::Error::new(
                            kv.key.span(),
                            "duplicate key 'name' in attribute",
                        ));
                    }
                    let lit = match kv.value {
                        Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(lit),
                            ..
                        }) => lit,
                        other => {
                            return Err(syn::Error::new(
                                other.span(),
                                "expected string literal for 'name'",
                            ));
                        }
                    };
                    name = Some(lit);
                }
                _ => {
                    return Err(syn::Error::new(
                        kv.key.span(),
                        "unknown key; expected 'name'",
                    ));
                }
            }
        }
    }

    Ok(EventBodyAttrConfig { name })
}

struct AttrKv {
    key: Ident,
    #[allow(dead_code)]
    eq: Token![=],
    value: Expr,
}

impl Parse for AttrKv {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            key: input.parse()?,
            eq: input.parse()?,
            value: input.parse()?,
        })
    }
}

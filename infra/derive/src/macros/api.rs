use crate::macros::derived_trait_names;
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ItemStruct, Lit, LitStr, Meta, MetaNameValue, Token};

#[derive(Default)]
struct ModelArgs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: Option<bool>,
}

#[derive(Default)]
struct SerdeAttrs {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands the `#[api_model]` attribute macro.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    match expand(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(args: TokenStream, input: &ItemStruct) -> syn::Result<TokenStream> {
    let args = parse_args(args)?;
    let serde = serde_attrs(&input.attrs)?;

    let derives = derived_trait_names(&input.attrs);
    let missing: Vec<TokenStream> = [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ]
    .into_iter()
    .filter(|(name, _)| !derives.contains(*name))
    .map(|(_, tokens)| tokens)
    .collect();
    let derive_attr = if missing.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#missing),*)] }
    };

    let policy = args.rename_all.unwrap_or_else(|| LitStr::new("camelCase", Span::call_site()));
    let rename_attr = match &serde.rename_all {
        Some(existing) if existing.value() != policy.value() => {
            return Err(syn::Error::new_spanned(
                existing,
                "Conflicting serde rename_all; remove it or set api_model(rename_all = \"...\") to match",
            ));
        },
        Some(_) => quote! {},
        None => quote! { #[serde(rename_all = #policy)] },
    };

    let deny = args.deny_unknown_fields.unwrap_or(true);
    let deny_attr = match (serde.deny_unknown_fields, deny) {
        (true, false) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "deny_unknown_fields is already set via serde; remove it before disabling",
            ));
        },
        (false, true) => quote! { #[serde(deny_unknown_fields)] },
        _ => quote! {},
    };

    Ok(quote! {
        #derive_attr
        #rename_attr
        #deny_attr
        #input
    })
}

fn parse_args(args: TokenStream) -> syn::Result<ModelArgs> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated.parse2(args)?;
    let mut parsed = ModelArgs::default();

    for meta in metas {
        let Meta::NameValue(pair) = meta else {
            return Err(syn::Error::new_spanned(
                meta,
                "Expected name-value arguments like `rename_all = \"...\"`",
            ));
        };

        if pair.path.is_ident("rename_all") {
            ensure_unset(parsed.rename_all.is_some(), &pair)?;
            parsed.rename_all = Some(string_literal(&pair)?);
        } else if pair.path.is_ident("deny_unknown_fields") {
            ensure_unset(parsed.deny_unknown_fields.is_some(), &pair)?;
            parsed.deny_unknown_fields = Some(bool_literal(&pair)?);
        } else {
            return Err(syn::Error::new_spanned(
                pair.path,
                "Unsupported argument; expected rename_all or deny_unknown_fields",
            ));
        }
    }

    Ok(parsed)
}

fn ensure_unset(already_set: bool, pair: &MetaNameValue) -> syn::Result<()> {
    if already_set {
        return Err(syn::Error::new_spanned(pair, "Duplicate argument"));
    }
    Ok(())
}

fn string_literal(pair: &MetaNameValue) -> syn::Result<LitStr> {
    match &pair.value {
        Expr::Lit(expr) => match &expr.lit {
            Lit::Str(lit) => Ok(lit.clone()),
            _ => Err(syn::Error::new_spanned(&pair.value, "expected a string literal")),
        },
        _ => Err(syn::Error::new_spanned(&pair.value, "expected a string literal")),
    }
}

fn bool_literal(pair: &MetaNameValue) -> syn::Result<bool> {
    match &pair.value {
        Expr::Lit(expr) => match &expr.lit {
            Lit::Bool(lit) => Ok(lit.value),
            _ => Err(syn::Error::new_spanned(&pair.value, "expected a boolean literal")),
        },
        _ => Err(syn::Error::new_spanned(&pair.value, "expected a boolean literal")),
    }
}

fn serde_attrs(attrs: &[Attribute]) -> syn::Result<SerdeAttrs> {
    let mut found = SerdeAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                found.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                found.deny_unknown_fields = true;
            } else if meta.input.peek(Token![=]) {
                // Skip values of attributes this macro does not manage.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }

    Ok(found)
}

use crate::macros::derived_trait_names;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, GenericArgument, Ident, PathArguments, Type};

/// A parsed error variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg: Vec<&'a Attribute>,
}

impl ErrorVariant<'_> {
    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }
}

pub fn expand(input: DeriveInput) -> TokenStream {
    match parse_variants(&input) {
        Ok(variants) => render(&input, &variants),
        Err(err) => err.to_compile_error(),
    }
}

fn parse_variants(input: &DeriveInput) -> syn::Result<Vec<ErrorVariant<'_>>> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "concil_error only supports enums"));
    };

    data.variants
        .iter()
        .map(|variant| {
            let Fields::Named(fields) = &variant.fields else {
                return Err(syn::Error::new_spanned(
                    variant,
                    "concil_error requires named fields for source/context handling",
                ));
            };

            let mut has_context = false;
            let mut source = None;
            for field in &fields.named {
                let Some(name) = field.ident.as_ref() else { continue };
                if name == "context" {
                    if !is_context_type(&field.ty) {
                        return Err(syn::Error::new_spanned(
                            &field.ty,
                            "context field must be Option<Cow<'static, str>>",
                        ));
                    }
                    has_context = true;
                } else if source.is_none() && is_source_field(field) {
                    source = Some((name, &field.ty));
                }
            }

            if source.is_some() && !has_context {
                return Err(syn::Error::new_spanned(
                    &variant.ident,
                    "concil_error requires `context: Option<Cow<'static, str>>` next to a source",
                ));
            }

            Ok(ErrorVariant {
                ident: &variant.ident,
                source,
                has_context,
                cfg: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
            })
        })
        .collect()
}

fn render(input: &DeriveInput, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let name = &input.ident;
    let ext = format_ident!("{name}Ext");

    let existing = derived_trait_names(&input.attrs);
    let mut derives = Vec::new();
    if !existing.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !existing.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }
    let derive_attr = if derives.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derives),*)] }
    };

    let context_arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ident = v.ident;
        let cfg = &v.cfg;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    let source_impls = variants.iter().filter(|v| !v.is_internal()).filter_map(|v| {
        let (field, ty) = v.source?;
        let ident = v.ident;
        let cfg = &v.cfg;
        Some(quote! {
            #(#cfg)*
            #[automatically_derived]
            impl From<#ty> for #name {
                #[inline]
                fn from(#field: #ty) -> Self {
                    Self::#ident { #field, context: None }
                }
            }

            #(#cfg)*
            impl<T> #ext<T> for ::std::result::Result<T, #ty> {
                #[inline]
                fn context(
                    self,
                    context: impl Into<::std::borrow::Cow<'static, str>>,
                ) -> ::std::result::Result<T, #name> {
                    self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
                }
            }
        })
    });

    let internal_impls = variants.iter().find(|v| v.is_internal()).map(|v| {
        let cfg = &v.cfg;
        quote! {
            #(#cfg)*
            impl From<&'static str> for #name {
                #[inline]
                fn from(message: &'static str) -> Self {
                    Self::Internal { message: ::std::borrow::Cow::Borrowed(message), context: None }
                }
            }

            #(#cfg)*
            impl From<String> for #name {
                #[inline]
                fn from(message: String) -> Self {
                    Self::Internal { message: ::std::borrow::Cow::Owned(message), context: None }
                }
            }
        }
    });

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derive_attr
        #input

        /// Attaches a human-readable context to a failed result.
        pub trait #ext<T> {
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    match &mut err {
                        #(#context_arms)*
                        #[allow(unreachable_patterns)]
                        _ => {}
                    }
                    err
                })
            }
        }

        #(#source_impls)*
        #internal_impls

        #[allow(dead_code)]
        fn format_context(
            context: &Option<::std::borrow::Cow<'static, str>>,
        ) -> ::std::borrow::Cow<'static, str> {
            context
                .as_ref()
                .map_or(::std::borrow::Cow::Borrowed(""), |c| ::std::borrow::Cow::Owned(format!(" ({c})")))
        }
    }
}

fn is_source_field(field: &Field) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == "source")
        || field.attrs.iter().any(|a| a.path().is_ident("source") || a.path().is_ident("from"))
}

/// Matches `Option<Cow<'static, str>>`, with or without path prefixes.
fn is_context_type(ty: &Type) -> bool {
    let Some(cow) = single_generic(ty, "Option") else {
        return false;
    };
    let Type::Path(cow_path) = cow else {
        return false;
    };
    let Some(segment) = cow_path.path.segments.last() else {
        return false;
    };
    if segment.ident != "Cow" {
        return false;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return false;
    };

    let mut args = args.args.iter();
    let static_lifetime =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_type = matches!(
        args.next(),
        Some(GenericArgument::Type(Type::Path(p)))
            if p.path.segments.last().is_some_and(|s| s.ident == "str")
    );

    static_lifetime && str_type
}

fn single_generic<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

//! `#[service]` attribute macro implementation
//!
//! 1. **Parse**: the macro arguments and the trait (`syn::ItemTrait`)
//! 2. **Validate**: every required method is `async fn(&self[, p: T]) -> R`
//! 3. **Name**: derive each remote method name, honoring `#[rpc(name)]`
//! 4. **Quote**: emit the cleaned trait and `impl Trait for ProxyClient`

use caserpc_core::snake_to_camel;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    parse::Parser, Attribute, FnArg, ItemTrait, LitStr, Pat, Path, ReturnType, Signature,
    TraitItem,
};

const DEFAULT_CLIENT_PATH: &str = "::caserpc::client";

pub fn service_impl(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let client_path = parse_service_args(attr)?;
    let mut item_trait: ItemTrait = syn::parse2(item)?;

    if !item_trait.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item_trait.generics,
            "#[service] traits cannot be generic",
        ));
    }

    let mut methods = Vec::new();
    for trait_item in &mut item_trait.items {
        let TraitItem::Fn(method) = trait_item else {
            return Err(syn::Error::new_spanned(
                trait_item,
                "#[service] traits may only contain methods",
            ));
        };

        let remote_name = take_rpc_name(&mut method.attrs)?;
        if method.default.is_some() {
            continue;
        }

        let param = validate_signature(&method.sig)?;
        let remote_name =
            remote_name.unwrap_or_else(|| snake_to_camel(&method.sig.ident.unraw().to_string()));

        methods.push(forward_method(&client_path, &method.sig, &remote_name, param));
    }

    let trait_ident = &item_trait.ident;
    Ok(quote! {
        #[allow(async_fn_in_trait)]
        #item_trait

        impl #trait_ident for #client_path::ProxyClient {
            #(#methods)*
        }
    })
}

/// `#[service]` or `#[service(crate = "path")]`
fn parse_service_args(attr: TokenStream) -> syn::Result<Path> {
    let mut client_path: Path = syn::parse_str(DEFAULT_CLIENT_PATH)?;

    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("crate") {
            let lit: LitStr = meta.value()?.parse()?;
            client_path = lit.parse()?;
            Ok(())
        } else {
            Err(meta.error("unsupported service argument, expected `crate`"))
        }
    });
    parser.parse2(attr)?;

    Ok(client_path)
}

/// Remove `#[rpc(...)]` from `attrs`, returning the overridden name if any
fn take_rpc_name(attrs: &mut Vec<Attribute>) -> syn::Result<Option<String>> {
    let mut name = None;
    let mut result = Ok(());

    attrs.retain(|attr| {
        if !attr.path().is_ident("rpc") {
            return true;
        }
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(&lit, "rpc name cannot be empty"));
                }
                name = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("unsupported rpc argument, expected `name`"))
            }
        });
        if let Err(e) = parsed {
            result = Err(e);
        }
        false
    });

    result.map(|_| name)
}

/// Check the method shape and return its parameter binding, if any
fn validate_signature(sig: &Signature) -> syn::Result<Option<&syn::Ident>> {
    if sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(
            sig.fn_token,
            "#[service] methods must be async",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[service] methods cannot be generic",
        ));
    }
    if let ReturnType::Default = sig.output {
        return Err(syn::Error::new(
            sig.paren_token.span.close(),
            "#[service] methods must return Result<T, E>",
        ));
    }

    let mut inputs = sig.inputs.iter();
    match inputs.next() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        Some(other) => {
            return Err(syn::Error::new_spanned(
                other,
                "#[service] methods must take &self",
            ))
        }
        None => {
            return Err(syn::Error::new(
                sig.span(),
                "#[service] methods must take &self",
            ))
        }
    }

    let param = match inputs.next() {
        None => None,
        Some(FnArg::Typed(typed)) => match &*typed.pat {
            Pat::Ident(pat) if pat.by_ref.is_none() && pat.subpat.is_none() => Some(&pat.ident),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "parameter must be a plain identifier",
                ))
            }
        },
        Some(other) => {
            return Err(syn::Error::new_spanned(other, "unexpected receiver"));
        }
    };

    if let Some(extra) = inputs.next() {
        return Err(syn::Error::new_spanned(
            extra,
            "#[service] methods take at most one parameter; wrap several in a struct",
        ));
    }

    Ok(param)
}

fn forward_method(
    client_path: &Path,
    sig: &Signature,
    remote_name: &str,
    param: Option<&syn::Ident>,
) -> TokenStream {
    let params = match param {
        Some(ident) => quote! { ::core::option::Option::Some(#ident) },
        None => quote! { ::core::option::Option::None::<()> },
    };
    let sig = sig.to_token_stream();

    quote! {
        #sig {
            ::core::result::Result::Ok(
                #client_path::ProxyClient::call(self, #remote_name, #params).await?
            )
        }
    }
}

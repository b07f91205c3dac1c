//! Service-related macros.
//!
//! This module contains:
//! - `#[service]` - Attribute macro exposing an `impl` block as a service object

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    FnArg, Ident, ImplItem, ImplItemFn, ItemImpl, LitStr, Receiver, Token, Type, Visibility,
    parse::{Parse, ParseStream},
    parse_macro_input, parse_quote,
};

/// Arguments for the `#[service]` macro.
pub(crate) struct ServiceArgs {
    pub id: Option<LitStr>,
}

impl Parse for ServiceArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut id = None;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "id" => {
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "service id must not be empty"));
                    }
                    id = Some(lit);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ServiceArgs { id })
    }
}

/// Implementation of the `#[service]` macro.
pub fn service_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ServiceArgs);
    let input = parse_macro_input!(item as ItemImpl);

    match expand(args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: ServiceArgs, input: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[service] must be placed on an inherent impl block",
        ));
    }

    let mut properties = Vec::new();
    for item in &input.items {
        if let ImplItem::Fn(method) = item {
            if let Some(property) = exposed_method(method)? {
                properties.push(property);
            }
        }
    }

    let self_ty = &input.self_ty;
    let mut generics = input.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: ::core::marker::Send + ::core::marker::Sync + 'static));
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let submission = match &args.id {
        Some(id) => {
            if !input.generics.params.is_empty() {
                return Err(syn::Error::new_spanned(
                    &input.generics,
                    "#[service(id = ...)] cannot be used on generic types",
                ));
            }
            Some(quote! {
                ::rnos::inventory::submit! {
                    ::rnos::ServiceRegistration::new(#id, {
                        fn __rnos_factory() -> ::rnos::Value {
                            ::rnos::IntoService::into_service(
                                <#self_ty as ::core::default::Default>::default(),
                            )
                        }
                        __rnos_factory
                    })
                }
            })
        }
        None => None,
    };

    Ok(quote! {
        #input

        impl #impl_generics ::rnos::IntoService for #self_ty #where_clause {
            fn into_service(self) -> ::rnos::Value {
                let __this = ::std::sync::Arc::new(self);
                let mut __map = ::rnos::Map::new();
                #(#properties)*
                ::rnos::Value::from(__map)
            }
        }

        #submission
    })
}

/// Whether the receiver borrows `Self` immutably.
///
/// syn fills `ty` for the shorthand forms too, so `&self` arrives as `&Self`.
fn is_shared_self(receiver: &Receiver) -> bool {
    match &*receiver.ty {
        Type::Reference(reference) if reference.mutability.is_none() => matches!(
            &*reference.elem,
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self")
        ),
        _ => false,
    }
}

/// Build the map insertion for one method, or `None` if it is not exposed.
///
/// Exposed methods are `pub fn(&self, ..)` (or `self: &Self`). Private
/// methods and associated functions are left alone; public methods taking
/// `self` by value or by `&mut` are rejected.
fn exposed_method(method: &ImplItemFn) -> syn::Result<Option<TokenStream2>> {
    if !matches!(method.vis, Visibility::Public(_)) {
        return Ok(None);
    }

    let sig = &method.sig;
    let Some(FnArg::Receiver(receiver)) = sig.inputs.first() else {
        return Ok(None);
    };

    if !is_shared_self(receiver) {
        return Err(syn::Error::new_spanned(
            receiver,
            "service methods must take `&self` or `self: &Self`; keep mutable state behind a lock",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "service methods must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "service methods cannot be generic",
        ));
    }

    let method_name = &sig.ident;
    let property = LitStr::new(&method_name.to_string(), method_name.span());

    let mut params = Vec::new();
    let mut args = Vec::new();
    for (i, input) in sig.inputs.iter().skip(1).enumerate() {
        if let FnArg::Typed(pat_type) = input {
            let ident = Ident::new(&format!("__arg{}", i), Span::call_site());
            let ty = &pat_type.ty;
            params.push(quote! { #ident: #ty });
            args.push(ident);
        }
    }

    Ok(Some(quote! {
        __map.insert(::std::string::String::from(#property), {
            let __this = ::std::sync::Arc::clone(&__this);
            ::rnos::Value::Callable(
                ::rnos::Callable::from_fn(move |#(#params),*| __this.#method_name(#(#args),*))
                    .with_name(#property),
            )
        });
    }))
}

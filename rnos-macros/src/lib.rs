use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

mod service;

/// Derive macro converting a struct into a [`Value`] map.
///
/// Every named field becomes a property; each field type must implement
/// `Into<Value>`.
///
/// [`Value`]: https://docs.rs/rnos/latest/rnos/enum.Value.html
#[proc_macro_derive(IntoValue)]
pub fn derive_into_value(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                return syn::Error::new_spanned(
                    other,
                    "IntoValue can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &input.ident,
                "IntoValue can only be derived for structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let entries = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let key = LitStr::new(&ident.to_string(), ident.span());
        Some(quote! {
            (::std::string::String::from(#key), ::rnos::Value::from(value.#ident))
        })
    });

    let expanded = quote! {
        impl #impl_generics ::core::convert::From<#name #ty_generics> for ::rnos::Value #where_clause {
            fn from(value: #name #ty_generics) -> Self {
                ::rnos::Value::object([#(#entries),*])
            }
        }
    };

    TokenStream::from(expanded)
}

/// Expose an inherent `impl` block as a service object.
///
/// Every `pub fn(&self, ..)` in the block becomes a callable property named
/// after the method. Arguments convert through `FromValue` and return values
/// through `IntoReturn`, so ordinary Rust signatures work unchanged.
///
/// # Example
///
/// ```rust,ignore
/// struct Calculator;
///
/// #[rnos::service]
/// impl Calculator {
///     pub fn add(&self, a: f64, b: f64) -> f64 {
///         a + b
///     }
/// }
///
/// hub.register_service("calc", Calculator);
/// hub.invoke("calc.add", &[2.into(), 3.into()])?;
/// ```
///
/// With `id = "..."` the type's `Default` value is also submitted for
/// collection by `Registry::register_submitted` (requires the `inventory`
/// feature of `rnos`).
#[proc_macro_attribute]
pub fn service(attr: TokenStream, item: TokenStream) -> TokenStream {
    service::service_impl(attr, item)
}

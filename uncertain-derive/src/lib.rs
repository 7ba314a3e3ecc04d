//! Derive macro implementation used by `uncertain-core`.
//!
//! `uncertain-derive` is an implementation detail of this workspace. The `Unit` derive expands in terms of
//! `crate::Unit`, `crate::Measured` and `crate::FormatOptions`, so it is intended to be used by `uncertain-core` (or by
//! crates that expose an identical crate-root API).
//!
//! Most users should depend on `uncertain` instead and use the predefined units.
//!
//! # Generated impls
//!
//! For a unit marker type `MyUnit`, the derive implements:
//!
//! - `crate::Unit for MyUnit`
//! - `core::fmt::Display for crate::Measured<MyUnit>` (formats the uncertain value with default options, followed by
//!   the unit symbol)
//!
//! # Attributes
//!
//! The derive reads a required `#[unit(...)]` attribute:
//!
//! - `symbol = "m"`: abbreviated unit symbol, fused with SI prefix symbols (`km`)
//! - `name = "metre"`: long unit name, fused with SI prefix names (`kilometre`)
//! - `dimension = SomeDim`: dimension marker type
//! - `ratio = 1000.0`: conversion ratio to the canonical unit of the dimension

#![deny(missing_docs)]
#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, DeriveInput, Expr, Ident, LitStr, Token,
};

/// Derive `crate::Unit` and a `Display` impl for `crate::Measured<ThisUnit>`.
///
/// The derive must be paired with a `#[unit(...)]` attribute providing `symbol`, `name`, `dimension`, and `ratio`.
///
/// This macro is intended for use by `uncertain-core`.
#[proc_macro_derive(Unit, attributes(unit))]
pub fn derive_unit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_unit_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_unit_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let unit_attr = parse_unit_attribute(&input.attrs)?;

    let symbol = &unit_attr.symbol;
    let name = &unit_attr.name;
    let dimension = &unit_attr.dimension;
    let ratio = &unit_attr.ratio;

    let expanded = quote! {
        impl crate::Unit for #ident {
            const RATIO: f64 = #ratio;
            type Dim = #dimension;
            const SYMBOL: &'static str = #symbol;
            const NAME: &'static str = #name;
        }

        impl ::core::fmt::Display for crate::Measured<#ident> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.format(&crate::FormatOptions::default()))
            }
        }
    };

    Ok(expanded)
}

/// Parsed contents of the `#[unit(...)]` attribute.
struct UnitAttribute {
    symbol: LitStr,
    name: LitStr,
    dimension: Expr,
    ratio: Expr,
}

impl Parse for UnitAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut symbol: Option<LitStr> = None;
        let mut name: Option<LitStr> = None;
        let mut dimension: Option<Expr> = None;
        let mut ratio: Option<Expr> = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match key.to_string().as_str() {
                "symbol" => symbol = Some(input.parse()?),
                "name" => name = Some(input.parse()?),
                "dimension" => dimension = Some(input.parse()?),
                "ratio" => ratio = Some(input.parse()?),
                other => {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("unknown attribute `{}`", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        let symbol = symbol
            .ok_or_else(|| syn::Error::new(input.span(), "missing required attribute `symbol`"))?;
        let name =
            name.ok_or_else(|| syn::Error::new(input.span(), "missing required attribute `name`"))?;
        let dimension = dimension.ok_or_else(|| {
            syn::Error::new(input.span(), "missing required attribute `dimension`")
        })?;
        let ratio = ratio
            .ok_or_else(|| syn::Error::new(input.span(), "missing required attribute `ratio`"))?;

        if symbol.value().chars().any(char::is_whitespace) {
            return Err(syn::Error::new(
                symbol.span(),
                "unit symbols must not contain whitespace",
            ));
        }

        Ok(UnitAttribute {
            symbol,
            name,
            dimension,
            ratio,
        })
    }
}

fn parse_unit_attribute(attrs: &[Attribute]) -> syn::Result<UnitAttribute> {
    for attr in attrs {
        if attr.path().is_ident("unit") {
            return attr.parse_args::<UnitAttribute>();
        }
    }

    Err(syn::Error::new(
        proc_macro2::Span::call_site(),
        "missing #[unit(...)] attribute",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;
    use syn::parse_quote;

    #[test]
    fn parses_complete_attribute() {
        let input: DeriveInput = parse_quote! {
            #[unit(symbol = "m", name = "metre", dimension = Length, ratio = 1.0)]
            pub struct Meter;
        };

        let attr = parse_unit_attribute(&input.attrs).unwrap();
        assert_eq!(attr.symbol.value(), "m");
        assert_eq!(attr.name.value(), "metre");
    }

    #[test]
    fn missing_attribute_is_reported() {
        let input: DeriveInput = parse_quote! {
            pub struct Meter;
        };

        let err = parse_unit_attribute(&input.attrs).err().unwrap();
        assert!(err.to_string().contains("missing #[unit(...)] attribute"));
    }

    #[test]
    fn missing_name_is_reported() {
        let input: DeriveInput = parse_quote! {
            #[unit(symbol = "m", dimension = Length, ratio = 1.0)]
            pub struct Meter;
        };

        let err = parse_unit_attribute(&input.attrs).err().unwrap();
        assert!(err
            .to_string()
            .contains("missing required attribute `name`"));
    }

    #[test]
    fn missing_ratio_is_reported() {
        let input: DeriveInput = parse_quote! {
            #[unit(symbol = "m", name = "metre", dimension = Length)]
            pub struct Meter;
        };

        let err = parse_unit_attribute(&input.attrs).err().unwrap();
        assert!(err
            .to_string()
            .contains("missing required attribute `ratio`"));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let tokens = quote! {
            symbol = "m", name = "metre", dimension = Length, ratio = 1.0, plural = "metres"
        };
        let result: syn::Result<UnitAttribute> = syn::parse2(tokens);
        assert!(result.err().unwrap().to_string().contains("unknown attribute"));
    }

    #[test]
    fn symbol_with_whitespace_is_rejected() {
        let tokens = quote! {
            symbol = "k m", name = "metre", dimension = Length, ratio = 1.0
        };
        let result: syn::Result<UnitAttribute> = syn::parse2(tokens);
        assert!(result.is_err());
    }

    #[test]
    fn trailing_comma_is_accepted() {
        let tokens = quote! {
            symbol = "V", name = "volt", dimension = Potential, ratio = 1.0,
        };
        let attr: UnitAttribute = syn::parse2(tokens).unwrap();
        assert_eq!(attr.symbol.value(), "V");
    }

    #[test]
    fn expansion_implements_unit_and_display() {
        let input: DeriveInput = parse_quote! {
            #[unit(symbol = "g", name = "gram", dimension = Mass, ratio = 1.0)]
            pub struct Gram;
        };

        let code = derive_unit_impl(input).unwrap().to_string();
        assert!(code.contains("impl crate :: Unit for Gram"));
        assert!(code.contains("const SYMBOL : & 'static str = \"g\""));
        assert!(code.contains("const NAME : & 'static str = \"gram\""));
        assert!(code.contains("type Dim = Mass"));
        assert!(code.contains("crate :: Measured < Gram >"));
    }

    #[test]
    fn expansion_error_becomes_compile_error() {
        let input: DeriveInput = parse_quote! {
            pub struct Gram;
        };
        let err = derive_unit_impl(input).err().unwrap();
        assert!(err.to_compile_error().to_string().contains("compile_error"));
    }
}

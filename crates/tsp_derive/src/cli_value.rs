use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

pub fn derive_cli_value_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(input.span(), "CliValue can only be derived for enums")
            .to_compile_error()
            .into();
    };

    let mut option_name = utils::to_kebab_case(&enum_ident.to_string());
    if let Err(err) = utils::for_each_nested(&input.attrs, "cli_value", |meta| {
        if meta.path.is_ident("option") {
            option_name = utils::string_value(&meta)?;
            Ok(())
        } else {
            Err(meta.error("unsupported cli_value attribute; expected option = \"...\""))
        }
    }) {
        return err.to_compile_error().into();
    }

    let mut parse_arms = Vec::new();
    let mut display_arms = Vec::new();
    let mut canonical_names = Vec::new();

    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new(variant.span(), "CliValue requires unit variants")
                .to_compile_error()
                .into();
        }

        let variant_ident = &variant.ident;
        let mut canonical = utils::to_kebab_case(&variant_ident.to_string());
        let mut aliases = Vec::new();

        if let Err(err) = utils::for_each_nested(&variant.attrs, "cli", |meta| {
            if meta.path.is_ident("name") {
                canonical = utils::string_value(&meta)?;
                Ok(())
            } else if meta.path.is_ident("alias") {
                aliases.push(utils::string_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported cli attribute; expected name/alias"))
            }
        }) {
            return err.to_compile_error().into();
        }

        let accepted = std::iter::once(&canonical)
            .chain(aliases.iter())
            .map(|value| LitStr::new(value, Span::call_site()));
        let canonical_lit = LitStr::new(&canonical, Span::call_site());

        parse_arms.push(quote! { #(#accepted)|* => Ok(Self::#variant_ident), });
        display_arms.push(quote! { Self::#variant_ident => #canonical_lit, });
        canonical_names.push(canonical);
    }

    let expected_lit = LitStr::new(&canonical_names.join("|"), Span::call_site());
    let option_lit = LitStr::new(&option_name, Span::call_site());

    let expanded = quote! {
        impl #enum_ident {
            pub fn parse(raw: &str) -> crate::Result<Self> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    #(#parse_arms)*
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid value for --{}: {} (expected {})",
                        #option_lit,
                        raw,
                        #expected_lit
                    ))),
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    #(#display_arms)*
                }
            }
        }

        impl std::fmt::Display for #enum_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };

    TokenStream::from(expanded)
}

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

use crate::utils;

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut entries = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let mut key = field_ident.to_string();
        let mut mode = String::from("display");
        let mut skip = false;

        if let Err(err) = utils::for_each_nested(&field.attrs, "kv", |meta| {
            if meta.path.is_ident("name") {
                key = utils::string_value(&meta)?;
                Ok(())
            } else if meta.path.is_ident("fmt") {
                mode = utils::string_value(&meta)?;
                Ok(())
            } else if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported kv attribute; expected name/fmt/skip"))
            }
        }) {
            return err.to_compile_error().into();
        }
        if skip {
            continue;
        }

        let render = match mode.as_str() {
            "display" => quote! { self.#field_ident.to_string() },
            "len" => quote! { self.#field_ident.len().to_string() },
            "path" => quote! { self.#field_ident.display().to_string() },
            "opt" => quote! {
                match &self.#field_ident {
                    Some(value) => value.to_string(),
                    None => String::from("none"),
                }
            },
            "str" => quote! {
                if self.#field_ident.is_empty() {
                    String::from("-")
                } else {
                    self.#field_ident.to_string()
                }
            },
            other => {
                return syn::Error::new(field.span(), format!("unsupported kv fmt mode: {other}"))
                    .to_compile_error()
                    .into();
            }
        };
        entries.push((key, render));
    }

    let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let lines = entries.iter().map(|(key, render)| {
        let padded = LitStr::new(&format!("{key:<width$}"), Span::call_site());
        quote! {
            write!(f, "\n\t{} = {}", #padded, #render)?;
        }
    });

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #(#lines)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

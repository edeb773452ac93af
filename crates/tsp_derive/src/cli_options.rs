use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

struct ValueOption<'a> {
    field: &'a Ident,
    long: LitStr,
    parse_expr: proc_macro2::TokenStream,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = &input.ident;

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut options = Vec::new();
    let mut positional: Option<&Ident> = None;

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut long: Option<String> = None;
        let mut parse_with: Option<Path> = None;
        let mut is_positional = false;

        let parsed = utils::for_each_nested(&field.attrs, "cli", |meta| {
            if meta.path.is_ident("long") {
                long = Some(utils::string_value(&meta)?);
                Ok(())
            } else if meta.path.is_ident("parse_with") {
                parse_with = Some(syn::parse_str(&utils::string_value(&meta)?)?);
                Ok(())
            } else if meta.path.is_ident("positional") {
                is_positional = true;
                Ok(())
            } else {
                Err(meta.error("unsupported cli attribute; expected long/parse_with/positional"))
            }
        });
        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }

        if is_positional {
            if positional.replace(field_ident).is_some() {
                return syn::Error::new(field.span(), "only one positional field is supported")
                    .to_compile_error()
                    .into();
            }
            continue;
        }

        if let Some(long) = long {
            options.push(ValueOption {
                field: field_ident,
                long: LitStr::new(&long, field.span()),
                parse_expr: utils::build_cli_parse_expr(&field.ty, parse_with.as_ref()),
            });
        }
    }

    let longs: Vec<&LitStr> = options.iter().map(|opt| &opt.long).collect();
    let takes_value_body = if longs.is_empty() {
        quote! { let _ = name; false }
    } else {
        quote! { matches!(name, #(#longs)|*) }
    };
    let arms = options.iter().map(|opt| {
        let ValueOption {
            field,
            long,
            parse_expr,
        } = opt;
        quote! {
            #long => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#field = #parse_expr;
                Ok(true)
            }
        }
    });

    let positional_body = match positional {
        Some(field) => quote! {
            if !self.#field.is_empty() {
                return Err(crate::Error::invalid_input(format!(
                    "Unexpected argument: {value}\n\n{}",
                    Self::usage()
                )));
            }
            self.#field = value;
            Ok(())
        },
        None => quote! {
            Err(crate::Error::invalid_input(format!(
                "Unexpected argument: {value}\n\n{}",
                Self::usage()
            )))
        },
    };

    let expanded = quote! {
        impl #struct_ident {
            /// Long names of the options that consume a value.
            fn takes_value(name: &str) -> bool {
                #takes_value_body
            }

            /// Splits `name=value`, or takes the next argument as the value
            /// when `name` is a value option and the next argument is not a flag.
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((name, value)) = raw_name.split_once('=') {
                    return (name.to_string(), Some(value.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if Self::takes_value(raw_name) && !next.starts_with("--") => {
                        args.next()
                    }
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }

            #[allow(dead_code)]
            fn apply_positional(&mut self, value: String) -> crate::Result<()> {
                #positional_body
            }
        }
    };

    TokenStream::from(expanded)
}

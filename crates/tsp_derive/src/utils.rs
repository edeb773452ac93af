use quote::quote;
use syn::{
    AngleBracketedGenericArguments, Attribute, GenericArgument, LitStr, Path, PathArguments, Type,
    TypePath, meta::ParseNestedMeta,
};

/// `Option<T>` → `T`, for the short, `std::` and `core::` spellings.
pub fn inner_of_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return None;
    };

    let names: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let is_option = match names.as_slice() {
        [only] => only == "Option",
        [root, module, name] => {
            (root == "std" || root == "core") && module == "option" && name == "Option"
        }
        _ => false,
    };
    if !is_option {
        return None;
    }

    match &path.segments.last()?.arguments {
        PathArguments::AngleBracketed(AngleBracketedGenericArguments { args, .. }) => {
            match args.first()? {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Expression turning the `raw: String` in scope into a field value.
///
/// Uses `parse_with` when given, otherwise `FromStr` on the field type (or on
/// the inner type for `Option` fields, wrapped back into `Some`).
pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    let (target, optional) = match inner_of_option(ty) {
        Some(inner) => (inner, true),
        None => (ty, false),
    };

    let parsed = match parse_with {
        Some(parse_with) => quote! { #parse_with(&raw)? },
        None => quote! {
            raw.parse::<#target>().map_err(|e| {
                crate::Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})"))
            })?
        },
    };

    if optional {
        quote! { Some(#parsed) }
    } else {
        parsed
    }
}

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Runs `handler` over every `#[<name>(...)]` attribute in `attrs`.
pub fn for_each_nested<F>(attrs: &[Attribute], name: &str, mut handler: F) -> syn::Result<()>
where
    F: FnMut(ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|attr| attr.path().is_ident(name)) {
        attr.parse_nested_meta(&mut handler)?;
    }
    Ok(())
}

pub fn string_value(meta: &ParseNestedMeta) -> syn::Result<String> {
    let lit: LitStr = meta.value()?.parse()?;
    Ok(lit.value())
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{build_cli_parse_expr, inner_of_option, to_kebab_case};

    #[test]
    fn inner_of_option_handles_all_option_spellings() {
        let short: syn::Type = parse_quote!(Option<u64>);
        let std_path: syn::Type = parse_quote!(std::option::Option<String>);
        let core_path: syn::Type = parse_quote!(core::option::Option<f64>);
        let plain: syn::Type = parse_quote!(Vec<u64>);

        let short_inner = inner_of_option(&short).expect("short option");
        let std_inner = inner_of_option(&std_path).expect("std option");
        let core_inner = inner_of_option(&core_path).expect("core option");

        assert_eq!(quote::quote!(#short_inner).to_string(), "u64");
        assert_eq!(quote::quote!(#std_inner).to_string(), "String");
        assert_eq!(quote::quote!(#core_inner).to_string(), "f64");
        assert!(inner_of_option(&plain).is_none());
    }

    #[test]
    fn parse_expr_wraps_optional_fields_in_some() {
        let optional: syn::Type = parse_quote!(Option<u64>);
        let plain: syn::Type = parse_quote!(f64);

        let optional_expr = build_cli_parse_expr(&optional, None).to_string();
        let plain_expr = build_cli_parse_expr(&plain, None).to_string();

        assert!(optional_expr.starts_with("Some"));
        assert!(optional_expr.contains("parse :: < u64 >"));
        assert!(!plain_expr.starts_with("Some"));
        assert!(plain_expr.contains("parse :: < f64 >"));
    }

    #[test]
    fn parse_expr_prefers_custom_parser() {
        let ty: syn::Type = parse_quote!(LogLevel);
        let path: syn::Path = parse_quote!(LogLevel::parse);

        let expr = build_cli_parse_expr(&ty, Some(&path)).to_string();
        assert!(expr.contains("LogLevel :: parse"));
        assert!(!expr.contains("FromStr"));
    }

    #[test]
    fn to_kebab_case_splits_on_uppercase() {
        assert_eq!(to_kebab_case("LogFormat"), "log-format");
        assert_eq!(to_kebab_case("Compact"), "compact");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
    }
}

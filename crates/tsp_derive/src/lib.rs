//! Derive macros for the `tsp_core` command-line surface.
//!
//! The generated code refers to `crate::Error` and `crate::Result`, so these
//! derives are meant to be used from inside `tsp_core`.

mod cli_options;
mod cli_value;
mod kv_display;
mod utils;

use proc_macro::TokenStream;

/// Parses a unit-variant enum from its kebab-case name and displays it back.
#[proc_macro_derive(CliValue, attributes(cli_value, cli))]
pub fn derive_cli_value(item: TokenStream) -> TokenStream {
    cli_value::derive_cli_value_inner(item)
}

/// Generates `--long[=value]` handling for a struct of options.
#[proc_macro_derive(CliOptions, attributes(cli))]
pub fn derive_cli_options(item: TokenStream) -> TokenStream {
    cli_options::derive_cli_options_inner(item)
}

/// Generates an aligned `key = value` multi-line `Display`.
#[proc_macro_derive(KvDisplay, attributes(kv))]
pub fn derive_kv_display(item: TokenStream) -> TokenStream {
    kv_display::derive_kv_display_inner(item)
}

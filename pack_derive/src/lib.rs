extern crate proc_macro;
extern crate proc_macro2;

/// Field attribute parsing.
mod attrs;
/// Support for struct auto-derive.
mod struct_impl;

use proc_macro::TokenStream;
use quote::quote_spanned;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput};

#[proc_macro_derive(PackRep, attributes(pack))]
pub fn pack_rep_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let imp = match &ast.data {
        Data::Struct(sd) => struct_impl::pack_rep(&ast, sd).unwrap_or_else(syn::Error::into_compile_error),
        _ => quote_spanned! {ast.span()=>
            compile_error!("PackRep can only be derived for structs");
        },
    };
    imp.into()
}

use crate::attrs::FieldAttrs;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, DataStruct, DeriveInput, Error, Fields, GenericParam, Ident, Result, Type};

struct PackField {
    ident: Ident,
    ty: Type,
    wire: String,
}

pub fn pack_rep(ast: &DeriveInput, data: &DataStruct) -> Result<TokenStream> {
    let name = &ast.ident;

    let mut packed = Vec::new();
    let mut skipped = Vec::new();
    match &data.fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                let attrs = FieldAttrs::parse(field)?;
                let ident = match &field.ident {
                    Some(ident) => ident.clone(),
                    None => return Err(Error::new_spanned(field, "expected a named field")),
                };
                if attrs.skip {
                    skipped.push(ident);
                } else {
                    packed.push(PackField {
                        wire: attrs.wire_name(&ident),
                        ident,
                        ty: field.ty.clone(),
                    });
                }
            }
        }
        Fields::Unit => (),
        Fields::Unnamed(fields) => {
            return Err(Error::new_spanned(
                fields,
                "PackRep can only be derived for structs with named fields",
            ))
        }
    }

    let mut generics = ast.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(tp) = param {
            tp.bounds.push(parse_quote!(::pack::rep::PackRep));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let idents: Vec<&Ident> = packed.iter().map(|f| &f.ident).collect();
    let types: Vec<&Type> = packed.iter().map(|f| &f.ty).collect();
    let wires: Vec<&str> = packed.iter().map(|f| f.wire.as_str()).collect();
    let n = packed.len();

    // rep_type
    let impl_rep_type = quote! {
        fn rep_type() -> ::pack::types::Type {
            ::pack::types::Type::Struct(::pack::types::StructType::new(vec![
                #(::pack::types::TypeField::new(
                    #wires,
                    <#types as ::pack::rep::PackRep>::rep_type(),
                )),*
            ]))
        }
    };

    // to_value
    let impl_to_value = quote! {
        fn to_value(&self) -> ::std::result::Result<::pack::Value, ::pack::errors::ConversionError> {
            #[allow(unused_mut)]
            let mut __fields = ::std::vec::Vec::with_capacity(#n);
            #(
                __fields.push(::pack::structure::StructField::new(
                    #wires,
                    ::pack::rep::PackRep::to_value(&self.#idents)
                        .map_err(|e| ::pack::errors::ConversionError::field(#wires, e))?,
                ));
            )*
            ::std::result::Result::Ok(::pack::Value::Struct(::pack::structure::Struct::new(__fields)))
        }
    };

    // unpack: fields missing from the source keep their value
    let impl_unpack = quote! {
        fn unpack(&mut self, value: &::pack::Value) -> ::std::result::Result<(), ::pack::errors::ConversionError> {
            let __st = match value {
                ::pack::Value::Struct(st) => st,
                other => {
                    return ::std::result::Result::Err(::pack::errors::ConversionError::unexpected(
                        ::pack::kind::Kind::Struct,
                        other.kind(),
                    ))
                }
            };
            #(
                if let ::std::option::Option::Some(v) = __st.get(#wires) {
                    ::pack::rep::PackRep::unpack(&mut self.#idents, v)
                        .map_err(|e| ::pack::errors::ConversionError::field(#wires, e))?;
                }
            )*
            ::std::result::Result::Ok(())
        }
    };

    // zero
    let impl_zero = match &data.fields {
        Fields::Unit => quote! {
            fn zero() -> Self { #name }
        },
        _ => quote! {
            fn zero() -> Self {
                #name {
                    #(#idents: <#types as ::pack::rep::PackRep>::zero(),)*
                    #(#skipped: ::std::default::Default::default(),)*
                }
            }
        },
    };

    Ok(quote! {
        impl #impl_generics ::pack::rep::PackRep for #name #ty_generics #where_clause {
            #impl_rep_type
            #impl_to_value
            #impl_unpack
            #impl_zero
        }
    })
}

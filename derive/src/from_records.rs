use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, Result, Token, Type,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

pub(crate) fn expand_from_records(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`FromRecords` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`FromRecords` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();

    for digit in fields.iter().flat_map(|f| &f.digits) {
        let value = digit.base10_parse::<u8>()?;

        if value > 9 {
            Err(Error::new(
                digit.span(),
                "Record types must be between 0 and 9.",
            ))?;
        }

        if !seen.insert(value) {
            Err(Error::new(digit.span(), "Record types must be unique."))?;
        }
    }

    let cases = fields.iter().map(|field| {
        let FieldMetadata {
            name,
            digits,
            is_vec,
        } = field;

        let assignment = if *is_vec {
            quote! { self.#name.push(record) }
        } else {
            quote! { self.#name = Some(record) }
        };

        quote! { #(#digits)|* => { #assignment } }
    });

    let name = &input.ident;

    let expanded = quote! {
        impl ::srecline::avec::FromRecords for #name {
            fn add_record(&mut self, record: ::srecline::record::Record) {
                match record.kind().digit() {
                    #(#cases)*
                    _ => {}
                }
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    digits: Vec<LitInt>,
    is_vec: bool,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let name = field.ident.clone().unwrap();

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("record")) else {
            return Ok(None);
        };

        let RecordAttribute { digits } = attr.meta.require_list()?.parse_args()?;

        let Type::Path(path) = &field.ty else {
            Err(Error::new_spanned(
                &field.ty,
                "Field must have a type annotation.",
            ))?
        };

        let Some(segment) = path.path.segments.last() else {
            Err(Error::new_spanned(
                &path.path.segments,
                "Field must have an `Option<Record>` or `Vec<Record>` type.",
            ))?
        };

        let is_vec = if segment.ident == "Option" {
            false
        } else if segment.ident == "Vec" {
            true
        } else {
            Err(Error::new_spanned(
                &segment.ident,
                "Field must have an `Option<Record>` or `Vec<Record>` type.",
            ))?
        };

        Ok(Some(Self {
            name,
            digits,
            is_vec,
        }))
    }
}

#[derive(Debug)]
struct RecordAttribute {
    digits: Vec<LitInt>,
}

impl Parse for RecordAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let digits = Punctuated::<LitInt, Token![,]>::parse_separated_nonempty(input)?;

        Ok(Self {
            digits: digits.into_iter().collect(),
        })
    }
}

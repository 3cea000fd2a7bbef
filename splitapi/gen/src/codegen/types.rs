//! Type generation for `components.schemas`.
//!
//! Object schemas become structs, everything else becomes a type alias.
//! Property optionality is encoded in the field type:
//!
//! | required | nullable | field type                  |
//! |----------|----------|-----------------------------|
//! | no       | yes      | `splitapi::Nullable<T>`     |
//! | no       | no       | `Option<T>` (skipped if `None`) |
//! | yes      | yes      | `Option<T>`                 |
//! | yes      | no       | `T`                         |

use proc_macro2::TokenStream;
use quote::quote;
use splitapi_define::{Field, IntegerWidth, NumberWidth, TypeDef, TypeDefKind, TypeRef};

use crate::naming::{field_ident, type_ident};

/// Maps a [`TypeRef`] to the Rust type used in generated code.
pub fn rust_type(ty: &TypeRef) -> TokenStream {
    match ty {
        TypeRef::String => quote! { String },
        TypeRef::Integer(IntegerWidth::I32) => quote! { i32 },
        TypeRef::Integer(IntegerWidth::I64) => quote! { i64 },
        TypeRef::Number(NumberWidth::F32) => quote! { f32 },
        TypeRef::Number(NumberWidth::F64) => quote! { f64 },
        TypeRef::Boolean => quote! { bool },
        TypeRef::Array(item) => {
            let item = rust_type(item);
            quote! { Vec<#item> }
        }
        TypeRef::Map(None) => quote! { serde_json::Map<String, serde_json::Value> },
        TypeRef::Map(Some(value)) => {
            let value = rust_type(value);
            quote! { std::collections::BTreeMap<String, #value> }
        }
        TypeRef::Named(name) => {
            let ident = type_ident(name);
            quote! { #ident }
        }
        TypeRef::Any => quote! { serde_json::Value },
        TypeRef::Unit => quote! { () },
    }
}

/// `#[doc = ...]` for an optional description.
pub fn doc_attr(description: Option<&str>) -> TokenStream {
    match description {
        Some(text) => {
            let lines = text.lines().map(|line| format!(" {}", line.trim_end()));
            quote! { #(#[doc = #lines])* }
        }
        None => TokenStream::new(),
    }
}

/// `#[serde(rename = "...")]` when the Rust field name differs from the wire name.
pub fn rename_attr(wire_name: &str) -> TokenStream {
    let ident = field_ident(wire_name).to_string();
    let rust_name = ident.strip_prefix("r#").unwrap_or(&ident);
    if rust_name == wire_name {
        TokenStream::new()
    } else {
        quote! { #[serde(rename = #wire_name)] }
    }
}

fn generate_field(owner: &str, field: &Field) -> TokenStream {
    let doc = doc_attr(field.description.as_deref());
    let rename = rename_attr(&field.name);
    let ident = field_ident(&field.name);

    let inner = rust_type(&field.ty);
    let base = match &field.ty {
        TypeRef::Named(name) if name == owner => quote! { Box<#inner> },
        _ => inner,
    };

    match (field.required, field.nullable) {
        (false, true) => quote! {
            #doc
            #rename
            #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
            pub #ident: splitapi::Nullable<#base>
        },
        (false, false) => quote! {
            #doc
            #rename
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub #ident: Option<#base>
        },
        (true, true) => quote! {
            #doc
            #rename
            pub #ident: Option<#base>
        },
        (true, false) => quote! {
            #doc
            #rename
            pub #ident: #base
        },
    }
}

/// Generates the struct or alias for one named type.
///
/// ## Examples
///
/// ```ignore
/// // UserSchema { id: integer, email: nullable string }
/// #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// pub struct UserSchema {
///     #[serde(default, skip_serializing_if = "splitapi::Nullable::is_absent")]
///     pub email: splitapi::Nullable<String>,
///     #[serde(default, skip_serializing_if = "Option::is_none")]
///     pub id: Option<i64>,
/// }
/// ```
pub fn generate_type_def(def: &TypeDef) -> TokenStream {
    let doc = doc_attr(def.description.as_deref());
    let name = type_ident(&def.name);

    match &def.kind {
        TypeDefKind::Object(fields) => {
            let fields = fields.iter().map(|field| generate_field(&def.name, field));
            quote! {
                #doc
                #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
                pub struct #name {
                    #(#fields,)*
                }
            }
        }
        TypeDefKind::Alias(ty) => {
            let ty = rust_type(ty);
            quote! {
                #doc
                pub type #name = #ty;
            }
        }
    }
}

/// Generates all named types in document order.
pub fn generate_types(types: &[TypeDef]) -> TokenStream {
    let defs = types.iter().map(generate_type_def);
    quote! { #(#defs)* }
}

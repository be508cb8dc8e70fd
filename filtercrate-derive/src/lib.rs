mod attribute_parser;
mod type_utils;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

use attribute_parser::{
    FieldAttrs, apply_rename_all, parse_field_attrs, sea_orm_column_name, serde_rename,
    serde_rename_all, serde_skipped,
};

/// Derives `filtercrate::FilterModel` for a struct with named fields.
///
/// Field attributes, all under `#[filtercrate(...)]`:
///
/// | Attribute | Effect |
/// |---|---|
/// | `filterable`, `sortable`, `editable`, `visible` | capability flags |
/// | `selection = "..."` | UI selection hint |
/// | `ui = "a;b"` | extra raw annotation tokens |
/// | `key = "..."` | wire key; `"-"` hides the field |
/// | `column = "..."` | storage column |
/// | `time_format = "..."` | display hint for date/time fields |
/// | `skip` | hide the field |
///
/// The wire key defaults to the serde name of the field (`rename`, then the
/// container's `rename_all`), and `#[serde(skip)]` hides it. The column
/// defaults to `#[sea_orm(column_name)]` or the field name.
///
/// ```rust,ignore
/// #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, FilterSchema)]
/// #[sea_orm(table_name = "comments")]
/// pub struct Model {
///     #[sea_orm(primary_key, auto_increment = false)]
///     #[filtercrate(visible)]
///     pub id: String,
///     #[filtercrate(visible, filterable, sortable)]
///     pub content: String,
///     #[serde(skip)]
///     pub author_ip: String,
/// }
/// ```
#[proc_macro_derive(FilterSchema, attributes(filtercrate))]
pub fn derive_filter_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn named_fields(input: &DeriveInput) -> Result<&syn::FieldsNamed, syn::Error> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(named),
            _ => Err(syn::Error::new_spanned(
                &input.ident,
                "FilterSchema only supports structs with named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            "FilterSchema can only be derived for structs",
        )),
    }
}

fn field_name(field: &syn::Field) -> String {
    field
        .ident
        .as_ref()
        .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
        .unwrap_or_default()
}

fn wire_key(
    field: &syn::Field,
    attrs: &FieldAttrs,
    rename_all: Option<&str>,
) -> Result<String, syn::Error> {
    if attrs.skip || serde_skipped(field) {
        return Ok("-".to_string());
    }
    if let Some(key) = attrs.key.clone().or_else(|| serde_rename(field)) {
        return Ok(key);
    }
    let name = field_name(field);
    match rename_all {
        Some(rule) => {
            apply_rename_all(rule, &name).map_err(|msg| syn::Error::new_spanned(field, msg))
        }
        None => Ok(name),
    }
}

fn field_descriptor(
    field: &syn::Field,
    rename_all: Option<&str>,
) -> Result<proc_macro2::TokenStream, syn::Error> {
    let attrs = parse_field_attrs(field)?;
    let key = wire_key(field, &attrs, rename_all)?;
    let column = attrs
        .column
        .clone()
        .or_else(|| sea_orm_column_name(field))
        .unwrap_or_else(|| field_name(field));
    let kind = type_utils::kind_name(&field.ty);
    let ui = attrs.annotation();
    let time_format = attrs
        .time_format
        .as_ref()
        .map(|format| quote! { .time_format(#format) });

    Ok(quote! {
        ::filtercrate::FieldDescriptor::new(#key, ::filtercrate::ValueKind::from_type_name(#kind))
            .column(#column)
            .ui(#ui)
            #time_format
    })
}

fn expand(input: &DeriveInput) -> Result<proc_macro2::TokenStream, syn::Error> {
    let rename_all = serde_rename_all(&input.attrs);
    let descriptors = named_fields(input)?
        .named
        .iter()
        .map(|field| field_descriptor(field, rename_all.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::filtercrate::FilterModel for #name #ty_generics #where_clause {
            fn field_descriptors() -> ::std::vec::Vec<::filtercrate::FieldDescriptor> {
                ::std::vec![#(#descriptors),*]
            }
        }
    })
}

use convert_case::{Case, Casing};
use syn::parse::Parser;
use syn::{Lit, Meta, punctuated::Punctuated, token::Comma};

/// Everything `#[filtercrate(...)]` can say about one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub filterable: bool,
    pub sortable: bool,
    pub editable: bool,
    pub visible: bool,
    pub skip: bool,
    /// Extra `;`-separated annotation tokens, passed through verbatim
    pub ui: Option<String>,
    pub selection: Option<String>,
    pub key: Option<String>,
    pub column: Option<String>,
    pub time_format: Option<String>,
}

impl FieldAttrs {
    /// Capability annotation in the `visible;filterable;...` form the schema
    /// builder reads.
    pub fn annotation(&self) -> String {
        let flags = [
            ("visible", self.visible),
            ("editable", self.editable),
            ("filterable", self.filterable),
            ("sortable", self.sortable),
        ];
        let mut tokens: Vec<String> = flags
            .iter()
            .filter(|(_, set)| *set)
            .map(|(name, _)| (*name).to_string())
            .collect();
        if let Some(selection) = &self.selection {
            tokens.push(format!("selection:{selection}"));
        }
        if let Some(ui) = &self.ui {
            tokens.push(ui.clone());
        }
        tokens.join(";")
    }
}

fn metas_of(attr: &syn::Attribute) -> Result<Punctuated<Meta, Comma>, syn::Error> {
    let Meta::List(meta_list) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected a list, e.g. #[filtercrate(filterable, sortable)]",
        ));
    };
    Punctuated::<Meta, Comma>::parse_terminated.parse2(meta_list.tokens.clone())
}

fn string_value(nv: &syn::MetaNameValue) -> Result<String, syn::Error> {
    if let syn::Expr::Lit(expr_lit) = &nv.value
        && let Lit::Str(s) = &expr_lit.lit
    {
        return Ok(s.value());
    }
    Err(syn::Error::new_spanned(&nv.value, "expected a string literal"))
}

/// Parse every `#[filtercrate(...)]` attribute on a field.
///
/// Unknown keys are compile errors so typos do not silently drop a capability.
pub(crate) fn parse_field_attrs(field: &syn::Field) -> Result<FieldAttrs, syn::Error> {
    let mut attrs = FieldAttrs::default();

    for attr in field.attrs.iter().filter(|a| a.path().is_ident("filtercrate")) {
        for meta in metas_of(attr)? {
            match &meta {
                Meta::Path(path) => {
                    let flag = if path.is_ident("filterable") {
                        &mut attrs.filterable
                    } else if path.is_ident("sortable") {
                        &mut attrs.sortable
                    } else if path.is_ident("editable") {
                        &mut attrs.editable
                    } else if path.is_ident("visible") {
                        &mut attrs.visible
                    } else if path.is_ident("skip") {
                        &mut attrs.skip
                    } else {
                        return Err(syn::Error::new_spanned(path, "unknown filtercrate flag"));
                    };
                    *flag = true;
                }
                Meta::NameValue(nv) => {
                    let slot = if nv.path.is_ident("ui") {
                        &mut attrs.ui
                    } else if nv.path.is_ident("selection") {
                        &mut attrs.selection
                    } else if nv.path.is_ident("key") {
                        &mut attrs.key
                    } else if nv.path.is_ident("column") {
                        &mut attrs.column
                    } else if nv.path.is_ident("time_format") {
                        &mut attrs.time_format
                    } else {
                        return Err(syn::Error::new_spanned(
                            &nv.path,
                            "unknown filtercrate option",
                        ));
                    };
                    *slot = Some(string_value(nv)?);
                }
                Meta::List(list) => {
                    return Err(syn::Error::new_spanned(list, "unexpected nested list"));
                }
            }
        }
    }

    Ok(attrs)
}

/// First `name = "..."` string found in `#[<attr_name>(...)]` attributes.
/// Malformed foreign attributes are ignored; their own derive reports them.
fn foreign_string(attrs: &[syn::Attribute], attr_name: &str, name: &str) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(attr_name))
        .filter_map(|attr| metas_of(attr).ok())
        .flatten()
        .find_map(|meta| match meta {
            Meta::NameValue(nv) if nv.path.is_ident(name) => string_value(&nv).ok(),
            _ => None,
        })
}

fn foreign_flag(attrs: &[syn::Attribute], attr_name: &str, names: &[&str]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(attr_name))
        .filter_map(|attr| metas_of(attr).ok())
        .flatten()
        .any(|meta| matches!(meta, Meta::Path(path) if names.iter().any(|n| path.is_ident(n))))
}

/// `#[serde(rename = "...")]` on a field.
pub(crate) fn serde_rename(field: &syn::Field) -> Option<String> {
    foreign_string(&field.attrs, "serde", "rename")
}

/// Whether serde never writes the field out.
pub(crate) fn serde_skipped(field: &syn::Field) -> bool {
    foreign_flag(&field.attrs, "serde", &["skip", "skip_serializing"])
}

/// `#[serde(rename_all = "...")]` on the struct.
pub(crate) fn serde_rename_all(attrs: &[syn::Attribute]) -> Option<String> {
    foreign_string(attrs, "serde", "rename_all")
}

/// `#[sea_orm(column_name = "...")]` on a field.
pub(crate) fn sea_orm_column_name(field: &syn::Field) -> Option<String> {
    foreign_string(&field.attrs, "sea_orm", "column_name")
}

/// Apply a serde `rename_all` rule to a snake_case field name.
pub(crate) fn apply_rename_all(rule: &str, name: &str) -> Result<String, String> {
    let renamed = match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "PascalCase" => name.to_case(Case::Pascal),
        "camelCase" => name.to_case(Case::Camel),
        "snake_case" => name.to_case(Case::Snake),
        "SCREAMING_SNAKE_CASE" => name.to_case(Case::UpperSnake),
        "kebab-case" => name.to_case(Case::Kebab),
        "SCREAMING-KEBAB-CASE" => name.to_case(Case::Cobol),
        other => return Err(format!("unsupported serde rename_all rule `{other}`")),
    };
    Ok(renamed)
}

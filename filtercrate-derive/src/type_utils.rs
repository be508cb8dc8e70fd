//! Type introspection for value-kind inference.

/// Returns the inner type of `Option<T>` (including `std::option::Option<T>`),
/// or the type itself.
pub fn unwrap_option(ty: &syn::Type) -> &syn::Type {
    if let syn::Type::Path(type_path) = ty
        && let Some(last_seg) = type_path.path.segments.last()
        && last_seg.ident == "Option"
        && let syn::PathArguments::AngleBracketed(args) = &last_seg.arguments
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        return inner;
    }
    ty
}

/// Name the schema builder classifies a field by: the last path segment of the
/// type with `Option` unwrapped. References and other non-path types have no
/// certified mapping and come back as their token text.
pub fn kind_name(ty: &syn::Type) -> String {
    match unwrap_option(ty) {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|seg| seg.ident.to_string())
            .unwrap_or_default(),
        syn::Type::Reference(reference) => kind_name(&reference.elem),
        other => quote::quote!(#other).to_string(),
    }
}

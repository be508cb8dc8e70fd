use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

use crate::schema::{FieldDescriptor, Schema, build_schema};

/// A record type whose fields can be filtered, sorted, and projected from
/// query parameters.
///
/// Usually implemented with `#[derive(FilterSchema)]`; a hand-written impl only
/// needs to list its fields:
///
/// ```rust,ignore
/// impl FilterModel for Model {
///     fn field_descriptors() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new("id", ValueKind::Text).ui("visible;sortable"),
///             FieldDescriptor::new("title", ValueKind::Text).ui("filterable;sortable"),
///         ]
///     }
/// }
/// ```
pub trait FilterModel {
    /// Declared fields, in declaration order.
    fn field_descriptors() -> Vec<FieldDescriptor>;

    /// Derive the schema from the declared fields. Runs on every call.
    #[must_use]
    fn schema() -> Schema {
        build_schema(&Self::field_descriptors())
    }
}

static SCHEMA_CACHE: LazyLock<RwLock<HashMap<TypeId, Arc<Schema>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Schema for `T`, built once per process and shared afterwards.
///
/// A poisoned cache lock is not fatal: the schema is rebuilt from `T`.
#[must_use]
pub fn cached_schema<T: FilterModel + 'static>() -> Arc<Schema> {
    let type_id = TypeId::of::<T>();

    if let Ok(cache) = SCHEMA_CACHE.read()
        && let Some(schema) = cache.get(&type_id)
    {
        return Arc::clone(schema);
    }

    let schema = Arc::new(T::schema());
    match SCHEMA_CACHE.write() {
        Ok(mut cache) => Arc::clone(cache.entry(type_id).or_insert(schema)),
        Err(_) => schema,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValueKind;

    struct Article;

    impl FilterModel for Article {
        fn field_descriptors() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::new("id", ValueKind::Text).ui("visible;sortable"),
                FieldDescriptor::new("title", ValueKind::Text).ui("filterable"),
                FieldDescriptor::new("-", ValueKind::Text),
            ]
        }
    }

    struct Empty;

    impl FilterModel for Empty {
        fn field_descriptors() -> Vec<FieldDescriptor> {
            Vec::new()
        }
    }

    #[test]
    fn test_default_schema_uses_descriptors() {
        let schema = Article::schema();
        assert_eq!(schema.len(), 2);
        assert!(schema.get("title").is_some_and(|f| f.filterable));
    }

    #[test]
    fn test_cached_schema_is_shared_per_type() {
        let first = cached_schema::<Article>();
        let second = cached_schema::<Article>();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, Article::schema());

        let empty = cached_schema::<Empty>();
        assert!(empty.is_empty());
    }
}

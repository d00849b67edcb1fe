//! Record types: values with named, classified fields.
//!
//! [`Record`] is the schema descriptor a struct exposes so the normalizer can
//! walk it without runtime reflection. `#[derive(Masked)]` implements it (and
//! [`ToValue`](super::ToValue)) from `#[mask(...)]` field attributes:
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | None | Field is collected with `Classification::None` |
//! | `#[mask(Pin)]`, `#[mask(email)]`, ... | Field is classified |
//! | `#[mask(rename = "x")]` | Field is emitted as `x` |
//! | `#[mask(flatten)]` | The embedded record's fields join the parent |
//! | `#[mask(skip)]` | Field is left out |
//!
//! Classification tables are resolved once per type by [`classify`] and then
//! shared by every record value of that type.

use std::{any::TypeId, sync::Arc};

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::{
    classification::ClassificationTable,
    value::{FieldDescriptor, RecordValue, Value},
};

/// Field-level description of a struct-like type.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Record`",
    label = "this type has no field descriptor",
    note = "use `#[derive(Masked)]` on the type definition",
    note = "`#[mask(flatten)]` is only valid on fields whose type is a record"
)]
pub trait Record {
    /// Name reported on coerced record values.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Registers every output field name with its classification.
    ///
    /// Flattened records contribute their own fields here.
    fn describe_fields(table: &mut ClassificationTable)
    where
        Self: Sized;

    /// Pushes `(name, coerced value)` for every output field, in declaration
    /// order.
    fn collect_fields(&self, fields: &mut Vec<(&'static str, Value)>);
}

static TABLES: Lazy<DashMap<TypeId, Arc<ClassificationTable>>> = Lazy::new(DashMap::new);

/// Returns the cached classification table for `T`, building it on first use.
pub fn classify<T: Record + 'static>() -> Arc<ClassificationTable> {
    let key = TypeId::of::<T>();
    if let Some(table) = TABLES.get(&key) {
        return Arc::clone(table.value());
    }

    let entry = TABLES.entry(key).or_insert_with(|| {
        let mut table = ClassificationTable::new();
        T::describe_fields(&mut table);
        Arc::new(table)
    });
    Arc::clone(entry.value())
}

impl RecordValue {
    /// Coerces `record` into a record value with classifications resolved.
    pub fn of<T: Record + 'static>(record: &T) -> Self {
        let table = classify::<T>();
        let mut collected = Vec::new();
        record.collect_fields(&mut collected);
        let fields = collected
            .into_iter()
            .map(|(name, value)| FieldDescriptor {
                name,
                classification: table.get(name),
                value,
            })
            .collect();
        RecordValue::new(T::type_name(), fields)
    }
}

use core::any::Any;
use core::fmt;

use crate::Reflect;
use crate::element::{Element, FieldElement};
use crate::info::{CustomAttributes, NamedField, Type, TypeInfo, Typed};
use crate::selector::{Predicate, hierarchy_of};

// -----------------------------------------------------------------------------
// FieldMember

/// A selected struct field together with its declaring type.
#[derive(Clone, Copy)]
pub struct FieldMember {
    declaring: Type,
    field: &'static NamedField,
}

impl FieldMember {
    const fn new(declaring: Type, field: &'static NamedField) -> Self {
        Self { declaring, field }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.field.name()
    }

    /// Returns the type declaring the field.
    #[inline]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    /// Returns the field description.
    #[inline]
    pub const fn field(&self) -> &'static NamedField {
        self.field
    }

    /// Returns the field's value [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.field.type_info()
    }

    /// Returns `true` if the field value is of type `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.field.type_is::<T>()
    }

    /// Returns `true` if the field was marked `#[reflect(readonly)]`.
    #[inline]
    pub const fn is_readonly(&self) -> bool {
        self.field.is_readonly()
    }

    /// Returns the custom attributes attached to the field.
    #[inline]
    pub fn attributes(&self) -> &'static CustomAttributes {
        self.field.custom_attributes()
    }

    /// Returns `true` if an attribute of type `A` is attached.
    pub fn is_annotated_with<A: Reflect>(&self) -> bool {
        self.attributes().contains::<A>()
    }

    /// Converts the selection into an [`Element`] over the field.
    pub fn element(&self) -> Element {
        Element::new(FieldElement::new(self.declaring, self.field))
    }
}

impl fmt::Debug for FieldMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMember")
            .field("name", &self.name())
            .field("declaring", &self.declaring)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Queries

/// Starts a query for one field by name.
///
/// The base chain is searched unless [`declared`](FieldQuery::declared)
/// restricts the query to the type itself.
pub fn field(name: impl Into<String>) -> FieldQuery {
    FieldQuery {
        name: name.into(),
        declared_only: false,
        predicate: Predicate::new(),
    }
}

/// Starts a query for all fields of a type.
pub fn fields() -> FieldsQuery {
    FieldsQuery {
        declared_only: false,
        predicate: Predicate::new(),
    }
}

/// A pending single-field query. See [`field`].
pub struct FieldQuery {
    name: String,
    declared_only: bool,
    predicate: Predicate<FieldMember>,
}

impl FieldQuery {
    /// Restricts the query to fields the type itself declares.
    pub fn declared(mut self) -> Self {
        self.declared_only = true;
        self
    }

    /// Keeps only fields accepted by `predicate`.
    pub fn filter(mut self, predicate: impl Fn(&FieldMember) -> bool + Send + Sync + 'static) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Keeps only fields carrying an attribute of type `A`.
    pub fn annotated_with<A: Reflect>(self) -> Self {
        self.filter(|member| member.is_annotated_with::<A>())
    }

    /// Keeps only fields whose value is of type `T`.
    pub fn of_type<T: Any>(self) -> Self {
        self.filter(|member| member.type_is::<T>())
    }

    /// Runs the query against a type.
    pub fn in_type<T: Typed>(self) -> Option<FieldMember> {
        self.in_info(T::type_info())
    }

    /// Runs the query against explicit type information.
    pub fn in_info(self, info: &'static TypeInfo) -> Option<FieldMember> {
        for info in scoped_hierarchy(info, self.declared_only) {
            let Ok(struct_info) = info.as_struct() else {
                continue;
            };
            if let Some(field) = struct_info.field(&self.name) {
                let member = FieldMember::new(*struct_info.ty(), field);
                if self.predicate.test(&member) {
                    return Some(member);
                }
            }
        }
        None
    }
}

/// A pending all-fields query. See [`fields`].
pub struct FieldsQuery {
    declared_only: bool,
    predicate: Predicate<FieldMember>,
}

impl FieldsQuery {
    /// Restricts the query to fields the type itself declares.
    pub fn declared(mut self) -> Self {
        self.declared_only = true;
        self
    }

    /// Keeps only fields accepted by `predicate`.
    pub fn filter(mut self, predicate: impl Fn(&FieldMember) -> bool + Send + Sync + 'static) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Keeps only fields carrying an attribute of type `A`.
    pub fn annotated_with<A: Reflect>(self) -> Self {
        self.filter(|member| member.is_annotated_with::<A>())
    }

    /// Keeps only `#[reflect(readonly)]` fields.
    pub fn readonly(self) -> Self {
        self.filter(FieldMember::is_readonly)
    }

    /// Keeps only writable fields.
    pub fn writable(self) -> Self {
        self.filter(|member| !member.is_readonly())
    }

    /// Keeps only fields whose value is of type `T`.
    pub fn of_type<T: Any>(self) -> Self {
        self.filter(|member| member.type_is::<T>())
    }

    /// Runs the query against a type.
    pub fn in_type<T: Typed>(self) -> Vec<FieldMember> {
        self.in_info(T::type_info())
    }

    /// Runs the query against explicit type information.
    ///
    /// Fields come most derived first; a derived field shadows a base
    /// field of the same name.
    pub fn in_info(self, info: &'static TypeInfo) -> Vec<FieldMember> {
        let mut members: Vec<FieldMember> = Vec::new();
        for info in scoped_hierarchy(info, self.declared_only) {
            let Ok(struct_info) = info.as_struct() else {
                continue;
            };
            for field in struct_info.iter() {
                if members.iter().any(|member| member.name() == field.name()) {
                    continue;
                }
                let member = FieldMember::new(*struct_info.ty(), field);
                if self.predicate.test(&member) {
                    members.push(member);
                }
            }
        }
        members
    }
}

fn scoped_hierarchy(
    info: &'static TypeInfo,
    declared_only: bool,
) -> impl Iterator<Item = &'static TypeInfo> {
    hierarchy_of(info).take(if declared_only { 1 } else { usize::MAX })
}

#[cfg(test)]
mod tests {
    use super::{field, fields};
    use crate::derive::Reflect;

    #[derive(Reflect)]
    struct Entity {
        id: u64,
    }

    #[derive(Reflect)]
    struct Person {
        #[reflect(base)]
        entity: Entity,
        name: String,
        #[reflect(readonly)]
        created: u64,
    }

    #[test]
    fn lookup_searches_the_base_chain() {
        let inherited = field("id").in_type::<Person>().unwrap();
        assert_eq!(inherited.declaring().name(), "Entity");

        assert!(field("id").declared().in_type::<Person>().is_none());
    }

    #[test]
    fn type_filters_narrow_selection() {
        assert!(field("name").of_type::<String>().in_type::<Person>().is_some());
        assert!(field("name").of_type::<u64>().in_type::<Person>().is_none());
    }

    #[test]
    fn enumeration_shadows_base_fields() {
        let all = fields().in_type::<Person>();
        let names: Vec<_> = all.iter().map(|member| member.name()).collect();
        assert_eq!(names, ["entity", "name", "created", "id"]);
    }

    #[test]
    fn readonly_and_writable_partition_the_fields() {
        let readonly = fields().readonly().in_type::<Person>();
        assert_eq!(readonly.len(), 1);
        assert_eq!(readonly[0].name(), "created");

        let writable = fields().writable().in_type::<Person>();
        assert_eq!(writable.len(), 3);
    }
}

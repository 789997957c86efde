use graphql_parser::schema::{EnumValue, Field, InputValue, Type, TypeDefinition, Value};

use std::ops::Index;

use crate::change::{Change, ChangeKind, Severity};
use crate::schema::{DirectiveDef, Schema, TypeDef, kind_description, named_type};

#[derive(Debug)]
pub struct Diff(Vec<Change>);

impl Diff {
    pub fn new(changes: Vec<Change>) -> Self {
        Self(changes)
    }

    pub fn into_severity(self, severity: Severity) -> Vec<Change> {
        self.0
            .into_iter()
            .filter(|c| c.severity() == severity)
            .collect()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Index<usize> for Diff {
    type Output = Change;

    fn index(&self, index: usize) -> &Change {
        &self.0[index]
    }
}

/// Compare two schemas and return every breaking and dangerous change, type
/// changes first, then directive changes.
pub fn find_schema_changes(old: &Schema, new: &Schema) -> Diff {
    Diff::new(
        diff_types(old, new)
            .into_iter()
            .chain(diff_directives(old, new))
            .collect(),
    )
}

pub fn find_breaking_changes(old: &Schema, new: &Schema) -> Vec<Change> {
    find_schema_changes(old, new).into_severity(Severity::Breaking)
}

pub fn find_dangerous_changes(old: &Schema, new: &Schema) -> Vec<Change> {
    find_schema_changes(old, new).into_severity(Severity::Dangerous)
}

// ---------------------------------------------------------------------------
// Layer 1: Types
// ---------------------------------------------------------------------------

fn diff_types(old: &Schema, new: &Schema) -> Vec<Change> {
    let defined = old
        .types()
        .iter()
        .flat_map(|(name, old_type)| match new.get_type(name) {
            None => vec![Change::new(
                ChangeKind::TypeRemoved,
                format!("{name} was removed."),
            )],
            Some(new_type) => diff_type(name, old_type, new_type),
        });

    let standard = old
        .standard_scalars()
        .iter()
        .filter(|name| !new.standard_scalars().contains(*name) && new.get_type(name).is_none())
        .map(|name| {
            Change::new(
                ChangeKind::TypeRemoved,
                format!("Standard scalar {name} was removed because it is not referenced anymore."),
            )
        });

    defined.chain(standard).collect()
}

fn diff_type(name: &str, old: &TypeDef, new: &TypeDef) -> Vec<Change> {
    match (old, new) {
        (TypeDefinition::Scalar(_), TypeDefinition::Scalar(_)) => vec![],
        (TypeDefinition::Enum(o), TypeDefinition::Enum(n)) => {
            diff_enum_values(name, &o.values, &n.values)
        }
        (TypeDefinition::Union(o), TypeDefinition::Union(n)) => {
            diff_union_members(name, &o.types, &n.types)
        }
        (TypeDefinition::InputObject(o), TypeDefinition::InputObject(n)) => {
            diff_input_fields(name, &o.fields, &n.fields)
        }
        (TypeDefinition::Object(o), TypeDefinition::Object(n)) => {
            let mut changes = diff_fields(name, &o.fields, &n.fields);
            changes.extend(diff_interfaces(
                name,
                &o.implements_interfaces,
                &n.implements_interfaces,
            ));
            changes
        }
        (TypeDefinition::Interface(o), TypeDefinition::Interface(n)) => {
            let mut changes = diff_fields(name, &o.fields, &n.fields);
            changes.extend(diff_interfaces(
                name,
                &o.implements_interfaces,
                &n.implements_interfaces,
            ));
            changes
        }
        _ => vec![Change::new(
            ChangeKind::TypeChangedKind,
            format!(
                "{name} changed from {} to {}.",
                kind_description(old),
                kind_description(new)
            ),
        )],
    }
}

// ---------------------------------------------------------------------------
// Layer 2: Enum values, union members, implemented interfaces
// ---------------------------------------------------------------------------

fn diff_enum_values(
    enum_name: &str,
    old: &[EnumValue<'static, String>],
    new: &[EnumValue<'static, String>],
) -> Vec<Change> {
    let has = |values: &[EnumValue<'static, String>], name: &str| {
        values.iter().any(|v| v.name == name)
    };

    let added = new.iter().filter(|v| !has(old, &v.name)).map(|v| {
        Change::new(
            ChangeKind::ValueAddedToEnum,
            format!("{} was added to enum type {enum_name}.", v.name),
        )
    });

    let removed = old.iter().filter(|v| !has(new, &v.name)).map(|v| {
        Change::new(
            ChangeKind::ValueRemovedFromEnum,
            format!("{} was removed from enum type {enum_name}.", v.name),
        )
    });

    added.chain(removed).collect()
}

fn diff_union_members(union_name: &str, old: &[String], new: &[String]) -> Vec<Change> {
    let added = new.iter().filter(|m| !old.contains(m)).map(|m| {
        Change::new(
            ChangeKind::TypeAddedToUnion,
            format!("{m} was added to union type {union_name}."),
        )
    });

    let removed = old.iter().filter(|m| !new.contains(m)).map(|m| {
        Change::new(
            ChangeKind::TypeRemovedFromUnion,
            format!("{m} was removed from union type {union_name}."),
        )
    });

    added.chain(removed).collect()
}

fn diff_interfaces(type_name: &str, old: &[String], new: &[String]) -> Vec<Change> {
    let added = new.iter().filter(|i| !old.contains(i)).map(|i| {
        Change::new(
            ChangeKind::ImplementedInterfaceAdded,
            format!("{i} added to interfaces implemented by {type_name}."),
        )
    });

    let removed = old.iter().filter(|i| !new.contains(i)).map(|i| {
        Change::new(
            ChangeKind::ImplementedInterfaceRemoved,
            format!("{type_name} no longer implements interface {i}."),
        )
    });

    added.chain(removed).collect()
}

// ---------------------------------------------------------------------------
// Layer 3: Fields
// ---------------------------------------------------------------------------

fn diff_fields(
    type_name: &str,
    old: &[Field<'static, String>],
    new: &[Field<'static, String>],
) -> Vec<Change> {
    old.iter()
        .flat_map(|old_field| {
            let path = format!("{type_name}.{}", old_field.name);
            match new.iter().find(|f| f.name == old_field.name) {
                None => vec![Change::new(
                    ChangeKind::FieldRemoved,
                    format!("{path} was removed."),
                )],
                Some(new_field) => {
                    let mut changes =
                        diff_arguments(&path, &old_field.arguments, &new_field.arguments);
                    if !is_safe_output_change(&old_field.field_type, &new_field.field_type) {
                        changes.push(Change::new(
                            ChangeKind::FieldChangedKind,
                            format!(
                                "{path} changed type from {} to {}.",
                                old_field.field_type, new_field.field_type
                            ),
                        ));
                    }
                    changes
                }
            }
        })
        .collect()
}

fn diff_input_fields(
    type_name: &str,
    old: &[InputValue<'static, String>],
    new: &[InputValue<'static, String>],
) -> Vec<Change> {
    let added = new
        .iter()
        .filter(|n| !old.iter().any(|o| o.name == n.name))
        .map(|n| {
            if is_required(n) {
                Change::new(
                    ChangeKind::RequiredInputFieldAdded,
                    format!("A required field {} on input type {type_name} was added.", n.name),
                )
            } else {
                Change::new(
                    ChangeKind::OptionalInputFieldAdded,
                    format!("An optional field {} on input type {type_name} was added.", n.name),
                )
            }
        });

    let existing = old.iter().filter_map(|o| {
        let path = format!("{type_name}.{}", o.name);
        match new.iter().find(|n| n.name == o.name) {
            None => Some(Change::new(
                ChangeKind::FieldRemoved,
                format!("{path} was removed."),
            )),
            Some(n) if !is_safe_input_change(&o.value_type, &n.value_type) => Some(Change::new(
                ChangeKind::FieldChangedKind,
                format!(
                    "{path} changed type from {} to {}.",
                    o.value_type, n.value_type
                ),
            )),
            Some(_) => None,
        }
    });

    added.chain(existing).collect()
}

// ---------------------------------------------------------------------------
// Layer 4: Arguments
// ---------------------------------------------------------------------------

fn diff_arguments(
    field_path: &str,
    old: &[InputValue<'static, String>],
    new: &[InputValue<'static, String>],
) -> Vec<Change> {
    let existing = old.iter().flat_map(|old_arg| {
        let name = &old_arg.name;
        match new.iter().find(|a| a.name == *name) {
            None => vec![Change::new(
                ChangeKind::ArgRemoved,
                format!("{field_path} arg {name} was removed."),
            )],
            Some(new_arg) => diff_argument(field_path, old_arg, new_arg)
                .into_iter()
                .collect(),
        }
    });

    let added = new
        .iter()
        .filter(|n| !old.iter().any(|o| o.name == n.name))
        .map(|n| {
            if is_required(n) {
                Change::new(
                    ChangeKind::RequiredArgAdded,
                    format!("A required arg {} on {field_path} was added.", n.name),
                )
            } else {
                Change::new(
                    ChangeKind::OptionalArgAdded,
                    format!("An optional arg {} on {field_path} was added.", n.name),
                )
            }
        });

    existing.chain(added).collect()
}

fn diff_argument(
    field_path: &str,
    old: &InputValue<'static, String>,
    new: &InputValue<'static, String>,
) -> Option<Change> {
    let name = &old.name;
    if !is_safe_input_change(&old.value_type, &new.value_type) {
        return Some(Change::new(
            ChangeKind::ArgChangedKind,
            format!(
                "{field_path} arg {name} has changed type from {} to {}.",
                old.value_type, new.value_type
            ),
        ));
    }

    let old_default = old.default_value.as_ref().map(|v| coerce_default(v, &old.value_type));
    let new_default = new.default_value.as_ref().map(|v| coerce_default(v, &new.value_type));

    match (old_default, new_default) {
        (Some(_), None) => Some(Change::new(
            ChangeKind::ArgDefaultValueChange,
            format!("{field_path} arg {name} defaultValue was removed."),
        )),
        (Some(old_value), Some(new_value)) if old_value != new_value => Some(Change::new(
            ChangeKind::ArgDefaultValueChange,
            format!("{field_path} arg {name} has changed defaultValue from {old_value} to {new_value}."),
        )),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Layer 5: Directives
// ---------------------------------------------------------------------------

fn diff_directives(old: &Schema, new: &Schema) -> Vec<Change> {
    old.directives()
        .iter()
        .flat_map(|(name, old_directive)| match new.get_directive(name) {
            None => vec![Change::new(
                ChangeKind::DirectiveRemoved,
                format!("{name} was removed."),
            )],
            Some(new_directive) => diff_directive(name, old_directive, new_directive),
        })
        .collect()
}

fn diff_directive(name: &str, old: &DirectiveDef, new: &DirectiveDef) -> Vec<Change> {
    let added_required = new
        .arguments
        .iter()
        .filter(|n| is_required(n) && !old.arguments.iter().any(|o| o.name == n.name))
        .map(|n| {
            Change::new(
                ChangeKind::RequiredDirectiveArgAdded,
                format!("A required arg {} on directive {name} was added.", n.name),
            )
        });

    let removed_args = old
        .arguments
        .iter()
        .filter(|o| !new.arguments.iter().any(|n| n.name == o.name))
        .map(|o| {
            Change::new(
                ChangeKind::DirectiveArgRemoved,
                format!("{} was removed from {name}.", o.name),
            )
        });

    let repeatable = (old.repeatable && !new.repeatable).then(|| {
        Change::new(
            ChangeKind::DirectiveRepeatableRemoved,
            format!("Repeatable flag was removed from {name}."),
        )
    });

    let removed_locations = old
        .locations
        .iter()
        .filter(|l| !new.locations.contains(l))
        .map(|l| {
            Change::new(
                ChangeKind::DirectiveLocationRemoved,
                format!("{} was removed from {name}.", l.as_str()),
            )
        });

    added_required
        .chain(removed_args)
        .chain(repeatable)
        .chain(removed_locations)
        .collect()
}

/// Bring a default literal to the form the argument type gives it: integer
/// literals of a `Float` argument are floats.
fn coerce_default(value: &Value<'static, String>, ty: &Type<'static, String>) -> Value<'static, String> {
    match value {
        Value::Int(n) if named_type(ty) == "Float" => n
            .as_i64()
            .map_or_else(|| value.clone(), |n| Value::Float(n as f64)),
        Value::List(items) => Value::List(items.iter().map(|v| coerce_default(v, ty)).collect()),
        _ => value.clone(),
    }
}

// ---------------------------------------------------------------------------
// Type compatibility
// ---------------------------------------------------------------------------

fn is_required(input: &InputValue<'static, String>) -> bool {
    matches!(input.value_type, Type::NonNullType(_)) && input.default_value.is_none()
}

/// A field may become stricter (more non-null) without breaking readers.
fn is_safe_output_change(old: &Type<'static, String>, new: &Type<'static, String>) -> bool {
    match (old, new) {
        (Type::ListType(o), Type::ListType(n)) => is_safe_output_change(o, n),
        (Type::ListType(_), Type::NonNullType(n)) => is_safe_output_change(old, n),
        (Type::ListType(_), _) => false,
        (Type::NonNullType(o), Type::NonNullType(n)) => is_safe_output_change(o, n),
        (Type::NonNullType(_), _) => false,
        (Type::NamedType(o), Type::NamedType(n)) => o == n,
        (Type::NamedType(_), Type::NonNullType(n)) => is_safe_output_change(old, n),
        (Type::NamedType(_), Type::ListType(_)) => false,
    }
}

/// An input may become looser (drop non-null) without breaking callers.
fn is_safe_input_change(old: &Type<'static, String>, new: &Type<'static, String>) -> bool {
    match (old, new) {
        (Type::ListType(o), Type::ListType(n)) => is_safe_input_change(o, n),
        (Type::ListType(_), _) => false,
        (Type::NonNullType(o), Type::NonNullType(n)) => is_safe_input_change(o, n),
        (Type::NonNullType(o), _) => is_safe_input_change(o, new),
        (Type::NamedType(o), Type::NamedType(n)) => o == n,
        (Type::NamedType(_), _) => false,
    }
}

use graphql_parser::schema::{
    Definition, DirectiveDefinition, Field, InputValue, ParseError, Type, TypeDefinition,
    TypeExtension,
};
use indexmap::{IndexMap, IndexSet};
use indexmap::map::Entry;

pub type TypeDef = TypeDefinition<'static, String>;
pub type DirectiveDef = DirectiveDefinition<'static, String>;

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Introspection itself uses these, so every schema references them.
const INTROSPECTION_SCALARS: [&str; 2] = ["String", "Boolean"];

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("there can be only one type named '{0}'")]
    DuplicateType(String),
    #[error("there can be only one directive named '@{0}'")]
    DuplicateDirective(String),
    #[error("cannot extend type '{0}' because it is not defined")]
    ExtendUnknownType(String),
    #[error("cannot extend type '{0}' with an extension of a different kind")]
    ExtensionKindMismatch(String),
    #[error("unknown type '{name}' referenced by {referenced_by}")]
    UnknownType { name: String, referenced_by: String },
}

/// A parsed schema document with its extensions folded in, indexed by name in
/// declaration order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    types: IndexMap<String, TypeDef>,
    directives: IndexMap<String, DirectiveDef>,
    standard_scalars: IndexSet<String>,
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
}

impl Schema {
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let document = graphql_parser::parse_schema::<String>(sdl)?.into_static();

        let mut schema = Schema::default();
        let mut extensions = Vec::new();

        for definition in document.definitions {
            match definition {
                Definition::SchemaDefinition(def) => {
                    schema.query_type = def.query;
                    schema.mutation_type = def.mutation;
                    schema.subscription_type = def.subscription;
                }
                Definition::TypeDefinition(def) => schema.insert_type(def)?,
                Definition::DirectiveDefinition(def) => schema.insert_directive(def)?,
                Definition::TypeExtension(ext) => extensions.push(ext),
            }
        }

        for extension in extensions {
            schema.apply_extension(extension)?;
        }

        schema.default_root_types();
        schema.standard_scalars = schema.check_references()?;

        Ok(schema)
    }

    pub fn types(&self) -> &IndexMap<String, TypeDef> {
        &self.types
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn directives(&self) -> &IndexMap<String, DirectiveDef> {
        &self.directives
    }

    pub fn get_directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directives.get(name)
    }

    /// Built-in scalars the schema uses without defining them.
    pub fn standard_scalars(&self) -> &IndexSet<String> {
        &self.standard_scalars
    }

    fn insert_type(&mut self, def: TypeDef) -> Result<(), SchemaError> {
        match self.types.entry(type_name(&def).to_string()) {
            Entry::Occupied(entry) => Err(SchemaError::DuplicateType(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(def);
                Ok(())
            }
        }
    }

    fn insert_directive(&mut self, def: DirectiveDef) -> Result<(), SchemaError> {
        match self.directives.entry(def.name.clone()) {
            Entry::Occupied(entry) => Err(SchemaError::DuplicateDirective(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(def);
                Ok(())
            }
        }
    }

    fn apply_extension(&mut self, extension: TypeExtension<'static, String>) -> Result<(), SchemaError> {
        let name = extension_name(&extension).to_string();
        let Some(target) = self.types.get_mut(&name) else {
            return Err(SchemaError::ExtendUnknownType(name));
        };

        match (target, extension) {
            (TypeDefinition::Scalar(t), TypeExtension::Scalar(e)) => {
                t.directives.extend(e.directives);
            }
            (TypeDefinition::Object(t), TypeExtension::Object(e)) => {
                t.implements_interfaces.extend(e.implements_interfaces);
                t.directives.extend(e.directives);
                t.fields.extend(e.fields);
            }
            (TypeDefinition::Interface(t), TypeExtension::Interface(e)) => {
                t.implements_interfaces.extend(e.implements_interfaces);
                t.directives.extend(e.directives);
                t.fields.extend(e.fields);
            }
            (TypeDefinition::Union(t), TypeExtension::Union(e)) => {
                t.directives.extend(e.directives);
                t.types.extend(e.types);
            }
            (TypeDefinition::Enum(t), TypeExtension::Enum(e)) => {
                t.directives.extend(e.directives);
                t.values.extend(e.values);
            }
            (TypeDefinition::InputObject(t), TypeExtension::InputObject(e)) => {
                t.directives.extend(e.directives);
                t.fields.extend(e.fields);
            }
            _ => return Err(SchemaError::ExtensionKindMismatch(name)),
        }
        Ok(())
    }

    fn default_root_types(&mut self) {
        let has_object = |types: &IndexMap<String, TypeDef>, name: &str| {
            matches!(types.get(name), Some(TypeDefinition::Object(_)))
        };
        if self.query_type.is_none() && has_object(&self.types, "Query") {
            self.query_type = Some("Query".into());
        }
        if self.mutation_type.is_none() && has_object(&self.types, "Mutation") {
            self.mutation_type = Some("Mutation".into());
        }
        if self.subscription_type.is_none() && has_object(&self.types, "Subscription") {
            self.subscription_type = Some("Subscription".into());
        }
    }

    fn is_builtin(&self, name: &str) -> bool {
        BUILTIN_SCALARS.contains(&name) && !self.types.contains_key(name)
    }

    /// Reject references to undefined types and collect the built-in scalars
    /// that are referenced.
    fn check_references(&self) -> Result<IndexSet<String>, SchemaError> {
        let roots = [&self.query_type, &self.mutation_type, &self.subscription_type];
        let root_refs = roots
            .into_iter()
            .flatten()
            .map(|name| (name.as_str(), "the schema definition".to_string()));

        let type_refs = self.types.values().flat_map(type_references);

        let directive_refs = self.directives.values().flat_map(|d| {
            input_references(&d.arguments, &format!("directive '@{}'", d.name))
        });

        let mut standard_scalars: IndexSet<String> =
            INTROSPECTION_SCALARS.iter().map(|s| s.to_string()).collect();

        for (name, referenced_by) in root_refs.chain(type_refs).chain(directive_refs) {
            if self.is_builtin(name) {
                standard_scalars.insert(name.to_string());
            } else if !self.types.contains_key(name) {
                return Err(SchemaError::UnknownType {
                    name: name.to_string(),
                    referenced_by,
                });
            }
        }
        Ok(standard_scalars)
    }
}

fn type_references(def: &TypeDef) -> Vec<(&str, String)> {
    let owner = type_name(def);
    match def {
        TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => vec![],
        TypeDefinition::Object(t) => interface_references(owner, &t.implements_interfaces)
            .chain(field_references(owner, &t.fields))
            .collect(),
        TypeDefinition::Interface(t) => interface_references(owner, &t.implements_interfaces)
            .chain(field_references(owner, &t.fields))
            .collect(),
        TypeDefinition::Union(t) => t
            .types
            .iter()
            .map(|member| (member.as_str(), format!("union '{owner}'")))
            .collect(),
        TypeDefinition::InputObject(t) => input_references(&t.fields, &format!("input '{owner}'")),
    }
}

fn interface_references<'a>(
    owner: &'a str,
    interfaces: &'a [String],
) -> impl Iterator<Item = (&'a str, String)> + 'a {
    interfaces
        .iter()
        .map(move |i| (i.as_str(), format!("'{owner}' implements clause")))
}

fn field_references<'a>(
    owner: &'a str,
    fields: &'a [Field<'static, String>],
) -> impl Iterator<Item = (&'a str, String)> + 'a {
    fields.iter().flat_map(move |field| {
        let path = format!("'{owner}.{}'", field.name);
        let mut refs = vec![(named_type(&field.field_type), format!("field {path}"))];
        refs.extend(input_references(&field.arguments, &format!("an argument of {path}")));
        refs
    })
}

fn input_references<'a>(
    inputs: &'a [InputValue<'static, String>],
    referenced_by: &str,
) -> Vec<(&'a str, String)> {
    inputs
        .iter()
        .map(|input| (named_type(&input.value_type), referenced_by.to_string()))
        .collect()
}

fn extension_name<'a>(extension: &'a TypeExtension<'static, String>) -> &'a str {
    match extension {
        TypeExtension::Scalar(e) => &e.name,
        TypeExtension::Object(e) => &e.name,
        TypeExtension::Interface(e) => &e.name,
        TypeExtension::Union(e) => &e.name,
        TypeExtension::Enum(e) => &e.name,
        TypeExtension::InputObject(e) => &e.name,
    }
}

pub fn type_name(def: &TypeDef) -> &str {
    match def {
        TypeDefinition::Scalar(t) => &t.name,
        TypeDefinition::Object(t) => &t.name,
        TypeDefinition::Interface(t) => &t.name,
        TypeDefinition::Union(t) => &t.name,
        TypeDefinition::Enum(t) => &t.name,
        TypeDefinition::InputObject(t) => &t.name,
    }
}

/// Human wording of a type's kind, as used in change descriptions.
pub fn kind_description(def: &TypeDef) -> &'static str {
    match def {
        TypeDefinition::Scalar(_) => "a Scalar type",
        TypeDefinition::Object(_) => "an Object type",
        TypeDefinition::Interface(_) => "an Interface type",
        TypeDefinition::Union(_) => "a Union type",
        TypeDefinition::Enum(_) => "an Enum type",
        TypeDefinition::InputObject(_) => "an Input type",
    }
}

/// The named type at the bottom of any list / non-null wrapping.
pub fn named_type<'a>(ty: &'a Type<'static, String>) -> &'a str {
    match ty {
        Type::NamedType(name) => name,
        Type::ListType(inner) | Type::NonNullType(inner) => named_type(inner),
    }
}

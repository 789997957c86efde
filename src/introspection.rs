//! Introspection of a live endpoint, printed back as SDL.

use cynic::{Operation, QueryBuilder};
use cynic_introspection::{IntrospectionQuery, Schema, SchemaError, Type};

const BUILTIN_DIRECTIVES: &[&str] = &["deprecated", "include", "skip", "specifiedBy"];
const BUILTIN_SCALARS: &[&str] = &["Boolean", "Float", "ID", "Int", "String"];

pub fn query() -> Operation<IntrospectionQuery, ()> {
    IntrospectionQuery::build(())
}

/// Print an introspection result as SDL, leaving out everything every
/// GraphQL server defines.
pub fn to_sdl(data: IntrospectionQuery) -> Result<String, SchemaError> {
    let mut schema = data.into_schema()?;
    filter_builtins(&mut schema);
    Ok(schema.to_sdl())
}

fn filter_builtins(schema: &mut Schema) {
    schema
        .directives
        .retain(|d| !BUILTIN_DIRECTIVES.contains(&d.name.as_str()));

    schema.types.retain(|t| {
        if let Type::Scalar(v) = t {
            if BUILTIN_SCALARS.contains(&v.name.as_str()) {
                return false;
            }
        }
        !t.name().starts_with("__")
    });
}

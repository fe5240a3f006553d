//! Example values for operation variables.

use gqlterm_semantic::{Schema, TypeKind, TypeRef};
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

#[allow(clippy::approx_constant)]
const EXAMPLE_FLOAT: f64 = 3.14;

/// Synthesizes a plausible value for one variable.
///
/// Each input-object type is expanded at most once per synthesized value;
/// any later occurrence, even outside its own subtree, becomes `null`.
pub(crate) fn example_value(schema: &Schema, ty: &TypeRef) -> Value {
    ExampleBuilder {
        schema,
        entered: FxHashSet::default(),
    }
    .build(ty)
}

struct ExampleBuilder<'a> {
    schema: &'a Schema,
    entered: FxHashSet<&'a str>,
}

impl<'a> ExampleBuilder<'a> {
    fn build(&mut self, ty: &TypeRef) -> Value {
        match ty {
            TypeRef::NonNull(inner) => self.build(inner),
            TypeRef::List(inner) => Value::Array(vec![self.build(inner)]),
            TypeRef::Named(None) => Value::Null,
            TypeRef::Named(Some(name)) => self.build_named(name),
        }
    }

    fn build_named(&mut self, name: &str) -> Value {
        match name {
            "String" => return Value::from("example"),
            "Int" => return Value::from(42),
            "Float" => return Value::from(EXAMPLE_FLOAT),
            "Boolean" => return Value::Bool(false),
            "ID" => return Value::from("1"),
            _ => {}
        }

        let Some(full) = self.schema.type_by_name(name) else {
            return Value::Null;
        };
        match full.kind {
            TypeKind::Scalar => Value::from("example"),
            TypeKind::Enum => full
                .enum_values
                .first()
                .map_or(Value::Null, |value| Value::from(value.name.as_str())),
            TypeKind::InputObject => {
                if !self.entered.insert(full.name.as_str()) {
                    return Value::Null;
                }
                let fields: Map<String, Value> = full
                    .input_fields
                    .iter()
                    .map(|field| (field.name.clone(), self.build(&field.ty)))
                    .collect();
                Value::Object(fields)
            }
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlterm_semantic::{FullType, InputValue};
    use serde_json::json;

    fn named(name: &str) -> TypeRef {
        TypeRef::named(name)
    }

    #[test]
    fn test_builtin_scalars() {
        let schema = Schema::default();
        assert_eq!(example_value(&schema, &named("String")), json!("example"));
        assert_eq!(example_value(&schema, &named("Int")), json!(42));
        assert_eq!(example_value(&schema, &named("Float")), json!(EXAMPLE_FLOAT));
        assert_eq!(example_value(&schema, &named("Boolean")), json!(false));
        assert_eq!(example_value(&schema, &TypeRef::non_null(named("ID"))), json!("1"));
        assert_eq!(
            example_value(&schema, &TypeRef::list(TypeRef::non_null(named("Int")))),
            json!([42])
        );
    }

    #[test]
    fn test_schema_types() {
        let schema = Schema::new(vec![
            FullType::scalar("DateTime"),
            FullType::enumeration("Role", &["ADMIN", "VIEWER"]),
            FullType::enumeration("Empty", &[]),
            FullType::object("User", vec![]),
        ]);
        assert_eq!(example_value(&schema, &named("DateTime")), json!("example"));
        assert_eq!(example_value(&schema, &named("Role")), json!("ADMIN"));
        assert_eq!(example_value(&schema, &named("Empty")), Value::Null);
        assert_eq!(example_value(&schema, &named("User")), Value::Null);
        assert_eq!(example_value(&schema, &named("Unknown")), Value::Null);
        assert_eq!(example_value(&schema, &TypeRef::unresolved()), Value::Null);
    }

    #[test]
    fn test_input_object_fields_keep_declaration_order() {
        let schema = Schema::new(vec![FullType::input_object(
            "NewUser",
            vec![
                InputValue::new("name", TypeRef::non_null(named("String"))),
                InputValue::new("age", named("Int")),
                InputValue::new("admin", named("Boolean")),
            ],
        )]);
        let value = example_value(&schema, &named("NewUser"));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"name":"example","age":42,"admin":false}"#
        );
    }

    #[test]
    fn test_input_objects_are_entered_once_per_value() {
        let schema = Schema::new(vec![
            FullType::input_object(
                "Filter",
                vec![
                    InputValue::new("and", TypeRef::list(named("Filter"))),
                    InputValue::new("range", named("Range")),
                    InputValue::new("other", named("Range")),
                ],
            ),
            FullType::input_object("Range", vec![InputValue::new("min", named("Int"))]),
        ]);
        // `other` repeats `Range` from a sibling field and still gets null.
        assert_eq!(
            example_value(&schema, &named("Filter")),
            json!({ "and": [null], "range": { "min": 42 }, "other": null })
        );
        // A fresh call starts with nothing entered.
        assert_eq!(example_value(&schema, &named("Range")), json!({ "min": 42 }));
    }
}

//! Decoding of standard introspection results into a [`Schema`].
//!
//! Accepts the full response (`{"data": {"__schema": ...}}`), the bare
//! `{"__schema": ...}` object, or the schema object itself.

use crate::types::{EnumValue, Field, FullType, InputValue, OperationKind, Schema, TypeKind, TypeRef};
use miette::Diagnostic;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Failure to decode an introspection result.
#[derive(Debug, Error, Diagnostic)]
pub enum IntrospectionError {
    #[error("invalid introspection JSON: {0}")]
    #[diagnostic(code(gqlterm::introspection::invalid_json))]
    Json(#[from] serde_json::Error),

    #[error("no `__schema` object found in introspection result")]
    #[diagnostic(
        code(gqlterm::introspection::missing_schema),
        help("expected `{{\"data\": {{\"__schema\": ...}}}}` or `{{\"__schema\": ...}}`")
    )]
    MissingSchema,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    query_type: Option<RawRootType>,
    mutation_type: Option<RawRootType>,
    subscription_type: Option<RawRootType>,
    #[serde(default)]
    types: Vec<RawType>,
}

#[derive(Deserialize)]
struct RawRootType {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: TypeKind,
    name: Option<String>,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    enum_values: Option<Vec<RawEnumValue>>,
    possible_types: Option<Vec<RawTypeRef>>,
    interfaces: Option<Vec<RawTypeRef>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: String,
    description: Option<String>,
    #[serde(default)]
    args: Vec<RawInputValue>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputValue {
    name: String,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    default_value: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: String,
    description: Option<String>,
    #[serde(default)]
    is_deprecated: bool,
    deprecation_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTypeRef {
    kind: Option<TypeKind>,
    name: Option<String>,
    of_type: Option<Box<RawTypeRef>>,
}

impl From<RawTypeRef> for TypeRef {
    fn from(raw: RawTypeRef) -> Self {
        match (raw.kind, raw.of_type) {
            (Some(TypeKind::NonNull), Some(inner)) => TypeRef::non_null((*inner).into()),
            (Some(TypeKind::List), Some(inner)) => TypeRef::list((*inner).into()),
            // A wrapper missing its inner type cannot be resolved.
            (Some(TypeKind::NonNull | TypeKind::List), None) => TypeRef::unresolved(),
            _ => TypeRef::Named(raw.name),
        }
    }
}

impl From<RawInputValue> for InputValue {
    fn from(raw: RawInputValue) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            ty: raw.ty.into(),
            default_value: raw.default_value,
        }
    }
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            args: raw.args.into_iter().map(Into::into).collect(),
            ty: raw.ty.into(),
            is_deprecated: raw.is_deprecated,
            deprecation_reason: raw.deprecation_reason,
        }
    }
}

impl From<RawEnumValue> for EnumValue {
    fn from(raw: RawEnumValue) -> Self {
        Self {
            name: raw.name,
            description: raw.description,
            is_deprecated: raw.is_deprecated,
            deprecation_reason: raw.deprecation_reason,
        }
    }
}

fn convert_all<R, T: From<R>>(raw: Option<Vec<R>>) -> Vec<T> {
    raw.unwrap_or_default().into_iter().map(T::from).collect()
}

impl RawType {
    fn into_full_type(self) -> Option<FullType> {
        let name = self.name?;
        Some(FullType {
            kind: self.kind,
            name,
            description: self.description,
            fields: convert_all(self.fields),
            input_fields: convert_all(self.input_fields),
            enum_values: convert_all(self.enum_values),
            possible_types: convert_all(self.possible_types),
            interfaces: convert_all(self.interfaces),
        })
    }
}

impl RawSchema {
    fn into_schema(self) -> Schema {
        let types = self
            .types
            .into_iter()
            .filter_map(RawType::into_full_type)
            .filter(|ty| !ty.name.starts_with("__"))
            .collect();

        let roots = [
            (OperationKind::Query, self.query_type),
            (OperationKind::Mutation, self.mutation_type),
            (OperationKind::Subscription, self.subscription_type),
        ];
        roots
            .into_iter()
            .fold(Schema::new(types), |schema, (kind, root)| match root {
                Some(root) => schema.with_root(kind, TypeRef::Named(root.name)),
                None => schema,
            })
    }
}

/// Pulls the schema object out of whichever envelope it arrived in.
fn locate_schema(mut value: Value) -> Option<Value> {
    let data = value.get_mut("data").map(Value::take);
    if let Some(data) = data {
        value = data;
    }
    let schema = value.get_mut("__schema").map(Value::take);
    match schema {
        Some(schema) => Some(schema),
        None => value.get("types").is_some().then_some(value),
    }
}

impl Schema {
    /// Decodes an introspection result from JSON text.
    ///
    /// Types whose names start with `__` are dropped.
    pub fn from_introspection_json(source: &str) -> Result<Self, IntrospectionError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_introspection_value(value)
    }

    /// Decodes an already-parsed introspection result.
    pub fn from_introspection_value(value: Value) -> Result<Self, IntrospectionError> {
        let schema = locate_schema(value).ok_or(IntrospectionError::MissingSchema)?;
        let raw: RawSchema = serde_json::from_value(schema)?;
        let schema = raw.into_schema();
        debug!(types = schema.types().len(), "decoded introspection schema");
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTROSPECTION: &str = r#"{
      "data": {
        "__schema": {
          "queryType": { "name": "Query" },
          "mutationType": null,
          "subscriptionType": null,
          "types": [
            {
              "kind": "OBJECT",
              "name": "Query",
              "description": null,
              "fields": [
                {
                  "name": "user",
                  "description": "Look up a user",
                  "args": [
                    {
                      "name": "id",
                      "description": null,
                      "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } },
                      "defaultValue": null
                    }
                  ],
                  "type": { "kind": "OBJECT", "name": "User", "ofType": null },
                  "isDeprecated": false,
                  "deprecationReason": null
                }
              ],
              "inputFields": null,
              "interfaces": [],
              "enumValues": null,
              "possibleTypes": null
            },
            {
              "kind": "OBJECT",
              "name": "User",
              "fields": [
                {
                  "name": "posts",
                  "args": [],
                  "type": {
                    "kind": "NON_NULL", "name": null,
                    "ofType": { "kind": "LIST", "name": null,
                      "ofType": { "kind": "NON_NULL", "name": null,
                        "ofType": { "kind": "OBJECT", "name": "Post", "ofType": null } } }
                  },
                  "isDeprecated": true,
                  "deprecationReason": "use feed"
                }
              ],
              "interfaces": [{ "kind": "INTERFACE", "name": "Node", "ofType": null }]
            },
            { "kind": "ENUM", "name": "Role", "enumValues": [{ "name": "ADMIN", "isDeprecated": false }] },
            { "kind": "OBJECT", "name": "__Type", "fields": [] },
            { "kind": "SCALAR", "name": "__Hidden" }
          ]
        }
      }
    }"#;

    #[test]
    fn test_decodes_full_response() {
        let schema = Schema::from_introspection_json(INTROSPECTION).unwrap();
        let names: Vec<_> = schema.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Query", "User", "Role"]);
        assert_eq!(schema.root_types().len(), 1);
        assert!(schema.root_type(OperationKind::Mutation).is_none());

        let user = schema.type_by_name("Query").and_then(|q| q.field("user")).unwrap();
        assert_eq!(user.args[0].ty.display_name(), "ID!");
        assert_eq!(user.description.as_deref(), Some("Look up a user"));

        let posts = schema.type_by_name("User").and_then(|u| u.field("posts")).unwrap();
        assert_eq!(posts.ty.display_name(), "[Post!]!");
        assert!(posts.is_deprecated);
        assert_eq!(schema.type_by_name("User").unwrap().interfaces, vec![TypeRef::named("Node")]);
    }

    #[test]
    fn test_accepts_bare_envelopes() {
        let bare = r#"{"__schema": {"queryType": {"name": "Q"}, "types": [{"kind": "OBJECT", "name": "Q", "fields": []}]}}"#;
        let schema = Schema::from_introspection_json(bare).unwrap();
        assert_eq!(schema.root_types()[0].name, "Q");

        let plain = r#"{"queryType": null, "types": [{"kind": "SCALAR", "name": "Date"}]}"#;
        let schema = Schema::from_introspection_json(plain).unwrap();
        assert!(schema.type_by_name("Date").is_some());
        assert!(schema.root_types().is_empty());
    }

    #[test]
    fn test_wrapper_without_inner_type_is_unresolved() {
        let raw: RawTypeRef =
            serde_json::from_str(r#"{"kind": "NON_NULL", "name": null, "ofType": null}"#).unwrap();
        assert_eq!(TypeRef::from(raw), TypeRef::unresolved());
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            Schema::from_introspection_json("{"),
            Err(IntrospectionError::Json(_))
        ));
        assert!(matches!(
            Schema::from_introspection_json(r#"{"data": {}}"#),
            Err(IntrospectionError::MissingSchema)
        ));
    }
}

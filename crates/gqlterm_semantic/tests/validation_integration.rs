//! Integration tests for validation through the apollo-compiler engine.

use gqlterm_semantic::{ApolloEngine, LoadedSchema, Schema, ValidationError, Validator};
use serde_json::json;

fn named(kind: &str, name: &str) -> serde_json::Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn non_null(inner: serde_json::Value) -> serde_json::Value {
    json!({ "kind": "NON_NULL", "name": null, "ofType": inner })
}

fn list(inner: serde_json::Value) -> serde_json::Value {
    json!({ "kind": "LIST", "name": null, "ofType": inner })
}

fn field(name: &str, ty: serde_json::Value, args: serde_json::Value) -> serde_json::Value {
    json!({
        "name": name,
        "description": null,
        "args": args,
        "type": ty,
        "isDeprecated": false,
        "deprecationReason": null
    })
}

fn arg(name: &str, ty: serde_json::Value) -> serde_json::Value {
    json!({ "name": name, "description": null, "type": ty, "defaultValue": null })
}

fn schema() -> Schema {
    let users = non_null(list(non_null(named("OBJECT", "User"))));
    let introspection = json!({
        "data": {
            "__schema": {
                "queryType": { "name": "Query" },
                "mutationType": null,
                "subscriptionType": null,
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "fields": [
                            field("user", named("OBJECT", "User"), json!([arg("id", non_null(named("SCALAR", "ID")))])),
                            field("users", users.clone(), json!([arg("limit", named("SCALAR", "Int"))])),
                            field("usersByRole", users, json!([arg("role", non_null(named("ENUM", "Role")))]))
                        ],
                        "interfaces": []
                    },
                    {
                        "kind": "OBJECT",
                        "name": "User",
                        "fields": [
                            field("id", non_null(named("SCALAR", "ID")), json!([])),
                            field("name", named("SCALAR", "String"), json!([])),
                            field("role", named("ENUM", "Role"), json!([]))
                        ],
                        "interfaces": []
                    },
                    {
                        "kind": "ENUM",
                        "name": "Role",
                        "enumValues": [
                            { "name": "ADMIN", "isDeprecated": false, "deprecationReason": null },
                            { "name": "VIEWER", "isDeprecated": false, "deprecationReason": null }
                        ]
                    },
                    { "kind": "SCALAR", "name": "ID" },
                    { "kind": "SCALAR", "name": "String" },
                    { "kind": "SCALAR", "name": "Int" },
                    { "kind": "OBJECT", "name": "__Directive", "fields": [] }
                ]
            }
        }
    });
    Schema::from_introspection_value(introspection).unwrap()
}

fn load(validator: &Validator) -> LoadedSchema<<ApolloEngine as gqlterm_semantic::GraphQLEngine>::Schema> {
    validator
        .load_schema(Some(&schema()))
        .expect("projected schema should load")
}

const USER_QUERY: &str = "query($id: ID!) { user(id: $id) { name } }";

#[test]
fn test_valid_query() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    assert_eq!(validator.validate_query(USER_QUERY, Some(&loaded)), Ok(()));
}

#[test]
fn test_unknown_field_is_one_line() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    let err = validator
        .validate_query("{ nope }", Some(&loaded))
        .unwrap_err();
    let ValidationError::Query(message) = &err else {
        panic!("expected a query error, got {err:?}");
    };
    assert!(message.contains("nope"), "{message}");
    assert!(!message.contains('\n'));
}

#[test]
fn test_missing_required_argument() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    assert!(validator
        .validate_query("{ user { name } }", Some(&loaded))
        .is_err());
}

#[test]
fn test_syntax_only_without_schema() {
    let validator: Validator = Validator::default();
    assert_eq!(validator.validate_query("{ anything }", None), Ok(()));
    let err = validator.validate_query("{ user ", None).unwrap_err();
    assert!(matches!(err, ValidationError::Syntax(_)));
    let message = err.to_string();
    assert!(message.starts_with("syntax error: "), "{message}");
    assert_eq!(message.matches("syntax error").count(), 1, "{message}");
}

#[test]
fn test_missing_required_variable() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    let err = validator
        .validate_variables("{}", USER_QUERY, Some(&loaded))
        .unwrap_err();
    assert!(err.to_string().contains("$id"));
}

#[test]
fn test_unknown_variable() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    let err = validator
        .validate_variables(r#"{"id": "1", "extra": true}"#, USER_QUERY, Some(&loaded))
        .unwrap_err();
    assert!(err.to_string().contains("$extra"));
}

#[test]
fn test_int_rejects_fractions() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    let query = "query($limit: Int) { users(limit: $limit) { id } }";
    assert!(validator
        .validate_variables(r#"{"limit": 5.5}"#, query, Some(&loaded))
        .is_err());
    assert_eq!(
        validator.validate_variables(r#"{"limit": 5}"#, query, Some(&loaded)),
        Ok(())
    );
}

#[test]
fn test_enum_values() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    let query = "query($role: Role!) { usersByRole(role: $role) { id } }";
    assert_eq!(
        validator.validate_variables(r#"{"role": "ADMIN"}"#, query, Some(&loaded)),
        Ok(())
    );
    assert!(validator
        .validate_variables(r#"{"role": "INVALID"}"#, query, Some(&loaded))
        .is_err());
}

#[test]
fn test_invalid_query_skips_variable_check() {
    let validator: Validator = Validator::default();
    let loaded = load(&validator);
    assert_eq!(
        validator.validate_variables(r#"{"whatever": 1}"#, "{ nope }", Some(&loaded)),
        Ok(())
    );
}

#[test]
fn test_rejected_schema_loads_as_none() {
    let broken = Schema::new(vec![gqlterm_semantic::FullType::object(
        "Query",
        vec![gqlterm_semantic::Field::new(
            "a",
            gqlterm_semantic::TypeRef::named("Missing"),
        )],
    )])
    .with_query_type("Query");
    assert!(Validator::<ApolloEngine>::default().load_schema(Some(&broken)).is_none());
}

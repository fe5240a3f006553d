//! Integration tests for operation generation.

use gqlterm_codegen::QueryGenerator;
use gqlterm_semantic::{Field, FullType, InputValue, OperationKind, Schema, TypeRef, Validator};
use insta::assert_snapshot;

fn id() -> Field {
    Field::new("id", TypeRef::non_null(TypeRef::named("ID")))
}

fn schema() -> Schema {
    Schema::new(vec![
        FullType::object(
            "Query",
            vec![
                Field::new("a", TypeRef::named("A")),
                Field::new(
                    "search",
                    TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("SearchResult")))),
                )
                .with_args(vec![InputValue::new("term", TypeRef::non_null(TypeRef::named("String")))]),
            ],
        ),
        FullType::object(
            "Mutation",
            vec![Field::new("createUser", TypeRef::named("User"))
                .with_args(vec![InputValue::new("input", TypeRef::non_null(TypeRef::named("NewUser")))])],
        ),
        FullType::object("A", vec![id(), Field::new("b", TypeRef::named("B"))]),
        FullType::object("B", vec![id(), Field::new("c", TypeRef::named("C"))]),
        FullType::object("C", vec![id(), Field::new("a", TypeRef::named("A"))]),
        FullType::object(
            "User",
            vec![
                id(),
                Field::new("name", TypeRef::named("String")),
                Field::new("role", TypeRef::named("Role")),
            ],
        ),
        FullType::object("Post", vec![Field::new("title", TypeRef::named("String"))]),
        FullType::union("SearchResult", &["User", "Post"]),
        FullType::enumeration("Role", &["ADMIN", "VIEWER"]),
        FullType::input_object(
            "NewUser",
            vec![
                InputValue::new("name", TypeRef::non_null(TypeRef::named("String"))),
                InputValue::new("role", TypeRef::named("Role")),
            ],
        ),
    ])
    .with_query_type("Query")
    .with_mutation_type("Mutation")
}

/// Type `A` reaches `B`, `B` reaches `C` and `C` reaches `A` again.
#[test]
fn test_three_type_cycle_terminates() {
    let schema = schema();
    let op = QueryGenerator::new(&schema)
        .generate_root_field(OperationKind::Query, "a")
        .unwrap();
    assert_snapshot!(op.query, @r"
    query A {
      a {
        id
        b {
          id
          c {
            id
          }
        }
      }
    }
    ");
    assert_eq!(op.query.matches("id").count(), 3);
}

#[test]
fn test_union_selection() {
    let schema = schema();
    let op = QueryGenerator::new(&schema)
        .generate_root_field(OperationKind::Query, "search")
        .unwrap();
    assert_snapshot!(op.query, @r"
    query Search($term: String!) {
      search(term: $term) {
        __typename
        ... on User {
          id
          name
          role
        }
        ... on Post {
          title
        }
      }
    }
    ");
    assert_eq!(op.variables_json(), "{\n  \"term\": \"example\"\n}");
}

#[test]
fn test_generated_mutation_validates() {
    let schema = schema();
    let op = QueryGenerator::new(&schema)
        .generate_root_field(OperationKind::Mutation, "createUser")
        .unwrap();
    assert_eq!(
        op.variables_json(),
        "{\n  \"input\": {\n    \"name\": \"example\",\n    \"role\": \"ADMIN\"\n  }\n}"
    );

    let validator: Validator = Validator::default();
    let loaded = validator.load_schema(Some(&schema)).unwrap();
    assert_eq!(validator.validate_query(&op.query, Some(&loaded)), Ok(()));
    assert_eq!(
        validator.validate_variables(&op.variables_json(), &op.query, Some(&loaded)),
        Ok(())
    );
}

#[test]
fn test_generated_operations_are_formatted() {
    let schema = schema();
    let generator = QueryGenerator::new(&schema);
    for (kind, field) in [
        (OperationKind::Query, "a"),
        (OperationKind::Query, "search"),
        (OperationKind::Mutation, "createUser"),
    ] {
        let op = generator.generate_root_field(kind, field).unwrap();
        assert_eq!(gqlterm_syntax::format(&op.query), op.query);
    }
}

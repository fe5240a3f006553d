//! Query and variables validation.
//!
//! Semantic validation of the query itself is delegated to a
//! [`GraphQLEngine`]. Variables are type-checked here against the variable
//! definitions the engine reports and the introspected [`Schema`].

use crate::engine::{ApolloEngine, GraphQLEngine, ParsedOperation};
use crate::sdl::to_definition_language;
use crate::types::{FullType, Schema, TypeKind, TypeRef};
use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

/// A rejected query or variables document.
///
/// Only the first problem found is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("syntax error: {0}")]
    #[diagnostic(code(gqlterm::validate::syntax))]
    Syntax(String),

    #[error("{0}")]
    #[diagnostic(code(gqlterm::validate::query))]
    Query(String),

    #[error("invalid JSON in variables")]
    #[diagnostic(code(gqlterm::validate::invalid_json))]
    InvalidJson,

    #[error("variables must be a JSON object")]
    #[diagnostic(code(gqlterm::validate::not_an_object))]
    NotAnObject,

    #[error("missing required variable ${name} of type {ty}")]
    #[diagnostic(code(gqlterm::validate::missing_variable))]
    MissingVariable { name: String, ty: String },

    #[error("unknown variable ${name}")]
    #[diagnostic(
        code(gqlterm::validate::unknown_variable),
        help("declare it in the operation or remove it from the variables")
    )]
    UnknownVariable { name: String },

    #[error("{path}: missing required field of type {ty}")]
    #[diagnostic(code(gqlterm::validate::missing_field))]
    MissingField { path: String, ty: String },

    #[error("{path}: unknown field on input type {type_name}")]
    #[diagnostic(code(gqlterm::validate::unknown_field))]
    UnknownField { path: String, type_name: String },

    #[error("{path}: {message}")]
    #[diagnostic(code(gqlterm::validate::invalid_value))]
    InvalidValue { path: String, message: String },
}

/// A schema the engine accepted, paired with the type model it came from.
#[derive(Debug, Clone)]
pub struct LoadedSchema<S> {
    document: S,
    types: Schema,
}

impl<S> LoadedSchema<S> {
    /// The engine's representation.
    pub fn document(&self) -> &S {
        &self.document
    }

    /// The type model the document was projected from.
    pub fn types(&self) -> &Schema {
        &self.types
    }
}

/// Validates queries and their variables.
#[derive(Debug, Clone, Default)]
pub struct Validator<E = ApolloEngine> {
    engine: E,
}

impl<E: GraphQLEngine> Validator<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Projects `schema` to SDL and loads it into the engine.
    ///
    /// Returns `None` when there is no schema or the engine rejects the
    /// projection.
    pub fn load_schema(&self, schema: Option<&Schema>) -> Option<LoadedSchema<E::Schema>> {
        let schema = schema?;
        let sdl = to_definition_language(schema);
        match self.engine.load_schema(&sdl) {
            Ok(document) => Some(LoadedSchema {
                document,
                types: schema.clone(),
            }),
            Err(err) => {
                warn!(error = %simplify_message(&err.message), "schema rejected by engine");
                None
            }
        }
    }

    /// Validates `query`. Without a schema only syntax is checked.
    pub fn validate_query(
        &self,
        query: &str,
        schema: Option<&LoadedSchema<E::Schema>>,
    ) -> Result<(), ValidationError> {
        if query.trim().is_empty() {
            return Ok(());
        }
        match schema {
            None => self
                .engine
                .parse_syntax(query)
                .map_err(|err| {
                    let message = simplify_message(&err.message);
                    let message = message.strip_prefix("syntax error: ").unwrap_or(&message);
                    ValidationError::Syntax(message.to_string())
                }),
            Some(schema) => self
                .engine
                .parse_query(&schema.document, query)
                .map(|_| ())
                .map_err(|err| ValidationError::Query(simplify_message(&err.message))),
        }
    }

    /// Type-checks a JSON variables document against the first operation of
    /// `query`.
    ///
    /// If `query` itself does not validate, the variables are accepted: an
    /// invalid query has no variable contract to check.
    pub fn validate_variables(
        &self,
        variables: &str,
        query: &str,
        schema: Option<&LoadedSchema<E::Schema>>,
    ) -> Result<(), ValidationError> {
        if variables.trim().is_empty() {
            return Ok(());
        }
        let value: Value = serde_json::from_str(variables).map_err(|_| ValidationError::InvalidJson)?;
        let Some(schema) = schema else {
            return Ok(());
        };
        let operations = match self.engine.parse_query(&schema.document, query) {
            Ok(operations) => operations,
            Err(err) => {
                debug!(error = %simplify_message(&err.message), "skipping variables check for invalid query");
                return Ok(());
            }
        };
        let Some(operation) = operations.first() else {
            return Ok(());
        };
        let Value::Object(provided) = value else {
            return Err(ValidationError::NotAnObject);
        };

        ValueChecker::new(&schema.types).check_operation(operation, &provided)
    }
}

/// Reduces a multi-line engine report to one readable line.
///
/// Keeps the first non-blank line and strips a leading `tag: ` such as
/// `Error: ` or `query.graphql:1:9: `, then a purely numeric one.
#[must_use]
pub fn simplify_message(message: &str) -> String {
    let line = message
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default();
    let line = strip_tag(line, |tag| !tag.contains(char::is_whitespace));
    let line = strip_tag(line, |tag| tag.chars().all(|c| c.is_ascii_digit()));
    line.to_string()
}

fn strip_tag(line: &str, is_tag: impl Fn(&str) -> bool) -> &str {
    match line.split_once(": ") {
        Some((tag, rest)) if !tag.is_empty() && is_tag(tag) && !rest.trim().is_empty() => rest,
        _ => line,
    }
}

/// Recursive JSON-against-`TypeRef` checker.
struct ValueChecker<'a> {
    schema: &'a Schema,
}

impl<'a> ValueChecker<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    fn check_operation(
        &self,
        operation: &ParsedOperation,
        provided: &Map<String, Value>,
    ) -> Result<(), ValidationError> {
        for var in &operation.variables {
            if var.is_required() && !provided.contains_key(&var.name) {
                return Err(ValidationError::MissingVariable {
                    name: var.name.clone(),
                    ty: var.ty.display_name(),
                });
            }
        }

        for key in provided.keys() {
            if !operation.variables.iter().any(|var| &var.name == key) {
                return Err(ValidationError::UnknownVariable { name: key.clone() });
            }
        }

        for var in &operation.variables {
            if let Some(value) = provided.get(&var.name) {
                self.check_value(value, &var.ty, &format!("${}", var.name))?;
            }
        }
        Ok(())
    }

    fn check_value(&self, value: &Value, ty: &TypeRef, path: &str) -> Result<(), ValidationError> {
        match ty {
            TypeRef::NonNull(inner) => {
                if value.is_null() {
                    return Err(invalid(path, format!("expected non-null {ty}, got null")));
                }
                self.check_value(value, inner, path)
            }
            _ if value.is_null() => Ok(()),
            TypeRef::List(inner) => {
                let Some(items) = value.as_array() else {
                    return Err(invalid(path, format!("expected a list for {ty}, got {value}")));
                };
                for (i, item) in items.iter().enumerate() {
                    self.check_value(item, inner, &format!("{path}[{i}]"))?;
                }
                Ok(())
            }
            TypeRef::Named(None) => Ok(()),
            TypeRef::Named(Some(name)) => self.check_named(value, name, path),
        }
    }

    fn check_named(&self, value: &Value, name: &str, path: &str) -> Result<(), ValidationError> {
        let matches = match name {
            "String" | "ID" => value.is_string(),
            "Int" => is_integral(value),
            "Float" => value.is_number(),
            "Boolean" => value.is_boolean(),
            _ => return self.check_schema_type(value, name, path),
        };
        if matches {
            Ok(())
        } else {
            Err(mismatch(path, name, value))
        }
    }

    fn check_schema_type(&self, value: &Value, name: &str, path: &str) -> Result<(), ValidationError> {
        // Custom scalars accept anything, unknown names are not checked.
        let Some(ty) = self.schema.type_by_name(name) else {
            return Ok(());
        };
        match ty.kind {
            TypeKind::Enum => match value.as_str() {
                Some(s) if ty.enum_values.iter().any(|v| v.name == s) => Ok(()),
                Some(s) => Err(invalid(path, format!("\"{s}\" is not a value of enum {name}"))),
                None => Err(mismatch(path, name, value)),
            },
            TypeKind::InputObject => match value.as_object() {
                Some(fields) => self.check_input_object(ty, fields, path),
                None => Err(mismatch(path, name, value)),
            },
            _ => Ok(()),
        }
    }

    fn check_input_object(
        &self,
        ty: &FullType,
        provided: &Map<String, Value>,
        path: &str,
    ) -> Result<(), ValidationError> {
        for field in &ty.input_fields {
            if field.is_required() && !provided.contains_key(&field.name) {
                return Err(ValidationError::MissingField {
                    path: format!("{path}.{}", field.name),
                    ty: field.ty.display_name(),
                });
            }
        }

        for key in provided.keys() {
            if ty.input_field(key).is_none() {
                return Err(ValidationError::UnknownField {
                    path: format!("{path}.{key}"),
                    type_name: ty.name.clone(),
                });
            }
        }

        for field in &ty.input_fields {
            if let Some(value) = provided.get(&field.name) {
                self.check_value(value, &field.ty, &format!("{path}.{}", field.name))?;
            }
        }
        Ok(())
    }
}

fn is_integral(value: &Value) -> bool {
    if value.is_i64() || value.is_u64() {
        return true;
    }
    value
        .as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}

fn invalid(path: &str, message: String) -> ValidationError {
    ValidationError::InvalidValue {
        path: path.to_string(),
        message,
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> ValidationError {
    invalid(path, format!("expected {expected}, got {value}"))
}

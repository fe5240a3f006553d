//! The GraphQL parsing and validation backend used by the [`Validator`].
//!
//! Semantic validation of documents is delegated to an engine behind the
//! [`GraphQLEngine`] trait. [`ApolloEngine`] is the production backend built
//! on `apollo-compiler`; tests can substitute a minimal implementation.
//!
//! [`Validator`]: crate::checker::Validator

use crate::types::TypeRef;
use apollo_compiler::validation::Valid;
use apollo_compiler::{ast, executable, ExecutableDocument};
use miette::Diagnostic;
use thiserror::Error;

const SCHEMA_PATH: &str = "schema.graphql";
const QUERY_PATH: &str = "query.graphql";

/// A document rejected by the engine.
///
/// `message` is the engine's full report and may span several lines.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(gqlterm::engine::rejected))]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A variable declared by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub has_default: bool,
}

impl VariableDefinition {
    /// Non-null with no default: must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && !self.has_default
    }
}

/// An operation parsed from a query document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedOperation {
    pub name: Option<String>,
    /// Variables in declaration order.
    pub variables: Vec<VariableDefinition>,
}

/// A GraphQL parser and validator.
pub trait GraphQLEngine {
    /// The engine's loaded schema representation.
    type Schema;

    /// Loads a schema from SDL text.
    fn load_schema(&self, sdl: &str) -> Result<Self::Schema, EngineError>;

    /// Parses and validates `query` against `schema`, returning its
    /// operations in document order.
    fn parse_query(&self, schema: &Self::Schema, query: &str) -> Result<Vec<ParsedOperation>, EngineError>;

    /// Parses `query` without a schema, checking syntax only.
    fn parse_syntax(&self, query: &str) -> Result<(), EngineError>;
}

/// Engine backed by `apollo-compiler`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApolloEngine;

impl GraphQLEngine for ApolloEngine {
    type Schema = Valid<apollo_compiler::Schema>;

    fn load_schema(&self, sdl: &str) -> Result<Self::Schema, EngineError> {
        apollo_compiler::Schema::parse_and_validate(sdl, SCHEMA_PATH)
            .map_err(|err| first_error(&err.errors, &err))
    }

    fn parse_query(&self, schema: &Self::Schema, query: &str) -> Result<Vec<ParsedOperation>, EngineError> {
        let document = ExecutableDocument::parse_and_validate(schema, query, QUERY_PATH)
            .map_err(|err| first_error(&err.errors, &err))?;
        Ok(document.operations.iter().map(|op| parsed_operation(op)).collect())
    }

    fn parse_syntax(&self, query: &str) -> Result<(), EngineError> {
        ast::Document::parse(query, QUERY_PATH)
            .map(|_| ())
            .map_err(|err| first_error(&err.errors, &err))
    }
}

fn first_error(
    errors: &apollo_compiler::validation::DiagnosticList,
    report: &dyn std::fmt::Display,
) -> EngineError {
    let message = errors
        .iter()
        .next()
        .map_or_else(|| report.to_string(), |diagnostic| diagnostic.to_string());
    EngineError::new(message)
}

fn parsed_operation(operation: &executable::Operation) -> ParsedOperation {
    ParsedOperation {
        name: operation.name.as_ref().map(ToString::to_string),
        variables: operation
            .variables
            .iter()
            .map(|var| VariableDefinition {
                name: var.name.to_string(),
                ty: type_ref(&var.ty),
                has_default: var.default_value.is_some(),
            })
            .collect(),
    }
}

fn type_ref(ty: &ast::Type) -> TypeRef {
    match ty {
        ast::Type::Named(name) => TypeRef::named(name.as_str()),
        ast::Type::NonNullNamed(name) => TypeRef::non_null(TypeRef::named(name.as_str())),
        ast::Type::List(inner) => TypeRef::list(type_ref(inner)),
        ast::Type::NonNullList(inner) => TypeRef::non_null(TypeRef::list(type_ref(inner))),
    }
}

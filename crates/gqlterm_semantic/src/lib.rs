//! Semantic layer for gqlterm.
//!
//! This crate provides:
//! - `types`: The schema type model
//! - `introspection`: Decoding introspection JSON into a `Schema`
//! - `sdl`: Projecting a `Schema` back to schema definition language
//! - `engine`: The pluggable GraphQL parsing/validation backend
//! - `checker`: Query and variables validation

pub mod checker;
pub mod engine;
pub mod introspection;
pub mod sdl;
pub mod types;

pub use checker::{simplify_message, LoadedSchema, ValidationError, Validator};
pub use engine::{ApolloEngine, EngineError, GraphQLEngine, ParsedOperation, VariableDefinition};
pub use introspection::IntrospectionError;
pub use sdl::to_definition_language;
pub use types::{
    is_builtin_scalar, EnumValue, Field, FullType, InputValue, OperationKind, Schema, TypeKind,
    TypeRef, BUILTIN_SCALARS,
};

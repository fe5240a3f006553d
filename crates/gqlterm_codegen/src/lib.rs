//! Operation generation for gqlterm.
//!
//! Given a root field of an introspected schema, [`QueryGenerator`] builds a
//! complete, formatted operation that calls the field with one variable per
//! argument and selects every reachable leaf field, together with an example
//! variables object.
//!
//! # Example
//!
//! ```ignore
//! use gqlterm_codegen::QueryGenerator;
//! use gqlterm_semantic::OperationKind;
//!
//! let generator = QueryGenerator::new(&schema);
//! let op = generator.generate_root_field(OperationKind::Query, "user").unwrap();
//! println!("{}\n{}", op.query, op.variables_json());
//! ```

mod selection;
mod variables;

use gqlterm_semantic::{Field, OperationKind, Schema};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::selection::SelectionExpander;
use crate::variables::example_value;

/// Generation options.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Deepest nesting level expanded; the root field's type is level 1.
    pub max_depth: usize,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { max_depth: 5 }
    }
}

/// A generated operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedOperation {
    /// Formatted operation text.
    pub query: String,
    /// Example variables in argument order, if the field takes arguments.
    pub variables: Option<IndexMap<String, Value>>,
}

impl GeneratedOperation {
    /// The variables as 2-space indented JSON, or `""` when there are none.
    #[must_use]
    pub fn variables_json(&self) -> String {
        match &self.variables {
            Some(vars) if !vars.is_empty() => serde_json::to_string_pretty(vars).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

/// Builds operations for fields of a schema.
///
/// Holds no state between calls.
pub struct QueryGenerator<'a> {
    schema: &'a Schema,
    options: GenerateOptions,
}

impl<'a> QueryGenerator<'a> {
    /// Creates a generator with default options.
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_options(schema, GenerateOptions::default())
    }

    /// Creates a generator with options.
    pub fn with_options(schema: &'a Schema, options: GenerateOptions) -> Self {
        Self { schema, options }
    }

    /// Looks up `field_name` on the root type for `kind` and generates an
    /// operation for it.
    pub fn generate_root_field(&self, kind: OperationKind, field_name: &str) -> Option<GeneratedOperation> {
        let root = self.schema.root_type(kind)?;
        let field = root.field(field_name)?;
        Some(self.generate(kind, &root.name, field))
    }

    /// Generates an operation of `kind` calling `field` of `root_type_name`.
    pub fn generate(&self, kind: OperationKind, root_type_name: &str, field: &Field) -> GeneratedOperation {
        debug!(%kind, root = root_type_name, field = %field.name, "generating operation");

        let mut text = String::new();
        text.push_str(kind.as_str());
        text.push(' ');
        text.push_str(&operation_name(&field.name));

        if !field.args.is_empty() {
            let declarations: Vec<_> = field
                .args
                .iter()
                .map(|arg| format!("${}: {}", arg.name, arg.ty.display_name()))
                .collect();
            text.push('(');
            text.push_str(&declarations.join(", "));
            text.push(')');
        }

        text.push_str(" { ");
        text.push_str(&field.name);
        if !field.args.is_empty() {
            let arguments: Vec<_> = field
                .args
                .iter()
                .map(|arg| format!("{0}: ${0}", arg.name))
                .collect();
            text.push('(');
            text.push_str(&arguments.join(", "));
            text.push(')');
        }

        let selections = SelectionExpander::new(self.schema, self.options.max_depth).expand(&field.ty, 1);
        if !selections.is_empty() {
            text.push_str(" { ");
            text.push_str(&selections);
            text.push_str(" }");
        }
        text.push_str(" }");

        let variables = (!field.args.is_empty()).then(|| {
            field
                .args
                .iter()
                .map(|arg| (arg.name.clone(), example_value(self.schema, &arg.ty)))
                .collect()
        });

        GeneratedOperation {
            query: gqlterm_syntax::format(&text),
            variables,
        }
    }
}

/// The field name with its first character upper-cased.
fn operation_name(field_name: &str) -> String {
    let mut chars = field_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

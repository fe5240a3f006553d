//! In-memory model of an introspected GraphQL schema.
//!
//! Types refer to each other by name only. Traversals resolve names through
//! [`Schema::type_by_name`] and carry their own visited sets, so recursive and
//! mutually-recursive schemas need no special representation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The built-in scalar types every schema has.
pub const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

/// Returns true if `name` is one of the five built-in scalars.
#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// The kind of a type, as reported by introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }

    /// Leaf kinds terminate a selection set.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three root operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [Self; 3] = [Self::Query, Self::Mutation, Self::Subscription];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "query" => Ok(Self::Query),
            "mutation" => Ok(Self::Mutation),
            "subscription" => Ok(Self::Subscription),
            other => Err(format!("unknown operation kind `{other}`")),
        }
    }
}

/// A possibly-wrapped reference to a named type.
///
/// Wrapper chains are finite by construction, so unwrapping always ends at a
/// `Named` reference. A `Named(None)` is a reference introspection never
/// resolved; consumers degrade gracefully instead of failing on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    NonNull(Box<TypeRef>),
    List(Box<TypeRef>),
    Named(Option<String>),
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(Some(name.into()))
    }

    #[must_use]
    pub const fn unresolved() -> Self {
        Self::Named(None)
    }

    #[must_use]
    pub fn non_null(inner: TypeRef) -> Self {
        Self::NonNull(Box::new(inner))
    }

    #[must_use]
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// Renders the reference in GraphQL type syntax, e.g. `[Post!]!`.
    ///
    /// Unresolved references render as `Unknown`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.to_string()
    }

    /// The innermost type name, or `""` if it was never resolved.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::NonNull(inner) | Self::List(inner) => inner.named_type(),
            Self::Named(name) => name.as_deref().unwrap_or_default(),
        }
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNull(inner) => write!(f, "{inner}!"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::Named(Some(name)) => f.write_str(name),
            Self::Named(None) => f.write_str("Unknown"),
        }
    }
}

/// An argument or input-object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
    /// Default value as GraphQL literal text, e.g. `10` or `"abc"`.
    pub default_value: Option<String>,
}

impl InputValue {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            ty,
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Non-null with no default: must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.ty.is_non_null() && self.default_value.is_none()
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<InputValue>,
    pub ty: TypeRef,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            args: Vec::new(),
            ty,
            is_deprecated: false,
            deprecation_reason: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<InputValue>) -> Self {
        self.args = args;
        self
    }

    #[must_use]
    pub fn deprecated(mut self, reason: Option<&str>) -> Self {
        self.is_deprecated = true;
        self.deprecation_reason = reason.map(str::to_string);
        self
    }
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

impl EnumValue {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_deprecated: false,
            deprecation_reason: None,
        }
    }
}

/// One named type of the schema.
///
/// Only the children appropriate to `kind` are populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    pub description: Option<String>,
    /// OBJECT and INTERFACE.
    pub fields: Vec<Field>,
    /// INPUT_OBJECT.
    pub input_fields: Vec<InputValue>,
    /// ENUM.
    pub enum_values: Vec<EnumValue>,
    /// UNION members.
    pub possible_types: Vec<TypeRef>,
    /// Interfaces an OBJECT implements.
    pub interfaces: Vec<TypeRef>,
}

impl FullType {
    #[must_use]
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            enum_values: Vec::new(),
            possible_types: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    #[must_use]
    pub fn object(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::new(TypeKind::Object, name)
        }
    }

    #[must_use]
    pub fn interface(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::new(TypeKind::Interface, name)
        }
    }

    #[must_use]
    pub fn input_object(name: impl Into<String>, input_fields: Vec<InputValue>) -> Self {
        Self {
            input_fields,
            ..Self::new(TypeKind::InputObject, name)
        }
    }

    #[must_use]
    pub fn enumeration(name: impl Into<String>, values: &[&str]) -> Self {
        Self {
            enum_values: values.iter().map(|v| EnumValue::new(*v)).collect(),
            ..Self::new(TypeKind::Enum, name)
        }
    }

    #[must_use]
    pub fn union(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            possible_types: members.iter().map(|m| TypeRef::named(*m)).collect(),
            ..Self::new(TypeKind::Union, name)
        }
    }

    #[must_use]
    pub fn scalar(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Scalar, name)
    }

    #[must_use]
    pub fn implementing(mut self, interfaces: &[&str]) -> Self {
        self.interfaces = interfaces.iter().map(|i| TypeRef::named(*i)).collect();
        self
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up an input field by name.
    #[must_use]
    pub fn input_field(&self, name: &str) -> Option<&InputValue> {
        self.input_fields.iter().find(|f| f.name == name)
    }
}

/// An introspected schema. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    query_type: Option<TypeRef>,
    mutation_type: Option<TypeRef>,
    subscription_type: Option<TypeRef>,
    types: Vec<FullType>,
    index: FxHashMap<String, usize>,
}

impl Schema {
    /// Builds a schema from its types.
    ///
    /// If two types share a name, lookups resolve to the first one.
    #[must_use]
    pub fn new(types: Vec<FullType>) -> Self {
        let mut index = FxHashMap::default();
        for (i, ty) in types.iter().enumerate() {
            index.entry(ty.name.clone()).or_insert(i);
        }
        Self {
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            types,
            index,
        }
    }

    /// Sets the root type reference for an operation kind.
    #[must_use]
    pub fn with_root(mut self, kind: OperationKind, root: TypeRef) -> Self {
        match kind {
            OperationKind::Query => self.query_type = Some(root),
            OperationKind::Mutation => self.mutation_type = Some(root),
            OperationKind::Subscription => self.subscription_type = Some(root),
        }
        self
    }

    #[must_use]
    pub fn with_query_type(self, name: &str) -> Self {
        self.with_root(OperationKind::Query, TypeRef::named(name))
    }

    #[must_use]
    pub fn with_mutation_type(self, name: &str) -> Self {
        self.with_root(OperationKind::Mutation, TypeRef::named(name))
    }

    #[must_use]
    pub fn with_subscription_type(self, name: &str) -> Self {
        self.with_root(OperationKind::Subscription, TypeRef::named(name))
    }

    /// All types, in introspection order.
    #[must_use]
    pub fn types(&self) -> &[FullType] {
        &self.types
    }

    /// Exact-match lookup by type name.
    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<&FullType> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    /// The declared root reference for an operation kind, if any.
    #[must_use]
    pub fn root_type_ref(&self, kind: OperationKind) -> Option<&TypeRef> {
        match kind {
            OperationKind::Query => self.query_type.as_ref(),
            OperationKind::Mutation => self.mutation_type.as_ref(),
            OperationKind::Subscription => self.subscription_type.as_ref(),
        }
    }

    /// Resolves the root type for an operation kind.
    #[must_use]
    pub fn root_type(&self, kind: OperationKind) -> Option<&FullType> {
        self.root_type_ref(kind)
            .and_then(|root| self.type_by_name(root.named_type()))
    }

    /// The query, mutation and subscription root types, in that order,
    /// skipping any that are absent or unresolved.
    #[must_use]
    pub fn root_types(&self) -> Vec<&FullType> {
        OperationKind::ALL
            .iter()
            .filter_map(|&kind| self.root_type(kind))
            .collect()
    }

    /// Returns true if `ty` unwraps to a SCALAR or ENUM.
    ///
    /// Built-in scalars count as leaves even when the schema does not list
    /// them.
    #[must_use]
    pub fn is_leaf(&self, ty: &TypeRef) -> bool {
        let name = ty.named_type();
        match self.type_by_name(name) {
            Some(full) => full.kind.is_leaf(),
            None => is_builtin_scalar(name),
        }
    }
}

//! Selection-set expansion.
//!
//! Expansion walks the return type of a field, selecting every leaf field and
//! recursing into object, interface and union types. Recursion stops at
//! `max_depth` and at any type already being expanded higher up the current
//! branch. A type is released when its expansion returns, so it may appear
//! again in a sibling branch.

use gqlterm_semantic::{FullType, Schema, TypeKind, TypeRef};
use rustc_hash::FxHashSet;

pub(crate) struct SelectionExpander<'a> {
    schema: &'a Schema,
    max_depth: usize,
    in_progress: FxHashSet<&'a str>,
}

impl<'a> SelectionExpander<'a> {
    pub(crate) fn new(schema: &'a Schema, max_depth: usize) -> Self {
        Self {
            schema,
            max_depth,
            in_progress: FxHashSet::default(),
        }
    }

    /// Expands `ty` at `depth` (the root field's type is depth 1).
    ///
    /// Returns the space-separated selections, or an empty string when the
    /// type is a leaf, unresolvable, too deep or already on the branch.
    pub(crate) fn expand(&mut self, ty: &TypeRef, depth: usize) -> String {
        if depth > self.max_depth {
            return String::new();
        }
        let Some(full) = self.schema.type_by_name(ty.named_type()) else {
            return String::new();
        };
        if full.kind.is_leaf() || !self.in_progress.insert(full.name.as_str()) {
            return String::new();
        }

        let selections = match full.kind {
            TypeKind::Object | TypeKind::Interface => self.expand_fields(full, depth),
            TypeKind::Union => self.expand_union(full, depth),
            _ => Vec::new(),
        };

        self.in_progress.remove(full.name.as_str());
        selections.join(" ")
    }

    fn expand_fields(&mut self, full: &'a FullType, depth: usize) -> Vec<String> {
        let mut selections = Vec::with_capacity(full.fields.len());
        for field in &full.fields {
            let nested = self.expand(&field.ty, depth + 1);
            if !nested.is_empty() {
                selections.push(format!("{} {{ {nested} }}", field.name));
            } else if self.schema.is_leaf(&field.ty) {
                selections.push(field.name.clone());
            }
        }
        selections
    }

    fn expand_union(&mut self, full: &'a FullType, depth: usize) -> Vec<String> {
        let mut selections = vec!["__typename".to_string()];
        for member in &full.possible_types {
            let nested = self.expand(member, depth + 1);
            if !nested.is_empty() {
                selections.push(format!("... on {} {{ {nested} }}", member.named_type()));
            }
        }
        selections
    }
}

//! Projection of a [`Schema`] back to schema definition language.
//!
//! Only the shape of the schema is projected. Descriptions, deprecation
//! metadata and directives are dropped.

use crate::types::{is_builtin_scalar, Field, FullType, InputValue, OperationKind, Schema, TypeKind, TypeRef};

/// Renders `schema` as SDL text.
#[must_use]
pub fn to_definition_language(schema: &Schema) -> String {
    SdlPrinter::new(schema).print()
}

struct SdlPrinter<'a> {
    schema: &'a Schema,
    output: String,
}

impl<'a> SdlPrinter<'a> {
    fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            output: String::new(),
        }
    }

    fn print(mut self) -> String {
        self.print_schema_block();

        for ty in self.schema.types() {
            if !is_projected(ty) {
                continue;
            }
            if !self.output.is_empty() {
                self.output.push_str("\n\n");
            }
            match ty.kind {
                TypeKind::Object => self.print_object(ty),
                TypeKind::Interface => self.print_interface(ty),
                TypeKind::InputObject => self.print_input(ty),
                TypeKind::Enum => self.print_enum(ty),
                TypeKind::Union => self.print_union(ty),
                TypeKind::Scalar => self.print_scalar(ty),
                TypeKind::List | TypeKind::NonNull => {}
            }
        }

        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.output
    }

    fn print_schema_block(&mut self) {
        let roots: Vec<_> = OperationKind::ALL
            .iter()
            .filter_map(|&kind| {
                let root = self.schema.root_type_ref(kind)?;
                let name = root.named_type();
                (!name.is_empty()).then_some((kind, name))
            })
            .collect();
        if roots.is_empty() {
            return;
        }

        self.output.push_str("schema {\n");
        for (kind, name) in roots {
            self.output.push_str("  ");
            self.output.push_str(kind.as_str());
            self.output.push_str(": ");
            self.output.push_str(name);
            self.output.push('\n');
        }
        self.output.push('}');
    }

    fn print_object(&mut self, ty: &FullType) {
        self.output.push_str("type ");
        self.output.push_str(&ty.name);
        self.print_implements(&ty.interfaces);
        self.print_fields(&ty.fields);
    }

    fn print_interface(&mut self, ty: &FullType) {
        self.output.push_str("interface ");
        self.output.push_str(&ty.name);
        self.print_fields(&ty.fields);
    }

    fn print_input(&mut self, ty: &FullType) {
        self.output.push_str("input ");
        self.output.push_str(&ty.name);
        if ty.input_fields.is_empty() {
            return;
        }
        self.output.push_str(" {\n");
        for field in &ty.input_fields {
            self.output.push_str("  ");
            self.print_input_value(field);
            self.output.push('\n');
        }
        self.output.push('}');
    }

    fn print_enum(&mut self, ty: &FullType) {
        self.output.push_str("enum ");
        self.output.push_str(&ty.name);
        if ty.enum_values.is_empty() {
            return;
        }
        self.output.push_str(" {\n");
        for value in &ty.enum_values {
            self.output.push_str("  ");
            self.output.push_str(&value.name);
            self.output.push('\n');
        }
        self.output.push('}');
    }

    fn print_union(&mut self, ty: &FullType) {
        self.output.push_str("union ");
        self.output.push_str(&ty.name);
        let members = resolved_names(&ty.possible_types);
        if members.is_empty() {
            return;
        }
        self.output.push_str(" = ");
        self.output.push_str(&members.join(" | "));
    }

    fn print_scalar(&mut self, ty: &FullType) {
        self.output.push_str("scalar ");
        self.output.push_str(&ty.name);
    }

    fn print_implements(&mut self, interfaces: &[TypeRef]) {
        let names = resolved_names(interfaces);
        if names.is_empty() {
            return;
        }
        self.output.push_str(" implements ");
        self.output.push_str(&names.join(" & "));
    }

    fn print_fields(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            return;
        }
        self.output.push_str(" {\n");
        for field in fields {
            self.output.push_str("  ");
            self.output.push_str(&field.name);
            if !field.args.is_empty() {
                self.output.push('(');
                for (i, arg) in field.args.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    self.print_input_value(arg);
                }
                self.output.push(')');
            }
            self.output.push_str(": ");
            self.output.push_str(&field.ty.display_name());
            self.output.push('\n');
        }
        self.output.push('}');
    }

    fn print_input_value(&mut self, value: &InputValue) {
        self.output.push_str(&value.name);
        self.output.push_str(": ");
        self.output.push_str(&value.ty.display_name());
        if let Some(default) = &value.default_value {
            self.output.push_str(" = ");
            self.output.push_str(default);
        }
    }
}

fn is_projected(ty: &FullType) -> bool {
    if ty.name.starts_with("__") {
        return false;
    }
    match ty.kind {
        TypeKind::List | TypeKind::NonNull => false,
        TypeKind::Scalar => !is_builtin_scalar(&ty.name),
        _ => true,
    }
}

fn resolved_names(refs: &[TypeRef]) -> Vec<&str> {
    refs.iter()
        .map(TypeRef::named_type)
        .filter(|name| !name.is_empty())
        .collect()
}

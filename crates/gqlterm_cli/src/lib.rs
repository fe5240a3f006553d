//! Command-line interface for gqlterm.
//!
//! # Usage
//!
//! ```bash
//! # Format queries and variables files in place
//! gqlterm fmt query.graphql variables.json
//!
//! # Validate a query and its variables against an introspection result
//! gqlterm check query.graphql --variables variables.json --schema schema.json
//!
//! # Generate a ready-to-run operation for a root field
//! gqlterm generate user --schema schema.json
//!
//! # Print the schema as SDL
//! gqlterm sdl --schema schema.json
//!
//! # List the root fields
//! gqlterm fields --schema schema.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use gqlterm_codegen::{GenerateOptions, QueryGenerator};
use gqlterm_semantic::{to_definition_language, Field, OperationKind, Schema, Validator};
use gqlterm_syntax::{format_json, format_with_options, validate_balance, BalanceError, FormatOptions, SyntaxError};
use std::path::{Path, PathBuf};
use tracing::debug;

type CliResult = Result<i32, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "gqlterm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Query,
    Mutation,
    Subscription,
}

impl From<OperationArg> for OperationKind {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Query => OperationKind::Query,
            OperationArg::Mutation => OperationKind::Mutation,
            OperationArg::Subscription => OperationKind::Subscription,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format GraphQL or JSON files
    #[command(alias = "format")]
    Fmt {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Check if files are formatted (don't modify)
        #[arg(long)]
        check: bool,

        /// Indentation size
        #[arg(long, default_value = "2")]
        indent: usize,

        /// Use tabs instead of spaces
        #[arg(long)]
        tabs: bool,
    },

    /// Validate a query and its variables
    Check {
        /// Query file
        query: PathBuf,

        /// JSON variables file
        #[arg(long)]
        variables: Option<PathBuf>,

        /// Introspection result (JSON); without it only syntax is checked
        #[arg(short, long, env = "GQLTERM_SCHEMA")]
        schema: Option<PathBuf>,
    },

    /// Generate an operation for a root field
    Generate {
        /// Root field name
        field: String,

        /// Introspection result (JSON)
        #[arg(short, long, env = "GQLTERM_SCHEMA")]
        schema: PathBuf,

        /// Root operation type the field belongs to
        #[arg(short, long, value_enum, default_value = "query")]
        operation: OperationArg,

        /// Maximum selection depth
        #[arg(long, default_value = "5")]
        max_depth: usize,

        /// Print the operation and variables as one JSON object
        #[arg(long)]
        json: bool,
    },

    /// Print the schema in definition language
    Sdl {
        /// Introspection result (JSON)
        #[arg(short, long, env = "GQLTERM_SCHEMA")]
        schema: PathBuf,
    },

    /// List root fields with their types
    Fields {
        /// Introspection result (JSON)
        #[arg(short, long, env = "GQLTERM_SCHEMA")]
        schema: PathBuf,

        /// Only list fields of this root type
        #[arg(short, long, value_enum)]
        operation: Option<OperationArg>,
    },

    /// Print version information
    Version,
}

pub fn run(cli: Cli) -> CliResult {
    match cli.command {
        Commands::Fmt {
            files,
            check,
            indent,
            tabs,
        } => format_files(&files, check, indent, tabs, cli.verbose),
        Commands::Check {
            query,
            variables,
            schema,
        } => check_query(&query, variables.as_deref(), schema.as_deref(), cli.quiet),
        Commands::Generate {
            field,
            schema,
            operation,
            max_depth,
            json,
        } => generate_operation(&schema, &field, operation.into(), max_depth, json),
        Commands::Sdl { schema } => {
            let schema = load_schema(&schema)?;
            print!("{}", to_definition_language(&schema));
            Ok(0)
        }
        Commands::Fields { schema, operation } => list_fields(&schema, operation.map(Into::into)),
        Commands::Version => {
            println!("gqlterm {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

fn load_schema(path: &Path) -> Result<Schema, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let schema = Schema::from_introspection_json(&source)?;
    debug!(path = %path.display(), types = schema.types().len(), "loaded schema");
    Ok(schema)
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Formats one file's contents, ending non-empty output with a newline.
fn format_source(path: &Path, source: &str, options: &FormatOptions) -> Result<String, SyntaxError> {
    let formatted = if is_json(path) {
        format_json(source)?
    } else {
        format_with_options(source, options.clone())
    };
    if formatted.trim().is_empty() {
        Ok(formatted)
    } else {
        Ok(formatted + "\n")
    }
}

fn format_files(
    files: &[PathBuf],
    check_only: bool,
    indent: usize,
    use_tabs: bool,
    verbose: bool,
) -> CliResult {
    let mut needs_formatting = false;
    let mut has_errors = false;

    let options = FormatOptions {
        indent_size: indent,
        use_tabs,
    };

    for file in files {
        let source = std::fs::read_to_string(file)?;
        let formatted = match format_source(file, &source, &options) {
            Ok(formatted) => formatted,
            Err(err) => {
                has_errors = true;
                eprintln!(
                    "{} {}:{}:{} {}",
                    "Error".red().bold(),
                    file.display(),
                    err.line,
                    err.column,
                    err
                );
                continue;
            }
        };

        if check_only {
            if source != formatted {
                needs_formatting = true;
                println!("{} {}", "Would format".yellow(), file.display());
            } else if verbose {
                println!("{} {}", "OK".green(), file.display());
            }
        } else if source != formatted {
            std::fs::write(file, &formatted)?;
            println!("{} {}", "Formatted".green(), file.display());
        } else if verbose {
            println!("{} {}", "Unchanged".dimmed(), file.display());
        }
    }

    if has_errors || (check_only && needs_formatting) {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn check_query(
    query_path: &Path,
    variables_path: Option<&Path>,
    schema_path: Option<&Path>,
    quiet: bool,
) -> CliResult {
    let source = std::fs::read_to_string(query_path)?;
    if let Err(err) = validate_balance(&source) {
        report_balance_error(query_path, &source, err);
        return Ok(1);
    }

    let schema = schema_path.map(load_schema).transpose()?;
    let validator: Validator = Validator::default();
    let loaded = validator.load_schema(schema.as_ref());
    if schema.is_some() && loaded.is_none() {
        eprintln!(
            "{} schema could not be loaded, checking syntax only",
            "Warning:".yellow().bold()
        );
    }

    if let Err(err) = validator.validate_query(&source, loaded.as_ref()) {
        eprintln!("{} {}: {}", "Error".red().bold(), query_path.display(), err);
        return Ok(1);
    }

    if let Some(path) = variables_path {
        let variables = std::fs::read_to_string(path)?;
        if let Err(err) = validator.validate_variables(&variables, &source, loaded.as_ref()) {
            eprintln!("{} {}: {}", "Error".red().bold(), path.display(), err);
            return Ok(1);
        }
    }

    if !quiet {
        println!("{} {}", "OK".green(), query_path.display());
    }
    Ok(0)
}

fn report_balance_error(path: &Path, source: &str, err: BalanceError) {
    match err.span() {
        Some(span) => eprintln!(
            "{} {}:{}",
            "Error".red().bold(),
            path.display(),
            span.line_col(source)
        ),
        None => eprintln!("{} {}", "Error".red().bold(), path.display()),
    }
    let report = miette::Report::new(err).with_source_code(miette::NamedSource::new(
        path.display().to_string(),
        source.to_string(),
    ));
    eprintln!("{report:?}");
}

fn generate_operation(
    schema_path: &Path,
    field: &str,
    kind: OperationKind,
    max_depth: usize,
    json: bool,
) -> CliResult {
    let schema = load_schema(schema_path)?;
    let generator = QueryGenerator::with_options(&schema, GenerateOptions { max_depth });
    let Some(op) = generator.generate_root_field(kind, field) else {
        eprintln!("{} no {kind} field named `{field}`", "Error:".red().bold());
        return Ok(1);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&op)?);
        return Ok(0);
    }

    println!("{}", op.query);
    let variables = op.variables_json();
    if !variables.is_empty() {
        println!();
        println!("{variables}");
    }
    Ok(0)
}

fn list_fields(schema_path: &Path, only: Option<OperationKind>) -> CliResult {
    let schema = load_schema(schema_path)?;
    let kinds = match only {
        Some(kind) => vec![kind],
        None => OperationKind::ALL.to_vec(),
    };

    for kind in kinds {
        let Some(root) = schema.root_type(kind) else {
            continue;
        };
        println!("{} {}", kind.as_str().bold(), root.name.dimmed());
        for field in &root.fields {
            let line = field_signature(field);
            if field.is_deprecated {
                let reason = field.deprecation_reason.as_deref().unwrap_or("no reason given");
                println!("  {} {}", line.dimmed(), format!("(deprecated: {reason})").yellow());
            } else {
                println!("  {line}");
            }
        }
    }
    Ok(0)
}

/// `name(arg: Type, ...): Type`
fn field_signature(field: &Field) -> String {
    if field.args.is_empty() {
        return format!("{}: {}", field.name, field.ty);
    }
    let args: Vec<_> = field
        .args
        .iter()
        .map(|arg| format!("{}: {}", arg.name, arg.ty))
        .collect();
    format!("{}({}): {}", field.name, args.join(", "), field.ty)
}

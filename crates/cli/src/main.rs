use std::{path::Path, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use fieldpath_engine::{
    FieldSelectionController, LoadOutcome, LoadRequest, PickerState, SchemaProvider, StaticSchemaProvider, TracingEventSink, load_config,
    load_config_from_path,
};
use fieldpath_types::{DisplayType, Field};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("objects", sub)) => run_objects(sub),
        Some(("fields", sub)) => run_fields(sub).await,
        Some(("resolve", sub)) => run_resolve(sub).await,
        Some((other, _)) => bail!("unknown subcommand: {}", other),
        None => bail!("expected a subcommand"),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_cli() -> Command {
    let schema = Arg::new("schema")
        .long("schema")
        .short('s')
        .action(ArgAction::Set)
        .required(true)
        .help("Path to a YAML/JSON schema document");
    let config = Arg::new("config")
        .long("config")
        .short('c')
        .action(ArgAction::Set)
        .help("Path to picker configuration (defaults to FIELDPATH_CONFIG_PATH or the user config dir)");
    let base = Arg::new("base").long("base").short('b').action(ArgAction::Set).help("Base object override");

    Command::new("fieldpath")
        .about("Browse object fields and resolve relationship paths")
        .subcommand_required(true)
        .subcommand(Command::new("objects").about("List objects described by the schema").arg(schema.clone()))
        .subcommand(
            Command::new("fields")
                .about("List the fields of an object reached through relationships")
                .arg(
                    Arg::new("relationships")
                        .action(ArgAction::Set)
                        .help("Dotted relationship names to follow from the base object, e.g. Owner.ReportsTo"),
                )
                .arg(schema.clone())
                .arg(config.clone())
                .arg(base.clone())
                .arg(Arg::new("search").long("search").action(ArgAction::Set).help("Search term"))
                .arg(
                    Arg::new("filter")
                        .long("filter")
                        .action(ArgAction::Append)
                        .help("Field type to filter by, e.g. EMAIL (repeatable)"),
                )
                .arg(Arg::new("sort").long("sort").action(ArgAction::Set).help("Sort option id, e.g. \"Field - ASC\"")),
        )
        .subcommand(
            Command::new("resolve")
                .about("Resolve a dotted field path and print the selection as JSON")
                .arg(Arg::new("path").action(ArgAction::Set).required(true).help("Field path, e.g. Owner.Email"))
                .arg(schema)
                .arg(config)
                .arg(base),
        )
}

fn load_provider(sub: &ArgMatches) -> Result<StaticSchemaProvider> {
    let path = sub.get_one::<String>("schema").context("--schema is required")?;
    StaticSchemaProvider::from_path(path)
}

fn build_picker(sub: &ArgMatches) -> Result<FieldSelectionController> {
    let provider: Arc<dyn SchemaProvider> = Arc::new(load_provider(sub)?);
    let mut config = match sub.get_one::<String>("config") {
        Some(path) => load_config_from_path(Path::new(path)),
        None => load_config(),
    }
    .context("failed to load picker configuration")?;
    if let Some(base) = sub.get_one::<String>("base") {
        config.base_object = Some(serde_json::Value::String(base.clone()));
    }
    Ok(FieldSelectionController::from_config(&config, provider, Arc::new(TracingEventSink)))
}

async fn run(picker: &mut FieldSelectionController, request: LoadRequest) -> Result<()> {
    match picker.run_load(request).await {
        LoadOutcome::Applied => Ok(()),
        outcome => match picker.state() {
            PickerState::Error { object_api_name, cause } => bail!("failed to load fields for {}: {}", object_api_name, cause),
            state => bail!("field load ended as {:?} while {}", outcome, state.name()),
        },
    }
}

fn run_objects(sub: &ArgMatches) -> Result<()> {
    let provider = load_provider(sub)?;
    for name in provider.object_names() {
        println!("{}", name);
    }
    Ok(())
}

async fn run_fields(sub: &ArgMatches) -> Result<()> {
    let mut picker = build_picker(sub)?;
    let request = match picker.open() {
        Some(request) => request,
        None => picker.reload()?,
    };
    run(&mut picker, request).await?;

    if let Some(relationships) = sub.get_one::<String>("relationships") {
        for relationship in relationships.split('.').map(str::trim).filter(|segment| !segment.is_empty()) {
            let field = picker
                .lookup_fields()
                .iter()
                .find(|field| field.relationship_name().is_some_and(|name| name.eq_ignore_ascii_case(relationship)))
                .cloned()
                .with_context(|| format!("{} has no relationship named {}", picker.current_object(), relationship))?;
            debug!(relationship, "following relationship");
            let request = picker.go_deeper(&field)?;
            run(&mut picker, request).await?;
        }
    }

    if let Some(filters) = sub.get_many::<String>("filter") {
        for value in filters {
            picker.toggle_filter(&DisplayType::from(value.as_str()))?;
        }
    }
    if let Some(sort) = sub.get_one::<String>("sort") {
        picker.select_sort_option(sort)?;
    }
    if let Some(search) = sub.get_one::<String>("search") {
        picker.set_search_term(search.as_str());
    }

    println!("{}", breadcrumb_line(&picker));
    println!();
    println!("{}", render_fields(picker.displayed_fields()));
    if !picker.lookup_fields().is_empty() && !picker.is_maximum_depth() {
        println!();
        println!("Relationships:");
        println!("{}", render_fields(picker.lookup_fields()));
    }
    Ok(())
}

async fn run_resolve(sub: &ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path is required")?;
    let mut picker = build_picker(sub)?;
    picker.open();
    let selected = picker.initialize_from_path(path).await?;
    println!("{}", serde_json::to_string_pretty(&selected)?);
    Ok(())
}

fn breadcrumb_line(picker: &FieldSelectionController) -> String {
    let mut line = picker.base_object().to_string();
    for crumb in picker.breadcrumbs() {
        line.push_str(&format!(" > {} ({})", crumb.relationship_name, crumb.object_api_name));
    }
    line
}

fn render_fields(fields: &[Field]) -> String {
    let rows: Vec<[String; 3]> = fields
        .iter()
        .map(|field| {
            let kind = match field.reference_to() {
                Some(target) => format!("{} -> {}", field.r#type, target),
                None => field.r#type.to_string(),
            };
            [field.label.clone(), field.api_name.clone(), kind]
        })
        .collect();
    render_table(["LABEL", "API NAME", "TYPE"], &rows)
}

fn render_table(headers: [&str; 3], rows: &[[String; 3]]) -> String {
    let mut widths = headers.map(|header| header.width());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(headers.iter().copied(), &widths));
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize; 3]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width.saturating_sub(cell.width()))))
        .collect();
    padded.join("  ").trim_end().to_string()
}

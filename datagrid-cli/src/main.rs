//! Command-line front end: runs a JSON dataset through the grid pipeline and
//! prints the rows on screen.

mod render;

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use datagrid_lib::model::{Column, ColumnType, Row, Value};
use datagrid_lib::query::{Direction, SortModel};
use datagrid_lib::view::{GridConfig, GridState, Windowing};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "datagrid", about = "Filter, search, sort and page a JSON dataset.")]
struct Args {
    /// JSON file holding an array of row objects.
    data: PathBuf,

    /// JSON file holding the column definitions. Inferred from the data when absent.
    #[arg(long, value_name = "PATH")]
    columns: Option<PathBuf>,

    /// JSON file holding the grid configuration.
    #[arg(long, value_name = "PATH", env = "DATAGRID_CONFIG")]
    config: Option<PathBuf>,

    /// Sort key as `field` or `field:desc`. Repeat for tie-breakers.
    #[arg(long, value_name = "FIELD[:DIR]")]
    sort: Vec<String>,

    /// Column filter as `field=expression`, e.g. `age=>30`. Repeatable.
    #[arg(long, value_name = "FIELD=EXPR")]
    filter: Vec<String>,

    /// Case-insensitive search across every field.
    #[arg(long)]
    search: Option<String>,

    /// Page to show (1-based). Enables pagination.
    #[arg(long, conflicts_with = "virtualize")]
    page: Option<usize>,

    /// Rows per page. Enables pagination.
    #[arg(long, conflicts_with = "virtualize")]
    page_size: Option<usize>,

    /// Show only the rows a scrolled viewport would render.
    #[arg(long)]
    virtualize: bool,

    /// Scroll offset in pixels when virtualized.
    #[arg(long, default_value_t = 0.0, requires = "virtualize")]
    scroll: f64,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level.
    #[arg(long, default_value = "warn", env = "DATAGRID_LOG")]
    log_level: LevelFilter,

    /// Write logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level, args.log_file.as_deref())?;

    let rows: Vec<Row> = read_json(&args.data).context("Failed to read data")?;
    let columns = match &args.columns {
        Some(path) => read_json(path).context("Failed to read columns")?,
        None => infer_columns(&rows),
    };
    let config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            GridConfig::from_json(&text)?
        }
        None => GridConfig::default(),
    };
    let config = apply_overrides(config, &args)?;
    log::info!("loaded {} rows, {} columns", rows.len(), columns.len());

    let mut state = GridState::new(columns, config)?;
    if !args.sort.is_empty() {
        state.set_sort_model(parse_sort(&args.sort)?);
    }
    for filter in &args.filter {
        let Some((field, expr)) = filter.split_once('=') else {
            bail!("Filter '{}' is not in field=expression form", filter);
        };
        state.set_filter(field.trim(), expr);
    }
    if let Some(term) = &args.search {
        state.set_search(term.as_str());
    }
    if let Some(page) = args.page {
        state.set_page(page);
    }
    state.set_scroll_offset(args.scroll);

    let started = Instant::now();
    let view = state.process(&rows);
    log::debug!("processed in {:?}", started.elapsed());

    match args.format {
        OutputFormat::Table => println!("{}", render::table(&state, &view)),
        OutputFormat::Json => println!("{}", render::json(&view)?),
    }
    Ok(())
}

fn init_logging(level: LevelFilter, log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?,
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// One string or number column per field, in the order fields first appear.
fn infer_columns(rows: &[Row]) -> Vec<Column> {
    let mut fields: Vec<&String> = Vec::new();
    for field in rows.iter().flat_map(|row| row.fields().keys()) {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    fields
        .into_iter()
        .map(|field| {
            let numeric = rows
                .iter()
                .filter_map(|row| row.get(field))
                .filter(|value| !value.is_null())
                .all(|value| matches!(value, Value::Int(_) | Value::Float(_) | Value::Decimal(_)));
            let column_type = if numeric {
                ColumnType::Number
            } else {
                ColumnType::String
            };
            Column::new(field.as_str(), field.as_str()).with_type(column_type)
        })
        .collect()
}

fn apply_overrides(mut config: GridConfig, args: &Args) -> Result<GridConfig> {
    let paginate = args.page.is_some() || args.page_size.is_some();
    if paginate || args.virtualize {
        let page_size = args
            .page_size
            .or(match config.windowing {
                Windowing::Paginated { page_size } => Some(page_size),
                _ => None,
            })
            .unwrap_or(10);
        config.windowing = Windowing::from_flags(paginate, args.virtualize, page_size)?;
    }
    if !args.filter.is_empty() {
        config.filterable = true;
    }
    config.validate()?;
    Ok(config)
}

fn parse_sort(keys: &[String]) -> Result<SortModel> {
    let mut model = SortModel::none();
    for key in keys {
        let (field, direction) = match key.split_once(':') {
            Some((field, dir)) => (field, dir.parse::<Direction>()?),
            None => (key.as_str(), Direction::Asc),
        };
        model = match direction {
            Direction::Asc => model.then_asc(field),
            Direction::Desc => model.then_desc(field),
        };
    }
    Ok(model)
}

//! Walks a small dataset through filtering, search, sorting and paging.
//!
//! Run with `cargo run --example pipeline`.

use std::time::Instant;

use datagrid_lib::model::{Column, ColumnType, Row};
use datagrid_lib::view::{GridConfig, GridState, Windowing};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let rows: Vec<Row> = [
        ("John", 30, true),
        ("Alice", 25, false),
        ("Bob", 45, true),
        ("Zoe", 28, true),
        ("Mallory", 52, false),
        ("Trent", 38, true),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, age, active))| {
        Row::new()
            .set("id", i as i64 + 1)
            .set("name", name)
            .set("age", age)
            .set("active", active)
    })
    .collect();

    let columns = vec![
        Column::new("id", "ID").with_type(ColumnType::Number),
        Column::new("name", "Name"),
        Column::new("age", "Age").with_type(ColumnType::Number),
        Column::new("active", "Active").with_type(ColumnType::Boolean),
    ];
    let config = GridConfig::default()
        .with_filterable(true)
        .with_windowing(Windowing::Paginated { page_size: 2 });

    let mut state = GridState::new(columns, config)?;
    state.set_filter("age", ">=28");
    state.set_filter("active", "yes");
    state.toggle_sort("age", Instant::now());
    state.toggle_sort("age", Instant::now());

    for page in 1..=2 {
        state.set_page(page);
        let view = state.process(&rows);
        println!("page {} of {:?}:", page, view.page().map(|p| p.total_pages()));
        for entry in view.rows() {
            println!(
                "  #{} {} ({})",
                entry.index + 1,
                entry.row.value("name").to_text(),
                entry.row.value("age").to_text()
            );
        }
    }
    Ok(())
}

//! Output rendering.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use datagrid_lib::model::Row;
use datagrid_lib::query::PageItem;
use datagrid_lib::view::{GridState, GridView, display_value};
use serde::Serialize;

#[derive(Serialize)]
struct JsonView<'a> {
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_pages: Option<usize>,
    rows: Vec<JsonRow<'a>>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    index: usize,
    row: &'a Row,
}

/// Renders the materialized rows as a table with a position footer.
pub fn table(state: &GridState, view: &GridView<'_>) -> String {
    if view.is_empty() {
        return "No rows to display".to_string();
    }

    let columns = state.columns();
    let format = &state.config().display_format;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|c| c.header_name.as_str()));

    for entry in view.rows() {
        table.add_row(
            columns
                .iter()
                .map(|c| display_value(entry.row.value(&c.field), c.column_type, format)),
        );
    }

    let mut out = table.to_string();
    out.push('\n');
    out.push_str(&footer(view));
    out
}

fn footer(view: &GridView<'_>) -> String {
    let shown = view.rows();
    let (first, last) = match (shown.first(), shown.last()) {
        (Some(first), Some(last)) => (first.index + 1, last.index + 1),
        _ => (0, 0),
    };
    let mut line = format!("Rows {}-{} of {}", first, last, view.processed_count());

    if let Some(page) = view.page() {
        let strip: Vec<String> = view
            .page_items()
            .iter()
            .map(|item| match item {
                PageItem::Page(n) if *n == page.page => format!("[{}]", n),
                PageItem::Page(n) => n.to_string(),
                PageItem::Ellipsis => "...".to_string(),
            })
            .collect();
        line.push_str(&format!("  |  page {}/{}  {}", page.page, page.total_pages(), strip.join(" ")));
    }
    line
}

/// Renders the materialized rows as JSON.
pub fn json(view: &GridView<'_>) -> Result<String> {
    let out = JsonView {
        total: view.processed_count(),
        page: view.page().map(|p| p.page),
        total_pages: view.page().map(|p| p.total_pages()),
        rows: view
            .rows()
            .iter()
            .map(|entry| JsonRow {
                index: entry.index,
                row: entry.row,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

#[cfg(test)]
mod tests {
    use datagrid_lib::view::GridConfig;

    use super::*;

    #[test]
    fn test_json_keeps_field_order() {
        let rows: Vec<Row> =
            serde_json::from_str(r#"[{"zeta": 1, "alpha": "a"}, {"zeta": 2, "alpha": "b"}]"#).unwrap();
        let state = GridState::new(Vec::new(), GridConfig::default()).unwrap();
        let view = state.process(&rows);

        let out = json(&view).unwrap();
        let zeta = out.find("\"zeta\"").unwrap();
        let alpha = out.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
        assert!(out.contains("\"total\": 2"));
    }
}

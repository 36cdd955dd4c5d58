//! Grid state and the processing pipeline.
//!
//! [`GridState`] holds everything the user can change about a grid (sort,
//! filters, search term, page, scroll position, selection, column widths,
//! the cell being edited). [`GridState::process`] turns a dataset into the
//! rows on screen:
//!
//! ```text
//! rows -> filter -> search -> sort -> paginate | window -> GridView
//! ```
//!
//! The dataset itself is never owned or mutated here. Edits come back as
//! [`CellChange`]s for the caller to apply.

use std::collections::HashMap;
use std::time::Instant;

use super::config::GridConfig;
use super::config::Windowing;
use super::edit::CellChange;
use super::edit::EditSession;
use super::resize::ResizeTracker;
use super::selection::Selection;
use super::window::VirtualScroll;
use super::window::Window;
use crate::error::ConfigError;
use crate::error::EditError;
use crate::error::FieldError;
use crate::model::Column;
use crate::model::Row;
use crate::model::RowKey;
use crate::model::Value;
use crate::model::find_column;
use crate::query::Direction;
use crate::query::FilterModel;
use crate::query::PageItem;
use crate::query::PageState;
use crate::query::SortModel;
use crate::query::filter_refs;
use crate::query::paginate;
use crate::query::rebase_page;
use crate::query::search_refs;
use crate::query::sort_by_model;
use crate::query::total_pages;

/// One materialized row of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRow<'a> {
    /// Position in the processed (filtered, searched, sorted) sequence.
    pub index: usize,
    pub row: &'a Row,
}

/// Result of one processing pass.
#[derive(Debug, Clone)]
pub struct GridView<'a> {
    processed: Vec<&'a Row>,
    rows: Vec<ViewRow<'a>>,
    page: Option<PageState>,
    window: Option<Window>,
    page_siblings: usize,
}

impl<'a> GridView<'a> {
    /// Number of rows that survived filtering and search.
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Every processed row, in display order.
    pub fn processed(&self) -> &[&'a Row] {
        &self.processed
    }

    /// Rows to render, with their processed positions.
    pub fn rows(&self) -> &[ViewRow<'a>] {
        &self.rows
    }

    /// Pagination state, when paginated.
    pub fn page(&self) -> Option<&PageState> {
        self.page.as_ref()
    }

    /// Virtualization window, when virtualized.
    pub fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    /// Pagination strip, when paginated.
    pub fn page_items(&self) -> Vec<PageItem> {
        self.page
            .map(|page| page.items(self.page_siblings))
            .unwrap_or_default()
    }

    /// Whether there is nothing to show ("no rows").
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

/// Interactive state of one grid.
#[derive(Debug, Clone)]
pub struct GridState {
    columns: Vec<Column>,
    config: GridConfig,
    sort: SortModel,
    filters: FilterModel,
    search: String,
    page: usize,
    scroll: VirtualScroll,
    selection: Selection,
    widths: HashMap<String, f64>,
    resize: ResizeTracker,
    editing: Option<EditSession>,
}

impl GridState {
    /// Creates grid state for `columns`.
    ///
    /// Sorting starts ascending on the first column when sorting is enabled.
    pub fn new(columns: Vec<Column>, config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let sort = match columns.first() {
            Some(first) if config.sortable && first.sortable => SortModel::asc(&first.field),
            _ => SortModel::none(),
        };
        let widths = columns
            .iter()
            .filter_map(|c| c.width.map(|w| (c.field.clone(), w)))
            .collect();
        let scroll = VirtualScroll::new(config.row_height, config.max_height)
            .with_overscan(config.overscan);
        let selection = Selection::new(config.selection_mode);

        Ok(Self {
            columns,
            config,
            sort,
            filters: FilterModel::new(),
            search: String::new(),
            page: 1,
            scroll,
            selection,
            widths,
            resize: ResizeTracker::new(),
            editing: None,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn sort_model(&self) -> &SortModel {
        &self.sort
    }

    pub fn filters(&self) -> &FilterModel {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn scroll(&self) -> &VirtualScroll {
        &self.scroll
    }

    /// Requested page, 1-based. The page shown may be lower if the data shrank.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page, when paginated.
    pub fn page_size(&self) -> Option<usize> {
        match self.config.windowing {
            Windowing::Paginated { page_size } => Some(page_size),
            _ => None,
        }
    }

    /// Replaces the sort model outright.
    pub fn set_sort_model(&mut self, sort: SortModel) {
        self.sort = sort;
    }

    /// Handles a header click on `field` at time `now`.
    ///
    /// Clicking the sorted field flips its direction; another field starts
    /// ascending. Returns false when the click is ignored: sorting disabled,
    /// column not sortable, or a column resize just ended.
    pub fn toggle_sort(&mut self, field: &str, now: Instant) -> bool {
        if !self.config.sortable {
            return false;
        }
        if !find_column(&self.columns, field).is_some_and(|c| c.sortable) {
            return false;
        }
        if !self.resize.accepts_sort_click(now) {
            log::debug!("ignoring sort click on '{}' after resize", field);
            return false;
        }

        let direction = match self.sort.primary() {
            Some(spec) if spec.field == field => spec.direction.toggled(),
            _ => Direction::Asc,
        };
        log::debug!("sorting by '{}' {}", field, direction);
        self.sort = SortModel::by(field, direction);
        true
    }

    /// Sets the filter criterion for `field`. Ignored when filtering is disabled
    /// or the column opts out.
    ///
    /// Returns to the first page.
    pub fn set_filter(&mut self, field: impl Into<String>, criterion: impl Into<Value>) -> bool {
        let field = field.into();
        if !self.config.filterable {
            return false;
        }
        if !find_column(&self.columns, &field).is_none_or(|c| c.filterable) {
            log::debug!("column '{}' does not accept filters", field);
            return false;
        }
        self.filters.set(field, criterion);
        self.page = 1;
        true
    }

    /// Removes every filter criterion.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.page = 1;
    }

    /// Sets the global search term. Returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Moves to `page` (1-based). Page 0 is treated as page 1; pages past the
    /// end are clamped when the view is processed.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Changes the page size, keeping the first visible row on screen.
    ///
    /// Has no effect unless the grid is paginated.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageSize(page_size));
        }
        if let Windowing::Paginated { page_size: current } = &mut self.config.windowing {
            self.page = rebase_page(self.page, *current, page_size);
            *current = page_size;
        }
        Ok(())
    }

    /// Records the scroll position reported by the viewport.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll.set_offset(offset);
    }

    /// Records the measured viewport height.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.scroll.set_viewport_height(height);
    }

    /// Handles a click on `row`. Returns true if the selection changed.
    pub fn click_row(&mut self, row: &Row) -> bool {
        self.selection.click(row.key(&self.config.row_id_field))
    }

    /// Whether `row` is selected.
    pub fn is_selected(&self, row: &Row) -> bool {
        self.selection
            .is_selected(&row.key(&self.config.row_id_field))
    }

    /// Selected rows of `view`, in display order.
    pub fn selected_rows<'a>(&self, view: &GridView<'a>) -> Vec<&'a Row> {
        self.selection
            .selected_rows(view.processed(), &self.config.row_id_field)
    }

    /// Current width of `field`, if it has one.
    pub fn column_width(&self, field: &str) -> Option<f64> {
        self.widths.get(field).copied()
    }

    /// Starts resizing `field` from pointer position `x`.
    pub fn begin_resize(&mut self, field: &str, x: f64) -> bool {
        if !self.config.resizable_columns {
            return false;
        }
        let Some(column) = find_column(&self.columns, field).filter(|c| c.resizable) else {
            return false;
        };
        let width = self
            .widths
            .get(field)
            .copied()
            .or(column.width)
            .unwrap_or_default();
        self.resize.begin(field, x, width);
        true
    }

    /// Moves the resize pointer to `x`, returning the new width.
    pub fn drag_resize(&mut self, x: f64) -> Option<f64> {
        let (field, width) = self.resize.drag(x)?;
        let field = field.to_string();
        self.widths.insert(field, width);
        Some(width)
    }

    /// Ends the resize at `now`.
    pub fn end_resize(&mut self, now: Instant) {
        self.resize.end(now);
    }

    /// Opens an edit on `field` of `row`, replacing any edit in progress.
    pub fn begin_edit(&mut self, row: &Row, field: &str) -> Result<(), EditError> {
        let column =
            find_column(&self.columns, field).ok_or_else(|| FieldError::unknown_column(field))?;
        let session = EditSession::begin(
            row,
            column,
            &self.config.row_id_field,
            &self.config.display_format,
        )?;
        self.editing = Some(session);
        Ok(())
    }

    /// The edit in progress.
    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Replaces the text of the edit in progress.
    pub fn set_edit_input(&mut self, input: impl Into<String>) -> Result<(), EditError> {
        let session = self.editing.as_mut().ok_or(EditError::NotEditing)?;
        session.set_input(input);
        Ok(())
    }

    /// Commits the edit in progress.
    ///
    /// On success the edit closes and the change is returned. On failure the
    /// edit stays open with the error attached.
    pub fn commit_edit(&mut self) -> Result<CellChange, EditError> {
        let session = self.editing.as_mut().ok_or(EditError::NotEditing)?;
        let column = find_column(&self.columns, session.field())
            .ok_or_else(|| FieldError::unknown_column(session.field()))?;
        let change = session.commit(column)?;
        log::debug!("cell '{}' of row {} changed", change.field, change.row_key);
        self.editing = None;
        Ok(change)
    }

    /// Abandons the edit in progress.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Returns `rows` with `change` applied to the row it targets.
    pub fn apply_change(&self, rows: &[Row], change: &CellChange) -> Vec<Row> {
        let id_field = &self.config.row_id_field;
        rows.iter()
            .map(|row| {
                if row.key(id_field) == change.row_key {
                    change.apply(row)
                } else {
                    row.clone()
                }
            })
            .collect()
    }

    /// Runs the pipeline over `rows`.
    pub fn process<'a>(&self, rows: &'a [Row]) -> GridView<'a> {
        let all: Vec<&'a Row> = rows.iter().collect();
        let filtered = filter_refs(&all, &self.filters, &self.columns);
        let searched = search_refs(&filtered, &self.search, &self.config.display_format);
        let processed = sort_by_model(&searched, &self.sort, &self.columns);

        let mut view = GridView {
            rows: Vec::new(),
            page: None,
            window: None,
            page_siblings: self.config.page_siblings,
            processed,
        };

        match self.config.windowing {
            Windowing::None => {
                view.rows = enumerate(&view.processed, 0);
            }
            Windowing::Paginated { page_size } => {
                let pages = total_pages(view.processed.len(), page_size);
                let page = PageState {
                    page: self.page.min(pages.max(1)),
                    page_size,
                    total: view.processed.len(),
                };
                let slice = paginate(&view.processed, page.page, page_size);
                view.rows = enumerate(slice, page.offset());
                view.page = Some(page);
            }
            Windowing::Virtualized => {
                let window = self.scroll.window(view.processed.len());
                let slice = view.processed.get(window.range()).unwrap_or_default();
                view.rows = enumerate(slice, window.start_index);
                view.window = Some(window);
            }
        }

        log::debug!(
            "processed {} rows: {} after filter, {} after search, {} materialized",
            rows.len(),
            filtered.len(),
            view.processed.len(),
            view.rows.len()
        );
        view
    }

    /// Key of `row` under this grid's id field.
    pub fn row_key(&self, row: &Row) -> RowKey {
        row.key(&self.config.row_id_field)
    }
}

fn enumerate<'a>(rows: &[&'a Row], offset: usize) -> Vec<ViewRow<'a>> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| ViewRow {
            index: offset + i,
            row,
        })
        .collect()
}

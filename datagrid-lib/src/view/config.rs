//! Grid configuration

use serde::Deserialize;
use serde::Serialize;

use super::selection::SelectionMode;
use crate::error::ConfigError;
use crate::model::DisplayFormat;

/// How a view bounds the rows it materializes.
///
/// Pagination and virtualization are alternatives: both produce "the rows
/// currently on screen" and cannot be stacked, so a view picks exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Windowing {
    /// Every processed row is materialized.
    #[default]
    None,
    /// Rows are sliced into pages of `page_size`.
    Paginated { page_size: usize },
    /// Rows are windowed by scroll position.
    Virtualized,
}

impl Windowing {
    /// Builds the windowing mode from independent paginate/virtualize switches.
    ///
    /// Asking for both is rejected with [`ConfigError::ConflictingWindowing`].
    pub fn from_flags(paginate: bool, virtualize: bool, page_size: usize) -> Result<Self, ConfigError> {
        match (paginate, virtualize) {
            (true, true) => Err(ConfigError::ConflictingWindowing),
            (true, false) => Ok(Windowing::Paginated { page_size }),
            (false, true) => Ok(Windowing::Virtualized),
            (false, false) => Ok(Windowing::None),
        }
    }
}

/// Configuration for a grid view.
///
/// # Example
///
/// ```
/// use datagrid_lib::view::{GridConfig, SelectionMode, Windowing};
///
/// let config = GridConfig::default()
///     .with_filterable(true)
///     .with_selection_mode(SelectionMode::Multi)
///     .with_windowing(Windowing::Paginated { page_size: 25 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Whether header clicks sort.
    ///
    /// Default: true
    pub sortable: bool,

    /// Whether filter inputs are active.
    ///
    /// Default: false
    pub filterable: bool,

    /// Whether columns can be resized.
    ///
    /// Default: true
    pub resizable_columns: bool,

    /// Row selection behaviour.
    ///
    /// Default: none
    pub selection_mode: SelectionMode,

    /// Field holding each row's identity.
    ///
    /// Default: "id"
    pub row_id_field: String,

    /// Height of one row in pixels.
    ///
    /// Default: 40
    pub row_height: f64,

    /// Height of the scrolling viewport in pixels.
    ///
    /// Default: 400
    pub max_height: f64,

    /// Rows rendered beyond each viewport edge when virtualized.
    ///
    /// Default: 5
    pub overscan: usize,

    /// Page sizes offered to the user.
    ///
    /// Default: 5, 10, 25, 50, 100
    pub page_size_options: Vec<usize>,

    /// Pages shown either side of the current one in the pagination strip.
    ///
    /// Default: 1
    pub page_siblings: usize,

    /// Date rendering for search and display.
    pub display_format: DisplayFormat,

    /// Pagination or virtualization.
    ///
    /// Default: none
    pub windowing: Windowing,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            sortable: true,
            filterable: false,
            resizable_columns: true,
            selection_mode: SelectionMode::None,
            row_id_field: "id".to_string(),
            row_height: 40.0,
            max_height: 400.0,
            overscan: 5,
            page_size_options: vec![5, 10, 25, 50, 100],
            page_siblings: 1,
            display_format: DisplayFormat::default(),
            windowing: Windowing::None,
        }
    }
}

impl GridConfig {
    /// Creates a grid config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets whether header clicks sort.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether filter inputs are active.
    pub fn with_filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Sets whether columns can be resized.
    pub fn with_resizable_columns(mut self, resizable: bool) -> Self {
        self.resizable_columns = resizable;
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Sets the row identity field.
    pub fn with_row_id_field(mut self, field: impl Into<String>) -> Self {
        self.row_id_field = field.into();
        self
    }

    /// Sets the row height.
    pub fn with_row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Sets the viewport height.
    pub fn with_max_height(mut self, height: f64) -> Self {
        self.max_height = height;
        self
    }

    /// Sets the overscan.
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the date display format.
    pub fn with_display_format(mut self, format: DisplayFormat) -> Self {
        self.display_format = format;
        self
    }

    /// Sets the windowing mode.
    pub fn with_windowing(mut self, windowing: Windowing) -> Self {
        self.windowing = windowing;
        self
    }

    /// Checks page size and pixel dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Windowing::Paginated { page_size: 0 } = self.windowing {
            return Err(ConfigError::InvalidPageSize(0));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::InvalidPageSize(0));
        }
        for (name, value) in [("row_height", self.row_height), ("max_height", self.max_height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::invalid_dimension(name, value));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_rejects_both() {
        assert_eq!(
            Windowing::from_flags(true, true, 10),
            Err(ConfigError::ConflictingWindowing)
        );
        assert_eq!(
            Windowing::from_flags(true, false, 10),
            Ok(Windowing::Paginated { page_size: 10 })
        );
        assert_eq!(Windowing::from_flags(false, true, 10), Ok(Windowing::Virtualized));
    }

    #[test]
    fn test_validate() {
        assert!(GridConfig::default().validate().is_ok());
        assert_eq!(
            GridConfig::default()
                .with_windowing(Windowing::Paginated { page_size: 0 })
                .validate(),
            Err(ConfigError::InvalidPageSize(0))
        );
        assert!(matches!(
            GridConfig::default().with_row_height(0.0).validate(),
            Err(ConfigError::InvalidDimension { name: "row_height", .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let config = GridConfig::from_json(
            r#"{
                "filterable": true,
                "selection_mode": "multiple",
                "windowing": { "mode": "paginated", "page_size": 25 }
            }"#,
        )
        .unwrap();
        assert!(config.filterable);
        assert!(config.sortable);
        assert_eq!(config.selection_mode, SelectionMode::Multi);
        assert_eq!(config.windowing, Windowing::Paginated { page_size: 25 });
        assert_eq!(config.row_height, 40.0);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            GridConfig::from_json(r#"{ "row_height": -1 }"#),
            Err(ConfigError::InvalidDimension { .. })
        ));
        assert!(matches!(
            GridConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}

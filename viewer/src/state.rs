//! View state bound by the rendering layer.

use std::fmt;

use common::models::{ColumnSummary, UploadFile};

/// Where the wizard stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WizardStage {
    /// Catalog not loaded yet.
    #[default]
    Init,
    CatalogReady,
    TablesLoading,
    TableSelectable,
    ColumnsLoading,
    ColumnSelectable,
    DataLoading,
    DataShown,
}

impl fmt::Display for WizardStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStage::Init => "init",
            WizardStage::CatalogReady => "catalog_ready",
            WizardStage::TablesLoading => "tables_loading",
            WizardStage::TableSelectable => "table_selectable",
            WizardStage::ColumnsLoading => "columns_loading",
            WizardStage::ColumnSelectable => "column_selectable",
            WizardStage::DataLoading => "data_loading",
            WizardStage::DataShown => "data_shown",
        };
        f.write_str(name)
    }
}

/// The user's current database/table/column choice.
///
/// A field is only set when the one before it is: choosing a database drops
/// the table and column, choosing a table drops the column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    database: Option<String>,
    table: Option<String>,
    column: Option<String>,
}

impl Selection {
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.database.is_none()
    }

    pub fn choose_database(&mut self, database: impl Into<String>) {
        self.database = Some(database.into());
        self.table = None;
        self.column = None;
    }

    /// Returns false (and changes nothing) when no database is chosen.
    pub fn choose_table(&mut self, table: impl Into<String>) -> bool {
        if self.database.is_none() {
            return false;
        }
        self.table = Some(table.into());
        self.column = None;
        true
    }

    /// Returns false (and changes nothing) when no table is chosen.
    pub fn choose_column(&mut self, column: impl Into<String>) -> bool {
        if self.table.is_none() {
            return false;
        }
        self.column = Some(column.into());
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Everything the rendering layer displays.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub stage: WizardStage,
    /// Uploaded databases; `None` until first loaded.
    pub catalog: Option<Vec<String>>,
    pub selection: Selection,
    /// Tables of the selected database.
    pub tables: Option<Vec<String>>,
    /// Columns of the selected table.
    pub columns: Option<Vec<String>>,
    /// Data of the selected column.
    pub summary: Option<ColumnSummary>,
    /// Gate for rendering `summary`.
    pub show_table: bool,
    /// File chosen for the next upload.
    pub pending_file: Option<UploadFile>,
    busy: u32,
}

impl ViewState {
    /// Whether the busy indicator is showing.
    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }

    /// Number of busy-guarded requests in flight.
    pub fn busy_count(&self) -> u32 {
        self.busy
    }

    pub(crate) fn raise_busy(&mut self) {
        self.busy += 1;
    }

    pub(crate) fn lower_busy(&mut self) {
        self.busy = self.busy.saturating_sub(1);
    }

    /// Stage the wizard settles back to once the selection is gone.
    pub(crate) fn base_stage(&self) -> WizardStage {
        if self.catalog.is_some() {
            WizardStage::CatalogReady
        } else {
            WizardStage::Init
        }
    }

    pub fn catalog(&self) -> &[String] {
        self.catalog.as_deref().unwrap_or_default()
    }

    pub fn tables(&self) -> &[String] {
        self.tables.as_deref().unwrap_or_default()
    }

    pub fn columns(&self) -> &[String] {
        self.columns.as_deref().unwrap_or_default()
    }

    /// Column data, only while the data view is shown.
    pub fn visible_summary(&self) -> Option<&ColumnSummary> {
        self.summary.as_ref().filter(|_| self.show_table)
    }
}

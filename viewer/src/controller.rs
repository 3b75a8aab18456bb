//! Wizard controller.
//!
//! Drives the four-step flow (database → table → column → data) against a
//! [`DatabaseApi`]. Handlers take `&self` so several may be in flight at
//! once; the view lock is never held across a remote call, and responses
//! that lost their ticket are dropped.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use common::errors::{AppError, AppResult};
use common::models::UploadFile;
use db_client::DatabaseApi;

use crate::alert::{Alert, AlertSink};
use crate::policy::{Operation, PolicyTable};
use crate::state::{ViewState, WizardStage};
use crate::tickets::{RequestTickets, Stage, Ticket};

#[derive(Default)]
struct Inner {
    view: ViewState,
    tickets: RequestTickets,
}

/// Owns the view state and sequences the wizard steps.
pub struct WizardController<A> {
    api: A,
    policies: PolicyTable,
    alerts: Arc<dyn AlertSink>,
    inner: RwLock<Inner>,
}

impl<A: DatabaseApi> WizardController<A> {
    /// Creates a controller with an empty view state.
    pub fn new(api: A, policies: PolicyTable, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            api,
            policies,
            alerts,
            inner: RwLock::new(Inner::default()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current view state.
    pub async fn snapshot(&self) -> ViewState {
        self.inner.read().await.view.clone()
    }

    /// Startup listing of the uploaded databases.
    pub async fn load_catalog(&self) {
        let ticket = {
            let mut inner = self.inner.write().await;
            self.issue(&mut inner, Stage::Catalog, Operation::ListDatabases)
        };

        let result = self.api.list_databases().await;

        let mut inner = self.inner.write().await;
        self.settle(&mut inner, ticket, Operation::ListDatabases, result, |view, databases| {
            info!(count = databases.len(), "catalog loaded");
            view.catalog = Some(databases);
            if view.stage == WizardStage::Init {
                view.stage = WizardStage::CatalogReady;
            }
        });
    }

    /// Sets the file handle for the next upload.
    pub async fn choose_file(&self, file: UploadFile) {
        debug!(file = %file.file_name, "file chosen");
        self.inner.write().await.view.pending_file = Some(file);
    }

    /// Drops the pending file handle.
    pub async fn remove_file(&self) {
        self.inner.write().await.view.pending_file = None;
    }

    /// Uploads the pending file. No-op when none is pending.
    ///
    /// The pending handle is consumed whatever the outcome; on success the
    /// catalog is replaced and the wizard returns to `CatalogReady`.
    pub async fn upload_database(&self) {
        let (ticket, file) = {
            let mut inner = self.inner.write().await;
            let Some(file) = inner.view.pending_file.take() else {
                debug!("upload requested without a file");
                return;
            };
            if let Err(err) = file.check() {
                self.report(Operation::Upload, &err);
                return;
            }
            (self.issue(&mut inner, Stage::Upload, Operation::Upload), file)
        };

        info!(file = %file.file_name, size = file.len(), "uploading database");
        let result = self.api.upload_database(file).await;

        let mut inner = self.inner.write().await;
        let applied = self.settle(&mut inner, ticket, Operation::Upload, result, |view, databases| {
            view.catalog = Some(databases);
            view.selection.clear();
            view.show_table = false;
            view.stage = WizardStage::CatalogReady;
        });
        if applied {
            // listings issued before the upload finished are older than this catalog
            inner.tickets.invalidate(Stage::Catalog);
            invalidate_selection_streams(&mut inner.tickets);
        }
    }

    /// Step 1: a database was picked. Empty input is ignored.
    pub async fn select_database(&self, database: Option<&str>) {
        let Some(database) = non_empty(database) else {
            debug!("empty database selection ignored");
            return;
        };

        let ticket = {
            let mut inner = self.inner.write().await;
            let Inner { view, tickets } = &mut *inner;
            view.selection.choose_database(database.clone());
            view.columns = None;
            view.summary = None;
            view.show_table = false;
            view.stage = WizardStage::TablesLoading;
            tickets.invalidate(Stage::Columns);
            tickets.invalidate(Stage::Data);
            self.issue(&mut inner, Stage::Tables, Operation::ListTables)
        };

        info!(database = %database, "listing tables");
        let result = self.api.list_tables(&database).await;

        let mut inner = self.inner.write().await;
        self.settle(&mut inner, ticket, Operation::ListTables, result, |view, tables| {
            view.tables = Some(tables);
            if view.stage == WizardStage::TablesLoading {
                view.stage = WizardStage::TableSelectable;
            }
        });
    }

    /// Step 2: a table was picked. Ignored when empty or no database is chosen.
    pub async fn select_table(&self, table: Option<&str>) {
        let Some(table) = non_empty(table) else {
            debug!("empty table selection ignored");
            return;
        };

        let (ticket, database) = {
            let mut inner = self.inner.write().await;
            let Some(database) = inner.view.selection.database().map(str::to_string) else {
                debug!(table = %table, "table selected before any database, ignored");
                return;
            };
            let Inner { view, tickets } = &mut *inner;
            view.selection.choose_table(table.clone());
            view.summary = None;
            view.show_table = false;
            view.stage = WizardStage::ColumnsLoading;
            tickets.invalidate(Stage::Data);
            (self.issue(&mut inner, Stage::Columns, Operation::ListColumns), database)
        };

        info!(database = %database, table = %table, "listing columns");
        let result = self.api.list_columns(&database, &table).await;

        let mut inner = self.inner.write().await;
        self.settle(&mut inner, ticket, Operation::ListColumns, result, |view, columns| {
            view.columns = Some(columns);
            if view.stage == WizardStage::ColumnsLoading {
                view.stage = WizardStage::ColumnSelectable;
            }
        });
    }

    /// Step 3: a column was picked. Ignored when empty or no table is chosen.
    pub async fn select_column(&self, column: Option<&str>) {
        let Some(column) = non_empty(column) else {
            debug!("empty column selection ignored");
            return;
        };

        let (ticket, database, table) = {
            let mut inner = self.inner.write().await;
            let selection = &inner.view.selection;
            let (Some(database), Some(table)) = (
                selection.database().map(str::to_string),
                selection.table().map(str::to_string),
            ) else {
                debug!(column = %column, "column selected before any table, ignored");
                return;
            };
            let view = &mut inner.view;
            view.selection.choose_column(column.clone());
            view.summary = None;
            view.show_table = false;
            view.stage = WizardStage::DataLoading;
            (self.issue(&mut inner, Stage::Data, Operation::ColumnData), database, table)
        };

        info!(database = %database, table = %table, column = %column, "fetching column data");
        let result = self.api.column_data(&database, &table, &column).await;

        let mut inner = self.inner.write().await;
        self.settle(&mut inner, ticket, Operation::ColumnData, result, |view, summary| {
            view.summary = Some(summary);
            view.show_table = true;
            view.stage = WizardStage::DataShown;
        });
    }

    /// Clears the selection and hides the data view.
    ///
    /// Catalog, table and column lists are kept; in-flight selection
    /// requests are superseded.
    pub async fn reset(&self) {
        let mut inner = self.inner.write().await;
        let Inner { view, tickets } = &mut *inner;
        view.selection.clear();
        view.show_table = false;
        view.stage = view.base_stage();
        invalidate_selection_streams(tickets);
        debug!(stage = %view.stage, "wizard reset");
    }

    fn issue(&self, inner: &mut Inner, stage: Stage, op: Operation) -> Ticket {
        if self.policies.get(op).show_busy {
            inner.view.raise_busy();
        }
        inner.tickets.issue(stage)
    }

    /// Applies a response if its ticket is still current.
    ///
    /// The busy indicator is lowered either way. On failure the wizard falls
    /// back to the stage preceding the request, unless a deeper step has
    /// started since. A failed upload is always reported, stale or not.
    /// Returns whether `apply` ran.
    fn settle<T>(
        &self,
        inner: &mut Inner,
        ticket: Ticket,
        op: Operation,
        result: AppResult<T>,
        apply: impl FnOnce(&mut ViewState, T),
    ) -> bool {
        if self.policies.get(op).show_busy {
            inner.view.lower_busy();
        }

        if !inner.tickets.is_current(ticket) {
            match &result {
                Ok(_) => debug!(operation = %op, seq = ticket.seq, "stale response discarded"),
                Err(err) if op == Operation::Upload => self.report(op, err),
                Err(err) => warn!(operation = %op, seq = ticket.seq, error = %err, "stale request failed"),
            }
            return false;
        }

        match result {
            Ok(value) => {
                apply(&mut inner.view, value);
                true
            }
            Err(err) => {
                let view = &mut inner.view;
                let fallback = match op {
                    Operation::ListTables => Some((WizardStage::TablesLoading, view.base_stage())),
                    Operation::ListColumns => {
                        Some((WizardStage::ColumnsLoading, WizardStage::TableSelectable))
                    }
                    Operation::ColumnData => {
                        view.show_table = false;
                        Some((WizardStage::DataLoading, WizardStage::ColumnSelectable))
                    }
                    Operation::ListDatabases | Operation::Upload => None,
                };
                // a deeper step issued meanwhile owns the stage
                if let Some((loading, settled)) = fallback {
                    if view.stage == loading {
                        view.stage = settled;
                    }
                }
                self.report(op, &err);
                false
            }
        }
    }

    fn report(&self, op: Operation, err: &AppError) {
        error!(operation = %op, status = ?err.status(), error = %err, "request failed");
        if self.policies.get(op).alerts() {
            self.alerts.alert(Alert::new(op, err.user_message()));
        }
    }
}

fn invalidate_selection_streams(tickets: &mut RequestTickets) {
    tickets.invalidate(Stage::Tables);
    tickets.invalidate(Stage::Columns);
    tickets.invalidate(Stage::Data);
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

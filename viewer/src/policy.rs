//! Per-operation failure policy.
//!
//! One table decides, for every remote operation, whether the busy
//! indicator is raised while it runs and how a failure is surfaced.

use std::fmt;

use common::config::AppConfig;

/// Remote operations issued by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListDatabases,
    Upload,
    ListTables,
    ListColumns,
    ColumnData,
}

impl Operation {
    /// Every operation, in wizard order.
    pub const ALL: [Operation; 5] = [
        Operation::ListDatabases,
        Operation::Upload,
        Operation::ListTables,
        Operation::ListColumns,
        Operation::ColumnData,
    ];

    fn index(self) -> usize {
        match self {
            Operation::ListDatabases => 0,
            Operation::Upload => 1,
            Operation::ListTables => 2,
            Operation::ListColumns => 3,
            Operation::ColumnData => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::ListDatabases => "list_databases",
            Operation::Upload => "upload_database",
            Operation::ListTables => "list_tables",
            Operation::ListColumns => "list_columns",
            Operation::ColumnData => "column_data",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a failure reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSurface {
    /// Diagnostics log only.
    Log,
    /// Log, then raise a blocking alert with the error message.
    LogAndAlert,
}

/// Policy applied to one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePolicy {
    pub on_error: ErrorSurface,
    pub show_busy: bool,
}

impl FailurePolicy {
    pub const fn new(on_error: ErrorSurface, show_busy: bool) -> Self {
        Self {
            on_error,
            show_busy,
        }
    }

    pub fn alerts(&self) -> bool {
        self.on_error == ErrorSurface::LogAndAlert
    }
}

/// Policies for all operations.
///
/// The default raises the busy indicator for uploads and column data (the
/// two slow calls) and alerts on every failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: [FailurePolicy; 5],
}

impl Default for PolicyTable {
    fn default() -> Self {
        let mut table = Self::uniform(FailurePolicy::new(ErrorSurface::LogAndAlert, false));
        table.policies[Operation::Upload.index()].show_busy = true;
        table.policies[Operation::ColumnData.index()].show_busy = true;
        table
    }
}

impl PolicyTable {
    /// Same policy for every operation.
    pub fn uniform(policy: FailurePolicy) -> Self {
        Self {
            policies: [policy; 5],
        }
    }

    /// Builds the table from configuration flags.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut table = Self::default();
        let surface = if config.alert_on_error {
            ErrorSurface::LogAndAlert
        } else {
            ErrorSurface::Log
        };
        for op in Operation::ALL {
            let policy = &mut table.policies[op.index()];
            policy.on_error = surface;
            if config.busy_on_listings {
                policy.show_busy = true;
            }
        }
        table
    }

    /// Replaces the policy of one operation.
    pub fn with(mut self, op: Operation, policy: FailurePolicy) -> Self {
        self.policies[op.index()] = policy;
        self
    }

    pub fn get(&self, op: Operation) -> FailurePolicy {
        self.policies[op.index()]
    }
}

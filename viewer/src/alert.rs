//! User-facing alerts.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::policy::Operation;

/// An error surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Operation that failed.
    pub operation: Operation,
    /// Message shown verbatim.
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
            raised_at: Utc::now(),
        }
    }
}

/// Receiver of alerts; the rendering layer decides how to show them.
pub trait AlertSink: Send + Sync {
    fn alert(&self, alert: Alert);
}

/// Collects alerts until the front-end drains them.
#[derive(Debug, Default)]
pub struct AlertQueue {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued alert, oldest first.
    pub fn drain(&self) -> Vec<Alert> {
        match self.alerts.lock() {
            Ok(mut alerts) => std::mem::take(&mut *alerts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for AlertQueue {
    fn alert(&self, alert: Alert) {
        match self.alerts.lock() {
            Ok(mut alerts) => alerts.push(alert),
            Err(poisoned) => poisoned.into_inner().push(alert),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_returns_in_order_and_empties() {
        let queue = AlertQueue::new();
        queue.alert(Alert::new(Operation::ListTables, "database does not exist"));
        queue.alert(Alert::new(Operation::Upload, "extension error"));
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained[0].operation, Operation::ListTables);
        assert_eq!(drained[1].message, "extension error");
        assert!(drained[0].raised_at <= drained[1].raised_at);
        assert!(queue.is_empty());
    }
}

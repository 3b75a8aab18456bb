//! Wire models shared by the client and the wizard.

pub mod column;
pub mod database;
pub mod upload;

// Re-export commonly used types
pub use column::ColumnSummary;
pub use database::{ColumnList, DatabaseList, TableList};
pub use upload::{UploadFile, ALLOWED_EXTENSIONS};

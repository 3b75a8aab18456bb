//! Unique ID generator.
//!
//! Provides identifiers attached to outgoing requests.

use uuid::Uuid;

/// Generates unique identifiers for outgoing requests.
pub struct IdGenerator;

impl IdGenerator {
    /// Generates a unique request ID.
    ///
    /// # Returns
    /// A unique UUID string.
    pub fn request_id() -> String {
        Uuid::new_v4().to_string()
    }
}

//! Tests for the core board types.
//!
//! Tests are organized by domain:
//! - `column` - Column parsing, display and navigation
//! - `serialization` - Persisted placement format

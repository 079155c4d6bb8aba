//! Common types used throughout the i-vis core
//!
//! This module contains shared type definitions and type aliases
//! used across multiple modules.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Relation name → URI mapping attached to paginated results
pub type Links = HashMap<String, String>;

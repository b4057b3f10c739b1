//! Error types for the circuit sandbox.
//!
//! Simulation outcomes (no battery, open switch, undefined gate values) are
//! never errors. [`SandboxError`] covers only the genuine failures: rejected
//! placements, lookups of components that do not exist, and malformed saved
//! layouts.

use thiserror::Error;

/// Result type alias using [`SandboxError`].
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Unified error type for all sandbox operations.
#[derive(Error, Debug)]
pub enum SandboxError {
    // ============ Placement Errors ============
    /// Requested coordinates are NaN or infinite
    #[error("Position ({x}, {y}) is not a finite point")]
    InvalidPosition { x: f64, y: f64 },

    /// Snapped position lies inside the reserved component palette
    #[error("Position ({x}, {y}) lies inside the component panel")]
    PositionInPanel { x: f64, y: f64 },

    /// Snapped position collides with an already placed component
    #[error("Position ({x}, {y}) is already occupied")]
    PositionOccupied { x: f64, y: f64 },

    /// No component with this id is placed
    #[error("Component '{id}' not found")]
    ComponentNotFound { id: String },

    /// Toggle requested on something that is not a switch
    #[error("Component '{id}' is not a switch")]
    NotASwitch { id: String },

    // ============ Loading Errors ============
    /// Saved layout names a component type nobody knows
    #[error("Unknown component type '{component_type}' at index {index}")]
    UnknownComponentType {
        component_type: String,
        index: usize,
    },

    /// Saved layout mixes electrical and logic components
    #[error("Component type '{component_type}' at index {index} does not belong in a {expected} circuit")]
    WrongCircuitKind {
        component_type: String,
        index: usize,
        expected: &'static str,
    },

    /// Saved layout is not valid RON
    #[error("Failed to decode layout: {message}")]
    Decode { message: String },

    /// Layout could not be encoded
    #[error("Failed to encode layout: {message}")]
    Encode { message: String },

    // ============ I/O Errors ============
    /// Error reading a layout file
    #[error("Failed to read layout file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl SandboxError {
    /// Create a component-not-found error
    pub fn not_found(id: impl ToString) -> Self {
        Self::ComponentNotFound { id: id.to_string() }
    }

    /// Create an unknown component type error
    pub fn unknown_type(component_type: impl Into<String>, index: usize) -> Self {
        Self::UnknownComponentType {
            component_type: component_type.into(),
            index,
        }
    }

    /// Create a wrong circuit kind error
    pub fn wrong_kind(
        component_type: impl Into<String>,
        index: usize,
        expected: &'static str,
    ) -> Self {
        Self::WrongCircuitKind {
            component_type: component_type.into(),
            index,
            expected,
        }
    }
}

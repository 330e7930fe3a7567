//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! seiri crate. Import it to get access to the core functionality without
//! having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use seiri::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph_json = std::fs::read_to_string("path/to/graph.json")?;
//! let graph: UiGraph = serde_json::from_str(&graph_json)?;
//!
//! let engine = FlowEngine::builder().build();
//! match engine.convert(graph)? {
//!     ConversionOutcome::Converged(converged) => {
//!         println!("{} nodes positioned", converged.positions.len());
//!     }
//!     ConversionOutcome::Exhausted { report, .. } => {
//!         for error in &report.errors {
//!             eprintln!("{}", error);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Engine and configuration
pub use crate::engine::{
    ConversionOutcome, ConvergedGraph, EngineConfig, EngineReport, FlowEngine,
};
pub use crate::layout::{LayoutConfig, Position};

// Node and connection model
pub use crate::graph::{
    Connection, ConnectionKind, DraftNode, EndStatus, FindingCode, IntoSymbolicFlow, NodeKind,
    NodeRole, PathClass, Severity, SymbolicNode, ValidationFinding,
};

// Pipeline stages, usable standalone
pub use crate::connect::synthesize_connections;
pub use crate::layout::assign_positions;
pub use crate::normalize::{Normalized, normalize_references};
pub use crate::repair::{RepairOutcome, repair};
pub use crate::validate::{Validation, validate};

// Upstream payload shape
pub use crate::ui::{UiGraph, UiNode};

// Error types
pub use crate::error::{ConversionError, EngineError, InputError};

// Standard library re-exports commonly used with this crate
pub use std::collections::BTreeMap;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

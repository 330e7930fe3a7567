//! # Seiri - Symbolic Flow Graph Engine
//!
//! **Seiri** turns the messy node batches an AI-driven synthesis step emits
//! into structurally sound workflow graphs: unambiguous identifiers, fully
//! resolved edges, no orphaned or cyclic paths, and deterministic 2-D layout
//! coordinates. It sits between an upstream synthesis collaborator and a
//! downstream rendering/persistence collaborator and guarantees that
//! whatever graph it is given comes out well-formed, fully linked and
//! positioned.
//!
//! ## Core Workflow
//!
//! 1. **Load Your Data**: Parse the synthesis payload (see [`ui::UiGraph`])
//!    or build [`graph::DraftNode`] values from your own format by
//!    implementing the [`graph::IntoSymbolicFlow`] trait.
//! 2. **Convert**: Run [`engine::FlowEngine::convert`]. The engine
//!    normalizes references, validates the structural invariants, applies a
//!    bounded set of deterministic repairs, synthesizes connections and
//!    assigns positions.
//! 3. **Inspect the outcome**: a
//!    [`engine::ConversionOutcome::Converged`] graph is ready for the
//!    rendering layer; `Exhausted` hands back the best-effort graph with
//!    the remaining errors and every fix that was already applied.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seiri::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut trigger = DraftNode::new("incoming_order", NodeKind::Trigger, "Incoming order");
//!     // A positional reference: "2" means the second node in the batch.
//!     trigger.next_on_success = Some("2".to_string());
//!
//!     let mut check = DraftNode::new("check_stock", NodeKind::Action, "Check stock");
//!     check.next_on_success = Some("done".to_string());
//!
//!     let mut done = DraftNode::new("done", NodeKind::End, "Done");
//!     done.end_status = Some(EndStatus::Success);
//!
//!     let engine = FlowEngine::builder().build();
//!     match engine.convert(vec![trigger, check, done])? {
//!         ConversionOutcome::Converged(graph) => {
//!             for connection in &graph.connections {
//!                 println!("{} -> {}", connection.source_id, connection.target_id);
//!             }
//!             for (id, position) in &graph.positions {
//!                 println!("{} at ({}, {})", id, position.x, position.y);
//!             }
//!         }
//!         ConversionOutcome::Exhausted { report, .. } => {
//!             eprintln!("graph could not be repaired:");
//!             for error in &report.errors {
//!                 eprintln!("  {}", error);
//!             }
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod artifact;
pub mod connect;
pub mod engine;
pub mod error;
pub mod graph;
pub mod layout;
pub mod normalize;
pub mod prelude;
pub mod repair;
pub mod ui;
pub mod validate;

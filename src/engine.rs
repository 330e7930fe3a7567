//! Pipeline orchestration.
//!
//! `FlowEngine` drives one stateless conversion: normalize references,
//! validate, repair under a hard pass cap, then synthesize edges, assign
//! positions and finalize the node shapes. The validate/repair loop is an
//! explicit state machine so the iteration bound is visible in one place.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::connect::synthesize_connections;
use crate::error::{EngineError, InputError};
use crate::graph::{
    Connection, DraftNode, IntoSymbolicFlow, SymbolicNode, ValidationFinding,
};
use crate::layout::{LayoutConfig, Position, assign_positions};
use crate::normalize::normalize_references;
use crate::repair::repair;
use crate::validate::{Validation, validate};

/// Caller-supplied engine parameters. Everything has a documented default;
/// no environment-dependent behavior exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    /// Hard cap on validate/repair iterations.
    pub max_repair_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            max_repair_passes: 2,
        }
    }
}

/// Everything the engine observed and changed while converging a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineReport {
    /// Structural errors still present. Empty on a converged graph.
    pub errors: Vec<ValidationFinding>,
    /// Normalization and validation warnings. Never block.
    pub warnings: Vec<ValidationFinding>,
    /// Human-readable notes, one per applied autofix.
    pub fixes_applied: Vec<String>,
}

/// A structurally sound graph, ready for rendering and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergedGraph {
    pub nodes: Vec<SymbolicNode>,
    pub connections: Vec<Connection>,
    pub positions: BTreeMap<String, Position>,
    pub report: EngineReport,
}

/// Result of a conversion. `Exhausted` is the terminal failure state: the
/// repair budget is spent, the best-effort graph and the remaining errors
/// are handed back for the caller to decide on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConversionOutcome {
    Converged(ConvergedGraph),
    Exhausted {
        nodes: Vec<DraftNode>,
        report: EngineReport,
    },
}

impl ConversionOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, ConversionOutcome::Converged(_))
    }

    pub fn report(&self) -> &EngineReport {
        match self {
            ConversionOutcome::Converged(graph) => &graph.report,
            ConversionOutcome::Exhausted { report, .. } => report,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Validating,
    Repairing,
    Converged,
    Failed,
}

pub struct FlowEngineBuilder {
    config: EngineConfig,
}

impl FlowEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn with_max_repair_passes(mut self, passes: usize) -> Self {
        self.config.max_repair_passes = passes;
        self
    }

    pub fn build(self) -> FlowEngine {
        FlowEngine {
            config: self.config,
        }
    }
}

impl Default for FlowEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The conversion pipeline. Stateless: every call is independent.
pub struct FlowEngine {
    config: EngineConfig,
}

impl FlowEngine {
    pub fn builder() -> FlowEngineBuilder {
        FlowEngineBuilder::new()
    }

    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Converts any caller format that implements [`IntoSymbolicFlow`].
    pub fn convert<F: IntoSymbolicFlow>(&self, input: F) -> Result<ConversionOutcome, EngineError> {
        let nodes = input.into_symbolic_flow()?;
        self.convert_nodes(nodes).map_err(EngineError::from)
    }

    /// Runs the full pipeline over a draft node sequence.
    ///
    /// Only malformed input is an `Err`; structural problems come back as
    /// findings inside the outcome.
    pub fn convert_nodes(&self, nodes: Vec<DraftNode>) -> Result<ConversionOutcome, InputError> {
        check_input_shape(&nodes)?;

        let normalized = normalize_references(nodes);
        let mut nodes = normalized.nodes;
        let mut warnings = normalized.warnings;
        let mut fixes_applied: Vec<String> = Vec::new();
        let mut passes = 0usize;

        let mut validation = validate(&nodes);
        let mut phase = after_validation(&validation, passes, self.config.max_repair_passes);

        loop {
            match phase {
                Phase::Validating => {
                    validation = validate(&nodes);
                    phase = after_validation(&validation, passes, self.config.max_repair_passes);
                }
                Phase::Repairing => {
                    passes += 1;
                    debug!(pass = passes, errors = validation.errors.len(), "repairing graph");
                    let outcome = repair(nodes, &validation);
                    nodes = outcome.nodes;
                    if outcome.fixes.is_empty() {
                        // No strategy applied; re-validating cannot change
                        // the verdict.
                        phase = Phase::Failed;
                    } else {
                        fixes_applied.extend(outcome.fixes);
                        phase = Phase::Validating;
                    }
                }
                Phase::Converged | Phase::Failed => break,
            }
        }

        warnings.extend(validation.warnings);

        if phase == Phase::Failed {
            debug!(
                passes,
                remaining = validation.errors.len(),
                "repair budget exhausted"
            );
            return Ok(ConversionOutcome::Exhausted {
                nodes,
                report: EngineReport {
                    errors: validation.errors,
                    warnings,
                    fixes_applied,
                },
            });
        }

        let connections = synthesize_connections(&nodes);
        let positions = assign_positions(&nodes, &connections, &self.config.layout);

        match finalize_nodes(nodes.clone()) {
            Ok(symbolic) => {
                debug!(
                    nodes = symbolic.len(),
                    connections = connections.len(),
                    passes,
                    "graph converged"
                );
                Ok(ConversionOutcome::Converged(ConvergedGraph {
                    nodes: symbolic,
                    connections,
                    positions,
                    report: EngineReport {
                        errors: Vec::new(),
                        warnings,
                        fixes_applied,
                    },
                }))
            }
            Err(findings) => Ok(ConversionOutcome::Exhausted {
                nodes,
                report: EngineReport {
                    errors: findings,
                    warnings,
                    fixes_applied,
                },
            }),
        }
    }
}

fn after_validation(validation: &Validation, passes: usize, cap: usize) -> Phase {
    if validation.is_valid() {
        Phase::Converged
    } else if passes < cap {
        Phase::Repairing
    } else {
        Phase::Failed
    }
}

/// Basic shape requirements, rejected before any pipeline stage runs.
fn check_input_shape(nodes: &[DraftNode]) -> Result<(), InputError> {
    for (position, node) in nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(InputError::MissingId { position });
        }
        if node.title.trim().is_empty() {
            return Err(InputError::MissingTitle {
                node_id: node.id.clone(),
            });
        }
    }
    if let Some(duplicate) = nodes.iter().map(|node| node.id.as_str()).duplicates().next() {
        return Err(InputError::DuplicateId(duplicate.to_owned()));
    }
    Ok(())
}

/// Converts drafts into the validated output shape. Runs only after
/// validation reported zero errors, so a failure here means the validator
/// and the role invariants disagree; the findings are surfaced rather than
/// swallowed.
fn finalize_nodes(drafts: Vec<DraftNode>) -> Result<Vec<SymbolicNode>, Vec<ValidationFinding>> {
    let mut symbolic = Vec::with_capacity(drafts.len());
    let mut findings = Vec::new();
    for draft in drafts {
        match SymbolicNode::from_draft(draft) {
            Ok(node) => symbolic.push(node),
            Err(finding) => findings.push(finding),
        }
    }
    if findings.is_empty() {
        Ok(symbolic)
    } else {
        Err(findings)
    }
}

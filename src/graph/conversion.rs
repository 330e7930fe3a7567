use crate::error::ConversionError;
use crate::graph::node::DraftNode;

/// A trait for custom data models that can be converted into the engine's
/// draft node sequence.
///
/// This is the extension point that keeps the engine format-agnostic: the
/// upstream synthesis collaborator's payload (see [`crate::ui`]) implements
/// it, and so can any caller-defined format.
///
/// # Example
///
/// ```rust,no_run
/// use seiri::error::ConversionError;
/// use seiri::graph::{DraftNode, IntoSymbolicFlow, NodeKind};
///
/// struct MyStep { id: String, label: String }
/// struct MyWorkflow { steps: Vec<MyStep> }
///
/// impl IntoSymbolicFlow for MyWorkflow {
///     fn into_symbolic_flow(self) -> Result<Vec<DraftNode>, ConversionError> {
///         Ok(self
///             .steps
///             .into_iter()
///             .map(|step| DraftNode::new(step.id, NodeKind::Action, step.label))
///             .collect())
///     }
/// }
/// ```
pub trait IntoSymbolicFlow {
    /// Consumes the object and converts it into a draft node sequence.
    fn into_symbolic_flow(self) -> Result<Vec<DraftNode>, ConversionError>;
}

impl IntoSymbolicFlow for Vec<DraftNode> {
    fn into_symbolic_flow(self) -> Result<Vec<DraftNode>, ConversionError> {
        Ok(self)
    }
}

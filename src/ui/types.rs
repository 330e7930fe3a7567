use serde::Deserialize;

/// A node as emitted by the synthesis collaborator. Field names follow the
/// editor's camelCase payload; kinds, statuses and path classes arrive as
/// loose strings and are reduced during conversion.
#[derive(Debug, Deserialize, Clone)]
pub struct UiNode {
    pub id: String,
    #[serde(alias = "type", alias = "nodeType")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "nextOnSuccess", alias = "next")]
    pub next_on_success: Option<String>,
    #[serde(default, alias = "nextOnFailure")]
    pub next_on_failure: Option<String>,
    #[serde(default, alias = "endStatus")]
    pub end_status: Option<String>,
    #[serde(default, alias = "pathClass", alias = "flowCategory")]
    pub path_class: Option<String>,
    #[serde(default, alias = "correlationId", alias = "storageId")]
    pub correlation_id: Option<String>,
    #[serde(default, alias = "connectionType", alias = "connectionLabel")]
    pub link_hint: Option<String>,
}

/// Complete synthesis payload.
#[derive(Debug, Deserialize, Clone)]
pub struct UiGraph {
    pub nodes: Vec<UiNode>,
}

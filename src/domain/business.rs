//! Business lines and their workflow / organisation designs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::{
    BusinessDesignId, BusinessId, CompanyName, Title, TypeConstraintError, UserId, non_blank,
    string_enum,
};

string_enum!(BusinessStatus, "business status", {
    Planning => "planning",
    Active => "active",
    Paused => "paused",
    Closed => "closed",
});

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub id: BusinessId,
    pub name: CompanyName,
    pub description: Option<String>,
    pub status: BusinessStatus,
    pub owner_id: Option<UserId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBusiness {
    pub name: CompanyName,
    pub description: Option<String>,
    pub status: BusinessStatus,
    pub owner_id: Option<UserId>,
}

impl NewBusiness {
    #[must_use]
    pub fn new(
        name: CompanyName,
        description: Option<String>,
        status: BusinessStatus,
        owner_id: Option<UserId>,
    ) -> Self {
        Self {
            name,
            description: non_blank(description),
            status,
            owner_id,
        }
    }
}

pub type UpdateBusiness = NewBusiness;

/// Node/edge graph drawn in the workflow or org-chart editor.
///
/// The editor owns the node payloads; the server only checks the outer shape
/// and that every edge points at existing nodes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Value", into = "Value")]
pub struct Diagram(Value);

impl Diagram {
    pub fn empty() -> Self {
        Self(serde_json::json!({ "nodes": [], "edges": [] }))
    }

    pub fn new(value: Value) -> Result<Self, TypeConstraintError> {
        let invalid = |msg: &str| TypeConstraintError::InvalidValue(msg.to_string());

        let nodes = value
            .get("nodes")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("diagram.nodes must be an array"))?;
        let edges = value
            .get("edges")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("diagram.edges must be an array"))?;

        let node_ids = nodes
            .iter()
            .map(|node| node.get("id").map(Value::to_string))
            .collect::<Option<Vec<String>>>()
            .ok_or_else(|| invalid("every node needs an id"))?;

        for edge in edges {
            let source = edge.get("source").map(Value::to_string);
            let target = edge.get("target").map(Value::to_string);
            match (source, target) {
                (Some(s), Some(t)) if node_ids.contains(&s) && node_ids.contains(&t) => {}
                _ => return Err(invalid("edge references an unknown node")),
            }
        }

        Ok(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn node_count(&self) -> usize {
        self.0["nodes"].as_array().map_or(0, Vec::len)
    }
}

impl TryFrom<Value> for Diagram {
    type Error = TypeConstraintError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Diagram> for Value {
    fn from(value: Diagram) -> Self {
        value.0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BusinessDesign {
    pub id: BusinessDesignId,
    pub business_id: Option<BusinessId>,
    pub title: Title,
    pub diagram: Diagram,
    pub created_by: UserId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewBusinessDesign {
    pub business_id: Option<BusinessId>,
    pub title: Title,
    pub diagram: Diagram,
    pub created_by: UserId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateBusinessDesign {
    pub business_id: Option<BusinessId>,
    pub title: Title,
    pub diagram: Diagram,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn diagram_accepts_connected_graph() {
        let diagram = Diagram::new(json!({
            "nodes": [{"id": "ceo", "label": "代表"}, {"id": "sales", "label": "営業"}],
            "edges": [{"source": "ceo", "target": "sales"}]
        }))
        .expect("valid diagram");
        assert_eq!(diagram.node_count(), 2);
    }

    #[test]
    fn diagram_rejects_dangling_edges() {
        let result = Diagram::new(json!({
            "nodes": [{"id": 1}],
            "edges": [{"source": 1, "target": 2}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn diagram_requires_arrays() {
        assert!(Diagram::new(json!({"nodes": {}})).is_err());
        assert_eq!(Diagram::empty().node_count(), 0);
    }
}

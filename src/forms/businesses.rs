use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::domain::business::{
    BusinessStatus, Diagram, NewBusiness, NewBusinessDesign, UpdateBusinessDesign,
};
use crate::domain::types::{CompanyName, Title, UserId};
use crate::forms::{FormError, optional_id, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BusinessForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub owner_id: Option<i32>,
}

impl TryFrom<BusinessForm> for NewBusiness {
    type Error = FormError;

    fn try_from(form: BusinessForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        Ok(NewBusiness::new(
            CompanyName::new(form.name)?,
            form.description,
            parse_or(form.status, BusinessStatus::Planning)?,
            optional_id(form.owner_id)?,
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
/// Business design body; `diagram` is the `{nodes, edges}` graph drawn in the
/// editor and defaults to an empty graph.
pub struct BusinessDesignForm {
    pub business_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub diagram: Option<Value>,
}

impl TryFrom<BusinessDesignForm> for UpdateBusinessDesign {
    type Error = FormError;

    fn try_from(form: BusinessDesignForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        let diagram = match form.diagram {
            Some(Value::Null) | None => Diagram::empty(),
            Some(value) => Diagram::new(value)?,
        };
        Ok(UpdateBusinessDesign {
            business_id: optional_id(form.business_id)?,
            title: Title::new(form.title)?,
            diagram,
        })
    }
}

impl BusinessDesignForm {
    pub fn into_new_design(self, created_by: UserId) -> Result<NewBusinessDesign, FormError> {
        let design = UpdateBusinessDesign::try_from(self)?;
        Ok(NewBusinessDesign {
            business_id: design.business_id,
            title: design.title,
            diagram: design.diagram,
            created_by,
        })
    }
}

/// `?business_id=` filter for designs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessDesignFilter {
    pub business_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_diagram_becomes_empty_graph() {
        let form = BusinessDesignForm {
            business_id: None,
            title: "組織図".into(),
            diagram: None,
        };
        let design = form.into_new_design(UserId::new(1).unwrap()).unwrap();
        assert_eq!(design.diagram, Diagram::empty());
    }

    #[test]
    fn malformed_diagram_is_rejected() {
        let form = BusinessDesignForm {
            business_id: Some(1),
            title: "収益モデル".into(),
            diagram: Some(json!({ "nodes": "x" })),
        };
        assert!(UpdateBusinessDesign::try_from(form).is_err());
    }
}

//! Diesel models for businesses and their design diagrams.
//!
//! Diagrams are stored as JSON text and validated again when loaded.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::business::{
    Business as DomainBusiness, BusinessDesign as DomainBusinessDesign, Diagram,
    NewBusiness as DomainNewBusiness, NewBusinessDesign as DomainNewBusinessDesign,
    UpdateBusinessDesign as DomainUpdateBusinessDesign,
};
use crate::domain::types::{
    BusinessDesignId, BusinessId, CompanyName, Title, TypeConstraintError, UserId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::businesses)]
pub struct Business {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub owner_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::businesses)]
#[diesel(treat_none_as_null = true)]
pub struct NewBusiness<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub owner_id: Option<i32>,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::business_designs)]
pub struct BusinessDesign {
    pub id: i32,
    pub business_id: Option<i32>,
    pub title: String,
    pub diagram: String,
    pub created_by: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::business_designs)]
pub struct NewBusinessDesign<'a> {
    pub business_id: Option<i32>,
    pub title: &'a str,
    pub diagram: String,
    pub created_by: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::business_designs)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateBusinessDesign<'a> {
    pub business_id: Option<i32>,
    pub title: &'a str,
    pub diagram: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Business> for DomainBusiness {
    type Error = TypeConstraintError;

    fn try_from(row: Business) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BusinessId::new(row.id)?,
            name: CompanyName::new(row.name)?,
            description: row.description,
            status: row.status.parse()?,
            owner_id: row.owner_id.map(UserId::new).transpose()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBusiness> for NewBusiness<'a> {
    fn from(business: &'a DomainNewBusiness) -> Self {
        Self {
            name: business.name.as_str(),
            description: business.description.as_deref(),
            status: business.status.as_str(),
            owner_id: business.owner_id.map(UserId::get),
        }
    }
}

fn parse_diagram(raw: &str) -> Result<Diagram, TypeConstraintError> {
    let value = serde_json::from_str(raw)
        .map_err(|e| TypeConstraintError::InvalidValue(format!("stored diagram is not JSON: {e}")))?;
    Diagram::new(value)
}

impl TryFrom<BusinessDesign> for DomainBusinessDesign {
    type Error = TypeConstraintError;

    fn try_from(row: BusinessDesign) -> Result<Self, Self::Error> {
        Ok(Self {
            id: BusinessDesignId::new(row.id)?,
            business_id: row.business_id.map(BusinessId::new).transpose()?,
            title: Title::new(row.title)?,
            diagram: parse_diagram(&row.diagram)?,
            created_by: UserId::new(row.created_by)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewBusinessDesign> for NewBusinessDesign<'a> {
    fn from(design: &'a DomainNewBusinessDesign) -> Self {
        Self {
            business_id: design.business_id.map(BusinessId::get),
            title: design.title.as_str(),
            diagram: design.diagram.as_value().to_string(),
            created_by: design.created_by.get(),
        }
    }
}

impl<'a> UpdateBusinessDesign<'a> {
    pub fn new(design: &'a DomainUpdateBusinessDesign, now: NaiveDateTime) -> Self {
        Self {
            business_id: design.business_id.map(BusinessId::get),
            title: design.title.as_str(),
            diagram: design.diagram.as_value().to_string(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn design_row(diagram: &str) -> BusinessDesign {
        let now = Utc::now().naive_utc();
        BusinessDesign {
            id: 1,
            business_id: None,
            title: "組織図".into(),
            diagram: diagram.into(),
            created_by: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stored_diagram_is_parsed() {
        let row = design_row(r#"{"nodes":[{"id":"a"}],"edges":[]}"#);
        let design = DomainBusinessDesign::try_from(row).expect("valid design");
        assert_eq!(design.diagram.node_count(), 1);
    }

    #[test]
    fn corrupt_diagram_is_rejected() {
        assert!(DomainBusinessDesign::try_from(design_row("not json")).is_err());
        assert!(DomainBusinessDesign::try_from(design_row("{}")).is_err());
    }
}

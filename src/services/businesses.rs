//! Business lines and their design diagrams.

use serde_json::Value;

use crate::domain::business::{Business, BusinessDesign, NewBusiness, UpdateBusinessDesign};
use crate::domain::role::Section;
use crate::domain::types::{BusinessDesignId, BusinessId};
use crate::forms::businesses::{BusinessDesignFilter, BusinessDesignForm, BusinessForm};
use crate::forms::optional_id;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{BusinessReader, BusinessWriter};
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section, merge_patch};

pub fn list_businesses<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Business>>
where
    R: BusinessReader + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;
    Ok(repo.list_businesses()?)
}

pub fn get_business<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<Business>
where
    R: BusinessReader + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;
    repo.get_business_by_id(BusinessId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_business<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BusinessForm,
) -> ServiceResult<Business>
where
    R: BusinessWriter + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;

    let new_business = NewBusiness::try_from(form)?;
    repo.create_business(&new_business).map_err(|err| {
        log::error!("Failed to create business: {err}");
        ServiceError::from(err)
    })
}

pub fn update_business<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: BusinessForm,
) -> ServiceResult<Business>
where
    R: BusinessWriter + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;

    let id = BusinessId::new(id)?;
    let updates = NewBusiness::try_from(form)?;
    repo.update_business(id, &updates).map_err(|err| {
        log::error!("Failed to update business {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_business<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<Business>
where
    R: BusinessReader + BusinessWriter + ?Sized,
{
    let current = get_business(repo, user, id)?;
    let form: BusinessForm = merge_patch(&current, patch)?;
    update_business(repo, user, id, form)
}

pub fn delete_business<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: BusinessWriter + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;

    let id = BusinessId::new(id)?;
    repo.delete_business(id).map_err(|err| {
        log::error!("Failed to delete business {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn list_designs<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filter: BusinessDesignFilter,
) -> ServiceResult<Vec<BusinessDesign>>
where
    R: BusinessReader + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;
    Ok(repo.list_business_designs(optional_id(filter.business_id)?)?)
}

pub fn get_design<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<BusinessDesign>
where
    R: BusinessReader + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;
    repo.get_business_design_by_id(BusinessDesignId::new(id)?)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_design<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: BusinessDesignForm,
) -> ServiceResult<BusinessDesign>
where
    R: BusinessWriter + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;

    let new_design = form.into_new_design(caller_id(user)?)?;
    repo.create_business_design(&new_design).map_err(|err| {
        log::error!("Failed to create business design: {err}");
        ServiceError::from(err)
    })
}

pub fn update_design<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: BusinessDesignForm,
) -> ServiceResult<BusinessDesign>
where
    R: BusinessWriter + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;

    let id = BusinessDesignId::new(id)?;
    let updates = UpdateBusinessDesign::try_from(form)?;
    repo.update_business_design(id, &updates).map_err(|err| {
        log::error!("Failed to update business design {id}: {err}");
        ServiceError::from(err)
    })
}

pub fn patch_design<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    patch: Value,
) -> ServiceResult<BusinessDesign>
where
    R: BusinessReader + BusinessWriter + ?Sized,
{
    let current = get_design(repo, user, id)?;
    let form: BusinessDesignForm = merge_patch(&current, patch)?;
    update_design(repo, user, id, form)
}

pub fn delete_design<R>(repo: &R, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>
where
    R: BusinessWriter + ?Sized,
{
    ensure_section(user, Section::BusinessDesigns)?;

    let id = BusinessDesignId::new(id)?;
    repo.delete_business_design(id).map_err(|err| {
        log::error!("Failed to delete business design {id}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::business::Diagram;
    use crate::domain::role::Role;
    use crate::domain::types::{Title, UserId};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{timestamp, user};

    fn design() -> BusinessDesign {
        BusinessDesign {
            id: BusinessDesignId::new(2).unwrap(),
            business_id: None,
            title: Title::new("業務フロー").unwrap(),
            diagram: Diagram::new(json!({
                "nodes": [{"id": "a"}, {"id": "b"}],
                "edges": [{"source": "a", "target": "b"}]
            }))
            .unwrap(),
            created_by: UserId::new(1).unwrap(),
            created_at: timestamp(),
            updated_at: timestamp(),
        }
    }

    #[test]
    fn design_is_owned_by_caller() {
        let mut repo = MockRepository::new();
        repo.expect_create_business_design()
            .withf(|new| new.created_by == UserId::new(6).unwrap())
            .times(1)
            .returning(|_| Ok(design()));

        let form: BusinessDesignForm =
            serde_json::from_value(json!({ "title": "業務フロー" })).unwrap();
        create_design(&repo, &user(6, Role::Manager), form).unwrap();
    }

    #[test]
    fn renaming_keeps_the_diagram() {
        let mut repo = MockRepository::new();
        repo.expect_get_business_design_by_id()
            .returning(|_| Ok(Some(design())));
        repo.expect_update_business_design()
            .withf(|_, updates| updates.diagram.node_count() == 2 && &*updates.title == "新フロー")
            .times(1)
            .returning(|_, _| Ok(design()));

        patch_design(&repo, &user(1, Role::Admin), 2, json!({ "title": "新フロー" })).unwrap();
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_create_business_design().never();

        let form: BusinessDesignForm = serde_json::from_value(json!({
            "title": "壊れた図",
            "diagram": { "nodes": [], "edges": [{ "source": "x", "target": "y" }] }
        }))
        .unwrap();
        let result = create_design(&repo, &user(1, Role::Admin), form);
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn staff_cannot_open_business_designs() {
        let repo = MockRepository::new();
        let result = list_businesses(&repo, &user(3, Role::Staff));
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}

//! Checks and bookkeeping around the AI generators.
//!
//! The HTTP call itself is async and lives in [`crate::ai`]; these services
//! validate the request before it leaves and store generated tasks after it
//! returns.

use serde_json::Value;
use validator::Validate;

use crate::domain::role::Section;
use crate::domain::task::{NewTask, Task, TaskPriority};
use crate::domain::types::{BusinessId, Title, UserId};
use crate::forms::ai::{
    AiSeoArticleRequest, AiStudyRequest, AiTaskRequest, AiTranslateRequest, GeneratedTask,
    GeneratedTasks,
};
use crate::forms::{FormError, optional_id};
use crate::models::auth::AuthenticatedUser;
use crate::repository::TaskWriter;
use crate::services::{ServiceError, ServiceResult, caller_id, ensure_section};

fn checked<T: Validate>(
    user: &AuthenticatedUser,
    section: Section,
    request: T,
) -> ServiceResult<T> {
    ensure_section(user, section)?;
    request.validate().map_err(FormError::from)?;
    Ok(request)
}

pub fn prepare_tasks(user: &AuthenticatedUser, request: AiTaskRequest) -> ServiceResult<AiTaskRequest> {
    let request = checked(user, Section::Tasks, request)?;
    optional_id::<BusinessId>(request.business_id)?;
    Ok(request)
}

pub fn prepare_study(
    user: &AuthenticatedUser,
    request: AiStudyRequest,
) -> ServiceResult<AiStudyRequest> {
    checked(user, Section::Study, request)
}

pub fn prepare_translation(
    user: &AuthenticatedUser,
    request: AiTranslateRequest,
) -> ServiceResult<AiTranslateRequest> {
    checked(user, Section::Translation, request)
}

pub fn prepare_seo_article(
    user: &AuthenticatedUser,
    request: AiSeoArticleRequest,
) -> ServiceResult<AiSeoArticleRequest> {
    checked(user, Section::SeoArticles, request)
}

/// Converts one suggestion, or `None` when it has no usable title.
fn suggestion_to_task(
    suggestion: GeneratedTask,
    created_by: UserId,
    business_id: Option<BusinessId>,
) -> Option<NewTask> {
    let title = Title::new(suggestion.title).ok()?;
    let priority = suggestion
        .priority
        .and_then(|raw| match raw.parse::<TaskPriority>() {
            Ok(priority) => Some(priority),
            Err(err) => {
                log::warn!("Ignoring AI task priority: {err}");
                None
            }
        })
        .unwrap_or(TaskPriority::Medium);

    let mut task = NewTask::new(title, priority, created_by).description(suggestion.description);
    task.business_id = business_id;
    task.due_date = suggestion.due_date;
    task.ai_generated = true;
    Some(task)
}

/// Stores the backend's task suggestions as tasks owned by the caller.
pub fn save_generated_tasks<R>(
    repo: &R,
    user: &AuthenticatedUser,
    business_id: Option<i32>,
    answer: &Value,
) -> ServiceResult<Vec<Task>>
where
    R: TaskWriter + ?Sized,
{
    ensure_section(user, Section::Tasks)?;

    let caller = caller_id(user)?;
    let business_id = optional_id::<BusinessId>(business_id)?;
    let generated: GeneratedTasks = serde_json::from_value(answer.clone()).map_err(|err| {
        log::error!("AI task answer has an unexpected shape: {err}");
        ServiceError::Upstream("AIの応答を読み取れませんでした".to_string())
    })?;

    let new_tasks: Vec<NewTask> = generated
        .tasks
        .into_iter()
        .filter_map(|suggestion| suggestion_to_task(suggestion, caller, business_id))
        .collect();
    if new_tasks.is_empty() {
        return Ok(Vec::new());
    }

    repo.create_tasks(&new_tasks).map_err(|err| {
        log::error!("Failed to store AI generated tasks: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::role::Role;
    use crate::services::test_support::user;

    #[test]
    fn client_cannot_generate_tasks() {
        let request: AiTaskRequest = serde_json::from_value(json!({ "prompt": "準備" })).unwrap();
        assert!(matches!(
            prepare_tasks(&user(7, Role::Client), request),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn empty_prompt_is_a_form_error() {
        let request: AiTaskRequest = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            prepare_tasks(&user(1, Role::Manager), request),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn staff_may_translate() {
        let request: AiTranslateRequest =
            serde_json::from_value(json!({ "text": "こんにちは" })).unwrap();
        assert!(prepare_translation(&user(2, Role::Staff), request).is_ok());
    }

    #[test]
    fn suggestions_become_flagged_tasks() {
        let suggestion = GeneratedTask {
            title: "物件の下見".into(),
            description: Some("候補3件".into()),
            priority: Some("urgent".into()),
            due_date: None,
        };
        let task = suggestion_to_task(suggestion, UserId::new(1).unwrap(), None).unwrap();
        assert!(task.ai_generated);
        assert_eq!(task.priority, TaskPriority::Medium);

        let untitled = GeneratedTask {
            title: " ".into(),
            description: None,
            priority: None,
            due_date: None,
        };
        assert!(suggestion_to_task(untitled, UserId::new(1).unwrap(), None).is_none());
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use serde_json::json;

    use super::*;
    use crate::domain::role::Role;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user;

    #[test]
    fn generated_tasks_are_inserted_together() {
        let mut repo = MockRepository::new();
        repo.expect_create_tasks()
            .withf(|tasks| tasks.len() == 2 && tasks.iter().all(|t| t.ai_generated))
            .times(1)
            .returning(|_| Ok(vec![]));

        let answer = json!({ "tasks": [
            { "title": "市場調査", "priority": "high" },
            { "title": "見積依頼" },
            { "title": "" }
        ]});
        save_generated_tasks(&repo, &user(1, Role::Manager), None, &answer).unwrap();
    }

    #[test]
    fn malformed_answer_is_an_upstream_error() {
        let mut repo = MockRepository::new();
        repo.expect_create_tasks().never();

        let result =
            save_generated_tasks(&repo, &user(1, Role::Manager), None, &json!({ "tasks": "none" }));
        assert!(matches!(result, Err(ServiceError::Upstream(_))));
    }
}

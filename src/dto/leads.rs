use crate::domain::lead::Lead;
use crate::pagination::Paginated;

/// Query parameters of the `/leads` page.
#[derive(Debug, Default, serde::Deserialize)]
pub struct LeadsQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the leads page.
pub struct LeadsPageData {
    pub leads: Paginated<Lead>,
    pub total: usize,
    pub search_query: Option<String>,
}

use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{CustomerStatus, NewCustomer};
use crate::domain::types::CompanyName;
use crate::forms::{FormError, optional_email, optional_id, optional_phone, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
/// Customer create/edit body. The same shape is produced when a PATCH is
/// merged onto a stored customer.
pub struct CustomerForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: Option<String>,
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
}

impl TryFrom<CustomerForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        let status = parse_or(form.status, CustomerStatus::Prospect)?;
        Ok(NewCustomer::new(CompanyName::new(form.company_name)?, status)
            .with_contact(
                form.contact_name,
                optional_email(form.email)?,
                optional_phone(form.phone)?,
            )
            .with_details(
                form.address,
                form.industry,
                form.notes,
                optional_id(form.assigned_to)?,
            ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// `GET /api/customers?search=&status=`
pub struct CustomerListParams {
    pub search: Option<String>,
    pub status: Option<String>,
}

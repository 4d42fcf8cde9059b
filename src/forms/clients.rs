use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{
    InvoiceStatus, NewClient, NewClientInvoice, NewClientProject, ProjectStatus,
};
use crate::domain::types::{ClientId, CompanyName, InvoiceNumber, Title, Yen, non_blank};
use crate::forms::{FormError, optional_email, optional_id, optional_phone, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Portal account of the client company.
    pub user_id: Option<i32>,
    pub notes: Option<String>,
}

impl TryFrom<ClientForm> for NewClient {
    type Error = FormError;

    fn try_from(form: ClientForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        Ok(NewClient::new(
            CompanyName::new(form.name)?,
            form.contact_name,
            optional_email(form.email)?,
            optional_phone(form.phone)?,
            form.address,
            optional_id(form.user_id)?,
            form.notes,
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientProjectForm {
    #[serde(default)]
    pub client_id: i32,
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub budget: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TryFrom<ClientProjectForm> for NewClientProject {
    type Error = FormError;

    fn try_from(form: ClientProjectForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        if form
            .start_date
            .zip(form.end_date)
            .is_some_and(|(start, end)| end < start)
        {
            return Err(FormError::Invalid(
                "終了日は開始日以降にしてください".to_string(),
            ));
        }
        Ok(NewClientProject {
            client_id: ClientId::new(form.client_id)?,
            name: Title::new(form.name)?,
            description: non_blank(form.description),
            status: parse_or(form.status, ProjectStatus::Planning)?,
            budget: Yen::new(form.budget)?,
            start_date: form.start_date,
            end_date: form.end_date,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClientInvoiceForm {
    #[serde(default)]
    pub client_id: i32,
    pub project_id: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub invoice_number: String,
    pub amount: Option<i64>,
    pub issued_on: Option<NaiveDate>,
    pub due_on: Option<NaiveDate>,
    pub status: Option<String>,
}

impl TryFrom<ClientInvoiceForm> for NewClientInvoice {
    type Error = FormError;

    fn try_from(form: ClientInvoiceForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        let amount = form
            .amount
            .ok_or_else(|| FormError::Invalid("金額を入力してください".to_string()))?;
        let issued_on = form
            .issued_on
            .ok_or_else(|| FormError::Invalid("発行日を入力してください".to_string()))?;
        Ok(NewClientInvoice {
            client_id: ClientId::new(form.client_id)?,
            project_id: optional_id(form.project_id)?,
            invoice_number: InvoiceNumber::new(form.invoice_number)?,
            amount: Yen::new(amount)?,
            issued_on,
            due_on: form.due_on,
            status: parse_or(form.status, InvoiceStatus::Draft)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
/// `?client_id=` filter for projects and invoices.
pub struct ClientFilter {
    pub client_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn project_dates_must_be_ordered() {
        let form = ClientProjectForm {
            client_id: 1,
            name: "Webサイト制作".into(),
            description: None,
            status: None,
            budget: 500_000,
            start_date: Some(date(10)),
            end_date: Some(date(1)),
        };
        assert!(NewClientProject::try_from(form).is_err());
    }

    #[test]
    fn invoice_requires_issue_date_and_positive_client() {
        let mut form = ClientInvoiceForm {
            client_id: 1,
            project_id: None,
            invoice_number: "INV-001".into(),
            amount: Some(110_000),
            issued_on: None,
            due_on: None,
            status: None,
        };
        assert!(NewClientInvoice::try_from(form.clone()).is_err());

        form.issued_on = Some(date(1));
        let invoice = NewClientInvoice::try_from(form.clone()).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Draft);

        form.client_id = 0;
        assert!(NewClientInvoice::try_from(form).is_err());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let form = ClientInvoiceForm {
            client_id: 1,
            project_id: None,
            invoice_number: "INV-002".into(),
            amount: Some(-1),
            issued_on: Some(date(1)),
            due_on: None,
            status: Some("sent".into()),
        };
        assert!(NewClientInvoice::try_from(form).is_err());
    }

    #[test]
    fn invoice_without_amount_is_rejected() {
        let form: ClientInvoiceForm = serde_json::from_value(serde_json::json!({
            "client_id": 1,
            "invoice_number": "INV-003",
            "issued_on": "2026-05-01",
            "status": "sent"
        }))
        .unwrap();
        assert!(matches!(
            NewClientInvoice::try_from(form),
            Err(FormError::Invalid(message)) if message == "金額を入力してください"
        ));
    }
}

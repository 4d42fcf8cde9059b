//! Lead forms and the CSV import.

use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadStatus, NewLead};
use crate::domain::types::{Email, PersonName, PhoneNumber, non_blank};
use crate::forms::{FormError, optional_email, optional_id, optional_phone, parse_or, validated};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LeadForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<i32>,
}

impl TryFrom<LeadForm> for NewLead {
    type Error = FormError;

    fn try_from(form: LeadForm) -> Result<Self, Self::Error> {
        let form = validated(form)?;
        let mut lead = NewLead::new(PersonName::new(form.name)?)
            .company(form.company)
            .address(form.address)
            .source(form.source)
            .notes(form.notes);
        lead.email = optional_email(form.email)?;
        lead.phone = optional_phone(form.phone)?;
        lead.status = parse_or(form.status, LeadStatus::New)?;
        lead.assigned_to = optional_id(form.assigned_to)?;
        Ok(lead)
    }
}

#[derive(Debug, Clone, Deserialize)]
/// JSON body of `POST /api/leads/import`.
pub struct ImportLeadsForm {
    #[serde(default)]
    pub csv: String,
}

#[derive(MultipartForm)]
pub struct UploadLeadsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadLeadsForm {
    pub fn read_text(&mut self) -> Result<String, FormError> {
        let mut bytes = Vec::new();
        self.csv
            .file
            .read_to_end(&mut bytes)
            .map_err(|err| FormError::Csv(err.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|_| FormError::Csv("UTF-8で保存したファイルを選択してください".to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadColumn {
    Name,
    Company,
    Email,
    Phone,
    Address,
    Source,
    Notes,
}

impl LeadColumn {
    fn from_header(header: &str) -> Option<Self> {
        match header.trim().to_lowercase().as_str() {
            "名前" | "氏名" | "name" => Some(LeadColumn::Name),
            "会社" | "会社名" | "company" => Some(LeadColumn::Company),
            "メール" | "メールアドレス" | "email" => Some(LeadColumn::Email),
            "電話" | "電話番号" | "phone" => Some(LeadColumn::Phone),
            "住所" | "address" => Some(LeadColumn::Address),
            "流入元" | "ソース" | "source" => Some(LeadColumn::Source),
            "備考" | "メモ" | "notes" => Some(LeadColumn::Notes),
            _ => None,
        }
    }
}

/// Parses CSV text into new leads.
///
/// The header row is matched against a Japanese/English dictionary, unknown
/// columns are ignored and rows without a name are dropped. Invalid emails or
/// phone numbers are left empty instead of failing the whole file.
pub fn parse_leads_csv(text: &str) -> Result<Vec<NewLead>, FormError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns: Vec<Option<LeadColumn>> = reader
        .headers()
        .map_err(|err| FormError::Csv(err.to_string()))?
        .iter()
        .map(LeadColumn::from_header)
        .collect();

    let mut leads = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|err| FormError::Csv(err.to_string()))?;

        let cell = |wanted: LeadColumn| -> Option<String> {
            columns
                .iter()
                .position(|column| *column == Some(wanted))
                .and_then(|index| record.get(index))
                .map(str::to_string)
                .and_then(|value| non_blank(Some(value)))
        };

        let Some(name) = cell(LeadColumn::Name).and_then(|name| PersonName::new(name).ok())
        else {
            continue;
        };

        let mut lead = NewLead::new(name)
            .company(cell(LeadColumn::Company))
            .address(cell(LeadColumn::Address))
            .source(cell(LeadColumn::Source))
            .notes(cell(LeadColumn::Notes));
        lead.email = cell(LeadColumn::Email).and_then(|raw| {
            Email::new(raw.as_str())
                .inspect_err(|err| log::warn!("CSV row {}: email {raw}: {err}", line + 2))
                .ok()
        });
        lead.phone = cell(LeadColumn::Phone).and_then(|raw| {
            PhoneNumber::new(raw.as_str())
                .inspect_err(|err| log::warn!("CSV row {}: phone {raw}: {err}", line + 2))
                .ok()
        });
        leads.push(lead);
    }

    Ok(leads)
}

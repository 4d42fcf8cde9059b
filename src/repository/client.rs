//! Repository implementation for client companies, projects and invoices.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::client::{
    Client, ClientInvoice, ClientProject, NewClient, NewClientInvoice, NewClientProject,
    UpdateClient, UpdateClientInvoice, UpdateClientProject,
};
use crate::domain::types::{ClientId, InvoiceId, ProjectId, UserId};
use crate::models::client::{
    Client as DbClient, ClientInvoice as DbClientInvoice, ClientProject as DbClientProject,
    NewClient as DbNewClient, NewClientInvoice as DbNewClientInvoice,
    NewClientProject as DbNewClientProject,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository, expect_affected, into_domain};

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let row = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?;

        row.map(Client::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let rows = clients::table
            .order(clients::name.asc())
            .load::<DbClient>(&mut conn)?;

        into_domain(rows)
    }

    fn list_clients_for_user(&self, user_id: UserId) -> RepositoryResult<Vec<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let rows = clients::table
            .filter(clients::user_id.eq(user_id.get()))
            .order(clients::name.asc())
            .load::<DbClient>(&mut conn)?;

        into_domain(rows)
    }

    fn get_project_by_id(&self, id: ProjectId) -> RepositoryResult<Option<ClientProject>> {
        use crate::schema::client_projects;

        let mut conn = self.conn()?;
        let row = client_projects::table
            .find(id.get())
            .first::<DbClientProject>(&mut conn)
            .optional()?;

        row.map(ClientProject::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_projects(&self, client_id: Option<ClientId>) -> RepositoryResult<Vec<ClientProject>> {
        use crate::schema::client_projects;

        let mut conn = self.conn()?;
        let mut items = client_projects::table.into_boxed();
        if let Some(client_id) = client_id {
            items = items.filter(client_projects::client_id.eq(client_id.get()));
        }
        let rows = items
            .order(client_projects::created_at.desc())
            .load::<DbClientProject>(&mut conn)?;

        into_domain(rows)
    }

    fn get_invoice_by_id(&self, id: InvoiceId) -> RepositoryResult<Option<ClientInvoice>> {
        use crate::schema::client_invoices;

        let mut conn = self.conn()?;
        let row = client_invoices::table
            .find(id.get())
            .first::<DbClientInvoice>(&mut conn)
            .optional()?;

        row.map(ClientInvoice::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_invoices(&self, client_id: Option<ClientId>) -> RepositoryResult<Vec<ClientInvoice>> {
        use crate::schema::client_invoices;

        let mut conn = self.conn()?;
        let mut items = client_invoices::table.into_boxed();
        if let Some(client_id) = client_id {
            items = items.filter(client_invoices::client_id.eq(client_id.get()));
        }
        let rows = items
            .order(client_invoices::issued_on.desc())
            .then_order_by(client_invoices::id.desc())
            .load::<DbClientInvoice>(&mut conn)?;

        into_domain(rows)
    }
}

impl ClientWriter for DieselRepository {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(clients::table)
            .values(DbNewClient::from(new_client))
            .get_result::<DbClient>(&mut conn)?;

        Client::try_from(row).map_err(RepositoryError::from)
    }

    fn update_client(&self, id: ClientId, updates: &UpdateClient) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let changeset = DbNewClient::from(updates);
        let row = diesel::update(clients::table.find(id.get()))
            .set((&changeset, clients::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbClient>(&mut conn)?;

        Client::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_client(&self, id: ClientId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let affected = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }

    fn create_project(&self, new_project: &NewClientProject) -> RepositoryResult<ClientProject> {
        use crate::schema::client_projects;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(client_projects::table)
            .values(DbNewClientProject::from(new_project))
            .get_result::<DbClientProject>(&mut conn)?;

        ClientProject::try_from(row).map_err(RepositoryError::from)
    }

    fn update_project(
        &self,
        id: ProjectId,
        updates: &UpdateClientProject,
    ) -> RepositoryResult<ClientProject> {
        use crate::schema::client_projects;

        let mut conn = self.conn()?;
        let changeset = DbNewClientProject::from(updates);
        let row = diesel::update(client_projects::table.find(id.get()))
            .set((
                &changeset,
                client_projects::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbClientProject>(&mut conn)?;

        ClientProject::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_project(&self, id: ProjectId) -> RepositoryResult<()> {
        use crate::schema::client_projects;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(client_projects::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }

    fn create_invoice(&self, new_invoice: &NewClientInvoice) -> RepositoryResult<ClientInvoice> {
        use crate::schema::client_invoices;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(client_invoices::table)
            .values(DbNewClientInvoice::from(new_invoice))
            .get_result::<DbClientInvoice>(&mut conn)?;

        ClientInvoice::try_from(row).map_err(RepositoryError::from)
    }

    fn update_invoice(
        &self,
        id: InvoiceId,
        updates: &UpdateClientInvoice,
    ) -> RepositoryResult<ClientInvoice> {
        use crate::schema::client_invoices;

        let mut conn = self.conn()?;
        let changeset = DbNewClientInvoice::from(updates);
        let row = diesel::update(client_invoices::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbClientInvoice>(&mut conn)?;

        ClientInvoice::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_invoice(&self, id: InvoiceId) -> RepositoryResult<()> {
        use crate::schema::client_invoices;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(client_invoices::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}

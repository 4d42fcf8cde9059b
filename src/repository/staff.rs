//! Repository implementation for employees, salaries, shifts and advance payments.

use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::staff::{
    AdvancePayment, Employee, NewAdvancePayment, NewEmployee, NewStaffSalary, NewStaffShift,
    StaffSalary, StaffShift, UpdateAdvancePayment, UpdateEmployee, UpdateStaffShift,
};
use crate::domain::types::{AdvancePaymentId, EmployeeId, SalaryId, ShiftId};
use crate::models::staff::{
    AdvancePayment as DbAdvancePayment, Employee as DbEmployee,
    NewAdvancePayment as DbNewAdvancePayment, NewEmployee as DbNewEmployee,
    NewStaffSalary as DbNewStaffSalary, NewStaffShift as DbNewStaffShift,
    StaffSalary as DbStaffSalary, StaffShift as DbStaffShift,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, EmployeeReader, EmployeeWriter, expect_affected, into_domain,
};

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(&self, id: EmployeeId) -> RepositoryResult<Option<Employee>> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let row = employees::table
            .find(id.get())
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        row.map(Employee::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_employees(&self) -> RepositoryResult<Vec<Employee>> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let rows = employees::table
            .order(employees::name.asc())
            .load::<DbEmployee>(&mut conn)?;

        into_domain(rows)
    }

    fn get_salary_by_id(&self, id: SalaryId) -> RepositoryResult<Option<StaffSalary>> {
        use crate::schema::staff_salaries;

        let mut conn = self.conn()?;
        let row = staff_salaries::table
            .find(id.get())
            .first::<DbStaffSalary>(&mut conn)
            .optional()?;

        row.map(StaffSalary::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_salaries(&self, employee_id: Option<EmployeeId>) -> RepositoryResult<Vec<StaffSalary>> {
        use crate::schema::staff_salaries;

        let mut conn = self.conn()?;
        let mut items = staff_salaries::table.into_boxed();
        if let Some(employee_id) = employee_id {
            items = items.filter(staff_salaries::employee_id.eq(employee_id.get()));
        }
        let rows = items
            .order(staff_salaries::month.desc())
            .then_order_by(staff_salaries::employee_id.asc())
            .load::<DbStaffSalary>(&mut conn)?;

        into_domain(rows)
    }

    fn get_shift_by_id(&self, id: ShiftId) -> RepositoryResult<Option<StaffShift>> {
        use crate::schema::staff_shifts;

        let mut conn = self.conn()?;
        let row = staff_shifts::table
            .find(id.get())
            .first::<DbStaffShift>(&mut conn)
            .optional()?;

        row.map(StaffShift::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_shifts(&self, employee_id: EmployeeId) -> RepositoryResult<Vec<StaffShift>> {
        use crate::schema::staff_shifts;

        let mut conn = self.conn()?;
        let rows = staff_shifts::table
            .filter(staff_shifts::employee_id.eq(employee_id.get()))
            .order((staff_shifts::work_date.asc(), staff_shifts::start_time.asc()))
            .load::<DbStaffShift>(&mut conn)?;

        into_domain(rows)
    }

    fn get_advance_payment_by_id(
        &self,
        id: AdvancePaymentId,
    ) -> RepositoryResult<Option<AdvancePayment>> {
        use crate::schema::advance_payments;

        let mut conn = self.conn()?;
        let row = advance_payments::table
            .find(id.get())
            .first::<DbAdvancePayment>(&mut conn)
            .optional()?;

        row.map(AdvancePayment::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_advance_payments(
        &self,
        employee_id: Option<EmployeeId>,
    ) -> RepositoryResult<Vec<AdvancePayment>> {
        use crate::schema::advance_payments;

        let mut conn = self.conn()?;
        let mut items = advance_payments::table.into_boxed();
        if let Some(employee_id) = employee_id {
            items = items.filter(advance_payments::employee_id.eq(employee_id.get()));
        }
        let rows = items
            .order(advance_payments::requested_on.desc())
            .load::<DbAdvancePayment>(&mut conn)?;

        into_domain(rows)
    }
}

impl EmployeeWriter for DieselRepository {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(employees::table)
            .values(DbNewEmployee::from(new_employee))
            .get_result::<DbEmployee>(&mut conn)?;

        Employee::try_from(row).map_err(RepositoryError::from)
    }

    fn update_employee(
        &self,
        id: EmployeeId,
        updates: &UpdateEmployee,
    ) -> RepositoryResult<Employee> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let changeset = DbNewEmployee::from(updates);
        let row = diesel::update(employees::table.find(id.get()))
            .set((&changeset, employees::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbEmployee>(&mut conn)?;

        Employee::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepositoryResult<()> {
        use crate::schema::employees;

        let mut conn = self.conn()?;
        let affected = diesel::delete(employees::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }

    fn upsert_salary(&self, salary: &NewStaffSalary) -> RepositoryResult<StaffSalary> {
        use crate::schema::staff_salaries;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(staff_salaries::table)
            .values(DbNewStaffSalary::from(salary))
            .on_conflict((staff_salaries::employee_id, staff_salaries::month))
            .do_update()
            .set((
                staff_salaries::base_salary.eq(excluded(staff_salaries::base_salary)),
                staff_salaries::allowance.eq(excluded(staff_salaries::allowance)),
                staff_salaries::deduction.eq(excluded(staff_salaries::deduction)),
                staff_salaries::paid.eq(excluded(staff_salaries::paid)),
            ))
            .get_result::<DbStaffSalary>(&mut conn)?;

        StaffSalary::try_from(row).map_err(RepositoryError::from)
    }

    fn update_salary(
        &self,
        id: SalaryId,
        updates: &NewStaffSalary,
    ) -> RepositoryResult<StaffSalary> {
        use crate::schema::staff_salaries;

        let mut conn = self.conn()?;
        let changeset = DbNewStaffSalary::from(updates);
        let row = diesel::update(staff_salaries::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbStaffSalary>(&mut conn)?;

        StaffSalary::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_salary(&self, id: SalaryId) -> RepositoryResult<()> {
        use crate::schema::staff_salaries;

        let mut conn = self.conn()?;
        let affected = diesel::delete(staff_salaries::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }

    fn create_shift(&self, new_shift: &NewStaffShift) -> RepositoryResult<StaffShift> {
        use crate::schema::staff_shifts;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(staff_shifts::table)
            .values(DbNewStaffShift::from(new_shift))
            .get_result::<DbStaffShift>(&mut conn)?;

        StaffShift::try_from(row).map_err(RepositoryError::from)
    }

    fn update_shift(
        &self,
        id: ShiftId,
        updates: &UpdateStaffShift,
    ) -> RepositoryResult<StaffShift> {
        use crate::schema::staff_shifts;

        let mut conn = self.conn()?;
        let changeset = DbNewStaffShift::from(updates);
        let row = diesel::update(staff_shifts::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbStaffShift>(&mut conn)?;

        StaffShift::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_shift(&self, id: ShiftId) -> RepositoryResult<()> {
        use crate::schema::staff_shifts;

        let mut conn = self.conn()?;
        let affected = diesel::delete(staff_shifts::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }

    fn create_advance_payment(
        &self,
        new_payment: &NewAdvancePayment,
    ) -> RepositoryResult<AdvancePayment> {
        use crate::schema::advance_payments;

        let mut conn = self.conn()?;
        let row = diesel::insert_into(advance_payments::table)
            .values(DbNewAdvancePayment::from(new_payment))
            .get_result::<DbAdvancePayment>(&mut conn)?;

        AdvancePayment::try_from(row).map_err(RepositoryError::from)
    }

    fn update_advance_payment(
        &self,
        id: AdvancePaymentId,
        updates: &UpdateAdvancePayment,
    ) -> RepositoryResult<AdvancePayment> {
        use crate::schema::advance_payments;

        let mut conn = self.conn()?;
        let changeset = DbNewAdvancePayment::from(updates);
        let row = diesel::update(advance_payments::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbAdvancePayment>(&mut conn)?;

        AdvancePayment::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_advance_payment(&self, id: AdvancePaymentId) -> RepositoryResult<()> {
        use crate::schema::advance_payments;

        let mut conn = self.conn()?;
        let affected =
            diesel::delete(advance_payments::table.find(id.get())).execute(&mut conn)?;
        expect_affected(affected)
    }
}

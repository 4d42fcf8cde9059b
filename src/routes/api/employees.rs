//! Staff records and the payroll data hanging off them.
//!
//! Collections are nested under `/employees/{id}`; single records are
//! addressed directly by their own id.

use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::Value;

use crate::forms::employees::{AdvancePaymentForm, EmployeeForm, SalaryForm, ShiftForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{api_created, api_deleted, api_ok};
use crate::services::employees;

#[get("/employees")]
pub async fn list_employees(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::list_employees(repo.get_ref(), &user))
}

#[post("/employees")]
pub async fn create_employee(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EmployeeForm>,
) -> impl Responder {
    api_created(employees::create_employee(repo.get_ref(), &user, form))
}

#[get("/employees/{id}")]
pub async fn show_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::get_employee(repo.get_ref(), &user, id.into_inner()))
}

#[put("/employees/{id}")]
pub async fn update_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<EmployeeForm>,
) -> impl Responder {
    api_ok(employees::update_employee(
        repo.get_ref(),
        &user,
        id.into_inner(),
        form,
    ))
}

#[patch("/employees/{id}")]
pub async fn patch_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(employees::patch_employee(
        repo.get_ref(),
        &user,
        id.into_inner(),
        changes,
    ))
}

#[delete("/employees/{id}")]
pub async fn delete_employee(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(employees::delete_employee(repo.get_ref(), &user, id.into_inner()))
}

#[get("/employees/{id}/salaries")]
pub async fn list_salaries(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::list_salaries(
        repo.get_ref(),
        &user,
        employee_id.into_inner(),
    ))
}

/// Upserts the salary of the month named in the body.
#[post("/employees/{id}/salaries")]
pub async fn save_salary(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SalaryForm>,
) -> impl Responder {
    api_created(employees::save_salary(
        repo.get_ref(),
        &user,
        employee_id.into_inner(),
        form,
    ))
}

#[get("/salaries/{id}")]
pub async fn show_salary(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::get_salary(repo.get_ref(), &user, id.into_inner()))
}

#[put("/salaries/{id}")]
pub async fn update_salary(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SalaryForm>,
) -> impl Responder {
    api_ok(employees::update_salary(
        repo.get_ref(),
        &user,
        id.into_inner(),
        form,
    ))
}

#[patch("/salaries/{id}")]
pub async fn patch_salary(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(employees::patch_salary(
        repo.get_ref(),
        &user,
        id.into_inner(),
        changes,
    ))
}

#[delete("/salaries/{id}")]
pub async fn delete_salary(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(employees::delete_salary(repo.get_ref(), &user, id.into_inner()))
}

#[get("/payroll/summary")]
pub async fn payroll_summary(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::payroll_summary(repo.get_ref(), &user))
}

#[get("/employees/{id}/shifts")]
pub async fn list_shifts(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::list_shifts(
        repo.get_ref(),
        &user,
        employee_id.into_inner(),
    ))
}

#[post("/employees/{id}/shifts")]
pub async fn create_shift(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ShiftForm>,
) -> impl Responder {
    api_created(employees::create_shift(
        repo.get_ref(),
        &user,
        employee_id.into_inner(),
        form,
    ))
}

#[get("/shifts/{id}")]
pub async fn show_shift(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::get_shift(repo.get_ref(), &user, id.into_inner()))
}

#[put("/shifts/{id}")]
pub async fn update_shift(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ShiftForm>,
) -> impl Responder {
    api_ok(employees::update_shift(
        repo.get_ref(),
        &user,
        id.into_inner(),
        form,
    ))
}

#[patch("/shifts/{id}")]
pub async fn patch_shift(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(employees::patch_shift(
        repo.get_ref(),
        &user,
        id.into_inner(),
        changes,
    ))
}

#[delete("/shifts/{id}")]
pub async fn delete_shift(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(employees::delete_shift(repo.get_ref(), &user, id.into_inner()))
}

#[get("/employees/{id}/advance-payments")]
pub async fn list_advance_payments(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::list_advance_payments(
        repo.get_ref(),
        &user,
        employee_id.into_inner(),
    ))
}

#[post("/employees/{id}/advance-payments")]
pub async fn create_advance_payment(
    employee_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AdvancePaymentForm>,
) -> impl Responder {
    api_created(employees::create_advance_payment(
        repo.get_ref(),
        &user,
        employee_id.into_inner(),
        form,
    ))
}

#[get("/advance-payments/{id}")]
pub async fn show_advance_payment(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_ok(employees::get_advance_payment(
        repo.get_ref(),
        &user,
        id.into_inner(),
    ))
}

#[put("/advance-payments/{id}")]
pub async fn update_advance_payment(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AdvancePaymentForm>,
) -> impl Responder {
    api_ok(employees::update_advance_payment(
        repo.get_ref(),
        &user,
        id.into_inner(),
        form,
    ))
}

#[patch("/advance-payments/{id}")]
pub async fn patch_advance_payment(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(changes): web::Json<Value>,
) -> impl Responder {
    api_ok(employees::patch_advance_payment(
        repo.get_ref(),
        &user,
        id.into_inner(),
        changes,
    ))
}

#[delete("/advance-payments/{id}")]
pub async fn delete_advance_payment(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    api_deleted(employees::delete_advance_payment(
        repo.get_ref(),
        &user,
        id.into_inner(),
    ))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_employees)
        .service(create_employee)
        .service(show_employee)
        .service(update_employee)
        .service(patch_employee)
        .service(delete_employee)
        .service(list_salaries)
        .service(save_salary)
        .service(show_salary)
        .service(update_salary)
        .service(patch_salary)
        .service(delete_salary)
        .service(payroll_summary)
        .service(list_shifts)
        .service(create_shift)
        .service(show_shift)
        .service(update_shift)
        .service(patch_shift)
        .service(delete_shift)
        .service(list_advance_payments)
        .service(create_advance_payment)
        .service(show_advance_payment)
        .service(update_advance_payment)
        .service(patch_advance_payment)
        .service(delete_advance_payment);
}

//! 路由处理函数

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use farmsync_adapter_postgres::PgPool;
use farmsync_auth_core::AuthClaims;
use farmsync_domain::Worker;
use farmsync_errors::{ApiJson, ApiPath, AppResult};

use super::dto::*;
use crate::application::*;

pub async fn list(
    State(pool): State<PgPool>,
    claims: AuthClaims,
) -> AppResult<Json<Vec<Worker>>> {
    let workers = WorkerHandler::new(pool).handle_list(claims.owner_id()).await?;
    Ok(Json(workers))
}

pub async fn create(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<CreateWorkerRequest>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let id = WorkerHandler::new(pool)
        .handle_create(
            claims.owner_id(),
            CreateWorkerCommand {
                name: req.name,
                role: req.role,
                pay_rate: req.pay_rate,
                pay_type: req.pay_type,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Worker added successfully!",
            id,
        }),
    ))
}

pub async fn detail(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiPath(worker_id): ApiPath<i32>,
) -> AppResult<Json<WorkerDetail>> {
    let detail = WorkerHandler::new(pool)
        .handle_detail(claims.owner_id(), worker_id)
        .await?;
    Ok(Json(detail))
}

pub async fn mark_attendance(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiPath(worker_id): ApiPath<i32>,
    ApiJson(req): ApiJson<AttendanceRequest>,
) -> AppResult<Json<MessageResponse>> {
    WorkerHandler::new(pool)
        .handle_mark_attendance(
            claims.owner_id(),
            MarkAttendanceCommand {
                worker_id,
                date: req.date,
                status: req.status,
                hours: req.hours,
            },
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Attendance updated successfully!",
    }))
}

pub async fn issue_loan(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiPath(worker_id): ApiPath<i32>,
    ApiJson(req): ApiJson<LoanRequest>,
) -> AppResult<Json<LoanResponse>> {
    let loans = WorkerHandler::new(pool)
        .handle_issue_loan(
            claims.owner_id(),
            IssueLoanCommand {
                worker_id,
                amount: req.amount,
                description: req.description,
                today: Utc::now().date_naive(),
            },
        )
        .await?;

    Ok(Json(LoanResponse {
        message: "Loan recorded successfully!",
        loans,
    }))
}

pub async fn run_payroll(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiPath(worker_id): ApiPath<i32>,
    ApiJson(req): ApiJson<PayrollRequest>,
) -> AppResult<Json<PayrollResponse>> {
    let payroll = WorkerHandler::new(pool)
        .handle_run_payroll(
            claims.owner_id(),
            RunPayrollCommand {
                worker_id,
                deduction: req.deduction.unwrap_or(0),
                today: Utc::now().date_naive(),
            },
        )
        .await?;

    Ok(Json(PayrollResponse {
        message: "Payroll processed",
        payroll,
    }))
}

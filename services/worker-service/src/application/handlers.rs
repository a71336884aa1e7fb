//! 工人命令处理器

use farmsync_adapter_postgres::{
    NewFinancialEntry, NewWorker, PgPool, PostgresAttendanceRepository,
    PostgresFinancialRepository, PostgresWorkerRepository, TransactionManager, WorkerEntryKind,
};
use farmsync_common::OwnerId;
use farmsync_domain::{
    Attendance, EntryType, Payroll, PayrollWindow, Worker,
    ledger::{loan_description, salary_description},
};
use farmsync_errors::{AppError, AppResult};
use farmsync_telemetry::{increment, names};
use tracing::info;

use super::commands::*;
use super::queries::WorkerDetail;

fn worker_not_found() -> AppError {
    AppError::not_found("Worker not found")
}

/// 工人命令处理器
pub struct WorkerHandler {
    workers: PostgresWorkerRepository,
    attendance: PostgresAttendanceRepository,
    financials: PostgresFinancialRepository,
    tx_manager: TransactionManager,
}

impl WorkerHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            workers: PostgresWorkerRepository::new(pool.clone()),
            attendance: PostgresAttendanceRepository::new(pool.clone()),
            financials: PostgresFinancialRepository::new(pool.clone()),
            tx_manager: TransactionManager::new(pool),
        }
    }

    /// 按姓名排序的工人列表
    pub async fn handle_list(&self, owner: OwnerId) -> AppResult<Vec<Worker>> {
        self.workers.list(owner).await
    }

    /// 新增工人
    pub async fn handle_create(&self, owner: OwnerId, cmd: CreateWorkerCommand) -> AppResult<i32> {
        cmd.validate().map_err(AppError::validation)?;

        let id = self
            .workers
            .create(
                owner,
                &NewWorker {
                    name: cmd.name.trim().to_string(),
                    role: cmd.role.trim().to_string(),
                    pay_rate: cmd.pay_rate,
                    pay_type: cmd.pay_type,
                },
            )
            .await?;

        info!(owner_id = %owner, worker_id = id, "Worker added");
        Ok(id)
    }

    /// 工人详情
    pub async fn handle_detail(&self, owner: OwnerId, worker_id: i32) -> AppResult<WorkerDetail> {
        let worker = self
            .workers
            .find(owner, worker_id)
            .await?
            .ok_or_else(worker_not_found)?;

        let attendance = self.attendance.list_for_worker(worker.id).await?;
        let loans = self
            .financials
            .list_for_worker(owner, worker.id, WorkerEntryKind::Loan)
            .await?;
        let payrolls = self
            .financials
            .list_for_worker(owner, worker.id, WorkerEntryKind::Payroll)
            .await?;

        Ok(WorkerDetail::new(worker, attendance, loans, payrolls))
    }

    /// 登记考勤，同一天已有记录时覆盖
    pub async fn handle_mark_attendance(
        &self,
        owner: OwnerId,
        cmd: MarkAttendanceCommand,
    ) -> AppResult<()> {
        cmd.validate().map_err(AppError::validation)?;

        // 只能给自己的工人登记
        self.workers
            .find(owner, cmd.worker_id)
            .await?
            .ok_or_else(worker_not_found)?;

        self.attendance
            .upsert(&Attendance {
                worker_id: cmd.worker_id,
                attendance_date: cmd.date,
                status: cmd.status,
                hours: cmd.hours,
            })
            .await?;

        info!(
            owner_id = %owner,
            worker_id = cmd.worker_id,
            date = %cmd.date,
            status = %cmd.status,
            "Attendance updated"
        );
        Ok(())
    }

    /// 借款：借款余额增加，同时记一笔支出
    ///
    /// 返回借款后的余额
    pub async fn handle_issue_loan(&self, owner: OwnerId, cmd: IssueLoanCommand) -> AppResult<i64> {
        cmd.validate().map_err(AppError::validation)?;

        let mut tx = self.tx_manager.begin().await?;

        let worker = PostgresWorkerRepository::lock(&mut *tx, owner, cmd.worker_id)
            .await?
            .ok_or_else(worker_not_found)?;

        let balance = PostgresWorkerRepository::adjust_loans(&mut *tx, worker.id, cmd.amount).await?;

        PostgresFinancialRepository::insert(
            &mut *tx,
            owner,
            &NewFinancialEntry {
                entry_type: EntryType::Expense,
                description: loan_description(&worker.name, cmd.description.trim()),
                amount: cmd.amount,
                transaction_date: cmd.today,
                crop_name: None,
                worker_id: Some(worker.id),
            },
        )
        .await?;

        TransactionManager::commit(tx).await?;
        increment(names::LOANS_ISSUED);

        info!(
            owner_id = %owner,
            worker_id = worker.id,
            amount = cmd.amount,
            balance,
            "Loan recorded"
        );
        Ok(balance)
    }

    /// 工资结算：按近 7 天考勤计算应发，扣款冲减借款余额，实发记为支出
    pub async fn handle_run_payroll(
        &self,
        owner: OwnerId,
        cmd: RunPayrollCommand,
    ) -> AppResult<Payroll> {
        cmd.validate().map_err(AppError::validation)?;

        let window = PayrollWindow::ending(cmd.today);
        let mut tx = self.tx_manager.begin().await?;

        let worker = PostgresWorkerRepository::lock(&mut *tx, owner, cmd.worker_id)
            .await?
            .ok_or_else(worker_not_found)?;

        let records = PostgresAttendanceRepository::list_in_window(&mut *tx, worker.id, window).await?;
        let payroll = Payroll::compute(&worker, window, &records, cmd.deduction)?;

        if payroll.deduction != 0 {
            PostgresWorkerRepository::adjust_loans(&mut *tx, worker.id, -payroll.deduction).await?;
        }

        PostgresFinancialRepository::insert(
            &mut *tx,
            owner,
            &NewFinancialEntry {
                entry_type: EntryType::Expense,
                description: salary_description(&worker.name),
                amount: payroll.net_pay,
                transaction_date: cmd.today,
                crop_name: None,
                worker_id: Some(worker.id),
            },
        )
        .await?;

        TransactionManager::commit(tx).await?;
        increment(names::PAYROLL_RUNS);

        info!(
            owner_id = %owner,
            worker_id = worker.id,
            total_pay = payroll.total_pay,
            deduction = payroll.deduction,
            net_pay = payroll.net_pay,
            "Payroll processed"
        );
        Ok(payroll)
    }
}

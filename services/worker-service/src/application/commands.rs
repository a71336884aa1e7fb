//! 工人相关命令定义

use chrono::NaiveDate;
use farmsync_domain::{
    AttendanceStatus, PayType,
    ledger::{MAX_LOAN_NOTE_CHARS, MAX_WORKER_NAME_CHARS},
};

/// 去掉首尾空白后的字符数
fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// 新增工人命令
#[derive(Debug, Clone)]
pub struct CreateWorkerCommand {
    pub name: String,
    pub role: String,
    pub pay_rate: i64,
    pub pay_type: PayType,
}

impl CreateWorkerCommand {
    /// 验证命令参数
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Worker name cannot be empty".to_string());
        }
        if char_len(&self.name) > MAX_WORKER_NAME_CHARS {
            return Err(format!(
                "Worker name cannot exceed {} characters",
                MAX_WORKER_NAME_CHARS
            ));
        }
        if self.role.trim().is_empty() {
            return Err("Worker role cannot be empty".to_string());
        }
        if char_len(&self.role) > 50 {
            return Err("Worker role cannot exceed 50 characters".to_string());
        }
        if self.pay_rate < 0 {
            return Err("Pay rate must not be negative".to_string());
        }
        Ok(())
    }
}

/// 考勤登记命令（同一天重复登记会覆盖）
#[derive(Debug, Clone)]
pub struct MarkAttendanceCommand {
    pub worker_id: i32,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub hours: i32,
}

impl MarkAttendanceCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.hours < 0 {
            return Err("Hours must not be negative".to_string());
        }
        if self.hours > 24 {
            return Err("Hours cannot exceed 24 per day".to_string());
        }
        Ok(())
    }
}

/// 借款命令
#[derive(Debug, Clone)]
pub struct IssueLoanCommand {
    pub worker_id: i32,
    pub amount: i64,
    pub description: String,
    pub today: NaiveDate,
}

impl IssueLoanCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.amount <= 0 {
            return Err("Loan amount must be positive".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Loan description cannot be empty".to_string());
        }
        if char_len(&self.description) > MAX_LOAN_NOTE_CHARS {
            return Err(format!(
                "Loan description cannot exceed {} characters",
                MAX_LOAN_NOTE_CHARS
            ));
        }
        Ok(())
    }
}

/// 工资结算命令，窗口以 `today` 结束
#[derive(Debug, Clone)]
pub struct RunPayrollCommand {
    pub worker_id: i32,
    pub deduction: i64,
    pub today: NaiveDate,
}

impl RunPayrollCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.deduction < 0 {
            return Err("Deduction must not be negative".to_string());
        }
        Ok(())
    }
}

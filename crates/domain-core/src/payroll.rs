//! 工资计算
//!
//! 结算窗口为今天往前 6 天到今天（含），共 7 个自然日。
//! 按日计薪：出勤（Present）天数 × 日薪。
//! 按时计薪：窗口内所有记录的工时之和 × 时薪，不区分考勤状态。

use chrono::{Days, NaiveDate};
use farmsync_errors::{AppError, AppResult};
use serde::Serialize;

use crate::entity::{Attendance, Worker};
use crate::kinds::{AttendanceStatus, PayType};

/// 结算窗口（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayrollWindow {
    pub const DAYS: u64 = 7;

    /// 以 `today` 结束的 7 天窗口
    pub fn ending(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(Self::DAYS - 1))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// 计算窗口内应发工资
pub fn total_pay(
    pay_type: PayType,
    pay_rate: i64,
    window: PayrollWindow,
    records: &[Attendance],
) -> AppResult<i64> {
    let in_window = records.iter().filter(|r| window.contains(r.attendance_date));

    let units: i64 = match pay_type {
        PayType::Daily => in_window
            .filter(|r| r.status == AttendanceStatus::Present)
            .count() as i64,
        PayType::Hourly => in_window.map(|r| i64::from(r.hours)).sum(),
    };

    units
        .checked_mul(pay_rate)
        .ok_or_else(|| AppError::validation("Pay amount out of range"))
}

/// 一次工资结算的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    pub total_pay: i64,
    pub deduction: i64,
    /// 实发 = 应发 - 扣款，扣款大于应发时为负数
    pub net_pay: i64,
}

impl Payroll {
    pub fn compute(
        worker: &Worker,
        window: PayrollWindow,
        records: &[Attendance],
        deduction: i64,
    ) -> AppResult<Self> {
        if deduction < 0 {
            return Err(AppError::validation("Deduction must not be negative"));
        }

        let total_pay = total_pay(worker.pay_type, worker.pay_rate, window, records)?;
        let net_pay = total_pay
            .checked_sub(deduction)
            .ok_or_else(|| AppError::validation("Deduction out of range"))?;

        Ok(Self {
            total_pay,
            deduction,
            net_pay,
        })
    }
}

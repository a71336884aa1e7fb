//! 收支流水与仪表盘汇总

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::kinds::EntryType;

/// 流水描述的长度上限（字符数，与 `financials.description` 一致）
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// 工人姓名的长度上限（字符数）
pub const MAX_WORKER_NAME_CHARS: usize = 100;

/// 借款备注的长度上限，保证 `Loan to {姓名} - {备注}` 不超过流水描述上限
pub const MAX_LOAN_NOTE_CHARS: usize =
    MAX_DESCRIPTION_CHARS - MAX_WORKER_NAME_CHARS - "Loan to ".len() - " - ".len();

/// 销售收入流水描述
pub fn sale_description(crop_name: &str) -> String {
    format!("Sale of {}", crop_name)
}

/// 借款支出流水描述
pub fn loan_description(worker_name: &str, description: &str) -> String {
    format!("Loan to {} - {}", worker_name, description)
}

/// 工资支出流水描述
pub fn salary_description(worker_name: &str) -> String {
    format!("Worker salary - {}", worker_name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_revenue: i64,
    pub total_expenses: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmMetrics {
    pub total_yield: i64,
    pub active_workers: i64,
}

/// 月度收支
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: i64,
    pub expenses: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub financial_summary: FinancialSummary,
    pub metrics: FarmMetrics,
    pub financial_trends: Vec<TrendPoint>,
}

/// 趋势统计的月份范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    months: u32,
}

impl TrendWindow {
    pub const DEFAULT_MONTHS: u32 = 6;
    pub const MAX_MONTHS: u32 = 36;

    /// 请求参数缺省为 6，超出范围的值截断到 1..=36
    pub fn new(months: Option<i64>) -> Self {
        let months = months
            .map(|m| m.clamp(1, i64::from(Self::MAX_MONTHS)) as u32)
            .unwrap_or(Self::DEFAULT_MONTHS);
        Self { months }
    }

    pub fn months(&self) -> u32 {
        self.months
    }

    /// 窗口内第一个月的 1 号（包含当月共 `months` 个月）
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        let first_of_month = today.with_day(1).unwrap_or(today);
        first_of_month
            .checked_sub_months(Months::new(self.months - 1))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl Default for TrendWindow {
    fn default() -> Self {
        Self::new(None)
    }
}

/// 按月份聚合 `(月初日期, 类型, 金额合计)` 行，按月份升序
pub fn fold_trend(rows: impl IntoIterator<Item = (NaiveDate, EntryType, i64)>) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<(i32, u32), (i64, i64)> = BTreeMap::new();

    for (month, entry_type, amount) in rows {
        let bucket = buckets.entry((month.year(), month.month())).or_default();
        match entry_type {
            EntryType::Revenue => bucket.0 += amount,
            EntryType::Expense => bucket.1 += amount,
        }
    }

    buckets
        .into_iter()
        .map(|((year, month), (revenue, expenses))| TrendPoint {
            month: format!("{:04}-{:02}", year, month),
            revenue,
            expenses,
        })
        .collect()
}

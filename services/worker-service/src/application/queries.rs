//! 工人详情视图

use std::collections::BTreeMap;

use chrono::NaiveDate;
use farmsync_domain::{Attendance, AttendanceStatus, FinancialEntry, Worker};
use serde::Serialize;

/// 某天的考勤
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceMark {
    pub status: AttendanceStatus,
    pub hours: i32,
}

/// 借款 / 工资流水行
#[derive(Debug, Clone, Serialize)]
pub struct LedgerLine {
    pub date: NaiveDate,
    pub amount: i64,
    pub description: String,
}

impl From<FinancialEntry> for LedgerLine {
    fn from(entry: FinancialEntry) -> Self {
        Self {
            date: entry.transaction_date,
            amount: entry.amount,
            description: entry.description,
        }
    }
}

/// 工人详情：档案、按日期索引的考勤、借款与工资历史
#[derive(Debug, Clone, Serialize)]
pub struct WorkerDetail {
    pub worker: Worker,
    pub attendance: BTreeMap<NaiveDate, AttendanceMark>,
    pub loans: Vec<LedgerLine>,
    pub payrolls: Vec<LedgerLine>,
}

impl WorkerDetail {
    pub fn new(
        worker: Worker,
        attendance: Vec<Attendance>,
        loans: Vec<FinancialEntry>,
        payrolls: Vec<FinancialEntry>,
    ) -> Self {
        let attendance = attendance
            .into_iter()
            .map(|a| {
                (
                    a.attendance_date,
                    AttendanceMark {
                        status: a.status,
                        hours: a.hours,
                    },
                )
            })
            .collect();

        Self {
            worker,
            attendance,
            loans: loans.into_iter().map(LedgerLine::from).collect(),
            payrolls: payrolls.into_iter().map(LedgerLine::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmsync_domain::{EntryType, OwnerId, PayType};
    use serde_json::json;

    #[test]
    fn test_detail_wire_shape() {
        let worker = Worker {
            id: 7,
            owner_id: OwnerId::new(1),
            name: "Juma".to_string(),
            role: "Harvester".to_string(),
            pay_rate: 100,
            pay_type: PayType::Daily,
            loans: 200,
            is_active: true,
        };
        let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let attendance = vec![Attendance {
            worker_id: 7,
            attendance_date: day,
            status: AttendanceStatus::Present,
            hours: 8,
        }];
        let loan = FinancialEntry {
            id: 1,
            owner_id: OwnerId::new(1),
            entry_type: EntryType::Expense,
            description: "Loan to Juma - seeds".to_string(),
            amount: 200,
            transaction_date: day,
            crop_name: None,
            worker_id: Some(7),
        };

        let detail = WorkerDetail::new(worker, attendance, vec![loan], vec![]);
        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["worker"]["payType"], "Daily");
        assert_eq!(
            value["attendance"],
            json!({"2024-05-10": {"status": "Present", "hours": 8}})
        );
        assert_eq!(
            value["loans"],
            json!([{"date": "2024-05-10", "amount": 200, "description": "Loan to Juma - seeds"}])
        );
        assert_eq!(value["payrolls"], json!([]));
    }
}

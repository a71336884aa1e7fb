//! 请求 / 响应结构
//!
//! 整数字段同时接受数字和数字字符串

use chrono::NaiveDate;
use farmsync_common::{lenient_i32, lenient_i64, lenient_opt_i64};
use farmsync_domain::{AttendanceStatus, PayType, Payroll};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerRequest {
    pub name: String,
    pub role: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub pay_rate: i64,
    pub pay_type: PayType,
}

#[derive(Debug, Deserialize)]
pub struct AttendanceRequest {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub hours: i32,
}

#[derive(Debug, Deserialize)]
pub struct LoanRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub amount: i64,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct PayrollRequest {
    #[serde(default, deserialize_with = "lenient_opt_i64")]
    pub deduction: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct LoanResponse {
    pub message: &'static str,
    /// 借款后的余额
    pub loans: i64,
}

#[derive(Debug, Serialize)]
pub struct PayrollResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub payroll: Payroll,
}

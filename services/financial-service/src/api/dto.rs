//! 请求 / 响应结构
//!
//! 整数字段同时接受数字和数字字符串

use farmsync_common::{lenient_i32, lenient_i64};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub months: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct YieldRequest {
    pub name: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub quantity: i64,
    pub unit: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    #[serde(deserialize_with = "lenient_i32")]
    pub crop_id: i32,
    #[serde(deserialize_with = "lenient_i64")]
    pub quantity: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub price: i64,
    pub seller: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    pub description: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub amount: i64,
    #[serde(default)]
    pub crop_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InventoryRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(deserialize_with = "lenient_i64")]
    pub quantity: i64,
    pub unit: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i32,
}

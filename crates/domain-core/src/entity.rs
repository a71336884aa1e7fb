//! 领域实体
//!
//! 所有实体都属于某个农场主（`OwnerId`），序列化字段名与前端约定一致（camelCase）

use chrono::NaiveDate;
use farmsync_common::{ExternalUserId, OwnerId};
use serde::Serialize;

use crate::kinds::{AttendanceStatus, EntryType, PayType};

/// 农场主账号
#[derive(Debug, Clone)]
pub struct User {
    pub id: OwnerId,
    pub external_id: ExternalUserId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// 工人
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: i32,
    #[serde(skip)]
    pub owner_id: OwnerId,
    pub name: String,
    pub role: String,
    pub pay_rate: i64,
    pub pay_type: PayType,
    /// 未偿还借款余额
    pub loans: i64,
    #[serde(rename = "active")]
    pub is_active: bool,
}

/// 考勤记录，每个工人每天最多一条
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub worker_id: i32,
    pub attendance_date: NaiveDate,
    pub status: AttendanceStatus,
    pub hours: i32,
}

/// 收成记录
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Yield {
    pub id: i32,
    #[serde(skip)]
    pub owner_id: OwnerId,
    pub crop_name: String,
    pub quantity: i64,
    pub unit: String,
    pub date_recorded: NaiveDate,
}

/// 销售记录
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i32,
    #[serde(skip)]
    pub owner_id: OwnerId,
    #[serde(skip)]
    pub yield_id: Option<i32>,
    /// 销售时的作物名快照
    pub crop_name: String,
    #[serde(rename = "quantity")]
    pub quantity_sold: i64,
    pub price: i64,
    #[serde(rename = "seller")]
    pub seller_name: String,
    #[serde(rename = "date")]
    pub date_of_sale: NaiveDate,
}

/// 收支流水（只追加）
#[derive(Debug, Clone, Serialize)]
pub struct FinancialEntry {
    pub id: i32,
    #[serde(skip)]
    pub owner_id: OwnerId,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub description: String,
    pub amount: i64,
    #[serde(rename = "date")]
    pub transaction_date: NaiveDate,
    #[serde(rename = "crop")]
    pub crop_name: Option<String>,
    #[serde(skip)]
    pub worker_id: Option<i32>,
}

/// 库存物品
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: i32,
    #[serde(skip)]
    pub owner_id: OwnerId,
    pub item_name: String,
    pub item_type: String,
    pub quantity: i64,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_worker_wire_shape() {
        let worker = Worker {
            id: 3,
            owner_id: OwnerId::new(1),
            name: "Amina".to_string(),
            role: "Picker".to_string(),
            pay_rate: 100,
            pay_type: PayType::Daily,
            loans: 0,
            is_active: true,
        };

        assert_eq!(
            serde_json::to_value(&worker).unwrap(),
            json!({
                "id": 3,
                "name": "Amina",
                "role": "Picker",
                "payRate": 100,
                "payType": "Daily",
                "loans": 0,
                "active": true
            })
        );
    }

    #[test]
    fn test_financial_wire_shape() {
        let entry = FinancialEntry {
            id: 9,
            owner_id: OwnerId::new(1),
            entry_type: EntryType::Revenue,
            description: "Sale of Maize".to_string(),
            amount: 500,
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            crop_name: Some("Maize".to_string()),
            worker_id: None,
        };

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "id": 9,
                "type": "Revenue",
                "description": "Sale of Maize",
                "amount": 500,
                "date": "2024-03-05",
                "crop": "Maize"
            })
        );
    }

    #[test]
    fn test_sale_wire_shape() {
        let sale = Sale {
            id: 1,
            owner_id: OwnerId::new(1),
            yield_id: Some(2),
            crop_name: "Beans".to_string(),
            quantity_sold: 10,
            price: 250,
            seller_name: "Coop".to_string(),
            date_of_sale: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        };
        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(value["quantity"], 10);
        assert_eq!(value["seller"], "Coop");
        assert_eq!(value["date"], "2024-03-05");
        assert!(value.get("yieldId").is_none());
    }
}

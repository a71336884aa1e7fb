//! 财务相关命令定义

use chrono::NaiveDate;
use farmsync_domain::{EntryType, ledger::MAX_DESCRIPTION_CHARS};

/// 长度按去掉首尾空白后的字符数计算，与入库的值一致
fn require_text(value: &str, field: &str, max_len: usize) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    if value.chars().count() > max_len {
        return Err(format!("{} cannot exceed {} characters", field, max_len));
    }
    Ok(())
}

/// 登记收成
#[derive(Debug, Clone)]
pub struct RecordYieldCommand {
    pub crop_name: String,
    pub quantity: i64,
    pub unit: String,
    pub today: NaiveDate,
}

impl RecordYieldCommand {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.crop_name, "Crop name", 100)?;
        require_text(&self.unit, "Unit", 20)?;
        if self.quantity < 0 {
            return Err("Quantity must not be negative".to_string());
        }
        Ok(())
    }
}

/// 记录销售
///
/// `price` 即本次销售的收入金额
#[derive(Debug, Clone)]
pub struct RecordSaleCommand {
    pub yield_id: i32,
    pub quantity: i64,
    pub price: i64,
    pub seller: String,
    pub today: NaiveDate,
}

impl RecordSaleCommand {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity <= 0 {
            return Err("Quantity sold must be positive".to_string());
        }
        if self.price < 0 {
            return Err("Price must not be negative".to_string());
        }
        require_text(&self.seller, "Seller", 100)
    }
}

/// 手工记一笔收入或支出
#[derive(Debug, Clone)]
pub struct RecordEntryCommand {
    pub entry_type: EntryType,
    pub description: String,
    pub amount: i64,
    pub crop_name: Option<String>,
    pub today: NaiveDate,
}

impl RecordEntryCommand {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.description, "Description", MAX_DESCRIPTION_CHARS)?;
        if self.amount < 0 {
            return Err("Amount must not be negative".to_string());
        }
        // 空白作物名按未填处理
        match self.crop_name.as_deref().map(str::trim) {
            Some(crop) if !crop.is_empty() => require_text(crop, "Crop name", 100),
            _ => Ok(()),
        }
    }
}

/// 新增库存物品
#[derive(Debug, Clone)]
pub struct AddInventoryCommand {
    pub item_name: String,
    pub item_type: String,
    pub quantity: i64,
    pub unit: String,
}

impl AddInventoryCommand {
    pub fn validate(&self) -> Result<(), String> {
        require_text(&self.item_name, "Item name", 100)?;
        require_text(&self.item_type, "Item type", 50)?;
        require_text(&self.unit, "Unit", 20)?;
        if self.quantity < 0 {
            return Err("Quantity must not be negative".to_string());
        }
        Ok(())
    }
}

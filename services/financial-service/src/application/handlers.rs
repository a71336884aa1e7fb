//! 财务命令 / 查询处理器

use chrono::NaiveDate;
use farmsync_adapter_postgres::{
    NewFinancialEntry, NewInventoryItem, NewSale, NewYield, PgPool, PostgresFinancialRepository,
    PostgresInventoryRepository, PostgresSaleRepository, PostgresWorkerRepository,
    PostgresYieldRepository, TransactionManager,
};
use farmsync_common::OwnerId;
use farmsync_domain::{
    Dashboard, EntryType, FarmMetrics, FinancialEntry, InventoryItem, Sale, TrendWindow, Yield,
    ledger::{fold_trend, sale_description},
};
use farmsync_errors::{AppError, AppResult};
use farmsync_telemetry::{increment, names};
use tracing::info;

use super::commands::*;

/// 财务命令 / 查询处理器
pub struct FinancialHandler {
    yields: PostgresYieldRepository,
    sales: PostgresSaleRepository,
    financials: PostgresFinancialRepository,
    inventory: PostgresInventoryRepository,
    workers: PostgresWorkerRepository,
    tx_manager: TransactionManager,
}

impl FinancialHandler {
    pub fn new(pool: PgPool) -> Self {
        Self {
            yields: PostgresYieldRepository::new(pool.clone()),
            sales: PostgresSaleRepository::new(pool.clone()),
            financials: PostgresFinancialRepository::new(pool.clone()),
            inventory: PostgresInventoryRepository::new(pool.clone()),
            workers: PostgresWorkerRepository::new(pool.clone()),
            tx_manager: TransactionManager::new(pool),
        }
    }

    /// 仪表盘：收支合计、收成总量、在职工人数和月度趋势
    pub async fn handle_dashboard(
        &self,
        owner: OwnerId,
        window: TrendWindow,
        today: NaiveDate,
    ) -> AppResult<Dashboard> {
        let (financial_summary, total_yield, active_workers, monthly) = tokio::try_join!(
            self.financials.summary(owner),
            self.yields.total_quantity(owner),
            self.workers.count_active(owner),
            self.financials.monthly_totals(owner, window.start(today)),
        )?;

        Ok(Dashboard {
            financial_summary,
            metrics: FarmMetrics {
                total_yield,
                active_workers,
            },
            financial_trends: fold_trend(monthly),
        })
    }

    pub async fn handle_list_yields(&self, owner: OwnerId) -> AppResult<Vec<Yield>> {
        self.yields.list(owner).await
    }

    /// 登记收成
    pub async fn handle_record_yield(&self, owner: OwnerId, cmd: RecordYieldCommand) -> AppResult<i32> {
        cmd.validate().map_err(AppError::validation)?;

        let id = self
            .yields
            .create(
                owner,
                &NewYield {
                    crop_name: cmd.crop_name.trim().to_string(),
                    quantity: cmd.quantity,
                    unit: cmd.unit.trim().to_string(),
                    date_recorded: cmd.today,
                },
            )
            .await?;

        info!(owner_id = %owner, yield_id = id, quantity = cmd.quantity, "Yield added");
        Ok(id)
    }

    pub async fn handle_list_sales(&self, owner: OwnerId) -> AppResult<Vec<Sale>> {
        self.sales.list(owner).await
    }

    /// 记录销售：写销售记录、扣减收成、记一笔收入，三步在同一事务内
    pub async fn handle_record_sale(&self, owner: OwnerId, cmd: RecordSaleCommand) -> AppResult<i32> {
        cmd.validate().map_err(AppError::validation)?;

        let mut tx = self.tx_manager.begin().await?;

        let crop = PostgresYieldRepository::lock(&mut *tx, owner, cmd.yield_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invalid crop ID"))?;

        let sale_id = PostgresSaleRepository::insert(
            &mut *tx,
            owner,
            &NewSale {
                yield_id: crop.id,
                crop_name: crop.crop_name.clone(),
                quantity_sold: cmd.quantity,
                price: cmd.price,
                seller_name: cmd.seller.trim().to_string(),
                date_of_sale: cmd.today,
            },
        )
        .await?;

        let remaining = PostgresYieldRepository::decrement(&mut *tx, crop.id, cmd.quantity).await?;

        PostgresFinancialRepository::insert(
            &mut *tx,
            owner,
            &NewFinancialEntry {
                entry_type: EntryType::Revenue,
                description: sale_description(&crop.crop_name),
                amount: cmd.price,
                transaction_date: cmd.today,
                crop_name: Some(crop.crop_name.clone()),
                worker_id: None,
            },
        )
        .await?;

        TransactionManager::commit(tx).await?;
        increment(names::SALES_RECORDED);

        info!(
            owner_id = %owner,
            sale_id,
            yield_id = crop.id,
            quantity = cmd.quantity,
            price = cmd.price,
            remaining,
            "Sale recorded"
        );
        Ok(sale_id)
    }

    pub async fn handle_list_entries(&self, owner: OwnerId) -> AppResult<Vec<FinancialEntry>> {
        self.financials.list(owner).await
    }

    /// 手工记账
    pub async fn handle_record_entry(&self, owner: OwnerId, cmd: RecordEntryCommand) -> AppResult<i32> {
        cmd.validate().map_err(AppError::validation)?;

        let crop_name = cmd
            .crop_name
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        let id = self
            .financials
            .create(
                owner,
                &NewFinancialEntry {
                    entry_type: cmd.entry_type,
                    description: cmd.description.trim().to_string(),
                    amount: cmd.amount,
                    transaction_date: cmd.today,
                    crop_name,
                    worker_id: None,
                },
            )
            .await?;

        info!(
            owner_id = %owner,
            entry_id = id,
            entry_type = %cmd.entry_type,
            amount = cmd.amount,
            "Financial entry recorded"
        );
        Ok(id)
    }

    pub async fn handle_list_inventory(&self, owner: OwnerId) -> AppResult<Vec<InventoryItem>> {
        self.inventory.list(owner).await
    }

    pub async fn handle_add_inventory(&self, owner: OwnerId, cmd: AddInventoryCommand) -> AppResult<i32> {
        cmd.validate().map_err(AppError::validation)?;

        let id = self
            .inventory
            .create(
                owner,
                &NewInventoryItem {
                    item_name: cmd.item_name.trim().to_string(),
                    item_type: cmd.item_type.trim().to_string(),
                    quantity: cmd.quantity,
                    unit: cmd.unit.trim().to_string(),
                },
            )
            .await?;

        info!(owner_id = %owner, item_id = id, "Inventory item added");
        Ok(id)
    }
}

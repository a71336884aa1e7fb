//! 路由处理函数

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use farmsync_adapter_postgres::PgPool;
use farmsync_auth_core::AuthClaims;
use farmsync_domain::{Dashboard, EntryType, FinancialEntry, InventoryItem, Sale, TrendWindow, Yield};
use farmsync_errors::{ApiJson, ApiQuery, AppResult};

use super::dto::*;
use crate::application::*;

type Created = (StatusCode, Json<CreatedResponse>);

fn created(message: &'static str, id: i32) -> Created {
    (StatusCode::CREATED, Json(CreatedResponse { message, id }))
}

pub async fn dashboard(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> AppResult<Json<Dashboard>> {
    let dashboard = FinancialHandler::new(pool)
        .handle_dashboard(
            claims.owner_id(),
            TrendWindow::new(query.months),
            Utc::now().date_naive(),
        )
        .await?;
    Ok(Json(dashboard))
}

pub async fn list_yields(
    State(pool): State<PgPool>,
    claims: AuthClaims,
) -> AppResult<Json<Vec<Yield>>> {
    let yields = FinancialHandler::new(pool).handle_list_yields(claims.owner_id()).await?;
    Ok(Json(yields))
}

pub async fn record_yield(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<YieldRequest>,
) -> AppResult<Created> {
    let id = FinancialHandler::new(pool)
        .handle_record_yield(
            claims.owner_id(),
            RecordYieldCommand {
                crop_name: req.name,
                quantity: req.quantity,
                unit: req.unit,
                today: Utc::now().date_naive(),
            },
        )
        .await?;
    Ok(created("Yield added successfully!", id))
}

pub async fn list_sales(
    State(pool): State<PgPool>,
    claims: AuthClaims,
) -> AppResult<Json<Vec<Sale>>> {
    let sales = FinancialHandler::new(pool).handle_list_sales(claims.owner_id()).await?;
    Ok(Json(sales))
}

pub async fn record_sale(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<SaleRequest>,
) -> AppResult<Created> {
    let id = FinancialHandler::new(pool)
        .handle_record_sale(
            claims.owner_id(),
            RecordSaleCommand {
                yield_id: req.crop_id,
                quantity: req.quantity,
                price: req.price,
                seller: req.seller,
                today: Utc::now().date_naive(),
            },
        )
        .await?;
    Ok(created("Sale recorded successfully!", id))
}

pub async fn list_entries(
    State(pool): State<PgPool>,
    claims: AuthClaims,
) -> AppResult<Json<Vec<FinancialEntry>>> {
    let entries = FinancialHandler::new(pool).handle_list_entries(claims.owner_id()).await?;
    Ok(Json(entries))
}

async fn record_entry(
    pool: PgPool,
    claims: AuthClaims,
    entry_type: EntryType,
    req: EntryRequest,
) -> AppResult<i32> {
    FinancialHandler::new(pool)
        .handle_record_entry(
            claims.owner_id(),
            RecordEntryCommand {
                entry_type,
                description: req.description,
                amount: req.amount,
                crop_name: req.crop_name,
                today: Utc::now().date_naive(),
            },
        )
        .await
}

pub async fn record_revenue(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<EntryRequest>,
) -> AppResult<Created> {
    let id = record_entry(pool, claims, EntryType::Revenue, req).await?;
    Ok(created("Revenue recorded successfully!", id))
}

pub async fn record_expense(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<EntryRequest>,
) -> AppResult<Created> {
    let id = record_entry(pool, claims, EntryType::Expense, req).await?;
    Ok(created("Expense recorded successfully!", id))
}

pub async fn list_inventory(
    State(pool): State<PgPool>,
    claims: AuthClaims,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = FinancialHandler::new(pool).handle_list_inventory(claims.owner_id()).await?;
    Ok(Json(items))
}

pub async fn add_inventory(
    State(pool): State<PgPool>,
    claims: AuthClaims,
    ApiJson(req): ApiJson<InventoryRequest>,
) -> AppResult<Created> {
    let id = FinancialHandler::new(pool)
        .handle_add_inventory(
            claims.owner_id(),
            AddInventoryCommand {
                item_name: req.name,
                item_type: req.item_type,
                quantity: req.quantity,
                unit: req.unit,
            },
        )
        .await?;
    Ok(created("Inventory item added successfully!", id))
}

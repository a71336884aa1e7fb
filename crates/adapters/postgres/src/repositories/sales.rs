//! PostgreSQL 销售 Repository

use chrono::NaiveDate;
use farmsync_common::OwnerId;
use farmsync_domain::Sale;
use farmsync_errors::{AppError, AppResult};
use sqlx::{PgConnection, PgPool};

#[derive(sqlx::FromRow)]
struct SaleRow {
    id: i32,
    user_id: i32,
    yield_id: Option<i32>,
    crop_name: String,
    quantity_sold: i64,
    price: i64,
    seller_name: String,
    date_of_sale: NaiveDate,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            id: row.id,
            owner_id: OwnerId::new(row.user_id),
            yield_id: row.yield_id,
            crop_name: row.crop_name,
            quantity_sold: row.quantity_sold,
            price: row.price,
            seller_name: row.seller_name,
            date_of_sale: row.date_of_sale,
        }
    }
}

/// 新增销售
#[derive(Debug, Clone)]
pub struct NewSale {
    pub yield_id: i32,
    pub crop_name: String,
    pub quantity_sold: i64,
    pub price: i64,
    pub seller_name: String,
    pub date_of_sale: NaiveDate,
}

#[derive(Clone)]
pub struct PostgresSaleRepository {
    pool: PgPool,
}

impl PostgresSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 最新记录在前
    pub async fn list(&self, owner: OwnerId) -> AppResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            r#"
            SELECT id, user_id, yield_id, crop_name, quantity_sold, price, seller_name, date_of_sale
            FROM sales
            WHERE user_id = $1
            ORDER BY date_of_sale DESC, id DESC
            "#,
        )
        .bind(owner.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list sales: {}", e)))?;

        Ok(rows.into_iter().map(Sale::from).collect())
    }

    pub async fn insert(conn: &mut PgConnection, owner: OwnerId, sale: &NewSale) -> AppResult<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO sales (user_id, yield_id, crop_name, quantity_sold, price, seller_name, date_of_sale)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(owner.as_i32())
        .bind(sale.yield_id)
        .bind(&sale.crop_name)
        .bind(sale.quantity_sold)
        .bind(sale.price)
        .bind(&sale.seller_name)
        .bind(sale.date_of_sale)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to record sale: {}", e)))?;

        Ok(id)
    }
}

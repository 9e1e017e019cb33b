//! Scan log store
//!
//! Append-only apart from [`transition_status`], which reconciliation uses to
//! rewrite status/details in bulk. `item_ids` is written once on insert.

use shared::models::{
    DashboardStats, FULFILLED_FAMILY, NewScanLog, ScanLog, ScanLogStatus, parse_item_marker,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::BoxError;

const COLUMNS: &str = "id, shop, order_id, status, scanned_by, staff_email, details, item_ids, timestamp";

#[derive(Debug, sqlx::FromRow)]
struct ScanLogRow {
    id: i64,
    shop: String,
    order_id: String,
    status: String,
    scanned_by: String,
    staff_email: String,
    details: String,
    item_ids: Option<String>,
    timestamp: i64,
}

impl From<ScanLogRow> for ScanLog {
    fn from(row: ScanLogRow) -> Self {
        let item_ids = match row.item_ids.as_deref().map(serde_json::from_str::<Vec<String>>) {
            Some(Ok(ids)) => ids,
            Some(Err(e)) => {
                tracing::warn!(log_id = row.id, error = %e, "Unreadable item_ids column, using details marker");
                parse_item_marker(&row.details).unwrap_or_default()
            }
            // legacy row
            None => parse_item_marker(&row.details).unwrap_or_default(),
        };
        Self {
            id: row.id,
            shop: row.shop,
            order_id: row.order_id,
            status: ScanLogStatus::from(row.status),
            scanned_by: row.scanned_by,
            staff_email: row.staff_email,
            details: row.details,
            item_ids,
            timestamp: row.timestamp,
        }
    }
}

/// Append a scan log, returning its id
pub async fn insert(pool: &SqlitePool, entry: &NewScanLog) -> Result<i64, BoxError> {
    let item_ids = serde_json::to_string(&entry.item_ids)?;
    let result = sqlx::query(
        "INSERT INTO scan_logs (shop, order_id, status, scanned_by, staff_email, details, item_ids, timestamp) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&entry.shop)
    .bind(&entry.order_id)
    .bind(entry.status.label())
    .bind(&entry.scanned_by)
    .bind(&entry.staff_email)
    .bind(&entry.details)
    .bind(item_ids)
    .bind(entry.timestamp)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Newest FULFILLED / PARTIALLY FULFILLED log for an order
pub async fn latest_fulfilled(
    pool: &SqlitePool,
    shop: &str,
    order_id: &str,
) -> Result<Option<ScanLog>, BoxError> {
    let row: Option<ScanLogRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM scan_logs \
         WHERE shop = ? AND order_id = ? AND status IN (?, ?) \
         ORDER BY timestamp DESC, id DESC LIMIT 1"
    ))
    .bind(shop)
    .bind(order_id)
    .bind(FULFILLED_FAMILY[0])
    .bind(FULFILLED_FAMILY[1])
    .fetch_optional(pool)
    .await?;
    Ok(row.map(ScanLog::from))
}

/// Every FULFILLED / PARTIALLY FULFILLED log for an order, newest first
pub async fn list_fulfilled(
    pool: &SqlitePool,
    shop: &str,
    order_id: &str,
) -> Result<Vec<ScanLog>, BoxError> {
    let rows: Vec<ScanLogRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM scan_logs \
         WHERE shop = ? AND order_id = ? AND status IN (?, ?) \
         ORDER BY timestamp DESC, id DESC"
    ))
    .bind(shop)
    .bind(order_id)
    .bind(FULFILLED_FAMILY[0])
    .bind(FULFILLED_FAMILY[1])
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ScanLog::from).collect())
}

/// Every log for an order regardless of status, newest first
pub async fn history(
    pool: &SqlitePool,
    shop: &str,
    order_id: &str,
) -> Result<Vec<ScanLog>, BoxError> {
    let rows: Vec<ScanLogRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM scan_logs WHERE shop = ? AND order_id = ? \
         ORDER BY timestamp DESC, id DESC"
    ))
    .bind(shop)
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ScanLog::from).collect())
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Paginated search over order id, actor name and actor email
///
/// `page` is 1-based. Returns the page and the total match count.
pub async fn search(
    pool: &SqlitePool,
    shop: &str,
    query: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<(Vec<ScanLog>, u64), BoxError> {
    let pattern = query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(|q| format!("%{}%", escape_like(q)));
    let offset = i64::from(page.saturating_sub(1)) * i64::from(limit);

    const FILTER: &str = "WHERE shop = ? AND (? IS NULL \
         OR order_id LIKE ? ESCAPE '\\' \
         OR scanned_by LIKE ? ESCAPE '\\' \
         OR staff_email LIKE ? ESCAPE '\\')";

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM scan_logs {FILTER}"))
        .bind(shop)
        .bind(pattern.as_deref())
        .bind(pattern.as_deref())
        .bind(pattern.as_deref())
        .bind(pattern.as_deref())
        .fetch_one(pool)
        .await?;

    let rows: Vec<ScanLogRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM scan_logs {FILTER} \
         ORDER BY timestamp DESC, id DESC LIMIT ? OFFSET ?"
    ))
    .bind(shop)
    .bind(pattern.as_deref())
    .bind(pattern.as_deref())
    .bind(pattern.as_deref())
    .bind(pattern.as_deref())
    .bind(i64::from(limit))
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((
        rows.into_iter().map(ScanLog::from).collect(),
        total.max(0) as u64,
    ))
}

/// Dashboard counters; `since` is the start of "today" in Unix millis
pub async fn dashboard_stats(
    pool: &SqlitePool,
    shop: &str,
    since: i64,
) -> Result<DashboardStats, BoxError> {
    let fulfilled = ScanLogStatus::Fulfilled;

    let scans_today: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM scan_logs WHERE shop = ? AND status = ? AND timestamp >= ?",
    )
    .bind(shop)
    .bind(fulfilled.label())
    .bind(since)
    .fetch_one(pool)
    .await?;

    let total_fulfilled: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT order_id) FROM scan_logs WHERE shop = ? AND status = ?",
    )
    .bind(shop)
    .bind(fulfilled.label())
    .fetch_one(pool)
    .await?;

    Ok(DashboardStats {
        scans_today: scans_today.max(0) as u64,
        total_fulfilled: total_fulfilled.max(0) as u64,
    })
}

/// Rewrite status and details of every log of an order currently in `from`
///
/// Single UPDATE, so rows already in `to` are untouched on redelivery.
/// Returns the number of rows changed.
pub async fn transition_status(
    pool: &SqlitePool,
    shop: &str,
    order_id: &str,
    from: &[ScanLogStatus],
    to: &ScanLogStatus,
    details: &str,
) -> Result<u64, BoxError> {
    if from.is_empty() {
        return Ok(0);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE scan_logs SET status = ");
    qb.push_bind(to.label().to_string())
        .push(", details = ")
        .push_bind(details.to_string())
        .push(" WHERE shop = ")
        .push_bind(shop.to_string())
        .push(" AND order_id = ")
        .push_bind(order_id.to_string())
        .push(" AND status IN (");
    let mut statuses = qb.separated(", ");
    for status in from {
        statuses.push_bind(status.label().to_string());
    }
    statuses.push_unseparated(")");

    let result = qb.build().execute(pool).await?;
    Ok(result.rows_affected())
}

//! Settings and staff lookups

use shared::models::{AppSettings, StaffMember};
use sqlx::SqlitePool;

use crate::BoxError;

/// Load the shop's settings, inserting defaults on first read
pub async fn get_or_create(pool: &SqlitePool, shop: &str) -> Result<AppSettings, BoxError> {
    let defaults = AppSettings::with_defaults(shop);
    sqlx::query(
        "INSERT INTO app_settings (shop, admin_name, admin_pin) VALUES (?, ?, ?) \
         ON CONFLICT (shop) DO NOTHING",
    )
    .bind(&defaults.shop)
    .bind(&defaults.admin_name)
    .bind(&defaults.admin_pin)
    .execute(pool)
    .await?;

    let settings: AppSettings =
        sqlx::query_as("SELECT shop, admin_name, admin_pin FROM app_settings WHERE shop = ?")
            .bind(shop)
            .fetch_one(pool)
            .await?;
    Ok(settings)
}

/// Staff member whose name or email matches `identifier` (case-insensitive)
/// and whose PIN matches exactly
pub async fn find_staff(
    pool: &SqlitePool,
    shop: &str,
    identifier: &str,
    pin: &str,
) -> Result<Option<StaffMember>, BoxError> {
    let member: Option<StaffMember> = sqlx::query_as(
        "SELECT id, shop, name, email, pin FROM staff \
         WHERE shop = ? AND (LOWER(name) = LOWER(?) OR LOWER(email) = LOWER(?)) AND pin = ? \
         ORDER BY id LIMIT 1",
    )
    .bind(shop)
    .bind(identifier)
    .bind(identifier)
    .bind(pin)
    .fetch_optional(pool)
    .await?;
    Ok(member)
}

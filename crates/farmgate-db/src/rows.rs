//! Shared row-decoding helpers.

use farmgate_commerce::money::{Currency, Money};
use sqlx::postgres::PgRow;
use sqlx::Row;

/// Build a `ColumnDecode` error for a column whose stored value cannot be
/// mapped back into a domain type.
pub(crate) fn decode_error(column: &str, message: impl Into<String>) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: message.into().into(),
    }
}

/// Decode a (amount, currency-code) column pair into [`Money`].
pub(crate) fn money_from_row(
    row: &PgRow,
    amount_column: &str,
    currency_column: &str,
) -> sqlx::Result<Money> {
    let amount: i64 = row.try_get(amount_column)?;
    let code: String = row.try_get(currency_column)?;
    let currency = Currency::from_code(&code)
        .ok_or_else(|| decode_error(currency_column, format!("unknown currency code: {code}")))?;
    Ok(Money::new(amount, currency))
}

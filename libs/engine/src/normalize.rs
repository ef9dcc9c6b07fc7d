use chrono::{TimeZone, Utc};
use explorer::model::RawTransfer;
use eyre::{eyre, Result, WrapErr};
use rust_decimal::Decimal;
use store::ledger::model::TransferRecord;

const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Convert one raw API entry into a storable record. Fails on malformed
/// entries; the sweep logs and skips those rather than aborting.
pub fn to_record(contract_address: &str, raw: &RawTransfer) -> Result<TransferRecord> {
    let block_number: i64 = raw
        .block_number
        .parse()
        .wrap_err_with(|| format!("unparseable block number: {:?}", raw.block_number))?;

    let unix: i64 = raw
        .time_stamp
        .parse()
        .wrap_err_with(|| format!("unparseable timestamp: {:?}", raw.time_stamp))?;
    let occurred_at = Utc
        .timestamp_opt(unix, 0)
        .single()
        .ok_or_else(|| eyre!("timestamp out of range: {unix}"))?;

    let amount = scale_amount(&raw.value, token_decimals(raw))?;

    Ok(TransferRecord {
        contract_address: contract_address.to_string(),
        tx_hash: raw.hash.clone(),
        occurred_at,
        block_number,
        from_address: raw.from.clone(),
        to_address: raw.to.clone(),
        amount: amount.to_string(),
    })
}

fn token_decimals(raw: &RawTransfer) -> u32 {
    raw.token_decimal
        .as_deref()
        .filter(|field| !field.is_empty())
        .and_then(|field| field.parse().ok())
        .unwrap_or(DEFAULT_TOKEN_DECIMALS)
}

/// Raw integer value scaled down by `10^decimals`, exactly. Decimal keeps
/// the full digits, so totals never drift the way f64 division would.
pub fn scale_amount(value: &str, decimals: u32) -> Result<Decimal> {
    let raw: i128 =
        value.parse().wrap_err_with(|| format!("unparseable transfer value: {value:?}"))?;

    let amount = Decimal::try_from_i128_with_scale(raw, decimals)
        .map_err(|e| eyre!("transfer value {value:?} does not fit a decimal: {e}"))?;

    Ok(amount.normalize())
}

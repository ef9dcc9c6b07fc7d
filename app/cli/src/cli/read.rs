use std::path::Path;

use eyre::{eyre, Result, WrapErr};

/// Load the explorer API key from a local credential file. A missing or
/// empty file is fatal at startup, never mid-run.
pub fn load_api_key(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read the API key file {}", path.display()))?;

    let key = raw.trim();
    if key.is_empty() {
        return Err(eyre!("API key file {} is empty", path.display()));
    }

    Ok(key.to_string())
}

pub fn parse_contract(input: &str) -> Result<String> {
    let address = input.trim();
    let digits = address
        .strip_prefix("0x")
        .ok_or_else(|| eyre!("contract address must be 0x-prefixed: {address:?}"))?;

    if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(eyre!("contract address must be 20 hex bytes: {address:?}"));
    }

    Ok(address.to_string())
}

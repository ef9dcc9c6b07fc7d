use std::time::Duration;

use eyre::Result;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::model::RawTransfer;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The explorer caps `endblock`; passing the maximum asks for the whole chain.
const MAX_END_BLOCK: u64 = 99_999_999;

/// Status "0" with this message is the explorer's way of reporting an empty
/// result set, not a failure.
const NO_TRANSACTIONS: &str = "No transactions found";

/// Envelope shared by all `module=account` responses.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    message: String,
    result: Value,
}

/// `module=proxy` responses skip the status/message pair.
#[derive(Debug, Deserialize)]
struct ProxyEnvelope {
    result: String,
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl Client {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Block number of the oldest transfer the explorer knows for `contract`,
    /// or `None` when the contract has no transfer history at all.
    pub async fn first_transfer_block(
        &self,
        contract: &str,
    ) -> Result<Option<u64>, FetchError> {
        let transfers = self.token_tx(contract, 0, MAX_END_BLOCK).await?;
        match transfers.first() {
            None => Ok(None),
            Some(transfer) => parse_block_number(&transfer.block_number).map(Some),
        }
    }

    /// Current chain height, from the hex-encoded `eth_blockNumber` proxy call.
    pub async fn current_block(&self) -> Result<u64, FetchError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "proxy"),
                ("action", "eth_blockNumber"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: ProxyEnvelope = response.json().await?;
        parse_hex_block(&envelope.result)
    }

    /// Transfers for `contract` within the inclusive block range, ascending.
    /// An empty page is a normal result, not an error.
    pub async fn transfer_page(
        &self,
        contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawTransfer>, FetchError> {
        self.token_tx(contract, from_block, to_block).await
    }

    async fn token_tx(
        &self,
        contract: &str,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawTransfer>, FetchError> {
        let from_block = from_block.to_string();
        let to_block = to_block.to_string();
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("module", "account"),
                ("action", "tokentx"),
                ("contractaddress", contract),
                ("startblock", from_block.as_str()),
                ("endblock", to_block.as_str()),
                ("sort", "asc"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: Envelope = response.json().await?;
        parse_token_tx(envelope)
    }
}

fn parse_token_tx(envelope: Envelope) -> Result<Vec<RawTransfer>, FetchError> {
    if envelope.status != "1" {
        if envelope.message.starts_with(NO_TRANSACTIONS) {
            return Ok(Vec::new());
        }
        // Rate limits and invalid queries arrive with the detail in `result`.
        let detail = match &envelope.result {
            Value::String(s) if !s.is_empty() => format!("{} ({s})", envelope.message),
            _ => envelope.message,
        };
        return Err(FetchError::Upstream { message: detail });
    }

    serde_json::from_value(envelope.result)
        .map_err(|e| FetchError::InvalidPayload(format!("malformed tokentx result: {e}")))
}

fn parse_hex_block(raw: &str) -> Result<u64, FetchError> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    u64::from_str_radix(digits, 16)
        .map_err(|_| FetchError::InvalidPayload(format!("malformed block number: {raw:?}")))
}

fn parse_block_number(raw: &str) -> Result<u64, FetchError> {
    raw.parse()
        .map_err(|_| FetchError::InvalidPayload(format!("malformed block number: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> Envelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_transfer_entries() {
        let envelope = envelope(
            r#"{
                "status": "1",
                "message": "OK",
                "result": [{
                    "blockNumber": "4730207",
                    "timeStamp": "1513240363",
                    "hash": "0xabc",
                    "from": "0x6975be450864c02b4613023c2152ee0743572325",
                    "to": "0x54945180db7943c0ed0fee7edab2bd24620256bc",
                    "value": "21000000000000000000",
                    "tokenDecimal": "18",
                    "tokenSymbol": "XYZ"
                }]
            }"#,
        );

        let transfers = parse_token_tx(envelope).unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].hash, "0xabc");
        assert_eq!(transfers[0].block_number, "4730207");
        assert_eq!(transfers[0].token_decimal.as_deref(), Some("18"));
    }

    #[test]
    fn no_transactions_found_is_an_empty_page() {
        let envelope = envelope(
            r#"{"status": "0", "message": "No transactions found", "result": []}"#,
        );
        assert!(parse_token_tx(envelope).unwrap().is_empty());
    }

    #[test]
    fn other_failure_statuses_are_upstream_errors() {
        let envelope = envelope(
            r#"{"status": "0", "message": "NOTOK", "result": "Max rate limit reached"}"#,
        );
        match parse_token_tx(envelope) {
            Err(FetchError::Upstream { message }) => {
                assert!(message.contains("Max rate limit reached"))
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[test]
    fn non_array_success_result_is_invalid() {
        let envelope = envelope(r#"{"status": "1", "message": "OK", "result": "nope"}"#);
        assert!(matches!(parse_token_tx(envelope), Err(FetchError::InvalidPayload(_))));
    }

    #[test]
    fn missing_token_decimal_deserializes_as_none() {
        let raw: RawTransfer = serde_json::from_str(
            r#"{
                "blockNumber": "100",
                "timeStamp": "1513240363",
                "hash": "0xdef",
                "from": "0x01",
                "to": "0x02",
                "value": "5"
            }"#,
        )
        .unwrap();
        assert!(raw.token_decimal.is_none());
    }

    #[test]
    fn parses_hex_block_numbers() {
        assert_eq!(parse_hex_block("0x10d4f").unwrap(), 68943);
        assert_eq!(parse_hex_block("10d4f").unwrap(), 68943);
        assert!(parse_hex_block("0xzz").is_err());
        assert!(parse_hex_block("").is_err());
    }
}

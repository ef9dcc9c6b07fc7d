use serde::Deserialize;

/// One raw `tokentx` entry as returned by the explorer. Every field is a
/// string on the wire; normalization into typed values happens downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTransfer {
    pub hash: String,
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    pub from: String,
    pub to: String,
    pub value: String,
    /// Scaling exponent for `value`; absent or empty means the ERC-20
    /// default of 18.
    #[serde(rename = "tokenDecimal", default)]
    pub token_decimal: Option<String>,
}

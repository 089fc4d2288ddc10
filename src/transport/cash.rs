use serde::Deserialize;

use crate::domain::Balance;
use crate::transport::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct BalanceWire {
    balance: f64,
    #[serde(default)]
    point: f64,
}

pub fn decode_balance(json: &str) -> Result<Balance, TransportError> {
    let wire: BalanceWire = serde_json::from_str(json)?;
    Ok(Balance {
        balance: wire.balance,
        point: wire.point,
    })
}

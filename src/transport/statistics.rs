use serde::Deserialize;

use crate::domain::Statistics;
use crate::transport::groups::CountWire;
use crate::transport::{TransportError, opt_date};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatisticsWire {
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    count: CountWire,
}

pub fn decode_statistics(json: &str) -> Result<Statistics, TransportError> {
    let wire: StatisticsWire = serde_json::from_str(json)?;
    Ok(Statistics {
        start_date: opt_date(wire.start_date)?,
        end_date: opt_date(wire.end_date)?,
        count: wire.count.into(),
    })
}

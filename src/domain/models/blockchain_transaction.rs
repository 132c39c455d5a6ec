use serde::{Deserialize, Deserializer, Serialize};

/// An externally observed on-chain transaction, as delivered by the
/// blockchain observer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockchainTransaction {
    /// The chain's own transaction id
    pub id: String,

    /// Sending address; matched against account deposit wallet addresses
    pub sender_id: String,

    /// Chain height at which the transaction was observed
    pub height: i64,

    /// Deposited amount; observers send either an integer or a decimal
    /// string, normalized to a string here and canonicalized on storage
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: String,
}

fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    Ok(match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_integer_amount() {
        let tx: BlockchainTransaction =
            serde_json::from_str(r#"{"id":"tx1","sender_id":"addr","height":100,"amount":500}"#)
                .unwrap();
        assert_eq!(tx.amount, "500");
    }

    #[test]
    fn deserializes_string_amount() {
        let tx: BlockchainTransaction =
            serde_json::from_str(r#"{"id":"tx1","sender_id":"addr","height":100,"amount":"500"}"#)
                .unwrap();
        assert_eq!(tx.amount, "500");
    }
}

use async_trait::async_trait;
use xo_core::models::Trade;
use xo_core::traits::TradeFeed;

/// Polls the XRPL exchanges endpoint and reports the newest trade sold by
/// the configured account, i.e. a community buy.
pub struct XrplTradeFeed {
    client: reqwest::Client,
    url: String,
    seller: String,
}

impl XrplTradeFeed {
    pub fn new(client: reqwest::Client, url: impl Into<String>, seller: impl Into<String>) -> Self {
        Self { client, url: url.into(), seller: seller.into() }
    }
}

/// The feed is ordered newest first, so the first match is the latest buy.
fn first_buy(trades: Vec<Trade>, seller: &str) -> Option<Trade> {
    trades.into_iter().find(|t| t.seller == seller)
}

#[async_trait]
impl TradeFeed for XrplTradeFeed {
    async fn latest_buy(&self) -> anyhow::Result<Option<Trade>> {
        let trades: Vec<Trade> = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(first_buy(trades, &self.seller))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELLER: &str = "rQJwonL7jgjHqEfMSYQmvV8RHyjRn1XM3f";

    fn trades() -> Vec<Trade> {
        serde_json::from_str(&format!(
            r#"[
                {{"base_amount": 10.0, "counter_amount": 6.2, "rate": 0.62,
                  "executed_time": "2024-11-20T10:00:02Z", "buyer": "rBuyerOne",
                  "seller": "rSomeoneElse", "tx_hash": "AA"}},
                {{"base_amount": 150.5, "counter_amount": 93.31, "rate": 0.62,
                  "executed_time": "2024-11-20T10:00:01Z", "buyer": "rBuyerTwo",
                  "seller": "{SELLER}", "tx_hash": "BB"}},
                {{"base_amount": 1.0, "counter_amount": 0.62, "rate": 0.62,
                  "executed_time": "2024-11-20T10:00:00Z", "buyer": "rBuyerThree",
                  "seller": "{SELLER}", "tx_hash": "CC"}}
            ]"#
        ))
        .unwrap()
    }

    #[test]
    fn test_first_buy_is_newest_match() {
        let buy = first_buy(trades(), SELLER).unwrap();
        assert_eq!(buy.tx_hash, "BB");
        assert_eq!(buy.buyer, "rBuyerTwo");
    }

    #[test]
    fn test_no_matching_seller() {
        assert!(first_buy(trades(), "rNobody").is_none());
    }
}

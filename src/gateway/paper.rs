//! Paper gateway with simulated responses

use super::{
    ExchangeGateway, GatewayError, PlaceOrderRequest, PlacedOrder, TradingStopRequest,
};
use crate::instrument::InstrumentConstraints;
use crate::order::OrderCategory;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory gateway for tests and dry runs
pub struct PaperGateway {
    constraints: InstrumentConstraints,
    last_price: Arc<RwLock<Decimal>>,
    placed: Arc<RwLock<Vec<PlaceOrderRequest>>>,
    stops: Arc<RwLock<Vec<TradingStopRequest>>>,
}

impl PaperGateway {
    /// Create a paper gateway serving fixed constraints and a starting price
    pub fn new(constraints: InstrumentConstraints, last_price: Decimal) -> Self {
        Self {
            constraints,
            last_price: Arc::new(RwLock::new(last_price)),
            placed: Arc::new(RwLock::new(vec![])),
            stops: Arc::new(RwLock::new(vec![])),
        }
    }

    /// Move the simulated ticker
    pub async fn set_last_price(&self, price: Decimal) {
        *self.last_price.write().await = price;
    }

    /// All placement requests received so far
    pub async fn placed(&self) -> Vec<PlaceOrderRequest> {
        self.placed.read().await.clone()
    }

    /// All trading-stop requests received so far
    pub async fn trading_stops(&self) -> Vec<TradingStopRequest> {
        self.stops.read().await.clone()
    }
}

#[async_trait]
impl ExchangeGateway for PaperGateway {
    async fn instrument_constraints(
        &self,
        _category: OrderCategory,
        _symbol: &str,
    ) -> Result<InstrumentConstraints, GatewayError> {
        Ok(self.constraints.clone())
    }

    async fn last_price(
        &self,
        _category: OrderCategory,
        _symbol: &str,
    ) -> Result<Decimal, GatewayError> {
        Ok(*self.last_price.read().await)
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlacedOrder, GatewayError> {
        let external_id = Uuid::new_v4().to_string();
        let mut placed = self.placed.write().await;
        placed.push(request.clone());
        tracing::info!(%external_id, symbol = %request.symbol, "paper order placed");
        Ok(PlacedOrder { external_id })
    }

    async fn set_trading_stop(&self, request: &TradingStopRequest) -> Result<(), GatewayError> {
        let mut stops = self.stops.write().await;
        stops.push(request.clone());
        tracing::info!(symbol = %request.symbol, kind = ?request.kind, "paper trading stop set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderSide, OrderType};
    use rust_decimal_macros::dec;

    fn constraints() -> InstrumentConstraints {
        InstrumentConstraints {
            tick_size: dec!(0.001),
            min_price: dec!(0.001),
            max_price: dec!(1999.998),
            qty_step: dec!(0.1),
            min_order_qty: dec!(0.1),
            max_order_qty: dec!(52770),
        }
    }

    #[tokio::test]
    async fn test_paper_gateway_place() {
        let gateway = PaperGateway::new(constraints(), dec!(19.180));

        let request = PlaceOrderRequest {
            category: OrderCategory::Linear,
            symbol: "SOLUSDT".to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Limit,
            qty: dec!(10),
            price: dec!(19.180),
            client_order_id: "client-1".to_string(),
            take_profit: Some(dec!(19.854)),
            stop_loss: Some(dec!(18.609)),
        };

        let placed = gateway.place_order(&request).await.unwrap();
        assert!(!placed.external_id.is_empty());

        let seen = gateway.placed().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].symbol, "SOLUSDT");
    }

    #[tokio::test]
    async fn test_paper_gateway_ticker() {
        let gateway = PaperGateway::new(constraints(), dec!(19.180));
        assert_eq!(
            gateway
                .last_price(OrderCategory::Linear, "SOLUSDT")
                .await
                .unwrap(),
            dec!(19.180)
        );

        gateway.set_last_price(dec!(19.422)).await;
        assert_eq!(
            gateway
                .last_price(OrderCategory::Linear, "SOLUSDT")
                .await
                .unwrap(),
            dec!(19.422)
        );
    }
}

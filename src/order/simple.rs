//! Single order with protective ladders
//!
//! A `SimpleOrder` holds one open position, the live mark of that position,
//! and the stop-loss/take-profit ladders protecting it. `update()` derives
//! the per-level loss/profit views and the aggregate risk rate.

use crate::gateway::{
    ExchangeGateway, GatewayError, PlaceOrderRequest, StopKind, TradingStopRequest,
};
use crate::instrument::InstrumentConstraints;
use crate::order::{MarketPosition, OrderCategory, OrderError, OrderSide, OrderType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Loss or profit realized if one ladder level triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelOutcome {
    /// The stop-loss or take-profit level
    pub level: MarketPosition,
    /// Signed loss/profit position at that level
    pub pnl: MarketPosition,
    /// P&L as a fraction of the open value
    pub roi: Decimal,
}

/// A market or limit order with stop-loss and take-profit ladders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleOrder {
    /// Internal order id, used as the client order id at placement
    pub id: Uuid,
    /// Exchange-assigned id, present after successful placement
    pub external_id: Option<String>,
    /// Product category
    pub category: OrderCategory,
    /// Trade side
    pub side: OrderSide,
    /// Execution type
    pub order_type: OrderType,
    /// Instrument symbol
    pub symbol: String,
    /// Exchange granularity, present after fetching
    pub constraints: Option<InstrumentConstraints>,
    /// Open position
    pub open: MarketPosition,
    /// Live position, price follows the ticker
    pub current: MarketPosition,
    /// Stop-loss ladder, kept sorted worst-to-best by `update()`
    pub stop_losses: Vec<MarketPosition>,
    /// Take-profit ladder, kept sorted worst-to-best by `update()`
    pub take_profits: Vec<MarketPosition>,
    /// Loss per stop-loss level against the open position
    pub open_losses: Vec<LevelOutcome>,
    /// Loss per stop-loss level against the live position
    pub current_losses: Vec<LevelOutcome>,
    /// Profit per take-profit level against the open position
    pub open_profits: Vec<LevelOutcome>,
    /// Profit per take-profit level against the live position
    pub current_profits: Vec<LevelOutcome>,
    /// Best-case profit over worst-case loss
    pub risk_rate: Decimal,
}

impl SimpleOrder {
    /// Create an order from its open position.
    ///
    /// Fails when the quantity or price is not strictly positive.
    pub fn new(
        category: OrderCategory,
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        open: MarketPosition,
    ) -> Result<Self, OrderError> {
        if open.qty() <= Decimal::ZERO {
            return Err(OrderError::InvalidQuantity(open.qty()));
        }
        if open.price() <= Decimal::ZERO {
            return Err(OrderError::InvalidOpenPrice(open.price()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            external_id: None,
            category,
            side,
            order_type,
            symbol: symbol.into(),
            constraints: None,
            open,
            current: open,
            stop_losses: vec![],
            take_profits: vec![],
            open_losses: vec![],
            current_losses: vec![],
            open_profits: vec![],
            current_profits: vec![],
            risk_rate: Decimal::ZERO,
        })
    }

    /// Create an order from raw levels.
    ///
    /// A `stop_loss`/`take_profit` of exactly `0` means "none set" and is
    /// skipped. Nonzero levels are bound-checked against the open price.
    #[allow(clippy::too_many_arguments)]
    pub fn from_levels(
        category: OrderCategory,
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        qty: Decimal,
        open_price: Decimal,
        stop_loss: Decimal,
        take_profit: Decimal,
    ) -> Result<Self, OrderError> {
        let mut order = Self::new(
            category,
            symbol,
            side,
            order_type,
            MarketPosition::new(qty, open_price),
        )?;
        if !stop_loss.is_zero() {
            order.add_stop_loss(MarketPosition::new(qty, stop_loss))?;
        }
        if !take_profit.is_zero() {
            order.add_take_profit(MarketPosition::new(qty, take_profit))?;
        }
        Ok(order)
    }

    /// Add a stop-loss level and recompute derived views.
    ///
    /// A Buy stop must sit at or below the open price, a Sell stop at or
    /// above it.
    pub fn add_stop_loss(&mut self, level: MarketPosition) -> Result<(), OrderError> {
        let valid = match self.side {
            OrderSide::Buy => level.price() <= self.open.price(),
            OrderSide::Sell => level.price() >= self.open.price(),
        };
        if !valid {
            return Err(OrderError::InvalidStopLoss {
                stop_loss: level.price(),
                open_price: self.open.price(),
            });
        }
        self.stop_losses.push(level);
        self.update();
        Ok(())
    }

    /// Add a take-profit level and recompute derived views.
    ///
    /// A Buy target must sit at or above the open price, a Sell target at or
    /// below it.
    pub fn add_take_profit(&mut self, level: MarketPosition) -> Result<(), OrderError> {
        let valid = match self.side {
            OrderSide::Buy => level.price() >= self.open.price(),
            OrderSide::Sell => level.price() <= self.open.price(),
        };
        if !valid {
            return Err(OrderError::InvalidTakeProfit {
                take_profit: level.price(),
                open_price: self.open.price(),
            });
        }
        self.take_profits.push(level);
        self.update();
        Ok(())
    }

    /// Recompute every loss/profit view and the risk rate.
    ///
    /// Sorts both ladders worst-to-best for the order's side, then derives
    /// the signed P&L and ROI per level against the open and live positions.
    /// Never fails, including on empty ladders.
    pub fn update(&mut self) {
        match self.side {
            OrderSide::Buy => self.stop_losses.sort_by(|a, b| b.price().cmp(&a.price())),
            OrderSide::Sell => self.stop_losses.sort_by(|a, b| a.price().cmp(&b.price())),
        }

        let open_value = self.open.value();
        self.open_losses.clear();
        self.current_losses.clear();
        for stop_loss in &self.stop_losses {
            let (open_pnl, current_pnl) = match self.side {
                OrderSide::Buy => (self.open - *stop_loss, self.current - *stop_loss),
                OrderSide::Sell => (*stop_loss - self.open, *stop_loss - self.current),
            };
            self.open_losses.push(LevelOutcome {
                level: *stop_loss,
                pnl: open_pnl,
                roi: roi(open_pnl.value(), open_value),
            });
            self.current_losses.push(LevelOutcome {
                level: *stop_loss,
                pnl: current_pnl,
                roi: roi(current_pnl.value(), open_value),
            });
        }

        match self.side {
            OrderSide::Buy => self.take_profits.sort_by(|a, b| a.price().cmp(&b.price())),
            OrderSide::Sell => self.take_profits.sort_by(|a, b| b.price().cmp(&a.price())),
        }

        self.open_profits.clear();
        self.current_profits.clear();
        for take_profit in &self.take_profits {
            let (open_pnl, current_pnl) = match self.side {
                OrderSide::Buy => (*take_profit - self.open, *take_profit - self.current),
                OrderSide::Sell => (self.open - *take_profit, self.current - *take_profit),
            };
            self.open_profits.push(LevelOutcome {
                level: *take_profit,
                pnl: open_pnl,
                roi: roi(open_pnl.value(), open_value),
            });
            self.current_profits.push(LevelOutcome {
                level: *take_profit,
                pnl: current_pnl,
                roi: roi(current_pnl.value(), open_value),
            });
        }

        let max_loss = self.max_loss();
        self.risk_rate = if max_loss.is_zero() {
            Decimal::ZERO
        } else {
            self.max_profit() / max_loss
        };
    }

    /// Order quantity
    pub fn qty(&self) -> Decimal {
        self.open.qty()
    }

    /// Order value at the open price
    pub fn value(&self) -> Decimal {
        self.open.value()
    }

    /// Worst-case loss over the stop-loss ladder, `0` when empty
    pub fn max_loss(&self) -> Decimal {
        self.open_losses
            .iter()
            .map(|outcome| outcome.pnl.value())
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Best-case profit over the take-profit ladder, `0` when empty
    pub fn max_profit(&self) -> Decimal {
        self.open_profits
            .iter()
            .map(|outcome| outcome.pnl.value())
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// Fit the open position and both ladders onto the instrument grid.
    ///
    /// A no-op until constraints have been fetched.
    pub fn fit_positions(&mut self) {
        let Some(constraints) = self.constraints.clone() else {
            return;
        };
        self.open.fit(&constraints);
        for stop_loss in &mut self.stop_losses {
            stop_loss.fit(&constraints);
        }
        for take_profit in &mut self.take_profits {
            take_profit.fit(&constraints);
        }
        self.update();
    }

    /// Fetch and store the instrument constraints for this order's symbol
    pub async fn refresh_constraints(
        &mut self,
        gateway: &dyn ExchangeGateway,
    ) -> Result<(), GatewayError> {
        let constraints = gateway
            .instrument_constraints(self.category, &self.symbol)
            .await?;
        tracing::info!(
            order_id = %self.id,
            symbol = %self.symbol,
            "instrument constraints updated"
        );
        self.constraints = Some(constraints);
        Ok(())
    }

    /// Refresh the live price from the ticker and recompute derived views
    pub async fn refresh_price(
        &mut self,
        gateway: &dyn ExchangeGateway,
    ) -> Result<Decimal, GatewayError> {
        let price = gateway.last_price(self.category, &self.symbol).await?;
        self.current.set_price(price);
        self.update();
        tracing::info!(
            order_id = %self.id,
            symbol = %self.symbol,
            price = %price,
            "current price updated"
        );
        Ok(price)
    }

    /// Place the order, riding the best stop-loss/take-profit on it.
    ///
    /// On success assigns `external_id`, syncs the live quantity, refreshes
    /// the live price, and for Market orders re-bases `open` from the
    /// confirmed mark. On failure the order is left unchanged.
    pub async fn place(&mut self, gateway: &dyn ExchangeGateway) -> Result<(), GatewayError> {
        self.update();
        let request = PlaceOrderRequest {
            category: self.category,
            symbol: self.symbol.clone(),
            side: self.side,
            order_type: self.order_type,
            qty: self.open.qty(),
            price: self.open.price(),
            client_order_id: self.id.to_string(),
            take_profit: self.take_profits.last().map(|tp| tp.price()),
            stop_loss: self.stop_losses.last().map(|sl| sl.price()),
        };

        let placed = gateway.place_order(&request).await?;
        self.external_id = Some(placed.external_id);
        self.current.set_qty(self.open.qty());
        self.refresh_price(gateway).await?;
        if self.order_type == OrderType::Market {
            self.open = self.current;
            self.update();
        }
        tracing::info!(
            order_id = %self.id,
            external_id = ?self.external_id,
            symbol = %self.symbol,
            side = self.side.as_str(),
            qty = %self.open.qty(),
            price = %self.open.price(),
            "order placed"
        );
        Ok(())
    }

    /// Set every ladder level except the last (best) one as a partial
    /// trading stop; the best level already rides on the order itself.
    pub async fn set_partial_stops(
        &self,
        gateway: &dyn ExchangeGateway,
    ) -> Result<(), GatewayError> {
        if let Some((_, partial)) = self.take_profits.split_last() {
            for take_profit in partial {
                let request = TradingStopRequest {
                    category: self.category,
                    symbol: self.symbol.clone(),
                    kind: StopKind::TakeProfit,
                    price: take_profit.price(),
                    qty: take_profit.qty(),
                };
                gateway.set_trading_stop(&request).await?;
                tracing::info!(
                    order_id = %self.id,
                    symbol = %self.symbol,
                    price = %take_profit.price(),
                    "partial take profit set"
                );
            }
        }

        if let Some((_, partial)) = self.stop_losses.split_last() {
            for stop_loss in partial {
                let request = TradingStopRequest {
                    category: self.category,
                    symbol: self.symbol.clone(),
                    kind: StopKind::StopLoss,
                    price: stop_loss.price(),
                    qty: stop_loss.qty(),
                };
                gateway.set_trading_stop(&request).await?;
                tracing::info!(
                    order_id = %self.id,
                    symbol = %self.symbol,
                    price = %stop_loss.price(),
                    "partial stop loss set"
                );
            }
        }

        Ok(())
    }
}

fn roi(pnl: Decimal, open_value: Decimal) -> Decimal {
    if open_value.is_zero() {
        Decimal::ZERO
    } else {
        pnl / open_value
    }
}

use log::info;

use crate::domain::constants::*;
use crate::domain::model::exchange::Instrument;
use crate::domain::model::order::{EditRequest, Order, OrderPlacement, OrderRequest};
use crate::domain::model::order_book::OrderBook;
use crate::domain::model::position::Position;

use super::error::{ExchangeError, ExchangeResult};
use super::models::*;
use super::rpc::RpcClient;
use super::transport::Transport;

/// Typed Deribit API. Each method is exactly one request/response exchange.
///
/// The client is built unauthenticated, used for `public/auth`, then rebuilt
/// with the token via [`DeribitClient::with_token`]. The token is never
/// changed afterwards.
#[derive(Debug, Clone)]
pub struct DeribitClient<T> {
    rpc: RpcClient<T>,
    token: Option<AccessToken>,
    order_book_depth: Option<u32>,
}

impl<T: Transport> DeribitClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            rpc: RpcClient::new(transport),
            token: None,
            order_book_depth: None,
        }
    }

    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn with_order_book_depth(mut self, depth: Option<u32>) -> Self {
        self.order_book_depth = depth;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_ref().map_or(false, |t| !t.is_empty())
    }

    pub fn transport(&self) -> &T {
        self.rpc.transport()
    }

    fn private_token(&self) -> ExchangeResult<&AccessToken> {
        self.token
            .as_ref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ExchangeError::InvalidInput("not authenticated".to_string()))
    }

    fn require(value: &str, field: &str) -> ExchangeResult<()> {
        if value.trim().is_empty() {
            return Err(ExchangeError::InvalidInput(format!("{} cannot be empty", field)));
        }
        Ok(())
    }

    /// `public/auth` with the client credentials grant.
    pub async fn authenticate(&self, credentials: &Credentials, scope: &str) -> ExchangeResult<AccessToken> {
        let params = AuthParams::client_credentials(credentials, scope);
        let result: AuthResult = self.rpc.call(METHOD_AUTH, CALL_ID_AUTH, params, None).await?;

        if result.access_token.is_empty() {
            return Err(ExchangeError::Decode("public/auth returned an empty access_token".to_string()));
        }
        info!(
            "Authenticated as {} (expires in {}s)",
            credentials.client_id,
            result.expires_in.unwrap_or_default()
        );
        Ok(result.access_token)
    }

    pub async fn get_instruments(&self, currency: &str, kind: &str) -> ExchangeResult<Vec<Instrument>> {
        let params = InstrumentsParams { currency, kind };
        self.rpc
            .call(METHOD_GET_INSTRUMENTS, CALL_ID_INSTRUMENTS, params, self.token.as_ref())
            .await
    }

    pub async fn get_instrument(&self, instrument_name: &str) -> ExchangeResult<Instrument> {
        Self::require(instrument_name, "instrument_name")?;
        let params = InstrumentNameParams { instrument_name };
        self.rpc
            .call(METHOD_GET_INSTRUMENT, CALL_ID_INSTRUMENT, params, self.token.as_ref())
            .await
    }

    pub async fn get_order_book(&self, instrument_name: &str) -> ExchangeResult<OrderBook> {
        Self::require(instrument_name, "instrument_name")?;
        let params = OrderBookParams {
            instrument_name,
            depth: self.order_book_depth,
        };
        self.rpc
            .call(METHOD_GET_ORDER_BOOK, CALL_ID_ORDER_BOOK, params, self.token.as_ref())
            .await
    }

    /// `private/buy` or `private/sell`, depending on the request's side.
    pub async fn place_order(&self, request: &OrderRequest) -> ExchangeResult<OrderPlacement> {
        Self::require(&request.instrument_name, "instrument_name")?;
        let token = self.private_token()?;
        self.rpc
            .call(request.side.method(), CALL_ID_PLACE_ORDER, request, Some(token))
            .await
    }

    pub async fn edit_order(&self, request: &EditRequest) -> ExchangeResult<OrderPlacement> {
        Self::require(&request.order_id, "order_id")?;
        let token = self.private_token()?;
        self.rpc.call(METHOD_EDIT, CALL_ID_EDIT, request, Some(token)).await
    }

    pub async fn cancel_order(&self, order_id: &str) -> ExchangeResult<Order> {
        Self::require(order_id, "order_id")?;
        let token = self.private_token()?;
        self.rpc
            .call(METHOD_CANCEL, CALL_ID_CANCEL, OrderIdParams { order_id }, Some(token))
            .await
    }

    pub async fn get_order_state(&self, order_id: &str) -> ExchangeResult<Order> {
        Self::require(order_id, "order_id")?;
        let token = self.private_token()?;
        self.rpc
            .call(METHOD_GET_ORDER_STATE, CALL_ID_ORDER_STATE, OrderIdParams { order_id }, Some(token))
            .await
    }

    pub async fn get_position(&self, instrument_name: &str) -> ExchangeResult<Position> {
        Self::require(instrument_name, "instrument_name")?;
        let token = self.private_token()?;
        self.rpc
            .call(METHOD_GET_POSITION, CALL_ID_POSITION, InstrumentNameParams { instrument_name }, Some(token))
            .await
    }

    pub async fn get_open_orders_by_currency(&self, currency: &str) -> ExchangeResult<Vec<Order>> {
        Self::require(currency, "currency")?;
        let token = self.private_token()?;
        self.rpc
            .call(
                METHOD_GET_OPEN_ORDERS_BY_CURRENCY,
                CALL_ID_OPEN_ORDERS,
                CurrencyParams { currency },
                Some(token),
            )
            .await
    }
}

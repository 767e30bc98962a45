#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use deribit_trader::config_loader::AppConfig;
use deribit_trader::infrastructure::exchange::deribit::{
    AccessToken, DeribitClient, ExchangeError, ExchangeResult, Transport,
};

/// One request as the exchange would have received it
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub body: Value,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Failure(String),
}

/// In-memory exchange: canned replies per method, every request recorded.
///
/// Replies queued for a method are consumed in order; the last one keeps
/// answering once the queue is down to it.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn reply(&self, method: &str, body: impl Into<String>) {
        self.push(method, Reply::Body(body.into()));
    }

    pub fn reply_result(&self, method: &str, result: Value) {
        self.reply(method, ok_body(result));
    }

    pub fn reply_error(&self, method: &str, code: i64, message: &str) {
        self.reply(method, error_body(code, message));
    }

    pub fn fail(&self, method: &str, message: &str) {
        self.push(method, Reply::Failure(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.path).collect()
    }

    pub fn last_call(&self, method: &str) -> Option<RecordedCall> {
        self.calls().into_iter().rev().find(|c| c.path == method)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post(&self, path: &str, body: String, token: Option<&AccessToken>) -> ExchangeResult<String> {
        let parsed: Value = serde_json::from_str(&body).expect("client sent invalid JSON");
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            body: parsed,
            token: token.map(|t| t.as_str().to_string()),
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            match replies.get_mut(path) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Body(body)) => Ok(body),
            Some(Reply::Failure(message)) => Err(ExchangeError::Transport(message)),
            None => Err(ExchangeError::Transport(format!("no stub for {}", path))),
        }
    }
}

pub fn ok_body(result: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result,
        "usIn": 1_700_000_000_000_000u64,
        "usOut": 1_700_000_000_000_100u64,
        "usDiff": 100,
        "testnet": true
    })
    .to_string()
}

pub fn error_body(code: i64, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": code, "message": message},
        "testnet": true
    })
    .to_string()
}

pub fn instrument_json(name: &str, tick_size: f64) -> Value {
    json!({
        "instrument_name": name,
        "tick_size": tick_size,
        "kind": "future",
        "base_currency": "BTC",
        "quote_currency": "USD",
        "contract_size": 10.0,
        "min_trade_amount": 10.0,
        "is_active": true,
        "expiration_timestamp": 32_503_708_800_000i64
    })
}

pub fn order_book_json(name: &str, asks: Value, bids: Value, mark_price: f64) -> Value {
    json!({
        "instrument_name": name,
        "timestamp": 1_700_000_000_000i64,
        "state": "open",
        "best_bid_price": 100.0,
        "best_bid_amount": 5.0,
        "best_ask_price": 100.5,
        "best_ask_amount": 10.0,
        "mark_price": mark_price,
        "index_price": 100.2,
        "open_interest": 1234.5,
        "bids": bids,
        "asks": asks
    })
}

pub fn order_json(order_id: &str, name: &str, direction: &str, price: f64, amount: f64) -> Value {
    json!({
        "order_id": order_id,
        "instrument_name": name,
        "direction": direction,
        "price": price,
        "amount": amount,
        "filled_amount": 0.0,
        "order_type": "limit",
        "order_state": "open",
        "time_in_force": "good_til_cancelled",
        "post_only": true,
        "label": "",
        "creation_timestamp": 1_700_000_000_000i64
    })
}

pub fn placement_json(order: Value) -> Value {
    json!({ "order": order, "trades": [] })
}

pub fn authenticated_client(stub: &Arc<StubTransport>) -> DeribitClient<Arc<StubTransport>> {
    DeribitClient::new(stub.clone()).with_token(AccessToken::new("tok123"))
}

pub fn test_config() -> AppConfig {
    AppConfig::default()
}

// JSON-RPC 2.0 envelope handling
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::constants::{JSONRPC_VERSION, METHOD_AUTH};

use super::error::{ExchangeError, ExchangeResult};
use super::models::AccessToken;
use super::transport::Transport;

/// Outgoing request. Built per call and serialized once.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a, P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P: Serialize> RpcRequest<'a, P> {
    pub fn new(id: u64, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RpcErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
}

/// Reply envelope. The exchange must send exactly one of `result` and `error`.
#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorBody>,
    #[serde(default)]
    pub testnet: Option<bool>,
    #[serde(rename = "usDiff", default)]
    pub us_diff: Option<u64>,
}

impl RpcResponse {
    pub fn into_result(self) -> ExchangeResult<Value> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(result),
            (None, Some(e)) => Err(ExchangeError::Protocol {
                code: e.code,
                message: e.message,
                data: e.data,
            }),
            (Some(_), Some(_)) => Err(ExchangeError::Decode(
                "response carries both result and error".to_string(),
            )),
            (None, None) => Err(ExchangeError::Decode(
                "response carries neither result nor error".to_string(),
            )),
        }
    }
}

/// Decode a raw reply body into the typed result of `method`.
pub fn decode_response<R: DeserializeOwned>(method: &str, raw: &str) -> ExchangeResult<R> {
    if raw.trim().is_empty() {
        return Err(ExchangeError::Decode(format!("empty response body for {}", method)));
    }

    let envelope: RpcResponse = serde_json::from_str(raw)
        .map_err(|e| ExchangeError::Decode(format!("invalid JSON-RPC response for {}: {}", method, e)))?;
    let result = envelope.into_result()?;

    serde_json::from_value(result)
        .map_err(|e| ExchangeError::Decode(format!("unexpected result shape for {}: {}", method, e)))
}

/// One request, one response. No retries.
#[derive(Debug, Clone)]
pub struct RpcClient<T> {
    transport: T,
}

impl<T: Transport> RpcClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn call<P, R>(
        &self,
        method: &str,
        id: u64,
        params: P,
        token: Option<&AccessToken>,
    ) -> ExchangeResult<R>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let request = RpcRequest::new(id, method, params);
        let body = serde_json::to_string(&request)
            .map_err(|e| ExchangeError::InvalidInput(format!("failed to encode {} request: {}", method, e)))?;

        debug!("Sending {} (id={})", method, id);
        let raw = match self.transport.post(method, body, token).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("{} failed: {}", method, e);
                return Err(e);
            }
        };

        // The auth reply holds the bearer token
        if method != METHOD_AUTH {
            debug!("Response to {}: {}", method, raw);
        }

        decode_response(method, &raw).map_err(|e| {
            error!("{} failed: {}", method, e);
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope() {
        let request = RpcRequest::new(15, "public/get_order_book", json!({"instrument_name": "BTC-PERPETUAL"}));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 15,
                "method": "public/get_order_book",
                "params": {"instrument_name": "BTC-PERPETUAL"}
            })
        );
    }

    #[test]
    fn test_decode_result() {
        let raw = r#"{"jsonrpc":"2.0","id":0,"result":{"access_token":"tok123"},"usIn":1,"usOut":2,"usDiff":1,"testnet":true}"#;
        let value: Value = decode_response("public/auth", raw).unwrap();
        assert_eq!(value["access_token"], "tok123");
    }

    #[test]
    fn test_decode_protocol_error() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":10009,"message":"not_enough_funds"}}"#;
        match decode_response::<Value>("private/buy", raw) {
            Err(ExchangeError::Protocol { code, message, data }) => {
                assert_eq!(code, 10009);
                assert_eq!(message, "not_enough_funds");
                assert_eq!(data, None);
            }
            other => panic!("Expected protocol error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_ambiguous_envelopes() {
        let both = r#"{"result":{},"error":{"code":1,"message":"x"}}"#;
        let neither = r#"{"jsonrpc":"2.0","id":3}"#;
        assert!(matches!(decode_response::<Value>("m", both), Err(ExchangeError::Decode(_))));
        assert!(matches!(decode_response::<Value>("m", neither), Err(ExchangeError::Decode(_))));
    }

    #[test]
    fn test_decode_rejects_empty_and_garbage_bodies() {
        assert!(matches!(decode_response::<Value>("m", ""), Err(ExchangeError::Decode(_))));
        assert!(matches!(decode_response::<Value>("m", "  \n"), Err(ExchangeError::Decode(_))));
        assert!(matches!(
            decode_response::<Value>("m", "<html>502 Bad Gateway</html>"),
            Err(ExchangeError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_reports_wrong_result_shape() {
        let raw = r#"{"result":{"unexpected":true}}"#;
        let err = decode_response::<Vec<String>>("public/get_instruments", raw).unwrap_err();
        assert!(matches!(err, ExchangeError::Decode(_)));
        assert!(err.to_string().contains("public/get_instruments"));
    }
}

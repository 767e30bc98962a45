// JSON-RPC ids sent with each request. The exchange echoes them back;
// they only need to be stable per method, not unique per call.
pub const CALL_ID_AUTH: u64 = 0;
pub const CALL_ID_PLACE_ORDER: u64 = 1;
pub const CALL_ID_INSTRUMENTS: u64 = 2;
pub const CALL_ID_CANCEL: u64 = 6;
pub const CALL_ID_EDIT: u64 = 11;
pub const CALL_ID_ORDER_STATE: u64 = 11;
pub const CALL_ID_ORDER_BOOK: u64 = 15;
pub const CALL_ID_INSTRUMENT: u64 = 16;
pub const CALL_ID_POSITION: u64 = 20;
pub const CALL_ID_OPEN_ORDERS: u64 = 25;

pub const JSONRPC_VERSION: &str = "2.0";

// Method names double as the URL path below the API base.
pub const METHOD_AUTH: &str = "public/auth";
pub const METHOD_GET_INSTRUMENTS: &str = "public/get_instruments";
pub const METHOD_GET_INSTRUMENT: &str = "public/get_instrument";
pub const METHOD_GET_ORDER_BOOK: &str = "public/get_order_book";
pub const METHOD_BUY: &str = "private/buy";
pub const METHOD_SELL: &str = "private/sell";
pub const METHOD_EDIT: &str = "private/edit";
pub const METHOD_CANCEL: &str = "private/cancel";
pub const METHOD_GET_ORDER_STATE: &str = "private/get_order_state";
pub const METHOD_GET_POSITION: &str = "private/get_position";
pub const METHOD_GET_OPEN_ORDERS_BY_CURRENCY: &str = "private/get_open_orders_by_currency";

/// Number of fractional digits used when sending prices and amounts.
pub const DECIMAL_PLACES: usize = 8;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use sha2::Sha512;
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yobit_api_client::auth::{NonceMode, StaticCredentials, record_name};
use yobit_api_client::rest::trade::{
    ActiveOrdersRequest, CancelOrderRequest, CreateYobicodeRequest, DepositAddressRequest,
    OrderInfoRequest, RedeemYobicodeRequest, TradeClient, TradeHistoryRequest, TradeRequest,
    WithdrawRequest,
};
use yobit_api_client::{TradeType, YobitError};

const KEY: &str = "TESTKEY0123456789ABCDEF";
const SECRET: &str = "test_secret";

fn build_client(server: &MockServer) -> TradeClient {
    TradeClient::builder(Arc::new(StaticCredentials::new(KEY, SECRET)))
        .base_url(server.uri())
        .ephemeral_nonce()
        .build()
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn hmac_hex(secret: &str, body: &[u8]) -> String {
    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

fn form(body: &[u8]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).unwrap();
    pairs.sort();
    pairs
}

struct TempDir(PathBuf);

impl TempDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("yobit-it-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        TempDir(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

#[tokio::test]
async fn test_trade_is_signed_over_exact_body() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": 1,
        "return": {
            "received": 0.1,
            "remains": 9.9,
            "order_id": 1_000_001,
            "funds": { "btc": 15, "ltc": 51.82 }
        }
    });

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(header("Key", KEY))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(header_exists("Sign"))
        .and(body_string_contains("method=Trade"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TradeRequest::new("ltc_btc", TradeType::Buy, dec("0.01"), dec("10"));
    let result = client.trade(&request).await.unwrap();

    assert_eq!(result.order_id, 1_000_001);
    assert_eq!(result.remains, dec("9.9"));
    assert_eq!(result.funds["ltc"], dec("51.82"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];

    let params = form(&sent.body);
    let expected: Vec<(String, String)> = [
        ("amount", "10"),
        ("method", "Trade"),
        ("nonce", "1"),
        ("pair", "ltc_btc"),
        ("rate", "0.01"),
        ("type", "buy"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(params, expected);

    let sign = sent.headers.get("Sign").unwrap().to_str().unwrap();
    assert_eq!(sign, hmac_hex(SECRET, &sent.body));
}

#[tokio::test]
async fn test_nonce_increases_per_request() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": 1,
        "return": { "funds": {}, "rights": { "info": 1, "trade": 1 }, "server_time": 1 }
    });

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(3)
        .mount(&server)
        .await;

    let client = build_client(&server);
    for _ in 0..3 {
        client.get_info().await.unwrap();
    }

    let nonces: Vec<u64> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            form(&r.body)
                .into_iter()
                .find(|(k, _)| k == "nonce")
                .unwrap()
                .1
                .parse()
                .unwrap()
        })
        .collect();
    assert_eq!(nonces, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_withdraw_with_zero_amount_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = WithdrawRequest::new("BTC", Decimal::ZERO, "1BoatSLRHtKNngkdXEeobR76b53LETtpyT");
    let err = client.withdraw_coins_to_address(&request).await.unwrap_err();

    assert!(matches!(err, YobitError::InvalidArgument(ref msg) if msg.contains("amount")));
}

#[tokio::test]
async fn test_missing_required_fields_send_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);

    assert!(matches!(
        client.trade(&TradeRequest::default()).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.active_orders(&ActiveOrdersRequest::default()).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.order_info(&OrderInfoRequest::new(0)).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.cancel_order(&CancelOrderRequest::new(0)).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.trade_history(&TradeHistoryRequest::default()).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.get_deposit_address(&DepositAddressRequest::new("")).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.create_yobicode(&CreateYobicodeRequest::new("BTC", Decimal::ZERO)).await,
        Err(YobitError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.redeem_yobicode(&RedeemYobicodeRequest::new("")).await,
        Err(YobitError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_invalid_request_does_not_consume_nonce() {
    let server = MockServer::start().await;
    let response = serde_json::json!({ "success": 1, "return": { "server_time": 1 } });

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("nonce=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert!(client.trade(&TradeRequest::default()).await.is_err());

    let request = WithdrawRequest::new("BTC", dec("0.5"), "1BoatSLRHtKNngkdXEeobR76b53LETtpyT");
    let result = client.withdraw_coins_to_address(&request).await.unwrap();
    assert_eq!(result.server_time, 1);
}

#[tokio::test]
async fn test_application_error_is_verbatim() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": 0,
        "error": "Insufficient funds in wallet of the first currency of the pair"
    });

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TradeRequest::new("ltc_btc", TradeType::Sell, dec("0.02"), dec("100"));
    let err = client.trade(&request).await.unwrap_err();

    let api = err.api_error().unwrap();
    assert_eq!(
        api.message,
        "Insufficient funds in wallet of the first currency of the pair"
    );
    assert!(api.is_insufficient_funds());
}

#[tokio::test]
async fn test_get_info() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": 1,
        "return": {
            "funds": { "ltc": 22336.5, "nvc": 1, "ppc": 0.2 },
            "funds_incl_orders": { "ltc": 32100.5, "nvc": 1, "ppc": 0.2 },
            "rights": { "info": 1, "trade": 0, "deposit": 1, "withdraw": 0 },
            "transaction_count": 0,
            "open_orders": 1,
            "server_time": 1_418_654_530
        }
    });

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("method=getInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let info = client.get_info().await.unwrap();

    assert_eq!(info.funds["ltc"], dec("22336.5"));
    assert_eq!(info.funds_incl_orders["ltc"], dec("32100.5"));
    assert!(info.rights.info);
    assert!(!info.rights.withdraw);
    assert_eq!(info.server_time, 1_418_654_530);
}

#[tokio::test]
async fn test_active_orders_and_empty_listing() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "success": 1,
        "return": {
            "100025362": {
                "pair": "ltc_btc",
                "type": "sell",
                "amount": 21.615,
                "rate": 0.258,
                "timestamp_created": 1_418_654_530,
                "status": 0
            }
        }
    });

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("pair=ltc_btc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("pair=doge_btc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": 1 })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let orders = client
        .active_orders(&ActiveOrdersRequest::new("ltc_btc"))
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[&100025362].trade_type, TradeType::Sell);
    assert_eq!(orders[&100025362].rate, dec("0.258"));

    let empty = client
        .active_orders(&ActiveOrdersRequest::new("doge_btc"))
        .await
        .unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_order_info_and_cancel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("method=OrderInfo"))
        .and(body_string_contains("order_id=100025362"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": {
                "100025362": {
                    "pair": "ltc_btc",
                    "type": "sell",
                    "start_amount": 13.345,
                    "amount": 12.345,
                    "rate": 485,
                    "timestamp_created": 1_418_654_530,
                    "status": 0
                }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("method=CancelOrder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": { "order_id": 100025362, "funds": { "btc": 15, "ltc": 51.82 } }
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);

    let info = client.order_info(&OrderInfoRequest::new(100025362)).await.unwrap();
    assert_eq!(info[&100025362].start_amount, dec("13.345"));

    let cancelled = client.cancel_order(&CancelOrderRequest::new(100025362)).await.unwrap();
    assert_eq!(cancelled.order_id, 100025362);
    assert_eq!(cancelled.funds["btc"], dec("15"));
}

#[tokio::test]
async fn test_trade_history_filters_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .and(body_string_contains("method=TradeHistory"))
        .and(body_string_contains("Count=10"))
        .and(body_string_contains("Order=ASC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": {
                "24523": {
                    "pair": "ltc_btc",
                    "type": "buy",
                    "amount": 11.4,
                    "rate": 0.145,
                    "order_id": 100025362,
                    "is_your_order": 1,
                    "timestamp": 1_418_654_530
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TradeHistoryRequest::new("ltc_btc")
        .count(10)
        .order(yobit_api_client::SortOrder::Asc);
    let history = client.trade_history(&request).await.unwrap();

    let record = &history[&24523];
    assert_eq!(record.order_id, 100025362);
    assert!(record.is_your_order);

    let sent = &server.received_requests().await.unwrap()[0];
    let params = form(&sent.body);
    assert!(!params.iter().any(|(k, _)| k == "From" || k == "End"));
}

#[tokio::test]
async fn test_deposit_address_and_coupons() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("method=GetDepositAddress"))
        .and(body_string_contains("coinName=BTC"))
        .and(body_string_contains("need_new=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": {
                "address": "1UHAnAWvxDB9XXETsi7z483zRRBmcUZxb3",
                "processed_amount": 1.00000000,
                "server_time": 1_437_146_228
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("method=CreateYobicode"))
        .and(body_string_contains("amount=0.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": {
                "coupon": "YOBITUZ0HHSTBOQX3H01BTC",
                "transID": 1,
                "funds": { "btc": 1.5 }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("method=RedeemYobicode"))
        .and(body_string_contains("coupon=YOBITUZ0HHSTBOQX3H01BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": {
                "couponAmount": 0.5,
                "couponCurrency": "BTC",
                "transID": 1,
                "funds": { "btc": 2 }
            }
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);

    let address = client
        .get_deposit_address(&DepositAddressRequest::new("BTC").need_new(true))
        .await
        .unwrap();
    assert_eq!(address.address, "1UHAnAWvxDB9XXETsi7z483zRRBmcUZxb3");

    let created = client
        .create_yobicode(&CreateYobicodeRequest::new("BTC", dec("0.50")))
        .await
        .unwrap();
    assert_eq!(created.coupon, "YOBITUZ0HHSTBOQX3H01BTC");

    let redeemed = client
        .redeem_yobicode(&RedeemYobicodeRequest::new(created.coupon))
        .await
        .unwrap();
    assert_eq!(redeemed.coupon_amount, dec("0.5"));
    assert_eq!(redeemed.funds["btc"], dec("2"));
}

#[tokio::test]
async fn test_persistent_nonce_survives_new_client() {
    let server = MockServer::start().await;
    let tmp = TempDir::new("persistent");

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": 1,
            "return": { "server_time": 1 }
        })))
        .mount(&server)
        .await;

    let build = || {
        TradeClient::builder(Arc::new(StaticCredentials::new(KEY, SECRET)))
            .base_url(server.uri())
            .nonce_mode(NonceMode::Persistent { dir: tmp.0.clone() })
            .build()
    };
    let request = WithdrawRequest::new("BTC", dec("1"), "addr");

    let first = build();
    first.withdraw_coins_to_address(&request).await.unwrap();
    first.withdraw_coins_to_address(&request).await.unwrap();

    let record = tmp.0.join(record_name(KEY));
    assert_eq!(std::fs::read_to_string(&record).unwrap(), "2");

    let restarted = build();
    restarted.withdraw_coins_to_address(&request).await.unwrap();
    assert_eq!(std::fs::read_to_string(&record).unwrap(), "3");

    let last = &server.received_requests().await.unwrap()[2];
    assert!(form(&last.body).contains(&("nonce".to_string(), "3".to_string())));
}

#[tokio::test]
async fn test_unwritable_nonce_store_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let missing_dir = std::env::temp_dir()
        .join(format!("yobit-it-{}-missing", std::process::id()))
        .join("nested");
    let client = TradeClient::builder(Arc::new(StaticCredentials::new(KEY, SECRET)))
        .base_url(server.uri())
        .nonce_dir(missing_dir)
        .build();

    let err = client.get_info().await.unwrap_err();
    assert!(matches!(err, YobitError::Storage { .. }));
}

#[tokio::test]
async fn test_http_error_is_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_info().await.unwrap_err();
    assert!(matches!(err, YobitError::Transport(_)));
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tapi/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ddos protection page"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_info().await.unwrap_err();
    match err {
        YobitError::Decode { body, .. } => assert_eq!(body, "ddos protection page"),
        other => panic!("unexpected error: {other:?}"),
    }
}

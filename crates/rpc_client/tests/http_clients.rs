//! Request/response mapping of the HTTP clients against a mock server.

use bookmarket_core::{Address, AppId, Round};
use bookmarket_rpc_client::{
    ClientRpcError, HttpIndexerClient, HttpLedgerClient, IndexerApi, LedgerApi,
    TransactionSearch,
};
use bookmarket_transaction::TxId;
use mockito::{Matcher, Server};
use reqwest::Url;
use std::net::TcpListener;
use std::time::Duration;

fn localhost_binding_permitted() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn ledger(server: &Server, token: Option<&str>) -> HttpLedgerClient {
    let url = Url::parse(&server.url()).expect("server url");
    HttpLedgerClient::new(url, token, Duration::from_secs(5)).expect("client")
}

fn indexer(server: &Server) -> HttpIndexerClient {
    let url = Url::parse(&server.url()).expect("server url");
    HttpIndexerClient::new(url, None, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn suggested_params_sends_token_and_parses() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/v2/transactions/params")
        .match_header("X-Algo-API-Token", "secret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"consensus-version":"v38","fee":0,"genesis-hash":"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=","genesis-id":"testnet-v1.0","last-round":250,"min-fee":1000}"#,
        )
        .create();

    let params = ledger(&server, Some("secret"))
        .suggested_params()
        .await
        .expect("params");
    assert_eq!(params.first_valid, Round(250));
    assert_eq!(params.last_valid, Round(1250));
    assert_eq!(params.min_fee, 1000);
    assert_eq!(params.genesis_hash, [0u8; 32]);
}

#[tokio::test]
async fn compile_posts_source_and_decodes_program() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v2/teal/compile")
        .match_body("#pragma version 6\nint 1\n")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"hash":"XYZ","result":"ASABASI="}"#)
        .create();

    let program = ledger(&server, None)
        .compile("#pragma version 6\nint 1\n")
        .await
        .expect("compile");
    assert_eq!(program, vec![1, 32, 1, 1, 34]);
}

#[tokio::test]
async fn send_raw_transactions_concatenates_blobs() {
    if !localhost_binding_permitted() {
        return;
    }
    let tx_id = TxId([0xab; 32]);
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v2/transactions")
        .match_header("content-type", "application/x-binary")
        .match_body(vec![1u8, 2, 3, 4, 5])
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"txId":"{tx_id}"}}"#))
        .create();

    let sent = ledger(&server, None)
        .send_raw_transactions(&[vec![1, 2], vec![3, 4, 5]])
        .await
        .expect("send");
    assert_eq!(sent, tx_id);
}

#[tokio::test]
async fn rejected_submission_carries_status_and_message() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v2/transactions")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"TransactionPool.Remember: overspend"}"#)
        .create();

    let err = ledger(&server, None)
        .send_raw_transactions(&[vec![1]])
        .await
        .unwrap_err();
    assert_eq!(err.code(), 400);
    assert!(err.is_client_error());
    assert_eq!(err.message(), "TransactionPool.Remember: overspend");
}

#[tokio::test]
async fn pending_status_and_balance_paths() {
    if !localhost_binding_permitted() {
        return;
    }
    let tx_id = TxId([0x11; 32]);
    let address = Address::from_public_key([3u8; 32]);
    let mut server = Server::new_async().await;
    let _pending = server
        .mock("GET", format!("/v2/transactions/pending/{tx_id}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"confirmed-round":301,"application-index":77,"pool-error":""}"#)
        .create();
    let _status = server
        .mock("GET", "/v2/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"last-round":300}"#)
        .create();
    let _wait = server
        .mock("GET", "/v2/status/wait-for-block-after/300")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"last-round":301}"#)
        .create();
    let _account = server
        .mock("GET", format!("/v2/accounts/{address}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"address":"{address}","amount":12500000}}"#))
        .create();

    let client = ledger(&server, None);
    let pending = client.pending_transaction(&tx_id).await.expect("pending");
    assert_eq!(pending.confirmed(), Some(Round(301)));
    assert_eq!(pending.application_id(), Some(AppId(77)));
    assert_eq!(client.status().await.expect("status").round(), Round(300));
    assert_eq!(
        client
            .status_after_round(Round(300))
            .await
            .expect("wait")
            .round(),
        Round(301)
    );
    assert_eq!(client.account_balance(&address).await.expect("balance"), 12_500_000);
}

#[tokio::test]
async fn search_transactions_maps_query_and_pages() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/v2/transactions")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("note-prefix".into(), "Ym9va3M6dXYzMA==".into()),
            Matcher::UrlEncoded("tx-type".into(), "appl".into()),
            Matcher::UrlEncoded("min-round".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"current-round":500,"next-token":"page-2","transactions":[{"id":"A","created-application-index":42},{"id":"B"}]}"#,
        )
        .create();

    let search = TransactionSearch {
        note_prefix: Some("Ym9va3M6dXYzMA==".into()),
        tx_type: Some("appl".into()),
        min_round: Some(Round(10)),
        ..TransactionSearch::default()
    };
    let page = indexer(&server)
        .search_transactions(&search)
        .await
        .expect("search");
    assert_eq!(page.next_token.as_deref(), Some("page-2"));
    assert_eq!(page.transactions.len(), 2);
    assert_eq!(page.transactions[0].created_application(), Some(AppId(42)));
    assert_eq!(page.transactions[1].created_application(), None);
}

#[tokio::test]
async fn lookup_application_handles_deleted_and_missing() {
    if !localhost_binding_permitted() {
        return;
    }
    let mut server = Server::new_async().await;
    let _deleted = server
        .mock("GET", "/v2/applications/42")
        .match_query(Matcher::UrlEncoded("include-all".into(), "true".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"application":{"id":42,"deleted":true,"params":{}},"current-round":9}"#)
        .create();
    let _missing = server
        .mock("GET", "/v2/applications/43")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"no application found for application-id: 43"}"#)
        .create();
    let _broken = server
        .mock("GET", "/v2/applications/44")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("internal")
        .create();

    let client = indexer(&server);
    let record = client
        .lookup_application(AppId(42), true)
        .await
        .expect("lookup")
        .expect("record");
    assert!(record.deleted);
    assert!(client
        .lookup_application(AppId(43), true)
        .await
        .expect("lookup")
        .is_none());
    let err = client.lookup_application(AppId(44), true).await.unwrap_err();
    assert_eq!(err.code(), 500);
    assert_eq!(err.message(), "internal");
}

#[tokio::test]
async fn unreachable_node_is_a_transport_error() {
    let url = Url::parse("http://127.0.0.1:9").expect("url");
    let client = HttpLedgerClient::new(url, None, Duration::from_millis(500)).expect("client");
    let err = client.status().await.unwrap_err();
    assert_eq!(err.code(), ClientRpcError::TRANSPORT);
}

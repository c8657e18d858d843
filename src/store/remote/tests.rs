use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use serde_json::{json, Value};

use super::query::FetchParams;
use super::{RecordClient, RemoteDealStore};
use crate::config::RemoteConfig;
use crate::error::StoreError;
use crate::models::deal::{DealPatch, DealStage};
use crate::store::DealStore;

/// One request as the stub server saw it.
#[derive(Debug)]
struct SeenRequest {
    method: String,
    path: String,
    authorization: Option<String>,
    body: String,
}

impl SeenRequest {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Local HTTP server answering one connection per canned response, in order.
struct StubServer {
    base_url: String,
    handle: JoinHandle<Vec<SeenRequest>>,
}

impl StubServer {
    fn serve(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            responses
                .into_iter()
                .map(|(status, body)| {
                    let (stream, _) = listener.accept().unwrap();
                    answer(stream, status, &body)
                })
                .collect()
        });
        Self { base_url, handle }
    }

    fn finish(self) -> Vec<SeenRequest> {
        self.handle.join().unwrap()
    }
}

fn answer(stream: TcpStream, status: u16, body: &str) -> SeenRequest {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap(),
                "authorization" => authorization = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }
    let mut request_body = vec![0; content_length];
    reader.read_exact(&mut request_body).unwrap();

    let reason = if status < 400 { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let mut stream = stream;
    stream.write_all(response.as_bytes()).unwrap();
    stream.flush().unwrap();

    SeenRequest {
        method,
        path,
        authorization,
        body: String::from_utf8(request_body).unwrap(),
    }
}

fn config(base_url: &str, page_size: u32) -> RemoteConfig {
    RemoteConfig {
        base_url: base_url.to_string(),
        project_id: "crm".to_string(),
        public_key: "pk_test".to_string(),
        page_size,
        ..RemoteConfig::default()
    }
}

fn ok_page(ids: &[u64]) -> (u16, String) {
    let records: Vec<Value> = ids.iter().map(|id| json!({ "Id": id })).collect();
    (200, json!({ "success": true, "data": records }).to_string())
}

fn ids(records: &[Value]) -> Vec<u64> {
    records.iter().map(|r| r["Id"].as_u64().unwrap()).collect()
}

// =========================================================================
// Paging
// =========================================================================

#[test]
fn test_fetch_all_follows_pages_until_short_page() {
    let server = StubServer::serve(vec![ok_page(&[1, 2]), ok_page(&[3])]);
    let client = RecordClient::new(config(&server.base_url, 2)).unwrap();

    let records = client
        .fetch_all("deal_c", FetchParams::new(&["Id"]))
        .unwrap();

    assert_eq!(ids(&records), vec![1, 2, 3]);
    let seen = server.finish();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/projects/crm/tables/deal_c/records/query");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer pk_test"));
    assert_eq!(seen[0].json()["pagingInfo"], json!({"limit": 2, "offset": 0}));
    assert_eq!(seen[1].json()["pagingInfo"], json!({"limit": 2, "offset": 2}));
}

#[test]
fn test_fetch_all_stops_on_empty_page() {
    let server = StubServer::serve(vec![ok_page(&[1, 2]), ok_page(&[])]);
    let client = RecordClient::new(config(&server.base_url, 2)).unwrap();

    let records = client
        .fetch_all("deal_c", FetchParams::new(&["Id"]))
        .unwrap();

    assert_eq!(ids(&records), vec![1, 2]);
    assert_eq!(server.finish().len(), 2);
}

#[test]
fn test_fetch_all_stops_when_service_ignores_paging() {
    let server = StubServer::serve(vec![ok_page(&[1, 2, 3])]);
    let client = RecordClient::new(config(&server.base_url, 2)).unwrap();

    let records = client
        .fetch_all("deal_c", FetchParams::new(&["Id"]))
        .unwrap();

    assert_eq!(ids(&records), vec![1, 2, 3]);
    assert_eq!(server.finish().len(), 1);
}

#[test]
fn test_fetch_all_gives_up_after_max_pages_of_full_pages() {
    let server = StubServer::serve(vec![ok_page(&[1, 2]), ok_page(&[1, 2]), ok_page(&[1, 2])]);
    let client = RecordClient::new(RemoteConfig {
        max_pages: 3,
        ..config(&server.base_url, 2)
    })
    .unwrap();

    let err = client
        .fetch_all("deal_c", FetchParams::new(&["Id"]))
        .unwrap_err();

    let StoreError::Rejected(message) = err else {
        panic!("expected a rejection");
    };
    assert!(message.contains("after 3 pages"));
    assert_eq!(server.finish().len(), 3);
}

// =========================================================================
// Envelope and status handling
// =========================================================================

#[test]
fn test_unsuccessful_envelope_is_rejected_with_message() {
    let server = StubServer::serve(vec![(
        200,
        json!({"success": false, "message": "Invalid public key"}).to_string(),
    )]);
    let client = RecordClient::new(config(&server.base_url, 10)).unwrap();

    let err = client.fetch("deal_c", &FetchParams::new(&["Id"])).unwrap_err();

    assert!(matches!(err, StoreError::Rejected(ref m) if m == "Invalid public key"));
    server.finish();
}

#[test]
fn test_error_status_with_non_json_body_reports_status() {
    let server = StubServer::serve(vec![(503, "<html>upstream down</html>".to_string())]);
    let client = RecordClient::new(config(&server.base_url, 10)).unwrap();

    let err = client.fetch("deal_c", &FetchParams::new(&["Id"])).unwrap_err();

    let StoreError::Rejected(message) = err else {
        panic!("expected a rejection");
    };
    assert_eq!(message, "fetch records: HTTP 503 - Service Unavailable");
    server.finish();
}

#[test]
fn test_success_status_with_non_json_body_is_json_error() {
    let server = StubServer::serve(vec![(200, "not json".to_string())]);
    let client = RecordClient::new(config(&server.base_url, 10)).unwrap();

    let err = client.fetch("deal_c", &FetchParams::new(&["Id"])).unwrap_err();

    assert!(matches!(err, StoreError::Json(_)));
    server.finish();
}

#[test]
fn test_get_by_id_with_null_data_is_rejected() {
    let server = StubServer::serve(vec![(
        200,
        json!({"success": true, "data": null}).to_string(),
    )]);
    let client = RecordClient::new(config(&server.base_url, 10)).unwrap();

    let err = client
        .get_by_id("deal_c", 7, &FetchParams::new(&["Id"]))
        .unwrap_err();

    assert!(matches!(err, StoreError::Rejected(ref m) if m.contains("deal_c 7 returned no data")));
    let seen = server.finish();
    assert_eq!(seen[0].path, "/projects/crm/tables/deal_c/records/7/query");
}

#[test]
fn test_create_without_returned_record_is_rejected() {
    let server = StubServer::serve(vec![(200, json!({"success": true}).to_string())]);
    let client = RecordClient::new(config(&server.base_url, 10)).unwrap();

    let err = client
        .create("deal_c", json!({"title_c": "Pilot"}))
        .unwrap_err();

    assert!(
        matches!(err, StoreError::Rejected(ref m) if m == "create record: response carried no record")
    );
    let seen = server.finish();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].json(), json!({"records": [{"title_c": "Pilot"}]}));
}

#[test]
fn test_delete_sends_record_ids() {
    let server = StubServer::serve(vec![(
        200,
        json!({"success": true, "results": [{"success": true}]}).to_string(),
    )]);
    let client = RecordClient::new(config(&server.base_url, 10)).unwrap();

    assert!(client.delete("deal_c", 4).unwrap());

    let seen = server.finish();
    assert_eq!(seen[0].method, "DELETE");
    assert_eq!(seen[0].path, "/projects/crm/tables/deal_c/records");
    assert_eq!(seen[0].json(), json!({"RecordIds": [4]}));
}

// =========================================================================
// Deal store over the client
// =========================================================================

#[test]
fn test_stage_move_sends_single_stage_patch() {
    let stored = json!({
        "Id": 3,
        "title_c": "Fleet upgrade",
        "value_c": 75000.0,
        "stage_c": "closed-won",
        "probability_c": 90
    });
    let server = StubServer::serve(vec![(
        200,
        json!({"success": true, "results": [{"success": true, "data": stored}]}).to_string(),
    )]);
    let store = RemoteDealStore::new(config(&server.base_url, 10)).unwrap();

    let deal = store
        .update(3, &DealPatch::stage(DealStage::ClosedWon))
        .unwrap();

    assert_eq!(deal.id, 3);
    assert_eq!(deal.stage, DealStage::ClosedWon);
    let seen = server.finish();
    assert_eq!(seen[0].method, "PATCH");
    assert_eq!(
        seen[0].json(),
        json!({"records": [{"Id": 3, "stage_c": "closed-won"}]})
    );
}

#[test]
fn test_rejected_update_surfaces_field_errors() {
    let server = StubServer::serve(vec![(
        200,
        json!({
            "success": true,
            "results": [{
                "success": false,
                "errors": [{"fieldLabel": "stage_c", "message": "not a picklist value"}]
            }]
        })
        .to_string(),
    )]);
    let store = RemoteDealStore::new(config(&server.base_url, 10)).unwrap();

    let err = store
        .update(3, &DealPatch::stage(DealStage::Proposal))
        .unwrap_err();

    assert!(matches!(err, StoreError::Rejected(ref m) if m == "stage_c: not a picklist value"));
    server.finish();
}

//! Verify request building and response parsing against `test-vectors/requests.json`.
//!
//! Each case gives inputs and either the exact request expected on the wire
//! or the validation error expected instead. Bodies are compared as parsed
//! JSON so field order does not matter.

use catalog_core::{
    parse_response, CatalogClient, ClientConfig, Confirmation, Error, HttpMethod, HttpRequest,
    HttpResponse, ListQuery, NewProduct, ValidationError,
};
use serde_json::Value;

fn vectors() -> Value {
    let raw = include_str!("../../test-vectors/requests.json");
    serde_json::from_str(raw).unwrap()
}

fn client(vectors: &Value) -> CatalogClient {
    CatalogClient::new(&ClientConfig::new(vectors["base_url"].as_str().unwrap()))
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, base_url: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.url,
        format!("{base_url}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );

    if let Some(headers) = expected.get("headers") {
        let expected_headers: Vec<(String, String)> = headers
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }

    match expected.get("body") {
        Some(body) => {
            let sent: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&sent, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn assert_validation(name: &str, err: Error, expected: &str) {
    let err = match err {
        Error::Validation(err) => err,
        other => panic!("{name}: expected a validation error, got {other:?}"),
    };
    let matched = match expected {
        "Empty" => matches!(err, ValidationError::Empty { .. }),
        "OutOfRange" => matches!(err, ValidationError::OutOfRange { .. }),
        "ConfirmationRequired" => matches!(err, ValidationError::ConfirmationRequired { .. }),
        other => panic!("{name}: unknown expected_error: {other}"),
    };
    assert!(matched, "{name}: expected {expected}, got {err:?}");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let v = vectors();
    let c = client(&v);
    for case in v["create"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: NewProduct = serde_json::from_value(case["input"].clone()).unwrap();
        let result = c.build_create_product(&input);

        match case.get("expected_error") {
            Some(expected) => assert_validation(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_request(name, c.base_url(), &result.unwrap(), &case["expected_request"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Set stock
// ---------------------------------------------------------------------------

#[test]
fn set_stock_test_vectors() {
    let v = vectors();
    let c = client(&v);
    for case in v["set_stock"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let stock = case["stock"].as_i64().unwrap();
        let result = c.build_set_stock(id, stock);

        match case.get("expected_error") {
            Some(expected) => assert_validation(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_request(name, c.base_url(), &result.unwrap(), &case["expected_request"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let v = vectors();
    let c = client(&v);
    for case in v["delete"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_u64().unwrap();
        let confirmation = Confirmation::from(case["confirmed"].as_bool().unwrap());
        let result = c.build_delete_product(id, confirmation);

        match case.get("expected_error") {
            Some(expected) => assert_validation(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_request(name, c.base_url(), &result.unwrap(), &case["expected_request"]),
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let v = vectors();
    let c = client(&v);
    for case in v["list"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query = ListQuery::new(
            case["per_page"].as_u64().unwrap() as u32,
            case["page"].as_u64().unwrap() as u32,
        );
        let result = c.build_list_products(query);

        match case.get("expected_error") {
            Some(expected) => assert_validation(name, result.unwrap_err(), expected.as_str().unwrap()),
            None => assert_request(name, c.base_url(), &result.unwrap(), &case["expected_request"]),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let v = vectors();
    for case in v["responses"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let method = parse_method(case["method"].as_str().unwrap());
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };
        let result = parse_response(method, "http://localhost:5000/api/products/", response);

        match case.get("expected_diagnostic_contains") {
            Some(needle) => {
                let err = result.unwrap_err();
                assert!(
                    err.diagnostic.contains(needle.as_str().unwrap()),
                    "{name}: diagnostic {:?}",
                    err.diagnostic
                );
                assert_eq!(err.method, method, "{name}: method");
            }
            None => assert_eq!(result.unwrap(), case["expected_result"], "{name}: parsed result"),
        }
    }
}

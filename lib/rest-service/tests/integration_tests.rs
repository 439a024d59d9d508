//! Integration tests for `Service` over `HyperTransport` using wiremock.

use assert2::{check, let_assert};
use rest_service::{
    EndpointOptions, HyperTransport, Invocation, Reply, Service, ServiceDeclaration,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, body_string_contains, header, method, path},
};

fn photo() -> Value {
    json!({
        "albumId": 1,
        "id": 1,
        "title": "accusamus beatae ad facilis cum similique qui sunt",
        "url": "http://placehold.it/600/92c952",
        "thumbnailUrl": "http://placehold.it/150/92c952"
    })
}

fn photos_declaration() -> ServiceDeclaration<Value> {
    ServiceDeclaration::new()
        .get("photos", "/photos", EndpointOptions::new())
        .get("find_photo", "/photos/:id", EndpointOptions::new())
        .post("add_photo", "/photos", EndpointOptions::new())
        .put(
            "update_photo",
            "/photos/:id",
            EndpointOptions::new().header("Content-Type", "application/json"),
        )
        .patch("update_photo_data", "/photos/:id", EndpointOptions::new())
        .delete("delete_photo", "/photos/:id", EndpointOptions::new())
}

fn service(server: &MockServer) -> Service<Value, HyperTransport> {
    Service::builder(photos_declaration(), HyperTransport::new())
        .host(server.uri())
        .build()
}

#[tokio::test]
async fn get_returns_a_list() {
    let server = MockServer::start().await;
    let photos: Vec<Value> = (1..=3).map(|id| json!({"id": id})).collect();

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&photos))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call("photos", Invocation::new())
        .await
        .expect("call");

    let_assert!(Reply::Success(response) = reply);
    check!(response.status() == 200);
    check!(response.result().as_array().map(Vec::len) == Some(3));
}

#[tokio::test]
async fn get_substitutes_path_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo()))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service(&server)
        .call("find_photo", Invocation::new().arg("id", 1))
        .await
        .expect("call");

    check!(reply.success().map(|r| r.result()) == Some(&photo()));
}

#[tokio::test]
async fn post_sends_form_encoded_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/photos"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("albumId=1"))
        .and(body_string_contains("title=testing+photo"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "albumId": "1",
            "title": "testing photo",
            "id": 5001
        })))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call(
            "add_photo",
            Invocation::new()
                .payload("albumId", 1)
                .payload("title", "testing photo"),
        )
        .await
        .expect("call");

    let_assert!(Reply::Success(response) = reply);
    check!(response.status() == 201);
    check!(response.result()["id"] == json!(5001));
}

#[tokio::test]
async fn post_form_flattens_nested_and_null_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/photos"))
        .and(body_string(
            "title=x&meta%5Ba%5D=1&meta%5Btags%5D%5B%5D=red&note=",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5001})))
        .expect(1)
        .mount(&server)
        .await;

    let reply = service(&server)
        .call(
            "add_photo",
            Invocation::new()
                .payload("title", "x")
                .payload("meta", json!({"a": 1, "tags": ["red"]}))
                .payload("note", Value::Null),
        )
        .await
        .expect("call");

    check!(reply.status() == Some(201));
}

#[tokio::test]
async fn put_sends_json_when_declared() {
    let server = MockServer::start().await;
    let mut updated = photo();
    updated["albumId"] = json!(2);

    Mock::given(method("PUT"))
        .and(path("/photos/1"))
        .and(header("content-type", "application/json"))
        .and(body_json(&updated))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .mount(&server)
        .await;

    let_assert!(Value::Object(payload) = updated.clone());
    let reply = service(&server)
        .call(
            "update_photo",
            Invocation::new().arg("id", 1).payload_map(payload),
        )
        .await
        .expect("call");

    check!(reply.success().map(|r| r.result()) == Some(&updated));
}

#[tokio::test]
async fn patch_with_json_call_header() {
    let server = MockServer::start().await;
    let mut patched = photo();
    patched["albumId"] = json!(2);

    Mock::given(method("PATCH"))
        .and(path("/photos/1"))
        .and(body_json(json!({"albumId": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(&patched))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call(
            "update_photo_data",
            Invocation::new()
                .arg("id", 1)
                .header("Content-Type", "application/json")
                .payload("albumId", 2),
        )
        .await
        .expect("call");

    check!(reply.success().map(|r| r.result()["albumId"].clone()) == Some(json!(2)));
}

#[tokio::test]
async fn delete_forwards_headers_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/photos/1"))
        .and(header("authorization", "Bearer token"))
        .and(|request: &wiremock::Request| request.body.is_empty())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call(
            "delete_photo",
            Invocation::new()
                .arg("id", 1)
                .header("Authorization", "Bearer token"),
        )
        .await
        .expect("call");

    check!(reply.success().map(|r| r.result()) == Some(&json!({})));
}

#[tokio::test]
async fn not_found_becomes_failure_with_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"missing"}"#))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call("find_photo", Invocation::new().arg("id", 999))
        .await
        .expect("failure is recovered");

    let_assert!(Reply::Failure(failure) = reply);
    check!(failure.status() == Some(404));
    check!(failure.is_client_error());
    check!(failure.result() == r#"{"error":"missing"}"#);
    check!(failure.message() == "404 Not Found");
    let decoded: Value = failure.decode_body().expect("json error body");
    check!(decoded == json!({"error": "missing"}));
}

#[tokio::test]
async fn server_error_becomes_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call("photos", Invocation::new())
        .await
        .expect("failure is recovered");

    let_assert!(Reply::Failure(failure) = reply);
    check!(failure.is_server_error());
    check!(failure.message() == "503 Service Unavailable");
}

#[tokio::test]
async fn invalid_utf8_body_is_decoded_lossily() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/photos"))
        .respond_with(ResponseTemplate::new(500).set_body_bytes(vec![0xFF, b'o', b'k']))
        .mount(&server)
        .await;

    let reply = service(&server)
        .call("photos", Invocation::new())
        .await
        .expect("failure is recovered");

    let_assert!(Reply::Failure(failure) = reply);
    check!(failure.result() == "\u{FFFD}ok");
}

#[tokio::test]
async fn defaults_merge_into_headers_and_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/albums/7/photos"))
        .and(header("accept", "application/json"))
        .and(header("x-client", "call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let declaration = ServiceDeclaration::<Value>::new()
        .header("Accept", "application/json")
        .header("X-Client", "declared")
        .param("album_id", 1)
        .get(
            "album_photos",
            "/albums/:album_id/photos",
            EndpointOptions::new().param("album_id", 3),
        );
    let service = Service::builder(declaration, HyperTransport::new())
        .host(server.uri())
        .build();

    let reply = service
        .call(
            "album_photos",
            Invocation::new()
                .parameter("album_id", 7)
                .header("X-Client", "call"),
        )
        .await
        .expect("call");

    check!(reply.is_success());
}

#[tokio::test]
async fn unreachable_host_becomes_failure_without_status() {
    let declaration = photos_declaration();
    let service = Service::builder(declaration, HyperTransport::new())
        .host("http://127.0.0.1:9")
        .build();

    let reply = service
        .call("photos", Invocation::new())
        .await
        .expect("network faults are recovered");

    let_assert!(Reply::Failure(failure) = reply);
    check!(failure.status() == None);
    check!(failure.message().starts_with("connection error"));
}

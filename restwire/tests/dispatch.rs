//! Integration tests for the dispatch cycle.
//!
//! These tests drive the dispatcher exactly as a transport collaborator
//! would: build a `Message`, call `receive` with a delivery callback, and
//! assert on the delivered `Payload`.

mod common;

use common::capture;
use restwire::{
    BoxError, Dispatcher, ErrorObject, Message, Payload, Request, Resource, Response, SendError,
};
use serde_json::json;
use std::collections::BTreeMap;

fn default_headers() -> BTreeMap<String, String> {
    Payload::default().headers
}

async fn apple_handler(req: Request, res: Response) -> Result<(), BoxError> {
    res.status(200)
        .data(
            "Apple",
            req.param("id").unwrap_or_default(),
            json!({"flavor": "sweet"}),
        )
        .send()?;
    Ok(())
}

#[tokio::test]
async fn each_standard_method_dispatches_with_captured_params() {
    for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
        let mut dispatcher = Dispatcher::new();
        dispatcher.route(method, "/apple/:id", apple_handler);

        let (callback, rx) = capture();
        dispatcher
            .receive(Message::new(method, "/apple/3444"), callback)
            .await;

        let payload = rx.await.unwrap();
        assert_eq!(
            payload,
            Payload {
                status: 200,
                headers: default_headers(),
                data: Some(vec![Resource {
                    kind: "Apple".to_string(),
                    id: "3444".to_string(),
                    attributes: json!({"flavor": "sweet"}),
                }]),
                errors: None,
            },
            "unexpected payload for method {method}"
        );
    }
}

#[tokio::test]
async fn verb_registration_helpers_match_their_methods() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/apple/:id", apple_handler);
    assert_eq!(dispatcher.routes().len(), 1);

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("get", "/apple/1"), callback)
        .await;
    assert_eq!(rx.await.unwrap().status, 200);

    // Same path, unregistered method.
    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("delete", "/apple/1"), callback)
        .await;
    assert_eq!(rx.await.unwrap().status, 404);
}

#[tokio::test]
async fn missing_path_yields_400_naming_path() {
    let dispatcher = Dispatcher::new();

    let (callback, rx) = capture();
    let response = dispatcher
        .receive(Message::empty().with("method", "POST"), callback)
        .await;
    assert!(response.is_sent());

    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 400);
    assert_eq!(payload.headers, default_headers());
    assert_eq!(payload.data, None);

    let errors = payload.errors.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].title, "Bad Request");
    assert!(errors[0].detail.contains("'path'"), "detail: {}", errors[0].detail);
}

#[tokio::test]
async fn missing_method_yields_400_naming_method() {
    let dispatcher = Dispatcher::new();

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::empty().with("path", "/something"), callback)
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 400);
    let errors = payload.errors.unwrap();
    assert_eq!(errors[0].title, "Bad Request");
    assert!(errors[0].detail.contains("'method'"), "detail: {}", errors[0].detail);
}

#[tokio::test]
async fn non_string_method_is_treated_as_missing() {
    let dispatcher = Dispatcher::new();

    let (callback, rx) = capture();
    dispatcher
        .receive(
            Message::empty().with("method", 42).with("path", "/x"),
            callback,
        )
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 400);
    assert!(payload.errors.unwrap()[0].detail.contains("'method'"));
}

#[tokio::test]
async fn unmatched_route_yields_404() {
    let dispatcher = Dispatcher::new();

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("GET", "/something"), callback)
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(
        payload,
        Payload {
            status: 404,
            headers: default_headers(),
            data: None,
            errors: Some(vec![ErrorObject {
                title: "Not Found".to_string(),
                detail: "The page or resource you are looking for does not exist".to_string(),
            }]),
        }
    );
}

#[tokio::test]
async fn failing_handler_yields_500_with_its_message() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.post("/throw/an/error", |_req: Request, _res: Response| async {
        Err::<(), BoxError>("This is an error".into())
    });

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("POST", "/throw/an/error"), callback)
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(
        payload,
        Payload {
            status: 500,
            headers: default_headers(),
            data: None,
            errors: Some(vec![ErrorObject {
                title: "Internal Error".to_string(),
                detail: "This is an error".to_string(),
            }]),
        }
    );
}

async fn panic_handler(_req: Request, _res: Response) -> Result<(), BoxError> {
    panic!("handler blew up");
}

#[tokio::test]
async fn panicking_handler_yields_500_with_the_panic_message() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.post("/panic", panic_handler);

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("POST", "/panic"), callback)
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 500);
    let errors = payload.errors.unwrap();
    assert_eq!(errors[0].title, "Internal Error");
    assert_eq!(errors[0].detail, "handler blew up");
}

#[tokio::test]
async fn handler_error_after_send_does_not_clobber_the_delivery() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/flaky", |_req: Request, res: Response| async move {
        res.status(200).data("Ok", "1", json!({})).send()?;
        Err::<(), BoxError>("late failure".into())
    });

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("GET", "/flaky"), callback)
        .await;

    // The handler's own delivery stands; the dispatcher's 500 is dropped.
    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 200);
    assert!(payload.errors.is_none());
}

#[tokio::test]
async fn second_send_is_flagged_and_leaves_the_payload_intact() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/apple/:id", apple_handler);

    let (callback, rx) = capture();
    let response = dispatcher
        .receive(Message::new("GET", "/apple/1"), callback)
        .await;

    assert_eq!(response.send().unwrap_err(), SendError::AlreadySent);

    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 200);
    assert_eq!(payload.data.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn extra_message_fields_reach_the_handler() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.post("/dogs", |req: Request, res: Response| async move {
        let name = req
            .get("body")
            .and_then(|body| body.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("unknown");
        res.status(201).data("Dog", "1", json!({"name": name})).send()?;
        Ok::<(), BoxError>(())
    });

    let (callback, rx) = capture();
    dispatcher
        .receive(
            Message::new("POST", "/dogs").with("body", json!({"name": "Rex"})),
            callback,
        )
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(payload.status, 201);
    assert_eq!(payload.data.unwrap()[0].attributes, json!({"name": "Rex"}));
}

#[tokio::test]
async fn first_registered_route_wins() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/fruit/:kind", |req: Request, res: Response| async move {
        res.data("Match", req.param("kind").unwrap_or_default(), json!({"via": "capture"}))
            .send()?;
        Ok::<(), BoxError>(())
    });
    dispatcher.get("/fruit/pear", |_req: Request, res: Response| async move {
        res.data("Match", "pear", json!({"via": "literal"})).send()?;
        Ok::<(), BoxError>(())
    });

    let (callback, rx) = capture();
    dispatcher
        .receive(Message::new("GET", "/fruit/pear"), callback)
        .await;

    let payload = rx.await.unwrap();
    assert_eq!(payload.data.unwrap()[0].attributes, json!({"via": "capture"}));
}

#[tokio::test]
async fn quiet_handler_leaves_the_response_unsent() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/quiet", |_req: Request, _res: Response| async {
        Ok::<(), BoxError>(())
    });

    let (callback, mut rx) = capture();
    let response = dispatcher
        .receive(Message::new("GET", "/quiet"), callback)
        .await;

    // The dispatcher never auto-sends on behalf of a well-behaved handler.
    assert!(!response.is_sent());
    assert!(rx.try_recv().is_err());
}

use rawhttp::config::Settings;
use rawhttp::http::error::HttpError;
use rawhttp::http::headers::HeaderMap;
use rawhttp::http::parser::parse_request;
use rawhttp::http::request::Request;
use rawhttp::http::response::{Response, StatusCode};
use rawhttp::router::Router;
use rawhttp::service;

fn hello_handler(headers: HeaderMap, _req: &Request) -> Result<Response, HttpError> {
    Ok(Response::ok("hello", headers))
}

fn request(raw: &str) -> Request {
    parse_request(raw.as_bytes()).unwrap()
}

#[test]
fn test_router_creation() {
    let router = Router::new();
    assert!(router.is_empty());
}

#[test]
fn test_register_route() {
    let mut router = Router::new();
    router.register("GET", "/hello", hello_handler);
    router.register("POST", "/hello", hello_handler);

    assert_eq!(router.len(), 2);
    assert!(router.has_path("/hello"));
    assert!(!router.has_path("/other"));
}

#[test]
fn test_route_found() {
    let mut router = Router::new();
    router.register("GET", "/hello", hello_handler);

    let req = request("GET /hello?x=1 HTTP/1.1\r\nHost: x\r\n\r\n");
    let response = router.dispatch(HeaderMap::new(), &req).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "hello");
}

#[test]
fn test_handler_receives_default_headers() {
    let mut router = Router::new();
    router.register("GET", "/hello", hello_handler);

    let req = request("GET /hello HTTP/1.1\r\nHost: x\r\n\r\n");
    let response = router
        .dispatch(Settings::default().default_headers(), &req)
        .unwrap();

    assert_eq!(response.header("Access-Control-Allow-Origin").unwrap(), "*");
    assert_eq!(response.header("Connection").unwrap(), "keep-alive");
}

#[test]
fn test_route_not_found() {
    let router = Router::new();

    let req = request("GET /nonexistent HTTP/1.1\r\nHost: x\r\n\r\n");
    let err = router.dispatch(HeaderMap::new(), &req).unwrap_err();

    assert_eq!(err.status, 404);
    assert_eq!(err.status_text, "Not Found");
    assert_eq!(err.body, "Cannot GET /nonexistent");
}

#[test]
fn test_wrong_method_on_known_path_is_not_found() {
    let mut router = Router::new();
    router.register("GET", "/hello", hello_handler);

    let req = request("POST /hello HTTP/1.1\r\nHost: x\r\n\r\n");
    let err = router.dispatch(HeaderMap::new(), &req).unwrap_err();

    assert_eq!(err.status, 404);
    assert_eq!(err.body, "Cannot POST /hello");
}

#[test]
fn test_options_on_registered_path() {
    let mut router = Router::new();
    router.register("GET", "/hello", hello_handler);
    let settings = Settings::default();

    let req = request("OPTIONS /hello HTTP/1.1\r\nHost: x\r\n\r\n");
    let response = router
        .options(HeaderMap::new(), &req, settings.allow_header())
        .unwrap();

    assert_eq!(response.status, StatusCode::NoContent.as_u16());
    assert!(response.body.is_empty());
    assert_eq!(
        response.header("Access-Control-Allow-Methods").unwrap().as_list(),
        settings.allowed_methods
    );
}

#[test]
fn test_options_on_unknown_path() {
    let router = Router::new();

    let req = request("OPTIONS /nope HTTP/1.1\r\nHost: x\r\n\r\n");
    let err = router
        .options(HeaderMap::new(), &req, Settings::default().allow_header())
        .unwrap_err();

    assert_eq!(err.body, "Cannot OPTIONS /nope");
}

#[test]
fn test_handler_errors_pass_through() {
    let mut router = Router::new();
    router.register("GET", "/fail", |_headers: HeaderMap, _req: &Request| -> Result<Response, HttpError> {
        Err(HttpError::internal("boom"))
    });

    let req = request("GET /fail HTTP/1.1\r\nHost: x\r\n\r\n");
    let err = router.dispatch(HeaderMap::new(), &req).unwrap_err();

    assert_eq!(err.status, 500);
    assert_eq!(err.body, "boom");
}

#[test]
fn test_service_ping() {
    let router = service::router();

    let req = request("GET /ping HTTP/1.1\r\nHost: x\r\n\r\n");
    let response = router.dispatch(HeaderMap::new(), &req).unwrap();

    assert_eq!(response.body, "Hello, world!");
    assert_eq!(
        response.header("Content-Type").unwrap(),
        "text/plain; charset=utf-8"
    );
}

#[test]
fn test_service_greeting_redirects_to_next_port() {
    let router = service::router();

    let req = request("POST /greeting HTTP/1.1\r\nHost: localhost:8080\r\n\r\n");
    let response = router.dispatch(HeaderMap::new(), &req).unwrap();

    assert_eq!(response.status, 308);
    assert_eq!(
        response.header("Location").unwrap(),
        "http://localhost:8081/greeting"
    );
}

#[test]
fn test_service_greeting_without_port_uses_http_default() {
    let router = service::router();

    let req = request("POST /greeting HTTP/1.1\r\nHost: example.com\r\n\r\n");
    let response = router.dispatch(HeaderMap::new(), &req).unwrap();

    assert_eq!(
        response.header("Location").unwrap(),
        "http://example.com:81/greeting"
    );
}

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::time::Instant;

use codesnip_server::shutdown;

async fn listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

async fn get_raw(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

fn signal_pair() -> (oneshot::Sender<()>, impl Future<Output = ()> + Send + 'static) {
    let (tx, rx) = oneshot::channel::<()>();
    (tx, async move {
        let _ = rx.await;
    })
}

#[tokio::test]
async fn serves_until_signalled_then_stops_cleanly() {
    let (listener, addr) = listener().await;
    let app = Router::new().route("/ping", get(|| async { "pong" }));
    let (stop, signal) = signal_pair();

    let server = tokio::spawn(shutdown::serve(listener, app, signal, Duration::from_secs(5)));

    let response = get_raw(addr, "/ping").await;
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.ends_with("pong"));

    stop.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn serve_returns_after_grace_period_with_request_in_flight() {
    let (listener, addr) = listener().await;
    let app = Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            "late"
        }),
    );
    let (stop, signal) = signal_pair();
    let grace = Duration::from_millis(200);

    let server = tokio::spawn(shutdown::serve(listener, app, signal, grace));
    let client = tokio::spawn(async move { get_raw(addr, "/slow").await });

    // Let the request reach the handler before signalling.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let started = Instant::now();
    stop.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("server ignored the grace period")
        .unwrap();
    assert!(result.is_ok());
    assert!(started.elapsed() >= grace);
    assert!(started.elapsed() < Duration::from_secs(5));

    client.abort();
}

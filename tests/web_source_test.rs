use acceptance_rates::error::ScraperError;
use acceptance_rates::sources::{PageSource, WebPageSource};
use acceptance_rates::types::YearKey;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Accept one connection, remember its request line, answer with `status`
/// and `body`.
async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        let request = String::from_utf8_lossy(&buf[..n]).into_owned();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request.lines().next().unwrap_or_default().to_string()
    });
    (base, handle)
}

#[tokio::test]
async fn fetches_year_templated_path() {
    let (base, server) = serve_once("200 OK", "<h1>112學年度</h1>").await;
    let source = WebPageSource::new(base, "{year}y-hsinchu-exam/");

    let html = source.fetch_html(&YearKey::from(112)).await.unwrap();
    assert_eq!(html, "<h1>112學年度</h1>");

    let request_line = server.await.unwrap();
    assert_eq!(request_line, "GET /112y-hsinchu-exam/ HTTP/1.1");
}

#[tokio::test]
async fn error_status_is_http_failure() {
    let (base, server) = serve_once("404 Not Found", "<h1>Page not found</h1>").await;
    let source = WebPageSource::new(base, "{year}y-hsinchu-exam/");

    let err = source.fetch_html(&YearKey::from(109)).await.unwrap_err();
    assert!(matches!(err, ScraperError::Http(_)));
    server.await.unwrap();
}

#[tokio::test]
async fn connection_refused_is_http_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let source = WebPageSource::new(base, "{year}/");
    let err = source.fetch_html(&YearKey::from(110)).await.unwrap_err();
    assert!(matches!(err, ScraperError::Http(_)));
}

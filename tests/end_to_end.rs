//! Drives the real HTTP transport against a one-shot local server.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use uptimerobot::{BodyFormat, Client, Error, HttpTransport, Monitor, MonitorType};

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serves exactly one response and hands back the raw request it received.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let reply = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(reply.as_bytes()).await.expect("write reply");
        let _ = socket.shutdown().await;
        request
    });
    (format!("http://{addr}"), handle)
}

fn client(base_url: &str) -> Client {
    Client::with_transport("dummy", base_url, HttpTransport::new(5).expect("transport"))
        .expect("client")
}

#[tokio::test]
async fn test_new_monitor_over_form_encoding() {
    let (base_url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"stat":"ok","monitor":{"id":777810874,"status":1}}"#,
    )
    .await;
    let client = client(&base_url).with_body_format(BodyFormat::Form);
    let monitor = Monitor {
        friendly_name: "My test monitor".to_string(),
        url: "http://example.com".to_string(),
        monitor_type: MonitorType::Http,
        ..Monitor::default()
    };

    let id = client.create_monitor(&monitor).await.expect("create monitor");

    assert_eq!(id, 777_810_874);
    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /v2/newMonitor HTTP/1.1"));
    assert!(request.contains("application/x-www-form-urlencoded"));
    assert!(request.contains("friendly_name=My+test+monitor"));
    assert!(request.contains("url=http%3A%2F%2Fexample.com"));
    assert!(request.contains("type=1"));
    assert!(request.contains("api_key=dummy"));
    assert!(request.contains("format=json"));
}

#[tokio::test]
async fn test_account_over_json() {
    let (base_url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"stat":"ok","account":{"email":"test@domain.com","monitor_limit":50,"monitor_interval":1,"up_monitors":1,"down_monitors":0,"paused_monitors":2}}"#,
    )
    .await;

    let account = client(&base_url).account().await.expect("account");

    assert_eq!(account.email, "test@domain.com");
    assert_eq!(account.monitor_limit, 50);
    let request = server.await.expect("server task");
    assert!(request.contains(r#""api_key":"dummy""#));
}

#[tokio::test]
async fn test_not_found_status_is_transport_error() {
    let (base_url, server) = serve_once("HTTP/1.1 404 Not Found", "{}").await;

    let err = client(&base_url).account().await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, Error::UnexpectedStatus { status: 404, .. }));
    server.await.expect("server task");
}

//! Certificate verification against a local TLS listener with a self-signed
//! certificate for `localhost` / `127.0.0.1`.

use cac_client::{ClientConfig, CloudAtCostClient, Error};
use native_tls::{Identity, TlsAcceptor};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::thread;

const CERT: &[u8] = include_bytes!("fixtures/cert.pem");
const KEY: &[u8] = include_bytes!("fixtures/key.pem");

/// Serves `{}` with status 200 to every client that completes a handshake.
fn spawn_tls_panel() -> SocketAddr {
    let identity = Identity::from_pkcs8(CERT, KEY).unwrap();
    let acceptor = TlsAcceptor::new(identity).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            // Rejected handshakes are expected when the client verifies.
            let Ok(mut stream) = acceptor.accept(stream) else {
                continue;
            };
            let mut request = Vec::new();
            let mut chunk = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(read) => request.extend_from_slice(&chunk[..read]),
                }
            }
            let _ = stream.write_all(
                b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\n{}",
            );
            let _ = stream.shutdown();
        }
    });

    addr
}

fn client_with(config: ClientConfig) -> CloudAtCostClient {
    CloudAtCostClient::builder()
        .with_credentials("user", "secret")
        .with_config(config)
        .build()
        .unwrap()
}

fn panel_config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(format!("https://{addr}")).unwrap()
}

#[tokio::test]
async fn untrusted_certificate_is_rejected_by_default() {
    let addr = spawn_tls_panel();

    let client = client_with(panel_config(addr));
    let err = client.list_servers().await.unwrap_err();
    assert!(matches!(err, Error::NoResponse(_)), "got {err:?}");
    assert_eq!(client.last_http_code(), None);
}

#[tokio::test]
async fn disabled_verification_accepts_untrusted_certificate() {
    let addr = spawn_tls_panel();

    let client = client_with(panel_config(addr).with_tls_verify(false));
    let body = client.list_servers().await.unwrap();
    assert_eq!(body, "{}");
    assert_eq!(client.last_http_code(), Some(200));
}

#[tokio::test]
async fn configured_ca_certificate_is_trusted() {
    let addr = spawn_tls_panel();
    let ca = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cert.pem");

    let client = client_with(panel_config(addr).with_ca_cert(ca));
    let body = client.list_servers().await.unwrap();
    assert_eq!(body, "{}");
}

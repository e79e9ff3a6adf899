//! End-to-end chat scenarios over loopback TCP
//!
//! Each test starts a real server (actor plus accept loop) on an
//! ephemeral port and drives it with raw framed sockets, the same bytes a
//! client binary would produce.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;

use linechat::{accept_loop, decode_header, ChatServer, Frame, HEADER_LEN, MAX_BODY_LEN};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

async fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (cmd_tx, cmd_rx) = mpsc::channel(256);
    tokio::spawn(ChatServer::new(cmd_rx).run());
    tokio::spawn(accept_loop(listener, cmd_tx));

    addr
}

async fn send_body(stream: &mut TcpStream, body: &[u8]) {
    let frame = Frame::new(body.to_vec()).unwrap();
    stream.write_all(&frame.encode()).await.unwrap();
}

async fn recv_body(stream: &mut TcpStream) -> Vec<u8> {
    timeout(RECV_TIMEOUT, async {
        let mut header = [0u8; HEADER_LEN];
        stream.read_exact(&mut header).await.unwrap();
        let body_len = decode_header(&header).unwrap();

        let mut body = vec![0u8; body_len];
        stream.read_exact(&mut body).await.unwrap();
        body
    })
    .await
    .expect("timed out waiting for a frame")
}

#[tokio::test]
async fn history_is_replayed_to_late_joiner() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    send_body(&mut a, b"hello").await;
    // The self-echo confirms the room has recorded the message
    assert_eq!(recv_body(&mut a).await, b"hello");

    let mut b = TcpStream::connect(addr).await.unwrap();
    assert_eq!(recv_body(&mut b).await, b"hello");

    send_body(&mut a, b"world").await;
    assert_eq!(recv_body(&mut a).await, b"world");
    assert_eq!(recv_body(&mut b).await, b"world");
}

#[tokio::test]
async fn broadcast_reaches_all_participants_in_order() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();

    send_body(&mut a, b"first").await;
    assert_eq!(recv_body(&mut a).await, b"first");
    send_body(&mut b, b"second").await;

    assert_eq!(recv_body(&mut a).await, b"second");
    assert_eq!(recv_body(&mut b).await, b"first");
    assert_eq!(recv_body(&mut b).await, b"second");
}

#[tokio::test]
async fn max_length_body_is_accepted_and_echoed() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let body = vec![b'x'; MAX_BODY_LEN];
    send_body(&mut a, &body).await;

    assert_eq!(recv_body(&mut a).await, body);
}

#[tokio::test]
async fn oversized_header_closes_the_connection() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    a.write_all(b"9999").await.unwrap();

    // The server must hang up without sending anything
    let mut buf = [0u8; 16];
    let n = timeout(RECV_TIMEOUT, a.read(&mut buf))
        .await
        .expect("timed out waiting for the server to hang up")
        .unwrap_or(0);
    assert_eq!(n, 0);
}

#[tokio::test]
async fn garbage_header_closes_the_connection() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    a.write_all(b"abcd").await.unwrap();

    let mut buf = [0u8; 16];
    let n = timeout(RECV_TIMEOUT, a.read(&mut buf))
        .await
        .expect("timed out waiting for the server to hang up")
        .unwrap_or(0);
    assert_eq!(n, 0);
}

#[tokio::test]
async fn disconnected_participant_does_not_stop_broadcast() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    let c = TcpStream::connect(addr).await.unwrap();
    drop(c);

    send_body(&mut a, b"still going").await;

    assert_eq!(recv_body(&mut a).await, b"still going");
    assert_eq!(recv_body(&mut b).await, b"still going");
}

#[tokio::test]
async fn empty_body_is_broadcast() {
    let addr = start_server().await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    send_body(&mut a, b"").await;
    assert_eq!(recv_body(&mut a).await, b"");

    // Framing stays aligned afterwards
    send_body(&mut a, b"next").await;
    assert_eq!(recv_body(&mut a).await, b"next");
}

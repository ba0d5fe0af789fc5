use futures_util::SinkExt;
use pistat::dashboard::{Dashboard, FrameOutcome};
use pistat::prefs::MemoryStore;
use pistat::ws::{close, connect, next_frame, normalize_endpoint, Frame};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};

// Serve a few frames from a local socket and feed them through the dashboard.
#[tokio::test]
async fn frames_from_socket_reach_dashboard() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(tcp).await.unwrap();
        ws.send(Message::Ping(vec![1])).await.unwrap();
        ws.send(Message::Text(r#"{"temp": 51.2}"#.into()))
            .await
            .unwrap();
        ws.send(Message::Binary(br#"{"host": {"hostname": "pi", "uptime": 60}}"#.to_vec()))
            .await
            .unwrap();
        ws.send(Message::Text("{oops".into())).await.unwrap();
        ws.close(None).await.unwrap();
    });

    let url = normalize_endpoint(&addr.to_string()).unwrap();
    assert_eq!(url.path(), "/ws_data");
    let mut ws = connect(&url).await.expect("connect ws");
    let mut dash = Dashboard::new(Box::new(MemoryStore::new()));
    let mut outcomes = Vec::new();
    while let Some(frame) = next_frame(&mut ws).await {
        let outcome = match frame.expect("frame") {
            Frame::Text(t) => dash.apply_frame(&t),
            Frame::Binary(b) => dash.apply_binary_frame(&b),
        };
        outcomes.push(outcome);
    }
    close(&mut ws).await;
    server.await.unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], FrameOutcome::Applied);
    assert_eq!(outcomes[1], FrameOutcome::Applied);
    assert!(matches!(outcomes[2], FrameOutcome::Rejected(_)));
    assert_eq!(dash.state().temp, Some(51));
    assert_eq!(dash.state().host.as_ref().unwrap().hostname, "pi");
    assert!(dash.state().error().is_some());
}

// Integration probe: only runs when PISTAT_WS points at a live feed.
// Example: PISTAT_WS=ws://raspberrypi.local:8080/ws_data cargo test -p pistat --test ws_loopback -- --nocapture
#[tokio::test]
async fn probe_live_feed() {
    let target = match std::env::var("PISTAT_WS") {
        Ok(v) if !v.is_empty() => v,
        _ => {
            eprintln!("skipping probe_live_feed: set PISTAT_WS=ws://host:port/ws_data to run it");
            return;
        }
    };
    let url = normalize_endpoint(&target).expect("endpoint");
    let mut ws = connect(&url).await.expect("connect ws");
    let frame = next_frame(&mut ws).await.expect("a frame").expect("no transport error");
    let mut dash = Dashboard::new(Box::new(MemoryStore::new()));
    let outcome = match frame {
        Frame::Text(t) => dash.apply_frame(&t),
        Frame::Binary(b) => dash.apply_binary_frame(&b),
    };
    assert_eq!(outcome, FrameOutcome::Applied, "{:?}", dash.state().error());
    close(&mut ws).await;
}

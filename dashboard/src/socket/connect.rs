use common::server::{
    config::DashboardConfig,
    push::{parse_frame, PushEvent, PushMessage},
};
use futures_util::StreamExt;
use log::{error, info};
use std::time::Duration;
use tokio::{sync::mpsc::Sender, task::JoinHandle, time::sleep};
use tokio_tungstenite::connect_async;

const START_DELAY: Duration = Duration::from_secs(1);
const MAX_DELAY: Duration = Duration::from_secs(30);

/// Owned handle to the push channel. The connection lives as a background
/// task between `connect` and `disconnect`; dropping the handle tears the
/// task down with it, so the channel never outlives the view that owns it.
#[derive(Debug)]
pub struct PushSocket {
    url: String,
    task: Option<JoinHandle<()>>,
}

impl PushSocket {
    pub fn new(config: &DashboardConfig) -> PushSocket {
        PushSocket {
            url: format!(
                "ws://{}:{}/socket",
                config.monitor_server.address, config.monitor_server.port
            ),
            task: None,
        }
    }

    /// Subscribe to the push channel, delivering events to `events` until
    /// `disconnect` is called. Reconnects with capped backoff whenever
    /// the transport drops.
    pub fn connect(&mut self, events: Sender<PushEvent>) {
        if self.task.is_some() {
            return;
        }
        let url = self.url.clone();
        self.task = Some(tokio::spawn(run_channel(url, events)));
    }

    /// Detach from the push channel. No event is delivered afterwards.
    pub fn disconnect(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for PushSocket {
    fn drop(&mut self) {
        self.disconnect();
    }
}

async fn run_channel(url: String, events: Sender<PushEvent>) {
    let mut delay = START_DELAY;

    loop {
        let connect_result = connect_async(&url).await;
        match connect_result {
            Ok((mut socket, _response)) => {
                info!("[socket] Connected to push channel at {url}");
                if events.send(PushEvent::Connected).await.is_err() {
                    return;
                }
                delay = START_DELAY;

                while let Some(message) = socket.next().await {
                    let frame = match message {
                        Ok(result) => {
                            if !result.is_text() {
                                continue;
                            }
                            result.to_string()
                        }
                        Err(err) => {
                            error!("[socket] Could not read message from push channel: {err:?}");
                            break;
                        }
                    };

                    let registry = match parse_frame(&frame) {
                        Ok(PushMessage::Update(result)) => result,
                        Err(err) => {
                            error!("[socket] Could not parse push frame: {err:?}");
                            continue;
                        }
                    };

                    if events.send(PushEvent::Update(registry)).await.is_err() {
                        return;
                    }
                }

                info!("[socket] Push channel closed");
                if events.send(PushEvent::Disconnected).await.is_err() {
                    return;
                }
            }
            Err(err) => {
                error!("[socket] Could not connect to push channel at {url}: {err:?}");
            }
        }

        // Nobody left to deliver to, stop retrying.
        if events.is_closed() {
            return;
        }
        sleep(delay).await;
        delay = (delay * 2).min(MAX_DELAY);
    }
}

#[cfg(test)]
mod tests {
    use super::{run_channel, PushSocket};
    use common::server::{config::DashboardConfig, push::PushEvent};
    use futures_util::SinkExt;
    use tokio::{net::TcpListener, sync::mpsc};
    use tokio_tungstenite::accept_async;

    #[tokio::test]
    async fn test_push_channel_delivers_updates() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut socket = accept_async(stream).await.unwrap();
            let frame = r#"{"event":"update","data":{"3c22fb11aa":{"hostname":"web01"}}}"#;
            socket.send(frame.to_string().into()).await.unwrap();
            socket.close(None).await.unwrap();
        });

        let (events, mut rx) = mpsc::channel(8);
        let channel = tokio::spawn(run_channel(
            format!("ws://{}:{}/socket", address.ip(), address.port()),
            events,
        ));

        assert!(matches!(rx.recv().await, Some(PushEvent::Connected)));
        match rx.recv().await {
            Some(PushEvent::Update(registry)) => {
                assert_eq!(registry["3c22fb11aa"].hostname, "web01");
            }
            other => panic!("expected update event, got {other:?}"),
        }
        assert!(matches!(rx.recv().await, Some(PushEvent::Disconnected)));

        server.await.unwrap();
        channel.abort();
    }

    #[tokio::test]
    async fn test_disconnect_detaches_listener() {
        let config = DashboardConfig::with_address("127.0.0.1", 1);
        let mut socket = PushSocket::new(&config);

        let (events, mut rx) = mpsc::channel(8);
        socket.connect(events);
        socket.disconnect();

        // The channel task is gone, so the sender side is dropped.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_connect_is_idempotent() {
        let config = DashboardConfig::with_address("127.0.0.1", 1);
        let mut socket = PushSocket::new(&config);

        let (first, _rx_first) = mpsc::channel(8);
        let (second, mut rx_second) = mpsc::channel(8);
        socket.connect(first);
        socket.connect(second);

        // The second subscription was ignored; its sender is dropped.
        assert!(rx_second.recv().await.is_none());
    }
}

use crate::app::App;
use common::{machine::Registry, server::push::PushEvent};
use std::sync::Arc;
use tokio::{
    sync::{mpsc::Receiver, Mutex},
    task::JoinHandle,
};

/// Live view of the fleet. Every push replaces the whole mapping, so a
/// machine absent from the latest snapshot is gone from the view. No
/// field-by-field merging, no stale residue between push cycles.
#[derive(Debug, Default)]
pub struct RegistryStore {
    registry: Registry,
    connected: bool,
}

impl RegistryStore {
    pub fn new() -> RegistryStore {
        RegistryStore {
            registry: Registry::new(),
            connected: false,
        }
    }

    pub fn apply(&mut self, event: PushEvent) {
        match event {
            PushEvent::Connected => self.connected = true,
            PushEvent::Disconnected => self.connected = false,
            PushEvent::Update(snapshot) => self.registry = snapshot,
        }
    }

    /// Seed from the one-time startup pull. A push that raced ahead of
    /// the pull is fresher, so the seed only fills an empty view.
    pub fn seed(&mut self, snapshot: Registry) {
        if self.registry.is_empty() {
            self.registry = snapshot;
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Drain push events into the shared state. Aborting the returned task
/// detaches the view from the channel; events sent afterwards reach
/// nothing.
pub fn spawn_event_pump(app: Arc<Mutex<App>>, mut events: Receiver<PushEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            app.lock().await.apply_push(event);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{spawn_event_pump, RegistryStore};
    use crate::app::App;
    use common::{
        machine::{MachineRecord, Registry},
        server::{capabilities::Capabilities, push::PushEvent},
    };
    use std::sync::Arc;
    use tokio::sync::{mpsc, Mutex};

    fn snapshot(entries: &[(&str, &str)]) -> Registry {
        entries
            .iter()
            .map(|(id, hostname)| {
                let record = MachineRecord {
                    hostname: hostname.to_string(),
                    ..Default::default()
                };
                (id.to_string(), record)
            })
            .collect()
    }

    #[test]
    fn test_replace_leaves_no_residue() {
        let mut store = RegistryStore::new();
        store.apply(PushEvent::Update(snapshot(&[
            ("3c22fb11aa", "web01"),
            ("9e01d407bb", "web02"),
        ])));
        store.apply(PushEvent::Update(snapshot(&[("9e01d407bb", "web02-renamed")])));

        let registry = store.registry();
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains_key("3c22fb11aa"));
        assert_eq!(registry["9e01d407bb"].hostname, "web02-renamed");
    }

    #[test]
    fn test_connection_events() {
        let mut store = RegistryStore::new();
        assert!(!store.is_connected());
        store.apply(PushEvent::Connected);
        assert!(store.is_connected());
        store.apply(PushEvent::Disconnected);
        assert!(!store.is_connected());
    }

    #[test]
    fn test_seed_only_fills_empty_view() {
        let mut store = RegistryStore::new();
        store.seed(snapshot(&[("3c22fb11aa", "web01")]));
        assert_eq!(store.registry().len(), 1);

        // A late pull must not clobber pushed state.
        store.apply(PushEvent::Update(snapshot(&[("9e01d407bb", "web02")])));
        store.seed(snapshot(&[("3c22fb11aa", "web01")]));
        assert!(store.registry().contains_key("9e01d407bb"));
        assert!(!store.registry().contains_key("3c22fb11aa"));
    }

    #[tokio::test]
    async fn test_event_pump_applies_in_order() {
        let app = Arc::new(Mutex::new(App::new(Capabilities::default())));
        let (events, rx) = mpsc::channel(4);
        let pump = spawn_event_pump(app.clone(), rx);

        events
            .send(PushEvent::Update(snapshot(&[("3c22fb11aa", "web01")])))
            .await
            .unwrap();
        events
            .send(PushEvent::Update(snapshot(&[("9e01d407bb", "web02")])))
            .await
            .unwrap();
        drop(events);
        pump.await.unwrap();

        let app = app.lock().await;
        assert_eq!(app.store.registry().len(), 1);
        assert!(app.store.registry().contains_key("9e01d407bb"));
    }

    #[tokio::test]
    async fn test_detached_pump_mutates_nothing() {
        let app = Arc::new(Mutex::new(App::new(Capabilities::default())));
        let (events, rx) = mpsc::channel(4);
        let pump = spawn_event_pump(app.clone(), rx);

        events
            .send(PushEvent::Update(snapshot(&[("3c22fb11aa", "web01")])))
            .await
            .unwrap();
        // Give the pump a chance to apply the first snapshot.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        pump.abort();
        let _ = pump.await;

        // The listener is gone; this update reaches nothing.
        let _ = events
            .send(PushEvent::Update(snapshot(&[("9e01d407bb", "web02")])))
            .await;
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let app = app.lock().await;
        assert_eq!(app.store.registry().len(), 1);
        assert!(app.store.registry().contains_key("3c22fb11aa"));
    }
}

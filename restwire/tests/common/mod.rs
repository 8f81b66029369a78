//! Shared helpers for restwire integration tests.

use restwire::Payload;
use tokio::sync::oneshot;

/// Build a delivery callback paired with a receiver for the delivered
/// payload, so tests can await (or assert the absence of) delivery.
pub fn capture() -> (
    impl FnOnce(Payload) + Send + 'static,
    oneshot::Receiver<Payload>,
) {
    let (tx, rx) = oneshot::channel::<Payload>();
    (
        move |payload| {
            let _ = tx.send(payload);
        },
        rx,
    )
}

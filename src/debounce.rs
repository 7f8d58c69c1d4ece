//! Debounced filter input.

use std::time::Duration;

use tokio::sync::{mpsc, watch};

/// Coalesces a stream of text-change events into settled values.
///
/// The latest value is emitted on the watch channel only once no new event
/// has arrived for the quiescence window; every incoming event restarts the
/// window. The worker task ends when the `Debouncer` is dropped, flushing
/// whatever value was pending.
pub struct Debouncer {
    events: mpsc::UnboundedSender<String>,
}

impl Debouncer {
    pub fn new(quiescence: Duration) -> (Self, watch::Receiver<String>) {
        let (events, mut queue) = mpsc::unbounded_channel::<String>();
        let (settled, output) = watch::channel(String::new());

        tokio::spawn(async move {
            loop {
                let Some(mut candidate) = queue.recv().await else {
                    return;
                };
                loop {
                    tokio::select! {
                        next = queue.recv() => match next {
                            Some(value) => candidate = value,
                            None => {
                                let _ = settled.send(candidate);
                                return;
                            },
                        },
                        () = tokio::time::sleep(quiescence) => {
                            let _ = settled.send(candidate);
                            break;
                        },
                    }
                }
            }
        });

        (Self { events }, output)
    }

    /// Records a new value; the settled channel fires once input goes quiet.
    pub fn input(&self, value: impl Into<String>) {
        let _ = self.events.send(value.into());
    }
}

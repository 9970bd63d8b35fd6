/*!
 * Monitor Service
 * One task owns the router; debugger and sampler events are queued to it
 *
 * Each queue preserves its own order. No ordering is imposed between the two
 * beyond what the router's state already enforces.
 */

use crate::core::limits::DEBUG_EVENT_QUEUE_CAPACITY;
use crate::debug::{DebugEvent, DebugEventRouter, RouterBuilder};
use crate::sampler::SamplerMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Sender side used by hosts to feed debugger events
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    tx: mpsc::Sender<DebugEvent>,
}

impl MonitorHandle {
    /// Queue an event; false once the service has stopped
    pub async fn send(&self, event: DebugEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    /// Queue without waiting; false if the queue is full or closed
    pub fn try_send(&self, event: DebugEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// The event loop
pub struct MonitorService {
    router: DebugEventRouter,
    debug_rx: mpsc::Receiver<DebugEvent>,
    sampler_rx: mpsc::UnboundedReceiver<SamplerMessage>,
}

impl MonitorService {
    /// Build the router and its queues
    pub fn new(builder: RouterBuilder) -> (Self, MonitorHandle) {
        let (debug_tx, debug_rx) = mpsc::channel(DEBUG_EVENT_QUEUE_CAPACITY);
        let (sampler_tx, sampler_rx) = mpsc::unbounded_channel();

        let service = Self {
            router: builder.build(sampler_tx),
            debug_rx,
            sampler_rx,
        };
        (service, MonitorHandle { tx: debug_tx })
    }

    /// Run on a new tokio task
    pub fn spawn(self) -> JoinHandle<DebugEventRouter> {
        tokio::spawn(self.run())
    }

    /// Process events until every handle is dropped, then shut the router down
    ///
    /// Returns the router so callers can inspect the final state.
    pub async fn run(mut self) -> DebugEventRouter {
        info!("Monitor event loop started");

        loop {
            tokio::select! {
                event = self.debug_rx.recv() => match event {
                    Some(event) => self.router.handle_debug_event(event),
                    None => break,
                },
                Some(message) = self.sampler_rx.recv() => {
                    self.router.handle_sampler_message(message);
                }
            }
        }

        debug!("All monitor handles dropped");
        self.router.shutdown();
        info!("Monitor event loop stopped");
        self.router
    }
}

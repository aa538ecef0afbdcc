use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::service::{GenerateRequest, ReplyService, ServiceError};

pub type Completion = Result<String, ServiceError>;

/// Runs generation requests off the UI thread and hands results back
/// through a channel the event loop drains each tick
pub struct RequestWorker {
    runtime: Runtime,
    service: Arc<dyn ReplyService>,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

impl RequestWorker {
    pub fn new(service: Arc<dyn ReplyService>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            runtime,
            service,
            tx,
            rx,
        })
    }

    pub fn submit(&self, request: GenerateRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let started = Instant::now();
            tracing::info!(
                tone = %request.tone,
                chars = request.email_content.chars().count(),
                "requesting reply"
            );
            let outcome = service.generate(&request).await;
            match &outcome {
                Ok(reply) => tracing::info!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    reply_chars = reply.chars().count(),
                    "reply generated"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    error = ?e,
                    "reply generation failed"
                ),
            }
            // Receiver only goes away on shutdown
            let _ = tx.send(outcome);
        });
    }

    /// Next finished request, if any, without blocking
    pub fn try_recv(&mut self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }
}

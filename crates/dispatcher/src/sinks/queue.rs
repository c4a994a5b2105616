//! QueueSink - renders into the shared scratch buffer and sends one message
//!
//! The queue endpoint is a Unix datagram socket named by the target path:
//! one send is one message. The socket is connected lazily on the first
//! successful render and survives across renders when `keep_open` is set.

use std::path::PathBuf;
use std::sync::Arc;

use contracts::{ContractError, OutputSink, SharedRenderer};
use metrics::counter;
use tokio::net::UnixDatagram;
use tracing::{debug, instrument};

use super::open_template;
use crate::scratch::SharedScratch;

/// Sink that delivers rendered output as single messages to a queue target
pub struct QueueSink {
    name: String,
    template: PathBuf,
    target: PathBuf,
    keep_open: bool,
    queue: Option<UnixDatagram>,
    scratch: SharedScratch,
}

impl QueueSink {
    /// Create a closed queue sink sharing the process-wide scratch buffer
    pub fn new(
        template: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        keep_open: bool,
        scratch: SharedScratch,
    ) -> Self {
        let target = target.into();
        Self {
            name: target.display().to_string(),
            template: template.into(),
            target,
            keep_open,
            queue: None,
            scratch,
        }
    }

    fn connect_queue(&self) -> Result<UnixDatagram, ContractError> {
        let socket = UnixDatagram::unbound()
            .map_err(|e| ContractError::sink_open(&self.name, e.to_string()))?;
        socket
            .connect(&self.target)
            .map_err(|e| ContractError::sink_open(&self.name, e.to_string()))?;
        Ok(socket)
    }
}

impl OutputSink for QueueSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.queue.is_some()
    }

    #[instrument(
        name = "queue_sink_render",
        skip(self, renderer),
        fields(target = %self.name)
    )]
    async fn render(&mut self, renderer: &SharedRenderer) -> Result<(), ContractError> {
        let mut source = open_template(&self.template)?;

        // Render under the scratch lock. The rewind overwrites the previous
        // render from offset zero, so a shorter message can never carry
        // trailing bytes of a longer one. The lock never crosses an await.
        let scratch = Arc::clone(&self.scratch);
        let message = {
            let mut scratch = scratch
                .lock()
                .map_err(|_| ContractError::Other("scratch buffer lock poisoned".to_string()))?;
            scratch.rewind();
            if let Err(e) = renderer.render(&mut source, &mut *scratch) {
                // A failed render closes the queue handle.
                self.queue = None;
                return Err(ContractError::render(
                    self.template.display().to_string(),
                    e.to_string(),
                ));
            }
            scratch.message()
        };

        // Lazy open; an unopenable queue fails the pass and leaves the sink
        // state untouched.
        let socket = match self.queue.take() {
            Some(socket) => socket,
            None => {
                let socket = self.connect_queue()?;
                debug!(target = %self.name, "Queue opened");
                socket
            }
        };

        match socket.send(&message).await {
            Ok(sent) => {
                debug!(target = %self.name, bytes = sent, "Message sent");
                counter!("tmpld_queue_messages_total", "target" => self.name.clone())
                    .increment(1);
                if self.keep_open {
                    self.queue = Some(socket);
                } else {
                    debug!(target = %self.name, "Queue closed");
                }
                Ok(())
            }
            Err(e) => {
                // Send failure closes the queue handle.
                debug!(target = %self.name, "Queue closed");
                Err(ContractError::sink_send(&self.name, e.to_string()))
            }
        }
    }

    #[instrument(name = "queue_sink_close", skip(self))]
    async fn close(&mut self) {
        if self.queue.take().is_some() {
            debug!(target = %self.name, "Queue closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scratch::shared_scratch;
    use crate::sinks::testutil::{copy_renderer, fail_renderer};
    use std::io::Write;
    use std::time::Duration;
    use tempfile::tempdir;

    fn write_template(dir: &std::path::Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn bind_queue(path: &std::path::Path) -> std::os::unix::net::UnixDatagram {
        let socket = std::os::unix::net::UnixDatagram::bind(path).unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(5)))
            .unwrap();
        socket
    }

    fn recv_message(socket: &std::os::unix::net::UnixDatagram) -> Vec<u8> {
        let mut buf = vec![0u8; 64 * 1024];
        let n = socket.recv(&mut buf).unwrap();
        buf.truncate(n);
        buf
    }

    #[tokio::test]
    async fn test_render_sends_one_message() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path(), "a.tmpl", "payload");
        let queue_path = dir.path().join("queue.sock");
        let receiver = bind_queue(&queue_path);

        let scratch = shared_scratch(1024);
        let mut sink = QueueSink::new(&template, &queue_path, false, scratch);
        sink.render(&copy_renderer()).await.unwrap();

        assert_eq!(recv_message(&receiver), b"payload");
        assert!(!sink.is_open());
    }

    #[tokio::test]
    async fn test_keep_open_reuses_queue_handle() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path(), "a.tmpl", "m");
        let queue_path = dir.path().join("queue.sock");
        let receiver = bind_queue(&queue_path);

        let scratch = shared_scratch(1024);
        let mut sink = QueueSink::new(&template, &queue_path, true, scratch);

        sink.render(&copy_renderer()).await.unwrap();
        assert!(sink.is_open());
        sink.render(&copy_renderer()).await.unwrap();
        assert!(sink.is_open());

        assert_eq!(recv_message(&receiver), b"m");
        assert_eq!(recv_message(&receiver), b"m");
    }

    #[tokio::test]
    async fn test_shorter_render_does_not_leak_previous_bytes() {
        let dir = tempdir().unwrap();
        let long = write_template(dir.path(), "long.tmpl", "a very long first message body");
        let short = write_template(dir.path(), "short.tmpl", "tiny");
        let queue_path = dir.path().join("queue.sock");
        let receiver = bind_queue(&queue_path);

        let scratch = shared_scratch(1024);
        let mut first = QueueSink::new(&long, &queue_path, false, Arc::clone(&scratch));
        let mut second = QueueSink::new(&short, &queue_path, false, scratch);

        first.render(&copy_renderer()).await.unwrap();
        second.render(&copy_renderer()).await.unwrap();

        assert_eq!(recv_message(&receiver), b"a very long first message body");
        assert_eq!(recv_message(&receiver), b"tiny");
    }

    #[tokio::test]
    async fn test_unopenable_queue_is_error() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path(), "a.tmpl", "x");
        let queue_path = dir.path().join("nobody-listens.sock");

        let scratch = shared_scratch(1024);
        let mut sink = QueueSink::new(&template, &queue_path, false, scratch);
        let result = sink.render(&copy_renderer()).await;

        assert!(matches!(result.unwrap_err(), ContractError::SinkOpen { .. }));
        assert!(!sink.is_open());
    }

    #[tokio::test]
    async fn test_render_failure_closes_queue() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path(), "a.tmpl", "x");
        let queue_path = dir.path().join("queue.sock");
        let _receiver = bind_queue(&queue_path);

        let scratch = shared_scratch(1024);
        let mut sink = QueueSink::new(&template, &queue_path, true, scratch);
        sink.render(&copy_renderer()).await.unwrap();
        assert!(sink.is_open());

        assert!(sink.render(&fail_renderer()).await.is_err());
        assert!(!sink.is_open());
    }

    #[tokio::test]
    async fn test_render_larger_than_scratch_fails() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path(), "a.tmpl", "this body exceeds the capacity");
        let queue_path = dir.path().join("queue.sock");
        let _receiver = bind_queue(&queue_path);

        let scratch = shared_scratch(8);
        let mut sink = QueueSink::new(&template, &queue_path, false, scratch);

        assert!(matches!(
            sink.render(&copy_renderer()).await.unwrap_err(),
            ContractError::Render { .. }
        ));
    }
}

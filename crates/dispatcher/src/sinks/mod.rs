//! Sink implementations
//!
//! Contains StreamSink, QueueSink, and the Sink storage enum.

mod queue;
mod stream;

pub use self::queue::QueueSink;
pub use self::stream::StreamSink;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use contracts::{ContractError, OutputSink, SharedRenderer, TargetKind, TemplateSpec};

use crate::scratch::SharedScratch;

/// Open a template source read-only
pub(crate) fn open_template(path: &Path) -> Result<File, ContractError> {
    File::open(path)
        .map_err(|e| ContractError::template_read(path.display().to_string(), e.to_string()))
}

/// Storage for the two sink variants
///
/// The `OutputSink` trait carries the render contract; this enum is how a
/// template stores whichever variant its configuration entry selected.
pub enum Sink {
    /// Stream target
    Stream(StreamSink),
    /// Message queue target
    Queue(QueueSink),
}

impl Sink {
    /// Build the sink configured by a screened template spec
    pub fn from_spec(spec: &TemplateSpec, scratch: &SharedScratch) -> Self {
        match spec.kind {
            TargetKind::Fd => Sink::Stream(StreamSink::new(
                &spec.template,
                &spec.target,
                spec.append,
                spec.keep_open,
            )),
            TargetKind::Mq => Sink::Queue(QueueSink::new(
                &spec.template,
                &spec.target,
                spec.keep_open,
                Arc::clone(scratch),
            )),
        }
    }
}

impl OutputSink for Sink {
    fn name(&self) -> &str {
        match self {
            Sink::Stream(sink) => sink.name(),
            Sink::Queue(sink) => sink.name(),
        }
    }

    fn is_open(&self) -> bool {
        match self {
            Sink::Stream(sink) => sink.is_open(),
            Sink::Queue(sink) => sink.is_open(),
        }
    }

    async fn render(&mut self, renderer: &SharedRenderer) -> Result<(), ContractError> {
        match self {
            Sink::Stream(sink) => sink.render(renderer).await,
            Sink::Queue(sink) => sink.render(renderer).await,
        }
    }

    async fn close(&mut self) {
        match self {
            Sink::Stream(sink) => sink.close().await,
            Sink::Queue(sink) => sink.close().await,
        }
    }
}

//! StreamSink - renders to a stream target
//!
//! The target is opened lazily on the first render: created if missing,
//! appended to when `append` is set, truncated otherwise. With `keep_open`
//! the descriptor survives across successful renders.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;

use contracts::{ContractError, OutputSink, SharedRenderer};
use tracing::{debug, instrument};

use super::open_template;

/// Sink that writes rendered output to a file or stream target
pub struct StreamSink {
    name: String,
    template: PathBuf,
    target: PathBuf,
    append: bool,
    keep_open: bool,
    out: Option<File>,
}

impl StreamSink {
    /// Create a closed stream sink
    pub fn new(
        template: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        append: bool,
        keep_open: bool,
    ) -> Self {
        let target = target.into();
        Self {
            name: target.display().to_string(),
            template: template.into(),
            target,
            append,
            keep_open,
            out: None,
        }
    }

    fn open_target(&self) -> Result<File, ContractError> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&self.target)
            .map_err(|e| ContractError::sink_open(&self.name, e.to_string()))
    }
}

impl OutputSink for StreamSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.out.is_some()
    }

    #[instrument(
        name = "stream_sink_render",
        skip(self, renderer),
        fields(target = %self.name)
    )]
    async fn render(&mut self, renderer: &SharedRenderer) -> Result<(), ContractError> {
        // Open failures skip the render and leave the sink state untouched.
        let mut source = open_template(&self.template)?;

        let mut dest = match self.out.take() {
            Some(file) => file,
            None => {
                let file = self.open_target()?;
                debug!(target = %self.name, "Stream target opened");
                file
            }
        };

        let result = renderer
            .render(&mut source, &mut dest)
            .map_err(|e| ContractError::render(self.template.display().to_string(), e.to_string()));

        // The target stays open only after a successful render with
        // keep_open set; everything else closes it. The source closes on
        // scope exit either way.
        if result.is_ok() && self.keep_open {
            self.out = Some(dest);
        } else {
            debug!(target = %self.name, "Stream target closed");
        }

        result
    }

    #[instrument(name = "stream_sink_close", skip(self))]
    async fn close(&mut self) {
        if self.out.take().is_some() {
            debug!(target = %self.name, "Stream target closed");
        }
    }
}

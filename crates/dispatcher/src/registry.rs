//! Template registry
//!
//! Owned registries throughout: the registry owns its templates, each
//! template owns its trigger variables and its sink, no back-references.
//! Built once at startup; during dispatch the only mutation is each
//! template's own sink state.

use std::path::{Path, PathBuf};

use contracts::{OutputSink, SharedRenderer, StateProvider, TemplateSpec, VarHandle};
use tracing::{info, warn};

use crate::binder;
use crate::metrics::{MetricsSnapshot, SinkMetrics};
use crate::scratch::SharedScratch;
use crate::sinks::Sink;

/// A trigger variable owned by one template
///
/// Each template resolves its own triggers; two templates naming the same
/// variable hold independent handles.
#[derive(Debug, Clone)]
pub struct TriggerVar {
    name: String,
    handle: Option<VarHandle>,
}

impl TriggerVar {
    /// Create an unbound trigger
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: None,
        }
    }

    /// Variable name as declared in configuration
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved handle, `None` until the binder succeeds
    pub fn handle(&self) -> Option<VarHandle> {
        self.handle
    }

    /// Whether the trigger resolved
    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    pub(crate) fn bind(&mut self, handle: VarHandle) {
        self.handle = Some(handle);
    }
}

/// One configured template with its triggers and sink
pub struct Template {
    triggers: Vec<TriggerVar>,
    template_path: PathBuf,
    sink: Sink,
    metrics: SinkMetrics,
}

impl Template {
    /// Trigger variables in declaration order
    pub fn triggers(&self) -> &[TriggerVar] {
        &self.triggers
    }

    /// Template source path
    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    /// Target name of the sink
    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Whether the sink's target handle is currently open
    pub fn sink_is_open(&self) -> bool {
        self.sink.is_open()
    }

    /// Render metrics for this template
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Whether the changed handle is in this template's trigger set
    pub fn is_triggered_by(&self, changed: VarHandle) -> bool {
        self.triggers
            .iter()
            .any(|trigger| trigger.handle() == Some(changed))
    }

    /// Render this template once through its sink
    pub(crate) async fn render(
        &mut self,
        renderer: &SharedRenderer,
    ) -> Result<(), contracts::ContractError> {
        info!(
            template = %self.template_path.display(),
            target = self.sink.name(),
            "Rendering template"
        );
        match self.sink.render(renderer).await {
            Ok(()) => {
                self.metrics.inc_render_count();
                Ok(())
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                Err(e)
            }
        }
    }

    pub(crate) async fn close_sink(&mut self) {
        self.sink.close().await;
    }
}

/// Registry of templates, declaration order
///
/// Dispatch iterates in declaration order; nothing may depend on it, the
/// order is not part of the contract.
#[derive(Default)]
pub struct Registry {
    templates: Vec<Template>,
}

impl Registry {
    /// Build the registry from screened specs
    ///
    /// Each template's triggers are bound as it is added. Binder failures
    /// are logged and the template is registered regardless: a template with
    /// a mix of resolved and unresolved triggers stays live for the
    /// resolved ones.
    pub fn from_plan<P: StateProvider>(
        specs: &[TemplateSpec],
        provider: &mut P,
        scratch: &SharedScratch,
    ) -> Self {
        let mut templates = Vec::with_capacity(specs.len());

        for spec in specs {
            let mut triggers: Vec<TriggerVar> =
                spec.trigger.iter().map(TriggerVar::new).collect();

            if let Err(e) = binder::bind_all(provider, &mut triggers) {
                warn!(
                    template = %spec.template.display(),
                    error = %e,
                    "Template registered with unbound triggers"
                );
            }

            templates.push(Template {
                triggers,
                template_path: spec.template.clone(),
                sink: Sink::from_spec(spec, scratch),
                metrics: SinkMetrics::new(),
            });
        }

        info!(templates = templates.len(), "Registry built");
        Registry { templates }
    }

    /// Number of registered templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered templates
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub(crate) fn templates_mut(&mut self) -> impl Iterator<Item = &mut Template> {
        self.templates.iter_mut()
    }

    /// Metrics snapshot per template target
    pub fn metrics(&self) -> Vec<(String, MetricsSnapshot)> {
        self.templates
            .iter()
            .map(|t| (t.sink_name().to_string(), t.metrics()))
            .collect()
    }

    /// Best-effort close of every sink
    pub async fn close_all(&mut self) {
        for template in &mut self.templates {
            template.close_sink().await;
        }
    }
}

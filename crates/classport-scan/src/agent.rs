//! Hook-facing entry point.
//!
//! The host runtime owns the event loop and decides when a method's class
//! gets scanned. [`Agent`] holds what outlives a single event: the startup
//! configuration, the scan options and the diagnostic sink. Every event is
//! turned into one scan call with fresh extraction state.

use bstr::{BStr, BString, ByteSlice};

use crate::{
    config::AgentConfig,
    error::{ConfigError, LookupError},
    guard::{EventGate, HookSuspension},
    options::ScanOptions,
    record::AnnotationRecord,
    scanner::{ScanRequest, scan},
    sink::DiagnosticSink,
};

/// Asks the live runtime for an annotation's members instead of reading raw
/// pool bytes.
///
/// Implementations call back into instrumented code, so the agent only
/// invokes them with the method-entry hook suspended.
pub trait ReflectiveLookup {
    /// Members of the annotation `descriptor` on `class_signature`, in
    /// declaration order, or `None` when the class is not annotated.
    ///
    /// # Errors
    ///
    /// A type or member the runtime cannot resolve.
    fn annotation_pairs(
        &mut self,
        class_signature: &BStr,
        descriptor: &BStr,
    ) -> Result<Option<Vec<(BString, BString)>>, LookupError>;
}

/// Per-process agent state, created once at startup.
#[derive(Debug)]
pub struct Agent<S> {
    config: AgentConfig,
    options: ScanOptions,
    sink: S,
}

impl<S: DiagnosticSink> Agent<S> {
    /// Starts the agent from the host's option string.
    ///
    /// # Errors
    ///
    /// Fails closed when no annotation jar path is given.
    pub fn initialize(agent_options: Option<&str>, sink: S) -> Result<Self, ConfigError> {
        let config = AgentConfig::from_agent_options(agent_options)?;
        tracing::info!(jar = %config.annotation_jar.display(), "classport agent loaded");
        Ok(Self {
            config,
            options: ScanOptions::default(),
            sink,
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Handles one method-entry event by scanning the declaring class's
    /// constant pool.
    ///
    /// `request` is `Err` when the host could not resolve the class, method
    /// or pool; that is reported to the sink and yields nothing. A scan that
    /// runs past its bound also yields nothing.
    pub fn on_method_entry(
        &mut self,
        request: Result<ScanRequest<'_>, LookupError>,
    ) -> Option<AnnotationRecord> {
        let request = match request {
            Ok(request) => request,
            Err(error) => {
                self.sink.lookup_failed(&error);
                return None;
            }
        };
        match scan(&request, &self.options, &mut self.sink) {
            Ok(record) => record,
            Err(failure) => {
                tracing::debug!(
                    error = %failure.error,
                    decoded = failure.decoded.pairs.len(),
                    "discarding partial annotation record"
                );
                None
            }
        }
    }

    /// Handles one method-entry event through the reflective path.
    ///
    /// The hook stays suspended for the lookup only. Reserved members are
    /// dropped, as on the raw-pool path.
    pub fn on_method_entry_reflective<G, L>(
        &mut self,
        gate: &mut G,
        lookup: &mut L,
        class_signature: &BStr,
        method_name: &BStr,
    ) -> Option<AnnotationRecord>
    where
        G: EventGate + ?Sized,
        L: ReflectiveLookup + ?Sized,
    {
        let descriptor = self.options.annotation_descriptor.as_bstr();
        let found = {
            let _suspended = HookSuspension::acquire(gate);
            lookup.annotation_pairs(class_signature, descriptor)
        };

        let pairs = match found {
            Ok(Some(pairs)) => pairs,
            Ok(None) => return None,
            Err(error) => {
                self.sink.lookup_failed(&error);
                return None;
            }
        };

        self.sink
            .annotation_found(class_signature, method_name, descriptor);
        let mut record = AnnotationRecord::new(class_signature, method_name);
        for (key, value) in pairs {
            if self.options.is_reserved(key.as_bstr()) {
                continue;
            }
            self.sink
                .pair(class_signature, method_name, key.as_bstr(), value.as_bstr());
            record.push_pair(key, value);
        }
        Some(record)
    }
}

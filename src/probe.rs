//! Entry/exit probes around the public operations.
//!
//! Inert diagnostic scaffolding: each public entry point opens a span that
//! emits a trace-level record on entry and another when the span drops.
//! No behavior depends on these; with no logger installed they cost a
//! branch on a relaxed atomic inside the `log` facade.

use log::trace;

/// RAII span for one public operation. Obtain via [`enter`] and keep it
/// alive for the duration of the call.
pub(crate) struct Span {
    op: &'static str,
}

/// Open a span for operation `op`.
#[inline]
pub(crate) fn enter(op: &'static str) -> Span {
    trace!(target: "flatdict", "enter {op}");
    Span { op }
}

impl Drop for Span {
    fn drop(&mut self) {
        trace!(target: "flatdict", "exit {}", self.op);
    }
}

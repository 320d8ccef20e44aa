use aconv_core::diagnostics::Diagnostics;

/// Forwards core diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn emit(&self, line: &str) {
        log::info!(target: "aconv", "{line}");
    }
}

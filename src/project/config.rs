//! Engine configuration.

use smol_str::SmolStr;

/// Knobs for the document builder.
///
/// ```
/// use bbj::project::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_implicit_java_packages(["java.lang", "java.util"])
///     .with_parallel_scopes(false);
/// assert_eq!(config.implicit_java_packages.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Packages searched for simple type names nothing else declares.
    pub implicit_java_packages: Vec<SmolStr>,
    /// Report dotted Java names the class catalog does not know.
    pub report_unresolved_interop: bool,
    /// Compute scopes of a batch of documents on the rayon pool.
    pub parallel_scopes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            implicit_java_packages: vec![SmolStr::new_static("java.lang")],
            report_unresolved_interop: true,
            parallel_scopes: true,
        }
    }
}

impl EngineConfig {
    pub fn with_implicit_java_packages<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.implicit_java_packages = packages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unresolved_interop(mut self, report: bool) -> Self {
        self.report_unresolved_interop = report;
        self
    }

    pub fn with_parallel_scopes(mut self, parallel: bool) -> Self {
        self.parallel_scopes = parallel;
        self
    }
}

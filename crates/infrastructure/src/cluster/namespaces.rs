use kubezone_application::ports::NamespaceFilter;
use kubezone_domain::ExternalConfig;
use rustc_hash::FxHashSet;

/// Namespaces listed in configuration. An empty list exposes all of them.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredNamespaces {
    namespaces: FxHashSet<String>,
}

impl ConfiguredNamespaces {
    pub fn new<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespaces: namespaces.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &ExternalConfig) -> Self {
        Self::new(config.exposed_namespaces())
    }
}

impl NamespaceFilter for ConfiguredNamespaces {
    fn is_exposed(&self, namespace: &str) -> bool {
        self.namespaces.is_empty() || self.namespaces.contains(namespace)
    }
}

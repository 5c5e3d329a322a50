pub trait NamespaceFilter: Send + Sync {
    fn is_exposed(&self, namespace: &str) -> bool;
}

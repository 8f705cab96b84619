//! Registry sharing one compiler per settings instance

use std::sync::{Arc, LazyLock, Weak};

use parking_lot::Mutex;

use super::{Compiler, CompilerSettings, OxcCompiler};

type CompilerFactory = dyn Fn(&CompilerSettings) -> Arc<dyn Compiler> + Send + Sync;

static GLOBAL_REGISTRY: LazyLock<CompilerRegistry> = LazyLock::new(CompilerRegistry::new);

struct RegistryEntry {
    settings: Weak<CompilerSettings>,
    compiler: Arc<dyn Compiler>,
}

/// Registry of compilers keyed by the identity of their settings
///
/// Lookups compare `Arc` pointers, not values, so every distinct settings
/// allocation gets its own compiler. Entries whose settings have been dropped
/// are pruned on the next lookup. Compilers are created lazily and live as
/// long as the registry.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use transpile_codeblocks::{CompilerRegistry, CompilerSettings};
///
/// let registry = CompilerRegistry::new();
/// let settings = Arc::new(CompilerSettings::default());
///
/// let first = registry.get_or_create(&settings);
/// let second = registry.get_or_create(&settings);
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct CompilerRegistry {
    entries: Mutex<Vec<RegistryEntry>>,
    factory: Box<CompilerFactory>,
}

impl CompilerRegistry {
    /// Registry creating [`OxcCompiler`]s
    pub fn new() -> Self {
        Self::with_factory(|settings| Arc::new(OxcCompiler::new(settings.clone())))
    }

    /// Registry creating compilers with a custom factory
    pub fn with_factory(
        factory: impl Fn(&CompilerSettings) -> Arc<dyn Compiler> + Send + Sync + 'static,
    ) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            factory: Box::new(factory),
        }
    }

    /// The process-wide registry
    pub fn global() -> &'static CompilerRegistry {
        &GLOBAL_REGISTRY
    }

    /// Get the compiler for `settings`, creating it on first use
    pub fn get_or_create(&self, settings: &Arc<CompilerSettings>) -> Arc<dyn Compiler> {
        let mut entries = self.entries.lock();
        entries.retain(|entry| entry.settings.strong_count() > 0);

        let key = Arc::as_ptr(settings);
        if let Some(entry) = entries.iter().find(|entry| entry.settings.as_ptr() == key) {
            return Arc::clone(&entry.compiler);
        }

        let compiler = (self.factory)(settings);
        tracing::debug!(
            compiler = compiler.name(),
            registered = entries.len() + 1,
            "Created compiler for new settings instance"
        );
        entries.push(RegistryEntry {
            settings: Arc::downgrade(settings),
            compiler: Arc::clone(&compiler),
        });

        compiler
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .iter()
            .filter(|entry| entry.settings.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CompilerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompiledFiles, CompilerError};
    use crate::virtual_files::VirtualFileSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullCompiler;

    #[async_trait::async_trait]
    impl Compiler for NullCompiler {
        async fn compile(&self, _files: &VirtualFileSet) -> Result<CompiledFiles, CompilerError> {
            Ok(CompiledFiles::new())
        }
    }

    fn counting_registry() -> (CompilerRegistry, Arc<AtomicUsize>) {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let registry = CompilerRegistry::with_factory(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(NullCompiler)
        });
        (registry, created)
    }

    #[test]
    fn test_same_instance_shares_compiler() {
        let (registry, created) = counting_registry();
        let settings = Arc::new(CompilerSettings::default());

        let first = registry.get_or_create(&settings);
        let second = registry.get_or_create(&Arc::clone(&settings));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_equal_values_are_distinct_keys() {
        let (registry, created) = counting_registry();
        let a = Arc::new(CompilerSettings::default());
        let b = Arc::new(CompilerSettings::default());
        assert_eq!(*a, *b);

        let first = registry.get_or_create(&a);
        let second = registry.get_or_create(&b);

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(created.load(Ordering::SeqCst), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_dropped_settings_are_pruned() {
        let (registry, _) = counting_registry();
        let settings = Arc::new(CompilerSettings::default());
        registry.get_or_create(&settings);
        assert_eq!(registry.len(), 1);

        drop(settings);
        assert!(registry.is_empty());
    }
}

//! Best-effort loading of the behavior modules behind action records.

use std::sync::Arc;

use crate::action::ActionRecord;
use crate::error::ActionResult;
use crate::registry::RegistryClient;

/// Opaque caller-supplied context handed to a module's init entry point.
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    /// Identifier of the container the module should attach to, if any.
    pub target: Option<String>,
    /// Free-form arguments forwarded to the module.
    pub args: serde_json::Value,
}

/// A loaded behavior module.
///
/// `init` defaults to a no-op: a module without an init entry point is valid
/// and simply does nothing when launched.
#[async_trait::async_trait]
pub trait AppModule: Send + Sync {
    async fn init(&self, _ctx: &LaunchContext) -> ActionResult<()> {
        Ok(())
    }
}

/// Resolves a script reference to a loaded module.
#[async_trait::async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, href: &str) -> ActionResult<Arc<dyn AppModule>>;
}

/// Loads and initializes the modules referenced by resolved action records.
///
/// Launching is best-effort per record: records without a script are skipped,
/// and a module that fails to load or init is logged and skipped without
/// aborting the batch. Only the registry lookup itself surfaces an error.
pub struct AppLauncher {
    registry: Arc<RegistryClient>,
    loader: Arc<dyn ModuleLoader>,
}

impl AppLauncher {
    pub fn new(registry: Arc<RegistryClient>, loader: Arc<dyn ModuleLoader>) -> Self {
        Self { registry, loader }
    }

    /// Resolve `pattern` and initialize every module it yields. Returns the
    /// number of modules that initialized successfully.
    pub async fn init_apps(&self, pattern: &str, ctx: &LaunchContext) -> ActionResult<usize> {
        let records = self.registry.get_many(pattern).await?;
        let mut initialized = 0;
        for record in records {
            if self.init_record(&record, ctx).await {
                initialized += 1;
            }
        }
        Ok(initialized)
    }

    /// Resolve a single path and initialize its module, if it carries one.
    /// Returns whether a module was initialized.
    pub async fn init_app(&self, path: &str, ctx: &LaunchContext) -> ActionResult<bool> {
        let record = self.registry.get_one(path).await?;
        Ok(self.init_record(&record, ctx).await)
    }

    async fn init_record(&self, record: &ActionRecord, ctx: &LaunchContext) -> bool {
        let Some(script) = &record.script else {
            return false;
        };
        let module = match self.loader.load(&script.href).await {
            Ok(module) => module,
            Err(error) => {
                tracing::warn!(
                    "failed to load module {} for {}: {error}",
                    script.href,
                    record.path
                );
                return false;
            }
        };
        if let Err(error) = module.init(ctx).await {
            tracing::warn!(
                "module {} init failed for {}: {error}",
                script.href,
                record.path
            );
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistryConfig;
    use crate::error::ActionError;
    use crate::registry::memory::InMemoryRegistry;
    use std::sync::Mutex;

    struct RecordingModule {
        inits: Arc<Mutex<Vec<Option<String>>>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl AppModule for RecordingModule {
        async fn init(&self, ctx: &LaunchContext) -> ActionResult<()> {
            if self.fail {
                return Err(ActionError::Internal("init exploded".to_string()));
            }
            self.inits
                .lock()
                .expect("inits lock")
                .push(ctx.target.clone());
            Ok(())
        }
    }

    /// Loader that records every href it is asked for.
    struct TestLoader {
        loaded: Arc<Mutex<Vec<String>>>,
        inits: Arc<Mutex<Vec<Option<String>>>>,
        fail_load_href: Option<String>,
        fail_init_href: Option<String>,
    }

    #[async_trait::async_trait]
    impl ModuleLoader for TestLoader {
        async fn load(&self, href: &str) -> ActionResult<Arc<dyn AppModule>> {
            if self.fail_load_href.as_deref() == Some(href) {
                return Err(ActionError::ModuleLoad(format!("no such module: {href}")));
            }
            self.loaded
                .lock()
                .expect("loaded lock")
                .push(href.to_string());
            Ok(Arc::new(RecordingModule {
                inits: self.inits.clone(),
                fail: self.fail_init_href.as_deref() == Some(href),
            }))
        }
    }

    struct Harness {
        launcher: AppLauncher,
        loaded: Arc<Mutex<Vec<String>>>,
        inits: Arc<Mutex<Vec<Option<String>>>>,
    }

    fn harness(
        records: Vec<ActionRecord>,
        fail_load: Option<&str>,
        fail_init: Option<&str>,
    ) -> Harness {
        let registry = InMemoryRegistry::new();
        for record in records {
            registry.add(record).expect("seed");
        }
        let client = Arc::new(RegistryClient::new(
            Arc::new(registry),
            &RegistryConfig::default(),
        ));
        let loaded = Arc::new(Mutex::new(Vec::new()));
        let inits = Arc::new(Mutex::new(Vec::new()));
        let loader = TestLoader {
            loaded: loaded.clone(),
            inits: inits.clone(),
            fail_load_href: fail_load.map(str::to_string),
            fail_init_href: fail_init.map(str::to_string),
        };
        Harness {
            launcher: AppLauncher::new(client, Arc::new(loader)),
            loaded,
            inits,
        }
    }

    #[tokio::test]
    async fn init_apps_loads_and_inits_scripted_records() {
        let harness = harness(
            vec![
                ActionRecord::new("modules.dashboard.clock").with_script("lib/clock.js"),
                ActionRecord::new("modules.dashboard.feed").with_script("lib/feed.js"),
            ],
            None,
            None,
        );
        let ctx = LaunchContext {
            target: Some("dashboard".to_string()),
            args: serde_json::Value::Null,
        };
        let count = harness
            .launcher
            .init_apps("modules.dashboard.*", &ctx)
            .await
            .expect("init apps");
        assert_eq!(count, 2);
        assert_eq!(
            harness.loaded.lock().expect("loaded").as_slice(),
            &["lib/clock.js".to_string(), "lib/feed.js".to_string()]
        );
        assert_eq!(
            harness.inits.lock().expect("inits").as_slice(),
            &[Some("dashboard".to_string()), Some("dashboard".to_string())]
        );
    }

    #[tokio::test]
    async fn records_without_scripts_are_skipped_silently() {
        let harness = harness(
            vec![
                ActionRecord::new("menu.news"),
                ActionRecord::new("menu.sport").with_script("lib/sport.js"),
            ],
            None,
            None,
        );
        let count = harness
            .launcher
            .init_apps("menu.*", &LaunchContext::default())
            .await
            .expect("init apps");
        assert_eq!(count, 1);
        assert_eq!(
            harness.loaded.lock().expect("loaded").as_slice(),
            &["lib/sport.js".to_string()]
        );
    }

    #[tokio::test]
    async fn load_failure_does_not_abort_the_batch() {
        let harness = harness(
            vec![
                ActionRecord::new("menu.news").with_script("lib/broken.js"),
                ActionRecord::new("menu.sport").with_script("lib/sport.js"),
            ],
            Some("lib/broken.js"),
            None,
        );
        let count = harness
            .launcher
            .init_apps("menu.*", &LaunchContext::default())
            .await
            .expect("init apps");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn init_failure_does_not_abort_the_batch() {
        let harness = harness(
            vec![
                ActionRecord::new("menu.news").with_script("lib/grumpy.js"),
                ActionRecord::new("menu.sport").with_script("lib/sport.js"),
            ],
            None,
            Some("lib/grumpy.js"),
        );
        let count = harness
            .launcher
            .init_apps("menu.*", &LaunchContext::default())
            .await
            .expect("init apps");
        assert_eq!(count, 1);
        assert!(harness.inits.lock().expect("inits").len() == 1);
    }

    #[tokio::test]
    async fn init_app_resolves_one_path() {
        let harness = harness(
            vec![ActionRecord::new("menu.news").with_script("lib/news.js")],
            None,
            None,
        );
        let launched = harness
            .launcher
            .init_app("menu.news", &LaunchContext::default())
            .await
            .expect("init app");
        assert!(launched);
        assert_eq!(harness.inits.lock().expect("inits").len(), 1);
    }

    #[tokio::test]
    async fn init_app_unknown_path_is_not_found() {
        let harness = harness(vec![ActionRecord::new("menu.news")], None, None);
        let result = harness
            .launcher
            .init_app("menu.missing", &LaunchContext::default())
            .await;
        assert!(matches!(result, Err(ActionError::NotFound(_))));
    }

    #[tokio::test]
    async fn default_init_is_a_noop() {
        struct BareModule;

        #[async_trait::async_trait]
        impl AppModule for BareModule {}

        let module = BareModule;
        module
            .init(&LaunchContext::default())
            .await
            .expect("default init");
    }
}

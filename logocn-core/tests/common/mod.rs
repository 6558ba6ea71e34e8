//! Test helpers shared by the logocn-core integration tests

use async_trait::async_trait;
use logocn_core::catalog::{CacheStore, CatalogDocument, CatalogSource};
use logocn_core::{CatalogError, Result};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

/// Initialize logging for tests (only once per test run)
pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Handles for observing and steering a `FakeSource` after it is boxed
#[derive(Clone)]
pub struct SourceControl {
    pub calls: Arc<AtomicUsize>,
    pub failing: Arc<AtomicBool>,
    document: Arc<Mutex<CatalogDocument>>,
}

impl SourceControl {
    fn new(document: CatalogDocument) -> Self {
        Self {
            calls: Arc::default(),
            failing: Arc::default(),
            document: Arc::new(Mutex::new(document)),
        }
    }

    /// Serve `document` from the next fetch on
    pub fn set_document(&self, document: CatalogDocument) {
        *self.document.lock().unwrap() = document;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

/// In-memory catalog source
pub struct FakeSource {
    control: SourceControl,
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_catalog(&self) -> Result<CatalogDocument> {
        self.control.calls.fetch_add(1, Ordering::SeqCst);
        if self.control.failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Fetch {
                url: "fake://catalog".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.control.document.lock().unwrap().clone())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Catalog JSON shaped like the Simple Icons data file
pub fn sample_catalog_json() -> &'static str {
    r#"{
  "icons": [
    { "title": "React", "hex": "61DAFB", "source": "https://github.com/facebook/react-native/blob/main/Libraries/NewAppScreen/components/logo.png" },
    { "title": "Redux", "hex": "764ABC", "source": "https://github.com/reduxjs/redux/tree/master/logo", "slug": "redux" },
    { "title": "Redis", "hex": "DC382D", "source": "https://www.redis.com/brand/" },
    {
      "title": "Visual Studio Code",
      "hex": "007ACC",
      "source": "https://code.visualstudio.com/brand",
      "aliases": { "aka": ["VS Code", "vscode"] }
    },
    { "title": "C++", "hex": "00599C", "source": "https://github.com/isocpp/logos" }
  ]
}"#
}

pub fn sample_document() -> CatalogDocument {
    CatalogDocument::from_json(sample_catalog_json(), "fixture").expect("fixture parses")
}

/// Build a cache store at `path` backed by a fake source
pub fn fake_store(path: &Path, document: CatalogDocument) -> (CacheStore, SourceControl) {
    let control = SourceControl::new(document);
    let source = FakeSource {
        control: control.clone(),
    };
    (CacheStore::new(path, Box::new(source)), control)
}

use std::collections::BTreeMap;

use chrono::Utc;
use exemplar_core::Value;

use crate::generators::Block;

type BlockFactory = Box<dyn Fn() -> Block + Send + Sync>;

/// Named block factories available to exemplar files.
///
/// Each registration instantiates a fresh block, so stateful blocks never
/// share state across attributes.
pub struct BlockCatalog {
    factories: BTreeMap<String, BlockFactory>,
}

impl BlockCatalog {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Catalog with the built-in `succ`, `sequence`, `uuid` and `now` blocks.
    pub fn new() -> Self {
        let mut catalog = Self::empty();
        catalog.register("succ", || {
            Block::chained(|previous| previous.map(|value| value.succ()).unwrap_or(Value::Int(1)))
        });
        catalog.register("sequence", || {
            let mut counter = 0_i64;
            Block::new(move || {
                counter += 1;
                Value::Int(counter)
            })
        });
        catalog.register("uuid", || {
            Block::new(|| Value::Text(uuid::Uuid::new_v4().to_string()))
        });
        catalog.register("now", || {
            Block::new(|| Value::Timestamp(Utc::now().naive_utc()))
        });
        catalog
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Block + Send + Sync + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn instantiate(&self, name: &str) -> Option<Block> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

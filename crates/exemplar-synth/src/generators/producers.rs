use std::collections::BTreeMap;

use exemplar_core::Value;
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName, Name};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::generators::ValueProducer;

/// Producer that cycles through a fixed list of values.
#[derive(Debug, Clone)]
pub struct CycleProducer {
    values: Vec<Value>,
    cursor: usize,
}

impl CycleProducer {
    pub fn new<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }
}

impl ValueProducer for CycleProducer {
    fn next_value(&mut self) -> Value {
        let Some(value) = self.values.get(self.cursor % self.values.len().max(1)) else {
            return Value::Null;
        };
        self.cursor = self.cursor.wrapping_add(1);
        value.clone()
    }
}

/// Producer formatting an increasing counter into a template.
///
/// Every `{n}` in the template is replaced by the counter, which starts at 1.
#[derive(Debug, Clone)]
pub struct SequenceProducer {
    template: String,
    counter: u64,
}

impl SequenceProducer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            counter: 0,
        }
    }
}

impl ValueProducer for SequenceProducer {
    fn next_value(&mut self) -> Value {
        self.counter += 1;
        Value::Text(self.template.replace("{n}", &self.counter.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakerKind {
    Name,
    FirstName,
    LastName,
    Email,
    Username,
    Company,
    City,
    Sentence,
}

impl FakerKind {
    const ALL: [FakerKind; 8] = [
        FakerKind::Name,
        FakerKind::FirstName,
        FakerKind::LastName,
        FakerKind::Email,
        FakerKind::Username,
        FakerKind::Company,
        FakerKind::City,
        FakerKind::Sentence,
    ];

    pub fn id(self) -> &'static str {
        match self {
            FakerKind::Name => "faker.name",
            FakerKind::FirstName => "faker.first_name",
            FakerKind::LastName => "faker.last_name",
            FakerKind::Email => "faker.email",
            FakerKind::Username => "faker.username",
            FakerKind::Company => "faker.company",
            FakerKind::City => "faker.city",
            FakerKind::Sentence => "faker.sentence",
        }
    }
}

/// Deterministic fake-data producer.
pub struct FakerProducer {
    kind: FakerKind,
    rng: ChaCha8Rng,
}

impl FakerProducer {
    pub fn new(kind: FakerKind, seed: u64) -> Self {
        Self {
            kind,
            rng: ChaCha8Rng::seed_from_u64(hash_seed(seed, kind.id())),
        }
    }
}

impl ValueProducer for FakerProducer {
    fn next_value(&mut self) -> Value {
        let rng = &mut self.rng;
        let text: String = match self.kind {
            FakerKind::Name => Name().fake_with_rng(rng),
            FakerKind::FirstName => FirstName().fake_with_rng(rng),
            FakerKind::LastName => LastName().fake_with_rng(rng),
            FakerKind::Email => SafeEmail().fake_with_rng(rng),
            FakerKind::Username => Username().fake_with_rng(rng),
            FakerKind::Company => CompanyName().fake_with_rng(rng),
            FakerKind::City => CityName().fake_with_rng(rng),
            FakerKind::Sentence => Sentence(3..8).fake_with_rng(rng),
        };
        Value::Text(text)
    }
}

type ProducerFactory = Box<dyn Fn(u64) -> Box<dyn ValueProducer> + Send + Sync>;

/// Named producer factories, resolved when a generator names its class.
pub struct ProducerCatalog {
    seed: u64,
    factories: BTreeMap<String, ProducerFactory>,
}

impl ProducerCatalog {
    pub fn empty(seed: u64) -> Self {
        Self {
            seed,
            factories: BTreeMap::new(),
        }
    }

    /// Catalog with the built-in `faker.*` producers.
    pub fn new(seed: u64) -> Self {
        let mut catalog = Self::empty(seed);
        for kind in FakerKind::ALL {
            catalog.register(kind.id(), move |seed| {
                Box::new(FakerProducer::new(kind, seed)) as Box<dyn ValueProducer>
            });
        }
        catalog
    }

    /// Register a factory; it receives the catalog seed.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(u64) -> Box<dyn ValueProducer> + Send + Sync + 'static,
    ) {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn instantiate(&self, name: &str) -> Option<Box<dyn ValueProducer>> {
        self.factories.get(name).map(|factory| factory(self.seed))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

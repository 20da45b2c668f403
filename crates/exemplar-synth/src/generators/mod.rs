use std::fmt;

use exemplar_core::{AttributeName, ClassMethodFn, TypeInfo, TypeKey, Value};

use crate::errors::{Result, SynthesisError};

pub mod blocks;
pub mod producers;

pub use blocks::BlockCatalog;
pub use producers::{CycleProducer, FakerKind, FakerProducer, ProducerCatalog, SequenceProducer};

/// Object exposing a zero-argument value-producing operation.
///
/// The producer owns whatever state it needs to vary its output; the
/// registry calls it once per synthesized attribute.
pub trait ValueProducer: Send {
    fn next_value(&mut self) -> Value;
}

impl<F> ValueProducer for F
where
    F: FnMut() -> Value + Send,
{
    fn next_value(&mut self) -> Value {
        self()
    }
}

type NullaryFn = Box<dyn FnMut() -> Value + Send>;
type ChainedFn = Box<dyn FnMut(Option<&Value>) -> Value + Send>;
type DynamicFn = Box<dyn FnMut(&[Option<Value>]) -> Value + Send>;

/// Callable generator body.
pub enum Block {
    /// Ignores the previous value.
    Nullary(NullaryFn),
    /// Receives the previous value, `None` on the first call.
    Chained(ChainedFn),
    /// Callable whose arity is only known at runtime.
    Dynamic { arity: usize, body: DynamicFn },
}

impl Block {
    pub fn new(body: impl FnMut() -> Value + Send + 'static) -> Self {
        Block::Nullary(Box::new(body))
    }

    pub fn chained(body: impl FnMut(Option<&Value>) -> Value + Send + 'static) -> Self {
        Block::Chained(Box::new(body))
    }

    pub fn dynamic(
        arity: usize,
        body: impl FnMut(&[Option<Value>]) -> Value + Send + 'static,
    ) -> Self {
        Block::Dynamic {
            arity,
            body: Box::new(body),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Block::Nullary(_) => 0,
            Block::Chained(_) => 1,
            Block::Dynamic { arity, .. } => *arity,
        }
    }

    fn call(&mut self, previous: Option<&Value>) -> Value {
        match self {
            Block::Nullary(body) => body(),
            Block::Chained(body) => body(previous),
            Block::Dynamic { arity: 0, body } => body(&[]),
            Block::Dynamic { body, .. } => body(&[previous.cloned()]),
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block(arity = {})", self.arity())
    }
}

enum BlockRef {
    Inline(Block),
    Named(String),
}

enum ProducerRef {
    Instance(Box<dyn ValueProducer>),
    Named(String),
}

/// Registration options: exactly one of block, class, method or value,
/// plus an optional start value for blocks.
#[derive(Default)]
pub struct GeneratorOptions {
    block: Option<BlockRef>,
    class: Option<ProducerRef>,
    method: Option<String>,
    value: Option<Value>,
    start: Option<Value>,
}

impl GeneratorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(block: Block) -> Self {
        Self::new().with_block(block)
    }

    pub fn class(producer: impl ValueProducer + 'static) -> Self {
        Self::new().with_class(producer)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new().with_method(name)
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Self::new().with_value(value)
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.block = Some(BlockRef::Inline(block));
        self
    }

    /// Block resolved by name from the registry's block catalog.
    pub fn with_named_block(mut self, name: impl Into<String>) -> Self {
        self.block = Some(BlockRef::Named(name.into()));
        self
    }

    pub fn with_class(mut self, producer: impl ValueProducer + 'static) -> Self {
        self.class = Some(ProducerRef::Instance(Box::new(producer)));
        self
    }

    /// Producer resolved by name from the registry's producer catalog.
    pub fn with_named_class(mut self, name: impl Into<String>) -> Self {
        self.class = Some(ProducerRef::Named(name.into()));
        self
    }

    pub fn with_method(mut self, name: impl Into<String>) -> Self {
        self.method = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_start(mut self, start: impl Into<Value>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub(crate) fn resolve(
        self,
        attribute: &AttributeName,
        owner: &TypeInfo,
        blocks: &BlockCatalog,
        producers: &ProducerCatalog,
    ) -> Result<GeneratorSpec> {
        let given = [
            self.block.is_some(),
            self.class.is_some(),
            self.method.is_some(),
            self.value.is_some(),
        ]
        .into_iter()
        .filter(|given| *given)
        .count();
        if given != 1 {
            return Err(SynthesisError::InvalidGeneratorSpecification {
                attribute: attribute.to_string(),
                reason: format!(
                    "exactly one of block, class, method or value is required, {given} given"
                ),
            });
        }
        if self.start.is_some() && self.block.is_none() {
            return Err(SynthesisError::InvalidGeneratorSpecification {
                attribute: attribute.to_string(),
                reason: "start is only allowed together with a block".to_string(),
            });
        }

        if let Some(block) = self.block {
            let block = match block {
                BlockRef::Inline(block) => block,
                BlockRef::Named(name) => blocks.instantiate(&name).ok_or_else(|| {
                    SynthesisError::InvalidGeneratorSpecification {
                        attribute: attribute.to_string(),
                        reason: format!("unknown block '{name}'"),
                    }
                })?,
            };
            if block.arity() > 1 {
                return Err(SynthesisError::BlockArity {
                    attribute: attribute.to_string(),
                    arity: block.arity(),
                });
            }
            return Ok(GeneratorSpec::Block {
                block,
                start: self.start,
            });
        }

        if let Some(class) = self.class {
            let producer = match class {
                ProducerRef::Instance(producer) => producer,
                ProducerRef::Named(name) => producers.instantiate(&name).ok_or_else(|| {
                    SynthesisError::UnresolvableGeneratorClass {
                        attribute: attribute.to_string(),
                        class: name.clone(),
                    }
                })?,
            };
            return Ok(GeneratorSpec::ClassRef(producer));
        }

        if let Some(name) = self.method {
            let call = owner
                .method(&name)
                .ok_or_else(|| SynthesisError::UnresolvableGeneratorMethod {
                    attribute: attribute.to_string(),
                    method: name.clone(),
                    type_name: owner.simple_name().to_string(),
                })?;
            return Ok(GeneratorSpec::MethodRef { name, call });
        }

        Ok(GeneratorSpec::Literal(self.value.unwrap_or(Value::Null)))
    }
}

/// Resolved generator rule.
pub enum GeneratorSpec {
    Block { block: Block, start: Option<Value> },
    ClassRef(Box<dyn ValueProducer>),
    MethodRef { name: String, call: ClassMethodFn },
    Literal(Value),
}

impl GeneratorSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorSpec::Block { .. } => "block",
            GeneratorSpec::ClassRef(_) => "class",
            GeneratorSpec::MethodRef { .. } => "method",
            GeneratorSpec::Literal(_) => "value",
        }
    }
}

impl fmt::Debug for GeneratorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorSpec::Block { block, start } => f
                .debug_struct("Block")
                .field("block", block)
                .field("start", start)
                .finish(),
            GeneratorSpec::ClassRef(_) => f.write_str("ClassRef"),
            GeneratorSpec::MethodRef { name, .. } => {
                f.debug_struct("MethodRef").field("name", name).finish()
            }
            GeneratorSpec::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
        }
    }
}

/// One attribute binding in a type's own table.
#[derive(Debug)]
pub struct GeneratorEntry {
    attribute: AttributeName,
    spec: GeneratorSpec,
    owner: TypeKey,
    last_value: Option<Value>,
    start_pending: bool,
}

impl GeneratorEntry {
    pub(crate) fn new(attribute: AttributeName, spec: GeneratorSpec, owner: TypeKey) -> Self {
        let (last_value, start_pending) = match &spec {
            GeneratorSpec::Block {
                start: Some(start),
                ..
            } => (Some(start.clone()), true),
            _ => (None, false),
        };
        Self {
            attribute,
            spec,
            owner,
            last_value,
            start_pending,
        }
    }

    pub fn attribute(&self) -> &AttributeName {
        &self.attribute
    }

    pub fn spec(&self) -> &GeneratorSpec {
        &self.spec
    }

    pub fn owner(&self) -> TypeKey {
        self.owner
    }

    pub fn last_value(&self) -> Option<&Value> {
        self.last_value.as_ref()
    }

    /// Produce the next value for this attribute on behalf of `target`.
    ///
    /// Blocks chain through `last_value`; a configured start value is
    /// returned verbatim on the first call without running the block.
    /// Producers, class methods and literals are evaluated on every call.
    /// Class methods resolve on `target`, so a subtype's own declaration
    /// wins over the method found when the entry was registered.
    pub fn generate(&mut self, target: &TypeInfo) -> Value {
        match &mut self.spec {
            GeneratorSpec::Block { block, .. } => {
                if self.start_pending {
                    self.start_pending = false;
                    return self.last_value.clone().unwrap_or(Value::Null);
                }
                let next = block.call(self.last_value.as_ref());
                self.last_value = Some(next.clone());
                next
            }
            GeneratorSpec::ClassRef(producer) => producer.next_value(),
            GeneratorSpec::MethodRef { name, call } => {
                let call = target.method(name).unwrap_or(*call);
                call()
            }
            GeneratorSpec::Literal(value) => value.clone(),
        }
    }
}

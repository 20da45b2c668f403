//! Process-wide synthesizer.
//!
//! Tests that share fixtures across modules can register generators once
//! and synthesize through these functions. Concurrent calls are serialized
//! by a mutex, which keeps generator state consistent but not the order in
//! which callers observe it.

use std::sync::{Mutex, MutexGuard, OnceLock};

use exemplar_core::{AttributeName, Attributes, Model, Persist};

use crate::errors::Result;
use crate::generators::GeneratorOptions;
use crate::synthesizer::ObjectSynthesizer;

static GLOBAL: OnceLock<Mutex<ObjectSynthesizer>> = OnceLock::new();

/// Install `synthesizer` as the process-wide instance.
///
/// Returns it back when an instance was already installed.
pub fn init_global(synthesizer: ObjectSynthesizer) -> std::result::Result<(), ObjectSynthesizer> {
    let mut pending = Some(synthesizer);
    GLOBAL.get_or_init(|| Mutex::new(pending.take().unwrap_or_default()));
    match pending {
        Some(rejected) => Err(rejected),
        None => Ok(()),
    }
}

/// Run `f` against the process-wide instance, creating one with default
/// options on first use.
///
/// The instance stays locked while `f` runs and the lock is not
/// reentrant: calling `register`, `spawn`, `generate`, `generate_strict`
/// or `with_global` from inside `f` deadlocks. Use the `&mut
/// ObjectSynthesizer` handed to `f` instead.
pub fn with_global<R>(f: impl FnOnce(&mut ObjectSynthesizer) -> R) -> R {
    let mut guard = lock();
    f(&mut guard)
}

pub fn register<T: Model>(
    attribute: impl Into<AttributeName>,
    options: GeneratorOptions,
) -> Result<()> {
    with_global(|synthesizer| synthesizer.register::<T>(attribute, options))
}

pub fn spawn<T: Model>(overrides: Attributes) -> Result<T> {
    with_global(|synthesizer| synthesizer.spawn::<T>(overrides))
}

pub fn generate<T: Persist>(overrides: Attributes) -> Result<T> {
    with_global(|synthesizer| synthesizer.generate::<T>(overrides))
}

pub fn generate_strict<T: Persist>(overrides: Attributes) -> Result<T> {
    with_global(|synthesizer| synthesizer.generate_strict::<T>(overrides))
}

fn lock() -> MutexGuard<'static, ObjectSynthesizer> {
    GLOBAL
        .get_or_init(|| Mutex::new(ObjectSynthesizer::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

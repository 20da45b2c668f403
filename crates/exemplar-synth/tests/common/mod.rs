#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};

use exemplar_core::{Attributes, Model, Persist, TypeInfo, Value};
use exemplar_synth::{ObjectSynthesizer, SynthesisOptions};

static NEXT_ID: AtomicI64 = AtomicI64::new(1);

macro_rules! record_type {
    ($name:ident, $info:expr) => {
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            pub attributes: Attributes,
            pub persisted: bool,
        }

        impl $name {
            pub fn get(&self, name: &str) -> Option<&Value> {
                self.attributes.get(name)
            }

            pub fn text(&self, name: &str) -> Option<&str> {
                self.get(name).and_then(Value::as_str)
            }
        }

        impl Model for $name {
            fn type_info() -> TypeInfo {
                $info
            }

            fn from_attributes(attributes: Attributes) -> Self {
                Self {
                    attributes,
                    persisted: false,
                }
            }

            fn attributes(&self) -> Attributes {
                self.attributes.clone()
            }
        }
    };
}

fn next_code() -> Value {
    Value::from("CODE-1")
}

record_type!(
    User,
    TypeInfo::of::<User>().class_method("next_code", next_code)
);

fn moderator_code() -> Value {
    Value::from("CODE-MOD")
}

record_type!(Admin, TypeInfo::of::<Admin>().extends(&User::type_info()));
record_type!(
    Moderator,
    TypeInfo::of::<Moderator>()
        .class_method("next_code", moderator_code)
        .extends(&User::type_info())
);
record_type!(Widget, TypeInfo::of::<Widget>());
record_type!(Author, TypeInfo::of::<Author>());
record_type!(Post, TypeInfo::of::<Post>());
record_type!(
    FeaturedPost,
    TypeInfo::of::<FeaturedPost>().extends(&Post::type_info())
);
record_type!(Chicken, TypeInfo::of::<Chicken>());
record_type!(Egg, TypeInfo::of::<Egg>());

/// Saves succeed when every listed attribute is present and not null; a
/// successful save assigns an `id`.
fn save_requiring(attributes: &mut Attributes, persisted: &mut bool, required: &[&str]) -> bool {
    if !required_present(attributes, required) {
        return false;
    }
    attributes.insert("id", NEXT_ID.fetch_add(1, Ordering::SeqCst));
    *persisted = true;
    true
}

fn required_present(attributes: &Attributes, required: &[&str]) -> bool {
    required
        .iter()
        .all(|name| attributes.get(*name).is_some_and(|value| !value.is_null()))
}

fn missing_messages(attributes: &Attributes, required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| attributes.get(**name).is_none_or(Value::is_null))
        .map(|name| format!("{name} can't be blank"))
        .collect()
}

macro_rules! persist_requiring {
    ($name:ident, [$($required:literal),*]) => {
        impl Persist for $name {
            fn save(&mut self) -> bool {
                save_requiring(&mut self.attributes, &mut self.persisted, &[$($required),*])
            }

            fn is_valid(&self) -> bool {
                required_present(&self.attributes, &[$($required),*])
            }

            fn errors(&self) -> Vec<String> {
                missing_messages(&self.attributes, &[$($required),*])
            }
        }
    };
}

persist_requiring!(Author, ["name"]);
persist_requiring!(Post, ["title"]);
persist_requiring!(FeaturedPost, ["title"]);
persist_requiring!(Widget, ["name"]);
persist_requiring!(Chicken, []);
persist_requiring!(Egg, []);

pub fn temp_exemplar_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!("exemplar_synth_{label}_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("create temp exemplar dir");
    dir
}

pub fn write_exemplar(dir: &Path, file_name: &str, content: &str) {
    fs::write(dir.join(file_name), content).expect("write exemplar file");
}

pub fn synthesizer_in(dir: &Path) -> ObjectSynthesizer {
    ObjectSynthesizer::new(SynthesisOptions::default().with_exemplar_dir(dir))
}

/// Synthesizer pointed at a directory that holds no exemplar files.
pub fn bare_synthesizer() -> ObjectSynthesizer {
    synthesizer_in(&std::env::temp_dir().join("exemplar_synth_no_exemplars"))
}

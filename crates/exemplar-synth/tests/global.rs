mod common;

use common::{Author, Widget, bare_synthesizer};
use exemplar_core::{Attributes, Value};
use exemplar_synth::{GeneratorOptions, SynthesisError, global, logging};

#[test]
fn process_wide_synthesizer_is_installed_once_and_shared() {
    logging::init_test_logging();

    let _ = global::init_global(bare_synthesizer());
    assert!(global::init_global(bare_synthesizer()).is_err());

    global::register::<Widget>("name", GeneratorOptions::value("gear")).expect("register");
    let err = global::register::<Widget>("name", GeneratorOptions::value("again"))
        .expect_err("shared registry");
    assert!(matches!(err, SynthesisError::DuplicateGenerator { .. }));

    let spawned: Widget = global::spawn(Attributes::new()).expect("spawn");
    assert_eq!(spawned.text("name"), Some("gear"));
    assert!(!spawned.persisted);

    let generated: Widget = global::generate(Attributes::new()).expect("generate");
    assert!(generated.persisted);

    let strict: Widget = global::generate_strict(Attributes::new().with("name", "bolt"))
        .expect("generate strict");
    assert_eq!(strict.get("name"), Some(&Value::from("bolt")));

    let registered = global::with_global(|synth| {
        synth
            .registry()
            .generated_attributes(&<Widget as exemplar_core::Model>::type_info())
            .len()
    });
    assert_eq!(registered, 1);
}

#[test]
fn closure_registers_and_spawns_through_the_locked_instance() {
    let author = global::with_global(|synth| -> exemplar_synth::errors::Result<Author> {
        synth.register::<Author>("name", GeneratorOptions::value("Grace"))?;
        synth.spawn(Attributes::new())
    })
    .expect("spawn inside closure");
    assert_eq!(author.text("name"), Some("Grace"));

    let again: Author = global::spawn(Attributes::new()).expect("spawn after release");
    assert_eq!(again.text("name"), Some("Grace"));
}

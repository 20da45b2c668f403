mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::{Author, Chicken, Egg, FeaturedPost, Post, bare_synthesizer};
use exemplar_core::{AttributeName, Attributes, Model, Value};
use exemplar_synth::{
    AssociationResolver, Block, GeneratorOptions, ObjectSynthesizer, SynthesisError,
    ValidationMetadata,
};

fn blog_metadata() -> ValidationMetadata {
    ValidationMetadata::new()
        .belongs_to::<Post, Author>("author", None)
        .validates_presence_of::<Post>("author")
}

fn blog_synthesizer(metadata: ValidationMetadata) -> (ObjectSynthesizer, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut synth = bare_synthesizer().with_associations(metadata);
    synth
        .register::<Author>(
            "name",
            GeneratorOptions::block(Block::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Value::from("Ada")
            })),
        )
        .expect("author name");
    synth
        .register::<Post>("title", GeneratorOptions::value("Hello"))
        .expect("post title");
    (synth, calls)
}

#[test]
fn required_association_is_generated_and_persisted() {
    let (mut synth, calls) = blog_synthesizer(blog_metadata());

    let post: Post = synth.spawn(Attributes::new()).expect("spawn");
    let author = post
        .get("author")
        .and_then(Value::as_record)
        .expect("author snapshot");
    assert_eq!(author.type_name, "Author");
    assert_eq!(author.attributes.get("name"), Some(&Value::from("Ada")));
    assert!(author.attributes.get("id").is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!post.persisted);
}

#[test]
fn overriding_the_association_skips_generation() {
    let (mut synth, calls) = blog_synthesizer(blog_metadata());

    let post: Post = synth
        .spawn(Attributes::new().with("author", "someone"))
        .expect("spawn");
    assert_eq!(post.text("author"), Some("someone"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn overriding_the_foreign_key_skips_generation() {
    let (mut synth, calls) = blog_synthesizer(blog_metadata());

    let post: Post = synth
        .spawn(Attributes::new().with("author_id", 7))
        .expect("spawn");
    assert!(post.get("author").is_none());
    assert_eq!(post.get("author_id"), Some(&Value::Int(7)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn custom_foreign_key_is_honoured() {
    let metadata = ValidationMetadata::new()
        .belongs_to::<Post, Author>("writer", Some("writer_ref"))
        .validates_presence_of::<Post>("writer");
    let (mut synth, calls) = blog_synthesizer(metadata);

    let post: Post = synth
        .spawn(Attributes::new().with("writer_ref", 1))
        .expect("spawn");
    assert!(post.get("writer").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn optional_association_is_left_alone() {
    let metadata = ValidationMetadata::new().belongs_to::<Post, Author>("author", None);
    let (mut synth, calls) = blog_synthesizer(metadata);

    let post: Post = synth.spawn(Attributes::new()).expect("spawn");
    assert!(post.get("author").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn required_foreign_key_triggers_generation() {
    let metadata = ValidationMetadata::new()
        .belongs_to::<Post, Author>("author", None)
        .validates_presence_of::<Post>("author_id");
    let (mut synth, calls) = blog_synthesizer(metadata);

    let post: Post = synth.spawn(Attributes::new()).expect("spawn");
    assert!(post.get("author").and_then(Value::as_record).is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn declarations_apply_to_subclasses() {
    let (mut synth, calls) = blog_synthesizer(blog_metadata());

    let post: FeaturedPost = synth.generate(Attributes::new()).expect("generate");
    assert!(post.persisted);
    assert_eq!(post.text("title"), Some("Hello"));
    assert!(post.get("author").and_then(Value::as_record).is_some());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn invalid_associated_instance_is_kept_unsaved() {
    let mut synth = bare_synthesizer().with_associations(blog_metadata());

    let post: Post = synth
        .spawn(Attributes::new().with("title", "t"))
        .expect("spawn");
    let author = post
        .get("author")
        .and_then(Value::as_record)
        .expect("author snapshot");
    assert!(author.attributes.get("id").is_none());
}

#[test]
fn required_association_cycle_is_reported() {
    let metadata = ValidationMetadata::new()
        .belongs_to::<Chicken, Egg>("egg", None)
        .validates_presence_of::<Chicken>("egg")
        .belongs_to::<Egg, Chicken>("chicken", None)
        .validates_presence_of::<Egg>("chicken");
    let mut synth = bare_synthesizer().with_associations(metadata);

    let err = synth
        .spawn::<Chicken>(Attributes::new())
        .expect_err("cycle");
    match err {
        SynthesisError::AssociationCycle { path } => {
            assert_eq!(path, vec!["Chicken", "Egg", "Chicken"]);
        }
        other => panic!("unexpected error: {other}"),
    }

    let chicken: Chicken = synth
        .spawn(Attributes::new().with("egg", Value::Null))
        .expect("override breaks the cycle");
    assert_eq!(chicken.get("egg"), Some(&Value::Null));
}

#[test]
fn resolver_reports_required_associations() {
    let metadata = blog_metadata();
    let post = Post::type_info();

    assert_eq!(metadata.associations(&post).len(), 1);
    assert!(metadata.is_attribute_required(&post, &AttributeName::from("author")));
    assert!(!metadata.is_attribute_required(&post, &AttributeName::from("title")));

    let required = metadata.required_associations(&FeaturedPost::type_info());
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].foreign_key.as_str(), "author_id");
    assert!(metadata.associations(&Author::type_info()).is_empty());
}

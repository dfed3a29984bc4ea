use crate::classifier::adapter::{ClassifierAdapter, ClassifierStatus};
use crate::classifier::impl_fake::{FakeScores, ModelLoaderFake};
use crate::classifier::interface::{ClassIndex, ModelProfile};
use crate::classifier::model_uri::ModelUri;
use crate::error::{Component, PipelineError};
use crate::frame_normalizer::tensor::NormalizedTensor;
use crate::label_decoder::class_table::ClassTable;
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::Logger;
use chrono::{Offset, Utc};
use std::sync::Arc;

fn logger() -> Arc<dyn Logger + Send + Sync> {
    Arc::new(LoggerConsole::new(Utc.fix()))
}

fn profile() -> ModelProfile {
    ModelProfile {
        name: "asl-26".to_string(),
        input_side: 100,
        divisor: 100.0,
        class_table: ClassTable::letters(),
    }
}

fn peaked_scores(classes: usize, peak: usize) -> FakeScores {
    FakeScores::Fixed(
        (0..classes)
            .map(|i| if i == peak { 0.9 } else { 0.1 / classes as f32 })
            .collect(),
    )
}

fn uri() -> ModelUri {
    ModelUri::new("asl_model/model.json")
}

#[test]
fn test_predict_before_load_is_not_ready() {
    let loader = ModelLoaderFake::new(logger(), profile(), peaked_scores(26, 3));
    let adapter = ClassifierAdapter::new(Arc::new(loader), logger());

    assert_eq!(adapter.status(), ClassifierStatus::Uninitialized);
    assert_eq!(
        adapter.predict(&NormalizedTensor::zeros(100)),
        Err(PipelineError::NotReady(Component::Classifier))
    );
}

#[test]
fn test_predict_while_loading_is_not_ready() {
    let (loader, release) =
        ModelLoaderFake::new(logger(), profile(), peaked_scores(26, 3)).gated();
    let adapter = ClassifierAdapter::new(Arc::new(loader), logger());

    let done = adapter.load(uri()).unwrap();
    assert_eq!(adapter.status(), ClassifierStatus::Loading);
    assert_eq!(
        adapter.predict(&NormalizedTensor::zeros(100)),
        Err(PipelineError::NotReady(Component::Classifier))
    );

    release.send(()).unwrap();
    assert_eq!(done.recv().unwrap(), Ok(profile()));
    assert_eq!(adapter.status(), ClassifierStatus::Ready);
    assert_eq!(
        adapter.predict(&NormalizedTensor::zeros(100)),
        Ok(ClassIndex(3))
    );
}

#[test]
fn test_failed_load_is_terminal() {
    let loader =
        ModelLoaderFake::new(logger(), profile(), peaked_scores(26, 3)).failing("network down");
    let adapter = ClassifierAdapter::new(Arc::new(loader), logger());

    assert_eq!(
        adapter.load_blocking(uri()),
        Err(PipelineError::ModelLoad("network down".to_string()))
    );
    assert_eq!(adapter.status(), ClassifierStatus::Failed);
    assert_eq!(
        adapter.failure(),
        Some(PipelineError::ModelLoad("network down".to_string()))
    );
    assert_eq!(
        adapter.predict(&NormalizedTensor::zeros(100)),
        Err(PipelineError::NotReady(Component::Classifier))
    );
    assert_eq!(
        adapter.load(uri()).unwrap_err(),
        PipelineError::LoadAlreadyStarted
    );
}

#[test]
fn test_load_is_single_shot() {
    let (loader, release) =
        ModelLoaderFake::new(logger(), profile(), peaked_scores(26, 0)).gated();
    let adapter = ClassifierAdapter::new(Arc::new(loader), logger());

    let done = adapter.load(uri()).unwrap();
    assert_eq!(
        adapter.load(uri()).unwrap_err(),
        PipelineError::LoadAlreadyStarted
    );

    drop(release);
    assert!(done.recv().unwrap().is_ok());
    assert_eq!(
        adapter.load(uri()).unwrap_err(),
        PipelineError::LoadAlreadyStarted
    );
}

#[test]
fn test_table_size_mismatch_is_detected_at_load() {
    let loader = ModelLoaderFake::new(logger(), profile(), peaked_scores(29, 28));
    let adapter = ClassifierAdapter::new(Arc::new(loader), logger());

    assert!(matches!(
        adapter.load_blocking(uri()),
        Err(PipelineError::ModelLoad(_))
    ));
    assert_eq!(adapter.status(), ClassifierStatus::Failed);
}

#[test]
fn test_predict_rejects_wrong_input_side() {
    let loader = ModelLoaderFake::new(logger(), profile(), peaked_scores(26, 3));
    let adapter = ClassifierAdapter::new(Arc::new(loader), logger());
    adapter.load_blocking(uri()).unwrap();

    assert_eq!(
        adapter.predict(&NormalizedTensor::zeros(128)),
        Err(PipelineError::ShapeMismatch {
            expected: 100,
            actual: 128
        })
    );
}

#[test]
fn test_model_is_shared_across_threads() {
    let loader = ModelLoaderFake::new(logger(), profile(), peaked_scores(26, 7));
    let adapter = Arc::new(ClassifierAdapter::new(Arc::new(loader), logger()));
    adapter.load_blocking(uri()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let adapter = adapter.clone();
            std::thread::spawn(move || adapter.predict(&NormalizedTensor::zeros(100)))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Ok(ClassIndex(7)));
    }
}

use application::pipeline::{AnalysisPipeline, PASSAGE_SEPARATOR, TRUNCATION_MARKER};
use application::retriever::Retriever;
use domain::errors::StageError;
use domain::models::Passage;
use std::path::Path;
use tests::fakes::{FakeEmbedder, FakeIndex, FakeSynth, FakeVision};

fn passage(text: &str, distance: f32) -> Passage {
    Passage {
        text: text.to_string(),
        distance,
    }
}

fn three_passages() -> Vec<Passage> {
    vec![
        passage("first passage", 0.1),
        passage("second passage", 0.2),
        passage("third passage", 0.3),
    ]
}

fn pipeline_with(
    vision: FakeVision,
    embedder: FakeEmbedder,
    index: FakeIndex,
    synth: FakeSynth,
) -> AnalysisPipeline<FakeVision, FakeEmbedder, FakeIndex, FakeSynth> {
    AnalysisPipeline::new(vision, Retriever::new(embedder, index, 5), synth)
}

#[tokio::test]
async fn successful_run_reports_every_stage_output() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::returning(vec![0.1, 0.2]);
    let index = FakeIndex::returning(three_passages());
    let synth = FakeSynth::returning("summary text");
    let pipeline = pipeline_with(vision.clone(), embedder.clone(), index.clone(), synth.clone());

    let report = pipeline.analyze_bytes(b"image bytes").await.unwrap();

    assert_eq!(report.vision_analysis, "mass in left temporal lobe");
    assert_eq!(report.synthesis, "summary text");
    assert_eq!(report.sources, 3);
    assert_eq!(report.passages, three_passages());
    assert_eq!(vision.call_count(), 1);
    assert_eq!(embedder.call_count(), 1);
    assert_eq!(index.call_count(), 1);
    assert_eq!(synth.call_count(), 1);
}

#[tokio::test]
async fn missing_image_fails_before_any_model_call() {
    let vision = FakeVision::returning("unused");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::returning(three_passages());
    let synth = FakeSynth::returning("unused");
    let pipeline = pipeline_with(vision.clone(), embedder.clone(), index.clone(), synth.clone());

    let err = pipeline
        .analyze(Path::new("/definitely/not/here/scan.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, StageError::ImageNotFound { .. }));
    assert!(err.to_string().contains("/definitely/not/here/scan.png"));
    assert_eq!(vision.call_count(), 0);
    assert_eq!(embedder.call_count(), 0);
    assert_eq!(index.call_count(), 0);
    assert_eq!(synth.call_count(), 0);
}

#[tokio::test]
async fn unreadable_image_fails_before_any_model_call() {
    let vision = FakeVision::returning("unused");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::returning(three_passages());
    let synth = FakeSynth::returning("unused");
    let pipeline = pipeline_with(vision.clone(), embedder.clone(), index.clone(), synth.clone());

    // A directory passes the existence check but cannot be read as a file.
    let dir = tempfile::tempdir().unwrap();
    let err = pipeline.analyze(dir.path()).await.unwrap_err();

    assert!(matches!(err, StageError::ImageUnreadable { .. }));
    assert!(err.to_string().starts_with("failed to read image"));
    assert!(err.to_string().contains(&dir.path().display().to_string()));
    assert_eq!(vision.call_count(), 0);
    assert_eq!(embedder.call_count(), 0);
    assert_eq!(index.call_count(), 0);
    assert_eq!(synth.call_count(), 0);
}

#[tokio::test]
async fn vision_failure_stops_the_run_before_retrieval() {
    let vision = FakeVision::failing();
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::returning(three_passages());
    let synth = FakeSynth::returning("unused");
    let pipeline = pipeline_with(vision, embedder.clone(), index.clone(), synth.clone());

    let err = pipeline.analyze_bytes(b"image bytes").await.unwrap_err();

    assert!(matches!(err, StageError::Vision { .. }));
    assert!(err.to_string().starts_with("vision error:"));
    assert_eq!(embedder.call_count(), 0);
    assert_eq!(index.call_count(), 0);
    assert_eq!(synth.call_count(), 0);
}

#[tokio::test]
async fn embedding_failure_stops_the_run_before_the_index() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::failing();
    let index = FakeIndex::returning(three_passages());
    let synth = FakeSynth::returning("unused");
    let pipeline = pipeline_with(vision, embedder, index.clone(), synth.clone());

    let err = pipeline.analyze_bytes(b"image bytes").await.unwrap_err();

    assert!(err.to_string().starts_with("embedding error:"));
    assert_eq!(index.call_count(), 0);
    assert_eq!(synth.call_count(), 0);
}

#[tokio::test]
async fn index_failure_surfaces_as_retrieval_error() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::failing();
    let synth = FakeSynth::returning("unused");
    let pipeline = pipeline_with(vision, embedder, index, synth.clone());

    let err = pipeline.analyze_bytes(b"image bytes").await.unwrap_err();

    assert!(err.to_string().starts_with("retrieval error:"));
    assert_eq!(synth.call_count(), 0);
}

#[tokio::test]
async fn empty_retrieval_fails_without_invoking_synthesis() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::empty();
    let synth = FakeSynth::returning("unused");
    let pipeline = pipeline_with(vision, embedder, index, synth.clone());

    let err = pipeline.analyze_bytes(b"image bytes").await.unwrap_err();

    assert!(matches!(err, StageError::NoPassages));
    assert_eq!(err.to_string(), "no results retrieved");
    assert_eq!(synth.call_count(), 0);
}

#[tokio::test]
async fn synthesis_failure_surfaces_the_stage_reason() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::returning(three_passages());
    let synth = FakeSynth::failing();
    let pipeline = pipeline_with(vision, embedder, index, synth);

    let err = pipeline.analyze_bytes(b"image bytes").await.unwrap_err();

    assert!(matches!(err, StageError::Synthesis { .. }));
    assert!(err.to_string().starts_with("synthesis error:"));
}

#[tokio::test]
async fn synthesis_context_is_capped_and_marked_when_long() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::returning(vec![
        passage(&"a".repeat(2500), 0.1),
        passage(&"b".repeat(2500), 0.2),
        passage(&"c".repeat(2500), 0.3),
    ]);
    let synth = FakeSynth::returning("summary text");
    let pipeline = pipeline_with(vision, embedder, index, synth.clone());

    pipeline.analyze_bytes(b"image bytes").await.unwrap();

    let inputs = synth.captured_inputs();
    assert_eq!(inputs.len(), 1);
    let (description, context) = &inputs[0];
    assert_eq!(description, "mass in left temporal lobe");
    assert!(context.ends_with(TRUNCATION_MARKER));
    let body = context.strip_suffix(TRUNCATION_MARKER).unwrap();
    assert_eq!(body.chars().count(), 6000);
}

#[tokio::test]
async fn synthesis_context_under_the_cap_is_passed_unmodified() {
    let vision = FakeVision::returning("mass in left temporal lobe");
    let embedder = FakeEmbedder::returning(vec![0.1]);
    let index = FakeIndex::returning(vec![passage("alpha", 0.1), passage("beta", 0.2)]);
    let synth = FakeSynth::returning("summary text");
    let pipeline = pipeline_with(vision, embedder, index, synth.clone());

    pipeline.analyze_bytes(b"image bytes").await.unwrap();

    let inputs = synth.captured_inputs();
    let (_, context) = &inputs[0];
    assert_eq!(context, &format!("alpha{PASSAGE_SEPARATOR}beta"));
    assert!(!context.contains(TRUNCATION_MARKER));
}

#[tokio::test]
async fn identical_runs_yield_identical_reports() {
    let pipeline = pipeline_with(
        FakeVision::returning("mass in left temporal lobe"),
        FakeEmbedder::returning(vec![0.1, 0.2]),
        FakeIndex::returning(three_passages()),
        FakeSynth::returning("summary text"),
    );

    let first = pipeline.analyze_bytes(b"image bytes").await.unwrap();
    let second = pipeline.analyze_bytes(b"image bytes").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn full_run_persists_a_report_file() {
    let pipeline = pipeline_with(
        FakeVision::returning("mass in left temporal lobe"),
        FakeEmbedder::returning(vec![0.1, 0.2]),
        FakeIndex::returning(three_passages()),
        FakeSynth::returning("summary text"),
    );
    let report = pipeline.analyze_bytes(b"image bytes").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let report_dir = dir.path().to_string_lossy().into_owned();
    let out_path =
        presentation::report::write_report(&report_dir, Path::new("scan.png"), &report).unwrap();

    let contents = std::fs::read_to_string(out_path).unwrap();
    assert!(contents.contains("summary text"));
    assert!(contents.contains("Sources Referenced: 3"));
    assert!(contents.contains("mass in left temporal lobe"));
}

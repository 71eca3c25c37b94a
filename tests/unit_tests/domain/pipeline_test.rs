use synopsis::domain::{NarrationArtifact, PipelineOutcome, PipelineStage};

#[test]
fn given_transcript_outcome_when_asking_for_narration_then_there_is_none() {
    let outcome = PipelineOutcome::Transcript {
        text: "hello".to_string(),
    };

    assert_eq!(outcome.text(), "hello");
    assert!(outcome.narration().is_none());
}

#[test]
fn given_summary_outcome_when_asking_for_narration_then_returns_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let narration = NarrationArtifact::create(Some(dir.path()), b"mp3").unwrap();
    let id = narration.id();

    let outcome = PipelineOutcome::Summary {
        text: "short".to_string(),
        model: "llama3-8b-8192".to_string(),
        narration,
    };

    assert_eq!(outcome.text(), "short");
    assert_eq!(outcome.narration().map(|n| n.id()), Some(id));
}

#[test]
fn given_stage_when_serialized_then_uses_lowercase_name() {
    assert_eq!(
        serde_json::to_string(&PipelineStage::Summarized).unwrap(),
        "\"summarized\""
    );
    assert_eq!(PipelineStage::Idle.to_string(), "idle");
}

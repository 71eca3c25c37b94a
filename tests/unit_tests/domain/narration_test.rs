use synopsis::domain::{NarrationArtifact, NarrationId};

#[test]
fn given_audio_bytes_when_creating_artifact_then_writes_mp3_file() {
    let dir = tempfile::tempdir().unwrap();

    let artifact = NarrationArtifact::create(Some(dir.path()), b"ID3audio").unwrap();

    let path = artifact.path().to_path_buf();
    assert!(path.exists());
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
    assert!(
        path.file_name()
            .and_then(|n| n.to_str())
            .unwrap()
            .starts_with("narration-")
    );
    assert_eq!(std::fs::read(&path).unwrap(), b"ID3audio");
    assert_eq!(artifact.size_bytes(), 8);
}

#[test]
fn given_artifact_when_dropped_then_file_is_deleted() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = NarrationArtifact::create(Some(dir.path()), b"audio").unwrap();
    let path = artifact.path().to_path_buf();

    drop(artifact);

    assert!(!path.exists());
}

#[test]
fn given_two_artifacts_when_created_then_paths_and_ids_are_unique() {
    let dir = tempfile::tempdir().unwrap();

    let a = NarrationArtifact::create(Some(dir.path()), b"a").unwrap();
    let b = NarrationArtifact::create(Some(dir.path()), b"b").unwrap();

    assert_ne!(a.path(), b.path());
    assert_ne!(a.id(), b.id());
}

#[test]
fn given_narration_id_when_round_tripping_through_string_then_parses_back() {
    let id = NarrationId::new();

    let parsed: NarrationId = id.to_string().parse().unwrap();

    assert_eq!(parsed, id);
    assert!("not-a-uuid".parse::<NarrationId>().is_err());
}

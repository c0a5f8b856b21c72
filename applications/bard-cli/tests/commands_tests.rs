//! Command layer tests against a real SQLite file

use bard_cli::{commands, AppState, BardConfig, CliError};
use bard_core::{AssetClass, LocationNode};
use bard_storage::data_objects;
use tempfile::TempDir;

struct TestApp {
    state: AppState,
    dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = BardConfig::default();
        config.storage.database_url = format!("sqlite://{}", dir.path().join("bard.db").display());

        let state = AppState::open(config).await.expect("Failed to open state");
        Self { state, dir }
    }

    fn write_file(&self, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

#[tokio::test]
async fn test_add_list_remove() {
    let app = TestApp::new().await;
    let file = app.write_file("tavern.mp3", b"ID3\x04fake");

    let entry = commands::add(&app.state, AssetClass::Audio, &file, None)
        .await
        .unwrap();
    assert_eq!(entry.name, "tavern.mp3");
    assert_eq!(entry.mime_type, "audio/mpeg");

    let renamed = commands::add(&app.state, AssetClass::Image, &file, Some("cover.png"))
        .await
        .unwrap();
    assert_eq!(renamed.mime_type, "image/png");

    let listed = commands::list(&app.state, None).await.unwrap();
    assert_eq!(listed.len(), 2);
    let audio_only = commands::list(&app.state, Some(AssetClass::Audio)).await.unwrap();
    assert_eq!(audio_only.len(), 1);
    assert_eq!(audio_only[0].1.name, "tavern.mp3");

    commands::remove(&app.state, AssetClass::Audio, "tavern.mp3")
        .await
        .unwrap();
    commands::remove(&app.state, AssetClass::Audio, "tavern.mp3")
        .await
        .expect("removing twice is fine");

    let counts = commands::status(&app.state).await.unwrap();
    assert_eq!((counts.audio, counts.images, counts.data), (0, 1, 0));
}

#[tokio::test]
async fn test_add_rejects_bad_names() {
    let app = TestApp::new().await;
    let file = app.write_file("map.png", b"png");

    let result = commands::add(&app.state, AssetClass::Image, &file, Some("maps/world.png")).await;
    assert!(matches!(result, Err(CliError::InvalidInput(_))));

    let missing = commands::add(
        &app.state,
        AssetClass::Image,
        &app.dir.path().join("missing.png"),
        None,
    )
    .await;
    assert!(matches!(missing, Err(CliError::Io(_))));
}

#[tokio::test]
async fn test_url_and_show_data() {
    let app = TestApp::new().await;
    let file = app.write_file("rain.ogg", b"OggS");
    commands::add(&app.state, AssetClass::Audio, &file, None)
        .await
        .unwrap();

    let url = commands::url(&app.state, AssetClass::Audio, "rain.ogg")
        .await
        .unwrap();
    assert!(url.starts_with("data:audio/ogg;base64,"));
    assert!(commands::url(&app.state, AssetClass::Audio, "snow.ogg")
        .await
        .is_none());

    data_objects::save_characters(&*app.state.store, &[serde_json::json!({ "name": "Brom" })])
        .await
        .unwrap();
    let shown = commands::show_data(&app.state, "characters.json")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(shown, serde_json::json!([{ "name": "Brom" }]));
    assert!(commands::show_data(&app.state, "absent.json")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_export_clear_import() {
    let app = TestApp::new().await;
    for name in ["a.mp3", "b.mp3"] {
        let file = app.write_file(name, name.as_bytes());
        commands::add(&app.state, AssetClass::Audio, &file, None)
            .await
            .unwrap();
    }

    let archive = app.dir.path().join("backup.zip");
    let bytes = commands::export(&app.state, &archive).await.unwrap();
    assert!(bytes > 0);

    commands::clear(&app.state, &AssetClass::ALL).await.unwrap();
    assert_eq!(commands::status(&app.state).await.unwrap().total(), 0);

    let summary = commands::import(&app.state, &archive).await.unwrap();
    assert_eq!(summary.audio_count, 2);
    assert!(summary.failures.is_empty());

    let names: Vec<String> = commands::list(&app.state, Some(AssetClass::Audio))
        .await
        .unwrap()
        .into_iter()
        .map(|(_, entry)| entry.name)
        .collect();
    assert_eq!(names, vec!["a.mp3", "b.mp3"]);
}

#[tokio::test]
async fn test_walk_follows_location_policy() {
    let app = TestApp::new().await;
    for name in ["keep.ogg", "yard.ogg", "forge.ogg"] {
        let file = app.write_file(name, b"OggS");
        commands::add(&app.state, AssetClass::Audio, &file, None)
            .await
            .unwrap();
    }
    data_objects::save_locations(
        &*app.state.store,
        &[
            LocationNode::new("keep").with_audio("/audio/keep.ogg"),
            LocationNode::new("yard")
                .with_parent("keep", true)
                .with_audio("/audio/yard.ogg"),
            LocationNode::new("forge")
                .with_parent("keep", true)
                .with_audio("/audio/forge.ogg"),
            LocationNode::new("gate"),
        ],
    )
    .await
    .unwrap();

    let route: Vec<String> = ["keep", "yard", "forge", "gate"]
        .iter()
        .map(|id| (*id).to_string())
        .collect();
    let steps = commands::walk(&app.state, &route).await.unwrap();

    let ids = |step: usize| -> Vec<String> {
        steps[step].iter().map(|track| track.id.clone()).collect()
    };
    assert_eq!(ids(0), vec!["/audio/keep.ogg"]);
    assert_eq!(ids(1), vec!["/audio/keep.ogg", "/audio/yard.ogg"]);
    assert_eq!(ids(2), vec!["/audio/keep.ogg", "/audio/forge.ogg"]);
    // No audio configured: the mix is left alone
    assert_eq!(ids(3), vec!["/audio/keep.ogg", "/audio/forge.ogg"]);

    let unknown = commands::walk(&app.state, &["cellar".to_string()]).await;
    assert!(matches!(unknown, Err(CliError::InvalidInput(_))));
}

//! Template Persistence Integration Tests

use std::sync::Arc;

use prompt_to_app::{
    Database, GenerationOrchestrator, KeyValueStore, OpenAIProvider, OrchestratorOptions,
    ProviderConfig, SessionEvent, SourceOrigin, Template,
};
use tokio::sync::mpsc;

fn orchestrator(storage: Arc<Database>, options: OrchestratorOptions) -> GenerationOrchestrator {
    let provider = OpenAIProvider::new(ProviderConfig::default()).unwrap();
    GenerationOrchestrator::new(Arc::new(provider), storage, options)
}

#[tokio::test]
async fn test_templates_survive_restart() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("data.db");

    {
        let session = orchestrator(
            Arc::new(Database::open(&path).unwrap()),
            OrchestratorOptions::default(),
        );
        assert!(session.save_template("Card", "export default function App() { return <div/>; }").await);
        assert!(session.save_template("Card", "second card").await);
        assert!(session.save_current_as_template(" Starter ").await);
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = orchestrator(
        Arc::new(Database::open(&path).unwrap()),
        OrchestratorOptions::default().with_events(tx),
    );

    let templates = session.templates().await;
    assert_eq!(templates.len(), 3);
    assert_eq!(templates[0].name, "Card");
    assert_eq!(templates[1].name, "Card");
    assert_eq!(templates[1].source_text, "second card");
    assert_eq!(templates[2].name, "Starter");
    assert_eq!(templates[2].source_text, prompt_to_app::DEFAULT_SOURCE);
    assert!(rx.try_recv().is_err());

    assert_eq!(session.select_template(1).await.unwrap(), "second card");
    assert_eq!(
        session.current_source().await.origin,
        SourceOrigin::Template { index: 1 }
    );
    assert!(session.history().await.is_empty());
}

#[tokio::test]
async fn test_stored_format_is_json_array() {
    let db = Arc::new(Database::new_in_memory().unwrap());
    let session = orchestrator(db.clone(), OrchestratorOptions::default());

    session.save_template("Hero", "hero source").await;

    let raw = db.get("templates").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "name": "Hero", "sourceText": "hero source" }])
    );
    let parsed: Vec<Template> = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, vec![Template::new("Hero", "hero source")]);
}

#[tokio::test]
async fn test_corrupt_slot_starts_empty_and_reports() {
    let db = Arc::new(Database::new_in_memory().unwrap());
    db.set("templates", "definitely not json").unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = orchestrator(db.clone(), OrchestratorOptions::default().with_events(tx));

    assert!(session.templates().await.is_empty());
    assert!(matches!(
        rx.try_recv(),
        Ok(SessionEvent::PersistenceFailed { .. })
    ));

    // the next save replaces the corrupt slot
    session.save_template("Fresh", "src").await;
    let parsed: Vec<Template> = serde_json::from_str(&db.get("templates").unwrap().unwrap()).unwrap();
    assert_eq!(parsed.len(), 1);
}

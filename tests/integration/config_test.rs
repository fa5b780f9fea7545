//! Configuration Integration Tests

use std::sync::Arc;

use prompt_to_app::{
    AppConfig, ConfigService, Database, GenerationOrchestrator, SelectionPolicy, SettingsUpdate,
};

#[test]
fn test_config_update_persists_and_feeds_orchestrator() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");

    {
        let mut service = ConfigService::open(path.clone()).unwrap();
        service
            .update_config(SettingsUpdate {
                model: Some("gpt-4o-mini".to_string()),
                history_limit: Some(5),
                selection_policy: Some(SelectionPolicy::PreferSelection),
                ..Default::default()
            })
            .unwrap();
    }

    let service = ConfigService::open(path).unwrap();
    let config = service.get_config();
    assert_eq!(config.provider.model, "gpt-4o-mini");
    assert_eq!(config.history_limit, 5);

    let storage = Arc::new(Database::new_in_memory().unwrap());
    let orchestrator = GenerationOrchestrator::from_config(config, storage, None).unwrap();
    assert_eq!(orchestrator.selection_policy(), SelectionPolicy::PreferSelection);
}

#[test]
fn test_invalid_update_is_rejected_and_not_saved() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("config.json");

    let mut service = ConfigService::open(path.clone()).unwrap();
    let result = service.update_config(SettingsUpdate {
        history_limit: Some(0),
        ..Default::default()
    });
    assert!(result.is_err());
    assert_eq!(service.get_config().history_limit, 10);

    let reopened = ConfigService::open(path).unwrap();
    assert_eq!(reopened.get_config().history_limit, AppConfig::default().history_limit);
}

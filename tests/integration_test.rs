// Integration tests for settings persistence and snapshot loading
mod fixtures;

use clinic_agenda::models::event::Event;
use clinic_agenda::models::settings::{AgendaSettings, GridConfig, SchedulingPolicy};
use clinic_agenda::services::agenda::Agenda;
use clinic_agenda::services::settings::SettingsService;

use fixtures::{busy_morning, clinic_day};

#[test]
fn test_settings_persistence() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let service = SettingsService::new(dir.path().join("nested").join("agenda.toml"));

    // Defaults until something is saved
    let mut settings = service.load().expect("Failed to load settings");
    assert_eq!(settings, AgendaSettings::default());

    // Evening clinic with half-hour slots, cancelled visits still blocking
    settings.grid = GridConfig::new(13, 22, 30).unwrap().with_scale(90.0, 30.0);
    settings.policy = SchedulingPolicy {
        cancelled_blocks_slots: true,
    };
    service.save(&settings).expect("Failed to save settings");

    let loaded = service.load().expect("Failed to reload settings");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.grid.window_minutes(), 540);
}

#[test]
fn test_loaded_settings_drive_the_agenda() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("agenda.toml");
    std::fs::write(&path, "[grid]\nstart_hour = 8\nend_hour = 12\n\n[policy]\ncancelled_blocks_slots = true\n")
        .unwrap();

    let settings = SettingsService::new(&path).load().unwrap();
    assert_eq!(settings.grid.slot_minutes, 15);

    let agenda = Agenda::new(settings).unwrap().with_snapshot(busy_morning(), Vec::new());
    // Cancelled 11:00-12:00 now blocks, so three conflicts
    assert_eq!(agenda.conflicts_for(clinic_day()).len(), 3);
    // 45 + 30 + 30 + 30 + 60 + 30 minutes of a 240 minute window
    assert_eq!(agenda.occupancy_rate(clinic_day(), None), 94);
}

#[test]
fn test_snapshot_json_uses_defaults() {
    let json = r#"[
        {
            "id": "apt-1",
            "start": "2025-03-10T09:00:00",
            "end": "2025-03-10T09:30:00",
            "resources": { "professional": "dr-ana" }
        }
    ]"#;
    let events: Vec<Event> = serde_json::from_str(json).unwrap();
    assert_eq!(events[0].duration_minutes(), 30);
    assert!(events[0].validate().is_ok());
    assert_eq!(events[0].resources.professional, Some("dr-ana".into()));
    assert!(events[0].resources.room.is_none());
}

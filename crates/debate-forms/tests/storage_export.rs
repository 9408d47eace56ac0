/// Storage gateway round trips and CSV / JSON export of stored records
mod common;

use common::{init_tracing, instant, submission};
use debate_forms::export::{to_csv, to_json};
use debate_forms::{
    Config, KeyValueStore, MemoryStore, RegistrationRecord, StorageError, StorageGateway,
};
use pretty_assertions::assert_eq;

fn gateway() -> StorageGateway<MemoryStore> {
    init_tracing();
    StorageGateway::new(Some(MemoryStore::new()), &Config::default())
}

#[test]
fn test_save_then_get_all_round_trips() {
    let mut gateway = gateway();
    let mut original = submission("Asha", instant(1_700_000_000_000));
    original.motivation = Some("Debate taught me to listen before I answer.".to_string());
    original.newsletter = true;

    let id = gateway.save(&original).unwrap();

    let key = format!("registration_{}", id);
    assert!(gateway.store().unwrap().get_item(&key).unwrap().is_some());

    let records = gateway.get_all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].registration_id, id);
    assert_eq!(records[0].submission, original);
}

#[test]
fn test_stored_value_omits_identifier() {
    let mut gateway = gateway();
    let id = gateway.save(&submission("Asha", instant(1_700_000_000_000))).unwrap();

    let raw = gateway
        .store()
        .unwrap()
        .get_item(&gateway.key_for(&id))
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert!(value.get("registrationId").is_none());
    assert_eq!(value["fullName"], "Asha");
    assert_eq!(value["teamPreference"], "Solo");
    assert_eq!(value["motivation"], serde_json::Value::Null);
}

#[test]
fn test_get_all_sorts_newest_first() {
    let mut gateway = gateway();
    gateway.save(&submission("Early", instant(1_700_000_000_000))).unwrap();
    gateway.save(&submission("Late", instant(1_700_000_900_000))).unwrap();
    gateway.save(&submission("Middle", instant(1_700_000_500_000))).unwrap();

    let names: Vec<String> = gateway
        .get_all()
        .into_iter()
        .map(|record| record.submission.full_name)
        .collect();
    assert_eq!(names, vec!["Late", "Middle", "Early"]);
}

#[test]
fn test_identifiers_stay_unique_within_a_millisecond() {
    let mut gateway = gateway();
    let at = instant(1_700_000_000_000);

    let first = gateway.save(&submission("Asha", at)).unwrap();
    let second = gateway.save(&submission("Ravi", at)).unwrap();

    assert_ne!(first, second);
    assert_eq!(first.as_str(), "MIT-DB-LOYW3V28");
    assert_eq!(second.as_str(), "MIT-DB-LOYW3V29");
    assert_eq!(gateway.count(), 2);
}

#[test]
fn test_corrupt_and_foreign_entries_are_skipped() {
    let mut store = MemoryStore::new();
    store.set_item("registration_MIT-DB-BROKEN", "{not json").unwrap();
    store.set_item("registration_MIT-DB-EMPTY", "").unwrap();
    store.set_item("theme", "dark").unwrap();

    let mut gateway = StorageGateway::new(Some(store), &Config::default());
    let id = gateway.save(&submission("Asha", instant(1_700_000_000_000))).unwrap();

    let records = gateway.get_all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].registration_id, id);
}

#[test]
fn test_records_written_by_the_legacy_page_are_readable() {
    let legacy = r#"{
        "fullName": "Meera Iyer",
        "email": "meera@example.edu",
        "phone": "+91 91234 56789",
        "rollNumber": "20EE011",
        "batch": "2020",
        "branch": "EE",
        "semester": "8",
        "experience": "Advanced",
        "interests": ["British Parliamentary"],
        "motivation": "",
        "teamPreference": "WithPartner",
        "partnerName": "Kiran",
        "preferredRole": "Whip",
        "achievements": "",
        "specialRequirements": "",
        "newsletter": false,
        "timestamp": "2024-02-10T09:30:00.123Z"
    }"#;

    let mut store = MemoryStore::new();
    store.set_item("registration_MIT-DB-LSFQ2K9R", legacy).unwrap();
    let gateway = StorageGateway::new(Some(store), &Config::default());

    let records = gateway.get_all();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].registration_id.as_str(), "MIT-DB-LSFQ2K9R");
    assert_eq!(records[0].submission.partner_name.as_deref(), Some("Kiran"));
}

#[test]
fn test_unavailable_store() {
    init_tracing();
    let mut gateway: StorageGateway<MemoryStore> = StorageGateway::new(None, &Config::default());

    assert!(!gateway.is_available());
    assert!(matches!(
        gateway.save(&submission("Asha", instant(1_700_000_000_000))),
        Err(StorageError::Unavailable)
    ));
    assert!(gateway.get_all().is_empty());
    assert_eq!(gateway.count(), 0);
}

#[test]
fn test_clear_removes_only_registrations() {
    let mut store = MemoryStore::new();
    store.set_item("theme", "dark").unwrap();
    let mut gateway = StorageGateway::new(Some(store), &Config::default());
    gateway.save(&submission("Asha", instant(1_700_000_000_000))).unwrap();
    gateway.save(&submission("Ravi", instant(1_700_000_000_001))).unwrap();

    assert_eq!(gateway.clear().unwrap(), 2);
    assert_eq!(gateway.count(), 0);
    assert_eq!(gateway.store().unwrap().len(), 1);
}

#[test]
fn test_csv_export_of_stored_records() {
    let mut gateway = gateway();
    let mut asha = submission("Asha", instant(1_700_000_000_000));
    asha.special_requirements = Some("Needs a \"quiet\" room".to_string());
    let id = gateway.save(&asha).unwrap();

    let csv = to_csv(&gateway.get_all()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines[0],
        "\"fullName\",\"email\",\"phone\",\"rollNumber\",\"batch\",\"branch\",\"semester\",\
         \"experience\",\"interests\",\"motivation\",\"teamPreference\",\"partnerName\",\
         \"preferredRole\",\"achievements\",\"specialRequirements\",\"newsletter\",\
         \"timestamp\",\"registrationId\""
    );
    assert!(lines[1].contains("\"Policy; Parli\""));
    assert!(lines[1].contains("\"Needs a \"\"quiet\"\" room\""));
    assert!(lines[1].ends_with(&format!(",\"{}\"", id)));
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_json_export_appends_identifier() {
    let mut gateway = gateway();
    let id = gateway.save(&submission("Asha", instant(1_700_000_000_000))).unwrap();

    let json = to_json(&gateway.get_all()).unwrap();
    assert!(json.starts_with("[\n  {\n    \"fullName\": \"Asha\""));
    assert!(json.contains(&format!("\"registrationId\": \"{}\"", id)));

    let parsed: Vec<RegistrationRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, gateway.get_all());
}

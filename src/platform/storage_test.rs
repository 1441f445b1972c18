use super::*;

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Prefs {
    theme: String,
}

#[test]
fn memory_store_round_trips_and_removes() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set("theme", "dark").unwrap();
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
    store.remove("theme");
    assert_eq!(store.get("theme"), None);
}

#[test]
fn load_json_reads_saved_value() {
    let store = MemoryStore::new();
    save_json(&store, "prefs", &Prefs { theme: "dark".to_owned() }).unwrap();
    assert_eq!(load_json::<Prefs>(&store, "prefs"), Some(Prefs { theme: "dark".to_owned() }));
}

#[test]
fn load_json_treats_garbage_as_absent() {
    let store = MemoryStore::new();
    store.set("prefs", "{not json").unwrap();
    assert_eq!(load_json::<Prefs>(&store, "prefs"), None);
}

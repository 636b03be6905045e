use super::*;

fn entry(name: &str, lat: f64, lng: f64) -> PlaceEntry {
    PlaceEntry {
        name: name.to_string(),
        lat: Some(lat),
        lng: Some(lng),
        formatted_address: None,
    }
}

#[test]
fn test_unresolved_record() {
    let record = PlaceRecord::unresolved("Nowhere Diner");
    assert_eq!(record.name, "Nowhere Diner");
    assert!(record.lat.is_none());
    assert!(record.lng.is_none());
    assert!(record.formatted_address.is_none());
    assert!(!record.is_resolved());
}

#[test]
fn test_record_serializes_nulls() {
    let json = serde_json::to_value(PlaceRecord::unresolved("X")).unwrap();
    assert_eq!(json["name"], "X");
    assert!(json["place_id"].is_null());
    assert!(json["lat"].is_null());
}

#[test]
fn test_insert_keeps_insertion_order() {
    let mut map = PlaceMap::new();
    map.insert("p2", entry("B", 3.0, 4.0));
    map.insert("p1", entry("A", 1.0, 2.0));
    let ids: Vec<&str> = map.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["p2", "p1"]);
}

#[test]
fn test_insert_replaces_in_place() {
    let mut map = PlaceMap::new();
    map.insert("p1", entry("A", 1.0, 2.0));
    map.insert("p2", entry("B", 3.0, 4.0));
    map.insert("p1", entry("A2", 5.0, 6.0));

    assert_eq!(map.len(), 2);
    let first = map.iter().next().unwrap();
    assert_eq!(first.0, "p1");
    assert_eq!(first.1.name, "A2");
}

#[test]
fn test_serde_preserves_order() {
    let json = r#"{"zeta":{"name":"Z","lat":1.0,"lng":2.0},"alpha":{"name":"A","lat":3.0,"lng":4.0,"formatted_address":"1 Main St"}}"#;
    let map: PlaceMap = serde_json::from_str(json).unwrap();
    let ids: Vec<&str> = map.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
    assert_eq!(map.get("alpha").unwrap().formatted_address.as_deref(), Some("1 Main St"));

    let back = serde_json::to_string(&map).unwrap();
    assert!(back.find("zeta").unwrap() < back.find("alpha").unwrap());
}

#[test]
fn test_empty_map() {
    let map = PlaceMap::new();
    assert!(map.is_empty());
    assert_eq!(serde_json::to_string(&map).unwrap(), "{}");
}

use super::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, headers, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn resolver(server: &MockServer) -> GooglePlacesResolver {
    GooglePlacesResolver::with_base_url("test-key", server.uri(), SearchSettings::default()).unwrap()
}

fn candidate_body() -> serde_json::Value {
    json!({
        "places": [
            {
                "id": "ChIJ-bunsen",
                "formattedAddress": "36 Wexford St, Dublin 2, Ireland",
                "location": {"latitude": 53.3361, "longitude": -6.2651}
            },
            {
                "id": "ChIJ-other",
                "formattedAddress": "Somewhere else",
                "location": {"latitude": 1.0, "longitude": 1.0}
            }
        ]
    })
}

#[test]
fn test_blank_key_rejected() {
    let result = GooglePlacesResolver::new("  ", SearchSettings::default());
    assert!(matches!(result, Err(PlaceError::MissingApiKey)));
}

#[test]
fn test_resolver_id() {
    let resolver = GooglePlacesResolver::new("key", SearchSettings::default()).unwrap();
    assert_eq!(resolver.id(), "google-places");
}

#[test]
fn test_details_url_encodes_id() {
    let resolver =
        GooglePlacesResolver::with_base_url("key", "http://localhost:1234/", SearchSettings::default())
            .unwrap();
    let url = resolver.details_url("abc/def").unwrap();
    assert_eq!(url.as_str(), "http://localhost:1234/v1/places/abc%2Fdef?languageCode=en");
}

#[test]
fn test_merge_prefers_details_per_field() {
    let candidate = ApiPlace {
        id: Some("cand".to_string()),
        formatted_address: Some("Candidate St".to_string()),
        location: Some(crate::api::ApiLocation {
            latitude: Some(1.0),
            longitude: Some(2.0),
        }),
    };
    let details = ApiPlace {
        id: Some("det".to_string()),
        formatted_address: None,
        location: Some(crate::api::ApiLocation {
            latitude: Some(3.0),
            longitude: None,
        }),
    };

    let record = merge_place("Cafe", &candidate, Some(&details));
    assert_eq!(record.place_id.as_deref(), Some("det"));
    assert_eq!(record.formatted_address.as_deref(), Some("Candidate St"));
    assert_eq!(record.lat, Some(3.0));
    assert_eq!(record.lng, Some(2.0));

    let fallback = merge_place("Cafe", &candidate, None);
    assert_eq!(fallback.place_id.as_deref(), Some("cand"));
    assert_eq!(fallback.lat, Some(1.0));
}

#[tokio::test]
async fn test_resolve_search_then_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(headers("X-Goog-FieldMask", SEARCH_FIELD_MASK.split(',').collect()))
        .and(body_partial_json(json!({
            "textQuery": "Bunsen",
            "regionCode": "IE",
            "includedType": "restaurant",
            "locationBias": {"circle": {"radius": 5000.0}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/places/ChIJ-bunsen"))
        .and(query_param("languageCode", "en"))
        .and(headers("X-Goog-FieldMask", DETAILS_FIELD_MASK.split(',').collect()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "ChIJ-bunsen",
            "formattedAddress": "36 Wexford Street, Dublin 2, D02 HX47, Ireland",
            "location": {"latitude": 53.33612, "longitude": -6.26513}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = resolver(&server).resolve("Bunsen").await.unwrap();
    assert_eq!(record.name, "Bunsen");
    assert_eq!(record.place_id.as_deref(), Some("ChIJ-bunsen"));
    assert_eq!(
        record.formatted_address.as_deref(),
        Some("36 Wexford Street, Dublin 2, D02 HX47, Ireland")
    );
    assert_eq!(record.lat, Some(53.33612));
    assert_eq!(record.lng, Some(-6.26513));
}

#[tokio::test]
async fn test_details_failure_falls_back_to_candidate() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/places/ChIJ-bunsen"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let record = resolver(&server).resolve("Bunsen").await.unwrap();
    assert_eq!(record.place_id.as_deref(), Some("ChIJ-bunsen"));
    assert_eq!(record.formatted_address.as_deref(), Some("36 Wexford St, Dublin 2, Ireland"));
    assert_eq!(record.lat, Some(53.3361));
}

#[tokio::test]
async fn test_search_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let err = resolver(&server).resolve("Bunsen").await.unwrap_err();
    match err {
        PlaceError::ApiError { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("PERMISSION_DENIED"));
        }
        other => panic!("Expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_without_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = resolver(&server).resolve("Nowhere Diner").await.unwrap_err();
    assert!(matches!(err, PlaceError::NoCandidate(name) if name == "Nowhere Diner"));
}

#[tokio::test]
async fn test_network_error() {
    let resolver =
        GooglePlacesResolver::with_base_url("key", "http://127.0.0.1:1", SearchSettings::default())
            .unwrap();
    let err = resolver.resolve("Bunsen").await.unwrap_err();
    assert!(matches!(err, PlaceError::Network(_)));
}

use nasa_explorer::domain::{Camera, MediaFilter, Rover};
use nasa_explorer::hooks::{
    apod_hook, epic_hook, mars_photos_hook, neo_hook, search_hook, ClientError,
};
use nasa_explorer::services::{MarsPhotosQuery, SearchQuery};
use nasa_explorer::views::{NeoSummary, ViewState};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

fn photos(sol: u32, count: u64) -> serde_json::Value {
    let photos: Vec<_> = (0..count)
        .map(|id| {
            json!({
                "id": id,
                "sol": sol,
                "img_src": format!("https://mars.nasa.gov/{sol}/{id}.jpg"),
                "camera": { "name": "MAST", "full_name": "Mast Camera" },
                "rover": { "name": "Curiosity" }
            })
        })
        .collect();
    json!({ "photos": photos })
}

#[tokio::test]
async fn apod_hook_loads_record() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "date": "2024-01-15",
            "title": "Moonrise",
            "explanation": "A moon rising.",
            "url": "https://www.youtube.com/embed/x",
            "thumbnail_url": "https://img.youtube.com/x.jpg",
            "media_type": "video"
        })))
        .mount(&app.mock_server)
        .await;

    let hook = apod_hook(app.facade_client());
    assert!(hook.mount().await);

    let state = hook.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    let record = state.data.expect("apod loaded");
    assert_eq!(record.title, "Moonrise");
}

#[tokio::test]
async fn hook_error_carries_envelope_message() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.mock_server)
        .await;

    let hook = neo_hook(app.facade_client());
    hook.mount().await;

    let state = hook.state();
    match ViewState::of(&state) {
        ViewState::Failed { message } => assert!(message.contains("503"), "{message}"),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn neo_hook_feeds_summary() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/neo/rest/v1/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "element_count": 2,
            "near_earth_objects": {
                "2024-01-01": [
                    {
                        "id": "1", "name": "(2024 AA)",
                        "estimated_diameter": { "kilometers": { "estimated_diameter_min": 0.1, "estimated_diameter_max": 0.2 } },
                        "is_potentially_hazardous_asteroid": true,
                        "close_approach_data": [{
                            "close_approach_date": "2024-01-01",
                            "relative_velocity": { "kilometers_per_hour": "50000.1" },
                            "miss_distance": { "kilometers": "7000000.5" },
                            "orbiting_body": "Earth"
                        }]
                    },
                    {
                        "id": "2", "name": "(2024 AB)",
                        "estimated_diameter": { "kilometers": { "estimated_diameter_min": 0.01, "estimated_diameter_max": 0.02 } },
                        "is_potentially_hazardous_asteroid": false
                    }
                ]
            }
        })))
        .mount(&app.mock_server)
        .await;

    let hook = neo_hook(app.facade_client());
    hook.mount().await;

    let feed = hook.state().data.expect("feed loaded");
    let summary = NeoSummary::from_feed(&feed);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.hazardous, 1);
    assert_eq!(summary.safe, 1);
}

#[tokio::test]
async fn epic_empty_result_surfaces_as_error() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/EPIC/api/natural/date/2019/01/01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.mock_server)
        .await;

    let client = app.facade_client();
    let err = client
        .epic_images(Some("2019-01-01"))
        .await
        .expect_err("empty EPIC day must fail");
    assert!(matches!(err, ClientError::NoImages(_)));
    assert_eq!(err.to_string(), "No EPIC images available for date 2019-01-01");

    let hook = epic_hook(client, Some("2019-01-01".to_string()));
    hook.mount().await;
    let state = hook.state();
    assert!(state.data.is_none());
    assert_eq!(
        state.error.as_deref(),
        Some("No EPIC images available for date 2019-01-01")
    );
}

#[tokio::test]
async fn blank_search_is_not_sent() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mock_server)
        .await;

    let hook = search_hook(
        app.facade_client(),
        SearchQuery {
            text: "  ".to_string(),
            media_type: MediaFilter::All,
            page: 1,
            page_size: 20,
        },
    );
    assert!(!hook.mount().await);
    let state = hook.state();
    assert!(state.error.is_none());
    assert!(!state.loading);
    assert!(state.data.is_none());
}

#[tokio::test]
async fn clearing_search_text_keeps_previous_results() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "nebula"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": {
                "items": [{
                    "href": "https://images-assets.nasa.gov/image/PIA2/collection.json",
                    "data": [{ "title": "Crab Nebula", "nasa_id": "PIA2", "media_type": "image" }],
                    "links": [{ "href": "https://images-assets.nasa.gov/thumb2.jpg", "rel": "preview" }]
                }],
                "metadata": { "total_hits": 1 }
            }
        })))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let query = SearchQuery {
        text: "nebula".to_string(),
        media_type: MediaFilter::All,
        page: 1,
        page_size: 20,
    };
    let hook = search_hook(app.facade_client(), query.clone());
    assert!(hook.mount().await);

    let cleared = SearchQuery {
        text: String::new(),
        ..query
    };
    assert!(!hook.set_params(cleared.clone()).await);
    assert_eq!(hook.params(), cleared);

    let state = hook.state();
    assert!(!state.loading);
    let collection = state.data.flatten().expect("previous results kept");
    assert_eq!(collection.metadata.total_hits, 1);
    assert_eq!(collection.items.len(), 1);
}

#[tokio::test]
async fn unchanged_params_do_not_refetch() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photos(1000, 3)))
        .expect(1)
        .mount(&app.mock_server)
        .await;

    let query = MarsPhotosQuery {
        rover: Rover::Curiosity,
        sol: 1000,
        camera: Camera::All,
    };
    let hook = mars_photos_hook(app.facade_client(), query);
    hook.mount().await;
    assert!(!hook.set_params(query).await);
    assert_eq!(hook.state().data.map(|p| p.len()), Some(3));
}

#[tokio::test]
async fn latest_params_win_over_slow_earlier_response() {
    let app = spawn_app().await;

    // the first sol answers slowly; the second answers immediately
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .and(query_param("sol", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(photos(1, 2))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .and(query_param("sol", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photos(2, 5)))
        .mount(&app.mock_server)
        .await;

    let hook = mars_photos_hook(
        app.facade_client(),
        MarsPhotosQuery {
            rover: Rover::Curiosity,
            sol: 0,
            camera: Camera::All,
        },
    );

    let slow = hook.set_params(MarsPhotosQuery {
        rover: Rover::Curiosity,
        sol: 1,
        camera: Camera::All,
    });
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        hook.set_params(MarsPhotosQuery {
            rover: Rover::Curiosity,
            sol: 2,
            camera: Camera::All,
        })
        .await
    };
    let (slow_applied, fast_applied) = tokio::join!(slow, fast);

    assert!(!slow_applied, "superseded response must be discarded");
    assert!(fast_applied);

    let state = hook.state();
    assert!(!state.loading);
    let photos = state.data.expect("photos loaded");
    assert_eq!(photos.len(), 5);
    assert!(photos.iter().all(|p| p.sol == 2));
    assert_eq!(hook.params().sol, 2);
}

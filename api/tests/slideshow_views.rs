mod shared;

use api::{
    SLIDESHOWS, Slideshow, SlideshowCreate, SlideshowListParams, SlideshowsByCatParams,
    SlideshowsSearchParams,
};
use http::Method;
use serde_json::{Value, json};
use shared::{
    setup::{app, url},
    stub::StubRemote,
};
use store::RecordId;

fn slideshow_json(id: RecordId, cat_id: RecordId, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "image_urls": ["https://cdn.test/1.jpg"],
        "cat_id": cat_id,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z",
    })
}

#[tokio::test]
async fn list_mirrors_slideshows_into_the_store() {
    let stub = StubRemote::new();
    stub.respond(
        Method::GET,
        &url("slideshows"),
        Ok(json!([
            slideshow_json(1, 1, "day at the beach"),
            slideshow_json(2, 1, "nap time")
        ])),
    );
    let app = app(&stub);

    let mut slideshows = app.list_slideshows(&SlideshowListParams::default()).unwrap();
    assert_eq!(slideshows.settled().await.unwrap().len(), 2);

    assert_eq!(app.store().count(SLIDESHOWS), 2);
    assert_eq!(
        app.store().get::<Slideshow>(SLIDESHOWS, 2).unwrap().title,
        "nap time"
    );
}

#[tokio::test]
async fn create_refreshes_the_list_but_not_the_by_cat_view() {
    let stub = StubRemote::new();
    stub.respond(
        Method::GET,
        &url("slideshows"),
        Ok(json!([slideshow_json(1, 1, "day at the beach")])),
    );
    stub.respond(
        Method::GET,
        &url("slideshows"),
        Ok(json!([
            slideshow_json(1, 1, "day at the beach"),
            slideshow_json(2, 2, "zoomies")
        ])),
    );
    stub.respond(
        Method::GET,
        &url("slideshows/cat/1"),
        Ok(json!([slideshow_json(1, 1, "day at the beach")])),
    );
    stub.respond(
        Method::POST,
        &url("slideshows"),
        Ok(slideshow_json(2, 2, "zoomies")),
    );
    let app = app(&stub);

    let mut all = app.list_slideshows(&SlideshowListParams::default()).unwrap();
    all.settled().await.unwrap();

    let mut for_cat_1 = app
        .slideshows_by_cat(&SlideshowsByCatParams {
            cat_id: 1,
            skip: None,
            limit: None,
        })
        .unwrap();
    for_cat_1.settled().await.unwrap();

    app.create_slideshow(&SlideshowCreate {
        title: "zoomies".to_string(),
        description: None,
        image_urls: vec!["https://cdn.test/2.jpg".to_string()],
        cat_id: 2,
    })
    .await
    .unwrap();

    // only the list carries the slideshows:list tag
    assert_eq!(all.settled().await.unwrap().len(), 2);
    assert_eq!(stub.calls_to(Method::GET, &url("slideshows")), 2);
    assert_eq!(stub.calls_to(Method::GET, &url("slideshows/cat/1")), 1);
}

#[tokio::test]
async fn searches_are_cached_per_term() {
    let stub = StubRemote::new();
    stub.respond(
        Method::GET,
        &url("slideshows/search/beach"),
        Ok(json!([slideshow_json(1, 1, "day at the beach")])),
    );
    stub.respond(Method::GET, &url("slideshows/search/nap"), Ok(json!([])));
    let app = app(&stub);

    let beach_params = SlideshowsSearchParams {
        search_term: "beach".to_string(),
        skip: None,
        limit: None,
    };

    let mut beach = app.search_slideshows(&beach_params).unwrap();
    assert_eq!(beach.settled().await.unwrap().len(), 1);

    let mut nap = app
        .search_slideshows(&SlideshowsSearchParams {
            search_term: "nap".to_string(),
            skip: None,
            limit: None,
        })
        .unwrap();
    assert!(nap.settled().await.unwrap().is_empty());

    // repeating a search is answered from cache
    let mut beach_again = app.search_slideshows(&beach_params).unwrap();
    assert_eq!(beach_again.settled().await.unwrap().len(), 1);
    assert_eq!(stub.calls_to(Method::GET, &url("slideshows/search/beach")), 1);
}

#[tokio::test]
async fn delete_drops_the_slideshow_immediately() {
    let stub = StubRemote::new();
    stub.respond(
        Method::GET,
        &url("slideshows"),
        Ok(json!([slideshow_json(1, 1, "day at the beach")])),
    );
    stub.respond(Method::GET, &url("slideshows"), Ok(json!([])));
    stub.respond(Method::DELETE, &url("slideshows/1"), Ok(Value::Null));
    let app = app(&stub);

    let mut slideshows = app.list_slideshows(&SlideshowListParams::default()).unwrap();
    slideshows.settled().await.unwrap();

    app.delete_slideshow(1).await.unwrap();

    assert_eq!(app.store().get::<Slideshow>(SLIDESHOWS, 1), None);
    assert!(slideshows.settled().await.unwrap().is_empty());
}

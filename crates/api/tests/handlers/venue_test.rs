use axum::http::{header::SET_COOKIE, StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use showbill_core::store::BookingStore;

use crate::test_utils::{flash, location, names, pairs, TestContext};

fn venue_fields<'a>(name: &'a str, genres: &[&'a str]) -> Vec<(String, String)> {
    let mut fields = vec![
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("website_link", "https://www.themusicalhop.com"),
        ("seeking_talent", "y"),
        ("seeking_description", "Looking for local artists"),
    ];
    fields.extend(genres.iter().map(|genre| ("genres", *genre)));
    pairs(&fields)
}

#[tokio::test]
async fn test_list_venues_groups_by_area_with_upcoming_counts() {
    let ctx = TestContext::new();
    let hop = ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    let dueling = ctx.venue("The Dueling Pianos Bar", "New York", "NY").await;
    let park = ctx.venue("Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = ctx.artist("Guns N Petals").await;
    ctx.show(hop.id, artist.id, 3).await;
    ctx.show(hop.id, artist.id, -3).await;
    ctx.show(park.id, artist.id, 10).await;

    let response = ctx.server.get("/venues").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let page: Value = response.json();
    assert_eq!(
        page["areas"],
        json!([
            {
                "city": "San Francisco",
                "state": "CA",
                "venues": [
                    {"id": hop.id, "name": "The Musical Hop", "num_upcoming_shows": 1},
                    {"id": park.id, "name": "Park Square Live Music & Coffee", "num_upcoming_shows": 1},
                ],
            },
            {
                "city": "New York",
                "state": "NY",
                "venues": [
                    {"id": dueling.id, "name": "The Dueling Pianos Bar", "num_upcoming_shows": 0},
                ],
            },
        ])
    );
}

#[tokio::test]
async fn test_empty_listing_renders_empty_page() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/venues").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["areas"], json!([]));
}

#[tokio::test]
async fn test_search_venues_ignores_case() {
    let ctx = TestContext::new();
    ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    ctx.venue("The Dueling Pianos Bar", "New York", "NY").await;
    ctx.venue("Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let response = ctx
        .server
        .post("/venues/search")
        .form(&pairs(&[("search_term", "music")]))
        .await;

    let page: Value = response.json();
    assert_eq!(page["search_term"], "music");
    assert_eq!(page["results"]["count"], 2);
    assert_eq!(
        names(&page["results"]["data"]),
        vec!["The Musical Hop", "Park Square Live Music & Coffee"]
    );
}

#[tokio::test]
async fn test_search_wildcards_are_literal() {
    let ctx = TestContext::new();
    ctx.venue("The Musical Hop", "San Francisco", "CA").await;

    for term in ["%", "_"] {
        let response = ctx
            .server
            .post("/venues/search")
            .form(&pairs(&[("search_term", term)]))
            .await;

        assert_eq!(response.json::<Value>()["results"]["count"], 0, "term {term}");
    }

    let response = ctx.server.post("/venues/search").form(&pairs(&[])).await;
    assert_eq!(response.json::<Value>()["results"]["count"], 1);
}

#[tokio::test]
async fn test_search_term_is_matched_as_given() {
    let ctx = TestContext::new();
    ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    ctx.venue("Hopscotch", "Oakland", "CA").await;

    let response = ctx
        .server
        .post("/venues/search")
        .form(&pairs(&[("search_term", " ")]))
        .await;
    let page: Value = response.json();
    assert_eq!(page["search_term"], " ");
    assert_eq!(names(&page["results"]["data"]), vec!["The Musical Hop"]);

    let response = ctx
        .server
        .post("/venues/search")
        .form(&pairs(&[("search_term", "  hop")]))
        .await;
    assert_eq!(response.json::<Value>()["results"]["count"], 0);
}

#[tokio::test]
async fn test_search_without_form_body_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/venues/search")
        .json(&json!({"search_term": "hop"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["status"], 400);
}

#[tokio::test]
async fn test_show_venue_splits_past_and_upcoming() {
    let ctx = TestContext::new();
    let venue = ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    let petals = ctx.artist("Guns N Petals").await;
    let quevedo = ctx.artist("Matt Quevedo").await;
    ctx.show(venue.id, petals.id, -30).await;
    ctx.show(venue.id, quevedo.id, 7).await;
    ctx.show(venue.id, petals.id, 14).await;

    let response = ctx.server.get(&format!("/venues/{}", venue.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let detail = &response.json::<Value>()["venue"];
    assert_eq!(detail["past_shows_count"], 1);
    assert_eq!(detail["upcoming_shows_count"], 2);
    assert_eq!(detail["past_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(detail["upcoming_shows"][0]["artist_name"], "Matt Quevedo");
    assert_eq!(detail["upcoming_shows"][1]["artist_id"], petals.id);
    assert!(detail.get("website").is_some());
    assert!(detail.get("website_link").is_none());
}

#[tokio::test]
async fn test_show_unknown_venue_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/venues/999").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["status"], 404);
}

#[rstest]
#[case::word("/venues/abc")]
#[case::too_large("/venues/99999999999999999999999")]
#[case::fraction("/venues/1.5")]
#[case::edit_page("/venues/abc/edit")]
#[tokio::test]
async fn test_non_integer_venue_id_is_not_found(#[case] path: &str) {
    let ctx = TestContext::new();
    ctx.venue("The Musical Hop", "San Francisco", "CA").await;

    let response = ctx.server.get(path).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["status"], 404);
}

#[tokio::test]
async fn test_delete_non_integer_venue_id_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.delete("/venues/abc").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["status"], 404);
}

#[tokio::test]
async fn test_create_form_offers_choices() {
    let ctx = TestContext::new();

    let page: Value = ctx.server.get("/venues/create").await.json();

    assert_eq!(page["form"]["name"], "");
    assert!(page.get("editing").is_none());
    assert!(page["genre_choices"].as_array().unwrap().contains(&json!("Jazz")));
    assert!(page["state_choices"].as_array().unwrap().contains(&json!("CA")));
}

#[tokio::test]
async fn test_create_venue_lists_it_with_genres() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/venues/create")
        .form(&venue_fields("The Musical Hop", &["Jazz", "Reggae", "Jazz"]))
        .await;

    assert_eq!(location(&response), "/");
    assert_eq!(
        flash(&response).as_deref(),
        Some("Venue 'The Musical Hop' was successfully listed!")
    );

    let venue = ctx.store.get_venue(1).await.unwrap().unwrap();
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.genres, vec!["Jazz", "Reggae"]);
    assert!(venue.seeking_talent);
    assert_eq!(venue.website_link.as_deref(), Some("https://www.themusicalhop.com"));
}

#[tokio::test]
async fn test_create_venue_reuses_existing_genres() {
    let ctx = TestContext::new();

    for name in ["The Musical Hop", "Park Square Live Music & Coffee"] {
        ctx.server
            .post("/venues/create")
            .form(&venue_fields(name, &["Jazz"]))
            .await;
    }

    let genres = ctx.store.list_genres().await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Jazz");
}

#[tokio::test]
async fn test_invalid_venue_is_sent_back_to_the_form() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/venues/create")
        .form(&pairs(&[("name", "The Musical Hop"), ("state", "ZZ")]))
        .await;

    assert_eq!(location(&response), "/venues/create");
    let message = flash(&response).unwrap();
    assert!(message.contains("The Musical Hop"), "{message}");
    assert!(message.contains("city is required"), "{message}");
    assert!(message.contains("state 'ZZ' is not a valid choice"), "{message}");
    assert!(ctx.store.list_venues(chrono::Utc::now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_form_submission_is_flashed() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/venues/create")
        .json(&json!({"name": "The Musical Hop"}))
        .await;

    assert_eq!(location(&response), "/venues/create");
    let message = flash(&response).unwrap();
    assert!(message.starts_with("Venue could not be listed. "), "{message}");
    assert!(message.contains("application/x-www-form-urlencoded"), "{message}");
    assert!(ctx.store.list_venues(chrono::Utc::now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let ctx = TestContext::new();
    let response = ctx
        .server
        .post("/venues/create")
        .form(&venue_fields("The Musical Hop", &[]))
        .await;

    let landing = ctx.follow(&response).await;

    assert_eq!(landing.status_code(), StatusCode::OK);
    assert_eq!(
        landing.json::<Value>()["flash"],
        "Venue 'The Musical Hop' was successfully listed!"
    );
    let cleared = landing.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cleared.starts_with("flash=;"));
    assert!(cleared.contains("Max-Age=0"));

    let again: Value = ctx.server.get("/").await.json();
    assert!(again.get("flash").is_none());
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let ctx = TestContext::new();
    ctx.server
        .post("/venues/create")
        .form(&venue_fields("The Musical Hop", &["Jazz", "Folk"]))
        .await;

    let page: Value = ctx.server.get("/venues/1/edit").await.json();

    assert_eq!(page["form"]["name"], "The Musical Hop");
    assert_eq!(page["form"]["genres"], json!(["Folk", "Jazz"]));
    assert_eq!(page["editing"]["id"], 1);
}

#[tokio::test]
async fn test_edit_venue_replaces_genre_set() {
    let ctx = TestContext::new();
    ctx.server
        .post("/venues/create")
        .form(&venue_fields("The Musical Hop", &["Jazz", "Reggae", "Swing"]))
        .await;

    let response = ctx
        .server
        .post("/venues/1/edit")
        .form(&venue_fields("The Musical Hop", &["Folk"]))
        .await;

    assert_eq!(location(&response), "/venues/1");
    assert_eq!(flash(&response).as_deref(), Some("Venue updated successfully!"));

    let venue = ctx.store.get_venue(1).await.unwrap().unwrap();
    assert_eq!(venue.genres, vec!["Folk"]);
    assert_eq!(ctx.store.list_genres().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_invalid_edit_returns_to_edit_page() {
    let ctx = TestContext::new();
    ctx.venue("The Musical Hop", "San Francisco", "CA").await;

    let response = ctx
        .server
        .post("/venues/1/edit")
        .form(&pairs(&[("name", "The Musical Hop"), ("city", "San Francisco")]))
        .await;

    assert_eq!(location(&response), "/venues/1/edit");
    assert!(flash(&response).unwrap().starts_with("An error occurred: "));
    let venue = ctx.store.get_venue(1).await.unwrap().unwrap();
    assert_eq!(venue.address, "1015 Folsom Street");
}

#[tokio::test]
async fn test_edit_unknown_venue_is_not_found() {
    let ctx = TestContext::new();

    let form = ctx.server.get("/venues/7/edit").await;
    let submission = ctx
        .server
        .post("/venues/7/edit")
        .form(&venue_fields("Nowhere", &[]))
        .await;

    assert_eq!(form.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(submission.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let ctx = TestContext::new();
    let venue = ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    let kept = ctx.venue("Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = ctx.artist("Guns N Petals").await;
    ctx.show(venue.id, artist.id, 1).await;
    ctx.show(kept.id, artist.id, 2).await;

    let response = ctx.server.delete(&format!("/venues/{}", venue.id)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let gone = ctx.server.get(&format!("/venues/{}", venue.id)).await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);

    let shows: Value = ctx.server.get("/shows").await.json();
    assert_eq!(shows["shows"].as_array().unwrap().len(), 1);
    assert_eq!(shows["shows"][0]["venue_id"], kept.id);

    let artist_page: Value = ctx.server.get(&format!("/artists/{}", artist.id)).await.json();
    assert_eq!(artist_page["artist"]["upcoming_shows_count"], 1);
}

#[tokio::test]
async fn test_delete_unknown_venue_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.delete("/venues/42").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use showbill_core::store::BookingStore;

use crate::test_utils::{flash, location, names, pairs, TestContext};

fn artist_fields<'a>(name: &'a str, genres: &[&'a str]) -> Vec<(String, String)> {
    let mut fields = vec![
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("phone", "326-123-5000"),
        ("website_link", "https://www.gunsnpetalsband.com"),
        ("facebook_link", "https://www.facebook.com/GunsNPetals"),
        ("seeking_venue", "y"),
    ];
    fields.extend(genres.iter().map(|genre| ("genres", *genre)));
    pairs(&fields)
}

#[tokio::test]
async fn test_list_artists_is_flat() {
    let ctx = TestContext::new();
    let petals = ctx.artist("Guns N Petals").await;
    let quevedo = ctx.artist("Matt Quevedo").await;

    let page: Value = ctx.server.get("/artists").await.json();

    assert_eq!(
        page["artists"],
        json!([
            {"id": petals.id, "name": "Guns N Petals"},
            {"id": quevedo.id, "name": "Matt Quevedo"},
        ])
    );
}

#[tokio::test]
async fn test_search_artists_counts_upcoming_shows() {
    let ctx = TestContext::new();
    let venue = ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    let petals = ctx.artist("Guns N Petals").await;
    ctx.artist("Matt Quevedo").await;
    ctx.artist("The Wild Sax Band").await;
    ctx.show(venue.id, petals.id, 5).await;
    ctx.show(venue.id, petals.id, -5).await;

    let response = ctx
        .server
        .post("/artists/search")
        .form(&pairs(&[("search_term", "A")]))
        .await;

    let page: Value = response.json();
    assert_eq!(page["results"]["count"], 3);

    let response = ctx
        .server
        .post("/artists/search")
        .form(&pairs(&[("search_term", "band")]))
        .await;

    let page: Value = response.json();
    assert_eq!(names(&page["results"]["data"]), vec!["The Wild Sax Band"]);

    let response = ctx
        .server
        .post("/artists/search")
        .form(&pairs(&[("search_term", "petals")]))
        .await;

    let page: Value = response.json();
    assert_eq!(page["results"]["data"][0]["num_upcoming_shows"], 1);
}

#[tokio::test]
async fn test_show_artist_lists_venues_played() {
    let ctx = TestContext::new();
    let hop = ctx.venue("The Musical Hop", "San Francisco", "CA").await;
    let park = ctx.venue("Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = ctx.artist("Guns N Petals").await;
    ctx.show(hop.id, artist.id, -2).await;
    ctx.show(park.id, artist.id, 2).await;

    let page: Value = ctx.server.get(&format!("/artists/{}", artist.id)).await.json();

    let detail = &page["artist"];
    assert_eq!(detail["name"], "Guns N Petals");
    assert_eq!(detail["past_shows"][0]["venue_name"], "The Musical Hop");
    assert_eq!(detail["upcoming_shows"][0]["venue_id"], park.id);
    assert_eq!(detail["past_shows_count"], 1);
    assert_eq!(detail["upcoming_shows_count"], 1);
}

#[tokio::test]
async fn test_show_unknown_artist_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/artists/3").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_integer_artist_id_is_not_found() {
    let ctx = TestContext::new();
    ctx.artist("Guns N Petals").await;

    for path in ["/artists/abc", "/artists/abc/edit"] {
        let response = ctx.server.get(path).await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.json::<Value>()["status"], 404, "{path}");
    }

    let response = ctx
        .server
        .post("/artists/abc/edit")
        .form(&artist_fields("Guns N Petals", &[]))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_form_edit_returns_to_edit_page() {
    let ctx = TestContext::new();
    ctx.artist("Guns N Petals").await;

    let response = ctx
        .server
        .post("/artists/1/edit")
        .json(&json!({"name": "Guns N Roses"}))
        .await;

    assert_eq!(location(&response), "/artists/1/edit");
    assert!(flash(&response).unwrap().starts_with("An error occurred: "));
    assert_eq!(ctx.store.get_artist(1).await.unwrap().unwrap().name, "Guns N Petals");
}

#[tokio::test]
async fn test_create_artist_stores_website() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/artists/create")
        .form(&artist_fields("Guns N Petals", &["Rock n Roll"]))
        .await;

    assert_eq!(location(&response), "/");
    assert_eq!(
        flash(&response).as_deref(),
        Some("Artist Guns N Petals was successfully listed!")
    );

    let artist = ctx.store.get_artist(1).await.unwrap().unwrap();
    assert_eq!(artist.website.as_deref(), Some("https://www.gunsnpetalsband.com"));
    assert_eq!(artist.genres, vec!["Rock n Roll"]);
    assert!(artist.seeking_venue);
}

#[tokio::test]
async fn test_invalid_artist_is_sent_back_to_the_form() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/artists/create")
        .form(&pairs(&[
            ("name", "Guns N Petals"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("image_link", "not a url"),
        ]))
        .await;

    assert_eq!(location(&response), "/artists/create");
    assert!(flash(&response).unwrap().contains("image_link must be an http(s) URL"));
    assert!(ctx.store.list_artists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_artist_overwrites_fields() {
    let ctx = TestContext::new();
    ctx.server
        .post("/artists/create")
        .form(&artist_fields("Guns N Petals", &["Rock n Roll", "Jazz"]))
        .await;

    let response = ctx
        .server
        .post("/artists/1/edit")
        .form(&pairs(&[
            ("name", "Guns N Roses"),
            ("city", "Los Angeles"),
            ("state", "CA"),
        ]))
        .await;

    assert_eq!(location(&response), "/artists/1");
    assert_eq!(flash(&response).as_deref(), Some("Artist updated successfully!"));

    let artist = ctx.store.get_artist(1).await.unwrap().unwrap();
    assert_eq!(artist.name, "Guns N Roses");
    assert_eq!(artist.city, "Los Angeles");
    assert_eq!(artist.website, None);
    assert!(!artist.seeking_venue);
    assert!(artist.genres.is_empty());
}

#[tokio::test]
async fn test_edit_artist_form_exposes_website_as_link() {
    let ctx = TestContext::new();
    ctx.server
        .post("/artists/create")
        .form(&artist_fields("Guns N Petals", &[]))
        .await;

    let page: Value = ctx.server.get("/artists/1/edit").await.json();

    assert_eq!(page["form"]["website_link"], "https://www.gunsnpetalsband.com");
    assert_eq!(page["editing"]["website"], "https://www.gunsnpetalsband.com");
}

#[tokio::test]
async fn test_edit_unknown_artist_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/artists/5/edit")
        .form(&artist_fields("Nobody", &[]))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_artists_cannot_be_deleted() {
    let ctx = TestContext::new();
    ctx.artist("Guns N Petals").await;

    let response = ctx.server.delete("/artists/1").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(ctx.store.get_artist(1).await.unwrap().is_some());
}

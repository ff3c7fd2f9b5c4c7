use artfind::config::SpotifySettings;
use artfind::management::{
    ArtistFinder, Catalog, Clock, MemoryStore, SearchState, Section, TOKEN_EXPIRY_KEY, TOKEN_KEY,
};
use artfind::spotify::ApiError;
use artfind::types::SearchOutcome;
use mockito::{Matcher, Server, ServerGuard};

const NOW: i64 = 1_700_000_000_000;

struct ManualClock(i64);

impl ManualClock {
    fn new(now_ms: i64) -> Self {
        Self(now_ms)
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

const ARTIST_ID: &str = "4Z8W4fKeB5YxbusRsdQVPb";

const ARTIST_JSON: &str = r#"{
  "artists": {
    "href": "https://api.spotify.com/v1/search?query=radiohead&type=artist&offset=0&limit=1",
    "items": [{
      "external_urls": { "spotify": "https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb" },
      "followers": { "href": null, "total": 9876543 },
      "genres": ["alternative rock", "art rock"],
      "id": "4Z8W4fKeB5YxbusRsdQVPb",
      "images": [{ "height": 640, "url": "https://i.scdn.co/image/radiohead", "width": 640 }],
      "name": "Radiohead",
      "popularity": 79,
      "type": "artist",
      "uri": "spotify:artist:4Z8W4fKeB5YxbusRsdQVPb"
    }],
    "limit": 1,
    "next": null,
    "offset": 0,
    "previous": null,
    "total": 1
  }
}"#;

const EMPTY_SEARCH_JSON: &str =
    r#"{"artists":{"items":[],"limit":1,"next":null,"offset":0,"previous":null,"total":0}}"#;

const ALBUMS_JSON: &str = r#"{
  "items": [
    {
      "album_type": "album",
      "external_urls": { "spotify": "https://open.spotify.com/album/5vkqYmiPBYLaalcmjujWxK" },
      "id": "5vkqYmiPBYLaalcmjujWxK",
      "images": [],
      "name": "In Rainbows",
      "release_date": "2007-12-28",
      "release_date_precision": "day",
      "total_tracks": 10
    },
    {
      "album_type": "single",
      "external_urls": { "spotify": "https://open.spotify.com/album/1oW3v5Har9mvXnGk0x4fHm" },
      "id": "1oW3v5Har9mvXnGk0x4fHm",
      "images": [],
      "name": "Daydreaming",
      "release_date": "2016-05-06",
      "release_date_precision": "day",
      "total_tracks": 1
    }
  ],
  "limit": 10,
  "next": null,
  "offset": 0,
  "total": 2
}"#;

const TRACKS_JSON: &str = r#"{
  "tracks": [
    {
      "album": { "id": "6400dnyeDyD2mIFHfkwHXN", "name": "Pablo Honey" },
      "duration_ms": 238640,
      "external_urls": { "spotify": "https://open.spotify.com/track/70LcF31zb1H0PyJoS1Sx1r" },
      "id": "70LcF31zb1H0PyJoS1Sx1r",
      "name": "Creep",
      "popularity": 88
    }
  ]
}"#;

fn settings(server: &ServerGuard) -> SpotifySettings {
    SpotifySettings::new("client-id", "client-secret").with_base_url(&server.url())
}

fn cached_store() -> MemoryStore {
    MemoryStore::with_entries([
        (TOKEN_KEY, "cached-token".to_string()),
        (TOKEN_EXPIRY_KEY, (NOW + 60_000).to_string()),
    ])
}

fn catalog<'a>(
    server: &ServerGuard,
    store: &'a MemoryStore,
    clock: &'a ManualClock,
) -> Catalog<&'a MemoryStore, &'a ManualClock> {
    Catalog::new(settings(server), store, clock)
}

#[tokio::test]
async fn test_search_artist_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .match_header("authorization", "Bearer cached-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Sigur Rós & friends".into()),
            Matcher::UrlEncoded("type".into(), "artist".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ARTIST_JSON)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let outcome = catalog(&server, &store, &clock)
        .search_artist("Sigur Rós & friends")
        .await
        .unwrap();

    match outcome {
        SearchOutcome::Found(artist) => {
            assert_eq!(artist.id, ARTIST_ID);
            assert_eq!(artist.name, "Radiohead");
            assert_eq!(artist.genres.len(), 2);
            assert_eq!(artist.followers.map(|f| f.total), Some(9_876_543));
            assert_eq!(artist.images[0].url, "https://i.scdn.co/image/radiohead");
        }
        SearchOutcome::NotFound => panic!("expected an artist"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_artist_not_found_is_not_an_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .with_status(200)
        .with_body(EMPTY_SEARCH_JSON)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let outcome = catalog(&server, &store, &clock)
        .search_artist("zzzNoSuchArtistzzz")
        .await;

    assert!(matches!(outcome, Ok(SearchOutcome::NotFound)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .with_status(500)
        .create_async()
        .await;
    let _albums = server
        .mock("GET", Matcher::Regex(r"^/v1/artists/[^/]+/albums".to_string()))
        .with_status(404)
        .create_async()
        .await;
    let _tracks = server
        .mock(
            "GET",
            Matcher::Regex(r"^/v1/artists/[^/]+/top-tracks".to_string()),
        )
        .with_status(429)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let catalog = catalog(&server, &store, &clock);

    let err = catalog.search_artist("Radiohead").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Failed to fetch artist. (HTTP 500)");

    let err = catalog.list_albums(ARTIST_ID).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch albums. (HTTP 404)");

    let err = catalog.list_top_tracks(ARTIST_ID).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch top tracks. (HTTP 429)");
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .with_status(200)
        .with_body(r#"{"artists": "nope"}"#)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let err = catalog(&server, &store, &clock)
        .search_artist("Radiohead")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_list_albums() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            Matcher::Regex(format!(r"^/v1/artists/{}/albums", ARTIST_ID)),
        )
        .match_header("authorization", "Bearer cached-token")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("include_groups".into(), "album,single".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(ALBUMS_JSON)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let albums = catalog(&server, &store, &clock)
        .list_albums(ARTIST_ID)
        .await
        .unwrap();

    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].name, "In Rainbows");
    assert_eq!(albums[1].album_type, "single");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_top_tracks_uses_market() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            Matcher::Regex(format!(r"^/v1/artists/{}/top-tracks", ARTIST_ID)),
        )
        .match_query(Matcher::UrlEncoded("market".into(), "US".into()))
        .with_status(200)
        .with_body(TRACKS_JSON)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let tracks = catalog(&server, &store, &clock)
        .list_top_tracks(ARTIST_ID)
        .await
        .unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "Creep");
    assert_eq!(tracks[0].album.name, "Pablo Honey");
    assert_eq!(tracks[0].duration_ms, 238_640);
    assert_eq!(tracks[0].popularity, 88);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthenticated_skips_catalog_request() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/api/token")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let search = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .expect(0)
        .create_async()
        .await;

    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let err = catalog(&server, &store, &clock)
        .search_artist("Radiohead")
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated));
    token.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn test_token_fetched_before_catalog_request() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/api/token")
        .with_status(200)
        .with_body(r#"{"access_token":"fresh","token_type":"Bearer","expires_in":3600}"#)
        .expect(1)
        .create_async()
        .await;
    let search = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(ARTIST_JSON)
        .expect(2)
        .create_async()
        .await;

    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let catalog = catalog(&server, &store, &clock);

    assert!(catalog.search_artist("Radiohead").await.is_ok());
    // the second query reuses the cached token
    assert!(catalog.search_artist("Radiohead").await.is_ok());
    token.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn test_finder_blank_query_issues_no_request() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/api/token")
        .expect(0)
        .create_async()
        .await;
    let search = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let store = MemoryStore::new();
    let clock = ManualClock::new(NOW);
    let finder = ArtistFinder::new(catalog(&server, &store, &clock));

    assert!(!finder.search("").await);
    assert!(!finder.search("   ").await);
    assert_eq!(*finder.snapshot().await.search_state(), SearchState::Idle);
    token.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn test_finder_detail_views_are_mutually_exclusive() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .with_status(200)
        .with_body(ARTIST_JSON)
        .create_async()
        .await;
    let _albums = server
        .mock("GET", Matcher::Regex(r"^/v1/artists/[^/]+/albums".to_string()))
        .with_status(200)
        .with_body(ALBUMS_JSON)
        .create_async()
        .await;
    let _tracks = server
        .mock(
            "GET",
            Matcher::Regex(r"^/v1/artists/[^/]+/top-tracks".to_string()),
        )
        .with_status(200)
        .with_body(TRACKS_JSON)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let finder = ArtistFinder::new(catalog(&server, &store, &clock));

    // no artist yet
    assert!(!finder.show_albums().await);

    assert!(finder.search("Radiohead").await);
    let view = finder.snapshot().await;
    assert_eq!(view.artist().map(|a| a.name.as_str()), Some("Radiohead"));

    assert!(finder.show_albums().await);
    let view = finder.snapshot().await;
    assert_eq!(view.albums().len(), 2);
    assert!(view.top_tracks().is_empty());

    assert!(finder.show_top_tracks().await);
    let view = finder.snapshot().await;
    assert!(view.albums().is_empty());
    assert_eq!(view.top_tracks().len(), 1);
}

#[tokio::test]
async fn test_finder_surfaces_detail_failures() {
    let mut server = Server::new_async().await;
    let _search = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .with_status(200)
        .with_body(ARTIST_JSON)
        .create_async()
        .await;
    let _albums = server
        .mock("GET", Matcher::Regex(r"^/v1/artists/[^/]+/albums".to_string()))
        .with_status(503)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let finder = ArtistFinder::new(catalog(&server, &store, &clock));

    finder.search("Radiohead").await;
    finder.show_albums().await;

    let view = finder.snapshot().await;
    assert_eq!(
        *view.album_section(),
        Section::Failed("Failed to fetch albums. (HTTP 503)".to_string())
    );
}

#[tokio::test]
async fn test_finder_search_failure_and_not_found() {
    let mut server = Server::new_async().await;
    let _missing = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .match_query(Matcher::UrlEncoded("q".into(), "zzzNoSuchArtistzzz".into()))
        .with_status(200)
        .with_body(EMPTY_SEARCH_JSON)
        .create_async()
        .await;
    let _broken = server
        .mock("GET", Matcher::Regex(r"^/v1/search".to_string()))
        .match_query(Matcher::UrlEncoded("q".into(), "broken".into()))
        .with_status(502)
        .create_async()
        .await;

    let store = cached_store();
    let clock = ManualClock::new(NOW);
    let finder = ArtistFinder::new(catalog(&server, &store, &clock));

    finder.search("zzzNoSuchArtistzzz").await;
    assert_eq!(*finder.snapshot().await.search_state(), SearchState::NotFound);

    finder.search("broken").await;
    assert_eq!(
        *finder.snapshot().await.search_state(),
        SearchState::Failed("Failed to fetch artist. (HTTP 502)".to_string())
    );
}

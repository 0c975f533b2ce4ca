//! HTTP-level tests for the Kodi client against a mock JSON-RPC server.

use kodi_remote::kodi::{PlaylistKind, StartMovieError, Step};
use kodi_remote::{KodiClient, KodiConfig, KodiError};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ok_reply(result: Value) -> ResponseTemplate {
  ResponseTemplate::new(200).set_body_json(json!({"id": 1, "jsonrpc": "2.0", "result": result}))
}

fn envelope(method: &str, params: Value) -> Value {
  json!({"jsonrpc": "2.0", "method": method, "params": params, "id": 1})
}

/// Client pointed at the mock server.
fn client_for(server: &MockServer) -> KodiClient {
  let address = server.address();
  KodiClient::new(KodiConfig::new(address.ip().to_string(), address.port())).unwrap()
}

async fn mount_call(server: &MockServer, rpc_method: &str, params: Value, reply: ResponseTemplate) {
  Mock::given(method("POST"))
    .and(path("/jsonrpc"))
    .and(body_json(envelope(rpc_method, params)))
    .respond_with(reply)
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test]
async fn test_request_envelope_and_headers() {
  let server = MockServer::start().await;

  Mock::given(method("POST"))
    .and(path("/jsonrpc"))
    .and(header("content-type", "application/json"))
    .and(body_json(envelope("Playlist.GetPlaylists", json!({}))))
    .respond_with(ok_reply(json!([{"playlistid": 1, "type": "video"}])))
    .expect(1)
    .mount(&server)
    .await;

  let playlists = client_for(&server).get_playlists().await.unwrap();
  assert_eq!(playlists.len(), 1);
  assert_eq!(playlists[0].id, 1);
  assert_eq!(playlists[0].kind, PlaylistKind::Video);
}

#[tokio::test]
async fn test_empty_playlist_listing_is_an_error() {
  let server = MockServer::start().await;
  mount_call(&server, "Playlist.GetPlaylists", json!({}), ok_reply(json!([]))).await;

  let err = client_for(&server).get_playlists().await.unwrap_err();
  assert!(matches!(err, KodiError::NoPlaylists));
}

#[tokio::test]
async fn test_get_movie_library() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "VideoLibrary.GetMovies",
    json!({}),
    ok_reply(json!({
      "limits": {"start": 0, "end": 2, "total": 2},
      "movies": [
        {"movieid": 2, "label": "My Neighbor Totoro"},
        {"movieid": 493, "label": "Spirited Away"}
      ]
    })),
  )
  .await;

  let movies = client_for(&server).get_movie_library().await.unwrap();
  assert_eq!(movies.len(), 2);
  assert_eq!(movies[1].id, 493);
  assert_eq!(movies[1].label, "Spirited Away");
}

#[tokio::test]
async fn test_get_movie_details() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "VideoLibrary.GetMovieDetails",
    json!({"movieid": 2}),
    ok_reply(json!({"moviedetails": {"movieid": 2, "label": "My Neighbor Totoro"}})),
  )
  .await;

  let details = client_for(&server).get_movie_details(2).await.unwrap();
  assert_eq!(details.id, 2);
  assert_eq!(details.label, "My Neighbor Totoro");
}

#[tokio::test]
async fn test_get_playlist_items_on_empty_playlist() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "Playlist.GetItems",
    json!({"playlistid": 1}),
    ok_reply(json!({"limits": {"start": 0, "end": 0, "total": 0}})),
  )
  .await;

  let items = client_for(&server).get_playlist_items(1).await.unwrap();
  assert!(items.is_empty());
}

#[tokio::test]
async fn test_get_active_players() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "Player.GetActivePlayers",
    json!({}),
    ok_reply(json!([{"playerid": 1, "type": "video"}])),
  )
  .await;

  let players = client_for(&server).get_active_players().await.unwrap();
  assert_eq!(players.len(), 1);
  assert_eq!(players[0].kind, "video");
}

#[tokio::test]
async fn test_ack_keeps_raw_result() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "Playlist.Clear",
    json!({"playlistid": 1}),
    ok_reply(json!("Busy")),
  )
  .await;

  let ack = client_for(&server).clear_playlist(1).await.unwrap();
  assert!(!ack.is_ok());
  assert_eq!(ack.into_inner(), json!("Busy"));
}

#[tokio::test]
async fn test_rpc_error_member() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "VideoLibrary.GetMovieDetails",
    json!({"movieid": 9999}),
    ResponseTemplate::new(200).set_body_json(json!({
      "id": 1,
      "jsonrpc": "2.0",
      "error": {"code": -32602, "message": "Invalid params."}
    })),
  )
  .await;

  let err = client_for(&server).get_movie_details(9999).await.unwrap_err();
  assert!(matches!(err, KodiError::Rpc { code: -32602, .. }));
}

#[tokio::test]
async fn test_non_success_status() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/jsonrpc"))
    .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
    .mount(&server)
    .await;

  let err = client_for(&server).get_playlists().await.unwrap_err();
  match err {
    KodiError::Status { status, body } => {
      assert_eq!(status, 401);
      assert_eq!(body, "Unauthorized");
    }
    other => panic!("Expected status error, got {:?}", other),
  }
}

#[tokio::test]
async fn test_malformed_body() {
  let server = MockServer::start().await;
  Mock::given(method("POST"))
    .and(path("/jsonrpc"))
    .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
    .mount(&server)
    .await;

  let err = client_for(&server).get_movie_library().await.unwrap_err();
  assert!(matches!(err, KodiError::Json(_)));
}

#[tokio::test]
async fn test_start_movie_over_http() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "Playlist.GetPlaylists",
    json!({}),
    ok_reply(json!([
      {"playlistid": 0, "type": "audio"},
      {"playlistid": 1, "type": "video"},
      {"playlistid": 2, "type": "picture"}
    ])),
  )
  .await;
  mount_call(&server, "Playlist.Clear", json!({"playlistid": 1}), ok_reply(json!("OK"))).await;
  mount_call(
    &server,
    "Playlist.Insert",
    json!({"playlistid": 1, "position": 0, "item": {"movieid": 493}}),
    ok_reply(json!("OK")),
  )
  .await;
  mount_call(
    &server,
    "Player.Open",
    json!({"item": {"playlistid": 1, "position": 0}}),
    ok_reply(json!("OK")),
  )
  .await;

  client_for(&server).start_movie(493).await.unwrap();

  let methods: Vec<String> = server
    .received_requests()
    .await
    .unwrap()
    .iter()
    .map(|r| r.body_json::<Value>().unwrap()["method"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(
    methods,
    vec!["Playlist.GetPlaylists", "Playlist.Clear", "Playlist.Insert", "Player.Open"]
  );
}

#[tokio::test]
async fn test_start_movie_stops_on_server_error() {
  let server = MockServer::start().await;
  mount_call(
    &server,
    "Playlist.GetPlaylists",
    json!({}),
    ok_reply(json!([{"playlistid": 1, "type": "video"}])),
  )
  .await;
  mount_call(
    &server,
    "Playlist.Clear",
    json!({"playlistid": 1}),
    ResponseTemplate::new(500),
  )
  .await;

  let err = client_for(&server).start_movie(493).await.unwrap_err();
  assert!(matches!(
    err,
    StartMovieError::Transport {
      step: Step::Clear,
      source: KodiError::Status { status: 500, .. }
    }
  ));

  // Nothing beyond the clear reached the server.
  assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
  // Grab a free port and release it so nothing is listening there.
  let port = std::net::TcpListener::bind("127.0.0.1:0")
    .unwrap()
    .local_addr()
    .unwrap()
    .port();
  let client = KodiClient::new(KodiConfig::new("127.0.0.1", port)).unwrap();

  let err = client.start_movie(493).await.unwrap_err();
  assert!(matches!(
    err,
    StartMovieError::Transport {
      step: Step::Discover,
      source: KodiError::Http(_)
    }
  ));
}

//! Single binary web server: JSON API over the club's results and championship.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! CHAMPIONSHIP_SEED sets the default schedule seed; ROSTER_CSV, MATCHES_CSV and FIXTURES_CSV
//! preload the in-memory club from CSV records.

use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::fs::File;
use std::sync::RwLock;
use table_tennis_club::{
    championship_head_to_head, championship_standings, free_play_standings,
    import_free_play_matches, record_free_play_result, start_championship, storage,
    submit_fixture_result, Championship, Club, ClubError, FixtureId, FixtureStatus, PlayerId,
    SetScore, StorageError,
};

/// In-memory club. The write lock is the single writer for results and fixtures.
type AppState = Data<RwLock<Club>>;

/// Values read once at startup.
#[derive(Clone, Debug)]
struct Settings {
    host: String,
    port: u16,
    seed: u64,
    roster_csv: Option<String>,
    matches_csv: Option<String>,
    fixtures_csv: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_seed() -> u64 {
    42
}

impl Settings {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_port),
            seed: std::env::var("CHAMPIONSHIP_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_seed),
            roster_csv: std::env::var("ROSTER_CSV").ok(),
            matches_csv: std::env::var("MATCHES_CSV").ok(),
            fixtures_csv: std::env::var("FIXTURES_CSV").ok(),
        }
    }
}

/// Build the starting club from whichever CSV files are configured.
fn load_club(settings: &Settings) -> Result<Club, StorageError> {
    let mut club = match &settings.roster_csv {
        Some(path) => Club::with_roster(storage::read_roster(File::open(path)?)?),
        None => Club::new(),
    };
    if let Some(path) = &settings.matches_csv {
        let records = storage::read_matches(File::open(path)?)?;
        let kept = import_free_play_matches(&mut club, records);
        log::info!("Loaded {} free-play matches from {}", kept, path);
    }
    if let Some(path) = &settings.fixtures_csv {
        let fixtures = storage::read_fixtures(File::open(path)?)?;
        if !fixtures.is_empty() {
            let championship = Championship::from_fixtures(fixtures, settings.seed);
            log::info!(
                "Loaded championship with {} fixtures from {}",
                championship.fixtures.len(),
                path
            );
            club.championship = Some(championship);
        }
    }
    Ok(club)
}

fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn error_response(e: &ClubError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ClubError::FixtureNotFound(_) | ClubError::NoChampionship => {
            HttpResponse::NotFound().json(body)
        }
        ClubError::FixtureAlreadyPlayed(_)
        | ClubError::ChampionshipAlreadyScheduled
        | ClubError::DuplicatePlayer(_) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn csv_response(result: Result<Vec<u8>, StorageError>) -> HttpResponse {
    match result {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(bytes),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct FreePlayBody {
    player_a: PlayerId,
    player_b: PlayerId,
    sets: Vec<SetScore>,
}

#[derive(Default, Deserialize)]
struct CreateChampionshipBody {
    /// Every roster player when empty.
    #[serde(default)]
    participants: Vec<PlayerId>,
    seed: Option<u64>,
}

#[derive(Deserialize)]
struct FixtureResultBody {
    sets: Vec<SetScore>,
}

/// Path segment: fixture id (e.g. /api/championship/fixtures/{fixture_id}/result)
#[derive(Deserialize)]
struct FixturePath {
    fixture_id: FixtureId,
}

fn championship_view(c: &Championship) -> serde_json::Value {
    serde_json::json!({
        "championship": c,
        "rounds": c.round_count(),
        "progress": c.progress(),
        "to_play": c.fixtures_with_status(FixtureStatus::ToPlay),
        "done": c.fixtures_with_status(FixtureStatus::Done),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "table-tennis-club",
    })
}

/// Whole club state: roster, free-play history, championship.
#[get("/api/club")]
async fn api_get_club(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*g)
}

/// Add a roster player.
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.add_player(body.name.trim()) {
        Ok(()) => {
            log::info!("Added player {}", body.name.trim());
            HttpResponse::Ok().json(&g.roster)
        }
        Err(e) => error_response(&e),
    }
}

/// Validate and record a free-play match.
#[post("/api/free-play/matches")]
async fn api_record_free_play(state: AppState, body: Json<FreePlayBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match record_free_play_result(&mut g, &body.player_a, &body.player_b, &body.sets, now_stamp()) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

#[get("/api/free-play/standings")]
async fn api_free_play_standings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(free_play_standings(&g))
}

#[get("/api/free-play/matches.csv")]
async fn api_export_free_play(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut out = Vec::new();
    csv_response(storage::write_matches(&mut out, &g.matches).map(|()| out))
}

/// Import CSV match rows; rows that do not decode are skipped.
#[post("/api/free-play/matches/import")]
async fn api_import_free_play(state: AppState, body: String) -> HttpResponse {
    let records = match storage::read_matches(body.as_bytes()) {
        Ok(records) => records,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let imported = import_free_play_matches(&mut g, records);
    HttpResponse::Ok().json(serde_json::json!({
        "imported": imported,
        "total": g.matches.len(),
    }))
}

/// Schedule the championship (once). An empty body schedules the whole roster; a body that
/// does not parse is rejected rather than defaulted.
#[post("/api/championship")]
async fn api_create_championship(
    state: AppState,
    settings: Data<Settings>,
    body: web::Bytes,
) -> HttpResponse {
    let body: CreateChampionshipBody = if body.iter().all(u8::is_ascii_whitespace) {
        CreateChampionshipBody::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(body) => body,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(serde_json::json!({ "error": e.to_string() }))
            }
        }
    };
    let seed = body.seed.unwrap_or(settings.seed);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match start_championship(&mut g, &body.participants, seed) {
        Ok(c) => HttpResponse::Ok().json(championship_view(c)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/championship")]
async fn api_get_championship(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.championship() {
        Ok(c) => HttpResponse::Ok().json(championship_view(c)),
        Err(e) => error_response(&e),
    }
}

/// Submit the result of one fixture; a fixture takes exactly one result.
#[post("/api/championship/fixtures/{fixture_id}/result")]
async fn api_submit_fixture(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<FixtureResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match submit_fixture_result(&mut g, path.fixture_id, &body.sets, now_stamp()) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => error_response(&e),
    }
}

#[get("/api/championship/standings")]
async fn api_championship_standings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match championship_standings(&g) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => error_response(&e),
    }
}

#[get("/api/championship/head-to-head")]
async fn api_championship_head_to_head(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match championship_head_to_head(&g) {
        Ok(grid) => HttpResponse::Ok().json(grid),
        Err(e) => error_response(&e),
    }
}

#[get("/api/championship/fixtures.csv")]
async fn api_export_fixtures(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let c = match g.championship() {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let mut out = Vec::new();
    csv_response(storage::write_fixtures(&mut out, &c.fixtures).map(|()| out))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_club)
        .service(api_add_player)
        .service(api_record_free_play)
        .service(api_free_play_standings)
        .service(api_export_free_play)
        .service(api_import_free_play)
        .service(api_create_championship)
        .service(api_get_championship)
        .service(api_submit_fixture)
        .service(api_championship_standings)
        .service(api_championship_head_to_head)
        .service(api_export_fixtures);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::from_env();
    let club = match load_club(&settings) {
        Ok(club) => club,
        Err(e) => {
            log::error!("Could not load club records: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    };
    log::info!(
        "Club ready: {} players, {} free-play matches, championship: {}",
        club.roster.len(),
        club.matches.len(),
        if club.championship.is_some() { "yes" } else { "no" }
    );

    let bind = (settings.host.clone(), settings.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(club));
    let settings = Data::new(settings);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(settings.clone())
            .configure(routes)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    fn settings() -> Settings {
        Settings {
            host: default_host(),
            port: default_port(),
            seed: default_seed(),
            roster_csv: None,
            matches_csv: None,
            fixtures_csv: None,
        }
    }

    #[actix_web::test]
    async fn free_play_result_is_encoded_and_ranked() {
        let state = Data::new(RwLock::new(Club::with_roster(["A", "B"])));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(Data::new(settings()))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/free-play/matches")
            .set_json(json!({
                "player_a": "A",
                "player_b": "B",
                "sets": [{"a": 11, "b": 5}, {"a": 9, "b": 11}, {"a": 11, "b": 3}, {"a": 11, "b": 7}]
            }))
            .to_request();
        let report: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(report["record"]["winner"], "A");
        assert_eq!(report["record"]["sets"], json!([5, -9, 3, 7, null]));
        assert_eq!(report["detail"], "11-5, 9-11, 11-3, 11-7");

        let req = test::TestRequest::get().uri("/api/free-play/standings").to_request();
        let table: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(table[0]["player"], "A");
        assert_eq!(table[0]["stats"]["wins"], 1);
        assert_eq!(table[1]["stats"]["sets_won"], 1);
    }

    #[actix_web::test]
    async fn invalid_set_is_rejected() {
        let state = Data::new(RwLock::new(Club::with_roster(["A", "B"])));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(Data::new(settings()))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/free-play/matches")
            .set_json(json!({
                "player_a": "A",
                "player_b": "B",
                "sets": [{"a": 11, "b": 10}]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.read().unwrap().matches.is_empty());
    }

    #[actix_web::test]
    async fn fixture_accepts_one_result_only() {
        let state = Data::new(RwLock::new(Club::with_roster(["A", "B", "C"])));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(Data::new(settings()))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/championship")
            .set_json(json!({ "seed": 7 }))
            .to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["rounds"], 3);
        assert_eq!(view["progress"]["total"], 3);

        let result = json!({ "sets": [{"a": 11, "b": 0}, {"a": 11, "b": 4}, {"a": 11, "b": 9}] });
        let req = test::TestRequest::post()
            .uri("/api/championship/fixtures/1/result")
            .set_json(&result)
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/championship/fixtures/1/result")
            .set_json(&result)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::post()
            .uri("/api/championship")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get()
            .uri("/api/championship/fixtures.csv")
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("id,round,player_a,player_b,status"));
        assert!(text.contains(",done,"));
    }

    #[actix_web::test]
    async fn malformed_championship_request_schedules_nothing() {
        let state = Data::new(RwLock::new(Club::with_roster(["A", "B", "C", "D"])));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(Data::new(settings()))
                .configure(routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/championship")
            .set_json(json!({ "participants": "A,B", "seed": 7 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        assert!(state.read().unwrap().championship.is_none());

        let req = test::TestRequest::post()
            .uri("/api/championship")
            .set_json(json!({ "participants": ["A", "B"], "seed": 7 }))
            .to_request();
        let view: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["progress"]["total"], 1);
    }
}

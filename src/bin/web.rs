//! Single binary web server: players, match scheduling, leaderboard, and live scoring via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), SCORING_DATA_DIR (saved sessions).

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use smash_score::{
    apply_result, apply_status_update, best_match, matches_for_player, rally_log_csv, rank_of,
    rankings, upcoming, JsonFileSessionStore, League, LeagueError, MatchId, MatchResult,
    MatchStatus, NewMatch, PlayerId, PlayerProfile, PointOutcome, RallyScoringEngine, ScoringError,
    ScoringSession, Side, StatusUpdate,
};
use std::sync::RwLock;

/// League registry plus the open scoring sessions.
struct AppData {
    league: League,
    engine: RallyScoringEngine<JsonFileSessionStore>,
}

type AppState = Data<RwLock<AppData>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    username: String,
}

#[derive(Deserialize)]
struct PointBody {
    side: Side,
}

/// Path segment: player id (e.g. /api/players/{id}/rank)
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Path segment: match id (e.g. /api/scoring/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

/// What the scoring screen renders after each action.
#[derive(Serialize)]
struct ScoringView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<MatchResult>,
    session: &'a ScoringSession,
}

impl<'a> ScoringView<'a> {
    fn of(session: &'a ScoringSession) -> Self {
        Self {
            outcome: None,
            result: None,
            session,
        }
    }
}

fn error_json(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn league_error(e: LeagueError) -> HttpResponse {
    match e {
        LeagueError::MatchNotFound(_) | LeagueError::PlayerNotFound(_) => {
            HttpResponse::NotFound().json(error_json(e))
        }
        _ => HttpResponse::BadRequest().json(error_json(e)),
    }
}

fn scoring_error(e: ScoringError) -> HttpResponse {
    match e {
        ScoringError::SessionNotOpen(_) => HttpResponse::NotFound().json(error_json(e)),
        ScoringError::Store(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(error_json(e))
        }
        _ => HttpResponse::BadRequest().json(error_json(e)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "smash-score",
    })
}

/// Register a player (usernames are unique, case-insensitive).
#[post("/api/players")]
async fn api_add_player(state: AppState, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.league.add_player(&body.name, &body.username) {
        Ok(id) => HttpResponse::Ok().json(g.league.get_player(id).map(PlayerProfile::from)),
        Err(e) => league_error(e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let players: Vec<_> = g.league.players.iter().map(PlayerProfile::from).collect();
    HttpResponse::Ok().json(serde_json::json!({ "players": players }))
}

#[get("/api/players/{id}/rank")]
async fn api_player_rank(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match rank_of(&g.league, path.id) {
        Ok(rank) => HttpResponse::Ok().json(serde_json::json!({ "rank": rank })),
        Err(e) => league_error(e),
    }
}

#[get("/api/players/{id}/best-match")]
async fn api_player_best_match(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match best_match(&g.league, path.id) {
        Ok(Some(best)) => HttpResponse::Ok().json(best),
        Ok(None) => HttpResponse::Ok()
            .json(serde_json::json!({ "message": "No matches won by this player." })),
        Err(e) => league_error(e),
    }
}

#[get("/api/players/{id}/matches")]
async fn api_player_matches(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    if g.league.get_player(path.id).is_none() {
        return league_error(LeagueError::PlayerNotFound(path.id));
    }
    let matches = matches_for_player(&g.league, path.id);
    HttpResponse::Ok().json(serde_json::json!({ "matches": matches }))
}

/// Leaderboard: players by total points.
#[get("/api/rankings")]
async fn api_rankings(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    HttpResponse::Ok().json(serde_json::json!({ "rankings": rankings(&g.league) }))
}

/// Schedule a match (status Upcoming).
#[post("/api/matches")]
async fn api_add_match(state: AppState, body: Json<NewMatch>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.league.schedule_match(body.into_inner()) {
        Ok(id) => HttpResponse::Created().json(g.league.get_match(id)),
        Err(e) => league_error(e),
    }
}

/// Matches within 24h either side of now.
#[get("/api/matches/upcoming")]
async fn api_upcoming_matches(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let matches = upcoming(&g.league, chrono::Utc::now());
    HttpResponse::Ok().json(serde_json::json!({ "matches": matches }))
}

#[post("/api/matches/update-status")]
async fn api_update_match_status(state: AppState, body: Json<StatusUpdate>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match apply_status_update(&mut g.league, &body) {
        Ok(()) => HttpResponse::Ok().json(g.league.get_match(body.match_id)),
        Err(e) => league_error(e),
    }
}

/// Open the scoring session for a match, resuming saved state if there is any.
#[post("/api/scoring/{match_id}")]
async fn api_open_scoring(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let AppData { league, engine } = &mut *g;
    let record = match league.get_match(path.match_id) {
        Some(m) => m,
        None => return league_error(LeagueError::MatchNotFound(path.match_id)),
    };
    if record.status == MatchStatus::Completed {
        return league_error(LeagueError::AlreadyCompleted);
    }
    match engine.open(path.match_id, record.scoring_config()) {
        Ok(session) => HttpResponse::Ok().json(ScoringView::of(session)),
        Err(e) => scoring_error(e),
    }
}

#[get("/api/scoring/{match_id}")]
async fn api_get_scoring(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.engine.session(path.match_id) {
        Ok(session) => HttpResponse::Ok().json(ScoringView::of(session)),
        Err(e) => scoring_error(e),
    }
}

/// Leave the scoring screen; saved state is kept for later.
#[delete("/api/scoring/{match_id}")]
async fn api_close_scoring(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.engine.close(path.match_id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => scoring_error(ScoringError::SessionNotOpen(path.match_id)),
    }
}

/// Start scoring and mark the match Live. A failed status update does not undo the start.
#[post("/api/scoring/{match_id}/start")]
async fn api_start_scoring(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let AppData { league, engine } = &mut *g;
    let session = match engine.start_match(path.match_id) {
        Ok(session) => session,
        Err(e) => return scoring_error(e),
    };
    if let Err(e) = apply_status_update(league, &StatusUpdate::live(path.match_id)) {
        log::warn!("Could not mark match {} live: {}", path.match_id, e);
    }
    HttpResponse::Ok().json(ScoringView::of(session))
}

#[post("/api/scoring/{match_id}/point")]
async fn api_score_point(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<PointBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let (outcome, result) = match g.engine.score_point(path.match_id, body.side) {
        Ok(PointOutcome::Scored) => ("scored", None),
        Ok(PointOutcome::Completed(result)) => ("completed", Some(result)),
        Ok(PointOutcome::Ignored) => ("ignored", None),
        Err(e) => return scoring_error(e),
    };
    match g.engine.session(path.match_id) {
        Ok(session) => HttpResponse::Ok().json(ScoringView {
            outcome: Some(outcome),
            result,
            session,
        }),
        Err(e) => scoring_error(e),
    }
}

#[post("/api/scoring/{match_id}/undo")]
async fn api_undo_rally(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let outcome = match g.engine.undo_last_rally(path.match_id) {
        Ok(Some(_)) => "undone",
        Ok(None) => "nothing_to_undo",
        Err(e) => return scoring_error(e),
    };
    match g.engine.session(path.match_id) {
        Ok(session) => HttpResponse::Ok().json(ScoringView {
            outcome: Some(outcome),
            result: None,
            session,
        }),
        Err(e) => scoring_error(e),
    }
}

/// Record the final result and close the session. On failure the session stays open for a retry.
#[post("/api/scoring/{match_id}/submit")]
async fn api_submit_result(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let AppData { league, engine } = &mut *g;
    let submission = match engine.result_submission(path.match_id) {
        Ok(s) => s,
        Err(e) => return scoring_error(e),
    };
    if let Err(e) = apply_result(league, &submission) {
        return league_error(e);
    }
    // Result is recorded at this point; a leftover saved state is only logged.
    if let Err(e) = engine.submit(path.match_id) {
        log::warn!("Match {} recorded but scoring session not cleared: {}", path.match_id, e);
        engine.close(path.match_id);
    }
    HttpResponse::Ok().json(serde_json::json!({
        "submission": submission,
        "match": league.get_match(path.match_id),
    }))
}

#[get("/api/scoring/{match_id}/rallies.csv")]
async fn api_rallies_csv(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let session = match g.engine.session(path.match_id) {
        Ok(session) => session,
        Err(e) => return scoring_error(e),
    };
    match rally_log_csv(session.rally_log()) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "scoring_data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("SCORING_DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Saving in-progress scoring sessions under {}", data_dir);

    let state = Data::new(RwLock::new(AppData {
        league: League::new(),
        engine: RallyScoringEngine::new(JsonFileSessionStore::new(data_dir)),
    }));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_add_player)
            .service(api_list_players)
            .service(api_player_rank)
            .service(api_player_best_match)
            .service(api_player_matches)
            .service(api_rankings)
            .service(api_add_match)
            .service(api_upcoming_matches)
            .service(api_update_match_status)
            .service(api_open_scoring)
            .service(api_get_scoring)
            .service(api_close_scoring)
            .service(api_start_scoring)
            .service(api_score_point)
            .service(api_undo_rally)
            .service(api_submit_result)
            .service(api_rallies_csv)
    })
    .bind(bind)?
    .run()
    .await
}

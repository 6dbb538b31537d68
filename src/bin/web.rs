//! Single binary web server: JSON API over the ladder engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), INACTIVITY_HOURS (e.g. 12).

use actix_web::{
    get, post,
    web::{Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use swiss_ladder::{
    advance_round, parse_roster, register_teams, standings, submit_result, MatchId, Tournament,
    TournamentError, TournamentId,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Idle entries are removed by a background task.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Server settings read from the environment.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    inactivity_timeout: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let hours: u64 = std::env::var("INACTIVITY_HOURS")
            .ok()
            .and_then(|h| h.parse().ok())
            .unwrap_or(12);
        Self {
            host,
            port,
            inactivity_timeout: inactivity_timeout(hours),
        }
    }
}

/// Idle time after which a tournament is dropped. Huge values saturate instead of overflowing.
fn inactivity_timeout(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterTeamsBody {
    names: Vec<String>,
}

#[derive(Deserialize)]
struct SubmitResultBody {
    score_1: i64,
    score_2: i64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id}/result)
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_json(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn tournament_error_response(e: &TournamentError) -> HttpResponse {
    match e {
        TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(error_json(e)),
        _ => HttpResponse::BadRequest().json(error_json(e)),
    }
}

/// Run `f` against one tournament under the write lock, refreshing its activity time.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(error_json("No tournament")),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "swiss-ladder",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let response = HttpResponse::Ok().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created tournament {}", tournament.id);
    g.insert(
        tournament.id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&*t))
}

/// Register the 16 teams in seed order and pair round 1.
#[post("/api/tournaments/{id}/teams")]
async fn api_register_teams(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterTeamsBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match register_teams(t, body.names.as_slice()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => tournament_error_response(&e),
    })
}

/// Register teams from a CSV roster (one name per line).
#[post("/api/tournaments/{id}/teams/csv")]
async fn api_register_teams_csv(state: AppState, path: Path<TournamentPath>, body: Bytes) -> HttpResponse {
    let names = match parse_roster(&body[..]) {
        Ok(names) => names,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    with_tournament(&state, path.id, |t| match register_teams(t, names.as_slice()) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => tournament_error_response(&e),
    })
}

/// Matches of the current round.
#[get("/api/tournaments/{id}/matches")]
async fn api_current_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(t.current_round_matches())
    })
}

/// Submit the score of one match.
#[post("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_submit_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<SubmitResultBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match submit_result(t, path.match_id, body.score_1, body.score_2) {
            Ok(_) => HttpResponse::Ok().json(&*t),
            Err(e) => tournament_error_response(&e),
        }
    })
}

/// Move on to the next round once every match of the current one has a result.
#[post("/api/tournaments/{id}/rounds/advance")]
async fn api_advance_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match advance_round(t) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => tournament_error_response(&e),
    })
}

/// Ranked standings with fresh Buchholz scores.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(standings(t)))
}

/// Back to team registration (same tournament id).
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        t.reset();
        HttpResponse::Ok().json(&*t)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments idle past the timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_register_teams)
            .service(api_register_teams_csv)
            .service(api_current_matches)
            .service(api_submit_result)
            .service(api_advance_round)
            .service(api_standings)
            .service(api_reset)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

//! Single binary web server: JSON API for team registration and the bracket.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), ADMIN_KEY
//! (required for the state-changing tournament endpoints).

use actix_web::{
    get, post,
    web::{Data, Json, Path},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use knockout_tournament_web::{
    record_winner, reset_tournament, start_tournament, MatchId, RegistryError, TeamId,
    TeamRegistry, TournamentError, TournamentStore,
};
use serde::Deserialize;

/// Shared application state: the two stores plus the configured admin key.
struct AppState {
    registry: TeamRegistry,
    store: TournamentStore,
    admin_key: Option<String>,
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTeamBody {
    name: String,
    players: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordWinnerBody {
    winner_team_id: TeamId,
}

/// Path segment: match id (e.g. /api/matches/{match_id}/winner)
#[derive(Deserialize)]
struct MatchPath {
    match_id: MatchId,
}

/// Check the x-admin-key header against the configured key. With no key
/// configured every admin request is refused.
fn require_admin(req: &HttpRequest, state: &AppState) -> Option<HttpResponse> {
    let presented = req
        .headers()
        .get("x-admin-key")
        .and_then(|v| v.to_str().ok());
    match (state.admin_key.as_deref(), presented) {
        (Some(expected), Some(key)) if key == expected => None,
        _ => Some(HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "Unauthorized: invalid admin key"
        }))),
    }
}

fn registry_error_response(err: &RegistryError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        RegistryError::DuplicateTeamName => HttpResponse::Conflict().json(body),
        RegistryError::StorageUnavailable => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn tournament_error_response(err: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": err.to_string() });
    match err {
        TournamentError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::StorageUnavailable => HttpResponse::ServiceUnavailable().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Register a team (name + 2-5 players). Open to everyone.
#[post("/api/teams")]
async fn api_create_team(state: Data<AppState>, body: Json<CreateTeamBody>) -> HttpResponse {
    let body = body.into_inner();
    match state.registry.create(&body.name, body.players) {
        Ok(team) => HttpResponse::Ok().json(team),
        Err(e) => registry_error_response(&e),
    }
}

/// All registered teams in registration order.
#[get("/api/teams")]
async fn api_list_teams(state: Data<AppState>) -> HttpResponse {
    match state.registry.list() {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => registry_error_response(&e),
    }
}

/// Current tournament snapshot (creates the idle singleton on first access).
#[get("/api/tournament")]
async fn api_get_tournament(state: Data<AppState>) -> HttpResponse {
    match state.store.get() {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error_response(&e),
    }
}

/// Start the tournament from all registered teams (admin).
#[post("/api/tournament/start")]
async fn api_start_tournament(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    if let Some(resp) = require_admin(&req, &state) {
        return resp;
    }
    let team_ids = match state.registry.team_ids() {
        Ok(ids) => ids,
        Err(e) => return registry_error_response(&e),
    };
    let result = state
        .store
        .update(|t| start_tournament(t, &team_ids, &mut rand::thread_rng()));
    match result {
        Ok(t) => {
            log::info!("Tournament started with {} team(s)", team_ids.len());
            HttpResponse::Ok().json(t)
        }
        Err(e) => tournament_error_response(&e),
    }
}

/// Record a match winner; advances the round or crowns a champion when the
/// round completes (admin).
#[post("/api/matches/{match_id}/winner")]
async fn api_record_winner(
    req: HttpRequest,
    state: Data<AppState>,
    path: Path<MatchPath>,
    body: Json<RecordWinnerBody>,
) -> HttpResponse {
    if let Some(resp) = require_admin(&req, &state) {
        return resp;
    }
    let result = state.store.update(|t| {
        record_winner(t, path.match_id, body.winner_team_id, &mut rand::thread_rng())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => tournament_error_response(&e),
    }
}

/// Discard the bracket and go back to idle (admin).
#[post("/api/tournament/reset")]
async fn api_reset_tournament(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    if let Some(resp) = require_admin(&req, &state) {
        return resp;
    }
    let result = state.store.update(|t| {
        reset_tournament(t);
        Ok(())
    });
    match result {
        Ok(t) => {
            log::info!("Tournament reset to idle");
            HttpResponse::Ok().json(t)
        }
        Err(e) => tournament_error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let admin_key = std::env::var("ADMIN_KEY").ok().filter(|k| !k.is_empty());
    if admin_key.is_none() {
        log::warn!("ADMIN_KEY not set; admin endpoints will refuse all requests");
    }

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        registry: TeamRegistry::new(),
        store: TournamentStore::new(),
        admin_key,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_team)
            .service(api_list_teams)
            .service(api_get_tournament)
            .service(api_start_tournament)
            .service(api_record_winner)
            .service(api_reset_tournament)
    })
    .bind(bind)?
    .run()
    .await
}

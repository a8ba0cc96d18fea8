//! Single binary web server: upload a scouting export, query the per-player stats via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, MATCH_TTL_HOURS (idle matches are dropped after this long).

use actix_web::{
    get, post,
    web::{self, Data, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;
use volley_insight::{
    accumulate, normalize_str, player_stats, top_players, write_csv, MatchData, MatchInfo,
    MatchStats, StatKey, DEFAULT_TOP_LIMIT,
};

/// Unique identifier for an uploaded match.
type MatchId = Uuid;

/// Per-match entry: normalized data, its stats, and last activity time (for auto-cleanup).
struct MatchEntry {
    uploaded_at: DateTime<Utc>,
    data: MatchData,
    stats: MatchStats,
    last_activity: Instant,
}

/// In-memory state: uploaded matches by ID.
type AppState = Data<RwLock<HashMap<MatchId, MatchEntry>>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchSummary<'a> {
    id: MatchId,
    uploaded_at: DateTime<Utc>,
    match_info: Option<&'a MatchInfo>,
    rallies: usize,
    players: usize,
}

impl<'a> MatchSummary<'a> {
    fn of(id: MatchId, entry: &'a MatchEntry) -> Self {
        Self {
            id,
            uploaded_at: entry.uploaded_at,
            match_info: entry.data.match_info.as_ref(),
            rallies: entry.data.rallies.len(),
            players: entry.stats.players.len(),
        }
    }
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and player name (e.g. /api/matches/{id}/players/{name})
#[derive(Deserialize)]
struct MatchPlayerPath {
    id: MatchId,
    name: String,
}

#[derive(Deserialize)]
struct TopQuery {
    stat: String,
    limit: Option<usize>,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Run `f` on the entry for `id`, refreshing its last activity. 404 if missing.
fn with_entry(state: &AppState, id: MatchId, f: impl FnOnce(&MatchEntry) -> HttpResponse) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(entry)
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "volley-insight",
    })
}

/// Upload a raw export (JSON body). Normalizes, accumulates and stores it; returns a summary with the id.
#[post("/api/matches")]
async fn api_upload_match(state: AppState, body: String) -> HttpResponse {
    let data = match normalize_str(&body) {
        Ok(d) => d,
        Err(e) => {
            log::warn!("Rejected upload: {}", e);
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
        }
    };
    let stats = accumulate(&data.rallies);
    let id = Uuid::new_v4();
    let entry = MatchEntry {
        uploaded_at: Utc::now(),
        data,
        stats,
        last_activity: Instant::now(),
    };
    log::info!(
        "Stored match {} ({} rallies, {} players)",
        id,
        entry.data.rallies.len(),
        entry.stats.players.len()
    );
    let response = HttpResponse::Ok().json(MatchSummary::of(id, &entry));

    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(id, entry);
    response
}

/// Normalized rallies and match info.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| HttpResponse::Ok().json(&entry.data))
}

/// Full per-player stats table.
#[get("/api/matches/{id}/stats")]
async fn api_get_stats(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| HttpResponse::Ok().json(&entry.stats))
}

/// Stats table as CSV.
#[get("/api/matches/{id}/stats.csv")]
async fn api_get_stats_csv(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| {
        let mut buf = Vec::new();
        match write_csv(&entry.stats, &mut buf) {
            Ok(()) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .body(buf),
            Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() })),
        }
    })
}

/// One player's stats (404 if the name was never seen in this match).
#[get("/api/matches/{id}/players/{name}")]
async fn api_get_player(state: AppState, path: Path<MatchPlayerPath>) -> HttpResponse {
    with_entry(&state, path.id, |entry| match player_stats(&entry.stats, &path.name) {
        Some(p) => HttpResponse::Ok().json(p),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No player" })),
    })
}

/// Ranking by one stat: /api/matches/{id}/top?stat=attackEff&limit=5
#[get("/api/matches/{id}/top")]
async fn api_top_players(state: AppState, path: Path<MatchPath>, query: Query<TopQuery>) -> HttpResponse {
    let key: StatKey = match query.stat.parse() {
        Ok(k) => k,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": format!("{}", e) })),
    };
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    with_entry(&state, path.id, |entry| {
        HttpResponse::Ok().json(top_players(&entry.stats, key, limit))
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let ttl_hours: u64 = std::env::var("MATCH_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_ttl_hours);
    let inactivity_timeout = Duration::from_secs(ttl_hours.saturating_mul(3600));
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<MatchId, MatchEntry>::new()));

    // Background task: every 30 minutes, remove matches idle for longer than the TTL
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} idle match(es) (no activity for {}h)", removed, ttl_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(32 * 1024 * 1024))
            .service(api_health)
            .service(api_upload_match)
            .service(api_get_match)
            .service(api_get_stats_csv)
            .service(api_get_stats)
            .service(api_get_player)
            .service(api_top_players)
    })
    .bind(bind)?
    .run()
    .await
}

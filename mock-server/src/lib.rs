use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";
pub const DEFAULT_KEY: &str = "test-key";

const DEFAULT_LIMIT: usize = 1000;

const CODEBOOKS: &[&str] = &[
    "bris_pravni_oblici",
    "bris_registri",
    "djelatnosti_podruznica",
    "drzave",
    "email_adrese",
    "email_adrese_podruznica",
    "evidencijske_djelatnosti",
    "gfi",
    "inozemni_registri",
    "jezici",
    "postupci",
    "tvrtke",
    "skracene_tvrtke",
    "prijevodi_tvrtki",
    "prijevodi_skracenih_tvrtki",
    "sjedista",
    "pravni_oblici",
    "pretezite_djelatnosti",
    "predmeti_poslovanja",
    "temeljni_kapitali",
    "nazivi_podruznica",
    "skraceni_nazivi_podruznica",
    "sjedista_podruznica",
    "objave_priopcenja",
    "promjene",
    "nacionalna_klasifikacija_djelatnosti",
    "statusi",
    "valute",
    "vrste_gfi_dokumenata",
    "vrste_postupaka",
    "vrste_pravnih_oblika",
];

/// A registry subject as served by the mock.
#[derive(Clone, Debug, Serialize)]
pub struct Subject {
    pub mbs: String,
    pub oib: String,
    pub tvrtka: String,
    pub sud_id_nadlezan: u32,
    pub aktivan: bool,
}

/// Behaviour knobs for a mock instance.
#[derive(Clone, Debug)]
pub struct MockConfig {
    pub subscription_key: String,
    /// Held before every response, to exercise client timeouts.
    pub delay: Option<Duration>,
    /// Rows generated for `tvrtke`, to exercise large response bodies.
    pub company_name_rows: usize,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            subscription_key: DEFAULT_KEY.to_string(),
            delay: None,
            company_name_rows: 0,
        }
    }
}

#[derive(Debug)]
struct Registry {
    config: MockConfig,
    subjects: Vec<Subject>,
}

type Shared = Arc<Registry>;

pub fn fixtures() -> Vec<Subject> {
    vec![
        Subject {
            mbs: "080000001".to_string(),
            oib: "53056966535".to_string(),
            tvrtka: "Alfa d.o.o.".to_string(),
            sud_id_nadlezan: 3,
            aktivan: true,
        },
        Subject {
            mbs: "080000002".to_string(),
            oib: "11111111119".to_string(),
            tvrtka: "Beta d.d.".to_string(),
            sud_id_nadlezan: 3,
            aktivan: true,
        },
        Subject {
            mbs: "030000003".to_string(),
            oib: "22222222228".to_string(),
            tvrtka: "Alfa Servis j.d.o.o.".to_string(),
            sud_id_nadlezan: 7,
            aktivan: false,
        },
    ]
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    let registry: Shared = Arc::new(Registry {
        config,
        subjects: fixtures(),
    });
    Router::new()
        .route("/api/{audience}/{endpoint}", get(dispatch))
        .with_state(registry)
}

pub async fn run(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error_message": message }))).into_response()
}

async fn dispatch(
    State(registry): State<Shared>,
    Path((audience, endpoint)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    debug!(%audience, %endpoint, ?params, "mock request");
    if let Some(delay) = registry.config.delay {
        tokio::time::sleep(delay).await;
    }
    if !matches!(audience.as_str(), "javni" | "drzavna_tijela") {
        return error(StatusCode::NOT_FOUND, "unknown API surface");
    }
    let key = headers
        .get(SUBSCRIPTION_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    if key != Some(registry.config.subscription_key.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "missing or invalid subscription key");
    }

    match endpoint.as_str() {
        "detalji_subjekta" => subject_details(&registry, &params),
        "subjekti" => subjects(&registry, &params),
        "snapshots" => Json(snapshots()).into_response(),
        "counts" => Json(counts()).into_response(),
        "sudovi" => Json(courts()).into_response(),
        "tvrtke" => company_names(&registry, &params),
        other if CODEBOOKS.contains(&other) => Json(json!([])).into_response(),
        _ => error(StatusCode::NOT_FOUND, "unknown endpoint"),
    }
}

fn flag(params: &HashMap<String, String>, name: &str) -> Option<bool> {
    params.get(name).map(|v| v == "true")
}

fn subject_details(registry: &Registry, params: &HashMap<String, String>) -> Response {
    let (Some(id_type), Some(identifier)) =
        (params.get("tip_identifikatora"), params.get("identifikator"))
    else {
        return error(StatusCode::BAD_REQUEST, "tip_identifikatora and identifikator are required");
    };
    let found = registry.subjects.iter().find(|s| match id_type.as_str() {
        "oib" => &s.oib == identifier,
        "mbs" => &s.mbs == identifier,
        _ => false,
    });
    let Some(subject) = found else {
        if flag(params, "no_data_error") == Some(false) {
            return Json(json!({})).into_response();
        }
        return error(StatusCode::NOT_FOUND, "no data found");
    };

    let mut body = json!({
        "mbs": subject.mbs,
        "oib": subject.oib,
        "tvrtka": { "ime": subject.tvrtka },
        "aktivan": subject.aktivan,
    });
    if flag(params, "expand_relations") == Some(true) {
        let court = courts()
            .into_iter()
            .find(|c| c["id"] == subject.sud_id_nadlezan)
            .unwrap_or(Value::Null);
        body["sud_nadlezan"] = court;
    } else {
        body["sud_id_nadlezan"] = json!(subject.sud_id_nadlezan);
    }
    Json(body).into_response()
}

fn paging(params: &HashMap<String, String>) -> Result<(usize, usize), Response> {
    let parse = |name: &str, default: usize| match params.get(name) {
        Some(v) => v.parse::<usize>().map_err(|_| name.to_string()),
        None => Ok(default),
    };
    match (parse("offset", 0), parse("limit", DEFAULT_LIMIT)) {
        (Ok(offset), Ok(limit)) => Ok((offset, limit)),
        (Err(name), _) | (_, Err(name)) => Err(error(
            StatusCode::BAD_REQUEST,
            &format!("{name} must be an integer"),
        )),
    }
}

fn subjects(registry: &Registry, params: &HashMap<String, String>) -> Response {
    let (offset, limit) = match paging(params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };
    let name = params.get("tvrtka_naziv").map(|n| n.to_lowercase());
    let only_active = flag(params, "only_active").unwrap_or(false);

    let page: Vec<&Subject> = registry
        .subjects
        .iter()
        .filter(|s| !only_active || s.aktivan)
        .filter(|s| {
            name.as_ref()
                .map_or(true, |n| s.tvrtka.to_lowercase().contains(n.as_str()))
        })
        .skip(offset)
        .take(limit)
        .collect();
    Json(page).into_response()
}

fn company_names(registry: &Registry, params: &HashMap<String, String>) -> Response {
    let (offset, limit) = match paging(params) {
        Ok(paging) => paging,
        Err(response) => return response,
    };
    let end = registry
        .config
        .company_name_rows
        .min(offset.saturating_add(limit));
    let rows: Vec<Value> = (offset..end)
        .map(|i| {
            json!({
                "mbs": format!("{:09}", 100_000_000 + i),
                "ime": format!("Generirana tvrtka broj {i} društvo s ograničenom odgovornošću"),
                "naznaka_imena": format!("GENERIRANA TVRTKA {i}"),
            })
        })
        .collect();
    Json(rows).into_response()
}

fn snapshots() -> Value {
    json!([
        { "snapshot_id": 1089, "timestamp": "2026-10-16T04:00:00", "available_until": "2026-10-23T04:00:00" },
        { "snapshot_id": 1090, "timestamp": "2026-10-17T04:00:00", "available_until": "2026-10-24T04:00:00" },
    ])
}

fn counts() -> Value {
    json!([
        { "table_name": "subjekti", "count_aktivni": 2, "count_ukupno": 3 },
        { "table_name": "sudovi", "count_aktivni": 2, "count_ukupno": 2 },
    ])
}

fn courts() -> Vec<Value> {
    vec![
        json!({ "id": 3, "naziv": "Trgovački sud u Zagrebu", "sud_id_nadlezan": null }),
        json!({ "id": 7, "naziv": "Trgovački sud u Splitu", "sud_id_nadlezan": null }),
    ]
}

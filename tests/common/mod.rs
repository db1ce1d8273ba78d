#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use exam_catalog::config::Config;
use exam_catalog::domain::entities::{
    AssociationRecord, Category, Discipline, Exam, NewExam, Teacher,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN: &str = "valid-token";

/// In-memory exam API used by the integration tests.
#[derive(Default)]
pub struct FakeBackend {
    pub categories: Vec<Category>,
    pub disciplines: Vec<Discipline>,
    pub teachers: HashMap<i64, Vec<Teacher>>,
    pub records: Vec<AssociationRecord>,
    pub views: HashMap<i64, u64>,
    pub created: Vec<NewExam>,
    pub search_queries: Vec<Option<String>>,
    /// Artificial latency of `/tests/teachers` per query.
    pub delays: HashMap<String, Duration>,
}

pub type SharedBackend = Arc<Mutex<FakeBackend>>;

pub fn midterm() -> Category {
    Category::new(10, "Midterm")
}

pub fn final_exam() -> Category {
    Category::new(20, "Final")
}

pub fn seeded_backend() -> SharedBackend {
    let math = Discipline::new(7, "Math");
    let physics = Discipline::new(8, "Physics");
    let alice = Teacher::new(3, "Alice");
    let bob = Teacher::new(4, "Bob");

    let records = vec![
        AssociationRecord::new(
            1,
            alice.clone(),
            math.clone(),
            vec![
                Exam::new(1, "P1 2021", "https://exams.test/1.pdf", 2, midterm()),
                Exam::new(2, "Final 2021", "https://exams.test/2.pdf", 0, final_exam()),
            ],
        ),
        AssociationRecord::new(
            2,
            bob.clone(),
            physics.clone(),
            vec![Exam::new(3, "P1 2022", "https://exams.test/3.pdf", 5, midterm())],
        ),
        AssociationRecord::new(
            3,
            alice.clone(),
            physics.clone(),
            vec![Exam::new(4, "P2 2022", "https://exams.test/4.pdf", 1, midterm())],
        ),
    ];

    let mut teachers = HashMap::new();
    teachers.insert(7, vec![alice.clone()]);
    teachers.insert(8, vec![alice, bob]);

    let views = records
        .iter()
        .flat_map(|record| record.exams.iter())
        .map(|exam| (exam.id, exam.views))
        .collect();

    Arc::new(Mutex::new(FakeBackend {
        categories: vec![midterm(), final_exam()],
        disciplines: vec![math, physics],
        teachers,
        records,
        views,
        ..Default::default()
    }))
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", TOKEN))
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!("Invalid token"))).into_response()
}

async fn categories(State(backend): State<SharedBackend>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let categories = backend.lock().unwrap().categories.clone();
    Json(json!({ "categories": categories })).into_response()
}

async fn disciplines(State(backend): State<SharedBackend>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let disciplines = backend.lock().unwrap().disciplines.clone();
    Json(json!({ "disciplines": disciplines })).into_response()
}

async fn teachers(
    State(backend): State<SharedBackend>,
    Path(discipline_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let teachers = backend
        .lock()
        .unwrap()
        .teachers
        .get(&discipline_id)
        .cloned()
        .unwrap_or_default();
    Json(json!({ "teachers": teachers })).into_response()
}

async fn tests_by_teacher(
    State(backend): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }

    let query = params.get("teacher").cloned();
    let delay = {
        let mut backend = backend.lock().unwrap();
        backend.search_queries.push(query.clone());
        query
            .as_ref()
            .and_then(|q| backend.delays.get(q).copied())
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let backend = backend.lock().unwrap();
    let tests: Vec<AssociationRecord> = backend
        .records
        .iter()
        .filter(|record| match &query {
            Some(q) => record
                .teacher
                .name
                .to_lowercase()
                .contains(&q.to_lowercase()),
            None => true,
        })
        .map(|record| {
            let mut record = record.clone();
            for exam in &mut record.exams {
                exam.views = backend.views.get(&exam.id).copied().unwrap_or_default();
            }
            record
        })
        .collect();
    Json(json!({ "tests": tests })).into_response()
}

async fn add_view(
    State(backend): State<SharedBackend>,
    Path(exam_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut backend = backend.lock().unwrap();
    match backend.views.get_mut(&exam_id) {
        Some(views) => {
            *views += 1;
            StatusCode::OK.into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Exam not found" })),
        )
            .into_response(),
    }
}

async fn create_test(
    State(backend): State<SharedBackend>,
    headers: HeaderMap,
    Json(new_exam): Json<NewExam>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    let mut backend = backend.lock().unwrap();
    if backend.created.iter().any(|e| e.name == new_exam.name) {
        return (StatusCode::CONFLICT, "Exam already registered").into_response();
    }
    backend.created.push(new_exam);
    StatusCode::CREATED.into_response()
}

pub fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/categories", get(categories))
        .route("/disciplines", get(disciplines))
        .route("/teachers/{discipline_id}", get(teachers))
        .route("/tests/teachers", get(tests_by_teacher))
        .route("/tests/{exam_id}/view", patch(add_view))
        .route("/tests", post(create_test))
        .with_state(backend)
}

/// Bind to port 0 and return the base URL of the running fake API.
pub async fn start_server(backend: SharedBackend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(backend)).await.unwrap();
    });
    format!("http://{addr}")
}

/// Base URL of a port nothing listens on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn test_config(api_url: &str, token: Option<&str>) -> Config {
    Config {
        api_url: api_url.to_string(),
        api_token: token.map(str::to_string),
        log_level: "debug".to_string(),
        log_format: "text".to_string(),
        search_debounce_ms: 20,
        search_min_query_len: 2,
        view_queue_capacity: 16,
        http_timeout_seconds: 5,
    }
}

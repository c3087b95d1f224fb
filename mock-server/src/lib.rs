use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Page size for paginated listings.
pub const PER_PAGE: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: Uuid,
    pub subject: String,
    pub teacher_id: Uuid,
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLesson {
    pub subject: String,
    pub teacher_id: Uuid,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_status() -> String {
    "open".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLesson {
    pub subject: Option<String>,
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
    pub bio: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: "Anonymous tutor".to_string(),
            bio: String::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct Store {
    /// Insertion-ordered so paginated listings are stable.
    lessons: Vec<Lesson>,
    profile: Profile,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/lessons", get(list_lessons).post(create_lesson))
        .route("/lessons/teacher/{teacher_id}", get(lessons_by_teacher))
        .route(
            "/lessons/{id}",
            get(get_lesson)
                .put(update_lesson)
                .patch(patch_lesson)
                .delete(delete_lesson),
        )
        .route("/profile", get(get_profile).put(update_profile))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ApiFailure = (StatusCode, Json<Value>);

fn not_found() -> ApiFailure {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "lesson not found" })),
    )
}

fn envelope(data: impl Serialize) -> Json<Value> {
    Json(json!({ "data": data }))
}

/// Query pairs arrive raw so repeated keys (`status=a&status=b`) survive.
struct ListFilters {
    page: Option<u32>,
    search: Option<String>,
    statuses: Vec<String>,
}

impl ListFilters {
    fn parse(pairs: Vec<(String, String)>) -> Self {
        let mut filters = ListFilters {
            page: None,
            search: None,
            statuses: Vec::new(),
        };
        for (key, value) in pairs {
            match key.as_str() {
                "page" => filters.page = value.parse().ok(),
                "search" => filters.search = Some(value),
                "status" => filters.statuses.push(value),
                _ => {}
            }
        }
        filters
    }

    fn matches(&self, lesson: &Lesson) -> bool {
        if let Some(search) = &self.search {
            if !lesson
                .subject
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        self.statuses.is_empty() || self.statuses.contains(&lesson.status)
    }
}

fn paginate(lessons: Vec<Lesson>, page: u32) -> Value {
    let total = lessons.len();
    let last_page = (total.div_ceil(PER_PAGE)).max(1) as u32;
    let current = page.max(1);
    let start = (current - 1) as usize * PER_PAGE;
    let items: Vec<Lesson> = lessons.into_iter().skip(start).take(PER_PAGE).collect();
    json!({
        "items": items,
        "currentPage": current,
        "lastPage": last_page,
        "totalCount": total,
        "perPage": PER_PAGE,
    })
}

async fn list_lessons(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let filters = ListFilters::parse(pairs);
    let store = db.read().await;
    let matched: Vec<Lesson> = store
        .lessons
        .iter()
        .filter(|lesson| filters.matches(lesson))
        .cloned()
        .collect();
    match filters.page {
        Some(page) => envelope(paginate(matched, page)),
        None => envelope(matched),
    }
}

async fn lessons_by_teacher(
    State(db): State<Db>,
    Path(teacher_id): Path<Uuid>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<Value> {
    let filters = ListFilters::parse(pairs);
    let store = db.read().await;
    let matched: Vec<Lesson> = store
        .lessons
        .iter()
        .filter(|lesson| lesson.teacher_id == teacher_id && filters.matches(lesson))
        .cloned()
        .collect();
    envelope(matched)
}

async fn create_lesson(
    State(db): State<Db>,
    Json(input): Json<CreateLesson>,
) -> (StatusCode, Json<Value>) {
    let lesson = Lesson {
        id: Uuid::new_v4(),
        subject: input.subject,
        teacher_id: input.teacher_id,
        status: input.status,
    };
    db.write().await.lessons.push(lesson.clone());
    (StatusCode::CREATED, envelope(lesson))
}

async fn get_lesson(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiFailure> {
    let store = db.read().await;
    store
        .lessons
        .iter()
        .find(|lesson| lesson.id == id)
        .map(|lesson| envelope(lesson.clone()))
        .ok_or_else(not_found)
}

async fn update_lesson(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateLesson>,
) -> Result<Json<Value>, ApiFailure> {
    apply_update(db, id, input).await
}

async fn patch_lesson(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateLesson>,
) -> Result<Json<Value>, ApiFailure> {
    apply_update(db, id, input).await
}

async fn apply_update(db: Db, id: Uuid, input: UpdateLesson) -> Result<Json<Value>, ApiFailure> {
    let mut store = db.write().await;
    let lesson = store
        .lessons
        .iter_mut()
        .find(|lesson| lesson.id == id)
        .ok_or_else(not_found)?;
    if let Some(subject) = input.subject {
        lesson.subject = subject;
    }
    if let Some(status) = input.status {
        lesson.status = status;
    }
    Ok(envelope(lesson.clone()))
}

async fn delete_lesson(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    let mut store = db.write().await;
    let before = store.lessons.len();
    store.lessons.retain(|lesson| lesson.id != id);
    if store.lessons.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn get_profile(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    envelope(store.profile.clone())
}

async fn update_profile(State(db): State<Db>, Json(input): Json<Profile>) -> Json<Value> {
    let mut store = db.write().await;
    store.profile = input;
    envelope(store.profile.clone())
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MailingList {
    pub list_id: String,
    pub fqdn_listname: String,
    pub display_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Member {
    pub member_id: Uuid,
    pub list_id: String,
    pub email: String,
    pub role: String,
}

/// Collection envelope. Like the real service, `entries` is omitted
/// entirely when the collection is empty.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub start: usize,
    pub total_size: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<T>,
}

impl<T> Page<T> {
    pub fn of(entries: Vec<T>) -> Self {
        Self {
            start: 0,
            total_size: entries.len(),
            entries,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateList {
    pub fqdn_listname: String,
}

#[derive(Deserialize)]
pub struct CreateMember {
    pub list_id: String,
    pub subscriber: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub pre_verified: bool,
    #[serde(default)]
    pub pre_confirmed: bool,
    #[serde(default)]
    pub pre_approved: bool,
}

#[derive(Debug, Default)]
pub struct Mailman {
    pub lists: Vec<MailingList>,
    pub members: Vec<Member>,
}

pub type Db = Arc<RwLock<Mailman>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Mailman::default()));
    let api = Router::new()
        .route("/lists", get(all_lists).post(create_list))
        .route("/lists/{name_or_id}", get(find_list))
        .route("/lists/{name_or_id}/member/{email}", get(find_member))
        .route("/addresses/{email}/memberships", get(memberships))
        .route("/members", post(create_member))
        .route("/members/{member_id}", delete(delete_member))
        .with_state(db);
    // The real service namespaces everything under the API version.
    Router::new().nest("/3.1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn lookup_list<'a>(state: &'a Mailman, name_or_id: &str) -> Option<&'a MailingList> {
    state
        .lists
        .iter()
        .find(|l| l.fqdn_listname == name_or_id || l.list_id == name_or_id)
}

async fn all_lists(State(db): State<Db>) -> Json<Page<MailingList>> {
    let state = db.read().await;
    Json(Page::of(state.lists.clone()))
}

async fn create_list(
    State(db): State<Db>,
    Query(input): Query<CreateList>,
) -> Result<(StatusCode, Json<MailingList>), (StatusCode, String)> {
    let Some((local, domain)) = input.fqdn_listname.split_once('@') else {
        return Err((
            StatusCode::BAD_REQUEST,
            "Invalid list name".to_string(),
        ));
    };
    let mut state = db.write().await;
    if state
        .lists
        .iter()
        .any(|l| l.fqdn_listname == input.fqdn_listname)
    {
        return Err((StatusCode::BAD_REQUEST, "List already exists".to_string()));
    }
    let list = MailingList {
        list_id: format!("{local}.{domain}"),
        display_name: local.to_string(),
        fqdn_listname: input.fqdn_listname.clone(),
    };
    state.lists.push(list.clone());
    Ok((StatusCode::CREATED, Json(list)))
}

async fn find_list(
    State(db): State<Db>,
    Path(name_or_id): Path<String>,
) -> Result<Json<MailingList>, StatusCode> {
    let state = db.read().await;
    lookup_list(&state, &name_or_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// Like the real service: an address with no memberships at all gets a 404,
// one with any gets the full envelope.
async fn memberships(
    State(db): State<Db>,
    Path(email): Path<String>,
) -> Result<Json<Page<Member>>, StatusCode> {
    let state = db.read().await;
    let entries: Vec<Member> = state
        .members
        .iter()
        .filter(|m| m.email == email)
        .cloned()
        .collect();
    if entries.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(Page::of(entries)))
}

// The real service reports "no such list" and "no such member" with the
// same bare 404; clients have to tell them apart themselves.
async fn find_member(
    State(db): State<Db>,
    Path((name_or_id, email)): Path<(String, String)>,
) -> Result<Json<Member>, StatusCode> {
    let state = db.read().await;
    let list = lookup_list(&state, &name_or_id).ok_or(StatusCode::NOT_FOUND)?;
    state
        .members
        .iter()
        .find(|m| m.list_id == list.list_id && m.email == email)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// Subscriptions are created active; the pre_* flags are accepted but the
// mock has no confirmation workflow to bypass.
async fn create_member(
    State(db): State<Db>,
    Query(input): Query<CreateMember>,
) -> Result<(StatusCode, Json<Member>), (StatusCode, String)> {
    if !input.subscriber.contains('@') {
        return Err((
            StatusCode::BAD_REQUEST,
            "Cannot convert parameters: subscriber".to_string(),
        ));
    }
    let mut state = db.write().await;
    if !state.lists.iter().any(|l| l.list_id == input.list_id) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("No such list: {}", input.list_id),
        ));
    }
    if state
        .members
        .iter()
        .any(|m| m.list_id == input.list_id && m.email == input.subscriber)
    {
        return Err((
            StatusCode::CONFLICT,
            "Member already subscribed".to_string(),
        ));
    }
    let member = Member {
        member_id: Uuid::new_v4(),
        list_id: input.list_id,
        email: input.subscriber,
        role: "member".to_string(),
    };
    state.members.push(member.clone());
    Ok((StatusCode::CREATED, Json(member)))
}

async fn delete_member(
    State(db): State<Db>,
    Path(member_id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut state = db.write().await;
    let before = state.members.len();
    state.members.retain(|m| m.member_id != member_id);
    if state.members.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(StatusCode::NO_CONTENT)
}

//! Tour handlers for the tourforge web API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::services::{PersistenceService, TourService};
use crate::data::{Analytics, PersistableTour, Step, Tour, TourId};
use crate::web::auth::CurrentUser;
use crate::web::error::WebError;
use crate::web::state::WebAppState;

/// Response for a single tour.
#[derive(Debug, Serialize)]
pub struct TourResponse {
    pub id: String,
    pub title: String,
    pub steps: Vec<Step>,
    pub analytics: Analytics,
    pub is_public: bool,
    pub created_at: String,
    pub owner_id: Option<String>,
}

impl From<Tour> for TourResponse {
    fn from(tour: Tour) -> Self {
        Self {
            id: tour.id.to_string(),
            title: tour.title,
            steps: tour.steps,
            analytics: tour.analytics,
            is_public: tour.is_public,
            created_at: tour.created_at.to_rfc3339(),
            owner_id: tour.owner_id.map(|o| o.to_string()),
        }
    }
}

/// Response for listing tours.
#[derive(Debug, Serialize)]
pub struct ListToursResponse {
    pub tours: Vec<TourResponse>,
}

/// One step as submitted by a client. The id is optional on the way in;
/// steps created in another client carry theirs, brand-new ones get one
/// assigned here.
#[derive(Debug, Deserialize)]
pub struct StepPayload {
    pub id: Option<Uuid>,
    pub text: String,
    pub image: String,
}

impl From<StepPayload> for Step {
    fn from(payload: StepPayload) -> Self {
        Self {
            id: payload.id.unwrap_or_else(Uuid::new_v4),
            text: payload.text,
            image: payload.image,
        }
    }
}

/// Request body for creating or updating a tour.
///
/// An empty title is accepted; only a missing one is malformed. Visibility
/// defaults to public when omitted, matching the stored schema default;
/// updates are whole-document, last write wins.
#[derive(Debug, Deserialize)]
pub struct SaveTourRequest {
    pub title: String,
    #[serde(default)]
    pub steps: Vec<StepPayload>,
    #[serde(default)]
    pub analytics: Analytics,
    #[serde(default = "default_is_public")]
    pub is_public: bool,
}

fn default_is_public() -> bool {
    true
}

impl SaveTourRequest {
    fn into_payload(self, id: Option<TourId>) -> PersistableTour {
        PersistableTour {
            id,
            title: self.title,
            steps: self.steps.into_iter().map(Step::from).collect(),
            analytics: self.analytics,
            is_public: self.is_public,
        }
    }
}

/// Response for a tour deletion.
#[derive(Debug, Serialize)]
pub struct DeleteTourResponse {
    pub message: String,
}

async fn tours_service(state: &WebAppState) -> Result<TourService, WebError> {
    let core = state.core().await;
    core.tours()
        .ok_or_else(|| WebError::Internal("Database not available".to_string()))
}

/// List all public tours. No authentication required.
pub async fn list_public_tours(
    State(state): State<WebAppState>,
) -> Result<Json<ListToursResponse>, WebError> {
    let service = tours_service(&state).await?;
    let tours = service.list_public()?;

    Ok(Json(ListToursResponse {
        tours: tours.into_iter().map(TourResponse::from).collect(),
    }))
}

/// List the authenticated user's tours.
pub async fn list_my_tours(
    State(state): State<WebAppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ListToursResponse>, WebError> {
    let service = tours_service(&state).await?;
    let tours = service.list(&user)?;

    Ok(Json(ListToursResponse {
        tours: tours.into_iter().map(TourResponse::from).collect(),
    }))
}

/// Create a new tour owned by the authenticated user.
pub async fn create_tour(
    State(state): State<WebAppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SaveTourRequest>,
) -> Result<(StatusCode, Json<TourResponse>), WebError> {
    let service = tours_service(&state).await?;
    let tour = service.save(&user, req.into_payload(None))?;

    Ok((StatusCode::CREATED, Json(TourResponse::from(tour))))
}

/// Update an existing tour. 404 when no tour matches the id for this owner.
pub async fn update_tour(
    State(state): State<WebAppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<SaveTourRequest>,
) -> Result<Json<TourResponse>, WebError> {
    let service = tours_service(&state).await?;
    let tour = service.save(&user, req.into_payload(Some(TourId::from(id))))?;

    Ok(Json(TourResponse::from(tour)))
}

/// Delete a tour. 404 when no tour matches the id for this owner.
pub async fn delete_tour(
    State(state): State<WebAppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteTourResponse>, WebError> {
    let service = tours_service(&state).await?;
    let id = TourId::from(id);

    if !service.delete(&id, &user)? {
        return Err(WebError::NotFound(format!("Tour {} not found", id)));
    }

    Ok(Json(DeleteTourResponse {
        message: "Tour deleted".to_string(),
    }))
}

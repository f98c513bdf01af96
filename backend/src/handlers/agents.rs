use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{
    CreateAgentRequest, UpdateAgentRequest, UpdateRatingRequest, UpdateStatusRequest,
};
use crate::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
struct ApiResponse<T: Serialize> {
    data: T,
    meta: ResponseMeta,
}

#[derive(Serialize)]
struct ResponseMeta {
    request_id: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            meta: ResponseMeta {
                request_id: uuid::Uuid::new_v4().to_string(),
            },
        }
    }
}

/// POST /v1/agents
///
/// Create a new agent. The agent code and id are always assigned by the service.
pub async fn create_agent(
    state: web::Data<AppState>,
    body: web::Json<CreateAgentRequest>,
) -> Result<HttpResponse, AppError> {
    let agent = state.agents.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::new(agent)))
}

/// PUT /v1/agents
///
/// Overwrite an agent's name, phone number, account number and region.
pub async fn update_agent(
    state: web::Data<AppState>,
    body: web::Json<UpdateAgentRequest>,
) -> Result<HttpResponse, AppError> {
    let (id, changes) = body.into_inner().into_parts();
    let agent = state.agents.update(id, changes).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(agent)))
}

/// GET /v1/agents/all
pub async fn list_agents(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let agents = state.agents.list_all().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(agents)))
}

/// GET /v1/agents/{id}
pub async fn get_agent(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let agent = state.agents.fetch(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(agent)))
}

/// PUT /v1/agents/rating
///
/// Replace the rating and rating count together.
pub async fn update_agent_rating(
    state: web::Data<AppState>,
    body: web::Json<UpdateRatingRequest>,
) -> Result<HttpResponse, AppError> {
    let UpdateRatingRequest {
        id,
        rating,
        number_of_ratings,
    } = body.into_inner();
    let agent = state
        .agents
        .update_rating(id, rating, number_of_ratings)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(agent)))
}

/// PUT /v1/agents/status
pub async fn update_agent_status(
    state: web::Data<AppState>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let UpdateStatusRequest { id, status } = body.into_inner();
    let agent = state.agents.update_status(id, status).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(agent)))
}

/// Configure agent routes
pub fn configure_agent_routes(cfg: &mut web::ServiceConfig) {
    // Static segments are registered ahead of `/{id}`
    cfg.service(
        web::scope("/agents")
            .service(
                web::resource("")
                    .route(web::post().to(create_agent))
                    .route(web::put().to(update_agent)),
            )
            .route("/all", web::get().to(list_agents))
            .route("/rating", web::put().to(update_agent_rating))
            .route("/status", web::put().to(update_agent_status))
            .route("/{id}", web::get().to(get_agent)),
    );
}

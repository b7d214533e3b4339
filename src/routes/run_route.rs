use actix_web::{get, web, HttpResponse};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dal::{page_db, query_db, run_db};

#[get("/{run_id}")]
async fn get_run(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> HttpResponse {
    let run_id = path.into_inner();

    match run_db::get_run(&pool, run_id).await {
        Ok(run) => HttpResponse::Ok().json(json!({
            "run_id": run.id,
            "status": run.status,
            "total_score": run.total_score,
            "readiness_rank": run.readiness_rank,
        })),
        Err(sqlx::Error::RowNotFound) => HttpResponse::NotFound().finish(),
        Err(e) => {
            log::error!("Failed to load run {}: {:?}", run_id, e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// The pipeline's only progress signal: growing page and answer counts,
/// polled by external consumers.
#[get("/{run_id}/progress")]
async fn get_progress(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> HttpResponse {
    let run_id = path.into_inner();

    let pages_count = match page_db::count_for_run(&pool, run_id).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("Failed to count pages for {}: {:?}", run_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    };
    let answers_count = match query_db::count_answers_for_run(&pool, run_id).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("Failed to count answers for {}: {:?}", run_id, e);
            return HttpResponse::InternalServerError().finish();
        }
    };

    HttpResponse::Ok().json(json!({
        "pages_count": pages_count,
        "answers_count": answers_count,
    }))
}

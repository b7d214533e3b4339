use sqlx::PgPool;
use uuid::Uuid;

use crate::services::scoring::ScoreCard;

/// Created exactly once per run; a re-scan creates a new run, never a new
/// metrics row for the same one.
pub async fn insert_metrics(
    pool: &PgPool,
    run_id: Uuid,
    card: &ScoreCard,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        insert into metrics
            (id, run_id, content_quality_score, technical_score,
             authority_score, scenarios_score, total_score, readiness_rank)
        values
            ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(run_id)
    .bind(card.content_quality_score)
    .bind(card.technical_score)
    .bind(card.authority_score)
    .bind(card.scenarios_score)
    .bind(card.total_score)
    .bind(&card.readiness_rank)
    .execute(pool)
    .await?;
    Ok(())
}

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Job, JobType};

pub async fn enqueue(
    pool: &PgPool,
    run_id: Uuid,
    job_type: JobType,
    payload: Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        insert into jobs
            (id, run_id, type, status, payload)
        values
            ($1, $2, $3, 'pending', $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(run_id)
    .bind(job_type.as_str())
    .bind(payload)
    .execute(pool)
    .await?;
    Ok(())
}

/// Oldest pending job, if any. The worker is a single polling task, so no
/// row locking is needed here.
pub async fn fetch_next_pending(pool: &PgPool) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        r#"
        select
            id, run_id, type, payload
        from
            jobs
        where
            status = 'pending'
        order by
            created_at
        limit 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

pub async fn update_status(pool: &PgPool, job_id: Uuid, status: &str) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        update jobs set status = $2 where id = $1
        "#,
    )
    .bind(job_id)
    .bind(status)
    .execute(pool)
    .await?;
    Ok(())
}

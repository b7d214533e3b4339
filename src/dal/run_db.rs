use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Organization, Run, RunStatus};

pub async fn insert_run(
    pool: &PgPool,
    organization_id: Uuid,
    page_budget: i32,
    locale: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        insert into runs
            (id, organization_id, status, page_budget, locale)
        values
            ($1, $2, $3, $4, $5)
        returning id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(organization_id)
    .bind(RunStatus::Queued.as_str())
    .bind(page_budget)
    .bind(locale)
    .fetch_one(pool)
    .await
}

pub async fn get_run(pool: &PgPool, run_id: Uuid) -> Result<Run, sqlx::Error> {
    sqlx::query_as::<_, Run>(
        r#"
        select
            id, status, page_budget, locale, total_score, readiness_rank
        from
            runs
        where
            id = $1
        "#,
    )
    .bind(run_id)
    .fetch_one(pool)
    .await
}

pub async fn get_organization_for_run(
    pool: &PgPool,
    run_id: Uuid,
) -> Result<Organization, sqlx::Error> {
    sqlx::query_as::<_, Organization>(
        r#"
        select
            o.brand_name, o.domain, o.industry
        from
            runs r
            join organizations o on o.id = r.organization_id
        where
            r.id = $1
        "#,
    )
    .bind(run_id)
    .fetch_one(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    run_id: Uuid,
    status: RunStatus,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        update runs set status = $2 where id = $1
        "#,
    )
    .bind(run_id)
    .bind(status.as_str())
    .execute(pool)
    .await?;
    Ok(())
}

/// Terminal transition: the scored run gets its total and rank in the same
/// statement that marks it done.
pub async fn complete_run(
    pool: &PgPool,
    run_id: Uuid,
    total_score: f64,
    readiness_rank: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        update runs
        set
            status = $2,
            total_score = $3,
            readiness_rank = $4
        where
            id = $1
        "#,
    )
    .bind(run_id)
    .bind(RunStatus::Done.as_str())
    .bind(total_score)
    .bind(readiness_rank)
    .execute(pool)
    .await?;
    Ok(())
}

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::CheckMap;

pub async fn insert_page(
    pool: &PgPool,
    run_id: Uuid,
    url: &str,
    status: i32,
    main_text: &str,
    html_hash: &str,
    passed_checks: &CheckMap,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        insert into crawled_pages
            (id, run_id, url, status, main_text, html_hash, passed_checks)
        values
            ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(run_id)
    .bind(url)
    .bind(status)
    .bind(main_text)
    .bind(html_hash)
    .bind(Json(passed_checks))
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_checks_for_run(pool: &PgPool, run_id: Uuid) -> Result<Vec<CheckMap>, sqlx::Error> {
    let rows = sqlx::query_scalar::<_, Json<CheckMap>>(
        r#"
        select
            passed_checks
        from
            crawled_pages
        where
            run_id = $1
        "#,
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|Json(checks)| checks).collect())
}

pub async fn count_for_run(pool: &PgPool, run_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        select count(*) from crawled_pages where run_id = $1
        "#,
    )
    .bind(run_id)
    .fetch_one(pool)
    .await
}

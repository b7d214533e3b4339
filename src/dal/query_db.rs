use itertools::Itertools;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{AnswerFeatures, ProviderResponse};

pub async fn insert_query(
    pool: &PgPool,
    run_id: Uuid,
    scenario_key: &str,
    scenario_title: &str,
    prompt: &str,
    locale: &str,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        insert into queries
            (id, run_id, scenario_key, scenario_title, prompt, locale)
        values
            ($1, $2, $3, $4, $5, $6)
        returning id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(run_id)
    .bind(scenario_key)
    .bind(scenario_title)
    .bind(prompt)
    .bind(locale)
    .fetch_one(pool)
    .await
}

pub async fn insert_answer(
    pool: &PgPool,
    query_id: Uuid,
    response: &ProviderResponse,
    features: &AnswerFeatures,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        insert into answers
            (id, query_id, provider, answer_text, citations, features, raw_json)
        values
            ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(query_id)
    .bind(&response.provider)
    .bind(&response.answer_text)
    .bind(Json(&response.citations))
    .bind(Json(features))
    .bind(&response.raw_json)
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
struct AnswerFeatureRow {
    query_id: Uuid,
    features: Option<Json<AnswerFeatures>>,
}

/// All answer features for a run, grouped per query. Queries that got no
/// answers come back as empty groups.
pub async fn get_features_by_query(
    pool: &PgPool,
    run_id: Uuid,
) -> Result<Vec<Vec<AnswerFeatures>>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AnswerFeatureRow>(
        r#"
        select
            q.id as query_id,
            a.features
        from
            queries q
            left join answers a on a.query_id = q.id
        where
            q.run_id = $1
        order by
            q.id
        "#,
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?;

    let chunks = rows.into_iter().chunk_by(|row| row.query_id);
    let grouped = chunks
        .into_iter()
        .map(|(_, group)| {
            group
                .filter_map(|row| row.features.map(|Json(features)| features))
                .collect()
        })
        .collect();

    Ok(grouped)
}

pub async fn count_answers_for_run(pool: &PgPool, run_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        select
            count(*)
        from
            answers a
            join queries q on q.id = a.query_id
        where
            q.run_id = $1
        "#,
    )
    .bind(run_id)
    .fetch_one(pool)
    .await
}

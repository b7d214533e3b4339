use sqlx::PgPool;
use uuid::Uuid;

pub async fn insert_organization(
    pool: &PgPool,
    brand_name: &str,
    domain: &str,
    industry: Option<&str>,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        insert into organizations
            (id, brand_name, domain, industry)
        values
            ($1, $2, $3, $4)
        returning id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(brand_name)
    .bind(domain)
    .bind(industry)
    .fetch_one(pool)
    .await
}

use crate::models::DbUserRole;
use eyre::Result;
use shiftswap_core::models::principal::Role;
use sqlx::{Pool, Postgres};

pub async fn get_user_role(pool: &Pool<Postgres>, principal_id: &str) -> Result<Option<DbUserRole>> {
    let user_role = sqlx::query_as::<_, DbUserRole>(
        r#"
        SELECT principal_id, employee_code, role
        FROM user_roles
        WHERE principal_id = $1
        "#,
    )
    .bind(principal_id)
    .fetch_optional(pool)
    .await?;

    Ok(user_role)
}

pub async fn get_principal_for_employee(
    pool: &Pool<Postgres>,
    employee_code: &str,
) -> Result<Option<String>> {
    let principal_id = sqlx::query_scalar::<_, String>(
        r#"
        SELECT principal_id
        FROM user_roles
        WHERE employee_code = $1
        "#,
    )
    .bind(employee_code)
    .fetch_optional(pool)
    .await?;

    Ok(principal_id)
}

pub async fn upsert_user_role(
    pool: &Pool<Postgres>,
    principal_id: &str,
    employee_code: Option<&str>,
    role: Role,
) -> Result<DbUserRole> {
    let user_role = sqlx::query_as::<_, DbUserRole>(
        r#"
        INSERT INTO user_roles (principal_id, employee_code, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (principal_id)
        DO UPDATE SET employee_code = $2, role = $3
        RETURNING principal_id, employee_code, role
        "#,
    )
    .bind(principal_id)
    .bind(employee_code)
    .bind(role.as_str())
    .fetch_one(pool)
    .await?;

    Ok(user_role)
}

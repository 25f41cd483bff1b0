use crate::models::DbScheduleRow;
use eyre::Result;
use shiftswap_core::{dates::IsoDate, models::schedule::ScheduleRow};
use sqlx::{Pool, Postgres};

/// Swaps in a week's rows inside one transaction.
///
/// All notifications and swap requests go first, for every week, then the
/// target week's old rows. If any insert fails the transaction is dropped
/// and nothing changes.
pub async fn replace_week(
    pool: &Pool<Postgres>,
    week_start_date: &IsoDate,
    rows: &[ScheduleRow],
) -> Result<()> {
    tracing::debug!(
        "Replacing schedule: week_start_date={}, rows={}",
        week_start_date,
        rows.len()
    );

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM notifications")
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM swap_requests")
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        r#"
        DELETE FROM schedule_rows
        WHERE week_start_date = $1
        "#,
    )
    .bind(week_start_date.as_str())
    .execute(&mut *tx)
    .await?;

    for row in rows {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] = &row.shifts;
        sqlx::query(
            r#"
            INSERT INTO schedule_rows (
                week_start_date, employee_code,
                sunday_shift, monday_shift, tuesday_shift, wednesday_shift,
                thursday_shift, friday_shift, saturday_shift,
                display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(row.week_start_date.as_str())
        .bind(&row.employee_code)
        .bind(sunday)
        .bind(monday)
        .bind(tuesday)
        .bind(wednesday)
        .bind(thursday)
        .bind(friday)
        .bind(saturday)
        .bind(row.display_order)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!("Schedule replaced: week_start_date={}", week_start_date);
    Ok(())
}

pub async fn list_weeks(pool: &Pool<Postgres>) -> Result<Vec<IsoDate>> {
    let weeks = sqlx::query_scalar::<_, String>(
        r#"
        SELECT DISTINCT week_start_date
        FROM schedule_rows
        ORDER BY week_start_date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    weeks
        .into_iter()
        .map(|week| {
            IsoDate::parse(&week).ok_or_else(|| eyre::eyre!("Stored week {week} is not YYYY-MM-DD"))
        })
        .collect()
}

pub async fn get_week_rows(
    pool: &Pool<Postgres>,
    week_start_date: &IsoDate,
) -> Result<Vec<ScheduleRow>> {
    tracing::debug!("Getting schedule rows: week_start_date={}", week_start_date);

    let rows = sqlx::query_as::<_, DbScheduleRow>(
        r#"
        SELECT week_start_date, employee_code,
               sunday_shift, monday_shift, tuesday_shift, wednesday_shift,
               thursday_shift, friday_shift, saturday_shift,
               display_order
        FROM schedule_rows
        WHERE week_start_date = $1
        ORDER BY display_order ASC
        "#,
    )
    .bind(week_start_date.as_str())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(ScheduleRow::try_from).collect()
}

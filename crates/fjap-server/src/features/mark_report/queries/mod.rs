pub mod by_semester;
pub mod report;
pub mod subject_detail;

pub use by_semester::{GetMarksBySemesterQuery, MarksBySemesterError};
pub use report::GetMarkReportQuery;
pub use subject_detail::{GetSubjectMarkError, GetSubjectMarkQuery};

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::PgPool;

use super::models::{GradeTypeDetail, StudentMarkReport};
use crate::features::grades::{COMPONENT_COLUMNS, COMPONENT_ORDER};

/// Grade rows joined with subject, class and semester; callers append the
/// `WHERE` and `ORDER BY` clauses
pub(crate) const MARK_ROW_SELECT: &str = r#"
    SELECT
        g.grade_id,
        g.student_id,
        g.subject_id,
        s.subject_code,
        s.subject_name,
        s.pass_mark::float8 AS pass_mark,
        c.class_name,
        sem.name AS semester_name,
        EXTRACT(YEAR FROM sem.start_date)::int4 AS year,
        sem.start_date,
        sem.end_date
    FROM grade g
    JOIN subject s ON s.subject_id = g.subject_id
    JOIN class c ON c.class_id = s.class_id
    JOIN semester sem ON sem.semester_id = s.semester_id
"#;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MarkRow {
    grade_id: i32,
    student_id: i32,
    subject_id: i32,
    subject_code: String,
    subject_name: String,
    pass_mark: f64,
    class_name: String,
    semester_name: String,
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl From<MarkRow> for StudentMarkReport {
    fn from(row: MarkRow) -> Self {
        StudentMarkReport {
            grade_id: row.grade_id,
            student_id: row.student_id,
            subject_id: row.subject_id,
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            class_name: row.class_name,
            semester_name: row.semester_name,
            year: row.year,
            start_date: row.start_date,
            end_date: row.end_date,
            grade_types: Vec::new(),
            total_score: 0.0,
            pass_mark: row.pass_mark,
            is_passed: false,
        }
    }
}

/// Active components of every listed grade, keyed by grade id and ordered
/// by category within each grade
pub(crate) async fn fetch_components(
    pool: &PgPool,
    grade_ids: &[i32],
) -> Result<HashMap<i32, Vec<GradeTypeDetail>>, sqlx::Error> {
    let mut by_grade: HashMap<i32, Vec<GradeTypeDetail>> = HashMap::new();
    if grade_ids.is_empty() {
        return Ok(by_grade);
    }

    let sql = format!(
        "SELECT {} FROM grade_type WHERE grade_id = ANY($1) AND status = 'Active' \
         ORDER BY grade_id, {}, grade_type_id",
        COMPONENT_COLUMNS, COMPONENT_ORDER
    );
    let rows = sqlx::query_as::<_, GradeTypeDetail>(&sql)
        .bind(grade_ids)
        .fetch_all(pool)
        .await?;

    for row in rows {
        by_grade.entry(row.grade_id).or_default().push(row);
    }
    Ok(by_grade)
}

/// Converts flat rows into reports with components and totals, keeping row order
pub(crate) async fn assemble(pool: &PgPool, rows: Vec<MarkRow>) -> Result<Vec<StudentMarkReport>, sqlx::Error> {
    let grade_ids: Vec<i32> = rows.iter().map(|row| row.grade_id).collect();
    let mut components = fetch_components(pool, &grade_ids).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let grade_types = components.remove(&row.grade_id).unwrap_or_default();
            StudentMarkReport::from(row).with_components(grade_types)
        })
        .collect())
}

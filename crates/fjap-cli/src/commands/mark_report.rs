//! `fjap mark-report` command implementation
//!
//! Three views of the same data: the whole report grouped by semester, one
//! semester (`--semester` + `--year`) or one subject (`--subject`).

use colored::Colorize;

use super::{emit, new_table, print_empty};
use crate::api::{ApiClient, MarkReport, SubjectMark};
use crate::error::Result;
use crate::OutputFormat;

pub async fn run(
    client: &ApiClient,
    student_id: i32,
    semester: Option<&str>,
    year: Option<i32>,
    subject: Option<i32>,
    format: OutputFormat,
) -> Result<()> {
    if let Some(subject_id) = subject {
        let mark = client.subject_mark(student_id, subject_id).await?;
        return emit(format, &mark, render_subject);
    }

    if let (Some(semester), Some(year)) = (semester, year) {
        let marks = client.marks_by_semester(student_id, semester, year).await?;
        if marks.is_empty() && format == OutputFormat::Table {
            print_empty(&format!("marks for {} {}", semester, year));
            return Ok(());
        }
        return emit(format, &marks, |m| render_subjects(m));
    }

    let report = client.mark_report(student_id).await?;
    emit(format, &report, render_report)
}

fn verdict(passed: bool) -> String {
    if passed {
        "Passed".green().to_string()
    } else {
        "Not passed".red().to_string()
    }
}

fn render_subjects(subjects: &[SubjectMark]) -> String {
    let mut table = new_table(vec!["Code", "Subject", "Class", "Total", "Pass mark", "Result"]);
    for subject in subjects {
        table.add_row(vec![
            subject.subject_code.clone(),
            subject.subject_name.clone(),
            subject.class_name.clone(),
            format!("{:.2}", subject.total_score),
            format!("{:.1}", subject.pass_mark),
            verdict(subject.is_passed),
        ]);
    }
    table.to_string()
}

fn render_subject(mark: &SubjectMark) -> String {
    let mut table = new_table(vec!["Component", "Weight", "Score", "Comment"]);
    for component in &mark.grade_types {
        table.add_row(vec![
            component.grade_type_name.clone(),
            format!("{}%", component.weight),
            format!("{:.2}", component.score),
            component.comment.clone().unwrap_or_default(),
        ]);
    }

    format!(
        "{} {} ({} {})\n{}\nTotal: {:.2}  {}",
        mark.subject_code.bold(),
        mark.subject_name,
        mark.semester_name,
        mark.year,
        table,
        mark.total_score,
        verdict(mark.is_passed)
    )
}

fn render_report(report: &MarkReport) -> String {
    let mut out = format!("{} (#{})\n", report.student_name.bold(), report.student_id);
    for group in &report.semesters {
        out.push_str(&format!(
            "\n{}\n{}\n",
            format!("{} {}", group.semester_name, group.year).cyan().bold(),
            render_subjects(&group.subjects)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{GradeTypeDetail, SemesterMarks};
    use chrono::NaiveDate;
    use fjap_common::RecordStatus;

    fn mark(code: &str, total: f64) -> SubjectMark {
        SubjectMark {
            grade_id: 1,
            student_id: 7,
            subject_id: 4,
            subject_code: code.to_string(),
            subject_name: "Programming Fundamentals".to_string(),
            class_name: "SE1801".to_string(),
            semester_name: "Fall".to_string(),
            year: 2024,
            start_date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            grade_types: vec![GradeTypeDetail {
                grade_type_id: 3,
                grade_type_name: "Final".to_string(),
                weight: 100.0,
                score: total,
                comment: None,
                status: RecordStatus::Active,
            }],
            total_score: total,
            pass_mark: 5.0,
            is_passed: total >= 5.0,
        }
    }

    #[test]
    fn test_render_report_groups_semesters() {
        let report = MarkReport {
            student_id: 7,
            student_name: "Nguyen An".to_string(),
            semesters: vec![SemesterMarks {
                semester_name: "Fall".to_string(),
                year: 2024,
                subjects: vec![mark("PRF192", 7.0), mark("MAE101", 3.0)],
            }],
        };

        let rendered = render_report(&report);
        assert!(rendered.contains("Fall 2024"));
        assert!(rendered.contains("PRF192"));
        assert!(rendered.contains("MAE101"));
        assert!(rendered.contains("Not passed"));
    }

    #[test]
    fn test_render_subject_lists_components() {
        let rendered = render_subject(&mark("PRF192", 6.5));
        assert!(rendered.contains("Final"));
        assert!(rendered.contains("Total: 6.50"));
    }
}

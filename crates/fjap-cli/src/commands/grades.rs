//! `fjap grades` command implementation

use colored::Colorize;
use comfy_table::Cell;

use super::{emit, new_table, print_empty, print_success, status_cell};
use crate::api::{ApiClient, ComponentForm, GradeDetail, GradeForm, GradeSummary};
use crate::error::Result;
use crate::{ComponentFields, GradeCommand, OutputFormat};

pub async fn run(client: &ApiClient, command: &GradeCommand, format: OutputFormat) -> Result<()> {
    match command {
        GradeCommand::List { subject } => {
            let grades = client.list_grades(*subject).await?;
            if grades.is_empty() && format == OutputFormat::Table {
                print_empty("grades for this subject");
                return Ok(());
            }
            emit(format, &grades, |g| render_list(g))
        },

        GradeCommand::Get { grade_id } => {
            let grade = client.get_grade(*grade_id).await?;
            emit(format, &grade, render_detail)
        },

        GradeCommand::Create { student, subject } => {
            let grade = client
                .create_grade(&GradeForm {
                    student_id: *student,
                    subject_id: *subject,
                })
                .await?;
            print_success(&format!("Opened grade {}", grade.grade_id));
            Ok(())
        },

        GradeCommand::Delete { grade_id } => {
            let message = client.delete_grade(*grade_id).await?;
            print_success(&message);
            Ok(())
        },

        GradeCommand::AddComponent { grade_id, fields } => {
            let component = client.add_component(*grade_id, &component_form(fields)).await?;
            print_success(&format!(
                "Added {} (id {}) to grade {}",
                component.grade_type_name, component.grade_type_id, grade_id
            ));
            Ok(())
        },

        GradeCommand::UpdateComponent {
            grade_type_id,
            fields,
        } => {
            let component = client
                .update_component(*grade_type_id, &component_form(fields))
                .await?;
            print_success(&format!("Updated {}", component.grade_type_name));
            Ok(())
        },

        GradeCommand::ComponentStatus {
            grade_type_id,
            status,
        } => {
            let status = client
                .set_component_status(*grade_type_id, status.is_active())
                .await?;
            print_success(&format!("Component {} is now {}", grade_type_id, status));
            Ok(())
        },
    }
}

fn component_form(fields: &ComponentFields) -> ComponentForm {
    ComponentForm {
        grade_type_name: fields.name.clone(),
        weight: fields.weight,
        score: fields.score,
        comment: fields.comment.clone(),
    }
}

fn render_list(grades: &[GradeSummary]) -> String {
    let mut table = new_table(vec!["Grade", "Student code", "Student", "Components", "Total"]);
    for grade in grades {
        table.add_row(vec![
            grade.grade_id.to_string(),
            grade.student_code.clone(),
            grade.student_name.clone(),
            grade.component_count.to_string(),
            format!("{:.2}", grade.total_score),
        ]);
    }
    table.to_string()
}

fn render_detail(grade: &GradeDetail) -> String {
    let mut table = new_table(vec!["ID", "Component", "Weight", "Score", "Comment", "Status"]);
    for component in &grade.components {
        table.add_row(vec![
            Cell::new(component.grade_type_id),
            Cell::new(&component.grade_type_name),
            Cell::new(format!("{}%", component.weight)),
            Cell::new(format!("{:.2}", component.score)),
            Cell::new(component.comment.as_deref().unwrap_or("")),
            status_cell(component.status),
        ]);
    }

    let verdict = if grade.is_passed {
        "PASSED".green().bold()
    } else {
        "NOT PASSED".red().bold()
    };

    format!(
        "{} {} - {} {}\n{}\nTotal: {:.2} / pass mark {:.1}  {}",
        grade.student_code,
        grade.student_name,
        grade.subject_code,
        grade.subject_name,
        table,
        grade.total_score,
        grade.pass_mark,
        verdict
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GradeComponent;
    use fjap_common::RecordStatus;

    #[test]
    fn test_render_detail_shows_components_and_verdict() {
        let grade = GradeDetail {
            grade_id: 9,
            student_id: 1,
            student_code: "HE170001".to_string(),
            student_name: "Nguyen An".to_string(),
            subject_id: 4,
            subject_code: "PRF192".to_string(),
            subject_name: "Programming Fundamentals".to_string(),
            pass_mark: 5.0,
            components: vec![GradeComponent {
                grade_type_id: 11,
                grade_id: 9,
                grade_type_name: "Midterm".to_string(),
                weight: 30.0,
                score: 4.5,
                comment: Some("late".to_string()),
                status: RecordStatus::Active,
            }],
            total_score: 4.5,
            is_passed: false,
        };

        let rendered = render_detail(&grade);
        assert!(rendered.contains("Midterm"));
        assert!(rendered.contains("late"));
        assert!(rendered.contains("Total: 4.50"));
        assert!(rendered.contains("NOT PASSED"));
    }
}

//! `fjap students` command implementation

use super::{detail_table, emit, new_table, pagination_footer};
use crate::api::{ApiClient, Paginated, StudentDetail, StudentListItem};
use crate::error::Result;
use crate::{OutputFormat, StudentCommand};

pub async fn run(client: &ApiClient, command: &StudentCommand, format: OutputFormat) -> Result<()> {
    match command {
        StudentCommand::List {
            search,
            page,
            per_page,
        } => {
            let page = client
                .list_students(search.as_deref(), *page, *per_page)
                .await?;
            emit(format, &page, render_page)
        },

        StudentCommand::Get { student_id } => {
            let student = client.get_student(*student_id).await?;
            emit(format, &student, render_student)
        },
    }
}

fn render_page(page: &Paginated<StudentListItem>) -> String {
    if page.items.is_empty() {
        return format!("No students found.\n{}", pagination_footer(&page.pagination));
    }

    let mut table = new_table(vec!["ID", "Code", "Name", "Email"]);
    for student in &page.items {
        table.add_row(vec![
            student.student_id.to_string(),
            student.student_code.clone(),
            format!("{} {}", student.last_name, student.first_name),
            student.email.clone(),
        ]);
    }
    format!("{}\n{}", table, pagination_footer(&page.pagination))
}

fn render_student(student: &StudentDetail) -> String {
    let classes = if student.class_ids.is_empty() {
        "-".to_string()
    } else {
        student.class_ids.join(", ")
    };

    detail_table(vec![
        ("ID", student.student_id.to_string()),
        ("Code", student.student_code.clone()),
        ("First name", student.first_name.clone()),
        ("Last name", student.last_name.clone()),
        ("Email", student.email.clone()),
        ("Classes", classes),
    ])
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_student_without_classes() {
        let rendered = render_student(&StudentDetail {
            student_id: 1,
            student_code: "HE170001".to_string(),
            first_name: "An".to_string(),
            last_name: "Nguyen".to_string(),
            email: "an@fjap.edu.vn".to_string(),
            class_ids: vec![],
        });

        assert!(rendered.contains("HE170001"));
        assert!(rendered.contains("an@fjap.edu.vn"));
    }
}

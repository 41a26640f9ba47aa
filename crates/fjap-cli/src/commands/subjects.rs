//! `fjap subjects` command implementation

use comfy_table::Cell;
use fjap_common::RecordStatus;

use super::{
    detail_table, emit, lookup_table, new_table, pagination_footer, print_empty, print_success,
    status_cell,
};
use crate::api::{ApiClient, Paginated, Subject, SubjectDetail, SubjectFilter, SubjectForm, SubjectOptions};
use crate::error::{CliError, Result};
use crate::{OutputFormat, SubjectCommand, SubjectFields};

pub async fn run(client: &ApiClient, command: &SubjectCommand, format: OutputFormat) -> Result<()> {
    match command {
        SubjectCommand::List {
            search,
            status,
            class,
            semester,
            level,
            page,
            per_page,
        } => {
            let filter = SubjectFilter {
                search: search.clone(),
                status: status.map(|s| RecordStatus::from(s.is_active())),
                class_id: class.clone(),
                semester_id: *semester,
                level_id: *level,
                page: *page,
                per_page: *per_page,
            };
            let page = client.list_subjects(&filter).await?;
            emit(format, &page, render_page)
        },

        SubjectCommand::Details => {
            let details = client.list_subject_details().await?;
            if details.is_empty() && format == OutputFormat::Table {
                print_empty("subjects");
                return Ok(());
            }
            emit(format, &details, |d| render_details(d))
        },

        SubjectCommand::Options => {
            let options = client.subject_options().await?;
            emit(format, &options, render_options)
        },

        SubjectCommand::Get { subject_id } => {
            let subject = client.get_subject(*subject_id).await?;
            emit(format, &subject, render_subject)
        },

        SubjectCommand::Code { subject_code } => {
            let subject = client.get_subject_by_code(subject_code).await?;
            emit(format, &subject, render_subject)
        },

        SubjectCommand::ByClass { class_id } => {
            let subjects = client.list_subjects_by_class(class_id).await?;
            emit(format, &subjects, |s| render_list(s))
        },

        SubjectCommand::BySemester { semester_id } => {
            let subjects = client.list_subjects_by_semester(*semester_id).await?;
            emit(format, &subjects, |s| render_list(s))
        },

        SubjectCommand::ByLevel { level_id } => {
            let subjects = client.list_subjects_by_level(*level_id).await?;
            emit(format, &subjects, |s| render_list(s))
        },

        SubjectCommand::Create { fields } => {
            let form = new_form(fields)?;
            let subject = client.create_subject(&form).await?;
            print_success(&format!(
                "Created subject {} (id {})",
                subject.subject_code, subject.subject_id
            ));
            Ok(())
        },

        SubjectCommand::Update { subject_id, fields } => {
            let current = client.get_subject(*subject_id).await?;
            let form = merge_form(current.into(), fields);
            let subject = client.update_subject(*subject_id, &form).await?;
            print_success(&format!("Updated subject {}", subject.subject_code));
            Ok(())
        },

        SubjectCommand::Status { subject_id, status } => {
            let status = client.set_subject_status(*subject_id, status.is_active()).await?;
            print_success(&format!("Subject {} is now {}", subject_id, status));
            Ok(())
        },

        SubjectCommand::Delete { subject_id } => {
            let message = client.delete_subject(*subject_id).await?;
            print_success(&message);
            Ok(())
        },
    }
}

/// Build a create form; every field but the description is mandatory
fn new_form(fields: &SubjectFields) -> Result<SubjectForm> {
    fn required<T: Clone>(value: &Option<T>, flag: &str) -> Result<T> {
        value
            .clone()
            .ok_or_else(|| CliError::input(format!("--{} is required", flag)))
    }

    Ok(SubjectForm {
        subject_code: required(&fields.code, "code")?,
        subject_name: required(&fields.name, "name")?,
        description: fields.description.clone(),
        pass_mark: required(&fields.pass_mark, "pass-mark")?,
        semester_id: required(&fields.semester, "semester")?,
        level_id: required(&fields.level, "level")?,
        class_id: required(&fields.class, "class")?,
    })
}

/// Overlay the given flags on the stored subject
fn merge_form(current: SubjectForm, fields: &SubjectFields) -> SubjectForm {
    SubjectForm {
        subject_code: fields.code.clone().unwrap_or(current.subject_code),
        subject_name: fields.name.clone().unwrap_or(current.subject_name),
        description: fields.description.clone().or(current.description),
        pass_mark: fields.pass_mark.unwrap_or(current.pass_mark),
        semester_id: fields.semester.unwrap_or(current.semester_id),
        level_id: fields.level.unwrap_or(current.level_id),
        class_id: fields.class.clone().unwrap_or(current.class_id),
    }
}

fn render_list(subjects: &[Subject]) -> String {
    let mut table = new_table(vec!["ID", "Code", "Name", "Class", "Pass mark", "Status"]);
    for subject in subjects {
        table.add_row(vec![
            Cell::new(subject.subject_id),
            Cell::new(&subject.subject_code),
            Cell::new(&subject.subject_name),
            Cell::new(&subject.class_id),
            Cell::new(format!("{:.1}", subject.pass_mark)),
            status_cell(subject.status),
        ]);
    }
    table.to_string()
}

fn render_page(page: &Paginated<Subject>) -> String {
    if page.items.is_empty() {
        return format!("No subjects found.\n{}", pagination_footer(&page.pagination));
    }
    format!("{}\n{}", render_list(&page.items), pagination_footer(&page.pagination))
}

fn render_details(details: &[SubjectDetail]) -> String {
    let mut table = new_table(vec!["Code", "Name", "Class", "Level", "Semester", "Status"]);
    for detail in details {
        table.add_row(vec![
            Cell::new(&detail.subject_code),
            Cell::new(&detail.subject_name),
            Cell::new(&detail.class_name),
            Cell::new(&detail.level_name),
            Cell::new(&detail.semester_name),
            status_cell(detail.status),
        ]);
    }
    table.to_string()
}

fn render_subject(subject: &Subject) -> String {
    detail_table(vec![
        ("ID", subject.subject_id.to_string()),
        ("Code", subject.subject_code.clone()),
        ("Name", subject.subject_name.clone()),
        ("Description", subject.description.clone().unwrap_or_default()),
        ("Pass mark", format!("{:.1}", subject.pass_mark)),
        ("Class", subject.class_id.clone()),
        ("Semester ID", subject.semester_id.to_string()),
        ("Level ID", subject.level_id.to_string()),
        ("Status", subject.status.to_string()),
        ("Created", subject.created_at.format("%Y-%m-%d %H:%M").to_string()),
    ])
    .to_string()
}

fn render_options(options: &SubjectOptions) -> String {
    format!(
        "Semesters\n{}\nLevels\n{}\nClasses\n{}",
        lookup_table(&options.semesters),
        lookup_table(&options.levels),
        lookup_table(&options.classes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginationMetadata;
    use chrono::Utc;

    fn subject() -> Subject {
        Subject {
            subject_id: 4,
            subject_code: "PRF192".to_string(),
            subject_name: "Programming Fundamentals".to_string(),
            status: RecordStatus::Active,
            description: None,
            pass_mark: 5.0,
            created_at: Utc::now(),
            semester_id: 1,
            level_id: 2,
            class_id: "CL0A1B".to_string(),
        }
    }

    #[test]
    fn test_new_form_requires_fields() {
        let fields = SubjectFields {
            code: Some("PRF192".to_string()),
            name: Some("Programming Fundamentals".to_string()),
            ..SubjectFields::default()
        };

        let err = new_form(&fields).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: --pass-mark is required");
    }

    #[test]
    fn test_merge_form_keeps_unset_fields() {
        let fields = SubjectFields {
            name: Some("PF".to_string()),
            pass_mark: Some(4.0),
            ..SubjectFields::default()
        };

        let form = merge_form(subject().into(), &fields);
        assert_eq!(form.subject_code, "PRF192");
        assert_eq!(form.subject_name, "PF");
        assert_eq!(form.pass_mark, 4.0);
        assert_eq!(form.class_id, "CL0A1B");
    }

    #[test]
    fn test_render_page_footer() {
        let page = Paginated {
            items: vec![subject()],
            pagination: PaginationMetadata {
                page: 1,
                per_page: 20,
                total: 1,
                pages: 1,
                has_next: false,
                has_prev: false,
            },
        };

        let rendered = render_page(&page);
        assert!(rendered.contains("PRF192"));
        assert!(rendered.ends_with("Page 1 of 1 (1 total)"));
    }
}

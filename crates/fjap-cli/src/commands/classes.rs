//! `fjap classes` command implementation

use comfy_table::Cell;
use tracing::debug;

use super::{detail_table, emit, lookup_table, new_table, print_empty, print_success, status_cell};
use crate::api::{ApiClient, ClassForm, ClassInfo, ClassListItem, ClassOptions, ClassSubject};
use crate::error::Result;
use crate::{ClassCommand, OutputFormat};

pub async fn run(client: &ApiClient, command: &ClassCommand, format: OutputFormat) -> Result<()> {
    match command {
        ClassCommand::List => {
            let classes = client.list_classes().await?;
            debug!(count = classes.len(), "Fetched classes");
            if classes.is_empty() && format == OutputFormat::Table {
                print_empty("classes");
                return Ok(());
            }
            emit(format, &classes, |c| render_list(c))
        },

        ClassCommand::Lookup => {
            let items = client.lookup_classes().await?;
            emit(format, &items, |i| lookup_table(i).to_string())
        },

        ClassCommand::Options => {
            let options = client.class_options().await?;
            emit(format, &options, render_options)
        },

        ClassCommand::Info { class_id } => {
            let info = client.get_class_info(class_id).await?;
            emit(format, &info, render_info)
        },

        ClassCommand::Subjects { class_id } => {
            let subjects = client.list_class_subjects(class_id).await?;
            if subjects.is_empty() && format == OutputFormat::Table {
                print_empty("subjects for this class");
                return Ok(());
            }
            emit(format, &subjects, |s| render_subjects(s))
        },

        ClassCommand::Create {
            name,
            semester,
            level,
        } => {
            let form = ClassForm {
                class_name: name.clone(),
                semester_id: *semester,
                level_id: *level,
            };
            let created = client.create_class(&form).await?;
            print_success(&format!("{} ({})", created.message, created.class_id));
            Ok(())
        },

        ClassCommand::Update {
            class_id,
            name,
            semester,
            level,
        } => {
            let current = client.get_class_info(class_id).await?;
            let form = ClassForm {
                class_name: name.clone().unwrap_or(current.class_name),
                semester_id: semester.unwrap_or(current.semester_id),
                level_id: level.unwrap_or(current.level_id),
            };
            let message = client.update_class(class_id, &form).await?;
            print_success(&message);
            Ok(())
        },

        ClassCommand::Status { class_id, status } => {
            let status = client.set_class_status(class_id, status.is_active()).await?;
            print_success(&format!("Class {} is now {}", class_id, status));
            Ok(())
        },

        ClassCommand::Delete { class_id } => {
            let message = client.delete_class(class_id).await?;
            print_success(&message);
            Ok(())
        },
    }
}

fn render_list(classes: &[ClassListItem]) -> String {
    let mut table = new_table(vec!["ID", "Name", "Semester", "Start", "End", "Status"]);
    for class in classes {
        table.add_row(vec![
            Cell::new(&class.class_id),
            Cell::new(&class.class_name),
            Cell::new(&class.semester),
            Cell::new(class.start_date),
            Cell::new(class.end_date),
            status_cell(class.status),
        ]);
    }
    table.to_string()
}

fn render_info(info: &ClassInfo) -> String {
    detail_table(vec![
        ("Class ID", info.class_id.clone()),
        ("Name", info.class_name.clone()),
        ("Semester ID", info.semester_id.to_string()),
        ("Level ID", info.level_id.to_string()),
        ("Status", info.status.to_string()),
    ])
    .to_string()
}

fn render_subjects(subjects: &[ClassSubject]) -> String {
    let mut table = new_table(vec!["Code", "Subject", "Level", "Students"]);
    for subject in subjects {
        table.add_row(vec![
            subject.subject_code.clone(),
            subject.subject_name.clone(),
            subject.subject_level.clone(),
            subject.total_students.to_string(),
        ]);
    }
    table.to_string()
}

fn render_options(options: &ClassOptions) -> String {
    format!(
        "Semesters\n{}\nLevels\n{}",
        lookup_table(&options.semesters),
        lookup_table(&options.levels)
    )
}

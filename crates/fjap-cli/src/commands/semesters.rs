//! `fjap semesters` command implementation

use super::{detail_table, emit, lookup_table, new_table, print_empty, print_success};
use crate::api::{ApiClient, Semester, SemesterForm};
use crate::error::Result;
use crate::{OutputFormat, SemesterCommand};

pub async fn run(client: &ApiClient, command: &SemesterCommand, format: OutputFormat) -> Result<()> {
    match command {
        SemesterCommand::List => {
            let items = client.lookup_semesters().await?;
            emit(format, &items, |i| lookup_table(i).to_string())
        },

        SemesterCommand::All => {
            let semesters = client.list_semesters().await?;
            if semesters.is_empty() && format == OutputFormat::Table {
                print_empty("semesters");
                return Ok(());
            }
            emit(format, &semesters, |s| render_list(s))
        },

        SemesterCommand::Get { semester_id } => {
            let semester = client.get_semester(*semester_id).await?;
            emit(format, &semester, render_semester)
        },

        SemesterCommand::Create { name, start, end } => {
            let form = SemesterForm {
                name: name.clone(),
                start_date: *start,
                end_date: *end,
            };
            let semester = client.create_semester(&form).await?;
            print_success(&format!(
                "Created semester {} (id {})",
                semester.name, semester.semester_id
            ));
            Ok(())
        },

        SemesterCommand::Update {
            semester_id,
            name,
            start,
            end,
        } => {
            let current = client.get_semester(*semester_id).await?;
            let form = SemesterForm {
                name: name.clone().unwrap_or(current.name),
                start_date: start.unwrap_or(current.start_date),
                end_date: end.unwrap_or(current.end_date),
            };
            let semester = client.update_semester(*semester_id, &form).await?;
            print_success(&format!("Updated semester {}", semester.name));
            Ok(())
        },

        SemesterCommand::Delete { semester_id } => {
            let message = client.delete_semester(*semester_id).await?;
            print_success(&message);
            Ok(())
        },
    }
}

fn render_list(semesters: &[Semester]) -> String {
    let mut table = new_table(vec!["ID", "Name", "Start", "End"]);
    for semester in semesters {
        table.add_row(vec![
            semester.semester_id.to_string(),
            semester.name.clone(),
            semester.start_date.to_string(),
            semester.end_date.to_string(),
        ]);
    }
    table.to_string()
}

fn render_semester(semester: &Semester) -> String {
    detail_table(vec![
        ("ID", semester.semester_id.to_string()),
        ("Name", semester.name.clone()),
        ("Start", semester.start_date.to_string()),
        ("End", semester.end_date.to_string()),
    ])
    .to_string()
}

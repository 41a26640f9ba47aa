//! `fjap levels` command implementation

use super::{detail_table, emit, lookup_table, print_success};
use crate::api::{ApiClient, LevelForm};
use crate::error::Result;
use crate::{LevelCommand, OutputFormat};

pub async fn run(client: &ApiClient, command: &LevelCommand, format: OutputFormat) -> Result<()> {
    match command {
        LevelCommand::List => {
            let items = client.lookup_levels().await?;
            emit(format, &items, |i| lookup_table(i).to_string())
        },

        LevelCommand::Get { level_id } => {
            let level = client.get_level(*level_id).await?;
            emit(format, &level, |l| {
                detail_table(vec![
                    ("ID", l.level_id.to_string()),
                    ("Name", l.level_name.clone()),
                ])
                .to_string()
            })
        },

        LevelCommand::Create { name } => {
            let level = client
                .create_level(&LevelForm {
                    level_name: name.clone(),
                })
                .await?;
            print_success(&format!("Created level {} (id {})", level.level_name, level.level_id));
            Ok(())
        },

        LevelCommand::Update { level_id, name } => {
            let level = client
                .update_level(
                    *level_id,
                    &LevelForm {
                        level_name: name.clone(),
                    },
                )
                .await?;
            print_success(&format!("Renamed level {} to {}", level.level_id, level.level_name));
            Ok(())
        },

        LevelCommand::Delete { level_id } => {
            let message = client.delete_level(*level_id).await?;
            print_success(&message);
            Ok(())
        },
    }
}

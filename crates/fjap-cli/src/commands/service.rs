//! `fjap health` and `fjap whoami`

use colored::Colorize;

use super::{detail_table, emit};
use crate::api::ApiClient;
use crate::error::Result;
use crate::OutputFormat;

pub async fn health(client: &ApiClient) -> Result<()> {
    if client.health_check().await? {
        println!("{} {} is healthy", "✓".green(), client.base_url());
    } else {
        println!(
            "{} {} is unreachable or its database is down",
            "✗".red(),
            client.base_url()
        );
    }
    Ok(())
}

pub async fn whoami(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let me = client.me().await?;
    emit(format, &me, |me| {
        detail_table(vec![
            ("User", me.sub.clone()),
            ("Name", me.name.clone()),
            ("Email", me.email.clone()),
            ("Role", format!("{} ({})", me.role, me.role_id)),
        ])
        .to_string()
    })
}

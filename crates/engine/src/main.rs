//! Aspects engine - sheet calculator entry point.
//!
//! Reads a character document (a JSON object of field values) from stdin,
//! applies every field through the sheet use cases and prints the stored
//! values with their calculated totals.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use aspects_domain::{FieldMap, RoomId};
use aspects_engine::infrastructure::{
    clock::SystemClock, config::AppConfig, memory::InMemoryCharacterRepo, telemetry::init_tracing,
};
use aspects_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(&config.log_filter);

    tracing::info!("Starting Aspects engine");

    let clock = Arc::new(SystemClock::new());
    let app = App::new(config, Arc::new(InMemoryCharacterRepo::new(clock)))?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("reading character document from stdin")?;
    let document: FieldMap = if input.trim().is_empty() {
        FieldMap::new()
    } else {
        serde_json::from_str(&input).context("parsing character document")?
    };

    let sheets = &app.use_cases.character_sheet;
    let created = sheets
        .create_character(RoomId::new(), "Imported", false)
        .await?;
    let mut character = created.character;
    let mut calculated = created.calculated;

    for (field_id, value) in document {
        let result = sheets.update_field(character.id, &field_id, value).await?;
        character = result.character;
        calculated = result.calculated;
    }

    let output = serde_json::json!({
        "systemId": app.system.system_id(),
        "values": character.data,
        "calculated": calculated,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

use std::sync::Arc;

use aspects_domain::{FieldValue, RoomId};
use aspects_engine::infrastructure::clock::SystemClock;
use aspects_engine::infrastructure::config::AppConfig;
use aspects_engine::infrastructure::memory::InMemoryCharacterRepo;
use aspects_engine::App;

fn app(sheet_system: &str) -> App {
    let config = AppConfig {
        sheet_system: sheet_system.to_string(),
        ..AppConfig::default()
    };
    let repo = InMemoryCharacterRepo::new(Arc::new(SystemClock::new()));
    App::new(config, Arc::new(repo)).unwrap()
}

#[tokio::test]
async fn building_a_character_updates_every_derived_total() {
    let app = app("aspects");
    let sheets = &app.use_cases.character_sheet;
    let id = sheets
        .create_character(RoomId::new(), "Mira", true)
        .await
        .unwrap()
        .character
        .id;

    sheets
        .update_field(id, "persona", FieldValue::from("Warden"))
        .await
        .unwrap();
    sheets
        .update_field(id, "attribute:Dexterity", FieldValue::from(3))
        .await
        .unwrap();
    sheets
        .update_field(id, "coreSkills:Athletics", FieldValue::from(2))
        .await
        .unwrap();
    sheets.add_list_item(id, "milestones").await.unwrap();
    sheets
        .update_list_item_field(id, "milestones", 0, "bonusType", FieldValue::from("skillPoints"))
        .await
        .unwrap();
    let result = sheets
        .update_list_item_field(id, "milestones", 0, "aspectBonus", FieldValue::from("Water"))
        .await
        .unwrap();

    let calculated = &result.calculated;
    // Warden adds +1 Strength: 2 + 3 + 3.
    assert_eq!(calculated.get("hitsMax"), Some(&FieldValue::from(8)));
    assert_eq!(calculated.get("total:coreSkills:Athletics"), Some(&FieldValue::from(4)));
    assert_eq!(calculated.get("total:aspect:Water"), Some(&FieldValue::from(1)));
    assert_eq!(calculated.get("skillPointsUsed"), Some(&FieldValue::from(2)));
    assert_eq!(calculated.get("skillPointsTotal"), Some(&FieldValue::from(8)));

    let sheet = sheets.get_sheet(id).await.unwrap();
    assert_eq!(&sheet.calculated, calculated);
    assert!(sheet.character.updated_at.is_some());
}

#[tokio::test]
async fn classic_sheet_tracks_hits_instead_of_damage() {
    let app = app("aspects_classic");
    let sheets = &app.use_cases.character_sheet;
    let created = sheets
        .create_character(RoomId::new(), "Oren", false)
        .await
        .unwrap();

    assert!(created.schema.field("hits").is_some());
    assert!(created.schema.field("damage").is_none());

    let id = created.character.id;
    sheets
        .update_field(id, "hits", FieldValue::from(10))
        .await
        .unwrap();
    let result = sheets
        .update_field(id, "fatigue", FieldValue::from(15))
        .await
        .unwrap();

    assert_eq!(result.calculated.get("perilSum"), Some(&FieldValue::from(5)));
    assert_eq!(
        result.calculated.get("canFallUnconscious"),
        Some(&FieldValue::Bool(true))
    );

    sheets.delete_character(id).await.unwrap();
    assert!(sheets.get_sheet(id).await.is_err());
}

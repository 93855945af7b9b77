/*!
 * Integration tests for controller runs over files and directories
 */

use anyhow::Result;
use std::fs;

use snbt_trans::app_controller::Controller;
use snbt_trans::providers::mock::MockTranslator;
use snbt_trans::store::TranslationStore;
use crate::common;

#[test]
fn test_controller_withDefaultConfig_shouldInitialize() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().target_language, "ja");
    Ok(())
}

#[tokio::test]
async fn test_controller_withDirectory_shouldExtractTranslateAndMirrorOutput() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = temp_dir.path().join("quests");
    common::create_test_chapter(&input, "chapters/basics.snbt")?;
    common::create_test_file(&input, "chapters/extra.snbt", r#"description: ["Collect some wood.", "Go fishing."]"#)?;
    common::create_test_file(&input, "chapters/empty.snbt", "{ id: \"none\" }")?;
    let store_path = temp_dir.path().join("store.json");
    let output = temp_dir.path().join("translated");

    let controller = Controller::with_config(common::fast_config())?;

    let extract = controller.run_extract(&input, &store_path)?;
    assert_eq!(extract.documents, 3);
    assert_eq!(extract.total, 4);
    assert_eq!(extract.untranslated, 4);

    let summary = controller.translate_with(MockTranslator::working(), &store_path).await?;
    assert_eq!(summary.accepted, 4);

    let apply = controller.run_apply(&input, &store_path, &output, true)?;
    assert_eq!(apply.written, 2);
    assert_eq!(apply.substitutions, 5);

    let extra = fs::read_to_string(output.join("chapters/extra.snbt"))?;
    assert_eq!(
        extra,
        r#"description: ["[translated] Collect some wood.", "[translated] Go fishing."]"#
    );
    assert!(output.join("chapters/basics.snbt").exists());
    // Nothing to substitute, so no output
    assert!(!output.join("chapters/empty.snbt").exists());
    // Backups sit next to the inputs, which are unchanged
    assert!(input.join("chapters/basics.snbt.bak").exists());
    assert_eq!(fs::read_to_string(input.join("chapters/basics.snbt"))?, common::SAMPLE_CHAPTER);
    Ok(())
}

#[tokio::test]
async fn test_controller_translateWith_whenEverythingTranslated_shouldNotCallTranslator() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store_path = common::create_test_file(
        temp_dir.path(),
        "store.json",
        r#"[{ "source": "Hello", "target": "こんにちは" }]"#,
    )?;

    let controller = Controller::with_config(common::fast_config())?;
    let summary = controller.translate_with(MockTranslator::working(), &store_path).await?;

    assert_eq!(summary.pending, 0);
    assert_eq!(TranslationStore::load(&store_path)?.translated_count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_controller_runTranslate_withoutCredential_shouldFailBeforeLoadingStore() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store_path = temp_dir.path().join("store.json");

    let mut config = common::fast_config();
    config.provider.api_key_env = "SNBT_TRANS_TEST_KEY_THAT_IS_NEVER_SET".to_string();
    let controller = Controller::with_config(config)?;

    let result = controller.run_translate(&store_path).await;
    assert!(result.is_err());
    assert!(format!("{:#}", result.unwrap_err()).contains("SNBT_TRANS_TEST_KEY_THAT_IS_NEVER_SET"));
    assert!(!store_path.exists());
    Ok(())
}

#[test]
fn test_controller_runApply_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(common::fast_config())?;

    let result = controller.run_apply(
        &temp_dir.path().join("missing.snbt"),
        &temp_dir.path().join("store.json"),
        &temp_dir.path().join("out.snbt"),
        false,
    );
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_controller_runApply_inPlaceWithBackup_shouldReapplyFromBackup() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let chapter = common::create_test_chapter(temp_dir.path(), "basics.snbt")?;
    let store_path = temp_dir.path().join("store.json");
    let controller = Controller::with_config(common::fast_config())?;

    fs::write(&store_path, r#"[{ "source": "Collect some wood.", "target": "木を集めろ" }]"#)?;
    let first = controller.run_apply(&chapter, &store_path, &chapter, true)?;
    assert_eq!(first.written, 1);
    assert!(fs::read_to_string(&chapter)?.contains(r#""木を集めろ""#));

    // A corrected translation must replace the first one on the next run
    fs::write(&store_path, r#"[{ "source": "Collect some wood.", "target": "木を集める。" }]"#)?;
    let second = controller.run_apply(&chapter, &store_path, &chapter, true)?;
    assert_eq!(second.substitutions, 1);

    let written = fs::read_to_string(&chapter)?;
    assert!(written.contains(r#""木を集める。""#));
    assert!(!written.contains("木を集めろ"));
    assert!(written.contains(r#""Craft a workbench (any kind).""#));
    let backup = temp_dir.path().join("basics.snbt.bak");
    assert_eq!(fs::read_to_string(backup)?, common::SAMPLE_CHAPTER);
    Ok(())
}

/*!
 * Integration tests for the extract, translate and apply workflow
 */

use anyhow::Result;
use std::fs;

use snbt_trans::providers::mock::MockTranslator;
use snbt_trans::snbt::{SnbtDocument, extract_descriptions};
use snbt_trans::store::TranslationStore;
use snbt_trans::translation::TranslationDriver;
use snbt_trans::validation::ResponseValidator;
use crate::common;

/// Extract three strings, translate them, apply them: three substitutions
#[tokio::test]
async fn test_pipeline_withSampleChapter_shouldTranslateEveryDescription() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let chapter = common::create_test_chapter(temp_dir.path(), "chapter.snbt")?;
    let store_path = temp_dir.path().join("store.json");

    // 1. Extract and merge
    let document = SnbtDocument::load(&chapter)?;
    let mut store = TranslationStore::load_or_create(&store_path)?;
    let untranslated = store.merge(document.extract());
    store.save(&store_path)?;
    assert_eq!(untranslated, 3);

    // 2. Translate
    let translator = MockTranslator::with_translations([
        ("Collect some wood.", "木材を集めよう。"),
        ("Craft a workbench (any kind).", "作業台を作ろう(種類は問わない)。"),
        (r#"Mine \"iron\" ore."#, "「鉄」鉱石を掘ろう。"),
    ]);
    let config = common::fast_config();
    let mut driver = TranslationDriver::new(
        translator,
        config.driver.clone(),
        ResponseValidator::new(config.validation.clone()),
    );
    let summary = driver.translate_all(&mut store, &store_path, |_, _| {}).await?;
    assert_eq!(summary.accepted, 3);

    // 3. Apply from the saved store
    let saved = TranslationStore::load(&store_path)?;
    let outcome = document.apply(&saved);
    assert_eq!(outcome.substitution_count, 3);

    let translated = extract_descriptions(&outcome.content);
    assert_eq!(
        translated,
        vec!["木材を集めよう。", "作業台を作ろう(種類は問わない)。", "「鉄」鉱石を掘ろう。"]
    );
    assert!(outcome.content.contains("title: \"Getting Started\""));
    assert!(outcome.content.contains("id: \"5F1A\""));
    Ok(())
}

/// Re-extracting after the document grows keeps earlier translations
#[tokio::test]
async fn test_pipeline_withUpdatedDocument_shouldOnlyTranslateNewStrings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store_path = temp_dir.path().join("store.json");
    let config = common::fast_config();

    let mut store = TranslationStore::new();
    store.merge(extract_descriptions(r#"description: ["Old line"]"#));
    let mut first = TranslationDriver::new(
        MockTranslator::with_translations([("Old line", "古い行")]),
        config.driver.clone(),
        ResponseValidator::new(config.validation.clone()),
    );
    first.translate_all(&mut store, &store_path, |_, _| {}).await?;

    let mut store = TranslationStore::load(&store_path)?;
    store.merge(extract_descriptions(r#"description: ["Old line", "New line"]"#));
    let mut second = TranslationDriver::new(
        MockTranslator::working(),
        config.driver.clone(),
        ResponseValidator::new(config.validation.clone()),
    );
    second.translate_all(&mut store, &store_path, |_, _| {}).await?;

    assert_eq!(second.translator().requests(), vec!["New line"]);
    assert_eq!(store.find("Old line").map(|r| r.target.as_str()), Some("古い行"));
    Ok(())
}

/// A store written by the old tools is read, extended and saved canonically
#[test]
fn test_pipeline_withLegacyStore_shouldMergeAndRewriteCanonically() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store_path = common::create_test_file(
        temp_dir.path(),
        "store.json",
        r#"{
            "1": { "en": "Collect some wood.", "ja": "木材を集めよう。" },
            "2": { "en": "Unused line", "ja": "" }
        }"#,
    )?;

    let mut store = TranslationStore::load_or_create(&store_path)?;
    let untranslated = store.merge(extract_descriptions(common::SAMPLE_CHAPTER));
    store.save(&store_path)?;

    assert_eq!(untranslated, 3);
    assert_eq!(store.len(), 4);

    let content = fs::read_to_string(&store_path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let records = value.as_array().map(|a| a.len());
    assert_eq!(records, Some(4));
    assert_eq!(value[0]["source"], "Collect some wood.");
    assert_eq!(value[0]["target"], "木材を集めよう。");
    Ok(())
}

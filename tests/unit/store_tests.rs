/*!
 * Tests for the translation store file and the merge of extracted strings
 */

use anyhow::Result;
use std::fs;

use snbt_trans::errors::StoreError;
use snbt_trans::store::{TranslationRecord, TranslationStore};
use crate::common;

#[test]
fn test_merge_shouldNeverTouchExistingTargets() {
    let mut store = TranslationStore::from_records(vec![
        TranslationRecord::new("A", "あ"),
        TranslationRecord::untranslated("B"),
    ]);

    let untranslated = store.merge(["B", "C", "A", ""]);

    assert_eq!(untranslated, 2);
    let sources: Vec<_> = store.records().iter().map(|r| r.source.as_str()).collect();
    assert_eq!(sources, vec!["A", "B", "C"]);
    assert_eq!(store.find("A").map(|r| r.target.as_str()), Some("あ"));
}

#[test]
fn test_merge_twice_shouldBeIdempotent() {
    let mut store = TranslationStore::new();
    store.merge(["one", "two"]);
    let after_first = store.clone();
    store.merge(["one", "two"]);
    assert_eq!(store, after_first);
}

#[test]
fn test_saveAndLoad_shouldPreserveOrderAndUnicode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("store.json");

    let store = TranslationStore::from_records(vec![
        TranslationRecord::new("Collect wood.", "木材を集めよう。"),
        TranslationRecord::untranslated("Craft a table."),
    ]);
    store.save(&path)?;

    let written = fs::read_to_string(&path)?;
    assert!(written.contains("木材を集めよう。"));
    assert!(written.starts_with("[\n  {"));

    let loaded = TranslationStore::load(&path)?;
    assert_eq!(loaded, store);
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldReturnNotFound() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let result = TranslationStore::load(temp_dir.path().join("missing.json"));
    assert!(matches!(result, Err(StoreError::NotFound(_))));
    Ok(())
}

#[test]
fn test_loadOrCreate_withMalformedFile_shouldStartEmptyAndKeepCopy() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "store.json", "[{\"source\": ")?;

    let store = TranslationStore::load_or_create(&path)?;

    assert!(store.is_empty());
    let aside = temp_dir.path().join("store.json.malformed");
    assert_eq!(fs::read_to_string(aside)?, "[{\"source\": ");
    Ok(())
}

#[test]
fn test_load_withLegacyKeyedMapping_shouldKeepFileOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "legacy.json",
        r#"{
            "zeta": { "en": "Last key first", "ja": "最初" },
            "alpha": { "en": "Second", "ja": "" }
        }"#,
    )?;

    let store = TranslationStore::load(&path)?;

    assert_eq!(store.records()[0], TranslationRecord::new("Last key first", "最初"));
    assert_eq!(store.records()[1], TranslationRecord::untranslated("Second"));
    Ok(())
}

#[test]
fn test_load_withLegacyWrapper_shouldReadRecordsAndConvertOnSave() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "batch.json",
        r#"{ "file": "chapter.snbt", "descriptions": [
            { "original": "Hello", "translated": "こんにちは" },
            { "original": "Hello", "translated": "duplicate" },
            { "original": "", "translated": "orphan" }
        ] }"#,
    )?;

    let store = TranslationStore::load(&path)?;
    assert_eq!(store.records(), &[TranslationRecord::new("Hello", "こんにちは")]);

    store.save(&path)?;
    let canonical = fs::read_to_string(&path)?;
    assert!(canonical.contains("\"source\": \"Hello\""));
    assert!(!canonical.contains("descriptions"));
    Ok(())
}

#[test]
fn test_load_withScalarDocument_shouldBeMalformed() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "store.json", "42")?;
    assert!(matches!(TranslationStore::load(&path), Err(StoreError::Malformed { .. })));
    Ok(())
}

/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;

use snbt_trans::file_utils::{FileManager, SNBT_EXTENSION};
use crate::common;

#[test]
fn test_fileExists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "quest.snbt", "{}")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    Ok(())
}

#[test]
fn test_writeToFile_shouldCreateParentDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("out/chapters/a.snbt");

    FileManager::write_to_file(&nested, "content")?;
    assert_eq!(FileManager::read_to_string(&nested)?, "content");
    Ok(())
}

#[test]
fn test_findFiles_withNestedQuestBook_shouldReturnSortedSnbtFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "quests/chapters/mining.snbt", "{}")?;
    common::create_test_file(temp_dir.path(), "quests/chapters/basics.snbt", "{}")?;
    common::create_test_file(temp_dir.path(), "quests/data.snbt", "{}")?;
    common::create_test_file(temp_dir.path(), "quests/data.snbt.bak", "{}")?;

    let files = FileManager::find_files(temp_dir.path().join("quests"), SNBT_EXTENSION)?;
    let names: Vec<_> = files
        .iter()
        .map(|f| f.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();

    assert_eq!(
        names,
        vec![
            "quests/chapters/basics.snbt",
            "quests/chapters/mining.snbt",
            "quests/data.snbt",
        ]
    );
    Ok(())
}

#[test]
fn test_createBackup_withMissingFile_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    assert!(FileManager::create_backup(temp_dir.path().join("missing.snbt")).is_err());
    Ok(())
}

#[test]
fn test_createBackup_shouldWriteSiblingBakFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_chapter(temp_dir.path(), "chapter.snbt")?;

    assert!(FileManager::create_backup(&file)?);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("chapter.snbt.bak"))?,
        common::SAMPLE_CHAPTER
    );
    Ok(())
}

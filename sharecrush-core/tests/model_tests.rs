// sharecrush-core/tests/model_tests.rs
//
// Sample table persistence and merge semantics.

use sharecrush_core::{Sample, SampleTable};
use tempfile::tempdir;

fn sample(original: &str, target: &str, crf: u8, source: &str) -> Sample {
    Sample {
        original_res: original.parse().unwrap(),
        target_res: target.parse().unwrap(),
        crf,
        profile: "Main".to_string(),
        source_file: source.to_string(),
    }
}

#[test]
fn test_load_or_default_missing_file_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let table = SampleTable::load_or_default(&dir.path().join("missing.json"))?;
    assert!(table.is_empty());
    Ok(())
}

#[test]
fn test_load_missing_file_is_an_error() {
    let result = SampleTable::load(std::path::Path::new("surely/does/not/exist.json"));
    assert!(result.is_err());
}

#[test]
fn test_save_then_load_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("model.json");

    let mut table = SampleTable::default();
    table.append(
        "Youtube",
        "libx264",
        vec![
            sample("1920x1080", "1280x720", 24, "a.mp4"),
            sample("1280x720", "640x360", 28, "b.mp4"),
        ],
    );
    table.save(&path)?;

    let loaded = SampleTable::load(&path)?;
    assert_eq!(loaded, table);
    assert_eq!(loaded.bucket_len("Youtube", "libx264"), 2);
    Ok(())
}

#[test]
fn test_load_then_save_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("model.json");

    let mut table = SampleTable::default();
    table.append("Facebook", "libx264", vec![sample("1280x720", "960x540", 30, "c.mp4")]);
    table.append("Youtube", "libx265", vec![sample("1920x1080", "1280x720", 22, "d.mp4")]);
    table.save(&path)?;

    // Load and immediately save without touching any bucket.
    let loaded = SampleTable::load(&path)?;
    let resaved_path = dir.path().join("resaved.json");
    loaded.save(&resaved_path)?;

    let reloaded = SampleTable::load(&resaved_path)?;
    assert_eq!(reloaded, loaded);
    // BTreeMap keys make the serialized documents identical as well.
    assert_eq!(
        std::fs::read_to_string(&path)?,
        std::fs::read_to_string(&resaved_path)?
    );
    Ok(())
}

#[test]
fn test_append_preserves_foreign_buckets() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("model.json");

    // A model file written by an earlier run against another platform,
    // in the exact on-disk shape.
    let existing = r#"{
        "Facebook": {
            "libx264": [
                {
                    "original_res": "1280x720",
                    "target_res": "960x540",
                    "crf": 33,
                    "profile": "Main",
                    "source_file": "old.mp4"
                }
            ]
        }
    }"#;
    std::fs::write(&path, existing)?;

    let mut table = SampleTable::load_or_default(&path)?;
    table.append("Youtube", "libx264", vec![sample("1920x1080", "1280x720", 24, "new.mp4")]);
    table.save(&path)?;

    let reloaded = SampleTable::load(&path)?;
    assert_eq!(reloaded.bucket_len("Facebook", "libx264"), 1);
    assert_eq!(reloaded.bucket_len("Youtube", "libx264"), 1);
    let old = &reloaded.bucket("Facebook", "libx264").unwrap()[0];
    assert_eq!(old.crf, 33);
    assert_eq!(old.source_file, "old.mp4");
    Ok(())
}

#[test]
fn test_append_to_existing_bucket_keeps_order() {
    let mut table = SampleTable::default();
    table.append("Youtube", "libx264", vec![sample("1920x1080", "1280x720", 20, "a.mp4")]);
    table.append("Youtube", "libx264", vec![sample("1920x1080", "1280x720", 26, "b.mp4")]);

    let bucket = table.bucket("Youtube", "libx264").unwrap();
    assert_eq!(bucket.len(), 2);
    assert_eq!(bucket[0].source_file, "a.mp4");
    assert_eq!(bucket[1].source_file, "b.mp4");
}

#[test]
fn test_bucket_missing_is_none() {
    let table = SampleTable::default();
    assert!(table.bucket("Youtube", "libx264").is_none());
    assert_eq!(table.bucket_len("Youtube", "libx264"), 0);
}

use crate::external::{
    brightness::BrightnessValue,
    state::{file::FileStateStore, StateStore, StateStoreError},
};

fn value(v: u8) -> BrightnessValue {
    BrightnessValue::new(v).unwrap()
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStateStore::new(dir.path().join("brightness.value"));
    assert!(matches!(
        store.load().await,
        Err(StateStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brightness.value");
    let store = FileStateStore::new(&path);
    store.save(value(83)).await.expect("Couldn't save value");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "83");
    assert_eq!(store.load().await.unwrap(), value(83));

    store.save(BrightnessValue::MIN).await.expect("Couldn't overwrite value");
    assert_eq!(store.load().await.unwrap(), BrightnessValue::MIN);
}

#[tokio::test]
async fn test_whitespace_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brightness.value");
    std::fs::write(&path, " 67\n").unwrap();
    assert_eq!(FileStateStore::new(&path).load().await.unwrap(), value(67));
}

#[tokio::test]
async fn test_corrupt_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brightness.value");
    let store = FileStateStore::new(&path);
    for contents in ["", "bright", "-5", "101", "4 2"] {
        std::fs::write(&path, contents).unwrap();
        assert!(
            matches!(store.load().await, Err(StateStoreError::Corrupt { .. })),
            "{:?} was not reported as corrupt",
            contents
        );
    }
    std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
    assert!(matches!(
        store.load().await,
        Err(StateStoreError::Corrupt { .. })
    ));
}

#[tokio::test]
async fn test_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache").join("ddc").join("brightness.value");
    let store = FileStateStore::new(&path);
    store.save(value(50)).await.expect("Couldn't save value");
    assert_eq!(store.load().await.unwrap(), value(50));
}

#[tokio::test]
async fn test_unwritable_location() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file can't be used as a directory
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let store = FileStateStore::new(blocker.join("brightness.value"));
    assert!(matches!(
        store.save(value(50)).await,
        Err(StateStoreError::Write { .. })
    ));
}

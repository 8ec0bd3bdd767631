use mizan_client::history::{
    EntrySource, FileStorage, HistoryCache, KeyValueStorage, NewHistoryEntry,
    HISTORY_STORAGE_KEY,
};
use mizan_client::{AbjadSystem, LetterCountMethod};

fn custom_entry(text: &str, abjad_value: u64) -> NewHistoryEntry {
    NewHistoryEntry {
        text: text.to_string(),
        letter_count: text.chars().count() as u64,
        word_count: 1,
        abjad_value,
        letter_method: LetterCountMethod::Traditional,
        abjad_system: AbjadSystem::Mashriqi,
        source: EntrySource::Custom,
        surah: None,
        ayah: None,
    }
}

#[test]
fn history_should_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    let recorded = {
        let mut cache = HistoryCache::open(FileStorage::new(dir.path()), 50);
        cache.add_entry(custom_entry("بسم", 102));
        cache.add_entry(custom_entry("الله", 66));
        cache.entries().to_vec()
    };

    let reopened = HistoryCache::open(FileStorage::new(dir.path()), 50);

    assert_eq!(reopened.entries(), recorded.as_slice());
    assert_eq!(reopened.entries()[0].text, "الله");
}

#[test]
fn history_should_keep_newest_fifty_across_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cache = HistoryCache::open(FileStorage::new(dir.path()), 50);
        for i in 0..60u64 {
            cache.add_entry(custom_entry(&format!("entry {i}"), i));
        }
    }

    let reopened = HistoryCache::open(FileStorage::new(dir.path()), 50);

    assert_eq!(reopened.len(), 50);
    assert_eq!(reopened.entries()[0].abjad_value, 59);
    assert_eq!(reopened.entries()[49].abjad_value, 10);
}

#[test]
fn cleared_history_should_stay_empty_after_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut cache = HistoryCache::open(FileStorage::new(dir.path()), 50);
        cache.add_entry(custom_entry("بسم", 102));
        cache.clear_history();
    }

    let storage = FileStorage::new(dir.path());
    assert_eq!(
        storage.read(HISTORY_STORAGE_KEY).unwrap().as_deref(),
        Some("[]")
    );
    assert!(HistoryCache::open(storage, 50).is_empty());
}

#[test]
fn removed_entry_should_stay_removed_after_restart() {
    let dir = tempfile::tempdir().unwrap();

    let kept_id = {
        let mut cache = HistoryCache::open(FileStorage::new(dir.path()), 50);
        let removed = cache.add_entry(custom_entry("بسم", 102));
        let kept = cache.add_entry(custom_entry("الله", 66));
        cache.remove_entry(&removed.id);
        kept.id
    };

    let reopened = HistoryCache::open(FileStorage::new(dir.path()), 50);

    assert_eq!(reopened.len(), 1);
    assert!(reopened.get(&kept_id).is_some());
}

#[test]
fn lazily_hydrated_cache_should_merge_with_durable_history() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut cache = HistoryCache::open(FileStorage::new(dir.path()), 50);
        cache.add_entry(custom_entry("بسم", 102));
    }

    let mut cache = HistoryCache::new(FileStorage::new(dir.path()), 50);
    assert!(cache.is_empty());

    cache.add_entry(custom_entry("الله", 66));

    assert!(cache.is_hydrated());
    let texts: Vec<&str> = cache.entries().iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["الله", "بسم"]);
}

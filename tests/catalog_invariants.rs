//! Catalog Invariant Tests
//!
//! Store-level properties:
//! - Category names are unique
//! - Concurrent votes are never lost
//! - Invalid vote types never reach the store
//! - Category listings match the link table exactly
//! - Links are never duplicated
//! - Pooled readers observe every committed write
//! - File-backed stores survive reopening

use std::collections::BTreeSet;
use std::thread;

use jokebox::store::{CatalogError, JokeStore, VoteType};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_file_store() -> (TempDir, JokeStore) {
    let tmp = TempDir::new().unwrap();
    let store = JokeStore::open(tmp.path().join("joke.db")).unwrap();
    (tmp, store)
}

// =============================================================================
// Uniqueness
// =============================================================================

#[test]
fn test_category_created_twice_conflicts() {
    let store = JokeStore::open_in_memory().unwrap();
    for name in ["puns", "knock-knock", "dad jokes"] {
        assert!(store.create_category(name).is_ok());
        assert!(matches!(
            store.create_category(name),
            Err(CatalogError::Conflict(_))
        ));
    }
    assert_eq!(store.list_categories().unwrap().len(), 3);
}

#[test]
fn test_duplicate_link_keeps_single_association() {
    let store = JokeStore::open_in_memory().unwrap();
    store.create_category("puns").unwrap();
    store.create_category("classics").unwrap();
    let joke = store.create_joke_in_category("puns", "Why...").unwrap();

    store.link_joke_to_category(joke.id, "classics").unwrap();
    let second = store.link_joke_to_category(joke.id, "classics");
    assert!(matches!(second, Err(CatalogError::Conflict(_))));

    let linked = store.jokes_in_category("classics").unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, joke.id);
}

// =============================================================================
// Votes
// =============================================================================

#[test]
fn test_concurrent_votes_are_not_lost() {
    let (_tmp, store) = setup_file_store();
    store.create_category("puns").unwrap();
    let joke = store.create_joke_in_category("puns", "x").unwrap();

    const LIKES: usize = 40;
    const DISLIKES: usize = 25;

    let mut handles = Vec::new();
    for i in 0..(LIKES + DISLIKES) {
        let store = store.clone();
        let vote = if i < LIKES {
            VoteType::Like
        } else {
            VoteType::Dislike
        };
        handles.push(thread::spawn(move || store.vote(joke.id, vote).unwrap()));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let stored = store.joke_by_id(joke.id).unwrap();
    assert_eq!(stored.likes, LIKES as i64);
    assert_eq!(stored.dislikes, DISLIKES as i64);

    let tally = store.vote_tally(joke.id).unwrap();
    assert_eq!((tally.likes, tally.dislikes), (stored.likes, stored.dislikes));
}

#[test]
fn test_invalid_vote_type_is_rejected_before_store() {
    let store = JokeStore::open_in_memory().unwrap();
    store.create_category("puns").unwrap();
    let joke = store.create_joke_in_category("puns", "x").unwrap();

    for raw in ["", "LIKE", "love", "dislikes", " like"] {
        assert!(matches!(
            raw.parse::<VoteType>(),
            Err(CatalogError::Validation(_))
        ));
    }

    let stored = store.joke_by_id(joke.id).unwrap();
    assert_eq!((stored.likes, stored.dislikes), (0, 0));
}

// =============================================================================
// Jokes and Categories
// =============================================================================

#[test]
fn test_created_joke_reads_back_with_zero_counters() {
    let store = JokeStore::open_in_memory().unwrap();
    store.create_category("puns").unwrap();
    let created = store.create_joke_in_category("puns", "Why...").unwrap();
    assert_eq!(created.category, "puns");

    let joke = store.joke_by_id(created.id).unwrap();
    assert_eq!(joke.text, "Why...");
    assert_eq!((joke.likes, joke.dislikes), (0, 0));
}

#[test]
fn test_listing_matches_links_regardless_of_order() {
    let store = JokeStore::open_in_memory().unwrap();
    store.create_category("source").unwrap();
    store.create_category("target").unwrap();

    let ids: Vec<i64> = (0..5)
        .map(|i| {
            store
                .create_joke_in_category("source", &format!("joke {}", i))
                .unwrap()
                .id
        })
        .collect();

    // Link in reverse, skipping one.
    let linked: BTreeSet<i64> = ids.iter().rev().skip(1).copied().collect();
    for id in &linked {
        store.link_joke_to_category(*id, "target").unwrap();
    }

    let listed: BTreeSet<i64> = store
        .jokes_in_category("target")
        .unwrap()
        .into_iter()
        .map(|j| j.id)
        .collect();
    assert_eq!(listed, linked);

    assert!(store.jokes_in_category("missing").unwrap().is_empty());
}

#[test]
fn test_failed_create_leaves_no_orphan_joke() {
    let store = JokeStore::open_in_memory().unwrap();
    assert!(matches!(
        store.create_joke_in_category("absent", "text"),
        Err(CatalogError::NotFound(_))
    ));
    assert!(store.random_joke().unwrap().is_none());

    store.create_category("present").unwrap();
    let created = store.create_joke_in_category("present", "text").unwrap();
    assert_eq!(created.id, 1);
}

// =============================================================================
// Connection Pool
// =============================================================================

#[test]
fn test_pooled_readers_see_committed_writes() {
    let tmp = TempDir::new().unwrap();
    let store = JokeStore::open_with_readers(tmp.path().join("joke.db"), 3).unwrap();
    store.create_category("puns").unwrap();

    // Every write must be visible on whichever reader the next read lands on.
    for i in 0..12 {
        let joke = store
            .create_joke_in_category("puns", &format!("joke {}", i))
            .unwrap();
        store.vote(joke.id, VoteType::Like).unwrap();
        assert_eq!(store.joke_by_id(joke.id).unwrap().likes, 1);
        assert_eq!(store.jokes_in_category("puns").unwrap().len(), i + 1);
    }
}

#[test]
fn test_concurrent_reads_and_writes() {
    let (_tmp, store) = setup_file_store();
    store.create_category("puns").unwrap();
    let joke = store.create_joke_in_category("puns", "x").unwrap();

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(thread::spawn(move || {
            if i % 2 == 0 {
                store.vote(joke.id, VoteType::Dislike).unwrap();
            } else {
                assert!(store.random_joke().unwrap().is_some());
                assert_eq!(store.list_categories().unwrap().len(), 1);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.joke_by_id(joke.id).unwrap().dislikes, 8);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_reopen_keeps_data() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("joke.db");

    {
        let store = JokeStore::open(&path).unwrap();
        store.create_category("puns").unwrap();
        let joke = store.create_joke_in_category("puns", "x").unwrap();
        store.vote(joke.id, VoteType::Like).unwrap();
    }

    let store = JokeStore::open(&path).unwrap();
    let joke = store.joke_by_id(1).unwrap();
    assert_eq!(joke.likes, 1);
    assert!(matches!(
        store.create_category("puns"),
        Err(CatalogError::Conflict(_))
    ));
}

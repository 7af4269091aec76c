//! Profile tracker behavior under concurrent updates.

use std::sync::Arc;

use stargazer::{Language, ProfileTracker, StargazerError, ZodiacSign};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_records_are_not_lost() {
    let tracker = Arc::new(ProfileTracker::new());
    let id = tracker.identify("Ritika", "1995-08-20");
    tracker.get_or_create(&id, "Ritika");

    let mut handles = Vec::new();
    for i in 0..32 {
        let tracker = tracker.clone();
        let id = id.clone();
        handles.push(tokio::spawn(async move {
            let sign = if i % 4 == 0 {
                ZodiacSign::Aries
            } else {
                ZodiacSign::Leo
            };
            tracker
                .record_request(&id, sign, "Leadership and warmth guide today", Language::English)
                .map(|_| ())
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let profile = tracker.get(&id).unwrap();
    assert_eq!(profile.history.len(), 32);
    assert_eq!(profile.favorite_theme, Some(ZodiacSign::Leo));
    assert_eq!(profile.request_frequency(), "frequent");
    assert!(profile.recent_keywords.contains(&"leadership".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_get_or_create_yields_one_profile() {
    let tracker = Arc::new(ProfileTracker::new());

    let mut handles = Vec::new();
    for _ in 0..16 {
        let tracker = tracker.clone();
        handles.push(tokio::spawn(async move {
            let id = tracker.identify("Arjun", "1990-04-02");
            tracker.get_or_create(&id, "Arjun").created_at
        }));
    }

    let mut created = Vec::new();
    for handle in handles {
        created.push(handle.await.unwrap());
    }

    assert_eq!(tracker.len(), 1);
    assert!(created.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn identity_is_stable_and_distinct() {
    let tracker = ProfileTracker::new();
    let a = tracker.identify("Ritika", "1995-08-20");
    let b = tracker.identify("Ritika", "1995-08-20");
    let c = tracker.identify("Ritika", "1995-08-21");

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn recording_against_unknown_profile_fails() {
    let tracker = ProfileTracker::new();
    let id = tracker.identify("Nobody", "2000-01-01");

    let err = tracker
        .record_request(&id, ZodiacSign::Leo, "text", Language::English)
        .unwrap_err();
    assert!(matches!(err, StargazerError::ProfileNotFound(_)));
}

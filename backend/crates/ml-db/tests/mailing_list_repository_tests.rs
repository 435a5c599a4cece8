mod common;

use common::{create_test_list, create_test_pool};

use ml_db::{DbError, MailingListRepository, SubscriptionRepository};

use googletest::prelude::*;

#[tokio::test]
async fn given_created_list_when_found_by_name_then_returns_id() {
    // Given
    let pool = create_test_pool().await;
    let repo = MailingListRepository::new(pool.clone());
    let id = repo.create("news", "Weekly news").await.unwrap();

    // When
    let found = repo.find_id_by_name("news").await.unwrap();

    // Then
    assert_that!(found, some(eq(id)));
}

#[tokio::test]
async fn given_empty_database_when_finding_unknown_name_then_none() {
    let pool = create_test_pool().await;
    let repo = MailingListRepository::new(pool);

    let found = repo.find_id_by_name("missing").await.unwrap();

    assert_that!(found, none());
}

#[tokio::test]
async fn given_unknown_name_when_require_id_then_list_not_found() {
    let pool = create_test_pool().await;
    let repo = MailingListRepository::new(pool);

    let result = repo.require_id_by_name("missing").await;

    assert!(matches!(result, Err(DbError::ListNotFound { ref name, .. }) if name == "missing"));
}

#[tokio::test]
async fn given_existing_name_when_created_again_then_same_id_returned() {
    // Given
    let pool = create_test_pool().await;
    let repo = MailingListRepository::new(pool.clone());
    let first = repo.create("news", "Weekly news").await.unwrap();

    // When
    let second = repo.create("news", "A different description").await.unwrap();

    // Then
    assert_that!(second, eq(first));
    let list = repo.find_by_name("news").await.unwrap().unwrap();
    assert_that!(list.description.as_str(), eq("Weekly news"));
}

#[tokio::test]
async fn given_lists_with_subscribers_when_summarised_then_counts_include_empty_lists() {
    // Given
    let pool = create_test_pool().await;
    let news = create_test_list(&pool, "news").await;
    let _announce = create_test_list(&pool, "announce").await;
    let subs = SubscriptionRepository::new(pool.clone());
    subs.subscribe(news, "a@x.com").await.unwrap();
    subs.subscribe(news, "b@x.com").await.unwrap();

    // When
    let summaries = MailingListRepository::new(pool)
        .find_all_summaries()
        .await
        .unwrap();

    // Then: ordered by name
    assert_that!(summaries.len(), eq(2));
    assert_that!(summaries[0].name.as_str(), eq("announce"));
    assert_that!(summaries[0].subscriber_count, eq(0));
    assert_that!(summaries[1].name.as_str(), eq("news"));
    assert_that!(summaries[1].subscriber_count, eq(2));
}

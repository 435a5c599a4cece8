use crate::{BroadcastJob, Subscriber};

use googletest::prelude::*;

fn job_with(subscribers: Vec<Subscriber>) -> BroadcastJob {
    BroadcastJob::new(
        "news",
        "Hello",
        "First line\nSecond line",
        subscribers,
        "https://lists.example.com/",
    )
}

#[test]
fn given_trailing_slash_web_root_when_job_created_then_slash_trimmed() {
    let job = job_with(vec![]);

    assert_that!(job.web_root(), eq("https://lists.example.com"));
}

#[test]
fn given_list_and_domain_when_sender_address_then_prefixed_identity() {
    let job = job_with(vec![]);

    assert_that!(
        job.sender_address("mailer", "mx.example.com"),
        eq("mailer-news@mx.example.com")
    );
}

#[test]
fn given_snapshot_when_job_created_then_order_preserved() {
    let job = job_with(vec![
        Subscriber::new("a@x.com", "tok-a"),
        Subscriber::new("b@x.com", "tok-b"),
    ]);

    let emails: Vec<&str> = job.subscribers().iter().map(|s| s.email.as_str()).collect();
    assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    assert_that!(job.recipient_count(), eq(2));
}

#[test]
fn given_source_vec_mutated_after_capture_when_reading_job_then_snapshot_unchanged() {
    let mut subscribers = vec![Subscriber::new("a@x.com", "tok-a")];
    let job = job_with(subscribers.clone());

    subscribers.push(Subscriber::new("late@x.com", "tok-late"));
    subscribers.remove(0);

    assert_that!(job.recipient_count(), eq(1));
    assert_that!(job.subscribers()[0].email.as_str(), eq("a@x.com"));
}

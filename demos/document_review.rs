//! Document Review Workflow
//!
//! A linear approval workflow where handlers enforce rules.
//!
//! Key concepts:
//! - Handlers validate a transition and can refuse it
//! - A refused transition leaves the current state where it was
//! - `change` with `run = false` forces a move past the handlers
//! - The traversal history records the path taken
//!
//! Run with: cargo run --example document_review

use statewire::{Handler, HandlerError, States, StatesError, Subscriber};
use std::sync::{Arc, Mutex};

struct Document {
    title: String,
    word_count: usize,
}

fn main() -> Result<(), StatesError> {
    println!("=== Document Review ===\n");

    let doc = Arc::new(Mutex::new(Document {
        title: String::new(),
        word_count: 40,
    }));

    let submitted = Arc::clone(&doc);
    let require_content = Handler::new(move |_| {
        let doc = submitted.lock().map_err(|_| HandlerError::new("document unavailable"))?;
        if doc.title.is_empty() {
            return Err(HandlerError::new("document needs a title"));
        }
        if doc.word_count < 100 {
            return Err(HandlerError::new(format!(
                "document has {} words, needs at least 100",
                doc.word_count
            )));
        }
        Ok(())
    });

    let mut workflow = States::with_id("review");
    workflow
        .when("draft", "review", Some("submit"), Some(require_content))?
        .when("review", "approved", Some("approve"), None)?
        .when("review", "draft", Some("reject"), None)?
        .when("approved", "published", Some("publish"), None)?;

    workflow.subscribe(
        Subscriber::new(|t| println!("  audit: {} -> {}", t.from(), t.to())),
        false,
    );

    println!("Submitting an empty draft:");
    if let Err(err) = workflow.execute("submit") {
        println!("  refused: {err}");
    }
    println!("  still in {:?}\n", workflow.current());

    {
        let mut doc = doc.lock().expect("document lock poisoned");
        doc.title = "Quarterly report".to_string();
        doc.word_count = 1200;
    }

    println!("Submitting the finished draft:");
    workflow.execute("submit")?;
    workflow.execute("approve")?;
    workflow.execute("publish")?;
    println!("  now in {:?}\n", workflow.current());

    println!("Path taken: {}", workflow.history().path().join(" -> "));

    workflow.dispose();
    println!("\n=== Example Complete ===");
    Ok(())
}

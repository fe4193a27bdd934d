use circulation_desk::{
    adapters::SystemClock,
    application::library::{LibraryService, demo_service},
    config::LibraryConfig,
    domain::{Isbn, MemberId},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "circulation_desk=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LibraryConfig::from_env()?;
    tracing::info!("Daily fine rate: {}", config.daily_fine_rate);

    let mut library = demo_service(config, Arc::new(SystemClock::new()));
    let member = MemberId::new(42);
    let isbn = Isbn::new("978-0132350884");

    let due = library.default_due_date()?;
    let receipt = library.borrow_book(member, &isbn, due)?;
    println!("Borrowed: {}", serde_json::to_string(&receipt)?);

    // Fast-forward two days past the due date
    let later = due + chrono::Days::new(2);
    let fine = library.calculate_fine(member, later)?;
    println!("Fine due: {fine}");

    let receipt = library.return_book(member, &isbn, later)?;
    println!("Returned: {}", serde_json::to_string(&receipt)?);

    let results = library.search_books("java", &[], 10, 0)?;
    println!("Search result: {}", serde_json::to_string(&results)?);

    Ok(())
}

//! In-memory test doubles shared by the integration tests.

mod mock_contact_repository;
mod mock_notifier;

pub use mock_contact_repository::MockContactRepository;
pub use mock_notifier::{ProbeNotifier, RecordingClient};

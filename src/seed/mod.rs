mod fixtures;
mod loader;

pub use fixtures::fixture_users;
pub use loader::{run, SeedReport};

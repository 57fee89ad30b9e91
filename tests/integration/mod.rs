//! Integration tests driving the shiprail binary against real git repositories

mod helpers;
mod test_changelog;
mod test_check;
mod test_init;
mod test_notes;
mod test_release;

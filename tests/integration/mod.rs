//! Integration tests for the multiplayer session log

mod file_session;
mod session_lifecycle;
mod test_utils;

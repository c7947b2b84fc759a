pub mod fake_session;

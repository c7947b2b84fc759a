pub mod config;
pub mod error;
pub mod joblist;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod session;
pub mod storage;
pub mod url_model;
pub mod watch;

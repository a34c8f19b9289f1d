pub mod check;
pub mod forwarder;
pub mod frame;
pub mod stdin_handler;

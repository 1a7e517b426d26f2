pub mod hold;
pub mod mapper;
pub mod targets;
pub mod touch;
pub mod viewport;

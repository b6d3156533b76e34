pub(crate) mod config;
pub(crate) mod settings;
pub(crate) mod time;

pub mod clean;
pub mod dispatcher;
pub mod text;

pub use dispatcher::Dispatcher;

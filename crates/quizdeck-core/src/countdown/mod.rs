mod engine;

pub use engine::{CountdownEngine, CountdownStatus};

pub(crate) use engine::now_ms;

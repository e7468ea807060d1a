//! Built-in games used by tests, benches and examples.

pub mod nim;

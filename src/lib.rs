// Library surface for headless/integration tests and reuse.
// The ui module stays out: it renders the binary's App and would drag
// the whole terminal host in here with it.
pub mod config;
pub mod diff;
pub mod meter;
pub mod runtime;
pub mod samples;
pub mod util;

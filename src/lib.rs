// Pedantic lint configuration for the crate.
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are confined to static regex construction
// - module_name_repetitions: Types like `VoiceTones` read better than `Tones`
// - too_many_lines: Parsers and handlers keep their logic cohesive
// - cast_precision_loss: Only used for log output
// - needless_pass_by_value: Sometimes clearer semantically
// - option_if_let_else: if-let is often clearer
// - manual_let_else: if-let with early return is often clearer in context
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::cast_precision_loss,
    clippy::needless_pass_by_value,
    clippy::option_if_let_else,
    clippy::manual_let_else
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod server;
pub mod speech;

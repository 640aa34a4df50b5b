//! Chat-bot command routing over a loaded dataset.

mod command;
mod matcher;
mod router;
mod transport;

pub use command::{Command, UnknownCommand};
pub use matcher::{KeywordLanguage, KeywordMatcher, KeywordRule, Matcher};
pub use router::{Reply, Router};
pub use transport::{run_console, ConsoleSink, ReplySink};

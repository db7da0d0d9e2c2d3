//! Topic layout under the shared prefix.

use homedash_domain::message::COMMAND_TOPIC;

/// Topic names derived from the configured prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    prefix: String,
}

impl Topics {
    /// `prefix` is expected to end with `/`; one is appended otherwise.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let mut prefix = prefix.to_string();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self { prefix }
    }

    /// Wildcard filter covering the whole tree.
    #[must_use]
    pub fn subscription(&self) -> String {
        format!("{}#", self.prefix)
    }

    /// Topic commands are published on.
    #[must_use]
    pub fn command(&self) -> String {
        format!("{}{COMMAND_TOPIC}", self.prefix)
    }

    /// Strip the prefix from `topic`, or `None` when it lies outside the tree.
    #[must_use]
    pub fn relative<'a>(&self, topic: &'a str) -> Option<&'a str> {
        topic.strip_prefix(self.prefix.as_str())
    }
}

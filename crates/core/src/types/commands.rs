//! Argument lists for external client invocations

/// Owned argument vector passed to a spawned process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArguments(Vec<String>);

impl CommandArguments {
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append arguments in order
    pub fn extend<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(args.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl<const N: usize> From<[&str; N]> for CommandArguments {
    fn from(args: [&str; N]) -> Self {
        Self(args.iter().map(|s| (*s).to_string()).collect())
    }
}

//! Errors for the host-facing surface. Frame assembly itself never fails.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuiError {
    #[error("terminal {op} failed: {source}")]
    Terminal {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl GuiError {
    /// Adapter for `map_err` on terminal I/O calls.
    pub(crate) fn terminal(op: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Terminal { op, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_error_message() {
        let err = GuiError::terminal("flush")(std::io::Error::other("closed"));
        assert_eq!(err.to_string(), "terminal flush failed: closed");
    }
}

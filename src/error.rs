//! Errors raised by the graph itself. Domain transition failures are not wrapped:
//! `sample_state` hands back the domain's own error type.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("{property} is derived from the graph and can not be set")]
    ReadOnly { property: &'static str },
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_message_names_property() {
        let err = GraphError::ReadOnly { property: "untried_actions" };
        assert_eq!(err.to_string(), "untried_actions is derived from the graph and can not be set");
    }
}

use crate::kind::BindingKind;

/// Static misconfiguration detected while building [`Bindings`](crate::Bindings).
///
/// Always fatal to construction; retrying with the same configuration fails
/// the same way.
#[derive(Debug)]
pub enum ConfigError {
    /// `type` is neither a registered name nor a function. Carries a
    /// rendering of the offending value.
    UnknownType(String),
    MissingName { key: String, kind: BindingKind },
    MissingCases { key: String, kind: BindingKind },
    /// A case value has the wrong shape for its binding type.
    InvalidCase { key: String, case: String },
    InvalidMode { key: String, mode: String },
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::UnknownType(rendered) => write!(f, "no such binding type: {rendered}"),
            ConfigError::MissingName { key, kind } => {
                write!(f, "{kind} binding for {key:?} must have a \"name\"")
            }
            ConfigError::MissingCases { key, kind } => {
                write!(f, "{kind} binding for {key:?} must have \"cases\"")
            }
            ConfigError::InvalidCase { key, case } => {
                write!(f, "case {case:?} of binding {key:?} must be a selector string")
            }
            ConfigError::InvalidMode { key, mode } => write!(
                f,
                "binding {key:?} has mode {mode:?}; expected \"display\" or \"visibility\""
            ),
            ConfigError::Json(err) => write!(f, "invalid bindings json: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// Output format of every log line.
    ///
    /// **Environment variables**:
    /// - `USER_SERVICE_LOGGING_STYLE`
    pub style: LoggingStyle,
    /// Filtering directives with the same syntax as `RUST_LOG`.
    ///
    /// If it is not set, `RUST_LOG` will be used instead.
    ///
    /// **Environment variables**:
    /// - `USER_SERVICE_LOGGING_TARGETS`
    pub targets: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoggingStyle {
    Compact,
    #[default]
    Full,
    Pretty,
    JSON,
}

impl Display for LoggingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => f.write_str("compact"),
            Self::Full => f.write_str("full"),
            Self::Pretty => f.write_str("pretty"),
            Self::JSON => f.write_str("json"),
        }
    }
}

impl<'de> Deserialize<'de> for LoggingStyle {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = LoggingStyle;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("logging style")
            }

            fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                LoggingStyle::from_str(v).map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[derive(Debug, Error)]
#[error("unknown {0:?} logging style")]
pub struct InvalidLoggingStyle(String);

impl FromStr for LoggingStyle {
    type Err = InvalidLoggingStyle;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.to_lowercase();
        match s.as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::JSON),
            _ => Err(InvalidLoggingStyle(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[test]
    fn test_from_str() {
        assert_eq!(LoggingStyle::from_str("JSON").ok(), Some(LoggingStyle::JSON));
        assert_eq!(LoggingStyle::from_str("pretty").ok(), Some(LoggingStyle::Pretty));
        assert!(LoggingStyle::from_str("fancy").is_err());
    }

    #[test]
    fn test_display_roundtrips() {
        for style in [
            LoggingStyle::Compact,
            LoggingStyle::Full,
            LoggingStyle::Pretty,
            LoggingStyle::JSON,
        ] {
            assert_eq!(LoggingStyle::from_str(&style.to_string()).ok(), Some(style));
        }
    }

    #[test]
    fn test_deserialize() {
        serde_test::assert_de_tokens(&LoggingStyle::Compact, &[Token::Str("compact")]);
        serde_test::assert_de_tokens_error::<LoggingStyle>(
            &[Token::Str("fancy")],
            "unknown \"fancy\" logging style",
        );
    }
}

/// Parse a `KEY=VALUE` environment assignment; the value may contain `=`
pub fn parse_env_pair(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        Some(_) => Err(format!("missing variable name in '{arg}'")),
        None => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_pair() {
        assert_eq!(
            parse_env_pair("SWIFT_BUILD_FLAGS=-j 4").unwrap(),
            ("SWIFT_BUILD_FLAGS".to_string(), "-j 4".to_string())
        );
        assert_eq!(
            parse_env_pair("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
        assert_eq!(
            parse_env_pair("URL=a=b").unwrap(),
            ("URL".to_string(), "a=b".to_string())
        );
    }

    #[test]
    fn test_parse_env_pair_rejects_malformed() {
        assert!(parse_env_pair("NOVALUE").is_err());
        assert!(parse_env_pair("=value").is_err());
    }
}

use serde_json::Value;
use std::io::{self, Read};

/// Read a piped input document from stdin.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_document(&buffer)
}

/// Parse piped text as JSON, falling back to YAML.
pub fn parse_document(text: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => {
            let value: Value = serde_yaml::from_str(trimmed)
                .map_err(|_| format!("stdin is neither JSON nor YAML: {json_err}"))?;
            Ok(Some(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        assert!(parse_document("  \n").unwrap().is_none());
    }

    #[test]
    fn test_json_document() {
        let value = parse_document(r#"{"principal": "1000"}"#).unwrap().unwrap();
        assert_eq!(value["principal"], "1000");
    }

    #[test]
    fn test_yaml_document() {
        let value = parse_document("principal: \"1000\"\nyears: 15\n")
            .unwrap()
            .unwrap();
        assert_eq!(value["years"], 15);
    }
}

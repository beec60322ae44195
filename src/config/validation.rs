use regex::Regex;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// Expand `${VAR_NAME}` references using `lookup`. Unknown variables are
/// left as written.
pub fn expand_env_var_in_string(value: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = value.to_string();

    for cap in env_var_pattern().captures_iter(value) {
        let var_name = &cap[1];
        if let Some(replacement) = lookup(var_name) {
            result = result.replace(&cap[0], &replacement);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_and_keeps_unknown() {
        let lookup = |name: &str| (name == "HOME").then(|| "/home/me".to_string());
        assert_eq!(
            expand_env_var_in_string("${HOME}/chats/${MISSING}.json", lookup),
            "/home/me/chats/${MISSING}.json"
        );
    }
}

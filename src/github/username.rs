/// Extract a GitHub login from either a bare username or a profile URL.
///
/// Accepts `octocat`, `github.com/octocat` and `https://github.com/octocat/`.
/// Anything else yields `None`.
pub fn parse_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if let Some(pos) = trimmed.find("github.com/") {
        let rest = &trimmed[pos + "github.com/".len()..];
        let login: String = rest.chars().take_while(|c| is_login_char(*c)).collect();
        if !login.is_empty() {
            return Some(login);
        }
    }

    if !trimmed.is_empty() && trimmed.chars().all(is_login_char) {
        return Some(trimmed.to_string());
    }

    None
}

fn is_login_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_username() {
        assert_eq!(parse_username("octocat"), Some("octocat".to_string()));
        assert_eq!(parse_username("  my-user_1  "), Some("my-user_1".to_string()));
    }

    #[test]
    fn test_parse_profile_url() {
        assert_eq!(
            parse_username("https://github.com/octocat"),
            Some("octocat".to_string())
        );
        assert_eq!(
            parse_username("https://github.com/octocat///"),
            Some("octocat".to_string())
        );
        assert_eq!(
            parse_username("github.com/octocat/Hello-World"),
            Some("octocat".to_string())
        );
    }

    #[test]
    fn test_reject_invalid_input() {
        assert_eq!(parse_username(""), None);
        assert_eq!(parse_username("   "), None);
        assert_eq!(parse_username("not a user"), None);
        assert_eq!(parse_username("https://gitlab.com/octocat"), None);
        assert_eq!(parse_username("https://github.com/"), None);
    }
}

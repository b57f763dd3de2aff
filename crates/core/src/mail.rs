use crate::model::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    /// Backup email for one category: the subject names it, the body lists its tasks.
    pub fn backup(category: Category, tasks: &[String]) -> Self {
        Self {
            subject: format!("Tasks backup - {}", category.label()),
            body: tasks.join("\n"),
        }
    }

    pub fn to_mailto(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            percent_encode(&self.subject),
            percent_encode(&self.body)
        )
    }
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn backup_draft_joins_tasks_with_newlines() {
        let tasks = vec!["Pay rent".to_string(), "Call mom".to_string()];
        let draft = MailDraft::backup(Category::Work, &tasks);
        assert_eq!(draft.subject, "Tasks backup - Work");
        assert_eq!(draft.body, "Pay rent\nCall mom");
        assert_eq!(
            draft.to_mailto(),
            "mailto:?subject=Tasks%20backup%20-%20Work&body=Pay%20rent%0ACall%20mom"
        );
    }

    #[rstest]
    #[case("a&b=c", "a%26b%3Dc")]
    #[case("café", "caf%C3%A9")]
    #[case("keep-._~", "keep-._~")]
    fn encodes_reserved_and_non_ascii(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(percent_encode(raw), expected);
    }
}

//! Reminder message templates.
//!
//! One fixed template shared by both channels: plain text for LINE, a
//! minimally HTML-escaped paragraph for email. Rendering is pure so the
//! dispatcher composes each message exactly once per candidate.

use chrono::NaiveDate;

/// The fields a reminder interpolates, denormalized by the candidate
/// selector.
#[derive(Debug, Clone)]
pub struct Reminder<'a> {
    pub project_name: &'a str,
    pub title: &'a str,
    pub due_date: NaiveDate,
    pub description: Option<&'a str>,
}

impl Reminder<'_> {
    /// Plain-text body, used verbatim for LINE.
    pub fn text(&self) -> String {
        let mut body = format!(
            "[Deadline reminder] Project \"{}\"\nTitle: {}\nDue: {}",
            self.project_name, self.title, self.due_date
        );
        if let Some(desc) = self.description {
            body.push_str("\nNotes: ");
            body.push_str(desc);
        }
        body
    }

    /// Email subject line.
    pub fn subject(&self) -> String {
        format!(
            "[Deadline reminder] {} - {} ({})",
            self.project_name, self.title, self.due_date
        )
    }

    /// Email body: the escaped plain text as a single paragraph with
    /// newlines rewritten to `<br/>`.
    pub fn html(&self) -> String {
        format!("<p>{}</p>", escape_html(&self.text()).replace('\n', "<br/>"))
    }
}

/// Minimal HTML escaping: `& < > " '`.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder() -> Reminder<'static> {
        Reminder {
            project_name: "Apollo",
            title: "File the report",
            due_date: "2024-03-10".parse().unwrap(),
            description: Some("Quarterly <draft>"),
        }
    }

    #[test]
    fn text_includes_all_fields() {
        let text = reminder().text();
        assert_eq!(
            text,
            "[Deadline reminder] Project \"Apollo\"\nTitle: File the report\nDue: 2024-03-10\nNotes: Quarterly <draft>"
        );
    }

    #[test]
    fn text_omits_missing_description() {
        let mut r = reminder();
        r.description = None;
        assert!(!r.text().contains("Notes:"));
    }

    #[test]
    fn subject_format() {
        assert_eq!(
            reminder().subject(),
            "[Deadline reminder] Apollo - File the report (2024-03-10)"
        );
    }

    #[test]
    fn html_escapes_and_rewrites_newlines() {
        let html = reminder().html();
        assert!(html.starts_with("<p>"));
        assert!(html.ends_with("</p>"));
        assert!(html.contains("&lt;draft&gt;"));
        assert!(html.contains("<br/>"));
        assert!(!html.contains('\n'));
    }

    #[test]
    fn escape_html_covers_all_specials() {
        assert_eq!(
            escape_html(r#"a&b<c>d"e'f"#),
            "a&amp;b&lt;c&gt;d&quot;e&#39;f"
        );
    }
}

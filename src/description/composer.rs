use super::templates::{CommentTemplates, Language, SessionKind};
use crate::config::TitleConfig;
use chrono::NaiveDate;

/// Assembles description documents from the transcribed timestamp log
#[derive(Debug, Clone)]
pub struct DescriptionComposer<'a> {
    titles: &'a TitleConfig,
}

impl<'a> DescriptionComposer<'a> {
    pub fn new(titles: &'a TitleConfig) -> Self {
        Self { titles }
    }

    pub fn session_kind(&self, date: NaiveDate) -> SessionKind {
        SessionKind::for_date(date, self.titles.weekly_weekday)
    }

    /// Title line for a session date
    ///
    /// English: `[Tag] Mar-02-2024 Weekly Sparring`, Japanese: `[Tag] 2024-03-02 ...`
    pub fn title(&self, date: NaiveDate, language: Language) -> String {
        let date_pattern = match language {
            Language::English => "%b-%d-%Y",
            Language::Japanese => "%Y-%m-%d",
        };
        format!(
            "{} {}{}",
            self.titles.bracket_tag,
            date.format(date_pattern),
            self.titles.suffix(self.session_kind(date), language)
        )
    }

    /// Title, comment and participant list
    pub fn compose_header(&self, title: &str, comment: &str, display_names: &[String]) -> String {
        let mut header = format!("{}\n\n{}\n\n", title, comment);
        for name in display_names {
            header.push_str(&format!(" - {}\n", name));
        }
        header.push('\n');
        header
    }

    /// Transcribed lines followed by a blank line and the trailing tag
    pub fn compose_body(&self, lines: &[String]) -> String {
        let mut body = String::new();
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        body.push('\n');
        body.push_str(&self.titles.trailing_tag);
        body.push('\n');
        body
    }

    /// Full document for one language
    pub fn compose_document(
        &self,
        date: NaiveDate,
        language: Language,
        templates: &CommentTemplates,
        display_names: &[String],
        lines: &[String],
    ) -> String {
        let title = self.title(date, language);
        let comment = templates.select(self.session_kind(date), language);
        let mut document = self.compose_header(&title, comment, display_names);
        document.push_str(&self.compose_body(lines));
        document
    }
}

//! Keyword query translation
//!
//! Keywords follow document-store text search syntax:
//! - bare terms match if ANY of them appears
//! - `"quoted phrases"` must all appear
//! - `-term` and `-"phrase"` exclude matching records
//!
//! [`TextQuery`] parses that syntax and renders an FTS5 match expression in
//! which every term is a quoted string, so FTS5 operator characters typed by
//! a user are treated as text.

/// A parsed keyword query
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextQuery {
    pub terms: Vec<String>,
    pub phrases: Vec<String>,
    pub excluded: Vec<String>,
}

impl TextQuery {
    pub fn parse(keyword: &str) -> Self {
        let mut query = Self::default();
        let mut chars = keyword.chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }

            let negated = c == '-';
            if negated {
                chars.next();
            }

            let (text, is_phrase) = if chars.peek() == Some(&'"') {
                chars.next();
                // An unterminated quote runs to the end of the keyword
                let text: String = chars.by_ref().take_while(|&c| c != '"').collect();
                (text, true)
            } else {
                let mut text = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || c == '"' {
                        break;
                    }
                    text.push(c);
                    chars.next();
                }
                (text, false)
            };

            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                continue;
            }

            if negated {
                query.excluded.push(text);
            } else if is_phrase {
                query.phrases.push(text);
            } else {
                query.terms.push(text);
            }
        }

        query
    }

    /// Whether the query can match anything at all
    pub fn has_positive_terms(&self) -> bool {
        !self.terms.is_empty() || !self.phrases.is_empty()
    }

    /// Render the FTS5 match expression, or `None` when nothing can match.
    pub fn to_match_expression(&self) -> Option<String> {
        if !self.has_positive_terms() {
            return None;
        }

        let mut clauses = Vec::new();

        if !self.terms.is_empty() {
            let any: Vec<String> = self.terms.iter().map(|t| quote(t)).collect();
            clauses.push(format!("({})", any.join(" OR ")));
        }

        clauses.extend(self.phrases.iter().map(|p| quote(p)));

        let mut expression = format!("({})", clauses.join(" AND "));

        for excluded in &self.excluded {
            expression.push_str(" NOT ");
            expression.push_str(&quote(excluded));
        }

        Some(expression)
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

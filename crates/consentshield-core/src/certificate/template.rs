//! Placeholder templates.
//!
//! A template is parsed once into literal and placeholder segments. Parsing
//! rejects unknown names and unterminated `{{`, so a rendered document can
//! never contain a raw placeholder token. Every substituted value is
//! HTML-escaped.

use std::fmt;

use thiserror::Error;

/// Values a template may reference, written `{{NAME}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    SessionId,
    Phrase,
    Hash,
    HashPreview,
    TrustScore,
    Status,
    StatusClass,
    StatusIcon,
    StatusMessage,
    Timestamp,
    GenerationTime,
    ValidUntil,
    BlinkCount,
    EmotionScore,
    Duration,
    FaceDetected,
    PanicDetected,
    Issuer,
    Version,
}

impl Placeholder {
    pub const ALL: [Placeholder; 19] = [
        Placeholder::SessionId,
        Placeholder::Phrase,
        Placeholder::Hash,
        Placeholder::HashPreview,
        Placeholder::TrustScore,
        Placeholder::Status,
        Placeholder::StatusClass,
        Placeholder::StatusIcon,
        Placeholder::StatusMessage,
        Placeholder::Timestamp,
        Placeholder::GenerationTime,
        Placeholder::ValidUntil,
        Placeholder::BlinkCount,
        Placeholder::EmotionScore,
        Placeholder::Duration,
        Placeholder::FaceDetected,
        Placeholder::PanicDetected,
        Placeholder::Issuer,
        Placeholder::Version,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::SessionId => "SESSION_ID",
            Placeholder::Phrase => "PHRASE",
            Placeholder::Hash => "HASH",
            Placeholder::HashPreview => "HASH_PREVIEW",
            Placeholder::TrustScore => "TRUST_SCORE",
            Placeholder::Status => "STATUS",
            Placeholder::StatusClass => "STATUS_CLASS",
            Placeholder::StatusIcon => "STATUS_ICON",
            Placeholder::StatusMessage => "STATUS_MESSAGE",
            Placeholder::Timestamp => "TIMESTAMP",
            Placeholder::GenerationTime => "GENERATION_TIME",
            Placeholder::ValidUntil => "VALID_UNTIL",
            Placeholder::BlinkCount => "BLINK_COUNT",
            Placeholder::EmotionScore => "EMOTION_SCORE",
            Placeholder::Duration => "DURATION",
            Placeholder::FaceDetected => "FACE_DETECTED",
            Placeholder::PanicDetected => "PANIC_DETECTED",
            Placeholder::Issuer => "ISSUER",
            Placeholder::Version => "VERSION",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{{}}}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{{{name}}}}}' at byte {offset}")]
    UnknownPlaceholder { name: String, offset: usize },

    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },
}

/// Supplies the raw (unescaped) text for each placeholder.
pub trait TemplateValues {
    fn value(&self, placeholder: Placeholder) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Value(Placeholder),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            let Some(close) = after_open.find("}}") else {
                return Err(TemplateError::Unterminated {
                    offset: offset + open,
                });
            };
            let name = after_open[..close].trim();
            let placeholder =
                Placeholder::from_name(name).ok_or_else(|| TemplateError::UnknownPlaceholder {
                    name: name.to_string(),
                    offset: offset + open,
                })?;
            segments.push(Segment::Value(placeholder));

            let consumed = open + 2 + close + 2;
            rest = &rest[consumed..];
            offset += consumed;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Value(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    pub fn render<V: TemplateValues + ?Sized>(&self, values: &V) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Value(p) => out.push_str(&escape_html(&values.value(*p))),
            }
        }
        out
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl TemplateValues for Fixed {
        fn value(&self, placeholder: Placeholder) -> String {
            match placeholder {
                Placeholder::SessionId => "CS-1".into(),
                Placeholder::Phrase => "<script>alert('x')</script>".into(),
                other => other.name().to_lowercase(),
            }
        }
    }

    #[test]
    fn test_parse_and_render() {
        let t = Template::parse("<p>{{SESSION_ID}}</p><p>{{ STATUS }}</p>").unwrap();
        assert_eq!(t.render(&Fixed), "<p>CS-1</p><p>status</p>");
        assert_eq!(
            t.placeholders().collect::<Vec<_>>(),
            vec![Placeholder::SessionId, Placeholder::Status]
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let t = Template::parse("{{PHRASE}}").unwrap();
        assert_eq!(
            t.render(&Fixed),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_repeated_placeholder() {
        let t = Template::parse("{{SESSION_ID}}/{{SESSION_ID}}").unwrap();
        assert_eq!(t.render(&Fixed), "CS-1/CS-1");
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = Template::parse("ok {{NOPE}}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                name: "NOPE".into(),
                offset: 3
            }
        );
        assert!(err.to_string().contains("{{NOPE}}"));
    }

    #[test]
    fn test_unterminated_rejected() {
        let err = Template::parse("{{HASH}} then {{HASH").unwrap_err();
        assert_eq!(err, TemplateError::Unterminated { offset: 14 });
    }

    #[test]
    fn test_single_braces_are_literal() {
        let t = Template::parse(".a { color: red; } {{HASH}}").unwrap();
        assert_eq!(t.render(&Fixed), ".a { color: red; } hash");
    }

    #[test]
    fn test_placeholder_display_and_lookup() {
        for p in Placeholder::ALL {
            assert_eq!(Placeholder::from_name(p.name()), Some(p));
        }
        assert_eq!(Placeholder::TrustScore.to_string(), "{{TRUST_SCORE}}");
    }
}

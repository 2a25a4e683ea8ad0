//! Style sheet and list numbering definitions
//!
//! Both are declared once per document. Paragraphs refer to styles by id and
//! to numbering by `num_id`; nothing else is shared between elements.

use super::RenderOptions;

pub const TITLE: &str = "Title";
pub const TOC_HEADING: &str = "TOCHeading";
pub const BODY: &str = "BodyText";
pub const CODE: &str = "Code";
pub const QUOTE: &str = "Quote";
pub const LIST: &str = "ListParagraph";

/// Number of heading tiers that get their own style.
pub const HEADING_TIERS: usize = 3;

/// Style id for a heading level. Levels past the last tier share it.
pub fn heading_style(level: usize) -> &'static str {
    match level.clamp(1, HEADING_TIERS) {
        1 => "Heading1",
        2 => "Heading2",
        _ => "Heading3",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParagraphStyle {
    pub id: String,
    pub name: String,
    pub based_on: Option<String>,
    pub next: Option<String>,
    pub font: Option<String>,
    /// Half-points.
    pub size: Option<usize>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<String>,
    /// Twips before and after.
    pub spacing: Option<(usize, usize)>,
    pub indent_left: Option<usize>,
    pub outline_level: Option<usize>,
    pub keep_next: bool,
}

impl ParagraphStyle {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            based_on: Some("Normal".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    pub default_font: String,
    /// Half-points.
    pub default_size: usize,
    pub styles: Vec<ParagraphStyle>,
}

impl StyleSheet {
    pub fn standard(options: &RenderOptions) -> Self {
        let body_size = options.body_size * 2;
        let code_size = options.code_size * 2;

        let mut styles = vec![ParagraphStyle {
            size: Some(56),
            bold: true,
            color: Some("1F3864".to_string()),
            spacing: Some((2400, 480)),
            ..ParagraphStyle::new(TITLE, "Title")
        }];

        let heading_sizes = [36, 30, 26];
        for (tier, size) in heading_sizes.iter().enumerate() {
            let level = tier + 1;
            styles.push(ParagraphStyle {
                next: Some(BODY.to_string()),
                size: Some(*size),
                bold: true,
                color: Some("2F5496".to_string()),
                spacing: Some((360 - tier * 80, 120)),
                outline_level: Some(tier),
                keep_next: true,
                ..ParagraphStyle::new(heading_style(level), &format!("heading {level}"))
            });
        }

        styles.push(ParagraphStyle {
            size: Some(32),
            bold: true,
            color: Some("2F5496".to_string()),
            spacing: Some((240, 240)),
            ..ParagraphStyle::new(TOC_HEADING, "TOC Heading")
        });
        styles.push(ParagraphStyle {
            size: Some(body_size),
            spacing: Some((0, 160)),
            ..ParagraphStyle::new(BODY, "Body Text")
        });
        styles.push(ParagraphStyle {
            font: Some(options.code_font.clone()),
            size: Some(code_size),
            spacing: Some((0, 0)),
            ..ParagraphStyle::new(CODE, "Code")
        });
        styles.push(ParagraphStyle {
            size: Some(body_size),
            italic: true,
            color: Some("595959".to_string()),
            spacing: Some((120, 120)),
            indent_left: Some(720),
            ..ParagraphStyle::new(QUOTE, "Quote")
        });
        styles.push(ParagraphStyle {
            size: Some(body_size),
            spacing: Some((0, 60)),
            ..ParagraphStyle::new(LIST, "List Paragraph")
        });

        Self {
            default_font: options.body_font.clone(),
            default_size: body_size,
            styles,
        }
    }

    pub fn get(&self, id: &str) -> Option<&ParagraphStyle> {
        self.styles.iter().find(|style| style.id == id)
    }
}

pub const BULLET_NUM_ID: usize = 1;
pub const BULLET_LEVELS: usize = 3;
pub const NUMBERED_LEVELS: usize = 2;
/// First `num_id` handed out to numbered lists; each list takes the next one.
pub const FIRST_NUMBERED_NUM_ID: usize = 2;

const BULLET_ABSTRACT_ID: usize = 1;
const NUMBERED_ABSTRACT_ID: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Bullet,
    Decimal,
    LowerLetter,
}

impl NumberFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberFormat::Bullet => "bullet",
            NumberFormat::Decimal => "decimal",
            NumberFormat::LowerLetter => "lowerLetter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingLevel {
    pub format: NumberFormat,
    pub text: String,
    /// Twips.
    pub indent: usize,
    pub hanging: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractNumbering {
    pub id: usize,
    pub levels: Vec<NumberingLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingInstance {
    pub num_id: usize,
    pub abstract_id: usize,
    /// Restart counting at 1 instead of continuing the abstract definition.
    pub restart: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberingDefinitions {
    pub abstracts: Vec<AbstractNumbering>,
    pub instances: Vec<NumberingInstance>,
}

impl NumberingDefinitions {
    /// Bullet definition plus `numbered_lists` restarting numbered instances.
    ///
    /// At least one numbered instance is always declared.
    pub fn standard(numbered_lists: usize) -> Self {
        let bullet_levels = ["\u{2022}", "\u{25E6}", "\u{25AA}"]
            .iter()
            .take(BULLET_LEVELS)
            .enumerate()
            .map(|(level, symbol)| NumberingLevel {
                format: NumberFormat::Bullet,
                text: symbol.to_string(),
                indent: 720 * (level + 1),
                hanging: 360,
            })
            .collect();

        let numbered_levels = vec![
            NumberingLevel {
                format: NumberFormat::Decimal,
                text: "%1.".to_string(),
                indent: 720,
                hanging: 360,
            },
            NumberingLevel {
                format: NumberFormat::LowerLetter,
                text: "%2.".to_string(),
                indent: 1440,
                hanging: 360,
            },
        ];

        let mut instances = vec![NumberingInstance {
            num_id: BULLET_NUM_ID,
            abstract_id: BULLET_ABSTRACT_ID,
            restart: false,
        }];
        instances.extend(
            (0..numbered_lists.max(1)).map(|offset| NumberingInstance {
                num_id: FIRST_NUMBERED_NUM_ID + offset,
                abstract_id: NUMBERED_ABSTRACT_ID,
                restart: true,
            }),
        );

        Self {
            abstracts: vec![
                AbstractNumbering {
                    id: BULLET_ABSTRACT_ID,
                    levels: bullet_levels,
                },
                AbstractNumbering {
                    id: NUMBERED_ABSTRACT_ID,
                    levels: numbered_levels,
                },
            ],
            instances,
        }
    }
}

use std::collections::HashMap;

use tabled::{builder::Builder, settings::Style};

use crate::{
    bingo::card::BingoCard,
    error::BingoError,
    types::{Layout, Song},
    utils::{self, FormattedSong},
};

const FREE_LABEL: &str = "FREE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellLabel {
    Song { label: FormattedSong, marked: bool },
    Free,
}

/// A card with every cell resolved to printable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub card_id: String,
    pub seed: String,
    pub layout: Layout,
    pub rows: Vec<Vec<CellLabel>>,
}

impl CardView {
    /// Resolves every song cell through `lookup`.
    ///
    /// Fails with [`BingoError::UnknownSong`] for the first id the lookup
    /// does not know.
    pub fn new<'a, F>(card: &BingoCard, lookup: F) -> Result<Self, BingoError>
    where
        F: Fn(&str) -> Option<&'a Song>,
    {
        let rows = card
            .grid()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell.song_id() {
                        None => Ok(CellLabel::Free),
                        Some(id) => lookup(id)
                            .map(|song| CellLabel::Song {
                                label: utils::format_song_for_bingo(song),
                                marked: card.is_marked(id),
                            })
                            .ok_or_else(|| BingoError::UnknownSong(id.to_string())),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            card_id: card.id().to_string(),
            seed: card.seed().to_string(),
            layout: card.layout(),
            rows,
        })
    }

    pub fn from_songs(card: &BingoCard, songs: &[Song]) -> Result<Self, BingoError> {
        let by_id: HashMap<&str, &Song> = songs.iter().map(|s| (s.id.as_str(), s)).collect();
        Self::new(card, |id| by_id.get(id).copied())
    }
}

/// Turns resolved cards into text.
pub trait CardRenderer {
    fn render(&self, view: &CardView) -> String;

    fn render_all(&self, views: &[CardView]) -> String {
        views
            .iter()
            .map(|view| self.render(view))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Terminal grid drawn with box characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    /// Prefix called songs with a check mark.
    pub show_marks: bool,
}

impl CardRenderer for TableRenderer {
    fn render(&self, view: &CardView) -> String {
        let mut builder = Builder::default();
        for row in &view.rows {
            builder.push_record(row.iter().map(|cell| match cell {
                CellLabel::Free => FREE_LABEL.to_string(),
                CellLabel::Song { label, marked } => {
                    let check = if self.show_marks && *marked { "✓ " } else { "" };
                    format!("{}{}\n{}", check, label.title, label.artist)
                }
            }));
        }

        let mut table = builder.build();
        table.with(Style::modern());
        format!("{} ({}, seed {})\n{}", view.card_id, view.layout, view.seed, table)
    }
}

/// Printable HTML page, one card per sheet.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    pub title: Option<String>,
}

impl HtmlRenderer {
    fn render_card(&self, view: &CardView) -> String {
        let mut html = String::new();
        html.push_str(&format!(
            "<section class=\"card\" data-card-id=\"{}\">\n",
            escape_html(&view.card_id)
        ));
        html.push_str("<table class=\"grid\">\n");
        for row in &view.rows {
            html.push_str("<tr>");
            for cell in row {
                match cell {
                    CellLabel::Free => {
                        html.push_str(&format!("<td class=\"free\">{}</td>", FREE_LABEL));
                    }
                    CellLabel::Song { label, .. } => {
                        html.push_str(&format!(
                            "<td><span class=\"title\">{}</span><span class=\"artist\">{}</span></td>",
                            escape_html(&label.title),
                            escape_html(&label.artist)
                        ));
                    }
                }
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");
        html.push_str(&format!(
            "<footer>{} &middot; seed {}</footer>\n</section>\n",
            escape_html(&view.card_id),
            escape_html(&view.seed)
        ));
        html
    }
}

impl CardRenderer for HtmlRenderer {
    fn render(&self, view: &CardView) -> String {
        self.render_all(std::slice::from_ref(view))
    }

    fn render_all(&self, views: &[CardView]) -> String {
        let title = escape_html(self.title.as_deref().unwrap_or("Music Bingo"));
        let cards: String = views.iter().map(|v| self.render_card(v)).collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; }}
.card {{ page-break-after: always; margin: 1em auto; max-width: 60em; }}
.grid {{ border-collapse: collapse; width: 100%; table-layout: fixed; }}
.grid td {{ border: 2px solid #222; height: 6em; text-align: center; vertical-align: middle; padding: 0.3em; }}
.grid .title {{ display: block; font-weight: bold; }}
.grid .artist {{ display: block; font-size: 0.85em; color: #555; }}
.grid .free {{ font-size: 1.6em; font-weight: bold; background: #eee; }}
footer {{ font-size: 0.75em; color: #777; margin-top: 0.4em; }}
</style>
</head>
<body>
<h1>{title}</h1>
{cards}</body>
</html>
"#
        )
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

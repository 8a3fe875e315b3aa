pub mod theme;

use colored::Colorize;
use itertools::Itertools;

use crate::model::Record;
use crate::utils;
use crate::viewmodel::{ViewSnapshot, HEIGHT_BOUNDS, WEIGHT_BOUNDS};

pub use theme::{Palette, Theme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub theme: Theme,
    pub color: bool,
    pub show_sprites: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            color: true,
            show_sprites: false,
        }
    }
}

fn paint_rgb(text: &str, rgb: theme::Rgb, color: bool) -> String {
    if color {
        text.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        text.to_string()
    }
}

fn header_line(text: &str, opts: &RenderOptions) -> String {
    if !opts.color {
        return text.to_string();
    }
    let palette = opts.theme.palette();
    text.bold()
        .truecolor(palette.text.0, palette.text.1, palette.text.2)
        .on_truecolor(palette.card.0, palette.card.1, palette.card.2)
        .to_string()
}

fn render_card(record: &Record, opts: &RenderOptions) -> String {
    let name = format!("{:<14}", utils::capitalize(&record.name));
    let name = if opts.color {
        name.bold().to_string()
    } else {
        name
    };
    let height = paint_rgb(
        &format!("{:<4}", record.height_units),
        utils::gradient_rgb(record.height_units, HEIGHT_BOUNDS.min, HEIGHT_BOUNDS.max),
        opts.color,
    );
    let weight = paint_rgb(
        &format!("{:<5}", record.weight_units),
        utils::gradient_rgb(record.weight_units, WEIGHT_BOUNDS.min, WEIGHT_BOUNDS.max),
        opts.color,
    );
    let mut line = format!(
        " #{:<5} {} Type: {:<10} Height: {} Weight: {}",
        record.id,
        name,
        utils::capitalize(&record.primary_type_name),
        height,
        weight
    );
    if opts.show_sprites && !record.sprite_url.is_empty() {
        line.push_str("\n        ");
        if opts.color {
            line.push_str(&record.sprite_url.dimmed().to_string());
        } else {
            line.push_str(&record.sprite_url);
        }
    }
    line
}

fn render_pager(snapshot: &ViewSnapshot<'_>, opts: &RenderOptions) -> String {
    let has_prev = snapshot.current_page_index > 0;
    let has_next = snapshot.current_page_index + 1 < snapshot.total_pages;
    let prev = if has_prev || !opts.color {
        "< Previous Page".to_string()
    } else {
        "< Previous Page".dimmed().to_string()
    };
    let next = if has_next || !opts.color {
        "Next Page >".to_string()
    } else {
        "Next Page >".dimmed().to_string()
    };
    let label = format!(
        "Page {} of {}",
        snapshot.current_page_index + 1,
        snapshot.total_pages.max(1)
    );
    let label = if opts.color {
        let palette = opts.theme.palette();
        label
            .truecolor(palette.text.0, palette.text.1, palette.text.2)
            .on_truecolor(palette.card_hover.0, palette.card_hover.1, palette.card_hover.2)
            .to_string()
    } else {
        label
    };
    format!(" {}   {}   {}", prev, label, next)
}

/// Renders the snapshot as terminal cards with a pagination footer.
pub fn render_text(snapshot: &ViewSnapshot<'_>, opts: &RenderOptions) -> String {
    if snapshot.loading {
        return "Loading...\n".to_string();
    }
    if let Some(error) = snapshot.error {
        let msg = if opts.color {
            error.red().to_string()
        } else {
            error.to_string()
        };
        return format!("{msg}\n");
    }

    let mut out = String::new();
    let filters = snapshot
        .filter
        .summary()
        .unwrap_or_else(|| "none".to_string());
    out.push_str(&header_line(
        &format!(
            ":: Pokédex :: {} records :: {} match :: filters: {} ",
            snapshot.total_records, snapshot.matched, filters
        ),
        opts,
    ));
    out.push('\n');

    if snapshot.page_slice.is_empty() {
        out.push_str(" No Pokémon match the current filters.\n");
    } else {
        for record in snapshot.page_slice.iter() {
            out.push_str(&render_card(record, opts));
            out.push('\n');
        }
    }
    out.push_str(&render_pager(snapshot, opts));
    out.push('\n');
    out
}

pub fn render_type_options(snapshot: &ViewSnapshot<'_>) -> String {
    std::iter::once("all")
        .chain(snapshot.type_options.iter().map(|s| s.as_str()))
        .join(", ")
}

pub fn render_json(snapshot: &ViewSnapshot<'_>) -> Vec<u8> {
    serde_json::to_vec_pretty(snapshot).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render(snapshot: &ViewSnapshot<'_>, format: OutputFormat, opts: &RenderOptions) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(snapshot, opts).into_bytes(),
        OutputFormat::Json => render_json(snapshot),
    }
}

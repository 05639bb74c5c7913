use chrono::{DateTime, TimeZone};
use maud::{html, Markup};

use crate::forms::US_STATES;
use crate::services::genres::GENRE_CHOICES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

/// One-shot message rendered above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }
}

pub fn flash_banner(flash: &Flash) -> Markup {
    let color = match flash.level {
        FlashLevel::Success => "bg-green-100 text-green-800",
        FlashLevel::Error => "bg-red-100 text-red-800",
    };

    html! {
        div class={(format!("flash rounded-md p-4 mb-6 {}", color))} role="alert" {
            (flash.message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// "Monday June, 15, 2026 at 8:00PM"
    Full,
    /// "Mon 06, 15, 2026 8:00PM"
    Medium,
}

pub fn format_datetime<Tz>(value: &DateTime<Tz>, style: DateStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let pattern = match style {
        DateStyle::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateStyle::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

pub fn genre_tags(genres: &[String]) -> Markup {
    html! {
        ul class="genres flex flex-wrap gap-2" {
            @for genre in genres {
                li class="px-2 py-1 text-xs rounded-full bg-gray-200 text-gray-800" { (genre) }
            }
        }
    }
}

pub fn search_box(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="mb-6 flex gap-2" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                aria-label=(placeholder)
                class="flex-1 px-3 py-2 border border-gray-300 rounded-md";
            button type="submit" class="btn" { "Search" }
        }
    }
}

/// Card linking to the other side of a show.
pub fn show_card(href: &str, name: &str, image_link: Option<&str>, start_time: &str) -> Markup {
    html! {
        div class="show-card bg-white rounded-lg shadow-sm p-4 flex items-center gap-4" {
            @if let Some(src) = image_link {
                img src=(src) alt=(name) class="w-16 h-16 object-cover rounded" loading="lazy";
            }
            div {
                a href=(href) class="font-semibold text-gray-900" { (name) }
                p class="text-sm text-gray-600" { (start_time) }
            }
        }
    }
}

pub fn text_input(label: &str, name: &str, value: Option<&str>, required: bool) -> Markup {
    html! {
        div class="form-group mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                value=(value.unwrap_or_default())
                required[required]
                class="w-full px-3 py-2 border border-gray-300 rounded-md";
        }
    }
}

pub fn state_select(selected: &str) -> Markup {
    html! {
        div class="form-group mb-4" {
            label for="state" class="block text-sm font-medium text-gray-700 mb-1" { "State" }
            select id="state" name="state" required class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for state in US_STATES {
                    option value=(state) selected[*state == selected] { (state) }
                }
            }
        }
    }
}

pub fn genres_select(selected: &[String]) -> Markup {
    html! {
        div class="form-group mb-4" {
            label for="genres" class="block text-sm font-medium text-gray-700 mb-1" { "Genres" }
            select id="genres" name="genres" multiple class="w-full px-3 py-2 border border-gray-300 rounded-md" {
                @for genre in GENRE_CHOICES {
                    option value=(genre) selected[selected.iter().any(|g| g == genre)] { (genre) }
                }
            }
        }
    }
}

pub fn checkbox(label: &str, name: &str, checked: bool) -> Markup {
    html! {
        div class="form-group mb-4 flex items-center gap-2" {
            input type="checkbox" id=(name) name=(name) value="y" checked[checked];
            label for=(name) class="text-sm text-gray-700" { (label) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_datetime_styles() {
        let value = Utc.with_ymd_and_hms(2026, 6, 15, 20, 0, 0).unwrap();
        assert_eq!(
            format_datetime(&value, DateStyle::Full),
            "Monday June, 15, 2026 at 8:00PM"
        );
        assert_eq!(
            format_datetime(&value, DateStyle::Medium),
            "Mon 06, 15, 2026 8:00PM"
        );
    }

    #[test]
    fn test_flash_banner_escapes_message() {
        let markup = flash_banner(&Flash::error("<script>")).into_string();
        assert!(markup.contains("&lt;script&gt;"));
        assert!(markup.contains("bg-red-100"));
    }

    #[test]
    fn test_genres_select_marks_selected() {
        let markup = genres_select(&["Jazz".to_string()]).into_string();
        assert!(markup.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(markup.contains(r#"<option value="Blues">Blues</option>"#));
    }
}

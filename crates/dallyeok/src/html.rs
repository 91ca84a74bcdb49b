use anyhow::Result;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::fs;
use std::path::Path;

use crate::types::{CalendarCell, WEEKDAY_NAMES};

/// Generate a static HTML file for one month's grid
pub fn generate_html(label: &str, cells: &[CalendarCell], path: &Path) -> Result<()> {
    let html = render_page(label, cells);
    fs::write(path, html.into_string())?;
    Ok(())
}

pub fn render_page(label: &str, cells: &[CalendarCell]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "하하매스 - " (label) }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.container {
                    h1 { "하하매스" }
                    div.calendar-header {
                        a.calendar-nav href="/nav?delta=-1" aria-label="이전 달" { "◀" }
                        span #"calendar-month" { (label) }
                        a.calendar-nav href="/nav?delta=1" aria-label="다음 달" { "▶" }
                        a.calendar-today href="/reset" { "오늘" }
                    }
                    div.calendar-weekdays {
                        @for name in WEEKDAY_NAMES {
                            div.weekday { (name) }
                        }
                    }
                    div.calendar-grid #"calendar-grid" role="grid" {
                        @for cell in cells {
                            (render_cell(cell))
                        }
                    }
                }
                script { (PreEscaped(JAVASCRIPT)) }
            }
        }
    }
}

fn render_cell(cell: &CalendarCell) -> Markup {
    html! {
        div class=(cell.css_classes())
            aria-label=(cell.aria_label())
            aria-current=[cell.is_today.then_some("date")] {
            (cell.day)
        }
    }
}

const CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Pretendard', -apple-system, BlinkMacSystemFont, sans-serif;
    background: #f5f7fa;
    color: #2c3e7b;
    min-height: 100vh;
    line-height: 1.4;
}

.container {
    max-width: 720px;
    margin: 0 auto;
    padding: 40px 24px 60px;
}

h1 {
    color: #2c3e7b;
    font-weight: 900;
    font-size: 2.2em;
    margin-bottom: 24px;
}

.calendar-header {
    display: flex;
    align-items: center;
    gap: 16px;
    margin-bottom: 20px;
}

#calendar-month {
    font-size: 1.3em;
    font-weight: 700;
    min-width: 140px;
    text-align: center;
}

.calendar-nav {
    text-decoration: none;
    color: #4a90e2;
    font-size: 1.1em;
    padding: 6px 12px;
    border-radius: 8px;
    border: 1px solid #dfe6f0;
    background: #fff;
}

.calendar-nav:hover {
    background: #eef4fc;
}

.calendar-today {
    margin-left: auto;
    text-decoration: none;
    color: #fff;
    background: #4a90e2;
    padding: 6px 14px;
    border-radius: 8px;
    font-size: 0.9em;
    font-weight: 700;
}

.calendar-weekdays,
.calendar-grid {
    display: grid;
    grid-template-columns: repeat(7, 1fr);
    gap: 4px;
}

.calendar-weekdays {
    margin-bottom: 4px;
}

.weekday {
    text-align: center;
    font-weight: 700;
    font-size: 0.85em;
    color: #6b7280;
    padding: 8px 0;
}

.weekday:first-child {
    color: #e25563;
}

.calendar-day {
    background: #fff;
    border: 1px solid #e5eaf2;
    border-radius: 8px;
    min-height: 64px;
    padding: 8px;
    font-weight: 500;
    position: relative;
    transition: background 0.15s;
}

.calendar-day:hover {
    background: #eef4fc;
}

.calendar-day.other-month {
    color: #c3cad6;
    background: #fafbfd;
}

.calendar-day.today {
    border: 2px solid #4a90e2;
    font-weight: 900;
    color: #4a90e2;
}

.calendar-day.has-activity::after {
    content: '';
    position: absolute;
    left: 8px;
    bottom: 8px;
    width: 8px;
    height: 8px;
    border-radius: 50%;
    background: #4a90e2;
}

.calendar-day.has-assignment::after {
    background: #f2a33c;
}

.calendar-day.has-evaluation::after {
    background: #e25563;
}

@media (max-width: 480px) {
    .calendar-day {
        min-height: 44px;
        padding: 4px;
        font-size: 0.85em;
    }
}
"#;

const JAVASCRIPT: &str = r#"
// Keyboard shortcuts: arrow keys page months, 't' returns to today
document.addEventListener('keydown', (e) => {
    if (e.key === 'ArrowLeft') {
        window.location.href = '/nav?delta=-1';
    } else if (e.key === 'ArrowRight') {
        window.location.href = '/nav?delta=1';
    } else if (e.key === 't') {
        window.location.href = '/reset';
    }
});

// Transient toast, used when navigation fails
function showToast(message) {
    const toast = document.createElement('div');
    toast.setAttribute('role', 'status');
    toast.setAttribute('aria-live', 'polite');
    toast.style.cssText = 'position:fixed;top:20px;right:20px;background:#e25563;' +
        'color:#fff;padding:12px 20px;border-radius:8px;font-weight:500;z-index:10000;';
    toast.textContent = message;
    document.body.appendChild(toast);
    setTimeout(() => toast.remove(), 3000);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ActivityLevel, MonthRelation};
    use tempfile::TempDir;

    fn sample_cells() -> Vec<CalendarCell> {
        let mut cells = Vec::new();
        for day in 26..=31 {
            cells.push(CalendarCell::new(
                day,
                MonthRelation::Previous,
                false,
                ActivityLevel::None,
            ));
        }
        for day in 1..=28 {
            cells.push(CalendarCell::new(
                day,
                MonthRelation::Current,
                day == 14,
                ActivityLevel::None,
            ));
        }
        for day in 1..=8 {
            cells.push(CalendarCell::new(
                day,
                MonthRelation::Next,
                false,
                ActivityLevel::None,
            ));
        }
        cells
    }

    #[test]
    fn test_render_page_contains_label_and_cells() {
        let cells = sample_cells();
        let rendered = render_page("2025년 2월", &cells).into_string();

        assert!(rendered.contains("2025년 2월"));
        assert!(rendered.matches("calendar-day").count() >= 42);
        assert!(rendered.contains("aria-current=\"date\""));
        assert!(rendered.contains("이전 달 26일"));
        assert!(rendered.contains("다음 달 8일"));
    }

    #[test]
    fn test_render_page_weekday_header() {
        let rendered = render_page("2025년 2월", &sample_cells()).into_string();
        for name in WEEKDAY_NAMES {
            assert!(rendered.contains(name));
        }
    }

    #[test]
    fn test_generate_html_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.html");

        generate_html("2025년 2월", &sample_cells(), &path).unwrap();

        assert!(path.exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<!DOCTYPE html>"));
        assert!(content.contains("2025년 2월"));
    }
}

//! TUI views and rendering
//!
//! Pure rendering over AppState. Optional itinerary fields degrade
//! gracefully: distance annotations, links and notes render only when
//! present, never as empty affordances.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::domain::{Activity, DayPlan};

use super::state::{AppState, DayState, FormField, Screen};

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match state.screen {
        Screen::Form => render_form(state, frame, chunks[1]),
        Screen::Generating => render_generating(state, frame, chunks[1]),
        Screen::Itinerary => render_itinerary(state, frame, chunks[1]),
        Screen::Error => render_error(state, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let screen_text = match state.screen {
        Screen::Form => "Plan a trip",
        Screen::Generating => "Generating",
        Screen::Itinerary => "Itinerary",
        Screen::Error => "Error",
    };

    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "TripWeaver ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(screen_text, Style::default().fg(Color::Yellow)),
    ])])
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer key hints
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let hints = match state.screen {
        Screen::Form => "Tab next field │ ←/→ change value │ Enter generate │ Esc quit",
        Screen::Generating => "Esc cancel and return to form │ q quit",
        Screen::Itinerary => {
            if state.itinerary.as_ref().and_then(|it| it.editing_day()).is_some() {
                "type to edit note │ Enter/Esc done"
            } else {
                "↑/↓ select day │ Enter toggle │ e note │ n new plan │ q quit"
            }
        }
        Screen::Error => "Enter back to form │ q quit",
    };

    let footer = Paragraph::new(Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray))))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Render the trip entry form
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    let form = &state.form;
    let mut lines = Vec::new();
    lines.push(Line::raw(""));

    let fields: [(FormField, &str, String); 6] = [
        (FormField::Destination, "Destination", form.destination.clone()),
        (FormField::StartingPoint, "Starting point", form.starting_point.clone()),
        (FormField::Days, "Days", form.days.to_string()),
        (FormField::Budget, "Budget", form.budget.to_string()),
        (FormField::Travelers, "Travelers", form.travelers.to_string()),
        (FormField::Interests, "Interests", form.interests.clone()),
    ];

    for (field, label, value) in fields {
        let focused = form.focus == field;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if focused && field.is_text() { "_" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<16}", label), label_style),
            Span::raw(value),
            Span::styled(cursor, Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]));
        lines.push(Line::raw(""));
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Trip parameters "))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Render the in-flight generation screen
fn render_generating(state: &AppState, frame: &mut Frame, area: Rect) {
    let destination = state.form.destination.trim();
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("{}…", state.planning_word),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw(format!("Crafting your {} itinerary. This can take a minute.", destination)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Render the generic error screen
fn render_error(state: &AppState, frame: &mut Frame, area: Rect) {
    let message = state.error.as_deref().unwrap_or("Something went wrong.");
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::raw("Your trip parameters are unchanged."),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Render the collapsible day-by-day timeline
fn render_itinerary(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(it) = state.itinerary.as_ref() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0usize;

    lines.push(Line::from(Span::styled(
        it.itinerary.trip_title.clone(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    let mut subtitle = Vec::new();
    if !it.itinerary.duration.is_empty() {
        subtitle.push(it.itinerary.duration.clone());
    }
    if !it.itinerary.budget_level.is_empty() {
        subtitle.push(it.itinerary.budget_level.clone());
    }
    if let Some(start) = &it.itinerary.starting_location {
        subtitle.push(format!("from {}", start));
    }
    if !subtitle.is_empty() {
        lines.push(Line::from(Span::styled(
            subtitle.join(" · "),
            Style::default().fg(Color::Gray),
        )));
    }
    if !it.itinerary.overall_vibe.is_empty() {
        lines.push(Line::from(Span::styled(
            it.itinerary.overall_vibe.clone(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::raw(""));

    for (idx, plan) in it.itinerary.days.iter().enumerate() {
        let day_state = it.day_state(plan.day).cloned().unwrap_or_default();
        if idx == it.selected {
            selected_line = lines.len();
        }
        push_day_lines(&mut lines, plan, &day_state, idx == it.selected);
    }

    let total = lines.len() as u16;
    let viewport = area.height.saturating_sub(2);
    let scroll = scroll_offset(selected_line as u16, total, viewport);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", it.itinerary.destination)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Keep the selected day header inside the viewport
fn scroll_offset(selected_line: u16, total: u16, viewport: u16) -> u16 {
    if total <= viewport || viewport == 0 {
        return 0;
    }
    let max_scroll = total - viewport;
    selected_line.saturating_sub(viewport / 2).min(max_scroll)
}

/// Append the lines for one day section
fn push_day_lines(lines: &mut Vec<Line<'_>>, plan: &DayPlan, day_state: &DayState, selected: bool) {
    let chevron = if day_state.open { "▾" } else { "▸" };
    let header_style = if selected {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(Span::styled(
        format!("{} Day {} — {}", chevron, plan.day, plan.title),
        header_style,
    )));

    if !day_state.open {
        return;
    }

    if !plan.summary.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", plan.summary),
            Style::default().fg(Color::Gray),
        )));
    }

    for activity in &plan.activities {
        push_activity_lines(lines, activity);
    }

    // Note buffer renders only when it has content or is being edited
    if day_state.editing {
        lines.push(Line::from(vec![
            Span::styled("  Note: ", Style::default().fg(Color::Yellow)),
            Span::raw(day_state.note.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]));
    } else if !day_state.note.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("  Note: ", Style::default().fg(Color::Yellow)),
            Span::raw(day_state.note.clone()),
        ]));
    }

    lines.push(Line::raw(""));
}

/// Append the lines for one activity
fn push_activity_lines(lines: &mut Vec<Line<'_>>, activity: &Activity) {
    // Distance annotation only between activities that carry one
    if let Some(distance) = &activity.distance_from_previous {
        lines.push(Line::from(Span::styled(
            format!("      ↓ {}", distance),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(vec![
        Span::styled(format!("  {:<9}", activity.time), Style::default().fg(Color::Yellow)),
        Span::styled(
            activity.location.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [{}]", activity.category),
            Style::default().fg(Color::Magenta),
        ),
    ]));
    lines.push(Line::raw(format!("           {}", activity.description)));

    if let Some(notes) = &activity.notes {
        lines.push(Line::from(Span::styled(
            format!("           {}", notes),
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    let mut links = Vec::new();
    if let Some(url) = &activity.search_url {
        links.push(format!("ref: {}", url));
    }
    if let Some(url) = &activity.maps_url {
        links.push(format!("map: {}", url));
    }
    if !links.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("           {}", links.join("  ")),
            Style::default().fg(Color::Blue),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_fits_viewport() {
        assert_eq!(scroll_offset(5, 10, 20), 0);
    }

    #[test]
    fn test_scroll_offset_clamps_to_max() {
        // 40 lines, 10 visible: selecting the last line scrolls to 30
        assert_eq!(scroll_offset(39, 40, 10), 30);
    }

    #[test]
    fn test_scroll_offset_centers_selection() {
        assert_eq!(scroll_offset(20, 40, 10), 15);
    }
}

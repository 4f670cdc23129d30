// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindtree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Title, footer, and row style helpers used by TUI rendering.
fn footer_uses_compact_mode(area: Rect) -> bool {
    area.width < 90
}

fn outline_view_title(slot: &str, dirty: bool) -> Line<'static> {
    let mut spans = vec![
        Span::raw("─ Outline ".to_owned()),
        Span::styled(slot.to_owned(), Style::default().fg(Color::White)),
    ];
    if dirty {
        spans.push(Span::styled(" [+]".to_owned(), Style::default().fg(DIRTY_COLOR)));
    }
    spans.push(Span::raw(" ".to_owned()));
    Line::from(spans)
}

fn row_line(row: &view::Row, editing: Option<&str>) -> Line<'static> {
    let mut spans = vec![
        Span::raw(view::indent(row.depth)),
        Span::styled(row.marker.to_owned(), Style::default().fg(MARKER_COLOR)),
    ];

    match editing.filter(|_| row.active) {
        Some(buffer) => {
            spans.push(Span::styled(
                format!("{buffer}▏"),
                Style::default().fg(Color::Black).bg(EDIT_COLOR),
            ));
        }
        None if row.label.is_empty() => {
            let style = if row.active {
                Style::default().fg(Color::Black).bg(FOCUS_COLOR)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(EMPTY_LABEL_PLACEHOLDER.to_owned(), style));
        }
        None => {
            let style = if row.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(FOCUS_COLOR)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(row.label.clone(), style));
        }
    }
    Line::from(spans)
}

fn footer_help_line(
    mode: &Mode,
    caps: Capabilities,
    toast_suffix: &str,
    compact: bool,
) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match mode {
        Mode::Editing { .. } => {
            push_footer_entry(&mut spans, "COMMIT", "enter");
            push_footer_entry(&mut spans, "CANCEL", "esc");
        }
        Mode::Browse if compact => {
            push_footer_entry_with_separator(&mut spans, "NEW", "tab/enter", " | ");
            push_footer_entry_with_separator(&mut spans, "EDIT", "space", " | ");
            push_footer_entry_with_separator_maybe_disabled(
                &mut spans,
                "SAVE",
                "^s",
                " | ",
                !caps.can_save,
            );
            push_footer_entry_with_separator(&mut spans, "QUIT", "q", " | ");
        }
        Mode::Browse => {
            push_footer_entry(&mut spans, "CHILD", "tab");
            push_footer_entry(&mut spans, "SIBLING", "enter");
            push_footer_entry(&mut spans, "REMOVE", "del");
            push_footer_entry(&mut spans, "EDIT", "space");
            push_footer_entry(&mut spans, "FOLD", "E/D");
            spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
            spans.push(Span::styled("Move:".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
            for (direction, arrow) in [
                (Direction::Left, "←"),
                (Direction::Up, "↑"),
                (Direction::Down, "↓"),
                (Direction::Right, "→"),
            ] {
                spans.extend(footer_value_spans(arrow, !caps.can_move(direction)));
            }
            push_footer_entry_maybe_disabled(&mut spans, "SAVE", "^s", !caps.can_save);
            push_footer_entry(&mut spans, "QUIT", "q");
        }
    }

    if !toast_suffix.is_empty() {
        spans.push(Span::styled(
            format!("  {toast_suffix}"),
            Style::default().fg(TOAST_COLOR),
        ));
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, " | ", disabled);
}

fn push_footer_entry_with_separator(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
) {
    push_footer_entry_with_separator_maybe_disabled(spans, label, value, separator, false);
}

fn push_footer_entry_with_separator_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    separator: &'static str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            separator.to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    vec![Span::styled(
        value.to_owned(),
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD),
    )]
}

/// First row to draw so that `active` stays inside a viewport of `height` rows.
fn scroll_to_keep_visible(current: usize, active: Option<usize>, height: usize) -> usize {
    let Some(active) = active else {
        return current;
    };
    if height == 0 {
        return active;
    }
    if active < current {
        active
    } else if active >= current + height {
        active + 1 - height
    } else {
        current
    }
}

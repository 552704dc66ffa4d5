//! Planner wizard screens.
//!
//! - Destination - edit the trip request
//! - Activities / Accommodation / Transportation - pick catalog items
//! - Review - selections, cost breakdown and itinerary
//!
//! Catalog rows are filtered by the step's search query. Transport rows are
//! grouped under a heading per journey segment. While a step's refresh flag
//! is raised its list is drawn dimmed with an updating marker.

use super::PlannerView;
use crate::app::RequestField;
use crate::catalog::{
    Accommodation, Activity, CatalogItem, JourneySegment, TransportOption, search,
};
use crate::currency::Currency;
use crate::session::PlannerSession;
use crate::theme::{Colors, Styles, Theme};
use crate::types::Step;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

// ============================================================================
// Catalog Rows
// ============================================================================

/// One catalog item as shown in a step's list.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub rating: Option<f64>,
    /// What the item adds to the total.
    pub price: f64,
    /// Short secondary text: location, duration or route.
    pub detail: String,
    /// Journey segment id of a transport option
    pub segment: Option<String>,
}

impl CatalogRow {
    fn from_activity(item: &Activity) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind.clone(),
            rating: item.rating(),
            price: item.total_price(),
            detail: format!("{}, {}", item.location, item.duration),
            segment: None,
        }
    }

    fn from_accommodation(item: &Accommodation) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind.clone(),
            rating: item.rating(),
            price: item.total_price(),
            detail: format!(
                "{}, {} night(s) at {}",
                item.location, item.total_nights, item.price_per_night
            ),
            segment: None,
        }
    }

    fn from_transport(item: &TransportOption) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind.as_str().to_string(),
            rating: None,
            price: item.total_price(),
            detail: format!("{} to {}, {}", item.from, item.to, item.duration),
            segment: item.segment.clone(),
        }
    }

    /// Render the row as a list line
    pub fn display_line(&self, currency: Currency, chosen: bool) -> Line<'static> {
        let check_style = if chosen {
            Styles::chosen()
        } else {
            Styles::text_muted()
        };
        let rating = match self.rating {
            Some(r) => format!("★{:.1}", r),
            None => "    ".to_string(),
        };
        Line::from(vec![
            Span::styled(format!("{} ", Theme::check_box(chosen)), check_style),
            Span::styled(format!("{:<32}", self.name), Styles::text()),
            Span::styled(format!("{:<12}", self.kind), Styles::text_secondary()),
            Span::styled(format!("{:>5} ", rating), Styles::rating()),
            Span::styled(format!("{:>9}", currency.format_amount(self.price)), Styles::price()),
            Span::styled(format!("  {}", self.detail), Styles::text_muted()),
        ])
    }
}

/// Rows of a step's catalog matching `query`, in catalog order.
///
/// The order matches [`PlannerSession::search`], so a cursor index into
/// these rows addresses the same item id.
pub fn catalog_rows(session: &PlannerSession, step: Step, query: &str) -> Vec<CatalogRow> {
    let catalogs = session.catalogs();
    match step {
        Step::Activities => search(&catalogs.activities, query)
            .into_iter()
            .map(CatalogRow::from_activity)
            .collect(),
        Step::Accommodation => search(&catalogs.accommodation, query)
            .into_iter()
            .map(CatalogRow::from_accommodation)
            .collect(),
        Step::Transportation => search(&catalogs.transportation, query)
            .into_iter()
            .map(CatalogRow::from_transport)
            .collect(),
    }
}

// ============================================================================
// Destination Screen
// ============================================================================

/// Render the request editor and a preview of what it produces.
pub fn render_destination_screen(f: &mut Frame, area: Rect, view: &PlannerView<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let request = view.session.request();
    let items: Vec<ListItem> = RequestField::iter()
        .map(|field| {
            let value = field.current_value(request);
            let (text, style) = if value.is_empty() {
                (field.placeholder().to_string(), Styles::text_muted())
            } else {
                (value, Styles::text())
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", field.label()), Styles::header()),
                Span::styled(text, style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your Trip ")
                .border_style(Styles::border_active()),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol("> ");
    let mut list_state = view.state.field_list.clone();
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    let preview = Paragraph::new(destination_preview(view.session, view.currency))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Preview ")
                .border_style(Styles::border_inactive()),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(preview, chunks[1]);
}

fn destination_preview(session: &PlannerSession, currency: Currency) -> Vec<Line<'static>> {
    let request = session.request();
    let mut lines = Vec::new();

    if let Some(trip) = session.provider().featured_trip_for(request) {
        lines.push(Line::from(Span::styled(
            format!("Featured: {}", trip.name),
            Styles::title(),
        )));
        lines.push(Line::from(Span::styled(
            format!("{}  ★{}  {}", trip.location, trip.rating, trip.budget),
            Styles::text_secondary(),
        )));
        lines.push(Line::from(""));
    }

    let catalogs = session.catalogs();
    for step in [Step::Activities, Step::Accommodation, Step::Transportation] {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<16}", step.label()), Styles::text()),
            Span::styled(
                format!("{} options", catalogs.len(step)),
                Styles::text_secondary(),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "{} traveller(s), {} night(s), budget {}",
            request.travellers(),
            request.total_nights(),
            currency.format_amount(request.budget)
        ),
        Styles::text_muted(),
    )));
    lines
}

// ============================================================================
// Catalog Screens
// ============================================================================

/// Render one catalog step: search line, item list and the step's note.
pub fn render_catalog_screen(f: &mut Frame, area: Rect, view: &PlannerView<'_>, step: Step) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let session = view.session;
    let query = view.state.search(step);
    let refreshing = session.is_refreshing(step);
    let rows = catalog_rows(session, step, query);
    let chosen = session.selections().get(step);

    f.render_widget(
        Paragraph::new(catalog_header(session, step, query, rows.len())),
        chunks[0],
    );

    let (items, positions) = if rows.is_empty() {
        let empty = ListItem::new(Span::styled(
            "Nothing matches. Press Esc to clear the search.",
            Styles::text_muted(),
        ));
        (vec![empty], Vec::new())
    } else {
        let lines: Vec<Line<'static>> = rows
            .iter()
            .map(|row| row.display_line(view.currency, chosen.contains(&row.id)))
            .collect();
        if step == Step::Transportation {
            group_by_segment(&rows, lines, &session.catalogs().journey)
        } else {
            let positions: Vec<usize> = (0..lines.len()).collect();
            (lines.into_iter().map(ListItem::new).collect(), positions)
        }
    };

    let border_style = if refreshing {
        Style::default().fg(Colors::REFRESHING)
    } else {
        Styles::border_active()
    };
    let list_style = if refreshing {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", step.label()))
                .border_style(border_style),
        )
        .style(list_style)
        .highlight_style(Styles::selected())
        .highlight_symbol("> ");
    // The cursor indexes rows; headings shift where each row is drawn.
    let mut list_state = view.state.catalog_list(step).clone();
    let cursor = list_state.selected().and_then(|i| positions.get(i).copied());
    list_state.select(cursor);
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let note = session.custom_input(step);
    let note_widget = Paragraph::new(if note.is_empty() {
        Span::styled("Press N to add a note for this step", Styles::text_muted())
    } else {
        Span::styled(note.to_string(), Styles::text())
    })
    .block(Block::default().borders(Borders::ALL).title(" Note "))
    .wrap(Wrap { trim: true });
    f.render_widget(note_widget, chunks[2]);
}

/// Count line above a catalog list, with search, refresh and budget markers.
pub fn catalog_header(
    session: &PlannerSession,
    step: Step,
    query: &str,
    matches: usize,
) -> Line<'static> {
    let mut header = vec![Span::styled(
        format!(
            "{} selected of {}",
            session.selections().get(step).len(),
            session.catalogs().len(step)
        ),
        Styles::text_secondary(),
    )];
    if !query.is_empty() {
        header.push(Span::styled(
            format!("   search: \"{}\" ({} match)", query, matches),
            Styles::info(),
        ));
    }
    if session.is_refreshing(step) {
        header.push(Span::styled("   updating...", Styles::refreshing()));
    }
    if !session.cost_summary().within_budget {
        header.push(Span::styled("   over budget", Styles::warning()));
    }
    Line::from(header)
}

/// Heading line for a run of transport rows.
fn segment_heading(journey: &[JourneySegment], segment: Option<&str>) -> Line<'static> {
    match segment.and_then(|id| journey.iter().find(|s| s.id == id)) {
        Some(s) => Line::from(vec![
            Span::styled(s.title.clone(), Styles::header()),
            Span::styled(format!("  {}", s.route), Styles::info()),
        ]),
        None => Line::from(Span::styled("Suggested routes", Styles::header())),
    }
}

/// Insert a heading before each run of rows from the same segment.
///
/// Returns the list items and, per row, the item index it was drawn at.
fn group_by_segment(
    rows: &[CatalogRow],
    lines: Vec<Line<'static>>,
    journey: &[JourneySegment],
) -> (Vec<ListItem<'static>>, Vec<usize>) {
    let mut items = Vec::with_capacity(rows.len() + journey.len() + 1);
    let mut positions = Vec::with_capacity(rows.len());
    let mut current: Option<Option<&str>> = None;

    for (row, line) in rows.iter().zip(lines) {
        let segment = row.segment.as_deref();
        if current != Some(segment) {
            current = Some(segment);
            items.push(ListItem::new(segment_heading(journey, segment)));
        }
        positions.push(items.len());
        items.push(ListItem::new(line));
    }

    (items, positions)
}

// ============================================================================
// Review Screen
// ============================================================================

/// Render the trip review.
pub fn render_review_screen(f: &mut Frame, area: Rect, view: &PlannerView<'_>) {
    let review = Paragraph::new(review_lines(view.session, view.currency))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your Trip ")
                .border_style(Styles::border_active()),
        )
        .wrap(Wrap { trim: false })
        .scroll((view.state.review_scroll, 0));
    f.render_widget(review, area);
}

/// Review content: selections per step, cost breakdown and itinerary.
pub fn review_lines(session: &PlannerSession, currency: Currency) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let selected = session.get_filtered_selections();

    let sections: [(Step, Vec<CatalogRow>); 3] = [
        (
            Step::Activities,
            selected.activities.iter().map(CatalogRow::from_activity).collect(),
        ),
        (
            Step::Accommodation,
            selected
                .accommodation
                .iter()
                .map(CatalogRow::from_accommodation)
                .collect(),
        ),
        (
            Step::Transportation,
            selected
                .transportation
                .iter()
                .map(CatalogRow::from_transport)
                .collect(),
        ),
    ];

    for (step, rows) in sections {
        lines.push(Line::from(Span::styled(step.label().to_string(), Styles::header())));
        if rows.is_empty() {
            lines.push(Line::from(Span::styled("  nothing selected", Styles::text_muted())));
        }
        for row in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<32}", row.name), Styles::text()),
                Span::styled(currency.format_amount(row.price), Styles::price()),
            ]));
        }
        let note = session.custom_input(step);
        if !note.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  Note: {}", note),
                Styles::text_secondary(),
            )));
        }
        lines.push(Line::from(""));
    }

    let summary = session.cost_summary();
    lines.push(Line::from(Span::styled("Cost", Styles::header())));
    let rendered = summary.render(currency);
    let last = rendered.len().saturating_sub(1);
    for (i, row) in rendered.into_iter().enumerate() {
        let style = if i == last {
            if summary.within_budget {
                Styles::success()
            } else {
                Styles::error()
            }
        } else {
            Styles::text()
        };
        lines.push(Line::from(Span::styled(format!("  {}", row), style)));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Itinerary", Styles::header())));
    for day in session.itinerary() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}  ", day.date.format("%a %d %b")), Styles::info()),
            Span::styled(day.summary(), Styles::text()),
        ]));
    }

    lines
}

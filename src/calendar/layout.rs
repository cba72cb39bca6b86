//! Stacks same-row segments into non-overlapping layers.
//!
//! Placement is greedy first-fit in input order, so earlier events (projects
//! before campaigns before tasks) claim the lower layers. This does not
//! minimize the layer count but is deterministic and cheap for the handful of
//! segments a week row holds.

use std::collections::BTreeMap;

use super::segment::EventSegment;

/// Layers of one week row, lowest first. Members of a layer never share a column.
pub type Layers<'a> = Vec<Vec<EventSegment<'a>>>;

/// A week row after the visible-layer cutoff was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedRow<'a> {
    pub visible_layers: Layers<'a>,
    /// Segments sitting in layers at or beyond the cutoff.
    pub hidden_count: usize,
    /// Hidden segments covering each weekday column, for "+N more" badges.
    pub hidden_by_col: [usize; 7],
}

impl BoundedRow<'_> {
    pub fn has_hidden(&self) -> bool {
        self.hidden_count > 0
    }
}

/// Assign every segment to a layer, grouped by row.
pub fn layout_rows<'a>(segments: &[EventSegment<'a>]) -> BTreeMap<usize, Layers<'a>> {
    let mut rows: BTreeMap<usize, Layers<'a>> = BTreeMap::new();
    for segment in segments {
        let layers = rows.entry(segment.row).or_default();
        place(layers, *segment);
    }
    rows
}

/// Like [`layout_rows`], but only the first `max_visible_layers` layers of a
/// row are kept visible and the rest are counted as hidden.
pub fn layout_rows_bounded<'a>(
    segments: &[EventSegment<'a>],
    max_visible_layers: usize,
) -> BTreeMap<usize, BoundedRow<'a>> {
    layout_rows(segments)
        .into_iter()
        .map(|(row, mut layers)| {
            let hidden: Layers<'a> = if layers.len() > max_visible_layers {
                layers.split_off(max_visible_layers)
            } else {
                Vec::new()
            };
            let mut hidden_by_col = [0usize; 7];
            let mut hidden_count = 0;
            for segment in hidden.iter().flatten() {
                hidden_count += 1;
                for (col, count) in hidden_by_col.iter_mut().enumerate() {
                    if segment.covers_col(col) {
                        *count += 1;
                    }
                }
            }
            (
                row,
                BoundedRow {
                    visible_layers: layers,
                    hidden_count,
                    hidden_by_col,
                },
            )
        })
        .collect()
}

fn place<'a>(layers: &mut Layers<'a>, segment: EventSegment<'a>) {
    let slot = layers
        .iter_mut()
        .find(|layer| layer.iter().all(|other| !other.overlaps_columns(&segment)));
    match slot {
        Some(layer) => layer.push(segment),
        None => layers.push(vec![segment]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::event::{CalendarEvent, EventColor, EventSource};
    use crate::calendar::segment::segment;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn event(start: u32, end: u32) -> CalendarEvent {
        CalendarEvent::new(
            EventSource::Task {
                task_id: Uuid::new_v4(),
                campaign_id: None,
            },
            format!("{start}-{end}"),
            d(start),
            d(end),
            EventColor::Blue,
        )
    }

    // June 2nd 2025 is a Monday.
    fn segments_of(events: &[CalendarEvent]) -> Vec<EventSegment<'_>> {
        events
            .iter()
            .flat_map(|e| segment(e, d(2), d(29)))
            .collect()
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(layout_rows(&[]).is_empty());
        assert!(layout_rows_bounded(&[], 2).is_empty());
    }

    #[test]
    fn disjoint_segments_share_layer_zero() {
        let events = vec![event(2, 3), event(4, 4), event(5, 8)];
        let segs = segments_of(&events);
        let rows = layout_rows(&segs);
        assert_eq!(rows[&0].len(), 1);
        assert_eq!(rows[&0][0].len(), 3);
    }

    #[test]
    fn first_fit_reuses_lower_layers() {
        // A: Mon-Wed, B: Tue-Thu (collides with A), C: Thu-Fri (fits beside A).
        let events = vec![event(2, 4), event(3, 5), event(5, 6)];
        let segs = segments_of(&events);
        let rows = layout_rows(&segs);
        let layers = &rows[&0];
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].iter().map(|s| s.event.title.as_str()).collect::<Vec<_>>(), ["2-4", "5-6"]);
        assert_eq!(layers[1][0].event.title, "3-5");
    }

    #[test]
    fn bounded_layout_counts_hidden_per_column() {
        let events = vec![event(2, 8), event(2, 8), event(3, 4), event(6, 6)];
        let segs = segments_of(&events);
        let rows = layout_rows_bounded(&segs, 1);
        let row = &rows[&0];
        assert_eq!(row.visible_layers.len(), 1);
        assert_eq!(row.hidden_count, 3);
        assert_eq!(row.hidden_by_col, [1, 2, 2, 1, 2, 1, 1]);
        assert!(row.has_hidden());
    }
}

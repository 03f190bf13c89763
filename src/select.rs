use crate::orbit::Point;

/// Hit radius for click selection, in data units (AU).
pub const SELECT_RADIUS: f64 = 3.0;

/// What a click does to the tracked body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Click landed outside the plot; leave the target alone.
    Ignore,
    /// Track this body, or stop tracking on `None`.
    Set(Option<String>),
}

/// Nearest body strictly within `radius` of the click. Ties keep the
/// earlier body in table order. Clicking empty space clears the target.
pub fn resolve_click<'a, I>(click: Option<Point>, positions: I, radius: f64) -> Selection
where
    I: IntoIterator<Item = (&'a str, Point)>,
{
    let Some(click) = click else {
        return Selection::Ignore;
    };

    let mut best: Option<(&str, f64)> = None;
    for (name, p) in positions {
        let d = p.dist(click);
        if d >= radius {
            continue;
        }
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((name, d));
        }
    }
    Selection::Set(best.map(|(n, _)| n.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bodies() -> Vec<(&'static str, Point)> {
        vec![
            ("Inner", Point::new(1.0, 0.0)),
            ("Outer", Point::new(20.0, 0.0)),
        ]
    }

    #[test]
    fn click_on_a_body_selects_it() {
        let got = resolve_click(Some(Point::new(20.0, 0.0)), bodies(), SELECT_RADIUS);
        assert_eq!(got, Selection::Set(Some("Outer".to_string())));
    }

    #[test]
    fn just_inside_and_just_outside_the_radius() {
        let inside = resolve_click(Some(Point::new(20.0, 2.99)), bodies(), SELECT_RADIUS);
        assert_eq!(inside, Selection::Set(Some("Outer".to_string())));

        let outside = resolve_click(Some(Point::new(20.0, 3.01)), bodies(), SELECT_RADIUS);
        assert_eq!(outside, Selection::Set(None));
    }

    #[test]
    fn nearest_within_radius_wins() {
        let pts = vec![("A", Point::new(0.0, 0.0)), ("B", Point::new(1.0, 0.0))];
        let got = resolve_click(Some(Point::new(0.8, 0.0)), pts, SELECT_RADIUS);
        assert_eq!(got, Selection::Set(Some("B".to_string())));
    }

    #[test]
    fn ties_keep_table_order() {
        let pts = vec![("A", Point::new(-1.0, 0.0)), ("B", Point::new(1.0, 0.0))];
        let got = resolve_click(Some(Point::ORIGIN), pts, SELECT_RADIUS);
        assert_eq!(got, Selection::Set(Some("A".to_string())));
    }

    #[test]
    fn outside_the_plot_is_ignored() {
        assert_eq!(resolve_click(None, bodies(), SELECT_RADIUS), Selection::Ignore);
    }
}

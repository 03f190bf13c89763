use crate::orbit::Point;
use std::collections::VecDeque;

/// Bounded history of visited points, oldest dropped first.
#[derive(Clone, Debug)]
pub struct Trail {
    cap: usize,
    points: VecDeque<Point>,
}

impl Trail {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            points: VecDeque::with_capacity(cap.min(4096)),
        }
    }

    pub fn push(&mut self, p: Point) {
        self.points.push_back(p);
        while self.points.len() > self.cap {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_newest_entries() {
        let mut t = Trail::new(3);
        for i in 0..5 {
            t.push(Point::new(i as f64, 0.0));
        }
        let xs: Vec<f64> = t.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(t.last(), Some(Point::new(4.0, 0.0)));
    }

    #[test]
    fn clear_empties() {
        let mut t = Trail::new(2);
        t.push(Point::ORIGIN);
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.capacity(), 2);
    }
}

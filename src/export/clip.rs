//! Data-space clipping against the axis window.
//!
//! plotters maps series coordinates straight onto the backend, so geometry
//! that runs past an explicit axis bound has to be cut before it is drawn.

pub type Pt = (f64, f64);

/// The visible part of the data plane, `x` and `y` as `(min, max)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Window {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self {
            x: (x.0.min(x.1), x.0.max(x.1)),
            y: (y.0.min(y.1), y.0.max(y.1)),
        }
    }

    pub fn contains(&self, (x, y): Pt) -> bool {
        x >= self.x.0 && x <= self.x.1 && y >= self.y.0 && y <= self.y.1
    }

    /// Intersection with the box spanned by two corners (any order).
    pub fn intersect(&self, a: Pt, b: Pt) -> Option<(Pt, Pt)> {
        let l = a.0.min(b.0).max(self.x.0);
        let r = a.0.max(b.0).min(self.x.1);
        let lo = a.1.min(b.1).max(self.y.0);
        let hi = a.1.max(b.1).min(self.y.1);
        (l < r && lo < hi).then_some(((l, lo), (r, hi)))
    }
}

/// Liang-Barsky segment clipping.
pub fn clip_segment(w: &Window, a: Pt, b: Pt) -> Option<(Pt, Pt)> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, a.0 - w.x.0),
        (dx, w.x.1 - a.0),
        (-dy, a.1 - w.y.0),
        (dy, w.y.1 - a.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Clip a polyline; leaving and re-entering the window starts a new run.
pub fn clip_polyline(w: &Window, points: &[Pt]) -> Vec<Vec<Pt>> {
    let mut runs: Vec<Vec<Pt>> = Vec::new();
    let mut cur: Vec<Pt> = Vec::new();
    for pair in points.windows(2) {
        match clip_segment(w, pair[0], pair[1]) {
            Some((p, q)) => {
                if cur.last() != Some(&p) {
                    if cur.len() > 1 {
                        runs.push(std::mem::take(&mut cur));
                    }
                    cur.clear();
                    cur.push(p);
                }
                cur.push(q);
            }
            None => {
                if cur.len() > 1 {
                    runs.push(std::mem::take(&mut cur));
                }
                cur.clear();
            }
        }
    }
    if cur.len() > 1 {
        runs.push(cur);
    }
    runs
}

/// Sutherland-Hodgman polygon clipping against the four edges.
pub fn clip_polygon(w: &Window, points: &[Pt]) -> Vec<Pt> {
    let edges: [(fn(Pt, &Window) -> bool, fn(Pt, Pt, &Window) -> Pt); 4] = [
        (|p, w| p.0 >= w.x.0, |a, b, w| at_x(a, b, w.x.0)),
        (|p, w| p.0 <= w.x.1, |a, b, w| at_x(a, b, w.x.1)),
        (|p, w| p.1 >= w.y.0, |a, b, w| at_y(a, b, w.y.0)),
        (|p, w| p.1 <= w.y.1, |a, b, w| at_y(a, b, w.y.1)),
    ];
    let mut out: Vec<Pt> = points.to_vec();
    for (inside, cross) in edges {
        if out.is_empty() {
            break;
        }
        let input = std::mem::take(&mut out);
        let mut prev = input[input.len() - 1];
        for &cur in &input {
            match (inside(cur, w), inside(prev, w)) {
                (true, true) => out.push(cur),
                (true, false) => {
                    out.push(cross(prev, cur, w));
                    out.push(cur);
                }
                (false, true) => out.push(cross(prev, cur, w)),
                (false, false) => {}
            }
            prev = cur;
        }
    }
    out
}

fn at_x(a: Pt, b: Pt, x: f64) -> Pt {
    let t = (x - a.0) / (b.0 - a.0);
    (x, a.1 + t * (b.1 - a.1))
}

fn at_y(a: Pt, b: Pt, y: f64) -> Pt {
    let t = (y - a.1) / (b.1 - a.1);
    (a.0 + t * (b.0 - a.0), y)
}

//! Albers USA composite projection
//!
//! Three conic equal-area projections: the lower 48 states, plus Alaska and
//! Hawaii scaled and moved into insets below the west coast. A point is
//! assigned to the first projection whose inset box contains it. Projected
//! shapes come out as `geo` geometry.

use std::f64::consts::PI;

use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::intersects::Intersects;
use geo::{Coord, LineString, MultiPolygon, Rect, TriangulateEarcut};

use super::topology::{LonLat, Polygon};

/// Screen position in pixels
pub type Point = [f64; 2];

/// Raw conic equal-area projection between two standard parallels
#[derive(Clone, Copy, Debug)]
struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
}

impl ConicEqualArea {
    fn new(parallel0: f64, parallel1: f64) -> Self {
        let sy0 = parallel0.to_radians().sin();
        let n = (sy0 + parallel1.to_radians().sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        Self {
            n,
            c,
            r0: c.sqrt() / n,
        }
    }

    /// Radians in, unit-scale planar coordinates out (y up)
    fn raw(&self, lambda: f64, phi: f64) -> [f64; 2] {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let x = lambda * self.n;
        [r * x.sin(), self.r0 - r * x.cos()]
    }
}

/// Conic projection with rotation, center, scale and translation applied
#[derive(Clone, Copy, Debug)]
struct Conic {
    raw: ConicEqualArea,
    rotate: f64,
    /// Raw projection of the (rotated-frame) center
    center: [f64; 2],
    k: f64,
    translate: Point,
}

impl Conic {
    fn new(parallels: [f64; 2], rotate: f64, center: LonLat, k: f64, translate: Point) -> Self {
        let raw = ConicEqualArea::new(parallels[0], parallels[1]);
        let center = raw.raw(center[0].to_radians(), center[1].to_radians());
        Self {
            raw,
            rotate,
            center,
            k,
            translate,
        }
    }

    fn project(&self, lon: f64, lat: f64) -> Point {
        let mut lambda = (lon + self.rotate).to_radians();
        if lambda > PI {
            lambda -= 2.0 * PI;
        } else if lambda < -PI {
            lambda += 2.0 * PI;
        }
        let [x, y] = self.raw.raw(lambda, lat.to_radians());
        [
            self.translate[0] + self.k * (x - self.center[0]),
            self.translate[1] - self.k * (y - self.center[1]),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UsaRegion {
    Lower48,
    Alaska,
    Hawaii,
}

/// Composite projection of the United States
#[derive(Clone, Debug)]
pub struct AlbersUsa {
    parts: [(UsaRegion, Conic, Rect<f64>); 3],
}

impl AlbersUsa {
    /// `scale` as in d3 (1070 fills a 960 px wide frame), `translate` is the
    /// pixel position of the lower-48 center
    pub fn new(scale: f64, translate: Point) -> Self {
        let k = scale;
        let [x, y] = translate;
        let lower48 = Conic::new([29.5, 45.5], 96.0, [-0.6, 38.7], k, [x, y]);
        let alaska = Conic::new(
            [55.0, 65.0],
            154.0,
            [-2.0, 58.5],
            k * 0.35,
            [x - 0.307 * k, y + 0.201 * k],
        );
        let hawaii = Conic::new(
            [8.0, 18.0],
            157.0,
            [-3.0, 19.9],
            k,
            [x - 0.205 * k, y + 0.212 * k],
        );
        let inset = |min: Point, max: Point| Rect::new(Coord::from(min), Coord::from(max));
        Self {
            parts: [
                (
                    UsaRegion::Lower48,
                    lower48,
                    inset([x - 0.455 * k, y - 0.238 * k], [x + 0.455 * k, y + 0.238 * k]),
                ),
                (
                    UsaRegion::Alaska,
                    alaska,
                    inset([x - 0.425 * k, y + 0.120 * k], [x - 0.214 * k, y + 0.234 * k]),
                ),
                (
                    UsaRegion::Hawaii,
                    hawaii,
                    inset([x - 0.214 * k, y + 0.166 * k], [x - 0.115 * k, y + 0.234 * k]),
                ),
            ],
        }
    }

    /// Scaled to `width` and centered in a `width` x `height` frame
    pub fn fit(width: f64, height: f64) -> Self {
        Self::new(width, [width / 2.0, height / 2.0])
    }

    /// Which inset `[lon, lat]` falls in, if any
    pub fn region(&self, lon: f64, lat: f64) -> Option<UsaRegion> {
        self.parts
            .iter()
            .find(|(_, conic, inset)| inset.intersects(&Coord::from(conic.project(lon, lat))))
            .map(|(region, _, _)| *region)
    }

    /// Project a point, `None` outside all three insets
    pub fn project(&self, lon: f64, lat: f64) -> Option<Point> {
        self.parts.iter().find_map(|(_, conic, inset)| {
            let p = conic.project(lon, lat);
            inset.intersects(&Coord::from(p)).then_some(p)
        })
    }

    /// Project a point with a fixed inset, no bounds check
    pub fn project_in(&self, region: UsaRegion, lon: f64, lat: f64) -> Point {
        let conic = match region {
            UsaRegion::Lower48 => &self.parts[0].1,
            UsaRegion::Alaska => &self.parts[1].1,
            UsaRegion::Hawaii => &self.parts[2].1,
        };
        conic.project(lon, lat)
    }

    /// Inset for a whole shape, chosen by the center of its bounding box
    fn region_of<'a>(&self, points: impl IntoIterator<Item = &'a LonLat>) -> Option<UsaRegion> {
        let line: LineString<f64> = points.into_iter().copied().collect::<Vec<_>>().into();
        let center = line.bounding_rect()?.center();
        self.region(center.x, center.y)
    }

    fn project_ring(&self, region: UsaRegion, ring: &[LonLat]) -> LineString<f64> {
        ring.iter()
            .map(|p| Coord::from(self.project_in(region, p[0], p[1])))
            .collect::<Vec<_>>()
            .into()
    }

    /// Project every vertex of a shape with the same inset, so a shape is
    /// never split across insets. Shapes outside every inset give `None`.
    pub fn project_polygons(&self, polygons: &[Polygon]) -> Option<MultiPolygon<f64>> {
        let region = self.region_of(polygons.iter().flatten().flatten())?;
        let projected = polygons
            .iter()
            .filter_map(|rings| {
                let (exterior, holes) = rings.split_first()?;
                Some(geo::Polygon::new(
                    self.project_ring(region, exterior),
                    holes.iter().map(|h| self.project_ring(region, h)).collect(),
                ))
            })
            .collect::<Vec<_>>();
        Some(MultiPolygon::new(projected))
    }

    /// Project a polyline with a single inset
    pub fn project_path(&self, line: &[LonLat]) -> Option<Vec<Point>> {
        let region = self.region_of(line)?;
        Some(
            line.iter()
                .map(|p| self.project_in(region, p[0], p[1]))
                .collect(),
        )
    }
}

/// Ear-cut fill triangles of a shape; holes stay open
pub fn fill_triangles(shape: &MultiPolygon<f64>) -> Vec<[Point; 3]> {
    shape
        .0
        .iter()
        .flat_map(|poly| poly.earcut_triangles())
        .map(|t| [[t.0.x, t.0.y], [t.1.x, t.1.y], [t.2.x, t.2.y]])
        .collect()
}

//! Smallest enclosing circle.
//!
//! Given a set of points in the plane, find the center of the circle with the
//! smallest radius that contains all of them. A candidate is a center `[x, y]`;
//! its score is the distance to the farthest point.
//!
//! Instance files are whitespace separated tokens: the number of points `N`
//! followed by `N` pairs of coordinates `x y`.
use crate::{ChallengeError, Problem, Result, BUILD_TIME_PATH};
use log::{debug, info};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis aligned box spanning every point of an instance.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        Some(points.iter().skip(1).fold(
            Self {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |b, p| Self {
                min_x: b.min_x.min(p.x),
                max_x: b.max_x.max(p.x),
                min_y: b.min_y.min(p.y),
                max_y: b.max_y.max(p.y),
            },
        ))
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x)
            && (self.min_y..=self.max_y).contains(&point.y)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Parameters of a synthetic instance.
#[derive(Serialize, Deserialize, Debug, Copy, Clone)]
pub struct Track {
    pub n_points: usize,
    pub width: f64,
    pub height: f64,
}

/// A proposed circle center. Serialized as `[x, y]`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Solution {
    pub x: f64,
    pub y: f64,
}

impl Solution {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Solution {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Solution> for [f64; 2] {
    fn from(solution: Solution) -> Self {
        [solution.x, solution.y]
    }
}

impl From<Solution> for Vec<f64> {
    fn from(solution: Solution) -> Self {
        vec![solution.x, solution.y]
    }
}

impl TryFrom<&[f64]> for Solution {
    type Error = ChallengeError;

    fn try_from(values: &[f64]) -> Result<Self> {
        match values {
            [x, y] => Ok(Self { x: *x, y: *y }),
            _ => Err(ChallengeError::InvalidArgument(format!(
                "candidate must have exactly two values [x, y], got {}",
                values.len()
            ))),
        }
    }
}

impl TryFrom<Vec<f64>> for Solution {
    type Error = ChallengeError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::try_from(values.as_slice())
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct Challenge {
    pub points: Vec<Point>,
    pub nb_points: usize,
    pub bounds: Bounds,
    #[serde(skip)]
    pub instance_file: Option<PathBuf>,
}

impl Challenge {
    /// Builds an instance from points already in memory.
    ///
    /// Fails if `points` is empty or holds a non-finite coordinate.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        if let Some((i, _)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ChallengeError::Format(format!(
                "point {} has a non-finite coordinate",
                i
            )));
        }
        let bounds = Bounds::from_points(&points)
            .ok_or_else(|| ChallengeError::Format("at least one point required".to_string()))?;
        Ok(Self {
            nb_points: points.len(),
            points,
            bounds,
            instance_file: None,
        })
    }

    /// Loads an instance file.
    ///
    /// Relative paths are looked up under the crate directory first, so an
    /// instance shipped next to the crate is found whatever the current
    /// directory is. If nothing exists there the path is used as given.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = resolve_instance_path(path.as_ref());
        let text = fs::read_to_string(&path).map_err(|source| ChallengeError::Io {
            path: path.clone(),
            source,
        })?;
        let mut challenge: Self = text.parse()?;
        debug!(
            "loaded {} points from {} (bounds: {:?})",
            challenge.nb_points,
            path.display(),
            challenge.bounds
        );
        challenge.instance_file = Some(path);
        Ok(challenge)
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.n_points == 0 {
            return Err(ChallengeError::InvalidArgument(
                "n_points must be at least 1".to_string(),
            ));
        }
        if !(track.width.is_finite() && track.width >= 0.0)
            || !(track.height.is_finite() && track.height >= 0.0)
        {
            return Err(ChallengeError::InvalidArgument(format!(
                "width ({}) and height ({}) must be finite and non-negative",
                track.width, track.height
            )));
        }
        let mut rng = SmallRng::from_seed(*seed);
        let points = (0..track.n_points)
            .map(|_| {
                Point::new(
                    sample_closed(&mut rng, 0.0, track.width),
                    sample_closed(&mut rng, 0.0, track.height),
                )
            })
            .collect();
        let challenge = Self::new(points)?;
        debug!(
            "generated {} points (bounds: {:?})",
            challenge.nb_points, challenge.bounds
        );
        Ok(challenge)
    }

    /// Radius of the smallest circle centered on `solution` enclosing every point.
    pub fn calc_radius(&self, solution: &Solution) -> f64 {
        let mut max_sq_dist = 0.0_f64;
        for p in &self.points {
            let dx = solution.x - p.x;
            let dy = solution.y - p.y;
            let sq_dist = dx * dx + dy * dy;
            if sq_dist > max_sq_dist {
                max_sq_dist = sq_dist;
            }
        }
        max_sq_dist.sqrt()
    }

    /// Scores an untyped candidate, which must be exactly `[x, y]`.
    pub fn evaluate_solution(&self, candidate: &[f64]) -> Result<f64> {
        let solution = Solution::try_from(candidate)?;
        Ok(self.calc_radius(&solution))
    }

    /// Samples a center uniformly from the closed bounding box.
    pub fn random_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Solution {
        Solution {
            x: sample_closed(rng, self.bounds.min_x, self.bounds.max_x),
            y: sample_closed(rng, self.bounds.min_y, self.bounds.max_y),
        }
    }

    pub fn verify_solution(&self, solution: &Solution, max_radius: f64) -> Result<()> {
        let radius = self.calc_radius(solution);
        if radius > max_radius {
            Err(ChallengeError::Rejected(format!(
                "Radius ({}) is greater than threshold ({})",
                radius, max_radius
            )))
        } else {
            info!(
                "Radius ({}) is less than or equal to threshold ({})",
                radius, max_radius
            );
            Ok(())
        }
    }

    /// Renders the instance in the file format accepted by [`Challenge::from_file`].
    pub fn to_instance_string(&self) -> String {
        let mut out = format!("{}\n", self.nb_points);
        for p in &self.points {
            out.push_str(&format!("{} {}\n", p.x, p.y));
        }
        out
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_instance_string()).map_err(|source| ChallengeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromStr for Challenge {
    type Err = ChallengeError;

    fn from_str(text: &str) -> Result<Self> {
        let mut tokens = text.split_whitespace();
        let first = tokens
            .next()
            .ok_or_else(|| ChallengeError::Format("instance is empty".to_string()))?;
        let nb_points = first.parse::<usize>().map_err(|_| {
            ChallengeError::Format(format!(
                "number of points ({}) is not a non-negative integer",
                first
            ))
        })?;
        // capacity is capped so a bogus count on a short file does not allocate
        let mut points = Vec::with_capacity(nb_points.min(text.len() / 2));
        for i in 0..nb_points {
            let x = parse_coordinate(tokens.next(), i, "x", nb_points)?;
            let y = parse_coordinate(tokens.next(), i, "y", nb_points)?;
            points.push(Point::new(x, y));
        }
        Self::new(points)
    }
}

impl Problem for Challenge {
    type Solution = Vec<f64>;

    fn evaluate(&self, solution: &Vec<f64>) -> Result<f64> {
        self.evaluate_solution(solution)
    }

    fn random_solution<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        Challenge::random_solution(self, rng).into()
    }
}

fn parse_coordinate(
    token: Option<&str>,
    index: usize,
    axis: &str,
    nb_points: usize,
) -> Result<f64> {
    let token = token.ok_or_else(|| {
        ChallengeError::Format(format!(
            "expected {} points but the instance ends at point {}",
            nb_points, index
        ))
    })?;
    token.parse::<f64>().map_err(|_| {
        ChallengeError::Format(format!(
            "{} coordinate of point {} ({}) is not a number",
            axis, index, token
        ))
    })
}

fn resolve_instance_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let bundled = Path::new(BUILD_TIME_PATH).join(path);
    if bundled.exists() {
        bundled
    } else {
        path.to_path_buf()
    }
}

// interpolates instead of sampling `low..=high` so spans wider than f64::MAX still work
fn sample_closed<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low == high {
        return low;
    }
    let t = rng.gen_range(0.0..=1.0);
    (low * (1.0 - t) + high * t).clamp(low, high)
}

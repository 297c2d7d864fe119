use super::types::{FieldBounds, Position2D, Team};
use crate::common::{DomainError, DomainResult};
use rand::Rng;

pub const TEAM_A_NAMES: [&str; 11] = [
    "Messi",
    "A. Alba",
    "G. Piqué",
    "S. Busquets",
    "F. De Jong",
    "A. Griezmann",
    "A. Fati",
    "R. Puig",
    "M. Ter Stegen",
    "O. Dembele",
    "M. Pedri",
];

pub const TEAM_B_NAMES: [&str; 11] = [
    "Ronaldo",
    "D. Silva",
    "P. Pogba",
    "L. Modric",
    "E. Hazard",
    "K. Benzema",
    "J. Cancelo",
    "B. Fernandes",
    "M. Courtois",
    "T. Kroos",
    "M. Valverde",
];

/// Player names per team, in setup order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rosters {
    pub team_a: Vec<String>,
    pub team_b: Vec<String>,
}

impl Rosters {
    pub fn names(&self, team: Team) -> &[String] {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }
}

pub fn default_rosters() -> Rosters {
    Rosters {
        team_a: TEAM_A_NAMES.iter().map(|n| n.to_string()).collect(),
        team_b: TEAM_B_NAMES.iter().map(|n| n.to_string()).collect(),
    }
}

/// Uniform position in `[margin, width - margin) x [margin, height - margin)`.
pub fn random_position<R: Rng + ?Sized>(
    bounds: &FieldBounds,
    margin: f64,
    rng: &mut R,
) -> DomainResult<Position2D> {
    let (min_x, max_x) = (margin, bounds.width - margin);
    let (min_y, max_y) = (margin, bounds.height - margin);
    if !(min_x < max_x && min_y < max_y) {
        return Err(DomainError::InvalidCommand {
            reason: format!(
                "Spawn margin {} leaves no room on a {}x{} field",
                margin, bounds.width, bounds.height
            ),
        });
    }
    Ok(Position2D {
        x: rng.gen_range(min_x..max_x),
        y: rng.gen_range(min_y..max_y),
    })
}

use rand::Rng;
use thiserror::Error;

pub const DEFAULT_SIDES: i32 = 6;
pub const MAX_ROLLS: i32 = 10_000;

const QUOTES: [&str; 2] = ["Take it easy", "Salvation lies within"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("numSides must be at least 1, got {0}")]
    InvalidSides(i32),
    #[error("cannot roll more than {MAX_ROLLS} dice at once, got {0}")]
    TooManyRolls(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die {
    sides: i32,
}

impl Die {
    /// Builds a die, falling back to six sides when none are given.
    pub fn new(sides: Option<i32>) -> Result<Self, DiceError> {
        let sides = sides.unwrap_or(DEFAULT_SIDES);
        if sides < 1 {
            return Err(DiceError::InvalidSides(sides));
        }
        Ok(Self { sides })
    }

    pub fn sides(&self) -> i32 {
        self.sides
    }

    pub fn roll_once<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.gen_range(1..=self.sides)
    }

    /// A non-positive count rolls nothing.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R, count: i32) -> Result<Vec<i32>, DiceError> {
        if count > MAX_ROLLS {
            return Err(DiceError::TooManyRolls(count));
        }
        Ok((0..count.max(0)).map(|_| self.roll_once(rng)).collect())
    }
}

pub fn quote_of_the_day<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    if rng.gen_bool(0.5) {
        QUOTES[0]
    } else {
        QUOTES[1]
    }
}

pub fn random_fraction<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

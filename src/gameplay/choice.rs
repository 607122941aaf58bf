use crate::Runs;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// A number shown by hand on a single delivery, by batsman or bowler.
/// Valid values are 1 through 6; construction is range-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Choice(u8);

impl Choice {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Draw uniformly from 1..=6.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::MIN..=Self::MAX))
    }
    /// Runs credited to the batsman when the delivery is not a dismissal.
    pub fn runs(&self) -> Runs {
        Runs::from(self.0)
    }
}

impl TryFrom<u8> for Choice {
    type Error = String;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            Self::MIN..=Self::MAX => Ok(Self(value)),
            n => Err(format!("choice out of range: {}", n)),
        }
    }
}

impl From<Choice> for u8 {
    fn from(choice: Choice) -> Self {
        choice.0
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn range_checked() {
        assert!(Choice::try_from(0).is_err());
        assert!(Choice::try_from(1).is_ok());
        assert!(Choice::try_from(6).is_ok());
        assert!(Choice::try_from(7).is_err());
    }

    #[test]
    fn draws_stay_in_range() {
        let ref mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let choice = Choice::draw(rng);
            assert!((Choice::MIN..=Choice::MAX).contains(&u8::from(choice)));
        }
    }

    #[test]
    fn every_face_reachable() {
        let ref mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 6];
        for _ in 0..10_000 {
            seen[usize::from(u8::from(Choice::draw(rng)) - 1)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}

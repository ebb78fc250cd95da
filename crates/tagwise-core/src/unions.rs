//! Literal-set unions and intersections, and records composed from parts

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::narrowing::{Bird, Fish, Pet};
use crate::{Error, Result};

pub const EVENS: &[u8] = &[2, 4, 6, 8];
pub const ONE_THROUGH_FIVE: &[u8] = &[1, 2, 3, 4, 5];

/// Members of either set, ascending
#[must_use]
pub fn union_of(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter()
        .chain(b)
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Members of both sets, ascending
#[must_use]
pub fn intersection_of(a: &[u8], b: &[u8]) -> Vec<u8> {
    let b: BTreeSet<u8> = b.iter().copied().collect();
    a.iter()
        .copied()
        .filter(|n| b.contains(n))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn render_set(members: &[u8]) -> String {
    members
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn admit(value: u8, members: &[u8]) -> Result<u8> {
    if members.contains(&value) {
        Ok(value)
    } else {
        Err(Error::NotInSet {
            value: i64::from(value),
            set: render_set(members),
        })
    }
}

/// `OneThroughFive | Evens`: 1, 2, 3, 4, 5, 6 or 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvenOrSmall(u8);

impl EvenOrSmall {
    #[must_use]
    pub fn members() -> Vec<u8> {
        union_of(ONE_THROUGH_FIVE, EVENS)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for EvenOrSmall {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        admit(value, &Self::members()).map(Self)
    }
}

/// `OneThroughFive & Evens`: 2 or 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EvenAndSmall(u8);

impl EvenAndSmall {
    #[must_use]
    pub fn members() -> Vec<u8> {
        intersection_of(ONE_THROUGH_FIVE, EVENS)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for EvenAndSmall {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        admit(value, &Self::members()).map(Self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INTERSECTION OF RECORDS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardNumber {
    pub cardnumber: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDate {
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
}

/// `CardNumber & CardDate & { cvv }`. Every part is required, so a record
/// carrying only one part fails to decode and names the missing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(flatten)]
    pub number: CardNumber,
    #[serde(flatten)]
    pub date: CardDate,
    pub cvv: u16,
}

impl CardDetails {
    /// # Errors
    ///
    /// `Error::Json` when any part is missing or malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "card {} expires {}",
            self.number.cardnumber, self.date.expiry_date
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UNIONS WITH COMMON MEMBERS
// ═══════════════════════════════════════════════════════════════════════════

/// The member shared by every small pet. `swim` and `fly` are not part of
/// it, so a [`Pet`] must be narrowed before either can be called.
pub trait LaysEggs {
    fn lay_eggs(&self) -> String;
}

impl LaysEggs for Fish {
    fn lay_eggs(&self) -> String {
        format!("{} lays eggs in water", self.name)
    }
}

impl LaysEggs for Bird {
    fn lay_eggs(&self) -> String {
        format!("{} lays eggs in a nest", self.name)
    }
}

impl LaysEggs for Pet {
    fn lay_eggs(&self) -> String {
        match self {
            Self::Fish(fish) => fish.lay_eggs(),
            Self::Bird(bird) => bird.lay_eggs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_members() {
        assert_eq!(EvenOrSmall::members(), vec![1, 2, 3, 4, 5, 6, 8]);
    }

    #[test]
    fn test_intersection_members() {
        assert_eq!(EvenAndSmall::members(), vec![2, 4]);
    }

    #[test]
    fn test_union_rejects_outsiders() {
        assert!(EvenOrSmall::try_from(8).is_ok());
        let err = EvenOrSmall::try_from(7);
        assert!(matches!(
            err,
            Err(Error::NotInSet { value: 7, ref set }) if set == "1 | 2 | 3 | 4 | 5 | 6 | 8"
        ));
        assert!(EvenOrSmall::try_from(10).is_err());
    }

    #[test]
    fn test_intersection_rejects_outsiders() {
        assert_eq!(EvenAndSmall::try_from(4).map(EvenAndSmall::get).ok(), Some(4));
        for n in [8, 1, 3] {
            assert!(EvenAndSmall::try_from(n).is_err(), "{n} should be rejected");
        }
    }

    #[test]
    fn test_card_details_requires_every_part() {
        let err = CardDetails::from_json(r#"{"cardnumber": "333 444 555"}"#);
        assert!(matches!(err, Err(Error::Json(ref e)) if e.to_string().contains("expiryDate")));

        let err = CardDetails::from_json(r#"{"expiryDate": "04/05/2025"}"#);
        assert!(matches!(err, Err(Error::Json(ref e)) if e.to_string().contains("cardnumber")));
    }

    #[test]
    fn test_card_details_complete() -> Result<()> {
        let card = CardDetails::from_json(
            r#"{"cardnumber": "333 444 555", "expiryDate": "04/05/2025", "cvv": 3456}"#,
        )?;
        assert_eq!(card.cvv, 3456);
        assert_eq!(card.to_string(), "card 333 444 555 expires 04/05/2025");
        Ok(())
    }

    #[test]
    fn test_common_member_callable_on_union() {
        let pet = Pet::Fish(Fish {
            name: "Nemo".into(),
        });
        assert_eq!(pet.lay_eggs(), "Nemo lays eggs in water");
        assert_eq!(pet.as_fish().map(Fish::swim), Some("Nemo swims".to_string()));
    }
}

use std::{
    fmt::{self, Write as _},
    str::FromStr,
};

use arrayvec::ArrayVec;
use shakmaty::{ByColor, ByRole, Color, Role};
use thiserror::Error;

/// Maximum number of pieces on one side of a material key.
pub const MAX_SIDE_PIECES: usize = 16;

/// Upper bound for the number of immediate dependencies: for each role, one
/// promotion and one capture per side.
pub const MAX_DEPENDENCIES: usize = 24;

/// Roles in the order they are written in table names.
const ROLES: [Role; 6] = [
    Role::King,
    Role::Queen,
    Role::Rook,
    Role::Bishop,
    Role::Knight,
    Role::Pawn,
];

const COLORS: [Color; 2] = [Color::White, Color::Black];

const fn role_char(role: Role) -> char {
    match role {
        Role::King => 'K',
        Role::Queen => 'Q',
        Role::Rook => 'R',
        Role::Bishop => 'B',
        Role::Knight => 'N',
        Role::Pawn => 'P',
    }
}

const fn char_role(ch: char) -> Option<Role> {
    Some(match ch {
        'K' => Role::King,
        'Q' => Role::Queen,
        'R' => Role::Rook,
        'B' => Role::Bishop,
        'N' => Role::Knight,
        'P' => Role::Pawn,
        _ => return None,
    })
}

fn color_name(color: &Color) -> &'static str {
    match *color {
        Color::White => "first",
        Color::Black => "second",
    }
}

/// Error when parsing a material key like `KRPvKR`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseMaterialError {
    #[error("expected two sides separated by 'v'")]
    MissingSeparator,
    #[error("invalid piece {0:?}")]
    InvalidPiece(char),
    #[error("{} side has no pieces", color_name(.0))]
    EmptySide(Color),
    #[error("{} side has more than 16 pieces", color_name(.0))]
    TooManyPieces(Color),
}

/// Material key of an endgame: the number of pieces of each role for
/// each side.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Material {
    pub by_color: ByColor<ByRole<u8>>,
}

fn empty_side() -> ByRole<u8> {
    ByRole {
        pawn: 0,
        knight: 0,
        bishop: 0,
        rook: 0,
        queen: 0,
        king: 0,
    }
}

impl Material {
    fn empty() -> Material {
        Material {
            by_color: ByColor {
                white: empty_side(),
                black: empty_side(),
            },
        }
    }

    fn side_count(&self, color: Color) -> usize {
        let side = self.by_color.get(color);
        ROLES.iter().map(|&role| usize::from(*side.get(role))).sum()
    }

    /// Total number of pieces.
    pub fn count(&self) -> usize {
        self.side_count(Color::White) + self.side_count(Color::Black)
    }

    pub fn has_pawns(&self) -> bool {
        self.by_color.white.pawn > 0 || self.by_color.black.pawn > 0
    }

    /// Tests for the bare kings, `KvK`.
    pub fn is_kings_only(&self) -> bool {
        COLORS.into_iter().all(|color| {
            let side = self.by_color.get(color);
            side.king == 1 && self.side_count(color) == 1
        })
    }

    /// Sort key of a side: more pieces first, then more pieces of the
    /// stronger roles.
    fn strength(&self, color: Color) -> (usize, [u8; 6]) {
        let side = self.by_color.get(color);
        (self.side_count(color), ROLES.map(|role| *side.get(role)))
    }

    pub fn is_normalized(&self) -> bool {
        self.strength(Color::White) >= self.strength(Color::Black)
    }

    #[must_use]
    pub fn into_swapped(self) -> Material {
        Material {
            by_color: ByColor {
                white: self.by_color.black,
                black: self.by_color.white,
            },
        }
    }

    /// Puts the stronger side first, so that `KvKQ` and `KQvK` share
    /// the same key.
    #[must_use]
    pub fn into_normalized(self) -> Material {
        if self.is_normalized() {
            self
        } else {
            self.into_swapped()
        }
    }

    /// Material keys reachable by a single promotion or capture, normalized
    /// and without duplicates.
    ///
    /// With `one_king` the king is royal: it is never captured or promoted
    /// to, and the trivial `KvK` endgame is left out.
    pub fn dependencies(&self, one_king: bool) -> ArrayVec<Material, MAX_DEPENDENCIES> {
        let mut deps = ArrayVec::new();

        for role in ROLES {
            if role == Role::King && one_king {
                continue;
            }

            // Promotions.
            if role != Role::Pawn {
                for color in COLORS {
                    if self.by_color.get(color).pawn > 0 {
                        let mut dep = self.clone();
                        let side = dep.by_color.get_mut(color);
                        side.pawn -= 1;
                        *side.get_mut(role) += 1;
                        push_dependency(&mut deps, dep, one_king);
                    }
                }
            }

            // Captures.
            for color in COLORS {
                if *self.by_color.get(color).get(role) > 0 && self.side_count(color) > 1 {
                    let mut dep = self.clone();
                    *dep.by_color.get_mut(color).get_mut(role) -= 1;
                    push_dependency(&mut deps, dep, one_king);
                }
            }
        }

        deps
    }
}

fn push_dependency(
    deps: &mut ArrayVec<Material, MAX_DEPENDENCIES>,
    dep: Material,
    one_king: bool,
) {
    let dep = dep.into_normalized();
    if (one_king && dep.is_kings_only()) || deps.contains(&dep) {
        return;
    }
    deps.push(dep);
}

impl FromStr for Material {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Material, ParseMaterialError> {
        let (white, black) = s
            .split_once('v')
            .ok_or(ParseMaterialError::MissingSeparator)?;

        let mut material = Material::empty();
        for (color, side) in COLORS.into_iter().zip([white, black]) {
            if side.is_empty() {
                return Err(ParseMaterialError::EmptySide(color));
            }
            for ch in side.chars() {
                let role = char_role(ch).ok_or(ParseMaterialError::InvalidPiece(ch))?;
                *material.by_color.get_mut(color).get_mut(role) += 1;
                if material.side_count(color) > MAX_SIDE_PIECES {
                    return Err(ParseMaterialError::TooManyPieces(color));
                }
            }
        }

        Ok(material)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in COLORS.into_iter().enumerate() {
            if i > 0 {
                f.write_char('v')?;
            }
            let side = self.by_color.get(color);
            for role in ROLES {
                for _ in 0..*side.get(role) {
                    f.write_char(role_char(role))?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(s: &str) -> Material {
        s.parse().expect("valid material")
    }

    fn deps(s: &str, one_king: bool) -> Vec<String> {
        material(s)
            .dependencies(one_king)
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(material("KBNvK").to_string(), "KBNvK");
        assert_eq!(material("KNBvK").to_string(), "KBNvK");
        assert_eq!(material("PKvK").to_string(), "KPvK");
        assert_eq!(material("KRPvKR").count(), 5);
        assert!(material("KRPvKR").has_pawns());
        assert!(!material("KRvK").has_pawns());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "KQK".parse::<Material>(),
            Err(ParseMaterialError::MissingSeparator)
        );
        assert_eq!(
            "KXvK".parse::<Material>(),
            Err(ParseMaterialError::InvalidPiece('X'))
        );
        assert_eq!(
            "KvKvK".parse::<Material>(),
            Err(ParseMaterialError::InvalidPiece('v'))
        );
        assert_eq!(
            "vK".parse::<Material>(),
            Err(ParseMaterialError::EmptySide(Color::White))
        );
        assert_eq!(
            "Kv".parse::<Material>(),
            Err(ParseMaterialError::EmptySide(Color::Black))
        );
        assert_eq!(
            "KPPPPPPPPQQQQQQQQvK".parse::<Material>(),
            Err(ParseMaterialError::TooManyPieces(Color::White))
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(material("KvKQ").into_normalized().to_string(), "KQvK");
        assert_eq!(material("KRvKQ").into_normalized().to_string(), "KQvKR");
        assert_eq!(material("KBvKNN").into_normalized().to_string(), "KNNvKB");
        assert_eq!(material("KPvKR").into_normalized().to_string(), "KRvKP");
        assert_eq!(material("KQvKQ").into_normalized().to_string(), "KQvKQ");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["KvKQ", "KRvKQ", "KPvKN", "KQRvKQR", "KBNPvKRR"] {
            let once = material(s).into_normalized();
            assert!(once.is_normalized());
            assert_eq!(once.clone().into_normalized(), once);
        }
    }

    #[test]
    fn test_dependencies_one_king() {
        assert_eq!(deps("KPvK", true), ["KQvK", "KRvK", "KBvK", "KNvK"]);
        assert_eq!(deps("KQvKR", true), ["KRvK", "KQvK"]);
        assert!(deps("KQvK", true).is_empty());
        assert!(deps("KvK", true).is_empty());
    }

    #[test]
    fn test_dependencies_deduplicated() {
        // Capturing either rook leads to the same endgame.
        assert_eq!(deps("KRvKR", true), ["KRvK"]);
    }

    #[test]
    fn test_dependencies_without_royal_king() {
        assert_eq!(deps("KQvK", false), ["KvQ", "KvK"]);
        assert!(deps("KvK", false).is_empty());
    }

    #[test]
    fn test_dependencies_reduce_material() {
        let pawns = |m: &Material| m.by_color.white.pawn + m.by_color.black.pawn;
        let m = material("KRPvKNP");
        for dep in m.dependencies(true) {
            assert!(dep.is_normalized());
            assert!(dep.count() < m.count() || pawns(&dep) < pawns(&m));
        }
    }
}

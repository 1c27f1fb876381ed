//! 3x5 bitmap font. Each glyph row uses three bits, most significant bit on the left.

use bevy::prelude::*;

const GLYPH_WIDTH: f32 = 3.0;
const GLYPH_HEIGHT: f32 = 5.0;
const ADVANCE: f32 = 4.0;

fn glyph(ch: char) -> Option<[u8; 5]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        // Lowercase n and w are the kaomoji shapes used on the snake's face.
        'N' if ch == 'n' => [0b000, 0b110, 0b101, 0b101, 0b101],
        'N' => [0b110, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' if ch == 'w' => [0b101, 0b101, 0b101, 0b111, 0b000],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '^' => [0b010, 0b101, 0b000, 0b000, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        '_' => [0b000, 0b000, 0b000, 0b000, 0b111],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '˃' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '˂' => [0b001, 0b010, 0b100, 0b010, 0b001],
        _ => return None,
    };
    Some(rows)
}

/// Bounding box of `text` at `scale`.
pub fn text_size(text: &str, scale: f32) -> Vec2 {
    let chars = text.chars().count() as f32;
    if chars == 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (chars * ADVANCE - (ADVANCE - GLYPH_WIDTH)) * scale,
        GLYPH_HEIGHT * scale,
    )
}

/// Pixel rects (top-left, size) for every lit glyph cell of `text`.
/// Unknown characters render as blanks but still advance.
pub fn glyph_rects(
    text: &str,
    origin: Vec2,
    scale: f32,
) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    text.chars().enumerate().flat_map(move |(index, ch)| {
        let left = origin.x + index as f32 * ADVANCE * scale;
        let rows = glyph(ch).unwrap_or([0; 5]);
        rows.into_iter().enumerate().flat_map(move |(row, bits)| {
            (0..3u8).filter(move |&col| (bits >> (2 - col)) & 1 != 0).map(move |col| {
                (
                    Vec2::new(left + col as f32 * scale, origin.y + row as f32 * scale),
                    Vec2::splat(scale),
                )
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_draws_eight_cells() {
        assert_eq!(glyph_rects("1", Vec2::ZERO, 1.0).count(), 8);
    }

    #[test]
    fn unknown_and_space_advance_without_drawing() {
        assert_eq!(glyph_rects(" ?", Vec2::ZERO, 2.0).count(), 0);
        let rects: Vec<_> = glyph_rects(" 1", Vec2::ZERO, 2.0).collect();
        assert!(rects.iter().all(|(min, _)| min.x >= 8.0));
    }

    #[test]
    fn text_size_matches_advance() {
        assert_eq!(text_size("", 3.0), Vec2::ZERO);
        assert_eq!(text_size("A", 1.0), Vec2::new(3.0, 5.0));
        assert_eq!(text_size("YOU DIED", 2.0), Vec2::new(62.0, 10.0));
    }

    #[test]
    fn face_glyphs_exist() {
        for face in crate::game::FACES {
            for ch in face.chars().filter(|ch| *ch != ' ') {
                assert!(glyph(ch).is_some(), "missing glyph {ch:?}");
            }
        }
    }

    #[test]
    fn arrowheads_mirror_each_other() {
        let right = glyph('˃').expect("right arrowhead");
        let left = glyph('˂').expect("left arrowhead");
        for (r, l) in right.into_iter().zip(left) {
            let mirrored = ((r & 1) << 2) | (r & 2) | (r >> 2);
            assert_eq!(mirrored, l);
        }
        assert_eq!(glyph_rects("˃ w ˂", Vec2::ZERO, 1.0).count(), 5 + 9 + 5);
    }
}

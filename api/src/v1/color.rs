//! Avatar colours and initials.
//!
//! Colours are a pure function of their input, so the same letter always
//! yields the same colour. Different names sharing an initial share a colour.

/// Used when an assignee has no entry in the directory.
pub const DEFAULT_COLOR: &str = "#2A3647";

/// Palette for assignee avatars, indexed by initial letter. Contacts picked
/// as assignees use it too.
pub const ASSIGNEE_PALETTE: [&str; 27] = [
    "#FF6B6B", "#FF8C42", "#FFA500", "#FFD700", "#FFE600", "#B4FF00", "#4CAF50", "#00C853",
    "#00E5FF", "#00B8D4", "#1DE9B6", "#00CFAE", "#00BCD4", "#40C4FF", "#2196F3", "#3D5AFE",
    "#536DFE", "#7C4DFF", "#AB47BC", "#E040FB", "#FF4081", "#F50057", "#EC407A", "#FF1744",
    "#FF5252", "#D500F9", "#9C27B0",
];

/// Palette for the contact list, indexed by list position.
pub const CONTACT_PALETTE: [&str; 40] = [
    "#FF6B6B", "#FF8C42", "#FFA500", "#FFD700", "#FFE600", "#B4FF00", "#4CAF50", "#00C853",
    "#00E5FF", "#00B8D4", "#1DE9B6", "#00CFAE", "#00BCD4", "#40C4FF", "#2196F3", "#3D5AFE",
    "#536DFE", "#7C4DFF", "#AB47BC", "#E040FB", "#FF4081", "#F50057", "#EC407A", "#FF1744",
    "#FF5252", "#D500F9", "#9C27B0", "#BA68C8", "#E91E63", "#FFB300", "#FFC400", "#FF9100",
    "#FF7043", "#F06292", "#FF6E40", "#C51162", "#8E24AA", "#651FFF", "#00BFA5", "#76FF03",
];

/// Colour for an initial: its distance from `'A'`, wrapped into the palette.
pub fn color_for_letter(letter: char) -> &'static str {
    let upper = letter.to_uppercase().next().unwrap_or(letter);
    let offset = i64::from(u32::from(upper)) - i64::from(u32::from('A'));
    let index = offset.rem_euclid(ASSIGNEE_PALETTE.len() as i64) as usize;

    ASSIGNEE_PALETTE[index]
}

pub fn color_for_index(index: usize) -> &'static str {
    CONTACT_PALETTE[index % CONTACT_PALETTE.len()]
}

/// Colour for the first initial of `name`, or [`DEFAULT_COLOR`] for a blank name.
pub fn color_for_name(name: &str) -> &'static str {
    match initials(name).chars().next() {
        Some(letter) => color_for_letter(letter),
        None => DEFAULT_COLOR,
    }
}

/// First letter of every whitespace-separated word, upper-cased.
pub fn initials(name: &str) -> String {
    (name.split_whitespace())
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_into_palette() {
        assert_eq!(color_for_letter('A'), "#FF6B6B");
        assert_eq!(color_for_letter('a'), "#FF6B6B");
        assert_eq!(color_for_letter('B'), "#FF8C42");
        assert_eq!(color_for_letter('Z'), "#D500F9");
    }

    #[test]
    fn colours_are_deterministic() {
        for letter in ['M', 'x', '7', 'Ä', '@'] {
            assert_eq!(color_for_letter(letter), color_for_letter(letter));
            assert!(ASSIGNEE_PALETTE.contains(&color_for_letter(letter)));
        }

        assert_eq!(color_for_index(3), color_for_index(43));
    }

    #[test]
    fn same_initial_collides() {
        assert_eq!(color_for_name("Sofia Müller"), color_for_name("Sam Smith"));
        assert_eq!(color_for_name("   "), DEFAULT_COLOR);
    }

    #[test]
    fn initials_skip_extra_spaces() {
        assert_eq!(initials("anton  mayer"), "AM");
        assert_eq!(initials(" Emmanuel Mauer Junior "), "EMJ");
        assert_eq!(initials(""), "");
    }
}

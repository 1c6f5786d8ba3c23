//! Botris damage rules: static attack tables plus the combo/back-to-back
//! state machine. Tables are consts - initialized once, never written.

use botrix_core::Spin;

/// Botris scoring mode. Damage is a pure function of the clear event and
/// the pre-update counters; the counters themselves are updated in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Botris;

impl Botris {
    /// Base damage indexed by [lines cleared][spin]. The spin columns carry
    /// the all-spin premium (2/4/6); a spin quad falls back to the quad row.
    pub const ATTACK_TABLE: [[u32; 3]; 5] = [
        [0, 0, 0],
        [0, 2, 2],
        [1, 4, 4],
        [2, 6, 6],
        [4, 4, 4],
    ];

    /// Combo bonus indexed by the pre-increment combo count; saturates at
    /// the last entry for longer chains.
    pub const COMBO_TABLE: [u32; 10] = [0, 0, 1, 1, 1, 2, 2, 3, 3, 4];

    /// Perfect-clear bonus indexed by lines cleared.
    pub const PC_BONUS: [u32; 5] = [0, 10, 10, 10, 10];

    /// Flat bonus for any spin clear on top of the table's spin columns.
    /// Botris prices spins entirely in the table, so this ships as zero;
    /// rule variants can raise it.
    pub const ALL_SPIN_BONUS: u32 = 0;

    pub const B2B_BONUS: u32 = 1;

    pub fn new() -> Self {
        Self
    }

    /// Back-to-back bonus for the post-increment streak count: the bonus
    /// only pays once a streak is established.
    pub fn b2b_bonus(b2b: u32) -> u32 {
        if b2b > 1 {
            Self::B2B_BONUS
        } else {
            0
        }
    }

    /// Converts one placement outcome into damage and advances the combo
    /// and back-to-back counters in place.
    ///
    /// A zero-line placement resets the combo, leaves b2b untouched and
    /// deals nothing. A "difficult" clear (any spin, or four lines)
    /// extends the b2b streak; anything else breaks it.
    pub fn points(
        &self,
        lines_cleared: u32,
        spin: Spin,
        perfect_clear: bool,
        combo: &mut u32,
        b2b: &mut u32,
    ) -> u32 {
        if lines_cleared == 0 {
            *combo = 0;
            return 0;
        }

        let lines = lines_cleared.min(4) as usize;
        let mut damage = Self::ATTACK_TABLE[lines][spin as usize];
        if spin != Spin::None {
            damage += Self::ALL_SPIN_BONUS;
        }

        let difficult = spin != Spin::None || lines_cleared >= 4;
        if difficult {
            *b2b += 1;
            damage += Self::b2b_bonus(*b2b);
        } else {
            *b2b = 0;
        }

        let combo_index = (*combo as usize).min(Self::COMBO_TABLE.len() - 1);
        damage += Self::COMBO_TABLE[combo_index];
        *combo += 1;

        if perfect_clear {
            damage += Self::PC_BONUS[lines];
        }

        damage
    }
}

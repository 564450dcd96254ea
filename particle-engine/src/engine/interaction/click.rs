use crate::engine::director::phases::AnimationPhase;

/// Clicks only act on fully formed words with no scatter in flight.
pub fn click_allowed(phase: &AnimationPhase, scatter_active: bool) -> bool {
    phase.fully_dissolved() && phase.fully_reassembled() && !scatter_active
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::animation::DISSOLVE_CAP;

    #[test]
    fn every_gate_combination() {
        for dissolved in [false, true] {
            for reassembled in [false, true] {
                for scatter_active in [false, true] {
                    let phase = AnimationPhase {
                        dissolve: if dissolved { DISSOLVE_CAP } else { DISSOLVE_CAP - 0.001 },
                        reassemble: if reassembled { 1.0 } else { 0.999 },
                        ..AnimationPhase::default()
                    };
                    let expected = dissolved && reassembled && !scatter_active;
                    assert_eq!(
                        click_allowed(&phase, scatter_active),
                        expected,
                        "dissolved={dissolved} reassembled={reassembled} scatter={scatter_active}"
                    );
                }
            }
        }
    }
}

//! Fire-and-forget audio/visual triggers.
//!
//! The session only names what should be heard or shown; the host drains
//! the buffer and plays whatever it likes.

/// Sound categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Click,
    Success,
    Error,
    Win,
    Lose,
    Tie,
    Type,
    Enter,
    GoodResult,
}

impl SoundEffect {
    /// Category name understood by the audio host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Success => "success",
            Self::Error => "error",
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Tie => "tie",
            Self::Type => "type",
            Self::Enter => "enter",
            Self::GoodResult => "goodresult",
        }
    }
}

/// Something for the host to present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Sound(SoundEffect),
    /// Start the confetti
    Celebrate,
}

/// Buffered effects awaiting the host.
#[derive(Debug, Clone, Default)]
pub struct EffectQueue {
    pending: Vec<Effect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a sound.
    pub fn sound(&mut self, sound: SoundEffect) {
        self.pending.push(Effect::Sound(sound));
    }

    /// Queue confetti.
    pub fn celebrate(&mut self) {
        self.pending.push(Effect::Celebrate);
    }

    /// Drain everything queued so far.
    pub fn take(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    /// True if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains() {
        let mut effects = EffectQueue::new();
        effects.sound(SoundEffect::Click);
        effects.celebrate();

        assert_eq!(
            effects.take(),
            vec![Effect::Sound(SoundEffect::Click), Effect::Celebrate]
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_category_names() {
        assert_eq!(SoundEffect::GoodResult.as_str(), "goodresult");
        assert_eq!(SoundEffect::Tie.as_str(), "tie");
    }
}

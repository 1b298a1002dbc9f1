//! Effect templates
//!
//! A template describes the status effect a beacon currently broadcasts. It is
//! read from the live world on every tick and never stored in the registry.

use std::fmt;

/// Kind of status effect
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Speed,
    Haste,
    Resistance,
    JumpBoost,
    Strength,
    Regeneration,
    /// Any other effect the host can broadcast, by host name
    Other(String),
}

impl EffectKind {
    /// Host-facing effect name
    pub fn name(&self) -> &str {
        match self {
            EffectKind::Speed => "SPEED",
            EffectKind::Haste => "HASTE",
            EffectKind::Resistance => "RESISTANCE",
            EffectKind::JumpBoost => "JUMP_BOOST",
            EffectKind::Strength => "STRENGTH",
            EffectKind::Regeneration => "REGENERATION",
            EffectKind::Other(name) => name,
        }
    }

    /// Map a host effect name onto a kind
    pub fn from_name(name: &str) -> Self {
        match name {
            "SPEED" => EffectKind::Speed,
            "HASTE" => EffectKind::Haste,
            "RESISTANCE" => EffectKind::Resistance,
            "JUMP_BOOST" => EffectKind::JumpBoost,
            "STRENGTH" => EffectKind::Strength,
            "REGENERATION" => EffectKind::Regeneration,
            other => EffectKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status effect descriptor
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EffectTemplate {
    pub kind: EffectKind,
    /// Duration in game ticks
    pub duration_ticks: u32,
    /// Zero-based potency level
    pub amplifier: u8,
    /// Ambient effects render with fewer, translucent particles
    pub ambient: bool,
    pub particles: bool,
    pub icon: bool,
}

impl EffectTemplate {
    /// Create a template with the flags a beacon uses by default
    pub fn new(kind: EffectKind, duration_ticks: u32, amplifier: u8) -> Self {
        EffectTemplate {
            kind,
            duration_ticks,
            amplifier,
            ambient: true,
            particles: true,
            icon: true,
        }
    }

    pub fn with_ambient(mut self, ambient: bool) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_particles(mut self, particles: bool) -> Self {
        self.particles = particles;
        self
    }

    pub fn with_icon(mut self, icon: bool) -> Self {
        self.icon = icon;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_kind_names() {
        for kind in [
            EffectKind::Speed,
            EffectKind::Haste,
            EffectKind::Resistance,
            EffectKind::JumpBoost,
            EffectKind::Strength,
            EffectKind::Regeneration,
        ] {
            assert_eq!(EffectKind::from_name(kind.name()), kind);
        }
        assert_eq!(
            EffectKind::from_name("GLOWING"),
            EffectKind::Other("GLOWING".to_string())
        );
    }

    #[test]
    fn test_template_flags() {
        let template = EffectTemplate::new(EffectKind::Speed, 260, 1)
            .with_particles(false)
            .with_icon(false);

        assert!(template.ambient);
        assert!(!template.particles);
        assert!(!template.icon);
        assert_eq!(template.amplifier, 1);
    }
}

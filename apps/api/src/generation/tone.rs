//! Tone calibration — maps the requested tone label to style guidance.
//!
//! Unknown labels fall back to `Tone::Consultative`. Resolution never fails.

/// Writing tone for a generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tone {
    #[default]
    Consultative,
    Direct,
    Casual,
    Formal,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Consultative, Tone::Direct, Tone::Casual, Tone::Formal];

    /// Case-insensitive lookup; anything unrecognized resolves to the default.
    pub fn resolve(label: &str) -> Tone {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Consultative => "Consultative",
            Tone::Direct => "Direct",
            Tone::Casual => "Casual",
            Tone::Formal => "Formal",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            Tone::Consultative => {
                "Advisory and insight-led, like a thought partner. \
                Position the sender as someone sharing knowledge worth having."
            }
            Tone::Direct => {
                "Short sentences and a firm call to action. \
                Get to the point fast and stay confident."
            }
            Tone::Casual => {
                "Conversational and light. \
                Write the way you would message a colleague, not a stranger."
            }
            Tone::Formal => {
                "Professional and structured. \
                Use proper business language from greeting to sign-off."
            }
        }
    }
}

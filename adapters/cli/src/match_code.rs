use std::{error::Error, fmt};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bomber_arena_core::ArenaConfig;
use serde::{Deserialize, Serialize};

use crate::lineup::BotKind;

/// Leading segments of every match code this build understands.
pub(crate) const CODE_HEADER: &str = "arena:v1";
const SEGMENT_NAMES: [&str; 4] = ["prefix", "version", "arena size", "payload"];

/// Everything needed to replay a match: arena settings, seed and line-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MatchCode {
    pub(crate) config: ArenaConfig,
    pub(crate) seed: u64,
    pub(crate) bots: Vec<BotKind>,
}

impl MatchCode {
    /// Encodes the match into a single line that can be pasted back via `--code`.
    pub(crate) fn encode(&self) -> Result<String, MatchCodeError> {
        let payload = SerializableMatch {
            seed: self.seed,
            max_lives: self.config.max_lives,
            box_spawn_rate: self.config.box_spawn_rate,
            max_fuse: self.config.max_fuse,
            bots: self.bots.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(MatchCodeError::Json)?;
        let encoded = URL_SAFE_NO_PAD.encode(json);
        Ok(format!(
            "{CODE_HEADER}:{}x{}:{encoded}",
            self.config.width, self.config.height
        ))
    }

    /// Reads a code printed by [`MatchCode::encode`].
    ///
    /// Surrounding whitespace is ignored so codes can be pasted straight from
    /// a terminal.
    pub(crate) fn decode(value: &str) -> Result<Self, MatchCodeError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(MatchCodeError::Empty);
        }

        let segments: Vec<&str> = value.splitn(SEGMENT_NAMES.len(), ':').collect();
        if let Some(missing) = SEGMENT_NAMES.get(segments.len()) {
            return Err(MatchCodeError::MissingSegment(*missing));
        }
        let &[prefix, version, size, payload] = segments.as_slice() else {
            return Err(MatchCodeError::MissingSegment("payload"));
        };

        let header = format!("{prefix}:{version}");
        if header != CODE_HEADER {
            return Err(if prefix == "arena" {
                MatchCodeError::UnsupportedVersion(version.to_owned())
            } else {
                MatchCodeError::ForeignPrefix(prefix.to_owned())
            });
        }

        let (width, height) = arena_size(size)?;
        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(MatchCodeError::Base64)?;
        let settings: SerializableMatch =
            serde_json::from_slice(&json).map_err(MatchCodeError::Json)?;

        Ok(Self {
            config: ArenaConfig {
                width,
                height,
                max_lives: settings.max_lives,
                box_spawn_rate: settings.box_spawn_rate,
                max_fuse: settings.max_fuse,
            },
            seed: settings.seed,
            bots: settings.bots,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct SerializableMatch {
    seed: u64,
    max_lives: u32,
    box_spawn_rate: u8,
    max_fuse: u8,
    bots: Vec<BotKind>,
}

/// Reasons a match code could not be produced or replayed.
#[derive(Debug)]
pub(crate) enum MatchCodeError {
    /// Nothing but whitespace was supplied.
    Empty,
    /// The code stopped before the named segment.
    MissingSegment(&'static str),
    /// The code belongs to some other tool.
    ForeignPrefix(String),
    /// The code was written by an incompatible release.
    UnsupportedVersion(String),
    /// The arena size was not `<width>x<height>` with non-zero sides.
    ArenaSize(String),
    /// The payload was not URL-safe base64.
    Base64(base64::DecodeError),
    /// The payload did not hold match settings.
    Json(serde_json::Error),
}

impl fmt::Display for MatchCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("no match code given"),
            Self::MissingSegment(segment) => write!(f, "match code ends before its {segment}"),
            Self::ForeignPrefix(prefix) => {
                write!(f, "'{prefix}' codes are not Bomber Arena match codes")
            }
            Self::UnsupportedVersion(version) => {
                write!(f, "match codes of version '{version}' cannot be replayed")
            }
            Self::ArenaSize(size) => write!(f, "arena size '{size}' is not <width>x<height>"),
            Self::Base64(_) => f.write_str("match settings are not valid base64"),
            Self::Json(_) => f.write_str("match settings could not be read"),
        }
    }
}

impl Error for MatchCodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Base64(error) => Some(error),
            Self::Json(error) => Some(error),
            _ => None,
        }
    }
}

fn arena_size(size: &str) -> Result<(u32, u32), MatchCodeError> {
    let side = |text: &str| text.parse::<u32>().ok().filter(|value| *value > 0);
    size.split_once('x')
        .and_then(|(width, height)| Some((side(width)?, side(height)?)))
        .ok_or_else(|| MatchCodeError::ArenaSize(size.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_carries_the_whole_match() {
        let code = MatchCode {
            config: ArenaConfig {
                width: 13,
                height: 9,
                max_lives: 2,
                box_spawn_rate: 40,
                max_fuse: 6,
            },
            seed: 0xdead_beef,
            bots: vec![BotKind::Human, BotKind::Greedy, BotKind::Flee, BotKind::Scripted],
        };

        let encoded = code.encode().expect("match encodes");
        assert!(encoded.starts_with(&format!("{CODE_HEADER}:13x9:")));

        let decoded = MatchCode::decode(&encoded).expect("match decodes");
        assert_eq!(decoded, code);
    }

    #[test]
    fn malformed_codes_are_rejected() {
        assert!(matches!(MatchCode::decode("   "), Err(MatchCodeError::Empty)));
        assert!(matches!(
            MatchCode::decode("board:v1:5x5:abc"),
            Err(MatchCodeError::ForeignPrefix(prefix)) if prefix == "board"
        ));
        assert!(matches!(
            MatchCode::decode("arena:v2:5x5:abc"),
            Err(MatchCodeError::UnsupportedVersion(_))
        ));
        assert!(matches!(
            MatchCode::decode("arena:v1:0x5:abc"),
            Err(MatchCodeError::ArenaSize(_))
        ));
        assert!(matches!(
            MatchCode::decode("arena:v1:5x5"),
            Err(MatchCodeError::MissingSegment("payload"))
        ));
        assert!(matches!(
            MatchCode::decode("arena:v1:5x5:!!!"),
            Err(MatchCodeError::Base64(_))
        ));
    }

    #[test]
    fn undecodable_settings_keep_their_cause() {
        let code = format!("{CODE_HEADER}:11x11:{}", URL_SAFE_NO_PAD.encode("{}"));
        let error = MatchCode::decode(&code).expect_err("settings are incomplete");

        assert!(matches!(error, MatchCodeError::Json(_)));
        assert!(error.source().is_some());
        assert_eq!(error.to_string(), "match settings could not be read");
    }
}

//! Archive filename parsing and overlay ordering (spec C8).
//!
//! Filenames follow a rigid, underscore-delimited grammar:
//! `<priority>_and_[softdlc_<tag>_<dlc_tag>|<tag>][_<calibre|format|encoding>]{0,3}`.
//! Parsing is best-effort: unrecognized trailing tokens are ignored rather
//! than rejected, matching how the game itself tolerates stray archive
//! names in its asset directories.

const CALIBRES: [&str; 3] = ["common", "low", "veryhigh"];
const FORMATS: [&str; 1] = ["pvr"];
const ENCODINGS: [&str; 1] = ["astc"];

const TAG_ORDER: [&str; 5] = [
    "startup",
    "mlpextragui",
    "mlpextra",
    "mlpextra2",
    "mlpdata",
];
const CALIBRE_ORDER: [&str; 4] = ["all", "low", "high", "veryhigh"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArkFilename {
    pub priority: u32,
    pub tag: String,
    pub is_dlc: bool,
    pub dlc_tag: String,
    pub encoding: String,
    pub format: String,
    pub calibre: String,
}

impl ArkFilename {
    /// Parse an archive filename (with or without extension). Tokens this
    /// grammar doesn't recognize are dropped silently rather than causing
    /// a parse error — the grammar itself has no "invalid" case, only
    /// "best effort."
    pub fn parse(filename: &str) -> Self {
        let stem = filename.rsplit_once('.').map_or(filename, |(s, _)| s);
        let mut parts = stem.split('_');
        let mut out = ArkFilename::default();

        let Some(priority_tok) = parts.next() else {
            return out;
        };
        out.priority = priority_tok.parse().unwrap_or(0);

        // "and" separator token, discarded.
        if parts.next().is_none() {
            return out;
        }

        let Some(mut tag) = parts.next() else {
            return out;
        };
        if tag == "softdlc" {
            out.is_dlc = true;
            let Some(next_tag) = parts.next() else {
                return out;
            };
            tag = next_tag;
            let Some(dlc_tag) = parts.next() else {
                out.tag = tag.to_string();
                return out;
            };
            out.dlc_tag = dlc_tag.to_string();
        }
        out.tag = tag.to_string();

        for part in parts.by_ref().take(3) {
            if CALIBRES.contains(&part) {
                out.calibre = part.to_string();
            } else if FORMATS.contains(&part) {
                out.format = part.to_string();
            } else if ENCODINGS.contains(&part) {
                out.encoding = part.to_string();
            } else {
                break;
            }
        }

        out
    }

    /// Device-tier tag with the empty `calibre` resolved to `"high"`
    /// (the grammar's implicit default), matching `CALIBRE_ORDER`.
    pub fn device_calibre(&self) -> &str {
        match self.calibre.as_str() {
            "common" => "all",
            "low" => "low",
            "veryhigh" => "veryhigh",
            _ => "high",
        }
    }

    fn sort_key(&self) -> (bool, u32, i32, String, String, i32, i32) {
        (
            self.is_dlc,
            self.priority,
            rank(&self.tag, &TAG_ORDER),
            self.dlc_tag.clone(),
            self.encoding.clone(),
            -rank(&self.format, &FORMATS),
            rank(self.device_calibre(), &CALIBRE_ORDER),
        )
    }
}

fn rank(value: &str, order: &[&str]) -> i32 {
    order
        .iter()
        .position(|&s| s == value)
        .map(|i| i as i32)
        .unwrap_or(-1)
}

impl PartialOrd for ArkFilename {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArkFilename {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl std::fmt::Display for ArkFilename {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens = vec![format!("{:03}", self.priority), "and".to_string()];
        if self.is_dlc {
            tokens.push("softdlc".to_string());
        }
        if !self.tag.is_empty() {
            tokens.push(self.tag.clone());
        }
        if !self.dlc_tag.is_empty() {
            tokens.push(self.dlc_tag.clone());
        }
        if !self.encoding.is_empty() {
            tokens.push(self.encoding.clone());
        }
        if !self.format.is_empty() {
            tokens.push(self.format.clone());
        }
        if !self.calibre.is_empty() {
            tokens.push(self.calibre.clone());
        }
        write!(f, "{}", tokens.join("_"))
    }
}
